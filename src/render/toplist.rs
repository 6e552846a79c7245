use std::fmt::Write;

use serde::Serialize;

use crate::aggregate::{latest_week, ArtistFilter, WeeklyAggregate, TOP_SONGS_PER_WEEK};
use crate::render::format::escape_xml;

/// One row of the ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSongEntry {
    /// Rank as displayed (raw + 1).
    pub position: u32,
    pub song: String,
    pub artist: String,
    /// Stream count text as published.
    pub streams: String,
}

/// Top songs of the most recent week in `aggregates`.
pub fn top_songs(aggregates: &[WeeklyAggregate]) -> Vec<TopSongEntry> {
    let Some(latest) = latest_week(aggregates) else { return Vec::new() };

    latest.songs.iter()
        .take(TOP_SONGS_PER_WEEK)
        .map(|record| TopSongEntry {
            position: record.rank.display_position(),
            song: record.song.to_string(),
            artist: record.artist.to_string(),
            streams: record.streams.to_string(),
        })
        .collect()
}

/// Heading for the current artist selection.
pub fn chart_title(artist: &ArtistFilter) -> String {
    match artist {
        ArtistFilter::All => "Listening Trends For All Artists".to_string(),
        ArtistFilter::Name(name) => format!("Listening Trends For {name}"),
    }
}

/// List items for the ranked list, as an HTML fragment.
pub fn render_top_list_html(entries: &[TopSongEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            concat!(
                r#"<li class="song-card">"#,
                r#"<div><span class="song-rank">{}</span></div>"#,
                r#"<div class="song-title">{}</div>"#,
                r#"<div class="song-artist">by {}</div>"#,
                r#"<div class="song-streams">{} streams</div>"#,
                "</li>",
            ),
            entry.position,
            escape_xml(&entry.song),
            escape_xml(&entry.artist),
            escape_xml(&entry.streams),
        );
    }
    out
}
