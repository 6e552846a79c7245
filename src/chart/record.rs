use std::{fmt, sync::{Arc, LazyLock}};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chart::WeekId;
use crate::error::{DashError, Result};

/// Chart rank exactly as stored in the weekly file.
///
/// Files are not consistent about whether ranks are 0-based or 1-based. Sorting uses the raw
/// value and [`Rank::display_position`] adds one for presentation, matching the dashboard this
/// data was produced for. No correction is applied to the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl Rank {
    #[inline]
    pub fn raw(self) -> u32 { self.0 }

    /// Position shown in ranked lists (raw + 1). Display only.
    #[inline]
    pub fn display_position(self) -> u32 { self.0.saturating_add(1) }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A numeric field that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(u64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    fn as_text(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(v) => v.to_string(),
        }
    }
}

/// One entry of a weekly chart file as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSongRecord {
    week: String,
    artist: String,
    song: String,
    rank: RawNumber,
    streams: RawNumber,
}

/// A normalized song record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongRecord {
    pub week: WeekId,
    /// Credited artists, possibly a comma-separated list of co-artists.
    pub artist: Arc<str>,
    pub song: Arc<str>,
    pub rank: Rank,
    /// Stream count text as published, with thousands separators.
    pub streams: Arc<str>,
    /// `streams` with separators removed.
    pub streams_num: u64,
}

impl SongRecord {
    /// Individual artist names credited on this record, trimmed.
    pub fn credited_artists(&self) -> impl Iterator<Item = &str> {
        self.artist.split(',').map(str::trim).filter(|a| !a.is_empty())
    }
}

static STREAMS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)$").expect("valid streams pattern")
});

/// Parse a stream count like "1,234,567" (or "1234567").
/// Separators must group digits by three; anything else is rejected.
pub fn parse_streams(text: &str) -> Option<u64> {
    let text = text.trim();
    if !STREAMS_PATTERN.is_match(text) { return None }
    text.replace(',', "").parse().ok()
}

fn parse_rank(raw: &RawNumber) -> Option<u32> {
    match raw {
        RawNumber::Int(n) => u32::try_from(*n).ok(),
        RawNumber::Text(s) => s.trim().parse().ok(),
        RawNumber::Other(_) => None,
    }
}

impl RawSongRecord {
    /// Validate and normalize. `context` names the record in error messages.
    pub(crate) fn normalize(self, context: &str) -> Result<SongRecord> {
        let week = WeekId::parse(&self.week)
            .map_err(|_| DashError::malformed(context, "week", self.week.clone()))?;

        let rank = parse_rank(&self.rank)
            .ok_or_else(|| DashError::malformed(context, "rank", self.rank.as_text()))?;

        let streams = self.streams.as_text();
        let streams_num = match &self.streams {
            RawNumber::Int(n) => Some(*n),
            RawNumber::Text(s) => parse_streams(s),
            RawNumber::Other(_) => None,
        }
        .ok_or_else(|| DashError::malformed(context, "streams", streams.clone()))?;

        Ok(SongRecord {
            week,
            artist: Arc::from(self.artist.as_str()),
            song: Arc::from(self.song.as_str()),
            rank: Rank(rank),
            streams: Arc::from(streams.as_str()),
            streams_num,
        })
    }
}

/// Decode one weekly chart file into normalized records.
/// The first malformed record fails the whole file.
pub(crate) fn parse_week_file(label: &str, bytes: &[u8]) -> Result<Vec<SongRecord>> {
    let raw: Vec<RawSongRecord> = serde_json::from_slice(bytes)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, record)| {
            let context = format!("{label} record #{i} ({:?})", record.song);
            record.normalize(&context)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_streams_strips_separators() {
        assert_eq!(parse_streams("1,000,000"), Some(1_000_000));
        assert_eq!(parse_streams("500,000"), Some(500_000));
        assert_eq!(parse_streams("999"), Some(999));
        assert_eq!(parse_streams("1234567"), Some(1_234_567));
    }

    #[test]
    fn parse_streams_rejects_garbage() {
        assert_eq!(parse_streams(""), None);
        assert_eq!(parse_streams("abc"), None);
        assert_eq!(parse_streams("1,00"), None);
        assert_eq!(parse_streams("1,0000"), None);
        assert_eq!(parse_streams("-5"), None);
        assert_eq!(parse_streams("1.5"), None);
    }

    #[test]
    fn accepts_numeric_and_text_fields() {
        let json = br#"[
            {"week":"2017-01-05","artist":"Drake, Future","song":"A","rank":0,"streams":"1,000"},
            {"week":"2017-01-05","artist":"Adele","song":"B","rank":"1","streams":2000}
        ]"#;
        let records = parse_week_file("2017-01-05", json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rank, Rank(0));
        assert_eq!(records[0].streams_num, 1000);
        assert_eq!(&*records[0].streams, "1,000");
        assert_eq!(records[1].rank, Rank(1));
        assert_eq!(records[1].streams_num, 2000);
    }

    #[test]
    fn malformed_streams_fail_loudly() {
        let json = br#"[{"week":"2017-01-05","artist":"X","song":"Bad","rank":3,"streams":"lots"}]"#;
        let err = parse_week_file("2017-01-05", json).unwrap_err();
        match err {
            DashError::MalformedField { field, value, context } => {
                assert_eq!(field, "streams");
                assert_eq!(value, "lots");
                assert!(context.contains("record #0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_rank_fails_loudly() {
        let json = br#"[{"week":"2017-01-05","artist":"X","song":"Bad","rank":"first","streams":"1"}]"#;
        assert!(matches!(
            parse_week_file("w", json),
            Err(DashError::MalformedField { field: "rank", .. })
        ));
    }

    #[test]
    fn credited_artists_splits_and_trims() {
        let json = br#"[{"week":"2017-01-05","artist":"Drake ,  Future,","song":"A","rank":0,"streams":"1"}]"#;
        let records = parse_week_file("w", json).unwrap();
        let names: Vec<_> = records[0].credited_artists().collect();
        assert_eq!(names, ["Drake", "Future"]);
    }

    #[test]
    fn display_position_adds_one() {
        assert_eq!(Rank(0).display_position(), 1);
        assert_eq!(Rank(9).display_position(), 10);
    }

    #[test]
    fn serializes_to_flat_json() {
        let json = br#"[{"week":"2017-01-05","artist":"Adele","song":"Hello","rank":2,"streams":"1,000"}]"#;
        let records = parse_week_file("w", json).unwrap();
        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value, serde_json::json!({
            "week": "2017-01-05", "artist": "Adele", "song": "Hello",
            "rank": 2, "streams": "1,000", "streams_num": 1000
        }));
    }
}
