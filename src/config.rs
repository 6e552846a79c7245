use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::chart::WeekId;
use crate::error::{DashError, Result};
use crate::source::ChartSource;

/// Weeks bundled with the stock dashboard.
pub const DEFAULT_WEEKS: &[&str] = &[
    "2016-12-29", "2017-01-05", "2017-01-12", "2017-01-19", "2017-01-26",
    "2017-02-02", "2017-02-09", "2017-02-16", "2017-02-23", "2017-03-02",
];

pub const DEFAULT_SONGS_DIR: &str = "data/songs-global-weekly";
pub const MANIFEST_FILE: &str = "manifest.json";

fn default_songs_dir() -> String { DEFAULT_SONGS_DIR.to_string() }

fn default_weeks() -> Vec<String> { DEFAULT_WEEKS.iter().map(|w| w.to_string()).collect() }

fn default_code_property() -> String { "ISO_A2".to_string() }

/// Where the world map inputs live, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// GeoJSON FeatureCollection of country boundaries.
    pub boundaries: String,
    /// CSV with `country_code,users` rows.
    pub usage: String,
    /// Feature property holding the ISO country code.
    #[serde(default = "default_code_property")]
    pub code_property: String,
}

/// Dataset manifest (`manifest.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Directory holding one `{week}.json` per week.
    #[serde(default = "default_songs_dir")]
    pub songs_dir: String,
    /// Weeks to load, in ISO date form.
    #[serde(default = "default_weeks")]
    pub weeks: Vec<String>,
    #[serde(default)]
    pub world: Option<WorldConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { songs_dir: default_songs_dir(), weeks: default_weeks(), world: None }
    }
}

impl DashboardConfig {
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read `manifest.json` from the source, falling back to defaults only when it does not exist.
    /// Any other failure to fetch or parse it is an error.
    pub fn from_source(src: &dyn ChartSource) -> Result<Self> {
        match src.get(MANIFEST_FILE) {
            Ok(bytes) => Self::from_json_bytes(&bytes),
            Err(DashError::MissingFile(_)) => {
                debug!("no {MANIFEST_FILE}, using the bundled week list");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// The configured weeks, validated.
    pub fn week_ids(&self) -> Result<Vec<WeekId>> {
        self.weeks.iter().map(|w| WeekId::parse(w)).collect()
    }

    /// Relative path of the file for `week`.
    pub fn week_path(&self, week: &WeekId) -> String {
        format!("{}/{}.json", self.songs_dir.trim_end_matches('/'), week)
    }
}

/// Enumerate weeks for which `dir` holds a `{YYYY-MM-DD}.json` file, sorted by date.
/// Files whose stem is not a date are ignored.
pub fn discover_weeks(dir: &Path) -> Result<Vec<WeekId>> {
    if !dir.is_dir() {
        return Err(DashError::MissingFile(dir.display().to_string()));
    }

    let mut weeks = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(week) = path.file_stem().and_then(|s| s.to_str()).and_then(|s| WeekId::parse(s).ok()) {
            weeks.push(week);
        }
    }

    weeks.sort();
    Ok(weeks)
}
