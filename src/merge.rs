use std::{cmp::Ordering, fs, path::{Path, PathBuf}};

use serde_json::Value;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::Result;

/// Result of merging a directory of weekly chart files.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// All entries, sorted by week then rank.
    pub entries: Vec<Value>,
    /// Files that could not be decoded as a JSON array.
    pub skipped: Vec<PathBuf>,
}

/// Week text and numeric rank. Entries missing either sort first.
fn sort_key(entry: &Value) -> (&str, f64) {
    let week = entry["week"].as_str().unwrap_or("");
    let rank = match &entry["rank"] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    (week, rank.unwrap_or(f64::NEG_INFINITY))
}

fn compare_entries(a: &Value, b: &Value) -> Ordering {
    let (week_a, rank_a) = sort_key(a);
    let (week_b, rank_b) = sort_key(b);
    week_a.cmp(week_b).then(rank_a.total_cmp(&rank_b))
}

/// Read every `*.json` array directly inside `dir` and merge them into one list.
/// Works for song and album files alike since entries stay untyped.
pub fn merge_chart_dir(dir: &Path) -> Result<MergeReport> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();

    let mut report = MergeReport::default();
    for path in paths {
        let bytes = fs::read(&path)?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => report.entries.extend(items),
            Ok(_) => {
                warn!(file = %path.display(), "skipping file: top level is not an array");
                report.skipped.push(path);
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping file: invalid JSON");
                report.skipped.push(path);
            }
        }
    }

    report.entries.sort_by(compare_entries);
    info!(entries = report.entries.len(), skipped = report.skipped.len(), "merged chart files");
    Ok(report)
}

/// Write `entries` as pretty-printed JSON, creating parent directories.
pub fn write_merged(path: &Path, entries: &[Value]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_sorted_by_week_then_rank() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("2017-01-12.json"), r#"[
            {"week": "2017-01-12", "rank": 10, "song": "c"},
            {"week": "2017-01-12", "rank": 2, "song": "b"}
        ]"#).unwrap();
        fs::write(dir.path().join("2017-01-05.json"), r#"[
            {"week": "2017-01-05", "rank": "1", "song": "a"}
        ]"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let report = merge_chart_dir(dir.path()).unwrap();
        let songs: Vec<_> = report.entries.iter().map(|e| e["song"].as_str().unwrap()).collect();
        assert_eq!(songs, ["a", "b", "c"]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn bad_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"[{"week": "2017-01-05", "rank": 0}]"#).unwrap();
        fs::write(dir.path().join("b.json"), "{not json").unwrap();
        fs::write(dir.path().join("c.json"), r#"{"week": "2017-01-05"}"#).unwrap();

        let report = merge_chart_dir(dir.path()).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.skipped, [dir.path().join("b.json"), dir.path().join("c.json")]);
    }

    #[test]
    fn writes_pretty_json_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Merge Data").join("all_songs.json");
        write_merged(&out, &[json!({"week": "2017-01-05", "rank": 0})]).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("\n  {"));
        let back: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(back[0]["rank"], 0);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(merge_chart_dir(&dir.path().join("nope")).is_err());
    }
}
