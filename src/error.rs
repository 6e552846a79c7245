use thiserror::Error;

/// Library error type.
#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] polars::error::PolarsError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("missing file: {0}")]
    MissingFile(String),

    #[error("invalid week identifier {0:?} (expected YYYY-MM-DD)")]
    InvalidWeek(String),

    #[error("malformed {field} in {context}: {value:?}")]
    MalformedField {
        context: String,
        field: &'static str,
        value: String,
    },

    #[error("failed to load {} week(s): {}", .weeks.len(), failure_list(.weeks, .reasons))]
    LoadFailed { weeks: Vec<String>, reasons: Vec<String> },

    #[error("stream total for week {week} does not fit in 64 bits")]
    StreamOverflow { week: String },

    #[error("no data available for the selected filters")]
    NoData,

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("unknown {kind} filter value {value:?}")]
    UnknownFilter { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, DashError>;

/// "week (reason); week (reason)".
fn failure_list(weeks: &[String], reasons: &[String]) -> String {
    weeks.iter()
        .zip(reasons.iter().map(Some).chain(std::iter::repeat(None)))
        .map(|(week, reason)| match reason {
            Some(reason) => format!("{week} ({reason})"),
            None => week.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl DashError {
    pub(crate) fn malformed(context: impl Into<String>, field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedField { context: context.into(), field, value: value.into() }
    }
}
