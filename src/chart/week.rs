use std::{cmp::Ordering, fmt, str::FromStr, sync::Arc};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::DashError;

/// Week identifier naming one weekly chart snapshot, e.g. "2017-01-05".
/// Keeps the text as written for prefix filtering and display, plus the parsed date for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeekId {
    text: Arc<str>,
    date: NaiveDate,
}

impl WeekId {
    pub fn parse(text: &str) -> Result<Self, DashError> {
        let trimmed = text.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| DashError::InvalidWeek(text.to_string()))?;
        Ok(Self { text: Arc::from(trimmed), date })
    }

    #[inline]
    pub fn as_str(&self) -> &str { &self.text }

    #[inline]
    pub fn date(&self) -> NaiveDate { self.date }

    /// Lexical prefix test against the identifier text ("2017", "2017-01", ...).
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool { self.text.starts_with(prefix) }
}

impl Ord for WeekId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date).then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for WeekId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl FromStr for WeekId {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.text) }
}

impl Serialize for WeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
