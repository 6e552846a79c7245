use std::fmt;

use serde::{Serialize, Serializer};

use crate::render::format_thousands;
use crate::world::{CountryFeature, UsageTable};

/// Label shown for countries without a usage row.
pub const NO_DATA_LABEL: &str = "no data";

/// A country's joined usage value. `NoData` is distinct from `Count(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageValue {
    Count(u64),
    NoData,
}

impl UsageValue {
    pub fn count(self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(n),
            Self::NoData => None,
        }
    }

    /// Tooltip label with thousands separators.
    pub fn label(self) -> String {
        match self {
            Self::Count(n) => format_thousands(n),
            Self::NoData => NO_DATA_LABEL.to_string(),
        }
    }
}

impl fmt::Display for UsageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::NoData => f.write_str(NO_DATA_LABEL),
        }
    }
}

impl Serialize for UsageValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::NoData => serializer.serialize_none(),
        }
    }
}

/// Join each boundary feature to its usage count by ISO code, in feature order.
pub fn join_usage(countries: &[CountryFeature], usage: &UsageTable) -> Vec<UsageValue> {
    countries.iter()
        .map(|country| {
            country.code.as_deref()
                .and_then(|code| usage.get(code))
                .map_or(UsageValue::NoData, UsageValue::Count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;

    fn country(code: Option<&str>) -> CountryFeature {
        CountryFeature { code: code.map(str::to_string), name: "x".into(), shape: MultiPolygon(vec![]) }
    }

    #[test]
    fn matching_code_yields_count() {
        let usage = UsageTable::from_pairs([("US", 42u64)]);
        let values = join_usage(&[country(Some("US"))], &usage);
        assert_eq!(values, [UsageValue::Count(42)]);
        assert_eq!(values[0].to_string(), "42");
    }

    #[test]
    fn missing_code_yields_no_data_not_zero() {
        let usage = UsageTable::from_pairs([("US", 42u64)]);
        let values = join_usage(&[country(Some("CA")), country(None)], &usage);
        assert_eq!(values, [UsageValue::NoData, UsageValue::NoData]);
        assert_eq!(values[0].to_string(), "no data");
        assert_ne!(values[0], UsageValue::Count(0));
    }

    #[test]
    fn labels() {
        assert_eq!(UsageValue::Count(1_234_567).label(), "1,234,567");
        assert_eq!(UsageValue::NoData.label(), NO_DATA_LABEL);
        assert_eq!(serde_json::to_string(&UsageValue::NoData).unwrap(), "null");
    }
}
