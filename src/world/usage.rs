use std::io::Cursor;

use ahash::AHashMap;
use polars::{
    frame::DataFrame,
    io::SerReader,
    prelude::{CsvReadOptions, CsvReader},
};

use crate::error::{DashError, Result};

const CODE_COLUMN: &str = "country_code";
const USERS_COLUMN: &str = "users";

/// Per-country user counts keyed by upper-case ISO code.
/// A code mapped to `None` had a row with a blank count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageTable {
    counts: AHashMap<String, Option<u64>>,
}

impl UsageTable {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let counts = pairs.into_iter()
            .map(|(code, users)| (normalize_code(code.as_ref()), Some(users)))
            .collect();
        Self { counts }
    }

    /// The count for `code`; `None` means no usable data.
    pub fn get(&self, code: &str) -> Option<u64> {
        self.counts.get(&normalize_code(code)).copied().flatten()
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
}

fn normalize_code(code: &str) -> String { code.trim().to_ascii_uppercase() }

/// Read `country_code,users` rows from CSV bytes.
/// Every column is read as text so codes like "NA" survive and bad counts can be reported by row.
pub fn read_usage_csv(bytes: &[u8]) -> Result<UsageTable> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0));

    let df = CsvReader::new(Cursor::new(bytes))
        .with_options(options)
        .finish()?;
    check_header(&df)?;
    usage_from_frame(&df)
}

/// Columns are matched by name, never by position.
fn check_header(df: &DataFrame) -> Result<()> {
    let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
    for column in [CODE_COLUMN, USERS_COLUMN] {
        if !names.contains(&column) {
            return Err(DashError::malformed("usage header", column, names.join(",")));
        }
    }
    Ok(())
}

fn usage_from_frame(df: &DataFrame) -> Result<UsageTable> {
    let codes = df.column(CODE_COLUMN)?.str()?;
    let users = df.column(USERS_COLUMN)?.str()?;

    let mut counts = AHashMap::with_capacity(df.height());
    for (row, (code, count)) in codes.into_iter().zip(users.into_iter()).enumerate() {
        let Some(code) = code.map(normalize_code).filter(|c| !c.is_empty()) else { continue };

        let count = match count.map(str::trim).filter(|c| !c.is_empty()) {
            None => None,
            Some(text) => Some(text.parse::<u64>().map_err(|_| {
                DashError::malformed(format!("usage row {} ({code})", row + 1), "users", text)
            })?),
        };
        counts.insert(code, count);
    }

    Ok(UsageTable { counts })
}
