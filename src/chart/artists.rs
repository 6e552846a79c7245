use std::{collections::BTreeSet, sync::Arc};

use serde::Serialize;

use crate::chart::SongRecord;

/// Deduplicated artist names across every loaded record, kept in lexicographic order.
/// Multi-artist credits ("A, B") contribute each name separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtistIndex {
    names: BTreeSet<Arc<str>>,
}

impl ArtistIndex {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a SongRecord>) -> Self {
        let mut index = Self::default();
        for record in records {
            index.add(record);
        }
        index
    }

    pub fn add(&mut self, record: &SongRecord) {
        for name in record.credited_artists() {
            if !self.names.contains(name) {
                self.names.insert(Arc::from(name));
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.names.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    #[inline]
    pub fn contains(&self, name: &str) -> bool { self.names.contains(name) }

    /// Names in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.names.iter().map(|n| &**n) }

    pub fn to_vec(&self) -> Vec<String> { self.iter().map(str::to_string).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::record::parse_week_file;

    #[test]
    fn splits_collaborations_and_sorts() {
        let json = br#"[
            {"week":"2017-01-05","artist":"Drake, Future","song":"A","rank":0,"streams":"1"},
            {"week":"2017-01-05","artist":" Adele ","song":"B","rank":1,"streams":"1"},
            {"week":"2017-01-05","artist":"Future","song":"C","rank":2,"streams":"1"}
        ]"#;
        let records = parse_week_file("w", json).unwrap();
        let index = ArtistIndex::from_records(&records);

        assert_eq!(index.to_vec(), ["Adele", "Drake", "Future"]);
        assert!(index.contains("Future"));
        assert!(!index.contains("Drake, Future"));
    }

    #[test]
    fn empty_index() {
        let index = ArtistIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }

    #[test]
    fn serializes_as_sorted_list() {
        let json = br#"[{"week":"2017-01-05","artist":"Sia, Drake","song":"A","rank":0,"streams":"1"}]"#;
        let index = ArtistIndex::from_records(&parse_week_file("w", json).unwrap());
        assert_eq!(serde_json::to_string(&index).unwrap(), r#"["Drake","Sia"]"#);
    }
}
