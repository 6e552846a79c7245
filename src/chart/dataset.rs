use std::sync::Arc;

use crate::chart::{ArtistIndex, SongRecord};

/// The full loaded record collection plus its artist index.
/// Never mutated after construction; filtering always produces new structures.
#[derive(Debug, Clone, Default)]
pub struct ChartDataset {
    records: Arc<[SongRecord]>,
    artists: ArtistIndex,
}

impl ChartDataset {
    pub fn new(records: Vec<SongRecord>) -> Self {
        let artists = ArtistIndex::from_records(&records);
        Self { records: Arc::from(records), artists }
    }

    #[inline]
    pub fn records(&self) -> &[SongRecord] { &self.records }

    #[inline]
    pub fn artists(&self) -> &ArtistIndex { &self.artists }

    #[inline]
    pub fn len(&self) -> usize { self.records.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
