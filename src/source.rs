use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::error::{DashError, Result};

/// Read-only access to dataset files by relative path, e.g.
/// "data/songs-global-weekly/2017-01-05.json", "data/users.csv".
pub trait ChartSource: Send + Sync {
    fn get(&self, rel: &str) -> Result<Arc<[u8]>>;
    fn has(&self, rel: &str) -> bool;
}

/// Files under a root directory on disk.
pub struct DiskSource {
    root: PathBuf,
}

impl DiskSource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &std::path::Path { &self.root }

    fn full(&self, rel: &str) -> PathBuf { self.root.join(rel) }
}

impl ChartSource for DiskSource {
    fn get(&self, rel: &str) -> Result<Arc<[u8]>> {
        let path = self.full(rel);
        if !path.exists() {
            return Err(DashError::MissingFile(path.display().to_string()));
        }
        Ok(Arc::from(std::fs::read(path)?))
    }

    fn has(&self, rel: &str) -> bool { self.full(rel).exists() }
}

/// In-memory files, keyed by relative path.
/// Used by the browser bindings, where JS has already fetched the bytes.
#[derive(Default, Clone)]
pub struct MemSource {
    pub(crate) files: HashMap<String, Arc<[u8]>>,
}

impl MemSource {
    pub fn new(files: HashMap<String, Arc<[u8]>>) -> Self {
        let files = files.into_iter().map(|(rel, bytes)| (normalize_key(&rel), bytes)).collect();
        Self { files }
    }

    /// Add or replace a file. "./a.json", "/a.json" and "a.json" name the same file.
    pub fn insert(&mut self, rel: impl AsRef<str>, bytes: impl Into<Arc<[u8]>>) {
        self.files.insert(normalize_key(rel.as_ref()), bytes.into());
    }

    pub fn len(&self) -> usize { self.files.len() }

    pub fn is_empty(&self) -> bool { self.files.is_empty() }
}

/// Forward slashes, no leading "/" or "./".
fn normalize_key(rel: &str) -> String {
    let mut key = rel.trim().replace('\\', "/");
    loop {
        if let Some(rest) = key.strip_prefix("./") {
            key = rest.to_string();
        } else if let Some(rest) = key.strip_prefix('/') {
            key = rest.to_string();
        } else {
            return key;
        }
    }
}

impl ChartSource for MemSource {
    fn get(&self, rel: &str) -> Result<Arc<[u8]>> {
        self.files.get(&normalize_key(rel)).cloned()
            .ok_or_else(|| DashError::MissingFile(rel.to_string()))
    }

    fn has(&self, rel: &str) -> bool { self.files.contains_key(&normalize_key(rel)) }
}

/// Files served below a base URL, fetched with a blocking client.
#[cfg(feature = "http")]
pub struct HttpSource {
    base: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| DashError::Http(e.to_string()))?;
        Ok(Self { base: base.into(), client })
    }

    fn url(&self, rel: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), rel.trim_start_matches('/'))
    }
}

#[cfg(feature = "http")]
impl ChartSource for HttpSource {
    fn get(&self, rel: &str) -> Result<Arc<[u8]>> {
        let url = self.url(rel);
        let response = self.client.get(&url).send()
            .map_err(|e| DashError::Http(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DashError::MissingFile(url));
        }
        if !status.is_success() {
            return Err(DashError::Http(format!("GET {url}: status {status}")));
        }

        let bytes = response.bytes()
            .map_err(|e| DashError::Http(format!("GET {url}: {e}")))?;
        Ok(Arc::from(bytes.to_vec()))
    }

    /// False on any HEAD failure; use `get` to tell a missing file from an unreachable server.
    fn has(&self, rel: &str) -> bool {
        self.client.head(self.url(rel)).send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
