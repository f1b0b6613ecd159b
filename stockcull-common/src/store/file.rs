//! Flat-file decision store
//!
//! One JSON object file mapping handle -> decision string. Every mutation
//! reads the whole file, applies the change in memory, and rewrites the
//! file in full. Concurrent writers can therefore lose updates; this is
//! accepted for the single-operator deployment this backend targets, and
//! the SQLite backend exists for anyone who needs atomic writes.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{Decision, DecisionMap, DecisionStore};
use crate::Result;

/// Decision store backed by a single JSON file.
///
/// The file is created on first write; until then reads report an empty
/// store rather than an error.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Result<DecisionMap> {
        if !self.path.exists() {
            return Ok(DecisionMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Rewrite the whole file and flush it to disk before reporting
    /// success, so a completed save survives a process restart.
    fn write_map(&self, map: &DecisionMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }
}

#[async_trait]
impl DecisionStore for FileStore {
    async fn load_all(&self) -> Result<DecisionMap> {
        self.read_map()
    }

    async fn save(&self, handle: &str, decision: Decision) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(handle.to_string(), decision);
        self.write_map(&map)?;
        debug!("Saved decision {} for {}", decision, handle);
        Ok(())
    }

    async fn get(&self, handle: &str) -> Result<Option<Decision>> {
        Ok(self.read_map()?.get(handle).copied())
    }

    async fn delete(&self, handle: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(handle).is_some() {
            self.write_map(&map)?;
            debug!("Removed decision for {}", handle);
        }
        Ok(())
    }
}
