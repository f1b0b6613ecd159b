//! Decision store - durable handle -> decision mapping
//!
//! Two interchangeable backends sit behind [`DecisionStore`]: a flat JSON
//! file rewritten in full on every mutation ([`FileStore`]), and a SQLite
//! database whose save is a single atomic upsert ([`DbStore`]). The backend
//! is chosen once at startup; everything downstream depends only on the
//! trait.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

mod db;
mod file;

pub use db::DbStore;
pub use file::FileStore;

/// Operator verdict on a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Delete,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Keep => "keep",
            Decision::Delete => "delete",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(Decision::Keep),
            "delete" => Ok(Decision::Delete),
            other => Err(Error::InvalidInput(format!(
                "decision must be \"keep\" or \"delete\", got {other:?}"
            ))),
        }
    }
}

/// Full contents of a decision store: handle -> decision.
///
/// Ordered map so rewrites of the flat file and migration replays iterate
/// deterministically.
pub type DecisionMap = BTreeMap<String, Decision>;

/// Durable key-value store of decisions, keyed by item handle.
///
/// At most one entry exists per handle; `save` is an upsert and the last
/// write wins. A successful `save` is flushed before it returns, so callers
/// may treat success as surviving a process restart.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Every persisted entry. A store that has never been written to
    /// returns an empty map, not an error.
    async fn load_all(&self) -> Result<DecisionMap>;

    /// Upsert one decision. Flushed before returning success.
    async fn save(&self, handle: &str, decision: Decision) -> Result<()>;

    /// Point lookup; `None` when no decision is recorded for the handle.
    async fn get(&self, handle: &str) -> Result<Option<Decision>>;

    /// Remove the entry if present. Removing an absent handle is success.
    async fn delete(&self, handle: &str) -> Result<()>;

    /// Release backend resources on graceful shutdown.
    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_exactly_two_values() {
        assert_eq!("keep".parse::<Decision>().unwrap(), Decision::Keep);
        assert_eq!("delete".parse::<Decision>().unwrap(), Decision::Delete);
        assert!("maybe".parse::<Decision>().is_err());
        assert!("Keep".parse::<Decision>().is_err());
        assert!("".parse::<Decision>().is_err());
    }

    #[test]
    fn decision_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Decision::Keep).unwrap(), "\"keep\"");
        assert_eq!(
            serde_json::to_string(&Decision::Delete).unwrap(),
            "\"delete\""
        );
        assert!(serde_json::from_str::<Decision>("\"discard\"").is_err());
    }
}
