//! stockcull-migrate library - flat file to SQLite replay
//!
//! One-shot batch job: read the whole flat-file decision store, replay
//! every entry into the SQLite backend through its upsert, and report
//! per-entry success and failure counts. Because every write is an
//! upsert, re-running converges to the same end state.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, error};

use stockcull_common::store::DbStore;
use stockcull_common::{DecisionMap, DecisionStore};

/// Terminal tally of a migration run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Replay the decision file at `source` into `store`.
///
/// Preconditions fail the whole run before any entry is attempted: the
/// file must exist, parse as a decision map, and be non-empty. Once
/// replaying starts, a failed entry is tallied and logged but never aborts
/// the batch.
pub async fn run_migration(source: &Path, store: &DbStore) -> Result<MigrationReport> {
    if !source.exists() {
        bail!("Decision file not found: {}", source.display());
    }

    let content = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let decisions: DecisionMap = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", source.display()))?;

    if decisions.is_empty() {
        bail!("Decision file {} is empty, nothing to migrate", source.display());
    }

    let mut report = MigrationReport::default();
    for (handle, decision) in &decisions {
        report.attempted += 1;
        match store.save(handle, *decision).await {
            Ok(()) => {
                report.succeeded += 1;
                debug!("Migrated {} -> {}", handle, decision);
            }
            Err(e) => {
                report.failed += 1;
                error!("Failed to migrate {}: {}", handle, e);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use stockcull_common::Decision;

    async fn target_in(dir: &tempfile::TempDir) -> DbStore {
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("stockcull.db").display()
        );
        DbStore::connect(&url).await.unwrap()
    }

    fn write_source(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("decisions.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn migrates_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            &dir,
            r#"{"oak-desk": "delete", "pine-chair": "keep", "elm-shelf": "delete"}"#,
        );
        let store = target_in(&dir).await;

        let report = run_migration(&source, &store).await.unwrap();
        assert_eq!(
            report,
            MigrationReport {
                attempted: 3,
                succeeded: 3,
                failed: 0,
            }
        );

        let migrated = store.load_all().await.unwrap();
        assert_eq!(migrated.len(), 3);
        assert_eq!(migrated.get("oak-desk"), Some(&Decision::Delete));
        assert_eq!(migrated.get("pine-chair"), Some(&Decision::Keep));
        assert_eq!(migrated.get("elm-shelf"), Some(&Decision::Delete));
    }

    #[tokio::test]
    async fn rerunning_converges_to_the_same_end_state() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, r#"{"oak-desk": "delete", "pine-chair": "keep"}"#);
        let store = target_in(&dir).await;

        let first = run_migration(&source, &store).await.unwrap();
        let after_first = store.load_all().await.unwrap();

        let second = run_migration(&source, &store).await.unwrap();
        let after_second = store.load_all().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.len(), 2);
    }

    #[tokio::test]
    async fn migration_overwrites_existing_target_entries() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, r#"{"oak-desk": "delete"}"#);
        let store = target_in(&dir).await;
        store.save("oak-desk", Decision::Keep).await.unwrap();

        run_migration(&source, &store).await.unwrap();
        assert_eq!(
            store.get("oak-desk").await.unwrap(),
            Some(Decision::Delete)
        );
    }

    #[tokio::test]
    async fn duplicate_source_keys_collapse_to_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        // JSON objects cannot really hold two entries per key; the later
        // value wins at parse time and exactly one row is migrated
        let source = write_source(&dir, r#"{"oak-desk": "keep", "oak-desk": "delete"}"#);
        let store = target_in(&dir).await;

        let report = run_migration(&source, &store).await.unwrap();
        assert_eq!(report.attempted, 1);

        let migrated = store.load_all().await.unwrap();
        assert_eq!(migrated.len(), 1);
        assert_eq!(migrated.get("oak-desk"), Some(&Decision::Delete));
    }

    #[tokio::test]
    async fn missing_file_aborts_before_any_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = target_in(&dir).await;

        let result = run_migration(&dir.path().join("decisions.json"), &store).await;
        assert!(result.is_err());
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unparseable_file_aborts_before_any_entry() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, "not json at all");
        let store = target_in(&dir).await;

        assert!(run_migration(&source, &store).await.is_err());
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_decision_value_aborts_before_any_entry() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, r#"{"oak-desk": "maybe", "pine-chair": "keep"}"#);
        let store = target_in(&dir).await;

        assert!(run_migration(&source, &store).await.is_err());
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(&dir, "{}");
        let store = target_in(&dir).await;

        assert!(run_migration(&source, &store).await.is_err());
    }
}
