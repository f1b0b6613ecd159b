//! Path resolution for the data root folder
//!
//! Everything stockcull touches lives under one root folder: the catalog
//! import files (read-only), the flat decision file, and the SQLite
//! database. The root is resolved by the binaries via CLI flag or
//! environment variable and falls back to the current directory.

use std::path::{Path, PathBuf};

/// Catalog import files, read in this order on every request.
///
/// The order matters: when the same handle appears in more than one file,
/// the earliest file wins (see [`crate::catalog::load_items`]).
pub const CATALOG_FILES: [&str; 3] = [
    "product_import_1.csv",
    "product_import_2.csv",
    "product_import_3.csv",
];

/// File name of the flat-file decision store.
pub const DECISIONS_FILE: &str = "decisions.json";

/// File name of the SQLite decision database.
pub const DATABASE_FILE: &str = "stockcull.db";

/// Absolute paths of the catalog import files under `root`, in read order.
pub fn catalog_paths(root: &Path) -> Vec<PathBuf> {
    CATALOG_FILES.iter().map(|f| root.join(f)).collect()
}

/// Path of the flat-file decision store under `root`.
pub fn decisions_file(root: &Path) -> PathBuf {
    root.join(DECISIONS_FILE)
}

/// Connection string for the SQLite decision database under `root`.
///
/// mode=rwc creates the database on first use, so a fresh root folder
/// needs no manual setup.
pub fn database_url(root: &Path) -> String {
    format!("sqlite://{}?mode=rwc", root.join(DATABASE_FILE).display())
}
