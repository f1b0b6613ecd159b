//! Catalog loader - parses product import CSVs into item records
//!
//! The catalog is never persisted by stockcull: items are rebuilt from the
//! import files on every read so the view always reflects the files on
//! disk. Loading is a pure function of the file contents and is safe to
//! call repeatedly and concurrently.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A single catalog item, keyed by its stable handle.
///
/// All descriptive fields are copied verbatim from the first source row
/// bearing the handle; later rows with the same handle contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub handle: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub sku: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub tags: Option<String>,
}

/// One row of a product import file, mapped by header name.
///
/// Header names are fixed and case-sensitive. Import files carry many more
/// columns than these; unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct SourceRow {
    #[serde(rename = "Handle")]
    handle: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Body (HTML)")]
    description: Option<String>,
    #[serde(rename = "Variant Price")]
    price: Option<String>,
    #[serde(rename = "Image Src")]
    image_url: Option<String>,
    #[serde(rename = "Variant SKU")]
    sku: Option<String>,
    #[serde(rename = "Type")]
    product_type: Option<String>,
    #[serde(rename = "Tags")]
    tags: Option<String>,
}

/// Load all catalog items from the given import files, in declared order.
///
/// Rows without a handle are skipped. The first row seen for a handle wins,
/// across the whole multi-file sequence; the result preserves first-seen
/// order. Any unreadable or malformed file fails the whole load - there is
/// no partial result.
pub fn load_items(paths: &[PathBuf]) -> Result<Vec<Item>> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for path in paths {
        let mut reader = csv::Reader::from_path(path)?;
        for row in reader.deserialize() {
            let row: SourceRow = row?;
            let handle = match row.handle {
                Some(h) if !h.is_empty() => h,
                _ => continue,
            };
            if !seen.insert(handle.clone()) {
                continue;
            }
            items.push(Item {
                handle,
                title: row.title,
                description: row.description,
                price: row.price,
                image_url: row.image_url,
                sku: row.sku,
                product_type: row.product_type,
                tags: row.tags,
            });
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const HEADER: &str = "Handle,Title,Body (HTML),Variant Price,Image Src,Variant SKU,Type,Tags";

    fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_items_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_csv(
            dir.path(),
            "a.csv",
            &[
                "oak-desk,Oak Desk,Solid oak,120.00,http://img/1.jpg,SKU-1,Desk,oak",
                "pine-chair,Pine Chair,,45.50,,SKU-2,Chair,",
            ],
        )];

        let items = load_items(&paths).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].handle, "oak-desk");
        assert_eq!(items[0].title.as_deref(), Some("Oak Desk"));
        assert_eq!(items[0].price.as_deref(), Some("120.00"));
        assert_eq!(items[1].handle, "pine-chair");
        // Empty CSV fields come through as absent, not as empty strings
        assert_eq!(items[1].description, None);
        assert_eq!(items[1].image_url, None);
    }

    #[test]
    fn first_seen_row_wins_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_csv(
                dir.path(),
                "a.csv",
                &["oak-desk,Oak Desk,,,,SKU-1,Desk,"],
            ),
            write_csv(
                dir.path(),
                "b.csv",
                &[
                    // Same handle again: the whole row is dropped, including
                    // its non-handle fields
                    "oak-desk,Renamed Desk,,,,SKU-OTHER,Table,",
                    "pine-chair,Pine Chair,,,,SKU-2,Chair,",
                ],
            ),
        ];

        let items = load_items(&paths).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].handle, "oak-desk");
        assert_eq!(items[0].title.as_deref(), Some("Oak Desk"));
        assert_eq!(items[0].sku.as_deref(), Some("SKU-1"));
        assert_eq!(items[1].handle, "pine-chair");
    }

    #[test]
    fn rows_without_handle_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_csv(
            dir.path(),
            "a.csv",
            &[
                "oak-desk,Oak Desk,,,,SKU-1,Desk,",
                // Continuation rows of a multi-variant product have no handle
                ",,,,http://img/2.jpg,SKU-1B,,",
                "pine-chair,Pine Chair,,,,SKU-2,Chair,",
            ],
        )];

        let items = load_items(&paths).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].handle, "oak-desk");
        assert_eq!(items[1].handle, "pine-chair");
    }

    #[test]
    fn loading_twice_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_csv(
                dir.path(),
                "a.csv",
                &[
                    "oak-desk,Oak Desk,,,,SKU-1,Desk,",
                    "pine-chair,Pine Chair,,,,SKU-2,Chair,",
                ],
            ),
            write_csv(dir.path(), "b.csv", &["elm-shelf,Elm Shelf,,,,SKU-3,Shelf,"]),
        ];

        let first = load_items(&paths).unwrap();
        let second = load_items(&paths).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_file_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_csv(dir.path(), "a.csv", &["oak-desk,Oak Desk,,,,SKU-1,Desk,"]),
            dir.path().join("missing.csv"),
        ];

        assert!(load_items(&paths).is_err());
    }

    #[test]
    fn malformed_file_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_csv(dir.path(), "a.csv", &["oak-desk,Oak Desk,,,,SKU-1,Desk,"]);

        // A row with more fields than the header is a parse error
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, format!("{HEADER}\na,b,c,d,e,f,g,h,i,j,k\n")).unwrap();

        assert!(load_items(&[good, bad]).is_err());
    }
}
