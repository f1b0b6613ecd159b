//! Reconciliation of catalog items with recorded decisions
//!
//! The catalog (ephemeral, rebuilt from files) and the decision map
//! (durable) are joined here at read time. Nothing merged is ever
//! persisted; these functions are pure over their inputs.

use serde::Serialize;

use crate::catalog::Item;
use crate::store::{Decision, DecisionMap};

/// A catalog item together with its current decision, if any.
#[derive(Debug, Serialize)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: Item,
    pub decision: Option<Decision>,
}

/// Aggregate triage progress over the current item set and decision map.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: i64,
    pub completed: i64,
    pub remaining: i64,
    pub to_delete: i64,
    pub to_keep: i64,
    pub percent_complete: i64,
}

/// Attach each item's decision, preserving catalog order.
pub fn annotate(items: Vec<Item>, decisions: &DecisionMap) -> Vec<AnnotatedItem> {
    items
        .into_iter()
        .map(|item| {
            let decision = decisions.get(&item.handle).copied();
            AnnotatedItem { item, decision }
        })
        .collect()
}

/// Compute progress counters.
///
/// `completed` is the size of the decision map regardless of which handles
/// the entries reference - a decision whose item has vanished from the
/// source files still counts, which also means `remaining` can go negative
/// when the map carries orphans. The counters report the raw arithmetic so
/// the operator notices the skew.
pub fn progress(items: &[Item], decisions: &DecisionMap) -> Progress {
    let total = items.len() as i64;
    let completed = decisions.len() as i64;
    let to_delete = decisions
        .values()
        .filter(|d| **d == Decision::Delete)
        .count() as i64;
    let to_keep = decisions
        .values()
        .filter(|d| **d == Decision::Keep)
        .count() as i64;

    let percent_complete = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as i64
    };

    Progress {
        total,
        completed,
        remaining: total - completed,
        to_delete,
        to_keep,
        percent_complete,
    }
}

/// Render the deletion list as CSV, one row per item currently marked
/// `delete`, in catalog order.
///
/// Fields are wrapped in double quotes but embedded quotes are not
/// doubled. Consumers of this format expect the field bytes verbatim, so
/// the non-escaping is kept as-is rather than fixed.
pub fn export_deletions(items: &[Item], decisions: &DecisionMap) -> String {
    let mut out = String::from("Handle,Title,SKU,Type,Decision\n");
    for item in items {
        if decisions.get(&item.handle) != Some(&Decision::Delete) {
            continue;
        }
        out.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"delete\"\n",
            item.handle,
            item.title.as_deref().unwrap_or(""),
            item.sku.as_deref().unwrap_or(""),
            item.product_type.as_deref().unwrap_or(""),
        ));
    }
    out
}
