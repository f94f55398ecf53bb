//! The orphaned-items report: which eligible items can no spawn table reach.

use spawncheck_config::ReportConfig;
use spawncheck_core::{RowRef, Store, Value};
use spawncheck_eligibility::axes::{col, table};
use spawncheck_eligibility::is_spawnable;
use tracing::info;

/// Result of an orphan audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Item ids matching the report filter that no spawn table accepts.
    pub orphaned: Vec<String>,
    /// How many items matched the report filter at all.
    pub checked: usize,
}

/// Items that pass the report filter (category plus the item's own
/// eligibility flag) but are accepted by none of the non-skipped spawn
/// tables.
pub fn find_orphans<'a>(store: &'a Store, report: &ReportConfig) -> Vec<RowRef<'a>> {
    let Some(items) = store.table(table::ITEMS) else {
        return Vec::new();
    };
    let spawn_tables: Vec<RowRef<'_>> = store
        .table(table::SPAWN_TABLES)
        .map(|t| {
            t.rows()
                .filter(|row| {
                    row.get(col::NAME)
                        .and_then(Value::as_str)
                        .map_or(true, |name| !report.skip_tables.iter().any(|s| s == name))
                })
                .collect()
        })
        .unwrap_or_default();

    items
        .rows()
        .filter(|item| {
            item.get(col::CATEGORY).and_then(Value::as_i32) == Some(report.category)
                && item.get(col::OSPLE).and_then(Value::as_bool) == Some(true)
        })
        .filter(|item| !spawn_tables.iter().any(|st| is_spawnable(*st, *item)))
        .collect()
}

/// Runs [`find_orphans`] and flattens the result to item ids.
pub fn audit(store: &Store, report: &ReportConfig) -> AuditReport {
    let checked = store
        .table(table::ITEMS)
        .map(|items| {
            items
                .rows()
                .filter(|item| {
                    item.get(col::CATEGORY).and_then(Value::as_i32) == Some(report.category)
                        && item.get(col::OSPLE).and_then(Value::as_bool) == Some(true)
                })
                .count()
        })
        .unwrap_or(0);

    let orphaned: Vec<String> = find_orphans(store, report)
        .iter()
        .filter_map(|item| item.get(col::ITEM_ID).and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    info!(
        checked,
        orphaned = orphaned.len(),
        category = report.category,
        "audit complete"
    );
    AuditReport { orphaned, checked }
}
