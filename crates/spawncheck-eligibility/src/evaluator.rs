//! The ordered eligibility checks and their derived queries.

use spawncheck_core::{RowRef, Store, Value};

use crate::axes::{col, table, EXCLUSION_AXES, OVERLAP_AXES, SCALAR_AXES};

/// Decides whether `spawn_table` accepts `item`.
///
/// Checks run in a fixed order and short-circuit on the first failure. The
/// order is an optimization only; apart from the override bypass the checks
/// are independent. A missing or mistyped column on either row fails the
/// check that reads it.
pub fn is_spawnable(spawn_table: RowRef<'_>, item: RowRef<'_>) -> bool {
    // An override table ignores every other check and accepts exactly the
    // ids on its list.
    match flag(spawn_table, col::USE_ID_LIST_OVERRIDE) {
        Some(true) => {
            let (Some(allowed), Some(id)) = (
                texts(spawn_table, col::ID_OVERRIDE),
                text(item, col::ITEM_ID),
            ) else {
                return false;
            };
            return allowed.iter().any(|a| a.as_ref() == id);
        }
        Some(false) => {}
        None => return false,
    }

    let (Some(table_category), Some(item_category)) = (
        int(spawn_table, col::CATEGORY),
        int(item, col::CATEGORY),
    ) else {
        return false;
    };
    if table_category != item_category {
        return false;
    }

    if flag(item, col::OSPLE) != Some(true) {
        return false;
    }

    // A negative table bound leaves that side of the capacity range open.
    let (Some(table_min), Some(table_max), Some(item_min), Some(item_max)) = (
        int(spawn_table, col::MIN_AMMO_CAPACITY),
        int(spawn_table, col::MAX_AMMO_CAPACITY),
        int(item, col::MIN_CAPACITY_RELATED),
        int(item, col::MAX_CAPACITY_RELATED),
    ) else {
        return false;
    };
    if table_min > -1 && item_max < table_min {
        return false;
    }
    if table_max > -1 && item_min > table_max {
        return false;
    }

    for (table_col, item_col) in SCALAR_AXES {
        if !scalar_axis_allows(spawn_table, table_col, item, item_col) {
            return false;
        }
    }

    for (table_col, item_col) in OVERLAP_AXES {
        if !set_axis_overlaps(spawn_table, table_col, item, item_col) {
            return false;
        }
    }

    for (table_col, item_col) in EXCLUSION_AXES {
        if !set_axis_disjoint(spawn_table, table_col, item, item_col) {
            return false;
        }
    }

    true
}

/// All item rows `spawn_table` accepts, in store row order.
pub fn spawnable_items<'a>(store: &'a Store, spawn_table: RowRef<'a>) -> Vec<RowRef<'a>> {
    store
        .table(table::ITEMS)
        .map(|items| {
            items
                .rows()
                .filter(|item| is_spawnable(spawn_table, *item))
                .collect()
        })
        .unwrap_or_default()
}

/// All spawn-table rows that accept `item`, in store row order.
pub fn spawn_tables_for<'a>(store: &'a Store, item: RowRef<'a>) -> Vec<RowRef<'a>> {
    store
        .table(table::SPAWN_TABLES)
        .map(|tables| {
            tables
                .rows()
                .filter(|spawn_table| is_spawnable(*spawn_table, item))
                .collect()
        })
        .unwrap_or_default()
}

fn scalar_axis_allows(
    spawn_table: RowRef<'_>,
    table_col: &str,
    item: RowRef<'_>,
    item_col: &str,
) -> bool {
    let (Some(allowed), Some(tag)) = (ints(spawn_table, table_col), int(item, item_col)) else {
        return false;
    };
    allowed.is_empty() || allowed.contains(&tag)
}

fn set_axis_overlaps(
    spawn_table: RowRef<'_>,
    table_col: &str,
    item: RowRef<'_>,
    item_col: &str,
) -> bool {
    let (Some(allowed), Some(tags)) = (ints(spawn_table, table_col), ints(item, item_col)) else {
        return false;
    };
    allowed.is_empty() || allowed.iter().any(|tag| tags.contains(tag))
}

fn set_axis_disjoint(
    spawn_table: RowRef<'_>,
    table_col: &str,
    item: RowRef<'_>,
    item_col: &str,
) -> bool {
    let (Some(excluded), Some(tags)) = (ints(spawn_table, table_col), ints(item, item_col)) else {
        return false;
    };
    excluded.is_empty() || !excluded.iter().any(|tag| tags.contains(tag))
}

fn flag(row: RowRef<'_>, column: &str) -> Option<bool> {
    row.get(column)?.as_bool()
}

fn int(row: RowRef<'_>, column: &str) -> Option<i32> {
    row.get(column)?.as_i32()
}

fn text<'a>(row: RowRef<'a>, column: &str) -> Option<&'a str> {
    row.get(column)?.as_str()
}

fn ints<'a>(row: RowRef<'a>, column: &str) -> Option<&'a [i32]> {
    row.get(column)?.as_i32_slice()
}

fn texts<'a>(row: RowRef<'a>, column: &str) -> Option<&'a [std::sync::Arc<str>]> {
    row.get(column)?.as_str_slice()
}
