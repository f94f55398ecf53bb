//! In-memory relational store.
//!
//! Tables are created lazily by the projector, one per record kind. The
//! first row of a table defines its column set; every later row must match
//! it exactly. After projection, one column per table is designated primary
//! key, which builds a value index for O(1) row lookup. The store is
//! read-only from then on.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::SchemaError;
use crate::value::{ColumnType, Value};

/// A typed column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: Arc<str>,
    pub ty: ColumnType,
}

/// One field of a row about to be inserted: column name, column type, value.
///
/// Produced by the projector after mapping resolution; on a table's first
/// row these define the columns, on later rows they are validated against
/// the frozen column set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedField {
    pub name: Arc<str>,
    pub ty: ColumnType,
    pub value: Value,
}

impl ProjectedField {
    pub fn new(name: impl Into<Arc<str>>, ty: ColumnType, value: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
        }
    }
}

/// A named table with frozen typed columns and insertion-ordered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: Arc<str>,
    columns: Vec<Column>,
    column_index: HashMap<Arc<str>, usize>,
    rows: Vec<Vec<Value>>,
    key_column: Option<usize>,
    key_index: HashMap<Value, usize>,
}

impl Table {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            column_index: HashMap::new(),
            rows: Vec::new(),
            key_column: None,
            key_index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The designated primary-key column, if one has been assigned.
    pub fn key_column(&self) -> Option<&Column> {
        self.key_column.map(|idx| &self.columns[idx])
    }

    /// Inserts a row. The first insertion defines the column set; later
    /// insertions must present exactly the frozen columns.
    pub fn insert_row(&mut self, fields: Vec<ProjectedField>) -> Result<(), SchemaError> {
        if self.columns.is_empty() && self.rows.is_empty() {
            for field in &fields {
                if self.column_index.contains_key(&field.name) {
                    return Err(self.drift(format!("duplicate field `{}`", field.name)));
                }
                self.column_index
                    .insert(field.name.clone(), self.columns.len());
                self.columns.push(Column {
                    name: field.name.clone(),
                    ty: field.ty,
                });
            }
        }

        if fields.len() != self.columns.len() {
            return Err(self.drift(format!(
                "expected {} fields, got {}",
                self.columns.len(),
                fields.len()
            )));
        }

        let mut values = vec![Value::None; self.columns.len()];
        for field in fields {
            let Some(&idx) = self.column_index.get(&field.name) else {
                return Err(self.drift(format!("unknown field `{}`", field.name)));
            };
            let column = &self.columns[idx];
            if column.ty != field.ty {
                return Err(self.drift(format!(
                    "field `{}` is {}, column is {}",
                    field.name, field.ty, column.ty
                )));
            }
            if !field.value.matches(column.ty) {
                return Err(self.drift(format!(
                    "value for `{}` does not fit column type {}",
                    field.name, column.ty
                )));
            }
            values[idx] = field.value;
        }
        self.rows.push(values);
        Ok(())
    }

    /// Designates `column` as the primary key and builds the key index.
    ///
    /// Called once, after all rows are loaded. A duplicate key value between
    /// two rows is fatal.
    pub fn set_primary_key(&mut self, column: &str) -> Result<(), SchemaError> {
        let Some(&idx) = self.column_index.get(column) else {
            return Err(SchemaError::MissingColumn {
                table: self.name.to_string(),
                column: column.to_string(),
            });
        };
        let mut index = HashMap::with_capacity(self.rows.len());
        for (row_idx, row) in self.rows.iter().enumerate() {
            if index.insert(row[idx].clone(), row_idx).is_some() {
                return Err(SchemaError::DuplicateKey {
                    table: self.name.to_string(),
                    key: row[idx].to_string(),
                });
            }
        }
        self.key_column = Some(idx);
        self.key_index = index;
        Ok(())
    }

    /// Looks up a row by primary-key value. O(1) once the key is assigned;
    /// always `None` before that.
    pub fn find_by_key(&self, key: &Value) -> Option<RowRef<'_>> {
        let index = *self.key_index.get(key)?;
        self.key_column?;
        Some(RowRef { table: self, index })
    }

    /// Iterates rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.rows.len()).map(move |index| RowRef { table: self, index })
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        (index < self.rows.len()).then_some(RowRef { table: self, index })
    }

    fn drift(&self, detail: String) -> SchemaError {
        SchemaError::Drift {
            table: self.name.to_string(),
            detail,
        }
    }
}

/// A read-only view of one row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowRef<'a> {
    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The value in the named column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = *self.table.column_index.get(column)?;
        self.table.rows[self.index].get(idx)
    }

    /// This row's primary-key value, if the table has an assigned key.
    pub fn key(&self) -> Option<&'a Value> {
        let idx = self.table.key_column?;
        self.table.rows[self.index].get(idx)
    }
}

/// The collection of projected tables, keyed by record kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    tables: BTreeMap<Arc<str>, Table>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, kind: &str) -> Option<&Table> {
        self.tables.get(kind)
    }

    pub fn table_mut(&mut self, kind: &str) -> Option<&mut Table> {
        self.tables.get_mut(kind)
    }

    /// Returns the table for `kind`, creating an empty one on first use.
    pub fn get_or_create(&mut self, kind: &Arc<str>) -> &mut Table {
        self.tables
            .entry(kind.clone())
            .or_insert_with(|| Table::new(kind.clone()))
    }

    /// Iterates tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarKind;

    fn item_fields(id: &str, category: i32) -> Vec<ProjectedField> {
        vec![
            ProjectedField::new("ItemID", ColumnType::Scalar(ScalarKind::Str), Value::from(id)),
            ProjectedField::new(
                "Category",
                ColumnType::Scalar(ScalarKind::I32),
                Value::from(category),
            ),
        ]
    }

    #[test]
    fn test_first_row_defines_columns() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();

        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.columns()[0].name.as_ref(), "ItemID");
        assert_eq!(table.columns()[1].ty, ColumnType::Scalar(ScalarKind::I32));

        table.insert_row(item_fields("m9", 1)).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_rows_keep_insertion_order() {
        let mut table = Table::new("FVRObject");
        for id in ["c", "a", "b"] {
            table.insert_row(item_fields(id, 1)).unwrap();
        }
        let ids: Vec<&str> = table
            .rows()
            .map(|r| r.get("ItemID").and_then(Value::as_str).unwrap())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_missing_field_is_drift() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();

        let err = table
            .insert_row(vec![ProjectedField::new(
                "ItemID",
                ColumnType::Scalar(ScalarKind::Str),
                Value::from("m9"),
            )])
            .unwrap_err();
        assert!(matches!(err, SchemaError::Drift { .. }));
    }

    #[test]
    fn test_unknown_field_is_drift() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();

        let mut fields = item_fields("m9", 1);
        fields[1].name = Arc::from("Weight");
        let err = table.insert_row(fields).unwrap_err();
        assert!(matches!(err, SchemaError::Drift { .. }));
    }

    #[test]
    fn test_type_change_is_drift() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();

        let mut fields = item_fields("m9", 1);
        fields[1] = ProjectedField::new(
            "Category",
            ColumnType::Scalar(ScalarKind::Str),
            Value::from("one"),
        );
        let err = table.insert_row(fields).unwrap_err();
        assert!(matches!(err, SchemaError::Drift { .. }));
    }

    #[test]
    fn test_none_value_fits_any_column() {
        let mut table = Table::new("ItemSpawnerID");
        table
            .insert_row(vec![ProjectedField::new(
                "MainObject",
                ColumnType::Scalar(ScalarKind::Str),
                Value::None,
            )])
            .unwrap();
        assert!(table.row(0).unwrap().get("MainObject").unwrap().is_none());
    }

    #[test]
    fn test_primary_key_lookup() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();
        table.insert_row(item_fields("m9", 2)).unwrap();

        assert!(table.find_by_key(&Value::from("m9")).is_none());

        table.set_primary_key("ItemID").unwrap();
        let row = table.find_by_key(&Value::from("m9")).unwrap();
        assert_eq!(row.get("Category").and_then(Value::as_i32), Some(2));
        assert_eq!(row.key().and_then(Value::as_str), Some("m9"));
        assert!(table.find_by_key(&Value::from("deagle")).is_none());
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();
        table.insert_row(item_fields("ak47", 2)).unwrap();

        let err = table.set_primary_key("ItemID").unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey { .. }));
    }

    #[test]
    fn test_missing_key_column_is_fatal() {
        let mut table = Table::new("FVRObject");
        table.insert_row(item_fields("ak47", 1)).unwrap();
        let err = table.set_primary_key("Nope").unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { .. }));
    }

    #[test]
    fn test_store_get_or_create() {
        let mut store = Store::new();
        let kind: Arc<str> = Arc::from("FVRObject");
        store
            .get_or_create(&kind)
            .insert_row(item_fields("ak47", 1))
            .unwrap();
        store
            .get_or_create(&kind)
            .insert_row(item_fields("m9", 1))
            .unwrap();

        assert_eq!(store.table_count(), 1);
        assert_eq!(store.table("FVRObject").unwrap().row_count(), 2);
        assert!(store.table("ObjectTableDef").is_none());
    }
}
