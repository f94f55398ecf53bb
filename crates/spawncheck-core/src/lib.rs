//! Spawncheck Core - Core types for asset-database projection
//!
//! This crate provides the fundamental abstractions for spawncheck:
//! - Tagged value variants for typed column storage
//! - Field-tree node types produced by an external asset decoder
//! - The in-memory relational store (tables, rows, primary keys)
//! - Schema errors shared by the projection pipeline

pub mod asset;
pub mod error;
pub mod store;
pub mod value;

pub use asset::{FieldData, FieldNode, ObjectNode, ObjectRef, ReferenceResolver, TypeDesc, TypeKind};
pub use error::SchemaError;
pub use store::{Column, ProjectedField, RowRef, Store, Table};
pub use value::{ColumnType, ScalarKind, Value};
