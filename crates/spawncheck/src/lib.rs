//! Spawncheck - projects a game's serialized asset records into relational
//! tables and audits which items the spawn tables can actually reach.
//!
//! The pipeline has three stages, re-exported here from their own crates:
//!
//! 1. [`Projector`] consumes the decoder's field-tree stream and builds the
//!    relational [`Store`] through the [`MappingRegistry`].
//! 2. [`is_spawnable`] and its derived queries evaluate spawn-table
//!    eligibility against pairs of store rows.
//! 3. [`audit`] combines both into the orphaned-items report.
//!
//! # Examples
//!
//! ```ignore
//! use spawncheck::{audit, AuditConfig, Projector};
//!
//! let config = AuditConfig::load("spawncheck.toml").unwrap_or_default();
//! let projector = Projector::new(config.projection.clone(), &resolver);
//! let store = projector.project(nodes)?;
//! let report = audit(&store, &config.report);
//! for id in &report.orphaned {
//!     println!("unreachable: {id}");
//! }
//! ```

mod audit;

pub use audit::{audit, find_orphans, AuditReport};

pub use spawncheck_config::{AuditConfig, ConfigError, ProjectionConfig, ReportConfig};
pub use spawncheck_core::{
    ColumnType, FieldData, FieldNode, ObjectNode, ObjectRef, ReferenceResolver, RowRef,
    ScalarKind, SchemaError, Store, Table, TypeDesc, TypeKind, Value,
};
pub use spawncheck_eligibility::{axes, is_spawnable, spawn_tables_for, spawnable_items};
pub use spawncheck_project::{FieldMapping, MappingRegistry, ProjectError, Projector};
