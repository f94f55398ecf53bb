//! Record projection for spawncheck.
//!
//! This crate turns the decoder's field-tree stream into the relational
//! store. A [`MappingRegistry`] declares how each primitive value kind and
//! each named pointer type becomes a typed column value; the [`Projector`]
//! walks the stream, filters to the whitelisted record kinds, infers each
//! table's columns from the first instance, and assigns primary keys once
//! the stream is exhausted.

mod error;
mod mapping;
mod projector;

pub use error::ProjectError;
pub use mapping::{FieldMapping, MappingRegistry, ProjectionContext};
pub use projector::Projector;
