//! Projection error type.

use spawncheck_core::SchemaError;
use thiserror::Error;

/// Fatal projection failures. Any of these aborts the whole run; the only
/// soft case, a dangling reference, is not an error and flattens to a
/// no-value instead.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A field's type has no registered mapping and is not on the ignore
    /// list. The registry does not cover the current source format version;
    /// skipping would silently drop data.
    #[error("record kind `{kind}`: no mapping for field `{field}` of type `{type_name}`")]
    CoverageGap {
        kind: String,
        field: String,
        type_name: String,
    },

    /// A field's payload contradicts its declared type descriptor. The
    /// decoder guarantees well-formed input, so this is an upstream fault.
    #[error("record kind `{kind}`: malformed payload in field `{field}`")]
    MalformedField { kind: String, field: String },

    /// A whitelisted record kind produced no table, so its configured
    /// primary key cannot be assigned.
    #[error("no `{kind}` records found; cannot assign its primary key")]
    MissingTable { kind: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
