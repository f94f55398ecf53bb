//! Schema errors shared by the store and the projection pipeline.

use thiserror::Error;

/// Fatal schema violations raised while building or keying tables.
///
/// None of these are recoverable: the whole projection run aborts on the
/// first one, there is no partial-result mode.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A later instance of a record kind does not match the column set frozen
    /// by the first instance.
    #[error("table `{table}`: schema drift: {detail}")]
    Drift { table: String, detail: String },

    /// Two rows of one table share a primary-key value.
    #[error("table `{table}`: duplicate primary key `{key}`")]
    DuplicateKey { table: String, key: String },

    /// A primary-key column with the configured name does not exist.
    #[error("table `{table}` has no column `{column}`")]
    MissingColumn { table: String, column: String },
}
