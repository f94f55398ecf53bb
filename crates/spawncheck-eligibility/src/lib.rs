//! Eligibility evaluation for spawncheck.
//!
//! Decides whether a spawn-table row accepts an item row by walking an
//! ordered sequence of independent checks: an override allow-list that
//! bypasses everything else, category and flag checks, capacity bounds, and
//! sixteen tag axes with three distinct combination semantics. Evaluation
//! is pure and works entirely against rows of the projected store.

pub mod axes;
mod evaluator;

pub use evaluator::{is_spawnable, spawn_tables_for, spawnable_items};
