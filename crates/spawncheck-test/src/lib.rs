//! Shared test fixtures for spawncheck crates.
//!
//! This crate provides synthetic field-tree data and pure builders for
//! testing. It depends only on `spawncheck-core` so every other crate can
//! use it without cycles.
//!
//! - [`resolver`] - An in-memory [`spawncheck_core::ReferenceResolver`]
//! - [`fixtures`] - Item/spawn-table builders and a small sample armory
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! spawncheck-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use spawncheck_test::{armory, ItemFixture, RuleFixture, StaticResolver};
//! ```

pub mod fixtures;
pub mod resolver;

pub use fixtures::{armory, store_of, ItemFixture, RuleFixture};
pub use resolver::StaticResolver;
