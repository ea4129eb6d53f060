//! # jsv-fixtures — Reference Schema Generator
//!
//! Produces a directory of Draft-7 reference schemas and a manifest that
//! the batch validator can consume directly.
//!
//! - [`shape`] — [`Shape`], a typed builder lowered to Draft-7 JSON.
//! - [`catalog`] — the named reference fixtures.
//! - [`generate`] — gates every fixture through the validator and writes
//!   the survivors plus `reference-config.json`.
//!
//! Every fixture written is, by construction, one the validator accepts.

pub mod catalog;
pub mod generate;
pub mod shape;

pub use catalog::{reference_fixtures, Fixture};
pub use generate::{generate, FixtureFailure, GenerationReport, GeneratorConfig};
pub use shape::{Shape, ShapeError, DRAFT7_URI};
