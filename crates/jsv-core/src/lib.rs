//! # jsv-core — Foundational Types for the JSON Schema Validator
//!
//! Leaf crate of the workspace. Defines the pieces every other crate
//! shares: the error taxonomy, the report timestamp, and the JSON loader
//! that turns a path into a parsed document.
//!
//! ## Key Design Principles
//!
//! 1. **Load failures carry the path.** Every [`LoadError`] names the file
//!    and the underlying cause, so a report entry can be traced back to the
//!    manifest line that produced it.
//!
//! 2. **UTC-only timestamps.** [`Timestamp`] always renders as RFC 3339
//!    with a `Z` suffix and millisecond precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod loader;
pub mod temporal;

pub use error::{JsvError, LoadError};
pub use loader::{load_json, parse_json};
pub use temporal::Timestamp;
