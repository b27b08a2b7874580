//! Read-only lookup tables consulted by the search, comparison, and
//! normalization layers.
//!
//! Submodules:
//! - [`latin1`]        — 256-entry Latin-1 lowercase fold table
//! - [`casefold`]      — Unicode simple case folding (range-encoded)
//! - [`normalization`] — combining classes, decompositions, compositions,
//!                       version corrections, Hangul constants
//!
//! All tables are process-lifetime read-only data.  The only table that is
//! not `static` is the composition pair map, which is derived once from the
//! canonical decomposition table on first use.

pub mod casefold;
pub mod latin1;
pub mod normalization;

pub use casefold::{fold_code_point, fold_unit};
pub use latin1::{fold_latin1, LATIN1_LOWER};
