//! Data structures and algorithms
//!
//! This module contains the core types and the diff algorithm:
//!
//! - `core`: shared utilities (repository-relative paths)
//! - `objects`: content-addressed object types (identifiers, trees)
//! - `ignore`: gitignore pattern matching and the hierarchical ignore stack
//! - `status`: per-path change states and the aggregated result
//! - `diff`: the recursive two-tree diff engine and its driver

pub mod core;
pub mod diff;
pub mod ignore;
pub mod objects;
pub mod status;
