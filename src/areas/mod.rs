//! Core engine collaborators
//!
//! This module contains the pieces a diff run is wired together from:
//!
//! - `source`: async object loading (trees, commit roots)
//! - `callback`: event sink receiving per-path diff results
//! - `context`: immutable per-run container handed to the engine

pub mod callback;
pub mod context;
pub mod source;
