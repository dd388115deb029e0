//! Content-addressed object types
//!
//! - `object_id`: fixed-width object identifiers
//! - `tree`: immutable directory listings

pub mod object_id;
pub mod tree;

/// Length of an object identifier in bytes.
pub const OBJECT_ID_LENGTH: usize = 20;
