//! Object identifiers
//!
//! Objects are identified by a fixed-width 20-byte hash. Identifier
//! equality defines content identity: two trees with the same id are
//! byte-identical, which is what lets the diff skip unchanged subtrees
//! without fetching them.
//!
//! ## Format
//!
//! The textual form is 40 lowercase hexadecimal characters.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::fmt;

/// Fixed-width content-addressed object identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LENGTH]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; OBJECT_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse and validate an object id from its 40-character hex form.
    ///
    /// # Arguments
    ///
    /// * `hex` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(hex: &str) -> anyhow::Result<Self> {
        if hex.len() != OBJECT_ID_LENGTH * 2 {
            return Err(anyhow::anyhow!("Invalid object id length: {}", hex.len()));
        }

        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| anyhow::anyhow!("Invalid object id characters: {}", hex))?;
        }

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_LENGTH] {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
