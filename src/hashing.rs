use std::fmt::Display;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::{Error, Result};

/// Length in bytes of an object identifier.
pub const HASH_BYTE_LEN: usize = 20;
/// Length of an object identifier when written as hexadecimal.
pub const HASH_HEX_LEN: usize = HASH_BYTE_LEN * 2;

/// SHA1 identifier of an object, computed over its whole frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_BYTE_LEN]);

impl Hash {
    /// Returns the SHA1 hash for the data passed.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        let mut bytes = [0; HASH_BYTE_LEN];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// Splits the hex form of the hash into the fan-out directory name and the file name.
    pub fn fan_out(&self) -> (String, String) {
        let mut hex = self.to_string();
        let file_name = hex.split_off(2);
        (hex, file_name)
    }

    /// Returns true if `s` looks like a full hex encoded identifier.
    pub fn is_hex(s: &str) -> bool {
        s.len() == HASH_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_BYTE_LEN]> for Hash {
    fn from(value: [u8; HASH_BYTE_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let bytes: [u8; HASH_BYTE_LEN] = value.try_into().map_err(|_| {
            Error::InvalidArgument(format!(
                "invalid hash length: expected {} bytes, got {}",
                HASH_BYTE_LEN,
                value.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != HASH_HEX_LEN {
            return Err(Error::InvalidArgument(format!(
                "hash {:?} should be {} hex characters long",
                s, HASH_HEX_LEN
            )));
        }
        let bytes = hex::decode(s)
            .map_err(|e| Error::InvalidArgument(format!("hash {:?} is not hex: {}", s, e)))?;
        Hash::try_from(bytes.as_slice())
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// Tests
