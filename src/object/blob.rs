use std::fmt::Display;

use crate::Result;
use crate::byteable::Byteable;

/// Opaque file content, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new<T: Into<Vec<u8>>>(data: T) -> Self {
        Self { data: data.into() }
    }
}

impl Byteable for Blob {
    fn as_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(bytes))
    }
}

impl Display for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_is_verbatim() {
        let data = b"\0\x01binary\xff";
        let blob = Blob::from_bytes(data).unwrap();
        assert_eq!(data.to_vec(), blob.data);
        assert_eq!(data.to_vec(), blob.as_bytes().unwrap());
    }
}
