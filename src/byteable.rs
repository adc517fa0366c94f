use crate::Result;

/// Trait that ensures a type can be manipulated in a binary format.
///
/// For objects this is the payload only, the frame around it is handled by `object::frame`.
pub trait Byteable {
    fn as_bytes(&self) -> Result<Vec<u8>>;
    fn from_bytes(bytes: &[u8]) -> Result<Self>
    where
        Self: Sized;
}
