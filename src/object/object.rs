use crate::byteable::Byteable;
use crate::{Error, Result};

use super::blob::Blob;
use super::commit::Commit;
use super::frame;
use super::object_kind::ObjectKind;
use super::tree::Tree;

/// Represents the different type of objects there can be: Blobs, Trees and Commits.
///
/// `Byteable` on this type works with whole frames (`{kind} {len}\0{payload}`), while the inner
/// types only know about their payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Commit(_) => ObjectKind::Commit,
        }
    }

    /// Returns the payload of this object, without the frame.
    pub fn payload(&self) -> Result<Vec<u8>> {
        match self {
            Object::Blob(blob) => blob.as_bytes(),
            Object::Tree(tree) => tree.as_bytes(),
            Object::Commit(commit) => commit.as_bytes(),
        }
    }

    /// Parses `payload` with the parser of `kind`.
    ///
    /// # Errors
    ///
    /// Tags are not supported and fail with `NotImplemented`, any parser failure is wrapped in
    /// `Deserialize`.
    pub fn from_payload(kind: ObjectKind, payload: &[u8]) -> Result<Self> {
        let parsed = match kind {
            ObjectKind::Blob => Blob::from_bytes(payload).map(Object::Blob),
            ObjectKind::Tree => Tree::from_bytes(payload).map(Object::Tree),
            ObjectKind::Commit => Commit::from_bytes(payload).map(Object::Commit),
            ObjectKind::Tag => return Err(Error::NotImplemented("tag objects")),
        };
        parsed.map_err(|e| Error::Deserialize {
            kind,
            source: Box::new(e),
        })
    }

    pub fn into_blob(self) -> Result<Blob> {
        match self {
            Object::Blob(blob) => Ok(blob),
            other => Err(other.unexpected(ObjectKind::Blob)),
        }
    }

    pub fn into_tree(self) -> Result<Tree> {
        match self {
            Object::Tree(tree) => Ok(tree),
            other => Err(other.unexpected(ObjectKind::Tree)),
        }
    }

    pub fn into_commit(self) -> Result<Commit> {
        match self {
            Object::Commit(commit) => Ok(commit),
            other => Err(other.unexpected(ObjectKind::Commit)),
        }
    }

    fn unexpected(&self, expected: ObjectKind) -> Error {
        Error::UnexpectedKind {
            expected,
            found: self.kind(),
        }
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Blob(blob) => write!(f, "{}", blob),
            Object::Tree(tree) => write!(f, "{}", tree),
            Object::Commit(commit) => write!(f, "{}", commit),
        }
    }
}

impl Byteable for Object {
    fn as_bytes(&self) -> Result<Vec<u8>> {
        frame::encode(self.kind(), &self.payload()?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (kind, payload) = frame::decode(bytes)?;
        Object::from_payload(kind, payload)
    }
}
