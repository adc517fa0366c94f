use std::str::FromStr;

use crate::{Error, Result};

/// Kind tag written at the start of every object frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectKind {
    pub const BLOB_STRING: &'static str = "blob";
    pub const TREE_STRING: &'static str = "tree";
    pub const COMMIT_STRING: &'static str = "commit";
    pub const TAG_STRING: &'static str = "tag";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => ObjectKind::BLOB_STRING,
            Self::Tree => ObjectKind::TREE_STRING,
            Self::Commit => ObjectKind::COMMIT_STRING,
            Self::Tag => ObjectKind::TAG_STRING,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ObjectKind::BLOB_STRING => Ok(ObjectKind::Blob),
            ObjectKind::TREE_STRING => Ok(ObjectKind::Tree),
            ObjectKind::COMMIT_STRING => Ok(ObjectKind::Commit),
            ObjectKind::TAG_STRING => Ok(ObjectKind::Tag),
            _ => Err(Error::InvalidArgument(format!(
                "{:?} is not a valid object type",
                s
            ))),
        }
    }
}
