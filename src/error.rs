use std::path::PathBuf;

use crate::object::ObjectKind;

/// Enum intended to represent all the different error types the store can return.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0:?} already exists")]
    AlreadyExists(PathBuf),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("argument is not valid: {0}")]
    InvalidArgument(String),
    #[error("corrupt data: {0}")]
    CorruptData(String),
    #[error("could not deserialize {kind} object: {source}")]
    Deserialize {
        kind: ObjectKind,
        #[source]
        source: Box<Error>,
    },
    #[error("expected a {expected} object, got a {found} object")]
    UnexpectedKind {
        expected: ObjectKind,
        found: ObjectKind,
    },
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Abstraction of the result type where the error is always an Error from this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Attaches a message to i/o errors so they can be traced back to the operation that failed.
pub trait IoContext<T> {
    fn io_context<C: Into<String>>(self, context: C) -> Result<T>;
    fn with_io_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|source| Error::Io {
            context: context.into(),
            source,
        })
    }

    fn with_io_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|source| Error::Io {
            context: f().into(),
            source,
        })
    }
}

impl Error {
    /// Returns true for errors caused by something missing, either reported by the store itself
    /// or by the filesystem.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_context_keeps_message_and_source() {
        let failed: std::io::Result<()> = Err(std::io::Error::other("disk on fire"));
        let error = failed.io_context("could not write HEAD").unwrap_err();

        assert!(matches!(error, Error::Io { .. }));
        assert_eq!("could not write HEAD: disk on fire", error.to_string());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::NotFound("object".into()).is_not_found());

        let missing: std::io::Result<()> = Err(std::io::ErrorKind::NotFound.into());
        assert!(missing.io_context("read").unwrap_err().is_not_found());

        assert!(!Error::CorruptData("bad".into()).is_not_found());
    }
}
