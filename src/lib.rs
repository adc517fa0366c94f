//! Content-addressed object store for a git-like version control system.
//!
//! Objects (blobs, trees and commits) are framed as `{kind} {len}\0{payload}`, identified by the
//! SHA1 of that frame and stored zlib-compressed under `.git/objects/{2 hex}/{38 hex}`.

pub mod byteable;
pub mod constants;
pub mod error;
pub mod fs;
pub mod hashing;
pub mod object;
pub mod utils;

pub use constants::*;
pub use error::{Error, Result};
pub use fs::Repository;
pub use hashing::Hash;
pub use object::{Blob, Commit, Object, ObjectKind, Tree, TreeLeaf};
