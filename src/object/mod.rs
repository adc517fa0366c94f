#[allow(clippy::module_inception)]
mod object;
mod object_kind;

pub mod blob;
pub mod commit;
pub mod frame;
pub mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use object::Object;
pub use object_kind::ObjectKind;
pub use tree::{Tree, TreeLeaf};

pub const SPACE_BYTE: u8 = b' ';
pub const NULL_BYTE: u8 = b'\0';

/// Parses an unsigned decimal made only of ASCII digits, so signs and blanks are rejected.
pub(crate) fn parse_decimal<T: std::str::FromStr>(raw: &[u8]) -> Option<T> {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(raw).ok()?.parse().ok()
}
