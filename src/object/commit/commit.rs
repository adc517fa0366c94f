use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::byteable::Byteable;
use crate::hashing::Hash;
use crate::{Constants, Error, Result};

/// Header multimap of a commit. Repeated keys keep their values in the order they were read.
pub type CommitHeader = BTreeMap<String, Vec<String>>;

/// Commit object: a header block (tree, parents, author, committer...) and a free text comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub header: CommitHeader,
    pub comment: String,
}

/// Where the header parser is at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    /// At the start of a line, nothing read yet.
    AwaitingKey,
    /// Reading a key, ends at the first space.
    InKey,
    /// Reading a value, spaces are part of it, ends at a newline.
    InValue,
    /// A blank line was found, the rest of the input is the comment.
    Done,
}

impl Commit {
    /// Returns every value stored under `key`, in order.
    pub fn values(&self, key: &str) -> &[String] {
        self.header.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the first value stored under `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// Returns the hash of the tree this commit points to.
    ///
    /// # Errors
    ///
    /// This function fails with `CorruptData` if the commit has no tree or the tree hash is not
    /// valid hex.
    pub fn tree(&self) -> Result<Hash> {
        let tree = self
            .first(Constants::TREE_HEADER)
            .ok_or_else(|| Error::CorruptData("commit has no tree header".into()))?;
        parse_header_hash(Constants::TREE_HEADER, tree)
    }

    /// Returns the hashes of every parent, in order.
    pub fn parents(&self) -> Result<Vec<Hash>> {
        self.values(Constants::PARENT_HEADER)
            .iter()
            .map(|p| parse_header_hash(Constants::PARENT_HEADER, p))
            .collect()
    }
}

pub(crate) fn parse_header_hash(key: &str, value: &str) -> Result<Hash> {
    Hash::from_str(value)
        .map_err(|_| Error::CorruptData(format!("{} header {:?} is not a valid hash", key, value)))
}

fn push_value(header: &mut CommitHeader, key: &[u8], value: &[u8]) -> Result<()> {
    let key = header_string(key)?;
    let value = header_string(value)?;
    header.entry(key).or_default().push(value);
    Ok(())
}

fn header_string(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::CorruptData(format!("commit header is not valid utf-8: {}", e)))
}

impl Byteable for Commit {
    fn as_bytes(&self) -> Result<Vec<u8>> {
        Err(Error::NotImplemented("commit serialization"))
    }

    /// Parses the header block and the comment.
    ///
    /// The header is only split on the first space of every line, so values like
    /// `Bob R <bobr@example.com> 1580755918 +0100` are kept whole. A line without a space ends up
    /// under an empty key.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut header = CommitHeader::new();
        let mut state = HeaderState::AwaitingKey;
        let mut key: &[u8] = &[];
        // start of the token being read
        let mut start = 0;
        let mut pos = 0;

        while pos < bytes.len() && state != HeaderState::Done {
            let byte = bytes[pos];
            match (state, byte) {
                (HeaderState::AwaitingKey, b' ') => start = pos + 1,
                (HeaderState::AwaitingKey, b'\n') | (HeaderState::InKey, b'\n') => {
                    key = &[];
                    state = end_line(&mut header, bytes, key, start, &mut pos)?;
                    start = pos + 1;
                }
                (HeaderState::AwaitingKey, _) => state = HeaderState::InKey,
                (HeaderState::InKey, b' ') => {
                    key = &bytes[start..pos];
                    start = pos + 1;
                    state = HeaderState::InValue;
                }
                (HeaderState::InValue, b'\n') => {
                    state = end_line(&mut header, bytes, key, start, &mut pos)?;
                    key = &[];
                    start = pos + 1;
                }
                (HeaderState::InKey, _) | (HeaderState::InValue, _) | (HeaderState::Done, _) => {}
            }
            pos += 1;
        }

        let comment = if state == HeaderState::Done {
            String::from_utf8(bytes[pos..].to_vec())
                .map_err(|e| Error::CorruptData(format!("commit comment is not valid utf-8: {}", e)))?
        } else {
            // input ended inside the header, flush the last pending value
            if state == HeaderState::InValue && start < bytes.len() {
                push_value(&mut header, key, &bytes[start..])?;
            }
            String::new()
        };

        Ok(Self { header, comment })
    }
}

/// Stores the value that ends at `pos` and checks whether the header ends here.
///
/// When the newline at `pos` is followed by another one, both are consumed (`pos` is left on the
/// second one) and the header is done.
fn end_line(
    header: &mut CommitHeader,
    bytes: &[u8],
    key: &[u8],
    start: usize,
    pos: &mut usize,
) -> Result<HeaderState> {
    push_value(header, key, &bytes[start..*pos])?;
    if bytes.get(*pos + 1) == Some(&b'\n') {
        *pos += 1;
        return Ok(HeaderState::Done);
    }
    Ok(HeaderState::AwaitingKey)
}

impl Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, values) in self.header.iter() {
            for value in values {
                writeln!(f, "{} {}", key, value)?;
            }
        }
        write!(f, "\n{}", self.comment)
    }
}

// Tests
