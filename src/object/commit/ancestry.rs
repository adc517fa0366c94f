use std::collections::HashSet;
use std::io::Write;

use crate::error::IoContext;
use crate::fs::Repository;
use crate::hashing::Hash;
use crate::{Constants, Result};

use super::commit::parse_header_hash;

/// A commit whose parents are being visited.
struct Frame {
    hash: Hash,
    parents: Vec<String>,
    next: usize,
}

impl Frame {
    fn read(repo: &Repository, hash: Hash) -> Result<Self> {
        let commit = repo.read(&hash)?.into_commit()?;
        Ok(Self {
            hash,
            parents: commit.values(Constants::PARENT_HEADER).to_vec(),
            next: 0,
        })
    }
}

/// Walks the ancestry of the commit `start`, calling `emit` with `(child, parent)` for every
/// parent link, parents in header order and depth first.
///
/// Commits already in `seen` are not expanded again and every commit visited is added to it, so
/// shared ancestors (merges) only produce their edges once.
///
/// # Errors
///
/// This function will fail if a visited object is not a commit (`UnexpectedKind`), if a parent is
/// not a valid hash (`CorruptData`), if a commit could not be read, or if `emit` fails.
pub fn walk_ancestry<F>(
    repo: &Repository,
    seen: &mut HashSet<Hash>,
    start: Hash,
    mut emit: F,
) -> Result<()>
where
    F: FnMut(&Hash, &str) -> Result<()>,
{
    if !seen.insert(start) {
        return Ok(());
    }
    let mut stack = vec![Frame::read(repo, start)?];

    while let Some(frame) = stack.last_mut() {
        let Some(parent) = frame.parents.get(frame.next).cloned() else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let child = frame.hash;

        emit(&child, &parent)?;

        let parent_hash = parse_header_hash(Constants::PARENT_HEADER, &parent)?;
        if seen.insert(parent_hash) {
            log::trace!("visiting {} (parent of {})", parent_hash, child);
            stack.push(Frame::read(repo, parent_hash)?);
        }
    }
    Ok(())
}

/// Writes the ancestry graph of `start` as a graphviz document.
pub fn write_graphviz<W: Write>(repo: &Repository, start: Hash, mut writer: W) -> Result<()> {
    writeln!(writer, "digraph log{{").io_context("could not write graph header")?;
    let mut seen = HashSet::new();
    walk_ancestry(repo, &mut seen, start, |child, parent| {
        writeln!(writer, "\"{}\" -> \"{}\";", child, parent).io_context("could not write edge")
    })?;
    writeln!(writer, "}}").io_context("could not write graph footer")
}
