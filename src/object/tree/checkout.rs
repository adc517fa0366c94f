use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::IoContext;
use crate::fs::{Repository, atomic_write};
use crate::object::{Commit, Object, ObjectKind};
use crate::{Constants, Error, Result};

use super::Tree;

/// A tree being written, with the next leaf to handle.
struct Frame {
    tree: Tree,
    destination: PathBuf,
    depth: usize,
    next: usize,
}

impl Frame {
    fn new(tree: Tree, destination: PathBuf, depth: usize) -> Self {
        Self {
            tree,
            destination,
            depth,
            next: 0,
        }
    }
}

/// Writes the content of `tree` inside `destination`: blobs become files (overwriting existing
/// ones) and subtrees become directories.
///
/// Leaves are handled in tree order and a subtree is written completely before its next sibling.
/// Nothing is undone if a leaf fails, files written before the failure stay in place.
///
/// # Errors
///
/// This function will fail if:
/// - A leaf could not be read from the repository.
/// - A leaf is neither a blob nor a tree (`UnexpectedKind`).
/// - A leaf name is not a plain file name, or trees are nested deeper than
///   `Constants::MAX_TREE_DEPTH` (`CorruptData`).
/// - A file or directory could not be written.
pub fn checkout(repo: &Repository, tree: &Tree, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination)
        .with_io_context(|| format!("could not create checkout directory {:?}", destination))?;

    let mut stack = vec![Frame::new(tree.clone(), destination.to_path_buf(), 0)];

    while let Some(frame) = stack.last_mut() {
        let Some(leaf) = frame.tree.leaves.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        check_leaf_name(&leaf.name)?;
        let leaf_path = frame.destination.join(&leaf.name);

        match repo.read(&leaf.hash)? {
            Object::Tree(subtree) => {
                if frame.depth >= Constants::MAX_TREE_DEPTH {
                    return Err(Error::CorruptData(format!(
                        "trees are nested more than {} levels deep at {:?}",
                        Constants::MAX_TREE_DEPTH,
                        leaf_path
                    )));
                }
                fs::create_dir_all(&leaf_path)
                    .with_io_context(|| format!("mkdir {:?}", leaf_path))?;
                let depth = frame.depth + 1;
                stack.push(Frame::new(subtree, leaf_path, depth));
            }
            Object::Blob(blob) => {
                atomic_write(&leaf_path, &blob.data)?;
                log::trace!("wrote {:?} from blob {}", leaf_path, leaf.hash);
            }
            other => {
                return Err(Error::UnexpectedKind {
                    expected: ObjectKind::Blob,
                    found: other.kind(),
                });
            }
        }
    }
    Ok(())
}

/// Checks out the tree `commit` points to.
pub fn checkout_commit(repo: &Repository, commit: &Commit, destination: &Path) -> Result<()> {
    let tree = repo.read(&commit.tree()?)?.into_tree()?;
    checkout(repo, &tree, destination)
}

/// A leaf name must be a single path component, otherwise it could write outside `destination`.
fn check_leaf_name(name: &Path) -> Result<()> {
    let mut components = name.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::CorruptData(format!(
            "tree leaf name {:?} is not a plain file name",
            name
        ))),
    }
}
