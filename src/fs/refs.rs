use std::fs;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::IoContext;
use crate::hashing::Hash;
use crate::utils::path::{format_path, relative_path};
use crate::{Constants, Error, Result};

use super::Repository;

/// A file under `refs/` with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    /// Path relative to the `.git` directory, always divided by forward slashes.
    pub name: String,
    /// Content of the file without surrounding whitespace.
    pub target: String,
}

impl Repository {
    /// Follows `ref: {path}` redirections until a hex encoded hash is found.
    ///
    /// `reference` is the content of a ref file, either `{40 hex chars}` or `ref: {path}` where
    /// `path` is relative to the `.git` directory. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// This function will fail if:
    /// - A redirection points to a file that does not exist (`NotFound`).
    /// - The final value is not a valid hash (`InvalidArgument`).
    /// - There are more redirections than `Constants::MAX_REF_DEPTH` (`CorruptData`).
    pub fn resolve_ref(&self, reference: &str) -> Result<Hash> {
        let mut current = reference.trim().to_owned();
        for _ in 0..=Constants::MAX_REF_DEPTH {
            let Some(target) = current.strip_prefix(Constants::REF_CONTENT_HEADER) else {
                return Hash::from_str(&current);
            };
            let target = target.trim();
            let path = self.ref_path(target)?;
            log::debug!("following ref to {:?}", target);

            current = fs::read_to_string(&path)
                .map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => Error::NotFound(format!("ref {:?}", target)),
                    _ => Error::Io {
                        context: format!("could not read ref {:?}", path),
                        source: e,
                    },
                })?
                .trim()
                .to_owned();
        }
        Err(Error::CorruptData(format!(
            "more than {} ref redirections starting at {:?}",
            Constants::MAX_REF_DEPTH,
            reference.trim()
        )))
    }

    /// Resolves a name given by a user: a full hex hash, or the name of a ref looked up as is,
    /// then under `refs/tags` and then under `refs/heads`.
    pub fn resolve_name(&self, name: &str) -> Result<Hash> {
        if Hash::is_hex(name) {
            return Hash::from_str(name);
        }
        let candidates = [
            PathBuf::from(name),
            Path::new(Constants::REFS_FOLDER_NAME)
                .join(Constants::TAGS_FOLDER_NAME)
                .join(name),
            Path::new(Constants::REFS_FOLDER_NAME)
                .join(Constants::HEADS_FOLDER_NAME)
                .join(name),
        ];
        for candidate in candidates {
            if is_plain_relative(&candidate) && self.gitdir().join(&candidate).is_file() {
                let reference = format!(
                    "{} {}",
                    Constants::REF_CONTENT_HEADER,
                    format_path(&candidate).to_string_lossy()
                );
                return self.resolve_ref(&reference);
            }
        }
        Err(Error::NotFound(format!("no object or ref named {:?}", name)))
    }

    /// Returns every file under `refs/`, sorted by name.
    pub fn list_refs(&self) -> Result<Vec<RefEntry>> {
        let refs_path = self.path(&[Constants::REFS_FOLDER_NAME]);
        let mut files = Vec::new();
        collect_files(&refs_path, &mut files)?;

        let mut refs = Vec::with_capacity(files.len());
        for path in files {
            let target = fs::read_to_string(&path)
                .with_io_context(|| format!("could not read ref {:?}", path))?;
            let name = relative_path(&path, self.gitdir()).unwrap_or(path);
            refs.push(RefEntry {
                name: format_path(&name).to_string_lossy().into_owned(),
                target: target.trim().to_owned(),
            });
        }
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    fn ref_path(&self, target: &str) -> Result<PathBuf> {
        let target_path = Path::new(target);
        if !is_plain_relative(target_path) {
            return Err(Error::InvalidArgument(format!(
                "ref {:?} points outside of the repository",
                target
            )));
        }
        Ok(self.gitdir().join(target_path))
    }
}

/// Only `a/b/c` style paths, nothing absolute and no `..`.
fn is_plain_relative(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Pushes the path of every file inside `dir` into `files`, entering subdirectories recursively.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_io_context(|| format!("could not read {:?}", dir))?;
    for entry in entries {
        let path = entry
            .with_io_context(|| format!("could not get dir entry in {:?}", dir))?
            .path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
