use std::path::Path;

use anyhow::{Context, Result};
use git_store::Repository;
use git_store::fs::object::hash_object as compute_hash;

/// Prints the hash `file` has as an object of type `kind`, writing it to the repository if
/// `write` is set.
pub fn hash_object(write: bool, kind: &str, file: &Path) -> Result<String> {
    let content = std::fs::read(file).with_context(|| format!("could not read {:?}", file))?;

    let hash = if write {
        let repo = Repository::find(".").context("cannot open git repository")?;
        repo.write_object(kind, &content)
            .context("could not write object")?
    } else {
        compute_hash(kind, &content).context("could not hash object")?
    };

    Ok(hash.to_string())
}
