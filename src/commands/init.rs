use std::path::Path;

use anyhow::{Context, Result};
use git_store::Repository;

/// Creates a new repository, inside `directory` if one is provided.
pub fn init(directory: Option<&Path>) -> Result<String> {
    let directory = directory.unwrap_or(Path::new("."));
    let repo = Repository::create(directory)
        .with_context(|| format!("could not initialize repository in {:?}", directory))?;

    Ok(format!(
        "Initialized empty repository (format version {}) in {}",
        repo.config().format_version,
        repo.gitdir().display()
    ))
}
