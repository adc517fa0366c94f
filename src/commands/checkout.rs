use std::path::Path;

use anyhow::{Context, Result, bail};
use git_store::object::tree;
use git_store::{Object, Repository};

/// Writes the files of a commit (or a tree directly) into `path`.
pub fn checkout(object: &str, path: &Path) -> Result<String> {
    let repo = Repository::find(".").context("cannot open git repository")?;
    let hash = repo
        .resolve_name(object)
        .with_context(|| format!("{:?} did not refer to any object", object))?;

    match repo.read(&hash).context("could not read object")? {
        Object::Commit(commit) => tree::checkout_commit(&repo, &commit, path)
            .with_context(|| format!("could not checkout commit {}", hash))?,
        Object::Tree(tr) => tree::checkout(&repo, &tr, path)
            .with_context(|| format!("could not checkout tree {}", hash))?,
        other => bail!("cannot checkout a {} object", other.kind()),
    }

    Ok(format!("Checked out {} into {}", hash, path.display()))
}
