use anyhow::{Context, Result};
use git_store::Repository;

pub fn ls_tree(object: &str) -> Result<String> {
    let repo = Repository::find(".").context("cannot open git repository")?;
    let hash = repo
        .resolve_name(object)
        .with_context(|| format!("{:?} did not refer to any object", object))?;

    let tree = repo
        .read(&hash)
        .and_then(|o| o.into_tree())
        .with_context(|| format!("could not read tree {}", hash))?;

    Ok(tree.to_string())
}
