use anyhow::{Context, Result};
use git_store::Repository;
use git_store::object::commit::write_graphviz;

/// Returns the ancestry of `commit` as a graphviz document.
pub fn log(commit: &str) -> Result<String> {
    let repo = Repository::find(".").context("cannot open git repository")?;
    let hash = repo
        .resolve_name(commit)
        .with_context(|| format!("{:?} did not refer to any object", commit))?;

    let mut graph = Vec::new();
    write_graphviz(&repo, hash, &mut graph)
        .with_context(|| format!("could not walk the history of {}", hash))?;

    Ok(String::from_utf8_lossy(&graph).trim_end().to_owned())
}
