use anyhow::{Context, Result};
use git_store::Repository;

pub fn show_ref() -> Result<String> {
    let repo = Repository::find(".").context("cannot open git repository")?;
    let refs = repo.list_refs().context("could not list refs")?;

    Ok(refs
        .iter()
        .map(|r| format!("{} {}", r.target, r.name))
        .collect::<Vec<_>>()
        .join("\n"))
}
