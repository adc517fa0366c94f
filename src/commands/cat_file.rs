use anyhow::{Context, Result, bail};
use git_store::Repository;

pub fn cat_file(object: &str) -> Result<String> {
    let repo = Repository::find(".").context("cannot open git repository")?;
    let hash = repo
        .resolve_name(object)
        .with_context(|| format!("{:?} did not refer to any object", object))?;

    let object = match repo.read(&hash) {
        Ok(object) => object,
        Err(e) if e.is_not_found() => bail!("no such object {}", hash),
        Err(e) => return Err(e).with_context(|| format!("cannot read object {}", hash)),
    };

    Ok(object.to_string())
}
