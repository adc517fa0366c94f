use std::path::{Component, Path};

use anyhow::{Context, Result, bail};
use git_store::{Constants, Repository};

/// Creates a lightweight tag: a file under `refs/tags` holding the hash of `object`.
pub fn tag(name: &str, object: &str) -> Result<String> {
    if !matches!(
        Path::new(name).components().collect::<Vec<_>>().as_slice(),
        [Component::Normal(_)]
    ) {
        bail!("{:?} is not a valid tag name", name)
    }

    let repo = Repository::find(".").context("cannot open git repository")?;
    let hash = repo
        .resolve_name(object)
        .with_context(|| format!("{:?} did not refer to any object", object))?;
    if !repo.has_object(&hash) {
        bail!("cannot tag {}: no such object", hash)
    }

    repo.write_file(
        true,
        format!("{}\n", hash).as_bytes(),
        &[Constants::REFS_FOLDER_NAME, Constants::TAGS_FOLDER_NAME, name],
    )
    .context("could not write tag file")?;

    Ok(String::new())
}
