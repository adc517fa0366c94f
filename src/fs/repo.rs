use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IoContext;
use crate::utils::path::absolute_clean;
use crate::{Constants, Error, Result};

use super::{RepositoryConfig, atomic_write, is_dir};

/// Handle over a working directory and its `.git` directory.
///
/// A handle is only given out when the `.git` directory exists.
#[derive(Debug, Clone)]
pub struct Repository {
    workdir: PathBuf,
    gitdir: PathBuf,
    config: RepositoryConfig,
}

impl Repository {
    /// Creates a new repository inside `path`, creating `path` too if it does not exist.
    ///
    /// # Errors
    ///
    /// This function fails with `AlreadyExists` if there is already a `.git` inside `path`, in
    /// which case nothing is touched. Any other step failing returns that error, steps that
    /// already ran are not undone.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workdir = path.as_ref();
        let gitdir = workdir.join(Constants::REPOSITORY_FOLDER_NAME);

        if fs::exists(&gitdir).with_io_context(|| format!("could not check {:?}", gitdir))? {
            return Err(Error::AlreadyExists(gitdir));
        }

        fs::create_dir_all(workdir)
            .with_io_context(|| format!("could not create working directory {:?}", workdir))?;
        fs::create_dir(&gitdir).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => Error::AlreadyExists(gitdir.clone()),
            _ => Error::Io {
                context: format!("could not create {:?}", gitdir),
                source: e,
            },
        })?;

        let repo = Repository::open(workdir)?;

        repo.dir_path(true, &[Constants::BRANCHES_FOLDER_NAME])?;
        repo.dir_path(true, &[Constants::OBJECTS_FOLDER_NAME])?;
        repo.dir_path(
            true,
            &[Constants::REFS_FOLDER_NAME, Constants::TAGS_FOLDER_NAME],
        )?;
        repo.dir_path(
            true,
            &[Constants::REFS_FOLDER_NAME, Constants::HEADS_FOLDER_NAME],
        )?;

        repo.write_file(
            true,
            Constants::DEFAULT_DESCRIPTION.as_bytes(),
            &[Constants::DESCRIPTION_FILE_NAME],
        )?;
        repo.write_file(
            true,
            Constants::DEFAULT_HEAD.as_bytes(),
            &[Constants::HEAD_FILE_NAME],
        )?;
        repo.write_file(
            true,
            Constants::DEFAULT_CONFIG.as_bytes(),
            &[Constants::CONFIG_FILE_NAME],
        )?;

        log::info!("created empty repository in {:?}", repo.gitdir);
        Ok(repo)
    }

    /// Looks for a repository in `start` or any of its parents.
    ///
    /// # Errors
    ///
    /// This function fails with `NotFound` if the filesystem root is reached without finding a
    /// `.git` directory.
    pub fn find<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = absolute_clean(start.as_ref())?;
        let mut current: &Path = &start;
        loop {
            let gitdir = current.join(Constants::REPOSITORY_FOLDER_NAME);
            match is_dir(&gitdir) {
                Ok(true) => return Repository::open(current),
                Ok(false) => {}
                Err(e) => log::warn!("skipping {:?}: {}", gitdir, e),
            }
            current = match current.parent() {
                Some(parent) => parent,
                None => {
                    return Err(Error::NotFound(format!(
                        "no {} directory in {:?} or any of its parents",
                        Constants::REPOSITORY_FOLDER_NAME,
                        start
                    )));
                }
            };
        }
    }

    /// Opens the repository whose working directory is exactly `path`.
    ///
    /// # Errors
    ///
    /// This function fails with `NotADirectory` if `path` is not a directory, `NotFound` if it has
    /// no `.git` directory, or if the repository config could not be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workdir = path.as_ref();
        if !is_dir(workdir)? {
            return Err(Error::NotADirectory(workdir.to_path_buf()));
        }

        let gitdir = workdir.join(Constants::REPOSITORY_FOLDER_NAME);
        if !is_dir(&gitdir)? {
            return Err(Error::NotFound(format!("{:?} is not a git repository", workdir)));
        }

        let config = RepositoryConfig::load(&gitdir.join(Constants::CONFIG_FILE_NAME))?;

        Ok(Self {
            workdir: workdir.to_path_buf(),
            gitdir,
            config,
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn gitdir(&self) -> &Path {
        &self.gitdir
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Returns `segments` joined under the `.git` directory, without checking anything.
    pub fn path<S: AsRef<Path>>(&self, segments: &[S]) -> PathBuf {
        let mut path = self.gitdir.clone();
        for s in segments {
            path.push(s);
        }
        path
    }

    /// Returns the directory at `segments` under `.git`. If `mkdir` is set the directory and its
    /// parents are created when missing.
    ///
    /// # Errors
    ///
    /// This function fails with `NotFound` if the directory is missing and `mkdir` is not set, and
    /// with `NotADirectory` if something else than a directory is in the way.
    pub fn dir_path<S: AsRef<Path>>(&self, mkdir: bool, segments: &[S]) -> Result<PathBuf> {
        let full = self.path(segments);
        if is_dir(&full)? {
            return Ok(full);
        }
        if fs::exists(&full).with_io_context(|| format!("could not check {:?}", full))? {
            return Err(Error::NotADirectory(full));
        }
        if !mkdir {
            return Err(Error::NotFound(format!("directory {:?}", full)));
        }
        fs::create_dir_all(&full).with_io_context(|| format!("mkdir {:?}", full))?;
        Ok(full)
    }

    /// Writes `content` to the file at `segments` under `.git`, replacing it atomically.
    ///
    /// If `mkdir` is set the parent directories are created first.
    pub fn write_file<S: AsRef<Path>>(
        &self,
        mkdir: bool,
        content: &[u8],
        segments: &[S],
    ) -> Result<()> {
        if let Some((_, parents)) = segments.split_last() {
            if !parents.is_empty() {
                self.dir_path(mkdir, parents)?;
            }
        }
        let full = self.path(segments);
        atomic_write(&full, content)?;
        log::debug!("wrote {} bytes to {:?}", content.len(), full);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_git_file(repo: &Repository, name: &str) -> String {
        fs::read_to_string(repo.gitdir().join(name)).unwrap()
    }

    #[test]
    fn test_create_layout() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::create(dir.path()).unwrap();

        for sub in ["branches", "objects", "refs/heads", "refs/tags"] {
            assert!(repo.gitdir().join(sub).is_dir(), "missing {}", sub);
        }
        assert_eq!("Unnamed repository.\n", read_git_file(&repo, "description"));
        assert_eq!("ref: refs/heads/master\n", read_git_file(&repo, "HEAD"));
        assert_eq!(Constants::DEFAULT_CONFIG, read_git_file(&repo, "config"));
        assert_eq!(&RepositoryConfig::default(), repo.config());
    }

    #[test]
    fn test_create_missing_workdir() {
        let dir = TempDir::new().unwrap();
        let workdir = dir.path().join("new").join("project");
        let repo = Repository::create(&workdir).unwrap();
        assert!(repo.workdir().is_dir());
        assert!(repo.gitdir().is_dir());
    }

    #[test]
    fn test_create_twice_fails_and_keeps_contents() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::create(dir.path()).unwrap();
        fs::write(repo.gitdir().join("HEAD"), "ref: refs/heads/main\n").unwrap();

        let result = Repository::create(dir.path());

        assert!(matches!(result, Err(Error::AlreadyExists(_))));
        assert_eq!("ref: refs/heads/main\n", read_git_file(&repo, "HEAD"));
    }

    #[test]
    fn test_find_from_nested_dir() {
        let dir = TempDir::new().unwrap();
        Repository::create(dir.path()).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let repo = Repository::find(&nested).unwrap();
        assert_eq!(
            absolute_clean(dir.path()).unwrap(),
            repo.workdir().to_path_buf()
        );
    }

    #[test]
    fn test_find_without_repository() {
        let dir = TempDir::new().unwrap();
        // TempDir lives under the system temp dir, which is not expected to be a repository
        let result = Repository::find(dir.path());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_open_errors() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            Repository::open(&file),
            Err(Error::NotADirectory(_))
        ));
        assert!(matches!(
            Repository::open(dir.path().join("missing")),
            Err(Error::NotADirectory(_))
        ));
        assert!(matches!(
            Repository::open(dir.path()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_dir_path() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::create(dir.path()).unwrap();

        assert!(matches!(
            repo.dir_path(false, &["does", "not", "exist"]),
            Err(Error::NotFound(_))
        ));

        let created = repo.dir_path(true, &["does", "exist"]).unwrap();
        assert!(created.is_dir());
        assert_eq!(created, repo.dir_path(false, &["does", "exist"]).unwrap());

        assert!(matches!(
            repo.dir_path(true, &["HEAD"]),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn test_write_file() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::create(dir.path()).unwrap();

        repo.write_file(true, b"abc\n", &["refs", "tags", "nested", "v1"])
            .unwrap();
        assert_eq!("abc\n", read_git_file(&repo, "refs/tags/nested/v1"));

        let result = repo.write_file(false, b"abc\n", &["missing", "file"]);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
