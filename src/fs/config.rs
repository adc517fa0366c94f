use std::fs;
use std::path::Path;

use ini::Ini;

use crate::error::IoContext;
use crate::{Constants, Error, Result};

const CORE_SECTION: &str = "core";
const FORMAT_VERSION_KEY: &str = "repositoryformatversion";
const FILEMODE_KEY: &str = "filemode";
const BARE_KEY: &str = "bare";

/// Values read from the `[core]` section of the repository `config` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryConfig {
    pub format_version: u32,
    pub filemode: bool,
    pub bare: bool,
}

impl RepositoryConfig {
    /// Reads the config file at `path`, a missing file gives the default configuration.
    ///
    /// # Errors
    ///
    /// This function fails with `CorruptData` if the file is not valid INI, a value has the wrong
    /// type or the repository format is not supported.
    pub fn load(path: &Path) -> Result<Self> {
        if !fs::exists(path).with_io_context(|| format!("could not check {:?}", path))? {
            log::debug!("no config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_io_context(|| format!("could not read config file {:?}", path))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| Error::CorruptData(format!("invalid config file: {}", e)))?;

        let mut config = Self::default();
        let Some(core) = ini.section(Some(CORE_SECTION)) else {
            return Ok(config);
        };

        if let Some(version) = core.get(FORMAT_VERSION_KEY) {
            config.format_version = version.trim().parse().map_err(|_| {
                Error::CorruptData(format!("{} {:?} is not a number", FORMAT_VERSION_KEY, version))
            })?;
        }
        if config.format_version != Constants::REPOSITORY_FORMAT_VERSION {
            return Err(Error::CorruptData(format!(
                "unsupported {} {}",
                FORMAT_VERSION_KEY, config.format_version
            )));
        }
        if let Some(filemode) = core.get(FILEMODE_KEY) {
            config.filemode = parse_bool(FILEMODE_KEY, filemode)?;
        }
        if let Some(bare) = core.get(BARE_KEY) {
            config.bare = parse_bool(BARE_KEY, bare)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::CorruptData(format!(
            "{} {:?} is not a boolean",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_default() {
        let config = RepositoryConfig::parse(Constants::DEFAULT_CONFIG).unwrap();
        assert_eq!(RepositoryConfig::default(), config);
    }

    #[test]
    fn test_values_are_read() {
        let config =
            RepositoryConfig::parse("[core]\nrepositoryformatversion = 0\nfilemode = true\nbare = true\n")
                .unwrap();
        assert!(config.filemode);
        assert!(config.bare);
    }

    #[test]
    fn test_unsupported_version() {
        let result = RepositoryConfig::parse("[core]\nrepositoryformatversion = 1\n");
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_bad_boolean() {
        let result = RepositoryConfig::parse("[core]\nbare = maybe\n");
        assert!(matches!(result, Err(Error::CorruptData(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = RepositoryConfig::load(&dir.path().join("config")).unwrap();
        assert_eq!(RepositoryConfig::default(), config);
    }
}
