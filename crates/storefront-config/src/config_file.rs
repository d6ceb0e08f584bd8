//! Config sources on disk
//!
//! `.storefront.toml` is looked up in the working directory, then in the
//! home directory. A `.env` file is looked up in the working directory and
//! its ancestors and merged into the process environment; variables that
//! are already set keep their value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = ".storefront.toml";
pub(crate) const ENV_FILE: &str = ".env";

/// A config file and where it was found
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub content: String,
}

/// Read the first `.storefront.toml` found in CWD, then home
pub fn load_config_file() -> Option<ConfigFile> {
    let cwd = std::env::current_dir().ok();
    let home = dirs::home_dir();
    find_config_file(cwd.as_deref(), home.as_deref())
}

fn find_config_file(cwd: Option<&Path>, home: Option<&Path>) -> Option<ConfigFile> {
    [cwd, home]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE))
        .find_map(|path| match std::fs::read_to_string(&path) {
            Ok(content) => Some(ConfigFile { path, content }),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                None
            }
        })
}

/// Merge the nearest `.env` into the process environment
///
/// Must run before anything reads the environment, the logger included.
/// Returns the file that was loaded.
pub fn load_env_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    load_env_file_in(&cwd)
}

fn load_env_file_in(dir: &Path) -> Option<PathBuf> {
    let path = dir
        .ancestors()
        .map(|ancestor| ancestor.join(ENV_FILE))
        .find(|candidate| candidate.is_file())?;
    match dotenvy::from_path(&path) {
        Ok(()) => Some(path),
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_working_directory_wins_over_home() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        fs::write(cwd.path().join(CONFIG_FILE), "production = true").unwrap();
        fs::write(home.path().join(CONFIG_FILE), "production = false").unwrap();

        let file = find_config_file(Some(cwd.path()), Some(home.path())).unwrap();
        assert_eq!(file.path, cwd.path().join(CONFIG_FILE));
        assert_eq!(file.content, "production = true");
    }

    #[test]
    fn test_home_is_the_fallback() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(CONFIG_FILE), "api_url = \"http://home\"").unwrap();

        let file = find_config_file(Some(cwd.path()), Some(home.path())).unwrap();
        assert_eq!(file.path, home.path().join(CONFIG_FILE));

        assert!(find_config_file(Some(cwd.path()), None).is_none());
        assert!(find_config_file(None, None).is_none());
    }

    #[test]
    fn test_env_file_is_found_in_ancestors() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop").join("bin");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(ENV_FILE),
            "STOREFRONT_DOTENV_LOG_LEVEL=debug\n",
        )
        .unwrap();

        let loaded = load_env_file_in(&nested);
        assert_eq!(loaded, Some(root.path().join(ENV_FILE)));
        assert_eq!(
            std::env::var("STOREFRONT_DOTENV_LOG_LEVEL").as_deref(),
            Ok("debug")
        );
    }

    #[test]
    fn test_missing_env_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file_in(dir.path()).is_none());
    }
}
