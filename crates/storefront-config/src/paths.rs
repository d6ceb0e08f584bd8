//! Cache and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/storefront/`, `~/.local/share/storefront/`
//! - macOS: `~/Library/Caches/storefront/`, `~/Library/Application Support/storefront/`
//! - Windows: `%LOCALAPPDATA%\storefront\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "storefront";

/// Get the application cache directory (log files live here)
/// Returns ~/.cache/storefront/ on Linux, ~/Library/Caches/storefront/ on macOS
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default directory of the persisted state mirror
pub fn storage_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine data directory")?;
    let dir = base.join(APP_NAME).join("storage");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_exists() {
        let dir = cache_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_storage_dir_is_app_scoped() {
        let dir = storage_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with("storage"));
        assert!(dir.parent().unwrap().ends_with(APP_NAME));
    }
}
