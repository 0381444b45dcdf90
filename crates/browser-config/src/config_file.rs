use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working and home directory
pub const CONFIG_FILE: &str = ".browser-shell.toml";

/// Load config file content
///
/// Searches for `.browser-shell.toml` in:
/// 1. Current working directory
/// 2. Home directory
/// 3. `config.toml` in the application config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let cwd = std::env::current_dir().ok()?;
    let home = dirs::home_dir();
    let path = find_config_file(&cwd, home.as_deref())
        .or_else(|| crate::app_config_path().ok().filter(|path| path.is_file()))?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// First existing config file in `cwd`, then `home`
pub fn find_config_file(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    std::iter::once(cwd)
        .chain(home)
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_directory_wins() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::write(cwd.path().join(CONFIG_FILE), "homepage = \"a\"").unwrap();
        std::fs::write(home.path().join(CONFIG_FILE), "homepage = \"b\"").unwrap();

        let found = find_config_file(cwd.path(), Some(home.path()));

        assert_eq!(found, Some(cwd.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_falls_back_to_home() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(CONFIG_FILE), "").unwrap();

        assert_eq!(
            find_config_file(cwd.path(), Some(home.path())),
            Some(home.path().join(CONFIG_FILE))
        );
        assert_eq!(find_config_file(cwd.path(), None), None);
    }
}
