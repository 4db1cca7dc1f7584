use std::path::Path;

use super::types::Config;
use crate::error::{Error, Result};

/// File name probed by [`load`].
pub const CONFIG_FILE: &str = ".dockhand.yaml";

/// Load config from a `.dockhand.yaml` file in the given directory.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load(dir: &Path) -> Result<Option<Config>> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)?;
    let config = serde_yaml::from_str(&contents).map_err(|source| Error::Config { path, source })?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn present_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "binary: podman\nrun_timeout_secs: 60\n",
        )
        .unwrap();
        let config = load(dir.path()).unwrap().unwrap();
        assert_eq!(config.binary, "podman");
        assert_eq!(config.run_timeout_secs, 60);
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "binary: [oops\n").unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
