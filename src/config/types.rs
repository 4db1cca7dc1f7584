use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Library defaults that callers may override from a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the runtime binary to drive.
    pub binary: String,
    /// Default deadline for asynchronous runs, in seconds.
    pub run_timeout_secs: u64,
}

impl Config {
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            run_timeout_secs: 24 * 60 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_docker_with_a_day_long_deadline() {
        let config = Config::default();
        assert_eq!(config.binary, "docker");
        assert_eq!(config.run_timeout(), Duration::from_secs(86_400));
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let config: Config = serde_yaml::from_str("binary: podman").unwrap();
        assert_eq!(config.binary, "podman");
        assert_eq!(config.run_timeout_secs, 86_400);
    }
}
