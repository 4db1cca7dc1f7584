use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A volume mapping value is neither a container path string nor a
    /// well-formed path/mode map. Raised while building arguments, before
    /// any subprocess is spawned.
    #[error("invalid volume mapping for {host}: {reason}")]
    InvalidMapping {
        /// Host path the mapping was declared under.
        host: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// The runtime binary could not be resolved or the daemon did not answer.
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// An asynchronous run did not finish within its deadline. The container
    /// has already been force-removed (best effort) when this is returned.
    #[error("container {name} did not finish within {timeout:?}")]
    Timeout {
        /// Name assigned to the container.
        name: String,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// The runtime binary exited non-zero on the synchronous path.
    #[error("`{command}` exited with status {code}: {stderr}")]
    NonZeroExit {
        /// The command line that was executed.
        command: String,
        /// Exit code reported by the binary.
        code: i32,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The runtime binary could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A command string could not be split into arguments.
    #[error("invalid command line: {0}")]
    CommandParse(#[from] shell_words::ParseError),

    /// A required input was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// An I/O operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file exists but could not be parsed.
    #[error("invalid config file {path}: {source}")]
    Config {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },

    /// Output of a runtime subcommand could not be parsed.
    #[error("failed to parse `{command}` output: {source}")]
    Parse {
        /// The command line whose output was malformed.
        command: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
