use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::args::{Mounts, RunOptions};
use crate::config::Config;
use crate::logger::{RunLogger, default_logger};
use crate::process::CancelToken;

/// Default deadline for asynchronous runs: long, but finite.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Synthetic exit code reported when a run is cut short by an interrupt.
pub const INTERRUPTED_EXIT_CODE: i32 = 127;

/// Per-run configuration for [`run_sync`](super::run_sync) and
/// [`run_async`](super::run_async).
#[derive(Clone)]
pub struct RunConfig {
    /// Bind mounts, emitted before all other run flags.
    pub mounts: Mounts,
    /// Run options, emitted between the bind mounts and the image reference.
    pub options: RunOptions,
    /// Deadline for the asynchronous path. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Terminate the host process once the termination sequence finishes.
    pub exit_process: bool,
    /// Sink for lifecycle messages and streamed container output.
    pub logger: Arc<dyn RunLogger>,
    /// Cooperative cancellation token observed while waiting.
    pub cancel: CancelToken,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the deadline from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new().timeout(config.run_timeout())
    }

    pub fn mounts(mut self, mounts: Mounts) -> Self {
        self.mounts = mounts;
        self
    }

    pub fn options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Wait indefinitely instead of enforcing a deadline.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn exit_process(mut self, exit: bool) -> Self {
        self.exit_process = exit;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mounts: Mounts::new(),
            options: RunOptions::new(),
            timeout: Some(DEFAULT_RUN_TIMEOUT),
            exit_process: false,
            logger: default_logger(),
            cancel: CancelToken::new(),
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("mounts", &self.mounts)
            .field("options", &self.options)
            .field("timeout", &self.timeout)
            .field("exit_process", &self.exit_process)
            .finish_non_exhaustive()
    }
}

/// Outcome of an asynchronous run, as passed to the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Container exit code; [`INTERRUPTED_EXIT_CODE`] when interrupted,
    /// absent when the runtime client died without one.
    pub exit_code: Option<i32>,
    /// The run was cut short by the cancel token.
    pub interrupted: bool,
}

impl RunStatus {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.interrupted
    }
}
