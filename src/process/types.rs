use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Cooperative cancellation token backed by an `AtomicBool`.
///
/// The poll loop in [`spawn`](super::spawn) observes the token; flipping it
/// kills the child process. One token per run avoids process-wide handler
/// state leaking across invocations.
#[derive(Debug, Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Bind SIGINT/Ctrl-C to this token.
    ///
    /// The handler registration is process-wide, so call this at most once
    /// per process, on the token shared with the runs that should observe
    /// interrupts.
    pub fn hook_interrupt(&self) -> Result<()> {
        let token = self.clone();
        ctrlc::set_handler(move || token.cancel())
            .map_err(|e| Error::Io(std::io::Error::other(e)))
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Final state of a spawned process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, absent when the process was killed or died on a signal.
    pub exit_code: Option<i32>,
    /// The cancel token fired before the process exited.
    pub cancelled: bool,
    /// The deadline elapsed before the process exited.
    pub timed_out: bool,
}

/// Streamed output from a spawned process.
#[derive(Debug)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
    Done(ProcessStatus),
}
