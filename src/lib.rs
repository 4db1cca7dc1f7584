//! Thin wrapper around a container-runtime CLI (docker-compatible).
//!
//! Builds argument lists for run/build/pull/load/inspect, executes them as
//! subprocesses, and orchestrates asynchronous runs with streamed logs, a
//! deadline, and guaranteed container removal on every exit path.
//!
//! ```no_run
//! use dockhand::{Engine, Mounts, RunConfig, run_async};
//!
//! # fn main() -> dockhand::Result<()> {
//! let engine = Engine::default();
//! engine.verify_connection()?;
//!
//! let config = RunConfig::new()
//!     .mounts(Mounts::new().bind("/tmp/data", "/data"))
//!     .timeout(std::time::Duration::from_secs(300));
//!
//! let status = run_async(
//!     &engine,
//!     "alpine:3",
//!     "sh -c 'echo hello'",
//!     Some(|id: Option<String>, status: &dockhand::RunStatus| {
//!         println!("container {id:?} finished with {:?}", status.exit_code);
//!     }),
//!     &config,
//! )?;
//! assert!(status.success());
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod process;
pub mod run;

pub use args::{BindTarget, MountMode, Mounts, OptionValue, RunOptions};
pub use config::Config;
pub use engine::{Engine, user_flags};
pub use error::{Error, Result};
pub use logger::{RunLogger, TracingLogger};
pub use process::{CancelToken, CommandOutput};
pub use run::{
    DEFAULT_RUN_TIMEOUT, INTERRUPTED_EXIT_CODE, RunConfig, RunStatus, run_async, run_async_argv,
    run_sync, run_sync_argv,
};
