// Container-run lifecycle: name assignment, streamed logging, deadline and
// interrupt handling, exactly-once completion, guaranteed removal.

pub mod lifecycle;
pub mod types;

pub use lifecycle::{run_async, run_async_argv, run_sync, run_sync_argv};
pub use types::{DEFAULT_RUN_TIMEOUT, INTERRUPTED_EXIT_CODE, RunConfig, RunStatus};
