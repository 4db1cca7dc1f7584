// Process driving: captured execution, interactive execution, async spawn
// with streamed output, cancellation, and deadline enforcement.

pub mod exec;
pub mod spawn;
pub mod types;

pub use exec::{CommandOutput, capture, interactive, try_capture};
pub use spawn::spawn;
pub use types::{CancelToken, OutputLine, ProcessStatus};
