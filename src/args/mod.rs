// Argument building: bind-mount flags and run-option flags.

pub mod bind;
pub mod options;

pub use bind::{BindTarget, MountMode, Mounts};
pub use options::{OptionValue, RunOptions};
