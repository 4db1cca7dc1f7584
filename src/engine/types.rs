use crate::config::Config;
use crate::error::Result;
use crate::process::{self, CommandOutput};

/// Handle on the container-runtime binary.
///
/// Holds only the binary name; every operation shells out. The default is
/// `docker`, but any CLI-compatible drop-in (podman, nerdctl) works.
#[derive(Debug, Clone)]
pub struct Engine {
    bin: String,
}

impl Engine {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.binary.clone())
    }

    pub fn binary(&self) -> &str {
        &self.bin
    }

    /// Run an arbitrary runtime subcommand with captured output, erroring on
    /// non-zero exit.
    pub fn exec(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run_capture(&to_owned(args))
    }

    pub(crate) fn run_capture(&self, args: &[String]) -> Result<CommandOutput> {
        process::capture(&self.bin, args)
    }

    pub(crate) fn run_try_capture(&self, args: &[String]) -> Result<CommandOutput> {
        process::try_capture(&self.bin, args)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new("docker")
    }
}

pub(crate) fn to_owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
