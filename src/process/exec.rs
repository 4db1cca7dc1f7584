use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Captured result of a synchronous execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, absent when the process died on a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Render a command line for error messages and logs.
pub(crate) fn render_command(bin: &str, args: &[String]) -> String {
    shell_words::join(std::iter::once(bin).chain(args.iter().map(String::as_str)))
}

/// Execute synchronously with captured output. Non-zero exit is NOT an
/// error here; callers that want the erroring convention use [`capture`].
pub fn try_capture(bin: &str, args: &[String]) -> Result<CommandOutput> {
    let output = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| Error::Spawn {
            command: render_command(bin, args),
            source,
        })?;

    Ok(CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Execute synchronously with captured output, erroring on non-zero exit.
pub fn capture(bin: &str, args: &[String]) -> Result<CommandOutput> {
    let output = try_capture(bin, args)?;
    if output.success() {
        return Ok(output);
    }
    Err(Error::NonZeroExit {
        command: render_command(bin, args),
        code: output.code.unwrap_or(-1),
        stderr: output.stderr.trim().to_string(),
    })
}

/// Execute with inherited stdio, for interactive use. Returns the exit code
/// (absent on signal death).
pub fn interactive(bin: &str, args: &[String]) -> Result<Option<i32>> {
    let status = Command::new(bin)
        .args(args)
        .status()
        .map_err(|source| Error::Spawn {
            command: render_command(bin, args),
            source,
        })?;
    Ok(status.code())
}
