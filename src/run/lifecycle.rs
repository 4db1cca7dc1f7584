use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{INTERRUPTED_EXIT_CODE, RunConfig, RunStatus};
use crate::args::{Mounts, RunOptions};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::process::{self, CommandOutput, OutputLine};

/// Run a container synchronously and return its captured output.
///
/// Builds `run <bind flags> <option flags> <image> <command>` and blocks on
/// it; a non-zero exit is an error. The container this creates is NOT
/// removed here; callers that need cleanup manage it themselves or use
/// [`run_async`].
pub fn run_sync(
    engine: &Engine,
    image: &str,
    command: &str,
    config: &RunConfig,
) -> Result<CommandOutput> {
    run_sync_argv(engine, image, &shell_words::split(command)?, config)
}

/// [`run_sync`] for a command that is already split into arguments.
pub fn run_sync_argv(
    engine: &Engine,
    image: &str,
    command: &[String],
    config: &RunConfig,
) -> Result<CommandOutput> {
    validate(image, command)?;
    let args = build_run_args(image, command, &config.mounts, &config.options);
    engine.run_capture(&args)
}

/// Run a container asynchronously: stream its output to the configured
/// logger, wait for exit, deadline, or interrupt, then run the termination
/// sequence.
///
/// The termination sequence is strictly ordered and executes once: resolve
/// the container id by name, invoke `on_complete`, force-remove the
/// container, optionally terminate the host process. On the deadline path
/// the container is removed and `Error::Timeout` is returned WITHOUT
/// invoking `on_complete`; an interrupt instead completes normally with the
/// synthetic exit code [`INTERRUPTED_EXIT_CODE`].
///
/// The call blocks until the sequence finishes; log lines are delivered
/// while it waits.
pub fn run_async<F>(
    engine: &Engine,
    image: &str,
    command: &str,
    on_complete: Option<F>,
    config: &RunConfig,
) -> Result<RunStatus>
where
    F: FnOnce(Option<String>, &RunStatus),
{
    run_async_argv(engine, image, &shell_words::split(command)?, on_complete, config)
}

/// [`run_async`] for a command that is already split into arguments.
pub fn run_async_argv<F>(
    engine: &Engine,
    image: &str,
    command: &[String],
    on_complete: Option<F>,
    config: &RunConfig,
) -> Result<RunStatus>
where
    F: FnOnce(Option<String>, &RunStatus),
{
    validate(image, command)?;

    let mut options = config.options.clone();
    let name = match options.assigned_name() {
        Some(name) => name.to_string(),
        None => {
            let name = generated_name();
            options.insert("name", name.as_str());
            name
        }
    };

    let args = build_run_args(image, command, &config.mounts, &options);
    let logger = &config.logger;
    logger.info(&format!("starting container {name} from {image}"));

    let rx = process::spawn(
        engine.binary(),
        &args,
        config.cancel.clone(),
        config.timeout,
    )?;

    let mut outcome = None;
    for line in rx {
        match line {
            OutputLine::Stdout(l) if !l.trim().is_empty() => {
                logger.debug(&format!("[{name}] {l}"));
            }
            OutputLine::Stderr(l) if !l.trim().is_empty() => {
                logger.error(&format!("[{name}] {l}"));
            }
            OutputLine::Done(status) => {
                outcome = Some(status);
                break;
            }
            _ => {}
        }
    }
    let outcome = outcome.ok_or_else(|| {
        Error::Spawn {
            command: format!("{} run", engine.binary()),
            source: std::io::Error::other("output channel closed without a final status"),
        }
    })?;

    // Termination sequence. A failed lookup resolves to no id; removal then
    // degrades to a logged no-op.
    let id = match engine.container_id(&name) {
        Ok(id) => id,
        Err(e) => {
            logger.error(&format!("failed to look up container {name}: {e}"));
            None
        }
    };

    if outcome.timed_out {
        engine.remove_with(id.as_deref(), true, logger.as_ref());
        return Err(Error::Timeout {
            name,
            timeout: config.timeout.unwrap_or_default(),
        });
    }

    let status = RunStatus {
        exit_code: if outcome.cancelled {
            Some(INTERRUPTED_EXIT_CODE)
        } else {
            outcome.exit_code
        },
        interrupted: outcome.cancelled,
    };

    if let Some(on_complete) = on_complete {
        on_complete(id.clone(), &status);
    }

    engine.remove_with(id.as_deref(), true, logger.as_ref());
    logger.info(&format!("container {name} finished: {status:?}"));

    if config.exit_process {
        std::process::exit(status.exit_code.unwrap_or(0));
    }

    Ok(status)
}

/// Full `run` argument list: bind flags first, then option flags, then the
/// image reference, then the in-container command.
pub(crate) fn build_run_args(
    image: &str,
    command: &[String],
    mounts: &Mounts,
    options: &RunOptions,
) -> Vec<String> {
    let mut args = vec!["run".to_string()];
    args.extend(mounts.to_flags());
    args.extend(options.to_flags());
    args.push(image.to_string());
    args.extend(command.iter().cloned());
    args
}

fn validate(image: &str, command: &[String]) -> Result<()> {
    if image.is_empty() {
        return Err(Error::EmptyField("image reference"));
    }
    if command.is_empty() {
        return Err(Error::EmptyField("command"));
    }
    Ok(())
}

/// Container name derived from the clock, unique enough to be looked up
/// again during the termination sequence.
fn generated_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("run-{millis}")
}
