use std::io::BufRead;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use super::exec::render_command;
use super::types::{CancelToken, OutputLine, ProcessStatus};
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Spawn the runtime binary and return a channel that streams its output.
///
/// The caller receives [`OutputLine::Stdout`]/[`Stderr`] as lines arrive,
/// followed by exactly one [`OutputLine::Done`] carrying the final status.
/// A `deadline` of `None` waits indefinitely; cancelling the token or
/// exceeding the deadline kills the child and reaps it.
pub fn spawn(
    bin: &str,
    args: &[String],
    cancel: CancelToken,
    deadline: Option<Duration>,
) -> Result<Receiver<OutputLine>> {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            command: render_command(bin, args),
            source,
        })?;

    let stdout = child.stdout.take().expect("stdout was piped");
    let stderr = child.stderr.take().expect("stderr was piped");

    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        orchestrate(child, stdout, stderr, tx, cancel, deadline);
    });

    Ok(rx)
}

fn orchestrate(
    mut child: Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
    tx: Sender<OutputLine>,
    cancel: CancelToken,
    deadline: Option<Duration>,
) {
    // --- reader threads ---------------------------------------------------
    let tx_out = tx.clone();
    let stdout_handle = std::thread::spawn(move || {
        let reader = std::io::BufReader::new(stdout);
        for line in reader.lines() {
            match line {
                // Receiver may be dropped; ignore send errors.
                Ok(l) => {
                    let _ = tx_out.send(OutputLine::Stdout(l));
                }
                Err(_) => break,
            }
        }
    });

    let tx_err = tx.clone();
    let stderr_handle = std::thread::spawn(move || {
        let reader = std::io::BufReader::new(stderr);
        for line in reader.lines() {
            match line {
                Ok(l) => {
                    let _ = tx_err.send(OutputLine::Stderr(l));
                }
                Err(_) => break,
            }
        }
    });

    // --- poll loop ---------------------------------------------------------
    let start = Instant::now();
    let mut cancelled = false;
    let mut timed_out = false;

    let exit_status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {}
            Err(_) => break None,
        }

        if cancel.is_cancelled() {
            cancelled = true;
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }

        if let Some(limit) = deadline
            && start.elapsed() > limit
        {
            timed_out = true;
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }

        std::thread::sleep(POLL_INTERVAL);
    };

    // --- finalize ----------------------------------------------------------
    let _ = stdout_handle.join();
    let _ = stderr_handle.join();

    let _ = tx.send(OutputLine::Done(ProcessStatus {
        exit_code: exit_status.and_then(|s| s.code()),
        cancelled,
        timed_out,
    }));
}
