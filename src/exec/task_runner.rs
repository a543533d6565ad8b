// src/exec/task_runner.rs

//! Real process runner.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Split};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::exec::backend::{CommandOutput, CommandRunner};

/// Runs commands as OS processes via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = CommandOutput> + Send + 'a>> {
        Box::pin(run_command(argv))
    }
}

/// Run a single command, capturing stdout and stderr into one text.
///
/// Errors (empty argv, spawn failure, wait failure) are converted into an
/// unsuccessful output whose text ends with the error; they are also logged
/// via `tracing::error!`.
pub async fn run_command(argv: &[String]) -> CommandOutput {
    let started = Instant::now();

    match run_command_inner(argv).await {
        Ok((success, output)) => CommandOutput {
            success,
            output,
            duration: started.elapsed(),
        },
        Err(err) => {
            let message = format!("{err:#}");
            error!(?argv, error = %message, "command execution error");
            CommandOutput {
                success: false,
                output: message,
                duration: started.elapsed(),
            }
        }
    }
}

async fn run_command_inner(argv: &[String]) -> Result<(bool, String)> {
    let (program, args) = argv.split_first().context("empty command")?;

    debug!(%program, ?args, "spawning process");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process '{program}'"))?;

    let mut stdout = child.stdout.take().map(|s| BufReader::new(s).split(b'\n'));
    let mut stderr = child.stderr.take().map(|s| BufReader::new(s).split(b'\n'));

    // Interleave both streams line by line in arrival order.
    let mut combined = String::new();
    loop {
        tokio::select! {
            line = next_line(&mut stdout), if stdout.is_some() => match line {
                Some(line) => push_line(&mut combined, &line),
                None => stdout = None,
            },
            line = next_line(&mut stderr), if stderr.is_some() => match line {
                Some(line) => push_line(&mut combined, &line),
                None => stderr = None,
            },
            else => break,
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process '{program}'"))?;

    if !status.success() {
        push_line(&mut combined, status.to_string().as_bytes());
    }

    info!(%program, exit_code = ?status.code(), success = status.success(), "process exited");

    Ok((status.success(), combined))
}

/// Next `\n`-terminated segment, or `None` at EOF / read error.
async fn next_line<R>(reader: &mut Option<Split<BufReader<R>>>) -> Option<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(split) => match split.next_segment().await {
            Ok(segment) => segment,
            Err(e) => {
                debug!(error = %e, "error reading process output; treating as EOF");
                None
            }
        },
        None => None,
    }
}

fn push_line(buf: &mut String, line: &[u8]) {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    buf.push_str(&String::from_utf8_lossy(line));
    buf.push('\n');
}
