// src/exec/command.rs

//! A single shell command whose merged output is read line by line.

use std::os::fd::OwnedFd;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::unix::pipe::Receiver;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::errors::{LogpatchError, Result};

/// A running shell command, exposed as a lazy sequence of output lines.
///
/// stdout and stderr of the child share one pipe, so lines arrive in exactly
/// the order the process wrote them. Each line keeps its trailing `\n` (the
/// last one may not have one if the process didn't print it).
///
/// [`CommandStream::next_line`] yields `Ok(Some(line))` while output remains.
/// Once the pipe reaches EOF the child is reaped: exit 0 ends the sequence
/// with `Ok(None)`, anything else yields
/// [`LogpatchError::CommandFailed`]. Output is therefore always fully
/// consumed before a failure is reported.
#[derive(Debug)]
pub struct CommandStream {
    command: String,
    child: Child,
    reader: BufReader<Receiver>,
    buf: Vec<u8>,
    lines_read: usize,
    finished: bool,
}

impl CommandStream {
    /// Start `command` through `shell -c`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(shell: &str, command: &str) -> Result<Self> {
        let (reader, writer) = std::io::pipe()
            .map_err(|e| LogpatchError::io("creating output pipe", e))?;
        let stderr_writer = writer
            .try_clone()
            .map_err(|e| LogpatchError::io("duplicating output pipe", e))?;

        let mut cmd = Command::new(shell);
        cmd.arg("-c")
            .arg(command)
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr_writer))
            .kill_on_drop(true);

        info!(cmd = %command, shell = %shell, "starting command");

        let child = cmd.spawn().map_err(|e| {
            LogpatchError::io(format!("spawning '{shell} -c {command}'"), e)
        })?;

        // `cmd` still owns the parent's copies of the write end; EOF only
        // arrives once they are closed.
        drop(cmd);

        let receiver = Receiver::from_owned_fd(OwnedFd::from(reader))
            .map_err(|e| LogpatchError::io("registering output pipe", e))?;

        Ok(Self {
            command: command.to_string(),
            child,
            reader: BufReader::new(receiver),
            buf: Vec::with_capacity(256),
            lines_read: 0,
            finished: false,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Wait for the next line of output.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        if self.finished {
            return Ok(None);
        }

        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|e| LogpatchError::io(format!("reading output of '{}'", self.command), e))?;

        if read > 0 {
            self.lines_read += 1;
            return Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()));
        }

        self.finished = true;
        self.wait_for_exit().await
    }

    async fn wait_for_exit(&mut self) -> Result<Option<String>> {
        let status = self
            .child
            .wait()
            .await
            .map_err(|e| LogpatchError::io(format!("waiting for '{}'", self.command), e))?;

        // Killed by a signal: no exit code.
        let exit_code = status.code().unwrap_or(-1);

        debug!(
            cmd = %self.command,
            exit_code,
            lines = self.lines_read,
            success = status.success(),
            "command exited"
        );

        if status.success() {
            Ok(None)
        } else {
            Err(LogpatchError::CommandFailed {
                command: self.command.clone(),
                exit_code,
            })
        }
    }
}
