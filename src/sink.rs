// src/sink.rs

//! Draining a command's output to the console and an optional log file.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::errors::{LogpatchError, Result};
use crate::exec::LineSource;

/// A log file held open in append mode for the duration of one step.
///
/// Open it before starting the command it records: if the file can't be
/// opened, the command must not run.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Open `path` for append, creating it and its parent directories.
    pub async fn open_append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LogpatchError::io(format!("creating {}", parent.display()), e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| LogpatchError::io(format!("opening {} for append", path.display()), e))?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Consume `lines` until it ends, writing every line to `console` and, when
/// `log_file` is given, appending it to that file as well.
///
/// Both sinks are written and flushed before the next line is pulled, so an
/// error from the source never loses output that was already produced. The
/// file is closed when the caller drops its [`LogFile`].
///
/// Returns the number of lines drained.
pub async fn drain<W>(
    lines: &mut dyn LineSource,
    mut log_file: Option<&mut LogFile>,
    console: &mut W,
) -> Result<usize>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut count = 0;
    while let Some(line) = lines.next_line().await? {
        write_line(console, &line)
            .await
            .map_err(|e| LogpatchError::io("writing to console", e))?;

        if let Some(log) = log_file.as_deref_mut() {
            write_line(&mut log.file, &line)
                .await
                .map_err(|e| LogpatchError::io(format!("writing {}", log.path.display()), e))?;
        }

        count += 1;
    }

    debug!(
        cmd = %lines.command(),
        lines = count,
        log_file = ?log_file.as_ref().map(|l| l.path()),
        "drained command output"
    );
    Ok(count)
}

async fn write_line<W>(sink: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    sink.write_all(line.as_bytes()).await?;
    sink.flush().await
}
