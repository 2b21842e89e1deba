//! Streaming file writer with threshold-based progress reporting.

use std::path::Path;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use super::constants::{PROGRESS_INTERVAL_BYTES, WRITE_BUFFER_BYTES};
use super::error::DownloadError;

/// A failed streaming write, carrying how many bytes reached the file
/// before the failure.
#[derive(Debug)]
pub struct StreamWriteError {
    /// Bytes written before the failure (0 if the file never opened).
    pub bytes_written: u64,
    /// The causing error.
    pub source: DownloadError,
}

/// Writes a byte stream to `path`, reporting progress at 1 MiB intervals.
///
/// The file is created (truncating any existing content) and consumed to
/// end-of-stream; `expected_bytes` is advisory and only feeds the percent
/// calculation. After each chunk, if the cumulative count crossed the next
/// 1 MiB boundary, the boundary is advanced past the current count and
/// `on_progress` is invoked exactly once - a chunk spanning several
/// boundaries still produces a single report. The percent is rounded to
/// one decimal and is `None` when `expected_bytes` is 0.
///
/// The file handle is released on every exit path; a partial file is left
/// in place on failure.
///
/// # Errors
///
/// Returns [`StreamWriteError`] wrapping a
/// [`DownloadError::FileWrite`](super::DownloadError) when the file cannot
/// be created or written, or the stream's own error when a chunk fails.
pub async fn write_stream<S>(
    mut stream: S,
    path: &Path,
    expected_bytes: u64,
    mut on_progress: impl FnMut(u64, Option<f64>),
) -> Result<u64, StreamWriteError>
where
    S: Stream<Item = Result<Bytes, DownloadError>> + Unpin,
{
    let file = File::create(path).await.map_err(|e| StreamWriteError {
        bytes_written: 0,
        source: DownloadError::file_write(path, e),
    })?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);

    let mut bytes_written: u64 = 0;
    let mut next_report_at = PROGRESS_INTERVAL_BYTES;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| StreamWriteError {
            bytes_written,
            source,
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| StreamWriteError {
                bytes_written,
                source: DownloadError::file_write(path, e),
            })?;

        bytes_written += chunk.len() as u64;

        if bytes_written >= next_report_at {
            while bytes_written >= next_report_at {
                next_report_at += PROGRESS_INTERVAL_BYTES;
            }

            let percent = percent_of(bytes_written, expected_bytes);
            debug!(
                path = %path.display(),
                bytes_written,
                total_bytes = expected_bytes,
                percent,
                "download progress"
            );
            on_progress(bytes_written, percent);
        }
    }

    writer.flush().await.map_err(|e| StreamWriteError {
        bytes_written,
        source: DownloadError::file_write(path, e),
    })?;

    Ok(bytes_written)
}

/// Completion percent rounded to one decimal; `None` when the expected
/// total is unknown.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent_of(bytes_written: u64, expected_bytes: u64) -> Option<f64> {
    if expected_bytes == 0 {
        return None;
    }

    let raw = bytes_written as f64 / expected_bytes as f64 * 100.0;
    Some((raw * 10.0).round() / 10.0)
}
