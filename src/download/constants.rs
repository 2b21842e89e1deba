//! Constants for the download module (buffering, progress, timeouts).

/// Write buffer size, bounding the granularity of chunk writes (256 KiB).
pub const WRITE_BUFFER_BYTES: usize = 256 * 1024;

/// Cumulative-byte interval between progress reports (1 MiB).
pub const PROGRESS_INTERVAL_BYTES: u64 = 1024 * 1024;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large assets).
pub const READ_TIMEOUT_SECS: u64 = 300;
