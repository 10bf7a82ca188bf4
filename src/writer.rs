//! Base64-encoded atomic file writer.
//!
//! Output files hold one whole-payload base64 blob. Writes stage the blob
//! in a temporary file next to the target and swap it in with a bounded
//! retry loop, so a reader never observes a truncated file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Error from a single output write.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to stage temporary file: {0}")]
    Stage(#[source] io::Error),

    #[error("failed to replace {path} after {attempts} attempt(s): {source}")]
    Replace {
        path: String,
        attempts: u32,
        #[source]
        source: io::Error,
    },
}

/// The replace step of an atomic write, injectable so tests can simulate
/// busy targets without real filesystem races.
#[cfg_attr(test, automock)]
pub trait ReplaceStrategy: Send + Sync {
    /// Move `src` over `dst`, replacing it.
    fn replace(&self, src: &Path, dst: &Path) -> io::Result<()>;
}

/// Production replace: remove any existing target, then rename. The
/// explicit remove keeps the swap working on platforms where rename does
/// not overwrite.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenameReplace;

impl ReplaceStrategy for RenameReplace {
    fn replace(&self, src: &Path, dst: &Path) -> io::Result<()> {
        let _ = std::fs::remove_file(dst);
        std::fs::rename(src, dst)
    }
}

/// Bounded linear-backoff retry policy for the replace step.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Linear backoff: base_delay x attempt number.
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Writes a list as one newline-joined, whole-payload base64 blob,
/// atomically replacing the target path.
pub struct EncodedWriter<R: ReplaceStrategy = RenameReplace> {
    policy: RetryPolicy,
    replace: R,
}

impl EncodedWriter<RenameReplace> {
    pub fn new() -> Self {
        Self::with_strategy(RetryPolicy::default(), RenameReplace)
    }
}

impl Default for EncodedWriter<RenameReplace> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ReplaceStrategy> EncodedWriter<R> {
    pub fn with_strategy(policy: RetryPolicy, replace: R) -> Self {
        Self { policy, replace }
    }

    /// Encode `lines` and persist the blob at `path`.
    ///
    /// The blob is staged in a temporary file in the target's directory,
    /// flushed to disk, then swapped in. Busy-class replace failures are
    /// retried with linear backoff up to the policy's attempt budget; any
    /// other failure, or an exhausted budget, removes the staged file and
    /// reports the error.
    pub fn write(&self, path: &Path, lines: &[String]) -> Result<(), WriteError> {
        let encoded = encode_payload(lines);
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(WriteError::Stage)?;
        tmp.write_all(encoded.as_bytes()).map_err(WriteError::Stage)?;
        tmp.as_file().sync_all().map_err(WriteError::Stage)?;
        // Close the handle before the swap; an open staged file cannot be
        // renamed on every platform. The TempPath still removes the file
        // on drop if the swap never succeeds.
        let staged = tmp.into_temp_path();

        let mut attempt = 1u32;
        loop {
            match self.replace.replace(&staged, path) {
                // The staged file has moved; dropping `staged` only
                // unlinks its now-vacant old path.
                Ok(()) => return Ok(()),
                Err(err) if is_busy(&err) && attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    debug!(
                        "replace of {} busy (attempt {}), retrying in {:?}",
                        path.display(),
                        attempt,
                        delay
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                // TempPath removes the staged file on drop.
                Err(err) => {
                    return Err(WriteError::Replace {
                        path: path.display().to_string(),
                        attempts: attempt,
                        source: err,
                    })
                }
            }
        }
    }
}

/// Busy-class failures worth retrying: the target is held open or locked
/// by another process.
fn is_busy(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::WouldBlock
    )
}

/// Join lines with `\n` (no trailing newline) and base64-encode the whole
/// payload.
pub fn encode_payload(lines: &[String]) -> String {
    STANDARD.encode(lines.join("\n"))
}
