//! Temp file creation and the atomic swap that publishes a rewrite.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::trace;

use crate::error::{Error, Result};

/// Fresh random names tried before giving up with
/// [`Error::TempFileExists`].
const CREATE_ATTEMPTS: u32 = 3;

/// Guard owning the rewrite temp file's path.
///
/// Dropping the guard without [`persist`](TempFile::persist) removes the
/// file, so every early error return cleans up after itself and the target
/// is only ever touched by the final rename.
pub(crate) struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    /// Create a fresh temp file in the same directory as `target`.
    ///
    /// A sibling keeps the final rename on one filesystem, which is what
    /// makes the swap atomic. The name mixes the target's stem, the process
    /// id, and a random token; `create_new` is the existence check, and a
    /// collision retries with fresh randomness.
    pub fn sibling_of(target: &Path) -> Result<(Self, File)> {
        let stem = target
            .file_stem()
            .map_or_else(|| "ini".into(), |s| s.to_string_lossy());
        let pid = std::process::id();

        let mut last_candidate = PathBuf::new();
        for _ in 0..CREATE_ATTEMPTS {
            let token: u32 = rand::rng().random();
            let candidate = target.with_file_name(format!(".{stem}.{pid}.{token:08x}.tmp"));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(file) => {
                    trace!("Created temp file {}", candidate.display());
                    let guard = Self {
                        path: candidate,
                        persisted: false,
                    };
                    return Ok((guard, file));
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    last_candidate = candidate;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(Error::TempFileExists {
            path: last_candidate,
        })
    }

    /// Atomically rename the temp file over `target`.
    ///
    /// On failure the guard still owns the temp path and removes it when
    /// dropped; the target is left as it was.
    pub fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}
