//! Image bytes from the local filesystem.

use dominant::{FetchError, ImageSource};
use log::debug;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{RecvTimeoutError, sync_channel};
use std::thread;
use std::time::Duration;

/// Reads images relative to a base directory, giving up on any read slower than `timeout`.
///
/// Accepted references are relative paths (joined onto the base directory), absolute paths and
/// `file://` URLs.
#[derive(Clone, Debug)]
pub struct FileImageSource {
    base: PathBuf,
    timeout: Duration,
}

impl FileImageSource {
    pub fn new(base: &Path, timeout: Duration) -> Self {
        Self {
            base: base.to_owned(),
            timeout,
        }
    }

    /// Map a reference onto a filesystem path.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, FetchError> {
        if let Some(path) = reference.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if reference.contains("://") {
            return Err(FetchError::UnsupportedScheme(reference.to_owned()));
        }
        Ok(self.base.join(reference))
    }
}

impl ImageSource for FileImageSource {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(reference)?;
        debug!("reading {}", path.display());
        let (tx, rx) = sync_channel(1);
        thread::spawn(move || {
            let _ = tx.send(fs::read(&path));
        });
        match rx.recv_timeout(self.timeout) {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(source)) => Err(FetchError::Io {
                reference: reference.to_owned(),
                source,
            }),
            Err(RecvTimeoutError::Timeout) => Err(FetchError::Timeout {
                reference: reference.to_owned(),
                after: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(FetchError::Unavailable(format!(
                "reader for {reference} exited without a result"
            ))),
        }
    }
}
