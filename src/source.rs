// source.rs - Scene document retrieval
use std::path::PathBuf;

use crate::error::StartupError;

/// Where scene documents come from. The viewer fetches the document exactly
/// once per startup; implementations must not cache, so that a restarted
/// viewer always observes the latest document.
pub trait SceneSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, StartupError>;
}

/// File-backed source. Reads fresh from disk on every call.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SceneSource for FileSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, StartupError> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|source| StartupError::Fetch {
            name: path.display().to_string(),
            source,
        })
    }
}
