//! Run identifiers.
//!
//! Every pipeline invocation gets a [`RunId`] that prefixes all of the
//! transient files it creates, so repeated or concurrent runs sharing a
//! working directory never collide.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Unique identifier for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    /// Generate a fresh random (v4) identifier.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Path of the transient frame file for capture `index` (1-based).
    ///
    /// Names follow `{run_id}_{index}.{extension}`.
    pub fn frame_path(&self, directory: &Path, index: usize, extension: &str) -> PathBuf {
        directory.join(format!("{}_{index}.{extension}", self.0))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RunId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for RunId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
