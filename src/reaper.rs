//! Transient-file cleanup.
//!
//! [`cleanup`] is run exactly once at the end of every pipeline run, on
//! success and failure alike. Deletion failures are logged and returned as
//! [`CleanupWarning`]s; they never replace the run's primary result.

use std::path::PathBuf;

use crate::error::CleanupWarning;
use crate::frame_store::FrameStore;

/// What a cleanup pass removed and what it could not.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Files that are still on disk.
    pub warnings: Vec<CleanupWarning>,
}

impl CleanupReport {
    /// Returns `true` if every tracked file was removed.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Close all frame handles and delete all transient files held by `store`.
///
/// Safe to call more than once; later calls return an empty report.
pub fn cleanup(store: &mut FrameStore) -> CleanupReport {
    let report = store.release_all();
    log::debug!(
        "Cleanup removed {} transient file(s), {} left behind",
        report.removed.len(),
        report.warnings.len(),
    );
    for warning in &report.warnings {
        log::warn!("{warning}");
    }
    report
}
