//! Error types for the `orbitgif` crate.
//!
//! This module defines [`OrbitGifError`], the unified error type returned by
//! every fallible operation in the crate, and [`CleanupWarning`], the
//! non-fatal report produced when a transient file cannot be removed.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io::Error as IoError,
    path::PathBuf,
};

use image::ImageError;
use thiserror::Error;

/// The unified error type for all `orbitgif` operations.
///
/// Variants carry the frame index (1-based, in capture order) or the path
/// involved so a failed run can be diagnosed from the message alone.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OrbitGifError {
    /// A path or extension supplied by the caller is unusable.
    #[error("Invalid path {path}: {reason}")]
    Validation {
        /// The offending path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// The renderer failed to produce a frame.
    #[error("Could not capture frame {index} ({orientation}): {reason}")]
    Capture {
        /// 1-based capture index.
        index: usize,
        /// Human-readable description of the orientation being captured.
        orientation: String,
        /// Renderer status or other failure detail.
        reason: String,
    },

    /// A just-captured frame could not be opened for reading.
    #[error("Could not open captured frame {index} at {path}: {source}")]
    FrameOpen {
        /// 1-based capture index.
        index: usize,
        /// Transient file that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: IoError,
    },

    /// A frame was added twice under the same transient path.
    #[error("Frame already recorded for {0}")]
    DuplicateFrame(PathBuf),

    /// A captured frame could not be decoded into pixels.
    #[error("Could not assemble animation: frame {index} failed to decode: {source}")]
    FrameDecode {
        /// 1-based capture index.
        index: usize,
        /// Underlying decoder error.
        source: ImageError,
    },

    /// GIF encoding failed.
    #[error("Could not assemble animation: {0}")]
    Encode(String),

    /// The assembler was handed an empty frame list.
    #[error("Could not assemble animation: no frames to encode")]
    NoFrames,

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),
}

impl OrbitGifError {
    pub(crate) fn validation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        OrbitGifError::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A transient file that could not be deleted during cleanup.
///
/// Cleanup failures never replace a run's primary result; they are reported
/// alongside it.
#[derive(Debug)]
pub struct CleanupWarning {
    /// The file that is still on disk.
    pub path: PathBuf,
    /// Why the deletion failed.
    pub source: IoError,
}

impl Display for CleanupWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Could not clean up temp file {}: {}",
            self.path.display(),
            self.source
        )
    }
}
