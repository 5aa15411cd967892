//! Ordered storage for captured frames.
//!
//! The [`FrameStore`] owns every transient file a run creates. Paths are
//! [`track`](FrameStore::track)ed before the renderer writes to them, so a
//! half-written file from a failed capture is reaped along with the frames
//! that did succeed. Each [`Frame`] keeps its file open until the store is
//! released.

use std::{
    fs::{self, File},
    io::{BufReader, ErrorKind, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use image::{DynamicImage, ImageError, ImageReader};

use crate::error::{CleanupWarning, OrbitGifError};
use crate::reaper::CleanupReport;

/// A captured raster image and the open handle to its transient file.
#[derive(Debug)]
pub struct Frame {
    index: usize,
    path: PathBuf,
    reader: BufReader<File>,
}

impl Frame {
    /// 1-based capture index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Transient file backing this frame.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the frame from its open handle.
    ///
    /// The handle is rewound first, so decoding twice yields the same image.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitGifError::FrameDecode`] if the file is not a readable
    /// raster image.
    pub fn decode(&mut self) -> Result<DynamicImage, OrbitGifError> {
        let index = self.index;
        let to_decode_error = |source: ImageError| OrbitGifError::FrameDecode { index, source };

        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(|error| to_decode_error(ImageError::IoError(error)))?;

        ImageReader::new(&mut self.reader)
            .with_guessed_format()
            .map_err(|error| to_decode_error(ImageError::IoError(error)))?
            .decode()
            .map_err(to_decode_error)
    }
}

/// Opaque reference to a frame inside a [`FrameStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(usize);

impl FrameHandle {
    /// 1-based capture index of the referenced frame.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Capture-ordered frames plus every transient path registered for cleanup.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: Vec<Frame>,
    tracked: Vec<PathBuf>,
}

impl FrameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transient path for cleanup without opening it.
    ///
    /// Tracking the same path twice is a no-op.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.tracked.contains(&path) {
            self.tracked.push(path);
        }
    }

    /// Open a just-captured file and append it as the next frame.
    ///
    /// The path is tracked for cleanup even if opening fails.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitGifError::DuplicateFrame`] if a frame for `path` is
    /// already stored, or [`OrbitGifError::FrameOpen`] if the file cannot be
    /// opened.
    pub fn add_frame(&mut self, path: impl AsRef<Path>) -> Result<FrameHandle, OrbitGifError> {
        let path = path.as_ref();
        if self.frames.iter().any(|frame| frame.path == path) {
            return Err(OrbitGifError::DuplicateFrame(path.to_path_buf()));
        }
        self.track(path);

        let index = self.frames.len() + 1;
        let file = File::open(path).map_err(|source| OrbitGifError::FrameOpen {
            index,
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Recorded frame {index} from {}", path.display());

        self.frames.push(Frame {
            index,
            path: path.to_path_buf(),
            reader: BufReader::new(file),
        });
        Ok(FrameHandle(index))
    }

    /// Look up a frame by handle.
    pub fn get(&self, handle: FrameHandle) -> Option<&Frame> {
        self.frames.get(handle.0.checked_sub(1)?)
    }

    /// Frames in capture order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames in capture order, mutably (decoding reads from the handles).
    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Number of frames recorded.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frame has been recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Every path the store will delete on release, in registration order.
    pub fn tracked_paths(&self) -> &[PathBuf] {
        &self.tracked
    }

    /// Close every handle and delete every tracked file.
    ///
    /// Files that are already gone are not reported. Calling this on an
    /// already released store does nothing and returns an empty report.
    pub fn release_all(&mut self) -> CleanupReport {
        // Handles must be closed before deletion on platforms that lock open files.
        self.frames.clear();

        let mut report = CleanupReport::default();
        for path in self.tracked.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => report.removed.push(path),
                Err(error) if error.kind() == ErrorKind::NotFound => {}
                Err(source) => report.warnings.push(CleanupWarning { path, source }),
            }
        }
        report
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        if self.tracked.is_empty() {
            return;
        }
        for warning in self.release_all().warnings {
            log::warn!("{warning}");
        }
    }
}
