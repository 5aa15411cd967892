//! Pipeline configuration.
//!
//! [`PipelineOptions`] is a builder that threads the working directory,
//! GIF settings, and progress callbacks through a [`Pipeline`](crate::Pipeline)
//! without polluting every function signature.
//!
//! # Example
//!
//! ```
//! use orbitgif::{GifOptions, PipelineOptions};
//!
//! let options = PipelineOptions::new()
//!     .with_working_directory("/tmp/frames")
//!     .with_gif_options(GifOptions::new().frame_delay(20));
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assembler::GifOptions;
use crate::progress::{NoOpProgress, ProgressCallback};
use crate::run_id::RunId;

/// Extension of the raster files renderers write by default.
pub const DEFAULT_RASTER_EXTENSION: &str = "png";

/// Settings for one [`Pipeline`](crate::Pipeline).
#[derive(Clone)]
pub struct PipelineOptions {
    /// Where transient frame files go. `None` means next to the destination.
    pub(crate) working_directory: Option<PathBuf>,
    /// Extension for transient frame files, without the dot.
    pub(crate) raster_extension: String,
    /// Animated GIF settings.
    pub(crate) gif: GifOptions,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    has_progress: bool,
    /// Fixed run identifier. `None` generates a fresh one per run.
    pub(crate) run_id: Option<RunId>,
}

impl Debug for PipelineOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PipelineOptions")
            .field("working_directory", &self.working_directory)
            .field("raster_extension", &self.raster_extension)
            .field("gif", &self.gif)
            .field("has_progress", &self.has_progress)
            .field("run_id", &self.run_id)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineOptions {
    /// Create options with default settings.
    ///
    /// Defaults: frames next to the destination, PNG frames, default
    /// [`GifOptions`], no progress callback, fresh run id per run.
    pub fn new() -> Self {
        Self {
            working_directory: None,
            raster_extension: DEFAULT_RASTER_EXTENSION.to_string(),
            gif: GifOptions::default(),
            progress: Arc::new(NoOpProgress),
            has_progress: false,
            run_id: None,
        }
    }

    /// Write transient frame files into `directory`. It must already exist.
    #[must_use]
    pub fn with_working_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    /// Set the extension of transient frame files. A leading dot is ignored.
    #[must_use]
    pub fn with_raster_extension(mut self, extension: &str) -> Self {
        self.raster_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the GIF output settings.
    #[must_use]
    pub fn with_gif_options(mut self, gif: GifOptions) -> Self {
        self.gif = gif;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self.has_progress = true;
        self
    }

    /// Use a fixed run identifier instead of generating one.
    #[must_use]
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// GIF output settings.
    pub fn gif_options(&self) -> &GifOptions {
        &self.gif
    }

    /// Extension used for transient frame files.
    pub fn raster_extension(&self) -> &str {
        &self.raster_extension
    }

    /// Resolve the working directory for a given destination.
    pub(crate) fn resolve_working_directory(&self, destination: &Path) -> PathBuf {
        match &self.working_directory {
            Some(directory) => directory.clone(),
            None => match destination.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }
}
