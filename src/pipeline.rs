//! The capture-and-assemble pipeline.
//!
//! A [`Pipeline`] drives a [`Renderer`] through a [`ViewSequencer`], captures
//! one frame per orientation, assembles the frames into a GIF, and removes
//! every transient file before returning. The run moves through
//! [`PipelineState`]s in a fixed order:
//!
//! ```text
//! Init -> Capturing -> Assembling -> CleaningUp -> Done
//!            |              |            ^
//!            +--- error ----+------------+
//! ```
//!
//! Any capture failure aborts the remaining captures; no GIF is produced from
//! a subset of frames. Cleanup runs exactly once on every path.
//!
//! # Example
//!
//! ```no_run
//! use orbitgif::{Pipeline, PipelineOptions, ProcessRenderer, ViewSequencer};
//!
//! let mut renderer = ProcessRenderer::new("render-view", "bracket.sldprt");
//! let pipeline = Pipeline::new(PipelineOptions::new());
//! let outcome = pipeline.run(&mut renderer, ViewSequencer::standard(), "out/bracket.gif");
//!
//! println!("{}", outcome.reason());
//! for warning in outcome.warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::assembler;
use crate::configuration::PipelineOptions;
use crate::error::{CleanupWarning, OrbitGifError};
use crate::frame_store::FrameStore;
use crate::progress::{OperationType, ProgressTracker};
use crate::reaper::{self, CleanupReport};
use crate::renderer::Renderer;
use crate::run_id::RunId;
use crate::sequence::ViewSequencer;
use crate::snapshot;
use crate::validation::{validate_destination, validate_working_directory};

/// Stage of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Validating paths and generating the run identifier.
    Init,
    /// Applying orientations and capturing frames.
    Capturing,
    /// Encoding the GIF.
    Assembling,
    /// Removing transient files.
    CleaningUp,
    /// Finished, successfully or not.
    Done,
}

/// The GIF a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where the GIF was written.
    pub path: PathBuf,
    /// Number of frames it contains.
    pub frame_count: usize,
}

/// Result of one [`Pipeline::run`].
#[derive(Debug)]
pub struct RunOutcome {
    /// Identifier that namespaced this run's transient files.
    pub run_id: RunId,
    /// The primary result.
    pub result: Result<Artifact, OrbitGifError>,
    /// What cleanup removed and what it left behind.
    pub cleanup: CleanupReport,
    /// Last state reached. Always [`PipelineState::Done`] for a returned outcome.
    pub final_state: PipelineState,
}

impl RunOutcome {
    /// Returns `true` if the GIF was written.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The artifact, if the run succeeded.
    pub fn artifact(&self) -> Option<&Artifact> {
        self.result.as_ref().ok()
    }

    /// The failure, if the run failed.
    pub fn error(&self) -> Option<&OrbitGifError> {
        self.result.as_ref().err()
    }

    /// Human-readable summary of the primary result.
    pub fn reason(&self) -> String {
        match &self.result {
            Ok(artifact) => format!(
                "Created {} with {} frames",
                artifact.path.display(),
                artifact.frame_count
            ),
            Err(error) => error.to_string(),
        }
    }

    /// Transient files that could not be removed.
    pub fn warnings(&self) -> &[CleanupWarning] {
        &self.cleanup.warnings
    }

    /// Discard the cleanup report and return the primary result.
    pub fn into_result(self) -> Result<Artifact, OrbitGifError> {
        self.result
    }
}

/// Drives the capture-and-assemble sequence.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Capture every orientation in `sequence` and write a GIF to
    /// `destination`.
    ///
    /// The destination directory must already exist. All transient files
    /// are gone when this returns, except those listed in
    /// [`RunOutcome::warnings`].
    pub fn run<R, P>(
        &self,
        renderer: &mut R,
        sequence: ViewSequencer,
        destination: P,
    ) -> RunOutcome
    where
        R: Renderer + ?Sized,
        P: AsRef<Path>,
    {
        let mut run = Run {
            options: &self.options,
            run_id: self.options.run_id.unwrap_or_default(),
            state: PipelineState::Init,
            store: FrameStore::new(),
        };
        log::debug!("Run {} started", run.run_id);

        let result = run.drive(renderer, sequence, destination.as_ref());
        if let Err(error) = &result {
            log::debug!("Run {} failed during {:?}: {error}", run.run_id, run.state);
        }

        run.enter(PipelineState::CleaningUp);
        let cleanup = reaper::cleanup(&mut run.store);
        run.enter(PipelineState::Done);

        RunOutcome {
            run_id: run.run_id,
            result,
            cleanup,
            final_state: run.state,
        }
    }
}

struct Run<'a> {
    options: &'a PipelineOptions,
    run_id: RunId,
    state: PipelineState,
    store: FrameStore,
}

impl Run<'_> {
    fn enter(&mut self, next: PipelineState) {
        log::debug!("Run {}: {:?} -> {:?}", self.run_id, self.state, next);
        self.state = next;
    }

    fn drive<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        sequence: ViewSequencer,
        destination: &Path,
    ) -> Result<Artifact, OrbitGifError> {
        validate_destination(destination)?;
        let destination_directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !destination_directory.is_dir() {
            return Err(OrbitGifError::validation(
                destination_directory,
                "destination directory does not exist",
            ));
        }
        let working_directory = self.options.resolve_working_directory(destination);
        validate_working_directory(&working_directory)?;
        if sequence.is_empty() {
            return Err(OrbitGifError::validation(
                destination,
                "no orientations to capture",
            ));
        }

        self.enter(PipelineState::Capturing);
        let total = sequence.len();
        let mut capture_progress = ProgressTracker::new(
            self.options.progress.clone(),
            OperationType::Capture,
            Some(total as u64),
        );

        for (position, orientation) in sequence.into_iter().enumerate() {
            let index = position + 1;
            for command in orientation.commands() {
                renderer.apply_orientation(command);
            }

            let path = self.run_id.frame_path(
                &working_directory,
                index,
                self.options.raster_extension(),
            );
            self.store.track(&path);
            snapshot::capture(renderer, index, &orientation, &path)?;
            self.store.add_frame(&path)?;
            capture_progress.advance(Some(index));
        }

        self.enter(PipelineState::Assembling);
        let mut assembly_progress = ProgressTracker::new(
            self.options.progress.clone(),
            OperationType::Assembly,
            Some(1),
        );
        assembler::assemble(
            self.store.frames_mut(),
            destination,
            self.options.gif_options(),
        )?;
        assembly_progress.advance(None);

        Ok(Artifact {
            path: destination.to_path_buf(),
            frame_count: self.store.len(),
        })
    }
}
