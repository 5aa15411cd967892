//! # orbitgif
//!
//! Turn a 3D model into an animated GIF by sweeping the camera through a
//! fixed set of orientations and capturing one still per view.
//!
//! `orbitgif` does not render anything itself. Rendering is delegated to an
//! implementation of [`Renderer`], which owns the model and its camera. The
//! crate orders the orientation commands, captures each view to a uniquely
//! named transient file, encodes the frames into a GIF with the
//! [`gif`](https://crates.io/crates/gif) crate, and removes every transient
//! file whether the run succeeds or not.
//!
//! ## Quick Start
//!
//! ```no_run
//! use orbitgif::{Pipeline, PipelineOptions, ProcessRenderer, ViewSequencer};
//!
//! let mut renderer = ProcessRenderer::new("render-view", "bracket.sldprt");
//! let outcome = Pipeline::new(PipelineOptions::new()).run(
//!     &mut renderer,
//!     ViewSequencer::standard(),
//!     "bracket.gif",
//! );
//! assert!(outcome.is_success(), "{}", outcome.reason());
//! ```
//!
//! ## Implementing a Renderer
//!
//! ```
//! use std::path::Path;
//!
//! use orbitgif::{CAPTURE_OK, OrientationCommand, Renderer};
//!
//! struct Headless {
//!     commands: Vec<OrientationCommand>,
//! }
//!
//! impl Renderer for Headless {
//!     fn apply_orientation(&mut self, command: &OrientationCommand) {
//!         self.commands.push(*command);
//!     }
//!
//!     fn capture_to_file(&mut self, path: &Path) -> i32 {
//!         let image = image::RgbImage::from_pixel(32, 32, image::Rgb([200, 200, 200]));
//!         match image.save(path) {
//!             Ok(()) => CAPTURE_OK,
//!             Err(_) => 1,
//!         }
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - **Fixed sweep**: the standard eleven-view [`ViewSequencer`]
//! - **Fail-fast capture**: the first failed capture aborts the run
//! - **Atomic output**: the GIF appears only once fully encoded
//! - **Guaranteed cleanup**: transient frames are deleted on every exit
//!   path, with undeletable files reported as warnings
//! - **Progress callbacks**: per-capture [`ProgressInfo`] snapshots
//! - **External renderers**: [`ProcessRenderer`] drives any command-line
//!   rendering program

pub mod assembler;
pub mod configuration;
pub mod error;
pub mod frame_store;
pub mod orientation;
pub mod pipeline;
pub mod process_renderer;
pub mod progress;
pub mod reaper;
pub mod renderer;
pub mod run_id;
pub mod sequence;
pub mod snapshot;
pub mod validation;

pub use assembler::{GifOptions, assemble, assemble_to_memory, encode_gif};
pub use configuration::{DEFAULT_RASTER_EXTENSION, PipelineOptions};
pub use error::{CleanupWarning, OrbitGifError};
pub use frame_store::{Frame, FrameHandle, FrameStore};
pub use orientation::{Axis, Orientation, OrientationCommand, Sign};
pub use pipeline::{Artifact, Pipeline, PipelineState, RunOutcome};
pub use process_renderer::ProcessRenderer;
pub use progress::{OperationType, ProgressCallback, ProgressInfo};
pub use reaper::{CleanupReport, cleanup};
pub use renderer::{CAPTURE_OK, Renderer};
pub use run_id::RunId;
pub use sequence::ViewSequencer;
pub use validation::{
    DocumentType, ValidationReport, ensure_destination_directory, validate_destination,
    validate_request, validate_working_directory,
};
