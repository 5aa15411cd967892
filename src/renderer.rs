//! The external renderer seam.
//!
//! The pipeline never renders anything itself. It drives an implementation
//! of [`Renderer`], which owns a mutable camera state and can persist the
//! current view as a raster file.

use std::path::Path;

use crate::orientation::OrientationCommand;

/// Status code a renderer returns for a successful capture.
pub const CAPTURE_OK: i32 = 0;

/// A 3D engine holding one model and one mutable view.
///
/// Calls are strictly sequential; the pipeline takes `&mut` for the whole
/// run, so no two orientation changes can race on the shared view.
pub trait Renderer {
    /// Apply one command to the current view.
    fn apply_orientation(&mut self, command: &OrientationCommand);

    /// Persist the current view to `path`.
    ///
    /// Returns [`CAPTURE_OK`] on success; any other value is a failure.
    fn capture_to_file(&mut self, path: &Path) -> i32;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn apply_orientation(&mut self, command: &OrientationCommand) {
        (**self).apply_orientation(command);
    }

    fn capture_to_file(&mut self, path: &Path) -> i32 {
        (**self).capture_to_file(path)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn apply_orientation(&mut self, command: &OrientationCommand) {
        (**self).apply_orientation(command);
    }

    fn capture_to_file(&mut self, path: &Path) -> i32 {
        (**self).capture_to_file(path)
    }
}
