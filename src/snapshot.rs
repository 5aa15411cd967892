//! Snapshot acquisition.

use std::path::Path;

use crate::error::OrbitGifError;
use crate::orientation::Orientation;
use crate::renderer::{CAPTURE_OK, Renderer};

/// Ask `renderer` to write its current view to `destination`.
///
/// `index` is the 1-based capture position and only feeds error messages.
/// On success the file exists. On failure the file may be missing or
/// incomplete and must not be handed to the frame store.
pub fn capture<R: Renderer + ?Sized>(
    renderer: &mut R,
    index: usize,
    orientation: &Orientation,
    destination: &Path,
) -> Result<(), OrbitGifError> {
    log::debug!(
        "Capturing frame {index} ({orientation}) to {}",
        destination.display()
    );

    let status = renderer.capture_to_file(destination);
    if status != CAPTURE_OK {
        return Err(OrbitGifError::Capture {
            index,
            orientation: orientation.to_string(),
            reason: format!("renderer returned status {status}"),
        });
    }

    if !destination.is_file() {
        return Err(OrbitGifError::Capture {
            index,
            orientation: orientation.to_string(),
            reason: format!(
                "renderer reported success but {} was not written",
                destination.display()
            ),
        });
    }

    Ok(())
}
