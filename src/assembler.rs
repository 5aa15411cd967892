//! Animated GIF assembly.
//!
//! This module provides [`GifOptions`] for configuring the output and the
//! [`assemble`] entry point the pipeline uses once every frame has been
//! captured.
//!
//! Assembly is all-or-nothing. Every frame is decoded before the destination
//! is touched, and the GIF is written to a temporary sibling file that is
//! renamed into place only after the encoder has finished.
//!
//! # Example
//!
//! ```no_run
//! use orbitgif::{FrameStore, GifOptions, OrbitGifError};
//!
//! let mut store = FrameStore::new();
//! store.add_frame("front.png")?;
//! store.add_frame("side.png")?;
//!
//! let options = GifOptions::new().frame_delay(25).repeat(Some(2));
//! orbitgif::assemble(store.frames_mut(), "out/model.gif", &options)?;
//! # Ok::<(), OrbitGifError>(())
//! ```

use std::io::{BufWriter, Write};
use std::path::Path;

use gif::{Encoder, Frame as GifFrame, Repeat};
use image::{DynamicImage, imageops::FilterType};
use tempfile::NamedTempFile;

use crate::error::OrbitGifError;
use crate::frame_store::Frame;

/// Configuration for animated GIF output.
#[derive(Debug, Clone)]
pub struct GifOptions {
    /// Target width in pixels. Height is computed to preserve aspect ratio.
    /// `None` keeps the captured resolution.
    pub width: Option<u32>,
    /// Delay between frames in hundredths of a second (default: 50 = 500 ms).
    pub frame_delay: u16,
    /// How many times the GIF should repeat. `None` means loop forever.
    pub repeat: Option<u16>,
    /// Quantiser speed, 1 (best) to 30 (fastest). Default 10.
    pub speed: i32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            width: None,
            frame_delay: 50,
            repeat: None,
            speed: 10,
        }
    }
}

impl GifOptions {
    /// Create a new [`GifOptions`] with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target width (height is auto-scaled to preserve aspect ratio).
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the delay between frames in hundredths of a second.
    ///
    /// For example, `10` = 100 ms between frames ≈ 10 fps.
    pub fn frame_delay(mut self, delay: u16) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Set the repeat count. `None` means loop forever.
    pub fn repeat(mut self, repeat: Option<u16>) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the quantiser speed. Values are clamped to `1..=30`.
    pub fn speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }
}

/// Encode `frames`, in order, as an animated GIF at `destination`.
///
/// On success `destination` holds a complete GIF with exactly
/// `frames.len()` frames. On failure nothing is written there.
///
/// # Errors
///
/// - [`OrbitGifError::NoFrames`] if `frames` is empty.
/// - [`OrbitGifError::Validation`] if the destination directory is missing.
/// - [`OrbitGifError::FrameDecode`] if any frame cannot be decoded.
/// - [`OrbitGifError::Encode`] if frame sizes differ, exceed the GIF limit,
///   or the encoder fails.
pub fn assemble<P: AsRef<Path>>(
    frames: &mut [Frame],
    destination: P,
    options: &GifOptions,
) -> Result<(), OrbitGifError> {
    let destination = destination.as_ref();
    if frames.is_empty() {
        return Err(OrbitGifError::NoFrames);
    }

    let directory = parent_directory(destination);
    if !directory.is_dir() {
        return Err(OrbitGifError::validation(
            directory,
            "destination directory does not exist",
        ));
    }

    let images = decode_all(frames)?;

    log::debug!(
        "Encoding {} frames to GIF file {} (width={:?}, delay={})",
        images.len(),
        destination.display(),
        options.width,
        options.frame_delay,
    );

    let mut staging = NamedTempFile::new_in(directory)?;
    {
        let writer = encode_gif(BufWriter::new(staging.as_file_mut()), &images, options)?;
        writer
            .into_inner()
            .map_err(|error| OrbitGifError::IoError(error.into_error()))?
            .sync_all()?;
    }

    staging.persist(destination).map_err(|error| {
        OrbitGifError::Encode(format!(
            "Failed to move GIF into place at {}: {}",
            destination.display(),
            error.error
        ))
    })?;

    Ok(())
}

/// Encode `frames`, in order, as an animated GIF in memory.
///
/// Returns the raw GIF bytes.
pub fn assemble_to_memory(
    frames: &mut [Frame],
    options: &GifOptions,
) -> Result<Vec<u8>, OrbitGifError> {
    if frames.is_empty() {
        return Err(OrbitGifError::NoFrames);
    }
    let images = decode_all(frames)?;

    log::debug!(
        "Encoding {} frames to GIF in memory (width={:?}, delay={})",
        images.len(),
        options.width,
        options.frame_delay,
    );

    encode_gif(Vec::new(), &images, options)
}

/// Encode already-decoded images as an animated GIF into `writer`.
///
/// All images must share the first image's dimensions. Each frame is
/// quantised to a 256-colour palette by the `gif` crate. Returns the writer
/// once the trailer has been written.
pub fn encode_gif<W: Write>(
    writer: W,
    images: &[DynamicImage],
    options: &GifOptions,
) -> Result<W, OrbitGifError> {
    let first = images.first().ok_or(OrbitGifError::NoFrames)?;
    let (source_width, source_height) = (first.width(), first.height());

    for (position, image) in images.iter().enumerate().skip(1) {
        if image.width() != source_width || image.height() != source_height {
            return Err(OrbitGifError::Encode(format!(
                "frame {} is {}x{}, expected {}x{} like frame 1",
                position + 1,
                image.width(),
                image.height(),
                source_width,
                source_height,
            )));
        }
    }

    let (width, height) = match options.width {
        Some(width) if width != source_width && source_width > 0 => {
            let ratio = width as f64 / source_width as f64;
            let height = (source_height as f64 * ratio).round() as u32;
            (width, height.max(1))
        }
        _ => (source_width, source_height),
    };
    let canvas_width = gif_dimension(width)?;
    let canvas_height = gif_dimension(height)?;

    let mut encoder = Encoder::new(writer, canvas_width, canvas_height, &[])
        .map_err(|e| OrbitGifError::Encode(format!("Failed to create GIF encoder: {e}")))?;

    let repeat = match options.repeat {
        None => Repeat::Infinite,
        Some(n) => Repeat::Finite(n),
    };
    encoder
        .set_repeat(repeat)
        .map_err(|e| OrbitGifError::Encode(format!("Failed to set GIF repeat: {e}")))?;

    let speed = options.speed.clamp(1, 30);
    for image in images {
        let rgba = if (width, height) == (source_width, source_height) {
            image.to_rgba8()
        } else {
            image.resize_exact(width, height, FilterType::Triangle).to_rgba8()
        };
        let mut pixels = rgba.into_raw();

        let mut gif_frame =
            GifFrame::from_rgba_speed(canvas_width, canvas_height, &mut pixels, speed);
        gif_frame.delay = options.frame_delay;

        encoder
            .write_frame(&gif_frame)
            .map_err(|e| OrbitGifError::Encode(format!("Failed to write GIF frame: {e}")))?;
    }

    encoder
        .into_inner()
        .map_err(|e| OrbitGifError::Encode(format!("Failed to finish GIF: {e}")))
}

fn decode_all(frames: &mut [Frame]) -> Result<Vec<DynamicImage>, OrbitGifError> {
    frames.iter_mut().map(Frame::decode).collect()
}

fn gif_dimension(value: u32) -> Result<u16, OrbitGifError> {
    match u16::try_from(value) {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(OrbitGifError::Encode(format!(
            "frame dimension {value} is outside the GIF range 1..=65535"
        ))),
    }
}

fn parent_directory(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
