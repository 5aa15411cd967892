//! The ordered orientation sequence driven by the pipeline.
//!
//! [`ViewSequencer::standard`] is the fixed eleven-view sweep every
//! conversion uses. The order is the frame order of the resulting GIF.
//!
//! # Example
//!
//! ```
//! use orbitgif::ViewSequencer;
//!
//! let sequence = ViewSequencer::standard();
//! assert_eq!(sequence.len(), 11);
//!
//! for (index, orientation) in sequence.into_iter().enumerate() {
//!     println!("frame {}: {orientation}", index + 1);
//! }
//! ```

use std::vec::IntoIter;

use crate::orientation::{Axis, Orientation, OrientationCommand, Sign};

/// An ordered, fixed list of [`Orientation`]s.
///
/// Consumed by value: iteration is single-pass and cannot be restarted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSequencer {
    orientations: Vec<Orientation>,
}

impl ViewSequencer {
    /// Build a sequence from explicit orientations. Order is preserved
    /// exactly; nothing is deduplicated.
    pub fn new(orientations: Vec<Orientation>) -> Self {
        Self { orientations }
    }

    /// The standard sweep: zoom to fit, three negative steps, four quarter
    /// turns, then three positive steps.
    pub fn standard() -> Self {
        use OrientationCommand::{BeginRotate, QuarterTurn, Step, ZoomToFit};

        let step = |axis, sign| Orientation::single(Step { axis, sign });
        let quarter = |axis, sign| Orientation::single(QuarterTurn { axis, sign });

        Self::new(vec![
            Orientation::single(ZoomToFit),
            Orientation::new(vec![
                BeginRotate,
                Step {
                    axis: Axis::X,
                    sign: Sign::Minus,
                },
            ]),
            step(Axis::Y, Sign::Minus),
            step(Axis::Z, Sign::Minus),
            quarter(Axis::X, Sign::Minus),
            quarter(Axis::Y, Sign::Minus),
            quarter(Axis::X, Sign::Plus),
            quarter(Axis::Y, Sign::Plus),
            step(Axis::X, Sign::Plus),
            step(Axis::Y, Sign::Plus),
            step(Axis::Z, Sign::Plus),
        ])
    }

    /// Number of orientations (and therefore frames).
    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    /// Returns `true` if there is nothing to capture.
    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }

    /// Borrow the orientations without consuming the sequence.
    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }
}

impl Default for ViewSequencer {
    fn default() -> Self {
        Self::standard()
    }
}

impl IntoIterator for ViewSequencer {
    type Item = Orientation;
    type IntoIter = IntoIter<Orientation>;

    fn into_iter(self) -> Self::IntoIter {
        self.orientations.into_iter()
    }
}
