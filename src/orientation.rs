//! Camera orientation commands.
//!
//! An [`OrientationCommand`] is one operation on the renderer's camera state.
//! An [`Orientation`] groups the commands applied in order before a single
//! capture.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A model-space axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// Rotation direction around an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }

    fn word(self) -> &'static str {
        match self {
            Sign::Plus => "plus",
            Sign::Minus => "minus",
        }
    }
}

/// A single operation applied to the renderer's current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationCommand {
    /// Fit the whole model into the viewport.
    ZoomToFit,
    /// Switch the renderer into its view-rotation mode.
    BeginRotate,
    /// Rotate by the renderer's configured increment.
    Step { axis: Axis, sign: Sign },
    /// Rotate by exactly 90 degrees.
    QuarterTurn { axis: Axis, sign: Sign },
}

impl OrientationCommand {
    /// Stable, whitespace-free name used when passing commands to external
    /// programs (see [`ProcessRenderer`](crate::ProcessRenderer)).
    ///
    /// ```
    /// use orbitgif::{Axis, OrientationCommand, Sign};
    ///
    /// let command = OrientationCommand::QuarterTurn { axis: Axis::Y, sign: Sign::Minus };
    /// assert_eq!(command.token(), "quarter-turn-minus-y");
    /// ```
    pub fn token(&self) -> String {
        match self {
            OrientationCommand::ZoomToFit => "zoom-to-fit".to_string(),
            OrientationCommand::BeginRotate => "begin-rotate".to_string(),
            OrientationCommand::Step { axis, sign } => {
                format!("step-{}-{}", sign.word(), axis.letter())
            }
            OrientationCommand::QuarterTurn { axis, sign } => {
                format!("quarter-turn-{}-{}", sign.word(), axis.letter())
            }
        }
    }
}

impl Display for OrientationCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrientationCommand::ZoomToFit => write!(f, "zoom to fit"),
            OrientationCommand::BeginRotate => write!(f, "begin rotate"),
            OrientationCommand::Step { axis, sign } => write!(
                f,
                "step {}{}",
                sign.symbol(),
                axis.letter().to_ascii_uppercase()
            ),
            OrientationCommand::QuarterTurn { axis, sign } => write!(
                f,
                "quarter turn {}{}",
                sign.symbol(),
                axis.letter().to_ascii_uppercase()
            ),
        }
    }
}

/// One capture position: the commands applied, in order, before a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orientation {
    commands: Vec<OrientationCommand>,
}

impl Orientation {
    /// Create an orientation from an ordered command list.
    pub fn new(commands: Vec<OrientationCommand>) -> Self {
        Self { commands }
    }

    /// An orientation reached by a single command.
    pub fn single(command: OrientationCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }

    /// The commands, in application order.
    pub fn commands(&self) -> &[OrientationCommand] {
        &self.commands
    }
}

impl From<OrientationCommand> for Orientation {
    fn from(command: OrientationCommand) -> Self {
        Self::single(command)
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.commands.is_empty() {
            return write!(f, "current view");
        }
        for (position, command) in self.commands.iter().enumerate() {
            if position > 0 {
                write!(f, ", then ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
