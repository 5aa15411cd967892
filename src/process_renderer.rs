//! A [`Renderer`] backed by an external program.
//!
//! Each capture runs the program once as
//! `program [args...] <model> <output> <command>...`, where the trailing
//! arguments are the [`token`](OrientationCommand::token)s of every command
//! applied so far, oldest first. The program is expected to replay them
//! from its default view, write a raster image to `<output>`, and exit with
//! status 0.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::orientation::OrientationCommand;
use crate::renderer::Renderer;

/// Capture status reported when the program could not be started.
pub const SPAWN_FAILED: i32 = -1;

/// Capture status reported when the program was killed by a signal.
pub const TERMINATED: i32 = -2;

/// Drives an external rendering program, one process per capture.
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    program: PathBuf,
    args: Vec<String>,
    model: PathBuf,
    applied: Vec<OrientationCommand>,
}

impl ProcessRenderer {
    /// Render `model` with `program`.
    pub fn new<P: Into<PathBuf>, M: Into<PathBuf>>(program: P, model: M) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            model: model.into(),
            applied: Vec::new(),
        }
    }

    /// Extra arguments passed before the model path.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Commands applied so far, oldest first.
    pub fn applied(&self) -> &[OrientationCommand] {
        &self.applied
    }

    fn command_for(&self, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(&self.model)
            .arg(output)
            .args(self.applied.iter().map(OrientationCommand::token))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }
}

impl Renderer for ProcessRenderer {
    fn apply_orientation(&mut self, command: &OrientationCommand) {
        self.applied.push(*command);
    }

    fn capture_to_file(&mut self, path: &Path) -> i32 {
        let output = match self.command_for(path).output() {
            Ok(output) => output,
            Err(error) => {
                log::warn!(
                    "Failed to start renderer {}: {error}",
                    self.program.display()
                );
                return SPAWN_FAILED;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!(
                "Renderer {} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim(),
            );
        }

        output.status.code().unwrap_or(TERMINATED)
    }
}
