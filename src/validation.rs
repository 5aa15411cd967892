//! Input and output path validation.
//!
//! [`validate_request`] inspects a model path and a destination path before
//! any renderer is started and returns a [`ValidationReport`]. The pipeline
//! re-checks the pieces it depends on with [`validate_destination`] and
//! [`validate_working_directory`].
//!
//! # Example
//!
//! ```no_run
//! let report = orbitgif::validate_request("bracket.SLDPRT", "out/bracket.gif");
//! if !report.is_valid() {
//!     eprint!("{report}");
//! }
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::Path;

use crate::error::OrbitGifError;

/// Kind of model document a renderer is asked to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// A single part (`.sldprt`).
    Part,
    /// An assembly of parts (`.sldasm`).
    Assembly,
}

impl DocumentType {
    /// Infer the document type from a file extension, ignoring case.
    ///
    /// ```
    /// use orbitgif::DocumentType;
    ///
    /// assert_eq!(DocumentType::from_path("a/b.SldPrt"), Some(DocumentType::Part));
    /// assert_eq!(DocumentType::from_path("a/b.step"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "sldprt" => Some(DocumentType::Part),
            "sldasm" => Some(DocumentType::Assembly),
            _ => None,
        }
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentType::Part => write!(f, "part"),
            DocumentType::Assembly => write!(f, "assembly"),
        }
    }
}

/// Summary of request validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Detected document type, if the model path was recognised.
    pub document_type: Option<DocumentType>,
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Fatal issues that will prevent conversion.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        Ok(())
    }
}

/// Check a model path and a destination path before conversion.
pub fn validate_request<M: AsRef<Path>, D: AsRef<Path>>(
    model: M,
    destination: D,
) -> ValidationReport {
    let model = model.as_ref();
    let destination = destination.as_ref();
    let mut report = ValidationReport::default();

    if !model.is_file() {
        report
            .errors
            .push(format!("{} doesn't exist", model.display()));
    }

    match DocumentType::from_path(model) {
        Some(document_type) => {
            report.document_type = Some(document_type);
            report
                .info
                .push(format!("Model: {} ({document_type})", model.display()));
        }
        None => report
            .errors
            .push("Only .sldprt and .sldasm models are supported".to_string()),
    }

    if let Err(error) = validate_destination(destination) {
        report.errors.push(error.to_string());
    } else {
        report
            .info
            .push(format!("Destination: {}", destination.display()));
    }

    report
}

/// Require a `.gif` extension (any case) on the destination.
pub fn validate_destination<P: AsRef<Path>>(destination: P) -> Result<(), OrbitGifError> {
    let destination = destination.as_ref();
    let is_gif = destination
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("gif"));
    if !is_gif {
        return Err(OrbitGifError::validation(
            destination,
            "destination must have a .gif extension",
        ));
    }
    Ok(())
}

/// Require `directory` to exist and be a directory.
pub fn validate_working_directory<P: AsRef<Path>>(directory: P) -> Result<(), OrbitGifError> {
    let directory = directory.as_ref();
    if !directory.is_dir() {
        return Err(OrbitGifError::validation(
            directory,
            "working directory does not exist",
        ));
    }
    Ok(())
}

/// Create the destination's parent directory if it is missing.
///
/// This is a setup step for callers; the pipeline itself never creates
/// directories and fails if the destination directory is absent.
pub fn ensure_destination_directory<P: AsRef<Path>>(destination: P) -> Result<(), OrbitGifError> {
    match destination.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            log::debug!("Creating destination directory {}", parent.display());
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}
