use std::path::PathBuf;

use jcc2_core::SurveyProcessor;
use jcc2_model::{DataFormat, ValidationError};

/// Everything the `process` command produced. The loaded survey rides along
/// so rendering never reloads the file.
#[derive(Debug)]
pub struct ProcessResult {
    pub survey: SurveyProcessor,
    pub errors: Vec<ValidationError>,
    /// Where the JSON summary landed, when an output directory was given.
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct DetectResult {
    pub path: PathBuf,
    pub format: DataFormat,
}
