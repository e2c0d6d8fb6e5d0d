pub mod detect;
pub mod error;
pub mod survey_table;

pub use detect::{detect_format, detect_format_in_headers};
pub use error::{IngestError, Result};
pub use survey_table::{SurveyTable, read_survey_table};
