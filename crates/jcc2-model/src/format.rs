//! Source file classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two known JCC2 export schemas a file matches. Resolved once
/// per file from the header row and fixed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// The user questionnaire export (`user_information.*` sections).
    UserQuestionnaire,
    /// The data collection / interview form export (`basic_info`, `mop_*`).
    DataCollection,
    /// Neither header signature matched; analysis falls back to the
    /// questionnaire strategy but the state stays visible in all outputs.
    Unknown,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::UserQuestionnaire => "user_questionnaire",
            DataFormat::DataCollection => "data_collection",
            DataFormat::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DataFormat::Unknown)
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
