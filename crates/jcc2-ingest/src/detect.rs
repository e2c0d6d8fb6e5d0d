//! Header-only format detection.
//!
//! Classification never looks at the schema row or data: the two export
//! schemas are told apart purely by header signatures, so one record read
//! is enough.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use jcc2_model::DataFormat;

use crate::survey_table::normalize_header;

/// Classifies a header set. Priority: any `user_information` header wins,
/// then `basic_info`/`mop*` headers, otherwise unknown.
pub fn detect_format_in_headers<S: AsRef<str>>(headers: &[S]) -> DataFormat {
    if headers
        .iter()
        .any(|header| header.as_ref().contains("user_information"))
    {
        return DataFormat::UserQuestionnaire;
    }
    if headers.iter().any(|header| {
        let header = header.as_ref();
        header.contains("basic_info") || header.starts_with("mop")
    }) {
        return DataFormat::DataCollection;
    }
    DataFormat::Unknown
}

/// Reads only the first record of `path` and classifies it. Unreadable and
/// empty files classify as unknown rather than failing; the full read that
/// follows detection reports those properly.
pub fn detect_format(path: &Path) -> DataFormat {
    let mut reader = match ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(error) => {
            warn!(path = %path.display(), %error, "format detection could not open file");
            return DataFormat::Unknown;
        }
    };

    let format = match reader.records().next() {
        Some(Ok(record)) => {
            let headers: Vec<String> = record.iter().map(normalize_header).collect();
            detect_format_in_headers(&headers)
        }
        Some(Err(error)) => {
            warn!(path = %path.display(), %error, "format detection could not read header row");
            DataFormat::Unknown
        }
        None => DataFormat::Unknown,
    };

    debug!(path = %path.display(), %format, "detected format");
    format
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_information_takes_priority() {
        let headers = ["user_information.name", "mop_1_1.task_performance"];
        assert_eq!(
            detect_format_in_headers(&headers),
            DataFormat::UserQuestionnaire
        );
    }

    #[test]
    fn mop_prefix_or_basic_info_means_data_collection() {
        assert_eq!(
            detect_format_in_headers(&["mop_1_1.task_performance"]),
            DataFormat::DataCollection
        );
        assert_eq!(
            detect_format_in_headers(&["basic_info.date", "other"]),
            DataFormat::DataCollection
        );
        // `mop` must lead the header, not merely appear in it
        assert_eq!(
            detect_format_in_headers(&["section.mop_notes"]),
            DataFormat::Unknown
        );
    }

    #[test]
    fn unmatched_headers_are_unknown() {
        assert_eq!(
            detect_format_in_headers(&["submission_id", "notes"]),
            DataFormat::Unknown
        );
        assert_eq!(detect_format_in_headers::<&str>(&[]), DataFormat::Unknown);
    }
}
