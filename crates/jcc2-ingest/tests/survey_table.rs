use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use jcc2_ingest::{IngestError, read_survey_table};

fn survey_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("survey.csv");
    fs::write(&path, contents).expect("write survey file");
    path
}

#[test]
fn splits_header_schema_and_data_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = survey_file(
        &dir,
        "submission_id,mop_1_1.task_performance\nidentifier,radio|options:Yes,No\nabc-1,Yes\nabc-2,No\n",
    );

    let table = read_survey_table(&path).expect("read survey");
    assert_eq!(table.headers, vec!["submission_id", "mop_1_1.task_performance"]);
    // Unquoted comma in the tag spills into a third field; the tag row is
    // padded/truncated to the header width like any other record.
    assert_eq!(table.schema_tags.len(), 2);
    assert_eq!(table.schema_tags[0], "identifier");
    assert_eq!(table.rows, vec![vec!["abc-1", "Yes"], vec!["abc-2", "No"]]);
}

#[test]
fn quoted_schema_tags_keep_their_commas() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = survey_file(
        &dir,
        "a,b\ntext,\"radio|required|options:Yes,No\"\n,\n",
    );

    let table = read_survey_table(&path).expect("read survey");
    assert_eq!(table.schema_tags[1], "radio|required|options:Yes,No");
    assert_eq!(table.rows, vec![vec!["", ""]]);
}

#[test]
fn short_data_rows_are_padded() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = survey_file(&dir, "a,b,c\ntext,text,text\nonly-a\n");

    let table = read_survey_table(&path).expect("read survey");
    assert_eq!(table.rows[0], vec!["only-a", "", ""]);
}

#[test]
fn multiline_quoted_cells_stay_one_row() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = survey_file(
        &dir,
        "a,b\ntext,datatable\nfirst,\"{\"\"columns\"\": [],\n\"\"rows\"\": []}\"\n",
    );

    let table = read_survey_table(&path).expect("read survey");
    assert_eq!(table.row_count(), 1);
    assert!(table.rows[0][1].contains("\"rows\""));
}

#[test]
fn bom_is_stripped_from_first_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = survey_file(&dir, "\u{feff}submission_id,a\nidentifier,text\nx,y\n");

    let table = read_survey_table(&path).expect("read survey");
    assert_eq!(table.headers[0], "submission_id");
}

#[test]
fn data_cells_are_kept_verbatim() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = survey_file(&dir, "id,a\nidentifier,text\n\"  spaced  \",x\n");

    let table = read_survey_table(&path).expect("read survey");
    assert_eq!(table.rows[0][0], "  spaced  ");
}

#[test]
fn fewer_than_two_rows_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");

    let headers_only = survey_file(&dir, "a,b\n");
    match read_survey_table(&headers_only) {
        Err(IngestError::MissingSchemaRow { rows, .. }) => assert_eq!(rows, 1),
        other => panic!("expected missing schema row, got {other:?}"),
    }

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "").expect("write empty file");
    match read_survey_table(&empty) {
        Err(IngestError::MissingSchemaRow { rows, .. }) => assert_eq!(rows, 0),
        other => panic!("expected missing schema row, got {other:?}"),
    }
}

#[test]
fn unreadable_file_reports_read_error() {
    let missing = PathBuf::from("/nonexistent/survey.csv");
    assert!(matches!(
        read_survey_table(&missing),
        Err(IngestError::Read { .. })
    ));
}
