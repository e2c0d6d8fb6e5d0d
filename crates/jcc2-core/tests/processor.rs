use std::fs;
use std::path::Path;

use tempfile::tempdir;

use jcc2_core::SurveyProcessor;
use jcc2_model::{CellValue, DataFormat, FieldType};

fn write_survey(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

const QUESTIONNAIRE: &str = concat!(
    "event,user_information.name,user_information.rating,user_information.apps,user_information.usage\n",
    "identifier,text|required,\"number|min:1|max:5\",\"checkbox|multiple|options:A,B,C\",datatable\n",
    "E1,Alice,4,A; B,\"{\"\"columns\"\":[{\"\"id\"\":\"\"app\"\",\"\"type\"\":\"\"text\"\",\"\"label\"\":\"\"Application\"\"}],\"\"rows\"\":[{\"\"app\"\":\"\"one\"\"},{\"\"app\"\":\"\"two\"\"}]}\"\n",
    "E2,,bad,,\n",
);

#[test]
fn loads_and_types_a_questionnaire_export() {
    let dir = tempdir().expect("tempdir");
    let path = write_survey(dir.path(), "survey.csv", QUESTIONNAIRE);

    let processor = SurveyProcessor::open(&path).expect("open survey");
    assert_eq!(processor.format(), DataFormat::UserQuestionnaire);
    assert_eq!(processor.source(), path);
    assert_eq!(processor.schema().len(), 5);
    assert!(processor.warnings().is_empty());

    let sections = processor.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections.get("user_information").unwrap().column_count(), 4);
    assert_eq!(sections.system_columns(), ["event"]);

    let dataset = processor.dataset();
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.value(0, "event").unwrap().as_str(), Some("E1"));
    assert_eq!(
        dataset.value(0, "user_information.rating"),
        Some(&CellValue::Number(4.0))
    );
    assert_eq!(
        dataset.value(0, "user_information.apps").unwrap().as_multi().unwrap(),
        ["A", "B"]
    );
    let table = dataset
        .value(0, "user_information.usage")
        .unwrap()
        .as_table()
        .expect("datatable cell");
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("app").unwrap().label, "Application");

    // second row: the unparsable number nulls out, the empty multi-select
    // stays an empty selection, the empty datatable cell is null
    assert_eq!(dataset.value(1, "user_information.rating"), Some(&CellValue::Null));
    assert_eq!(
        dataset.value(1, "user_information.apps").unwrap().as_multi().unwrap(),
        [""; 0]
    );
    assert_eq!(dataset.value(1, "user_information.usage"), Some(&CellValue::Null));
    assert_eq!(dataset.value(1, "user_information.name"), Some(&CellValue::Null));
}

#[test]
fn schema_bounds_survive_the_load() {
    let dir = tempdir().expect("tempdir");
    let path = write_survey(dir.path(), "survey.csv", QUESTIONNAIRE);

    let processor = SurveyProcessor::open(&path).expect("open survey");
    let rating = processor.schema().get("user_information.rating").expect("rating field");
    assert_eq!(rating.field_type, FieldType::Number);
    assert_eq!(rating.min_value, Some(1.0));
    assert_eq!(rating.max_value, Some(5.0));
    assert_eq!(rating.section.as_deref(), Some("user_information"));
}

#[test]
fn broken_datatable_cells_surface_as_warnings() {
    let dir = tempdir().expect("tempdir");
    let path = write_survey(
        dir.path(),
        "survey.csv",
        concat!(
            "basic_info.name,mop_1_1.usage\n",
            "text,datatable\n",
            "Bob,not-json\n",
        ),
    );

    let processor = SurveyProcessor::open(&path).expect("open survey");
    assert_eq!(processor.format(), DataFormat::DataCollection);
    assert_eq!(processor.warnings().len(), 1);
    assert_eq!(processor.warnings()[0].column.as_deref(), Some("mop_1_1.usage"));
    assert_eq!(
        processor.dataset().value(0, "mop_1_1.usage"),
        Some(&CellValue::Null)
    );
}

#[test]
fn header_only_files_refuse_to_load() {
    let dir = tempdir().expect("tempdir");
    let path = write_survey(dir.path(), "short.csv", "a,b\n");

    let error = SurveyProcessor::open(&path).expect_err("missing schema row");
    let chain = format!("{error:#}");
    assert!(chain.contains("expected a header row and a schema row"), "{chain}");
}

#[test]
fn unmatched_headers_load_as_unknown_format() {
    let dir = tempdir().expect("tempdir");
    let path = write_survey(
        dir.path(),
        "misc.csv",
        "alpha,beta\ntext,number\nx,1\n",
    );

    let processor = SurveyProcessor::open(&path).expect("open survey");
    assert_eq!(processor.format(), DataFormat::Unknown);
    assert!(!processor.format().is_known());
    // data still loads and types under the unknown format
    assert_eq!(processor.dataset().value(0, "beta"), Some(&CellValue::Number(1.0)));
}
