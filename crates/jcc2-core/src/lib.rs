pub mod coerce;
pub mod context;
pub mod datatable;
pub mod datetime;
pub mod processor;
pub mod sections;

pub use coerce::{MULTI_VALUE_SEPARATOR, coerce_table};
pub use context::{LoadWarning, ProcessContext};
pub use datatable::{
    DatatableColumnSummary, DatatableSummary, decode_datatable, encode_datatable,
    summarize_datatable_column,
};
pub use datetime::{parse_date_value, parse_datetime_value};
pub use processor::{SurveyProcessor, build_survey_schema};
pub use sections::{Section, SectionIndex};
