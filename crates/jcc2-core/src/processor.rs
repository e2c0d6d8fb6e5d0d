//! Loads a survey export end to end: format detection, schema row parsing,
//! sectioning and cell coercion, collected behind one handle.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use jcc2_ingest::{SurveyTable, detect_format_in_headers, read_survey_table};
use jcc2_model::{DataFormat, Dataset, FieldSchema, SurveySchema};

use crate::coerce::coerce_table;
use crate::context::{LoadWarning, ProcessContext};
use crate::sections::SectionIndex;

/// A fully loaded survey: the typed dataset plus everything derived from the
/// schema row. Loading never fails on bad cells or bad schema tags; those
/// downgrade to warnings kept on the processor.
#[derive(Debug)]
pub struct SurveyProcessor {
    source: PathBuf,
    format: DataFormat,
    schema: SurveySchema,
    sections: SectionIndex,
    dataset: Dataset,
    context: ProcessContext,
}

impl SurveyProcessor {
    /// Reads and types a survey csv from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let span = info_span!("load_survey", file = %path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let table = read_survey_table(path)
            .with_context(|| format!("load survey {}", path.display()))?;
        let format = detect_format_in_headers(&table.headers);
        if !format.is_known() {
            warn!(file = %path.display(), "unrecognized data format, header row matches no known layout");
        }

        let mut processor = Self::from_table(&table, format);
        processor.source = path.to_path_buf();

        info!(
            format = format.as_str(),
            rows = processor.dataset.row_count(),
            columns = processor.dataset.column_count(),
            sections = processor.sections.len(),
            typed_columns = processor.schema.len(),
            warnings = processor.context.warning_count(),
            duration_ms = start.elapsed().as_millis(),
            "survey loaded"
        );
        Ok(processor)
    }

    /// Builds a processor from an already read table. The source path is
    /// empty; [`SurveyProcessor::open`] fills it in.
    pub fn from_table(table: &SurveyTable, format: DataFormat) -> Self {
        let mut context = ProcessContext::new();
        let schema = build_survey_schema(table, &mut context);
        let sections = SectionIndex::from_schema(&schema);
        let dataset = coerce_table(table, &schema, &mut context);

        Self {
            source: PathBuf::new(),
            format,
            schema,
            sections,
            dataset,
            context,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    pub fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    pub fn sections(&self) -> &SectionIndex {
        &self.sections
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        self.context.warnings()
    }
}

/// Parses the schema row into per-column descriptors. Columns whose tag cell
/// is empty carry no schema at all and stay untyped; a tag that fails to
/// parse drops its column from the schema with a warning.
pub fn build_survey_schema(table: &SurveyTable, context: &mut ProcessContext) -> SurveySchema {
    let mut schema = SurveySchema::new();
    for (header, tag) in table.headers.iter().zip(&table.schema_tags) {
        if tag.is_empty() {
            debug!(column = %header, "no schema tag, column stays untyped");
            continue;
        }
        match FieldSchema::parse(header, tag) {
            Ok(field) => schema.push(field),
            Err(error) => {
                context.warn_column(header, format!("schema tag rejected: {error}"));
            }
        }
    }
    schema
}
