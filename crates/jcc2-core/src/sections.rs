//! Grouping columns into sections by their dotted-path prefix.

use std::collections::BTreeMap;

use serde::Serialize;

use jcc2_model::SurveySchema;

/// A named question group: all columns sharing one `section.` prefix, in
/// source column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub columns: Vec<String>,
}

impl Section {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// All sections of a file in first-seen order, plus the bucket of system
/// columns that carry no section prefix. A column sits in exactly one of
/// the two places.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    sections: Vec<Section>,
    by_name: BTreeMap<String, usize>,
    system_columns: Vec<String>,
}

impl SectionIndex {
    /// Builds the index from the typed schema. Sectioning is purely
    /// syntactic; nothing checks that a section name means anything.
    pub fn from_schema(schema: &SurveySchema) -> Self {
        let mut index = SectionIndex::default();
        for field in schema.fields() {
            match &field.section {
                Some(section) => index.push_column(section, &field.name),
                None => index.system_columns.push(field.name.clone()),
            }
        }
        index
    }

    fn push_column(&mut self, section: &str, column: &str) {
        let position = match self.by_name.get(section) {
            Some(&position) => position,
            None => {
                self.by_name.insert(section.to_string(), self.sections.len());
                self.sections.push(Section {
                    name: section.to_string(),
                    columns: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        self.sections[position].columns.push(column.to_string());
    }

    /// Sections in the order their first column appeared.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.by_name.get(name).map(|&position| &self.sections[position])
    }

    pub fn system_columns(&self) -> &[String] {
        &self.system_columns
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcc2_model::FieldSchema;

    fn schema_of(columns: &[&str]) -> SurveySchema {
        columns
            .iter()
            .map(|name| FieldSchema::parse(name, "text").unwrap())
            .collect()
    }

    #[test]
    fn groups_by_prefix_in_first_seen_order() {
        let schema = schema_of(&[
            "mop_1_1.task_outcome",
            "basic_info.date",
            "mop_1_1.notes",
            "submission_id",
        ]);
        let index = SectionIndex::from_schema(&schema);

        let names: Vec<_> = index.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["mop_1_1", "basic_info"]);
        assert_eq!(
            index.get("mop_1_1").unwrap().columns,
            vec!["mop_1_1.task_outcome", "mop_1_1.notes"]
        );
        assert_eq!(index.system_columns(), ["submission_id"]);
    }

    #[test]
    fn dotless_and_empty_prefix_columns_are_system() {
        let schema = schema_of(&["submission_id", ".orphan"]);
        let index = SectionIndex::from_schema(&schema);
        assert!(index.is_empty());
        assert_eq!(index.system_columns().len(), 2);
    }
}
