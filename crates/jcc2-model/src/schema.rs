//! Ordered schema index over all successfully parsed columns.

use std::collections::BTreeMap;

use crate::field::{FieldSchema, FieldType};

/// Field schemas in source column order with by-name lookup. Columns whose
/// tag failed to parse are simply absent.
#[derive(Debug, Clone, Default)]
pub struct SurveySchema {
    fields: Vec<FieldSchema>,
    index: BTreeMap<String, usize>,
}

impl SurveySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field; on duplicate column names the first wins.
    pub fn push(&mut self, field: FieldSchema) {
        if self.index.contains_key(&field.name) {
            return;
        }
        self.index.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All fields in source column order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Columns declared as embedded datatables, in column order.
    pub fn datatable_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields
            .iter()
            .filter(|field| field.field_type == FieldType::Datatable)
    }
}

impl FromIterator<FieldSchema> for SurveySchema {
    fn from_iter<I: IntoIterator<Item = FieldSchema>>(iter: I) -> Self {
        let mut schema = SurveySchema::new();
        for field in iter {
            schema.push(field);
        }
        schema
    }
}
