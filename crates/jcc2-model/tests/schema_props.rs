//! Property tests for the schema-tag parser.

use jcc2_model::{FieldSchema, FieldType};
use proptest::prelude::*;

proptest! {
    /// Arbitrary headers and tags never panic the parser; the worst outcome
    /// is a typed refusal over a numeric attribute value.
    #[test]
    fn parse_is_total(name in ".*", tag in ".*") {
        let _ = FieldSchema::parse(&name, &tag);
    }

    /// Every successful parse carries a concrete type and a field id.
    #[test]
    fn parsed_descriptor_is_populated(name in "[a-z_.]{1,24}", tag in "[a-zA-Z0-9|:,_ ]{0,48}") {
        if let Ok(field) = FieldSchema::parse(&name, &tag) {
            prop_assert!(!field.field_type.as_str().is_empty());
            prop_assert_eq!(field.name, name);
        }
    }

    /// Tags without numeric attributes always succeed.
    #[test]
    fn non_numeric_tags_never_fail(tag in "[a-z|,]{0,32}") {
        let field = FieldSchema::parse("section.field", &tag);
        prop_assert!(field.is_ok());
    }
}

#[test]
fn type_token_fallback_is_text() {
    for tag in ["", "|required", "mystery|optional"] {
        let field = FieldSchema::parse("col", tag).unwrap();
        assert_eq!(field.field_type, FieldType::Text, "tag {tag:?}");
    }
}
