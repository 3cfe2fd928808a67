//! Element classification by declared type

use chartform_models::{ElementDefinition, BACKBONE_ELEMENT, REFERENCE};
use serde::Serialize;

/// How an element participates in form layout, parsed once from its type codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "base", rename_all = "camelCase")]
pub enum ElementType {
    /// Nested composite; becomes its own group
    Backbone,
    /// Any single-valued or complex data type rendered as a field
    Primitive,
    /// Reference to another resource
    Reference,
    /// Choice element (`value[x]`), carrying the name without the suffix
    Polymorphic(String),
}

impl ElementType {
    /// Precedence: backbone, then choice suffix, then reference-only, else primitive.
    pub fn of(element: &ElementDefinition) -> Self {
        if element.has_type_code(BACKBONE_ELEMENT) {
            return ElementType::Backbone;
        }
        if element.is_choice_type() {
            let base = element.leaf_name().trim_end_matches("[x]");
            return ElementType::Polymorphic(base.to_string());
        }
        let codes = element.type_codes();
        if !codes.is_empty() && codes.iter().all(|code| *code == REFERENCE) {
            return ElementType::Reference;
        }
        ElementType::Primitive
    }

    pub fn is_backbone(&self) -> bool {
        matches!(self, ElementType::Backbone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backbone_wins_over_everything() {
        let element = ElementDefinition::new("Encounter.hospitalization", &[BACKBONE_ELEMENT]);
        assert_eq!(ElementType::of(&element), ElementType::Backbone);
        assert!(ElementType::of(&element).is_backbone());
    }

    #[test]
    fn choice_elements_keep_their_base_name() {
        let element = ElementDefinition::new("Observation.effective[x]", &["dateTime", "Period"]);
        assert_eq!(
            ElementType::of(&element),
            ElementType::Polymorphic("effective".into())
        );
    }

    #[test]
    fn references_and_primitives() {
        let subject = ElementDefinition::new("Observation.subject", &[REFERENCE]);
        assert_eq!(ElementType::of(&subject), ElementType::Reference);

        let code = ElementDefinition::new("Observation.code", &["CodeableConcept"]);
        assert_eq!(ElementType::of(&code), ElementType::Primitive);

        let untyped = ElementDefinition::new("Observation.component", &[]);
        assert_eq!(ElementType::of(&untyped), ElementType::Primitive);
    }

    #[test]
    fn serializes_as_tagged_variant() {
        let value = serde_json::to_value(ElementType::Polymorphic("value".into())).unwrap();
        assert_eq!(value, serde_json::json!({ "kind": "polymorphic", "base": "value" }));

        let value = serde_json::to_value(ElementType::Backbone).unwrap();
        assert_eq!(value, serde_json::json!({ "kind": "backbone" }));
    }
}
