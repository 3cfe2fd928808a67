//! Per-field rendering metadata

use crate::classify::surviving_elements;
use crate::element::ElementType;
use chartform_models::{BindingStrength, ElementDefinition};
use serde::Serialize;

/// Everything a form needs to render one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub path: String,
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    pub required: bool,
    pub repeating: bool,
    pub summary: bool,
    pub cardinality: String,
    pub kind: ElementType,
    pub type_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<FieldBinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBinding {
    pub strength: BindingStrength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<String>,
}

impl FieldDescriptor {
    pub fn from_element(element: &ElementDefinition, kind: ElementType) -> Self {
        let name = element.leaf_name().to_string();
        let label = element
            .short
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| humanize(&name));

        Self {
            path: element.path.clone(),
            label,
            name,
            definition: element.definition.clone(),
            required: element.is_required(),
            repeating: element.is_array(),
            summary: element.is_summary(),
            cardinality: element.cardinality_string(),
            kind,
            type_codes: element.type_codes().into_iter().map(str::to_string).collect(),
            binding: element.binding.as_ref().map(|b| FieldBinding {
                strength: b.strength,
                value_set: b.value_set.clone(),
            }),
            constraints: element
                .constraint_keys()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Describe every element that would appear in a form, in source order
pub fn describe_elements(root: &str, elements: &[ElementDefinition]) -> Vec<FieldDescriptor> {
    surviving_elements(root, elements)
        .into_iter()
        .map(|s| FieldDescriptor::from_element(s.element, s.element_type))
        .collect()
}

/// "admitSource" -> "Admit Source", "value[x]" -> "Value"
pub fn humanize(name: &str) -> String {
    let name = name.strip_suffix("[x]").unwrap_or(name);
    let mut label = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}
