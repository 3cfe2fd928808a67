//! Form group records

use serde::{Deserialize, Serialize};

pub const OVERVIEW_ID: &str = "overview";
pub const OVERVIEW_TITLE: &str = "Overview";
pub const OTHER_ID: &str = "other";
pub const OTHER_TITLE: &str = "Other Information";

/// A labelled section of a resource form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormGroup {
    pub id: String,
    pub title: String,
    /// Field names (leaf path segments) in StructureDefinition order
    pub elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormGroup {
    pub fn contains(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e == name)
    }
}

/// A field placed in a group, remembering which element it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupField {
    pub path: String,
    pub name: String,
}

impl GroupField {
    pub fn from_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: chartform_models::leaf_segment(path).to_string(),
        }
    }
}

/// Working form of a group while classification and reclassification run.
///
/// Unlike [`FormGroup`] it keeps full element paths, so a field can be
/// traced back to exactly one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftGroup {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<GroupField>,
}

impl DraftGroup {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<GroupField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Remove every field called `name`, returning what was removed
    pub fn take(&mut self, name: &str) -> Vec<GroupField> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.fields)
            .into_iter()
            .partition(|f| f.name == name);
        self.fields = kept;
        taken
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_form_group(self) -> FormGroup {
        FormGroup {
            id: self.id,
            title: self.title,
            elements: self.fields.into_iter().map(|f| f.name).collect(),
            description: self.description,
        }
    }
}

/// Upper-case the first character: "hospitalization" -> "Hospitalization"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title of the group created for a backbone element
pub fn backbone_title(leaf: &str) -> String {
    format!("{} Details", capitalize(leaf))
}

/// Drop empty groups and strip element paths
pub fn finalize(groups: Vec<DraftGroup>) -> Vec<FormGroup> {
    groups
        .into_iter()
        .filter(|g| !g.is_empty())
        .map(DraftGroup::into_form_group)
        .collect()
}
