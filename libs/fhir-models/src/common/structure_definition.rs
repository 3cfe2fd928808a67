//! FHIR StructureDefinition model

use super::element_definition::{ElementDefinition, Snapshot};
use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// The kind of structure a StructureDefinition describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureDefinitionKind {
    PrimitiveType,
    ComplexType,
    Resource,
    Logical,
}

/// FHIR StructureDefinition
///
/// Only `type` and `snapshot` are needed to lay out a form; the remaining
/// metadata is optional so that trimmed, hand-written definitions load too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructureDefinition {
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Canonical identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<StructureDefinitionKind>,

    /// Type defined or constrained by this structure (e.g. "Observation")
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,

    /// Additional content beyond the modelled fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "StructureDefinition".to_string()
}

impl StructureDefinition {
    /// Parse from JSON Value
    pub fn from_value(value: Value) -> Result<Self> {
        let sd: Self = serde_json::from_value(value)?;
        if sd.resource_type != "StructureDefinition" {
            return Err(Error::InvalidResource(format!(
                "expected resourceType StructureDefinition, got {}",
                sd.resource_type
            )));
        }
        Ok(sd)
    }

    /// Parse from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Elements of the snapshot, failing when the definition carries none
    pub fn snapshot_elements(&self) -> Result<&[ElementDefinition]> {
        self.snapshot
            .as_ref()
            .map(|s| s.element.as_slice())
            .ok_or_else(|| Error::MissingField("snapshot.element".to_string()))
    }
}
