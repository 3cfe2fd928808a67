//! Supported clinical resource kinds

use crate::error::{Error, Result};
use std::fmt;

/// Resource types the form builder knows about.
///
/// Every known kind has a hand-authored fallback table and, for some, a
/// reclassification pass. Anything else is carried as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Patient,
    Encounter,
    Observation,
    MedicationRequest,
    CarePlan,
    Unknown(String),
}

impl ResourceKind {
    /// Map a resource type name onto a kind. Matching is exact and case-sensitive.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidResourceType(name.to_string()));
        }
        Ok(match name {
            "Patient" => ResourceKind::Patient,
            "Encounter" => ResourceKind::Encounter,
            "Observation" => ResourceKind::Observation,
            "MedicationRequest" => ResourceKind::MedicationRequest,
            "CarePlan" => ResourceKind::CarePlan,
            other => ResourceKind::Unknown(other.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            ResourceKind::Patient => "Patient",
            ResourceKind::Encounter => "Encounter",
            ResourceKind::Observation => "Observation",
            ResourceKind::MedicationRequest => "MedicationRequest",
            ResourceKind::CarePlan => "CarePlan",
            ResourceKind::Unknown(name) => name,
        }
    }

    /// File name of the StructureDefinition document for this kind,
    /// e.g. `structure-definition-observation.json`.
    pub fn definition_file_name(&self) -> String {
        format!("structure-definition-{}.json", self.name().to_lowercase())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
