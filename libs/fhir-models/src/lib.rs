//! FHIR data models for form generation
//!
//! Strongly-typed views of a `StructureDefinition` and its snapshot elements.
//! Only the fields that influence how a resource is laid out as a form are
//! modelled; everything else is kept in the `extensions` map so documents
//! round-trip without loss.
//!
//! # Example
//!
//! ```rust
//! use chartform_models::StructureDefinition;
//! use serde_json::json;
//!
//! let sd: StructureDefinition = serde_json::from_value(json!({
//!     "resourceType": "StructureDefinition",
//!     "type": "Encounter",
//!     "snapshot": {
//!         "element": [
//!             { "path": "Encounter" },
//!             { "path": "Encounter.status", "min": 1, "max": "1", "type": [{ "code": "code" }] }
//!         ]
//!     }
//! }))
//! .unwrap();
//!
//! let elements = sd.snapshot_elements().unwrap();
//! assert_eq!(elements.len(), 2);
//! assert!(elements[1].is_required());
//! ```

pub mod common;

pub use common::*;
