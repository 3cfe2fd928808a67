//! Form groups from FHIR StructureDefinitions
//!
//! Turns the snapshot of a resource's StructureDefinition into an ordered list
//! of labelled field groups for a data-entry form: an Overview of the direct
//! children, one group per backbone element, and a catch-all
//! "Other Information". A few resource types get extra reclassification
//! (Observation components, CarePlan activities, MedicationRequest medication
//! fields). When the definition cannot be loaded a hand-authored table is
//! returned instead, so building groups never fails.
//!
//! # Example
//!
//! ```rust,no_run
//! use chartform_groups::{HttpDefinitionSource, StructureGroupBuilder};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpDefinitionSource::new("https://fhir.example.org/definitions")?;
//! let builder = StructureGroupBuilder::new(Arc::new(source));
//!
//! for group in builder.build_groups("Encounter").await {
//!     println!("{}: {:?}", group.title, group.elements);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod classify;
pub mod customize;
pub mod element;
pub mod error;
pub mod fallback;
pub mod fields;
pub mod group;
pub mod resource;
pub mod source;

pub use builder::{group_definition, BuilderOptions, StructureGroupBuilder};
pub use customize::MedicationFieldPolicy;
pub use element::ElementType;
pub use error::{Error, FailureKind, Result};
pub use fallback::fallback_groups;
pub use fields::{FieldBinding, FieldDescriptor};
pub use group::{DraftGroup, FormGroup, GroupField};
pub use resource::ResourceKind;
pub use source::{DefinitionSource, FileSystemDefinitionSource, HttpDefinitionSource};

// Re-export model types for convenience
pub use chartform_models::{ElementDefinition, StructureDefinition};
