//! StructureGroupBuilder - definition in, ordered form groups out

use crate::classify::classify_elements;
use crate::customize::{apply_resource_rules, MedicationFieldPolicy};
use crate::error::{Error, FailureKind, Result};
use crate::fallback::fallback_groups;
use crate::fields::{describe_elements, FieldDescriptor};
use crate::group::{finalize, FormGroup};
use crate::resource::ResourceKind;
use crate::source::DefinitionSource;
use chartform_models::StructureDefinition;
use std::sync::Arc;

/// Knobs for grouping behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    pub medication_fields: MedicationFieldPolicy,
}

/// Builds form groups for a resource type from its StructureDefinition.
///
/// Each call fetches the definition once; nothing is cached between calls,
/// so a single builder can serve concurrent requests.
pub struct StructureGroupBuilder {
    source: Arc<dyn DefinitionSource>,
    options: BuilderOptions,
}

impl StructureGroupBuilder {
    pub fn new(source: Arc<dyn DefinitionSource>) -> Self {
        Self {
            source,
            options: BuilderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Groups for `resource_type`, falling back to the static table on any
    /// failure. Never fails and never returns an empty list.
    #[tracing::instrument(name = "build_groups", skip(self))]
    pub async fn build_groups(&self, resource_type: &str) -> Vec<FormGroup> {
        let kind = ResourceKind::parse(resource_type)
            .unwrap_or_else(|_| ResourceKind::Unknown(resource_type.to_string()));

        match self.try_build_groups(resource_type).await {
            Ok(groups) if !groups.is_empty() => groups,
            Ok(_) => {
                tracing::warn!(
                    resource_type = %kind,
                    "StructureDefinition produced no groups, using fallback table"
                );
                fallback_groups(&kind)
            }
            Err(err) => {
                self.log_fallback(&kind, &err);
                fallback_groups(&kind)
            }
        }
    }

    /// Like [`build_groups`](Self::build_groups) but reports load failures
    /// instead of substituting the fallback table.
    pub async fn try_build_groups(&self, resource_type: &str) -> Result<Vec<FormGroup>> {
        let kind = ResourceKind::parse(resource_type)?;
        let definition = self.load_definition(&kind).await?;
        group_definition(&kind, &definition, &self.options)
    }

    /// Rendering metadata for every field a form of `resource_type` shows
    pub async fn describe_fields(&self, resource_type: &str) -> Result<Vec<FieldDescriptor>> {
        let kind = ResourceKind::parse(resource_type)?;
        let definition = self.load_definition(&kind).await?;
        let elements = definition.snapshot_elements()?;
        Ok(describe_elements(&definition.type_, elements))
    }

    async fn load_definition(&self, kind: &ResourceKind) -> Result<StructureDefinition> {
        let definition = self.source.fetch_definition(kind).await?;
        if definition.type_ != kind.name() {
            return Err(Error::Malformed(format!(
                "{} describes {}, expected {}",
                self.source.location(kind),
                definition.type_,
                kind
            )));
        }
        tracing::debug!(
            resource_type = %kind,
            location = %self.source.location(kind),
            "Loaded StructureDefinition"
        );
        Ok(definition)
    }

    fn log_fallback(&self, kind: &ResourceKind, err: &Error) {
        let failure = err.failure_kind();
        let location = self.source.location(kind);
        match failure {
            FailureKind::Unreachable => tracing::error!(
                resource_type = %kind,
                %location,
                %failure,
                error = %err,
                "Failed to fetch StructureDefinition, using fallback table"
            ),
            FailureKind::Malformed | FailureKind::InvalidInput => tracing::warn!(
                resource_type = %kind,
                %location,
                %failure,
                error = %err,
                "Unusable StructureDefinition, using fallback table"
            ),
        }
    }
}

/// Classify a loaded definition, apply the rules for `kind` and drop empty groups.
pub fn group_definition(
    kind: &ResourceKind,
    definition: &StructureDefinition,
    options: &BuilderOptions,
) -> Result<Vec<FormGroup>> {
    let elements = definition.snapshot_elements()?;
    let root = definition.type_.as_str();

    let mut groups = classify_elements(root, elements);
    apply_resource_rules(kind, root, &mut groups, elements, options.medication_fields);
    Ok(finalize(groups))
}
