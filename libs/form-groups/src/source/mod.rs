//! Where StructureDefinition documents come from

pub mod filesystem;
pub mod http;

use crate::error::Result;
use crate::resource::ResourceKind;
use async_trait::async_trait;
use chartform_models::StructureDefinition;
use std::sync::Arc;

pub use filesystem::FileSystemDefinitionSource;
pub use http::HttpDefinitionSource;

/// Loads the StructureDefinition for a resource kind.
///
/// Implementations perform exactly one attempt per call and never cache.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn fetch_definition(&self, kind: &ResourceKind) -> Result<StructureDefinition>;

    /// Human-readable location of the document for `kind`, used in logs
    fn location(&self, kind: &ResourceKind) -> String;
}

#[async_trait]
impl<S> DefinitionSource for Arc<S>
where
    S: DefinitionSource + ?Sized,
{
    async fn fetch_definition(&self, kind: &ResourceKind) -> Result<StructureDefinition> {
        (**self).fetch_definition(kind).await
    }

    fn location(&self, kind: &ResourceKind) -> String {
        (**self).location(kind)
    }
}
