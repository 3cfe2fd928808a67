//! StructureDefinition documents stored in a local directory

use super::DefinitionSource;
use crate::error::{Error, Result};
use crate::resource::ResourceKind;
use async_trait::async_trait;
use chartform_models::StructureDefinition;
use std::path::PathBuf;

/// Reads `<dir>/structure-definition-<type>.json`
#[derive(Debug, Clone)]
pub struct FileSystemDefinitionSource {
    dir: PathBuf,
}

impl FileSystemDefinitionSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn definition_path(&self, kind: &ResourceKind) -> PathBuf {
        self.dir.join(kind.definition_file_name())
    }
}

#[async_trait]
impl DefinitionSource for FileSystemDefinitionSource {
    async fn fetch_definition(&self, kind: &ResourceKind) -> Result<StructureDefinition> {
        let path = self.definition_path(kind);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| Error::Io { path, source })?;
        Ok(StructureDefinition::from_slice(&bytes)?)
    }

    fn location(&self, kind: &ResourceKind) -> String {
        self.definition_path(kind).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_path_is_derived_from_lowercased_type() {
        let source = FileSystemDefinitionSource::new("/srv/definitions");
        assert_eq!(
            source.definition_path(&ResourceKind::MedicationRequest),
            PathBuf::from("/srv/definitions/structure-definition-medicationrequest.json")
        );
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = FileSystemDefinitionSource::new(std::env::temp_dir().join("chartform-none"));
        let err = source
            .fetch_definition(&ResourceKind::Encounter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
