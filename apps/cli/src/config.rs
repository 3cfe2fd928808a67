//! Configuration for the chartform CLI
//!
//! Layered: built-in defaults, then an optional `chartform.toml` (or the file
//! given with `--config`), then `CHARTFORM__*` environment variables, then
//! command-line flags.

use anyhow::Context;
use chartform_groups::{
    BuilderOptions, DefinitionSource, FileSystemDefinitionSource, HttpDefinitionSource,
    MedicationFieldPolicy,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub logging: LoggingConfig,
    pub grouping: GroupingConfig,
}

/// Where StructureDefinitions are read from. `dir` wins over `base_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupingConfig {
    /// List only the medication fields a definition declares
    pub strict_medication: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("chartform").required(false),
        };

        let config = config::Config::builder()
            .set_default("source.timeout_seconds", 30)?
            .set_default("logging.level", "warn")?
            .set_default("logging.json", false)?
            .set_default("grouping.strict_medication", false)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("CHARTFORM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn validate(&self) -> Result<(), String> {
        match (&self.source.dir, &self.source.base_url) {
            (None, None) => {
                return Err("either source.base_url or source.dir must be set".into());
            }
            (None, Some(url)) if url.trim().is_empty() => {
                return Err("source.base_url cannot be empty".into());
            }
            _ => {}
        }
        if self.source.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be greater than zero".into());
        }
        if self.logging.level.trim().is_empty() {
            return Err("logging.level cannot be empty".into());
        }
        Ok(())
    }
}

impl SourceConfig {
    pub fn build(&self) -> anyhow::Result<Arc<dyn DefinitionSource>> {
        if let Some(dir) = &self.dir {
            return Ok(Arc::new(FileSystemDefinitionSource::new(dir.clone())));
        }

        let base_url = self
            .base_url
            .as_deref()
            .context("No StructureDefinition source configured")?;
        let source = HttpDefinitionSource::with_timeout(
            base_url,
            Duration::from_secs(self.timeout_seconds),
        )
        .context("Failed to create HTTP client")?;
        Ok(Arc::new(source))
    }
}

impl GroupingConfig {
    pub fn options(&self) -> BuilderOptions {
        BuilderOptions {
            medication_fields: if self.strict_medication {
                MedicationFieldPolicy::PresentOnly
            } else {
                MedicationFieldPolicy::Canonical
            },
        }
    }
}
