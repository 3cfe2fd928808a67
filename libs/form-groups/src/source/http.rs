//! StructureDefinition documents served over HTTP

use super::DefinitionSource;
use crate::error::{Error, Result};
use crate::resource::ResourceKind;
use async_trait::async_trait;
use chartform_models::StructureDefinition;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `<base_url>/structure-definition-<type>.json`
pub struct HttpDefinitionSource {
    client: Client,
    base_url: String,
}

impl HttpDefinitionSource {
    /// Create a source with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing client (shared connection pool, custom TLS, ...)
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn definition_url(&self, kind: &ResourceKind) -> String {
        format!("{}/{}", self.base_url, kind.definition_file_name())
    }
}

#[async_trait]
impl DefinitionSource for HttpDefinitionSource {
    async fn fetch_definition(&self, kind: &ResourceKind) -> Result<StructureDefinition> {
        let url = self.definition_url(kind);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(StructureDefinition::from_slice(&bytes)?)
    }

    fn location(&self, kind: &ResourceKind) -> String {
        self.definition_url(kind)
    }
}
