// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;
use std::io;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::RegistrySource;

/// Configuration record identifying one GraphQL backend the explorer can query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    /// Identifier, matched against the URL path.
    pub id: String,

    /// Human-readable name shown in the service menu and footer.
    pub name: String,

    /// GraphQL endpoint URL.
    pub url: String,

    /// Key of the bundled example query set.
    pub queries: String,

    /// Name of the example loaded into the editor when the URL carries no query.
    pub default_query: String,
}

/// Represents all the ways loading the service registry can fail.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// Registry file could not be read from the file system.
    #[error("could not read service registry from '{0}': {1}")]
    Read(String, #[source] io::Error),

    /// Registry could not be fetched via HTTP.
    #[error("could not fetch service registry from '{0}': {1}")]
    Fetch(String, #[source] reqwest::Error),

    /// Registry is not a JSON array of service descriptors.
    #[error("service registry is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Registry is an empty list.
    #[error("service registry does not contain any services")]
    Empty,

    /// A service has an empty id, which would match every path.
    #[error("service registry contains a service with an empty id")]
    EmptyId,

    /// Service ids need to be unique.
    #[error("service id '{0}' appears more than once in service registry")]
    DuplicateId(String),

    /// The fallback service is required to always resolve an active service.
    #[error("default service '{0}' is missing in service registry")]
    MissingDefault(String),
}

/// Ordered list of service descriptors, loaded once at start-up.
///
/// The registry always contains the fallback service, which makes resolving the active service
/// from a URL path a total function.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
    fallback_index: usize,
}

impl ServiceRegistry {
    /// Validates the given descriptors and returns a registry falling back to `fallback_id`.
    pub fn new(
        services: Vec<ServiceDescriptor>,
        fallback_id: &str,
    ) -> Result<Self, RegistryError> {
        if services.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut ids = HashSet::new();
        for service in &services {
            if service.id.is_empty() {
                return Err(RegistryError::EmptyId);
            }

            if !ids.insert(service.id.as_str()) {
                return Err(RegistryError::DuplicateId(service.id.clone()));
            }
        }

        let fallback_index = services
            .iter()
            .position(|service| service.id == fallback_id)
            .ok_or_else(|| RegistryError::MissingDefault(fallback_id.to_string()))?;

        Ok(Self {
            services,
            fallback_index,
        })
    }

    /// Parses a JSON array of service descriptors.
    pub fn from_json(json: &[u8], fallback_id: &str) -> Result<Self, RegistryError> {
        let services: Vec<ServiceDescriptor> = serde_json::from_slice(json)?;
        Self::new(services, fallback_id)
    }

    /// Loads the registry from a local file or with a single GET request.
    pub async fn load(
        source: &RegistrySource,
        client: &reqwest::Client,
        fallback_id: &str,
    ) -> Result<Self, RegistryError> {
        debug!("Load service registry from {}", source);

        let json = match source {
            RegistrySource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|err| RegistryError::Read(path.display().to_string(), err))?,
            RegistrySource::Url(url) => {
                let fetch_err = |err| RegistryError::Fetch(url.clone(), err);

                client
                    .get(url)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(fetch_err)?
                    .bytes()
                    .await
                    .map_err(fetch_err)?
                    .to_vec()
            }
        };

        let registry = Self::from_json(&json, fallback_id)?;
        debug!("Loaded {} services", registry.services.len());

        Ok(registry)
    }

    /// Returns the active service for a URL path.
    ///
    /// This is the first service whose id is contained in the path, otherwise the fallback.
    pub fn resolve(&self, path: &str) -> &ServiceDescriptor {
        self.services
            .iter()
            .find(|service| path.contains(service.id.as_str()))
            .unwrap_or_else(|| self.fallback())
    }

    /// Returns the service with exactly this id.
    pub fn get(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|service| service.id == id)
    }

    /// Service which is selected when no id matches.
    pub fn fallback(&self) -> &ServiceDescriptor {
        &self.services[self.fallback_index]
    }

    /// All services in their configured order.
    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }
}
