// SPDX-License-Identifier: AGPL-3.0-or-later

use std::ops::Deref;
use std::sync::Arc;

use crate::config::Configuration;
use crate::fetcher::GraphQLFetcher;
use crate::geocoder::GeocoderClient;
use crate::registry::{ServiceDescriptor, ServiceRegistry};

/// Inner data shared across all requests.
#[derive(Debug)]
pub struct Data {
    /// Explorer configuration.
    pub config: Configuration,

    /// GraphQL services, loaded once at start-up.
    pub registry: ServiceRegistry,

    /// HTTP client shared by the fetcher and the geocoder.
    pub client: reqwest::Client,

    /// Geocoder used by the "Search for ID" dialog.
    pub geocoder: GeocoderClient,
}

impl Data {
    pub fn new(config: Configuration, registry: ServiceRegistry, client: reqwest::Client) -> Self {
        let geocoder = GeocoderClient::new(
            client.clone(),
            config.geocoder_url.clone(),
            config.geocoder_size,
        );

        Self {
            config,
            registry,
            client,
            geocoder,
        }
    }

    /// Returns a fetcher for the endpoint of the given service.
    pub fn fetcher(&self, service: &ServiceDescriptor) -> GraphQLFetcher {
        GraphQLFetcher::new(self.client.clone(), service.url.clone())
    }
}

/// Data shared across all requests.
#[derive(Debug, Clone)]
pub struct Context(pub Arc<Data>);

impl Context {
    /// Returns a new instance of `Context`.
    pub fn new(config: Configuration, registry: ServiceRegistry, client: reqwest::Client) -> Self {
        Self(Arc::new(Data::new(config, registry, client)))
    }
}

impl Deref for Context {
    type Target = Data;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
