// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use std::path::PathBuf;

/// Id of the service which is selected when no service id is part of the URL path.
pub const DEFAULT_SERVICE_ID: &str = "journey-planner";

/// Configuration object holding all important variables throughout the application.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// HTTP port, serving the explorer page, the service registry under `/config.json` and the
    /// GraphQL proxy. Defaults to 3000.
    pub http_port: u16,

    /// Where the list of GraphQL services gets loaded from at start-up.
    pub services: RegistrySource,

    /// Service which is selected when the URL path does not name any known service.
    ///
    /// The registry is rejected on start-up if it does not contain a service with this id.
    pub default_service_id: String,

    /// Endpoint of the geocoder autocomplete API used by the "Search for ID" dialog.
    pub geocoder_url: String,

    /// Maximum number of results requested from the geocoder.
    pub geocoder_size: u16,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            http_port: 3000,
            services: RegistrySource::File("config.json".into()),
            default_service_id: DEFAULT_SERVICE_ID.into(),
            geocoder_url: "https://api.entur.io/geocoder/v1/autocomplete".into(),
            geocoder_size: 20,
        }
    }
}

/// Location of the service registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// JSON file on the local file system.
    File(PathBuf),

    /// JSON document fetched once via HTTP GET.
    Url(String),
}

impl RegistrySource {
    /// Interprets values starting with `http://` or `https://` as URLs, everything else as a
    /// file path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::File(path) => write!(f, "{}", path.display()),
            RegistrySource::Url(url) => write!(f, "{}", url),
        }
    }
}
