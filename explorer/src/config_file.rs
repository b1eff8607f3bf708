// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::TryFrom;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{Configuration, RegistrySource, DEFAULT_SERVICE_ID};

const DEFAULT_LOG_LEVEL: &str = "off";

const DEFAULT_HTTP_PORT: u16 = 3000;

const DEFAULT_SERVICES: &str = "config.json";

const DEFAULT_GEOCODER_URL: &str = "https://api.entur.io/geocoder/v1/autocomplete";

const DEFAULT_GEOCODER_SIZE: u16 = 20;

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

fn default_services() -> String {
    DEFAULT_SERVICES.to_string()
}

fn default_service_id() -> String {
    DEFAULT_SERVICE_ID.to_string()
}

fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}

fn default_geocoder_size() -> u16 {
    DEFAULT_GEOCODER_SIZE
}

/// Explorer configuration which can be de/serialized from a config file.
///
/// Values are not checked yet, use `Configuration::try_from` to convert it into the
/// configuration the explorer runs with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Set log verbosity. Possible log levels are: ERROR, WARN, INFO, DEBUG, TRACE. They are
    /// scoped to "explorer" by default.
    ///
    /// If you want to adjust the scope for deeper inspection use a filter value, for example
    /// "=TRACE" for logging _everything_ or "explorer=INFO,hyper=DEBUG" etc.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP port serving the explorer. Defaults to 3000.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Path or http(s) URL of the JSON document listing all GraphQL services. Defaults to
    /// "config.json" in the current directory.
    #[serde(default = "default_services")]
    pub services: String,

    /// Id of the service selected when the URL path does not name one. Defaults to
    /// "journey-planner".
    #[serde(default = "default_service_id")]
    pub default_service_id: String,

    /// Geocoder autocomplete endpoint used to search for entity ids.
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,

    /// Maximum number of geocoder results. Defaults to 20.
    #[serde(default = "default_geocoder_size")]
    pub geocoder_size: u16,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            http_port: default_http_port(),
            services: default_services(),
            default_service_id: default_service_id(),
            geocoder_url: default_geocoder_url(),
            geocoder_size: default_geocoder_size(),
        }
    }
}

impl TryFrom<ConfigFile> for Configuration {
    type Error = anyhow::Error;

    fn try_from(value: ConfigFile) -> Result<Self, Self::Error> {
        if value.services.trim().is_empty() {
            bail!("'services' needs to point at a file or URL");
        }

        if value.default_service_id.trim().is_empty() {
            bail!("'default_service_id' can not be empty");
        }

        Url::parse(&value.geocoder_url)
            .map_err(|err| anyhow!("Invalid 'geocoder_url' '{}': {err}", value.geocoder_url))?;

        if value.geocoder_size == 0 {
            bail!("'geocoder_size' needs to be larger than zero");
        }

        Ok(Configuration {
            http_port: value.http_port,
            services: RegistrySource::parse(value.services.trim()),
            default_service_id: value.default_service_id,
            geocoder_url: value.geocoder_url,
            geocoder_size: value.geocoder_size,
        })
    }
}
