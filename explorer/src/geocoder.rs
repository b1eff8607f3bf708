// SPDX-License-Identifier: AGPL-3.0-or-later

use log::debug;
use serde::{Deserialize, Serialize};

/// Place found by the geocoder, identified by the id usable in GraphQL queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeocoderResult {
    /// Entity id, for example "NSR:StopPlace:337".
    pub id: String,

    /// Display name.
    pub name: String,

    /// First category of the place, for example "railStation".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Failed geocoder request.
#[derive(thiserror::Error, Debug)]
#[error("geocoder request failed: {0}")]
pub struct GeocoderError(#[from] reqwest::Error);

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Deserialize)]
struct Properties {
    id: Option<String>,
    label: Option<String>,
    name: Option<String>,
    #[serde(default)]
    category: Vec<String>,
}

/// Client of a geocoder autocomplete API answering with GeoJSON features.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    client: reqwest::Client,
    url: String,
    size: u16,
}

impl GeocoderClient {
    /// Returns a client for the autocomplete endpoint at `url`, requesting at most `size`
    /// results.
    pub fn new(client: reqwest::Client, url: impl Into<String>, size: u16) -> Self {
        Self {
            client,
            url: url.into(),
            size,
        }
    }

    /// Searches places by name.
    ///
    /// Features without an id are skipped. An empty search text returns no results without
    /// sending a request.
    pub async fn search(&self, text: &str) -> Result<Vec<GeocoderResult>, GeocoderError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Search geocoder for '{}'", text);

        let size = self.size.to_string();
        let collection: FeatureCollection = self
            .client
            .get(&self.url)
            .query(&[("text", text), ("size", size.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let results = collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let properties = feature.properties;
                let id = properties.id?;
                let name = properties
                    .label
                    .or(properties.name)
                    .unwrap_or_else(|| id.clone());

                Some(GeocoderResult {
                    id,
                    name,
                    category: properties.category.into_iter().next(),
                })
            })
            .collect();

        Ok(results)
    }
}
