// SPDX-License-Identifier: AGPL-3.0-or-later

use rstest::fixture;

use crate::config::Configuration;
use crate::context::Context;
use crate::registry::{ServiceDescriptor, ServiceRegistry};

/// Returns a service descriptor pointing at `https://api.example.org/<id>/graphql`.
pub fn service_descriptor(id: &str, queries: &str) -> ServiceDescriptor {
    let name = match id {
        "journey-planner" => "Journey planner",
        "stop-places" => "Stop places",
        other => other,
    };

    let default_query = match queries {
        "stop-places" => "stopPlace",
        _ => "trip",
    };

    ServiceDescriptor {
        id: id.into(),
        name: name.into(),
        url: format!("https://api.example.org/{}/graphql", id),
        queries: queries.into(),
        default_query: default_query.into(),
    }
}

/// Registry document with a journey planner and a stop places service.
pub fn services_json() -> String {
    r#"[
        {
            "id": "journey-planner",
            "name": "Journey planner",
            "url": "https://api.example.org/journey-planner/graphql",
            "queries": "journey-planner",
            "defaultQuery": "trip"
        },
        {
            "id": "stop-places",
            "name": "Stop places",
            "url": "https://api.example.org/stop-places/graphql",
            "queries": "stop-places",
            "defaultQuery": "stopPlace"
        }
    ]"#
    .to_string()
}

#[fixture]
pub fn test_registry() -> ServiceRegistry {
    ServiceRegistry::from_json(services_json().as_bytes(), "journey-planner")
        .expect("Invalid test registry")
}

#[fixture]
pub fn test_context(test_registry: ServiceRegistry) -> Context {
    Context::new(Configuration::default(), test_registry, reqwest::Client::new())
}

/// Context where the journey planner service points at the given endpoint.
pub fn context_with_backend(url: &str) -> Context {
    let mut journey_planner = service_descriptor("journey-planner", "journey-planner");
    journey_planner.url = url.into();

    let registry = ServiceRegistry::new(
        vec![journey_planner, service_descriptor("stop-places", "stop-places")],
        "journey-planner",
    )
    .expect("Invalid test registry");

    Context::new(Configuration::default(), registry, reqwest::Client::new())
}

/// Context using the given geocoder endpoint.
pub fn context_with_geocoder(url: &str) -> Context {
    let config = Configuration {
        geocoder_url: url.into(),
        ..Configuration::default()
    };

    Context::new(config, test_registry(), reqwest::Client::new())
}
