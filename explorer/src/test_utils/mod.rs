// SPDX-License-Identifier: AGPL-3.0-or-later

mod backend;
mod client;
mod fixtures;

pub use backend::{spawn_server, MockBackend};
pub use client::TestClient;
pub use fixtures::{
    context_with_backend, context_with_geocoder, service_descriptor, services_json, test_context,
    test_registry,
};
