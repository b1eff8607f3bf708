// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use http::header::CONTENT_TYPE;
use http::StatusCode;
use serde_json::Value;

/// Serves the router on an ephemeral port and returns its address.
pub fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind ephemeral socket");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .expect("server error");
    });

    addr
}

#[derive(Default)]
struct Received {
    bodies: Vec<Value>,
    queries: Vec<String>,
}

/// GraphQL or geocoder backend answering every request with the same response and recording
/// what it received.
#[derive(Clone)]
pub struct MockBackend {
    status: StatusCode,
    content_type: String,
    body: String,
    received: Arc<Mutex<Received>>,
}

impl MockBackend {
    /// Backend responding with a JSON document.
    pub fn json(body: Value) -> Self {
        Self::raw("application/json", &body.to_string())
    }

    /// Backend responding with any content.
    pub fn raw(content_type: &str, body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: content_type.into(),
            body: body.into(),
            received: Arc::new(Mutex::new(Received::default())),
        }
    }

    /// Responds with the given status code instead of 200.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Router accepting POST requests with JSON bodies at `path`.
    pub fn router(&self, path: &str) -> Router {
        let backend = self.clone();

        Router::new().route(
            path,
            post(move |body: Bytes| async move {
                let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                backend.received.lock().unwrap().bodies.push(value);
                backend.respond()
            }),
        )
    }

    /// Router accepting GET requests at `path`, recording their query strings.
    pub fn router_get(&self, path: &str) -> Router {
        let backend = self.clone();

        Router::new().route(
            path,
            get(move |RawQuery(query): RawQuery| async move {
                backend
                    .received
                    .lock()
                    .unwrap()
                    .queries
                    .push(query.unwrap_or_default());
                backend.respond()
            }),
        )
    }

    /// JSON bodies of all received POST requests.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().bodies.clone()
    }

    /// Query strings of all received GET requests.
    pub fn received_queries(&self) -> Vec<String> {
        self.received.lock().unwrap().queries.clone()
    }

    fn respond(&self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, self.content_type.clone())],
            self.body.clone(),
        )
            .into_response()
    }
}
