// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Result;
use axum::extract::Extension;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use http::header::CONTENT_TYPE;
use log::{debug, warn};
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use triggered::Listener;

use crate::context::Context;
use crate::http::api::{
    handle_asset, handle_example, handle_explorer_page, handle_geocoder, handle_graphql_query,
    handle_service_registry, handle_theme,
};

/// Route serving the list of GraphQL services
pub const SERVICE_REGISTRY_ROUTE: &str = "/config.json";

/// Route proxying GraphQL requests to a service
pub const GRAPHQL_ROUTE: &str = "/graphql";

/// Build HTTP server with the explorer page, the service registry and the GraphQL proxy.
pub fn build_server(context: Context) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(false)
        .allow_origin(Any);

    Router::new()
        .route(SERVICE_REGISTRY_ROUTE, get(handle_service_registry))
        .route(
            &format!("{}/:service_id", GRAPHQL_ROUTE),
            post(handle_graphql_query),
        )
        .route("/:service_id/examples/:name", get(handle_example))
        .route("/theme/:theme", get(handle_theme))
        .route("/geocoder", get(handle_geocoder))
        .route("/assets/:name", get(handle_asset))
        // Every other path renders the explorer for the service named in it
        .fallback(handle_explorer_page)
        // Add middlewares
        .layer(cors)
        // Add shared context
        .layer(Extension(context))
}

/// Start HTTP server.
pub async fn http_service(
    context: Context,
    signal: Listener,
    tx_ready: oneshot::Sender<()>,
) -> Result<()> {
    let http_port = context.config.http_port;
    let http_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), http_port);

    axum::Server::try_bind(&http_address)?
        .serve(build_server(context).into_make_service())
        .with_graceful_shutdown(async {
            debug!("HTTP service is ready");
            if tx_ready.send(()).is_err() {
                warn!("No subscriber informed about HTTP service being ready");
            };

            signal.await;
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;
    use serde_json::Value;

    use crate::context::Context;
    use crate::test_utils::{test_context, TestClient};

    use super::build_server;

    #[rstest]
    #[tokio::test]
    async fn serves_service_registry(test_context: Context) {
        let client = TestClient::new(build_server(test_context));

        let response = client.get("/config.json").send().await;
        assert_eq!(response.status(), StatusCode::OK);

        let services: Value = response.json().await;
        assert_eq!(services[0]["id"], "journey-planner");
        assert_eq!(services[1]["id"], "stop-places");
        assert_eq!(services[1]["defaultQuery"], "stopPlace");
    }

    #[rstest]
    #[tokio::test]
    async fn answers_cors_preflight(test_context: Context) {
        let client = TestClient::new(build_server(test_context));

        let response = client
            .options("/graphql/journey-planner")
            .header("Origin", "https://example.org")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[rstest]
    #[tokio::test]
    async fn graphql_route_only_accepts_post(test_context: Context) {
        let client = TestClient::new(build_server(test_context));

        let response = client.get("/graphql/journey-planner").send().await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = client
            .post("/graphql/journey-planner")
            .body("not json")
            .header("Content-Type", "application/json")
            .send()
            .await;
        assert!(response.status().is_client_error());
    }
}
