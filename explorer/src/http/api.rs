// SPDX-License-Identifier: AGPL-3.0-or-later

use axum::body::StreamBody;
use axum::extract::{Extension, Path, Query, RawQuery};
use axum::headers::Cookie;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Json, TypedHeader};
use http::header::{CONTENT_TYPE, SET_COOKIE};
use http::HeaderValue;
use log::warn;
use serde::Deserialize;
use serde_json::json;

use crate::context::Context;
use crate::examples::example;
use crate::fetcher::{FetchError, FetchResponse, GraphQLRequest};
use crate::geocoder::{GeocoderError, GeocoderResult};
use crate::http::assets::asset;
use crate::http::page::render_page;
use crate::registry::ServiceDescriptor;
use crate::routing::{service_path, EditorField, Location, QueryParameters};
use crate::theme::{Theme, ThemeError};

/// Handle requests for the list of GraphQL services.
pub async fn handle_service_registry(
    Extension(context): Extension<Context>,
) -> Json<Vec<ServiceDescriptor>> {
    Json(context.registry.services().to_vec())
}

/// Handle GraphQL requests by forwarding them to the endpoint of the given service.
///
/// JSON responses are passed on with the backend's status code, multipart responses are streamed
/// through unchanged.
pub async fn handle_graphql_query(
    Extension(context): Extension<Context>,
    Path(service_id): Path<String>,
    Json(request): Json<GraphQLRequest>,
) -> Result<Response, ExplorerHttpError> {
    let service = context
        .registry
        .get(&service_id)
        .ok_or(ExplorerHttpError::UnknownService(service_id))?;

    let response = context
        .fetcher(service)
        .fetch(&request)
        .await
        .map_err(|err| {
            warn!("GraphQL request to {} failed: {}", service.url, err);
            ExplorerHttpError::Fetch(err)
        })?;

    match response {
        FetchResponse::Json { status, body } => Ok((status, Json(body)).into_response()),
        FetchResponse::Multipart {
            status,
            content_type,
            body,
        } => Ok((
            status,
            [(CONTENT_TYPE, content_type)],
            StreamBody::new(body),
        )
            .into_response()),
    }
}

/// Handle selecting an example query.
///
/// Replaces the query of the current query string with the example and redirects back to the
/// service page.
pub async fn handle_example(
    Extension(context): Extension<Context>,
    Path((service_id, name)): Path<(String, String)>,
    RawQuery(query_string): RawQuery,
) -> Result<Redirect, ExplorerHttpError> {
    let service = context
        .registry
        .get(&service_id)
        .ok_or_else(|| ExplorerHttpError::UnknownService(service_id.clone()))?;

    let query = example(&service.queries, &name)
        .ok_or(ExplorerHttpError::UnknownExample(service_id, name))?;

    let location = Location {
        path: service_path(&service.id),
        parameters: QueryParameters::parse(query_string.as_deref().unwrap_or_default())
            .edit(EditorField::Query, query),
    };

    Ok(Redirect::to(&location.href()))
}

#[derive(Debug, Deserialize)]
pub struct ThemeParams {
    redirect: Option<String>,
}

/// Handle switching the theme.
///
/// Persists the theme in a cookie and redirects to the page the user came from, which reloads it
/// with the other stylesheets and logo.
pub async fn handle_theme(
    Path(theme): Path<String>,
    Query(params): Query<ThemeParams>,
) -> Result<Response, ExplorerHttpError> {
    let theme: Theme = theme.parse()?;
    let target = local_redirect_target(params.redirect.as_deref());

    Ok((
        [(SET_COOKIE, theme.set_cookie_header())],
        Redirect::to(target),
    )
        .into_response())
}

/// Only redirect to paths on this host which can be sent in a `Location` header.
fn local_redirect_target(target: Option<&str>) -> &str {
    match target {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.starts_with("/\\")
                && HeaderValue::from_str(target).is_ok() =>
        {
            target
        }
        _ => "/",
    }
}

#[derive(Debug, Deserialize)]
pub struct GeocoderParams {
    text: Option<String>,
}

/// Handle searches for entity ids.
pub async fn handle_geocoder(
    Extension(context): Extension<Context>,
    Query(params): Query<GeocoderParams>,
) -> Result<Json<Vec<GeocoderResult>>, ExplorerHttpError> {
    let results = context
        .geocoder
        .search(params.text.as_deref().unwrap_or_default())
        .await
        .map_err(|err| {
            warn!("{}", err);
            ExplorerHttpError::Geocoder(err)
        })?;

    Ok(Json(results))
}

/// Handle requests for bundled stylesheets, scripts and logos.
pub async fn handle_asset(Path(name): Path<String>) -> Result<Response, ExplorerHttpError> {
    let (content_type, body) = asset(&name).ok_or(ExplorerHttpError::NotFound)?;
    Ok(([(CONTENT_TYPE, content_type)], body).into_response())
}

/// Handle requests for the explorer page of the service named in the path.
pub async fn handle_explorer_page(
    Extension(context): Extension<Context>,
    method: Method,
    uri: Uri,
    cookie: Option<TypedHeader<Cookie>>,
) -> Result<Html<String>, ExplorerHttpError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ExplorerHttpError::NotFound);
    }

    let location = Location::new(uri.path(), uri.query());
    let service = context.registry.resolve(&location.path);
    let theme = Theme::from_cookie(cookie.as_ref().map(|TypedHeader(cookie)| cookie));

    Ok(Html(render_page(
        context.registry.services(),
        service,
        &location.parameters,
        theme,
    )))
}

#[derive(Debug)]
pub enum ExplorerHttpError {
    NotFound,
    UnknownService(String),
    UnknownExample(String, String),
    InvalidTheme(ThemeError),
    Fetch(FetchError),
    Geocoder(GeocoderError),
}

impl From<ThemeError> for ExplorerHttpError {
    fn from(err: ThemeError) -> Self {
        Self::InvalidTheme(err)
    }
}

impl IntoResponse for ExplorerHttpError {
    fn into_response(self) -> Response {
        match self {
            ExplorerHttpError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ExplorerHttpError::UnknownService(id) => (
                StatusCode::NOT_FOUND,
                format!("Could not find service '{}'", id),
            )
                .into_response(),
            ExplorerHttpError::UnknownExample(id, name) => (
                StatusCode::NOT_FOUND,
                format!("Could not find example '{}' for service '{}'", name, id),
            )
                .into_response(),
            ExplorerHttpError::InvalidTheme(err) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            // The editor shows this message in its result pane
            ExplorerHttpError::Fetch(err) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "errors": [{ "message": err.to_string() }] })),
            )
                .into_response(),
            ExplorerHttpError::Geocoder(err) => {
                (StatusCode::BAD_GATEWAY, err.to_string()).into_response()
            }
        }
    }
}
