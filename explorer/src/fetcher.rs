// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::StatusCode;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type of incrementally delivered GraphQL responses.
const MULTIPART_MIXED: &str = "multipart/mixed";

/// GraphQL request as sent by the editor and forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    /// GraphQL query text.
    pub query: String,

    /// Query variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    /// Name of the operation to execute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

/// Stream of response body chunks.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

/// Response of a GraphQL backend.
pub enum FetchResponse {
    /// Regular JSON response, parsed.
    Json {
        /// HTTP status of the backend response.
        status: StatusCode,

        /// Response body, usually an object with `data` and `errors`.
        body: Value,
    },

    /// Multipart response delivered in chunks, passed through as-is.
    Multipart {
        /// HTTP status of the backend response.
        status: StatusCode,

        /// Full content type, including the boundary.
        content_type: String,

        /// Body chunks.
        body: BodyStream,
    },
}

impl fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchResponse::Json { status, body } => f
                .debug_struct("Json")
                .field("status", status)
                .field("body", body)
                .finish(),
            FetchResponse::Multipart {
                status,
                content_type,
                ..
            } => f
                .debug_struct("Multipart")
                .field("status", status)
                .field("content_type", content_type)
                .finish_non_exhaustive(),
        }
    }
}

/// Network or parse error of a GraphQL request.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Request could not be sent or the response could not be received.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Response body is not JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Sends GraphQL requests to one backend endpoint.
///
/// Every call to `fetch` results in exactly one HTTP POST. There is no retry, timeout or caching
/// and concurrent calls are independent of each other.
#[derive(Debug, Clone)]
pub struct GraphQLFetcher {
    client: reqwest::Client,
    url: String,
}

impl GraphQLFetcher {
    /// Returns a fetcher for the given endpoint URL.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts the request as JSON and returns the backend response.
    pub async fn fetch(&self, request: &GraphQLRequest) -> Result<FetchResponse, FetchError> {
        debug!("Forward GraphQL request to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json, multipart/mixed")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match content_type {
            Some(content_type) if content_type.starts_with(MULTIPART_MIXED) => {
                let body = response
                    .bytes_stream()
                    .map(|chunk| chunk.map_err(FetchError::from))
                    .boxed();

                Ok(FetchResponse::Multipart {
                    status,
                    content_type,
                    body,
                })
            }
            _ => {
                let bytes = response.bytes().await?;
                let body = serde_json::from_slice(&bytes)?;

                Ok(FetchResponse::Json { status, body })
            }
        }
    }
}
