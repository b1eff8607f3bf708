// SPDX-License-Identifier: AGPL-3.0-or-later

//! # explorer
//!
//! Hosts a GraphiQL interface against a registry of preconfigured GraphQL services. The active
//! service is selected from the URL path while the editor state (query, variables, operation
//! name) lives in the URL query string.
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

mod app;
mod config;
mod config_file;
mod context;
pub mod examples;
mod fetcher;
mod geocoder;
mod http;
mod registry;
pub mod routing;
mod theme;

#[cfg(test)]
mod test_utils;

pub use crate::app::Explorer;
pub use crate::config::{Configuration, RegistrySource};
pub use crate::config_file::ConfigFile;
pub use crate::fetcher::{FetchError, FetchResponse, GraphQLFetcher, GraphQLRequest};
pub use crate::geocoder::{GeocoderClient, GeocoderError, GeocoderResult};
pub use crate::registry::{RegistryError, ServiceDescriptor, ServiceRegistry};
pub use crate::theme::{Theme, ThemeError};
