// SPDX-License-Identifier: AGPL-3.0-or-later

//! Synchronisation between the URL and the editor state.
//!
//! The URL is the only place the editor state is kept: the path selects the active service and
//! the query string carries the query, variables and operation name. Every other query string
//! field is passed through untouched.
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

/// Query string field holding the GraphQL query.
pub const QUERY_FIELD: &str = "query";

/// Query string field holding the variables as JSON text.
pub const VARIABLES_FIELD: &str = "variables";

/// Query string field holding the selected operation name.
pub const OPERATION_NAME_FIELD: &str = "operationName";

/// Editor fields which are kept in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    /// GraphQL query text.
    Query,

    /// Variables as JSON text.
    Variables,

    /// Name of the operation to execute.
    OperationName,
}

impl EditorField {
    /// Name of the query string field.
    pub fn key(&self) -> &'static str {
        match self {
            EditorField::Query => QUERY_FIELD,
            EditorField::Variables => VARIABLES_FIELD,
            EditorField::OperationName => OPERATION_NAME_FIELD,
        }
    }
}

/// Editor state derived from the URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    /// GraphQL query text.
    pub query: Option<String>,

    /// Variables as JSON text.
    pub variables: Option<String>,

    /// Name of the operation to execute.
    pub operation_name: Option<String>,
}

/// Decoded query string parameters.
///
/// Keys are kept sorted, so serializing the parameters always results in the same order. Repeated
/// keys keep all their values in the order they appeared, reading a single value returns the last
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters(BTreeMap<String, Vec<String>>);

impl QueryParameters {
    /// Decodes a query string, with or without the leading `?`.
    ///
    /// This never fails: invalid percent-encodings are decoded lossily and pairs without a `=`
    /// get an empty value.
    pub fn parse(query_string: &str) -> Self {
        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);

        let mut parameters: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()).into_owned() {
            if !key.is_empty() {
                parameters.entry(key).or_default().push(value);
            }
        }

        Self(parameters)
    }

    /// Encodes all parameters into a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Returns the value of any query string field, the last one if it is repeated.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Returns all values of a query string field.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns a copy of these parameters with one editor field replaced.
    ///
    /// Every previous value of the field is dropped. All other fields, editor fields or not, stay
    /// as they are.
    pub fn edit(&self, field: EditorField, value: impl Into<String>) -> Self {
        let mut parameters = self.0.clone();
        parameters.insert(field.key().to_string(), vec![value.into()]);
        Self(parameters)
    }

    /// Editor state carried by these parameters.
    pub fn state(&self) -> QueryState {
        QueryState {
            query: self.get(QUERY_FIELD).map(str::to_string),
            variables: self.get(VARIABLES_FIELD).map(str::to_string),
            operation_name: self.get(OPERATION_NAME_FIELD).map(str::to_string),
        }
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all key and value pairs in key order. Values of a repeated key follow each
    /// other in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }
}

impl fmt::Display for QueryParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

/// Path of a service page.
///
/// Navigating there starts with an empty editor state as the query string is not carried over.
pub fn service_path(service_id: &str) -> String {
    format!("/{}", service_id)
}

/// Path and query string of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// URL path, used to select the active service.
    pub path: String,

    /// Decoded query string.
    pub parameters: QueryParameters,
}

impl Location {
    /// Creates a location from a path and an optional raw query string.
    pub fn new(path: &str, query_string: Option<&str>) -> Self {
        Self {
            path: path.to_string(),
            parameters: QueryParameters::parse(query_string.unwrap_or_default()),
        }
    }

    /// Returns the path followed by the query string, if any.
    pub fn href(&self) -> String {
        if self.parameters.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.parameters)
        }
    }
}
