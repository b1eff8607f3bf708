// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Serialize;

use crate::examples::{example, examples};
use crate::http::service::GRAPHQL_ROUTE;
use crate::registry::ServiceDescriptor;
use crate::routing::{service_path, QueryParameters, QueryState};
use crate::theme::Theme;

/// Version of GraphiQL loaded into the page.
const GRAPHIQL_VERSION: &str = "1.4.7";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceLink<'a> {
    id: &'a str,
    name: &'a str,
    url: &'a str,
    path: String,
    fetch_url: String,
}

impl<'a> From<&'a ServiceDescriptor> for ServiceLink<'a> {
    fn from(service: &'a ServiceDescriptor) -> Self {
        Self {
            id: &service.id,
            name: &service.name,
            url: &service.url,
            path: service_path(&service.id),
            fetch_url: format!("{}/{}", GRAPHQL_ROUTE, service.id),
        }
    }
}

#[derive(Serialize)]
struct ExampleLink {
    name: &'static str,
    path: String,
}

#[derive(Serialize)]
struct ThemeLink {
    label: &'static str,
    path: String,
}

/// Everything the page script needs to set up the editor.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageConfig<'a> {
    service: ServiceLink<'a>,
    services: Vec<ServiceLink<'a>>,
    state: QueryState,
    examples: Vec<ExampleLink>,
    theme: Theme,
    themes: Vec<ThemeLink>,
    logo: &'static str,
    geocoder_url: &'static str,
}

impl<'a> PageConfig<'a> {
    fn new(
        services: &'a [ServiceDescriptor],
        service: &'a ServiceDescriptor,
        parameters: &QueryParameters,
        theme: Theme,
    ) -> Self {
        let mut state = parameters.state();
        if state.query.is_none() {
            state.query = Some(
                example(&service.queries, &service.default_query)
                    .unwrap_or_default()
                    .to_string(),
            );
        }

        let examples = examples(&service.queries)
            .unwrap_or_default()
            .iter()
            .map(|example| ExampleLink {
                name: example.name,
                path: format!("{}/examples/{}", service_path(&service.id), example.name),
            })
            .collect();

        let themes = Theme::ALL
            .iter()
            .map(|theme| ThemeLink {
                label: theme.label(),
                path: format!("/theme/{}", theme),
            })
            .collect();

        Self {
            service: service.into(),
            services: services.iter().map(ServiceLink::from).collect(),
            state,
            examples,
            theme,
            themes,
            logo: theme.logo(),
            geocoder_url: "/geocoder",
        }
    }
}

/// Serializes a value as JSON which can be placed inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    // Serializing these structs can not fail, they only contain strings and maps with string keys
    let json = serde_json::to_string(value).unwrap_or_else(|_| "{}".into());

    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Renders the explorer page for the active service.
///
/// The editor is initialized with the state from the query string. Without a query the default
/// example of the service is shown.
pub fn render_page(
    services: &[ServiceDescriptor],
    service: &ServiceDescriptor,
    parameters: &QueryParameters,
    theme: Theme,
) -> String {
    let config = PageConfig::new(services, service, parameters, theme);

    let stylesheets: String = theme
        .stylesheets()
        .iter()
        .map(|href| format!(r#"    <link rel="stylesheet" href="{}" />"#, href) + "\n")
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <title>GraphQL Explorer</title>
    <link rel="stylesheet" href="https://unpkg.com/graphiql@{graphiql_version}/graphiql.min.css" />
{stylesheets}    <script crossorigin src="https://unpkg.com/react@17/umd/react.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/react-dom@17/umd/react-dom.production.min.js"></script>
</head>
<body>
    <div id="root" class="App">Loading...</div>
    <dialog id="geocoder" class="geocoder-modal">
        <form method="dialog" class="geocoder-search">
            <input id="geocoder-text" type="search" placeholder="Search for a place" autocomplete="off" />
            <button value="close">Close</button>
        </form>
        <ul id="geocoder-results"></ul>
    </dialog>
    <script id="explorer-config" type="application/json">{config}</script>
    <script src="https://unpkg.com/graphiql@{graphiql_version}/graphiql.min.js"></script>
    <script src="/assets/explorer.js"></script>
</body>
</html>
"#,
        graphiql_version = GRAPHIQL_VERSION,
        stylesheets = stylesheets,
        config = script_json(&config),
    )
}
