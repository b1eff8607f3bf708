// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{crate_version, Parser};
use colored::Colorize;
use directories::ProjectDirs;
use explorer::{ConfigFile, Configuration, RegistrySource};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::Serialize;

use crate::utils::absolute_path;

const CONFIG_FILE_NAME: &str = "config.toml";

type ConfigFilePath = Option<PathBuf>;

/// Get configuration from 1. .toml file, 2. environment variables and 3. command line arguments
/// (in that order, meaning that later configuration sources take precedence over the earlier
/// ones).
///
/// Returns a partly unchecked configuration object which results from all of these sources. It
/// still needs to be converted as it might still contain invalid values.
pub fn load_config() -> Result<(ConfigFilePath, ConfigFile)> {
    // Parse command line arguments first to get optional config file path
    let cli = Cli::parse();

    // Determine if a config file path was provided or if we should look for it in common locations
    let config_file_path: ConfigFilePath = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }

            Some(path.clone())
        }
        None => try_determine_config_file_path(),
    };

    let config = figment(&config_file_path, cli).extract()?;

    Ok((config_file_path, config))
}

fn figment(config_file_path: &ConfigFilePath, cli: Cli) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(ConfigFile::default()));
    if let Some(path) = config_file_path {
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::raw().only(&[
            "log_level",
            "http_port",
            "services",
            "default_service_id",
            "geocoder_url",
            "geocoder_size",
        ]))
        .merge(Serialized::defaults(cli))
}

/// Configuration derived from command line arguments.
///
/// All arguments are optional and don't get serialized to Figment when they're None. This is to
/// assure that default values do not overwrite all previous settings, especially when they haven't
/// been set.
#[derive(Parser, Serialize, Debug, Default)]
#[command(
    name = "explorer",
    about = "GraphiQL explorer for a set of GraphQL services",
    long_about = None,
    version
)]
struct Cli {
    /// Path to an optional "config.toml" file for further configuration.
    ///
    /// When not set the program will try to find a `config.toml` file in the same folder the
    /// program is executed in and otherwise in the regarding operation systems XDG config
    /// directory ("$HOME/.config/explorer/config.toml" on Linux).
    #[arg(short = 'c', long, value_name = "PATH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<PathBuf>,

    /// HTTP port serving the explorer. Defaults to 3000.
    #[arg(short = 'p', long, value_name = "PORT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    http_port: Option<u16>,

    /// Path or http(s) URL of the JSON document listing all GraphQL services. Defaults to
    /// "config.json".
    ///
    /// The document is an array of objects with the fields "id", "name", "url", "queries" and
    /// "defaultQuery". It is loaded once when the explorer starts.
    #[arg(short = 's', long, value_name = "PATH_OR_URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<String>,

    /// Service selected when the URL path does not name any known service. Defaults to
    /// "journey-planner".
    #[arg(short = 'd', long, value_name = "SERVICE_ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    default_service_id: Option<String>,

    /// Geocoder autocomplete endpoint used to search for entity ids.
    #[arg(short = 'g', long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    geocoder_url: Option<String>,

    /// Maximum number of places returned when searching for entity ids. Defaults to 20.
    #[arg(short = 'n', long, value_name = "COUNT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    geocoder_size: Option<u16>,

    /// Set log verbosity. Use this for learning more about how the explorer behaves or for
    /// debugging.
    ///
    /// Possible log levels are: ERROR, WARN, INFO, DEBUG, TRACE. They are scoped to "explorer" by
    /// default.
    ///
    /// If you want to adjust the scope for deeper inspection use a filter value, for example
    /// "=TRACE" for logging _everything_ or "explorer=INFO,hyper=DEBUG" etc.
    #[arg(short = 'l', long, value_name = "LEVEL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
}

fn try_determine_config_file_path() -> Option<PathBuf> {
    // Find config file in current folder
    let mut current_dir = std::env::current_dir().expect("Could not determine current directory");
    current_dir.push(CONFIG_FILE_NAME);

    // Find config file in XDG config folder
    let mut candidates = vec![current_dir];
    if let Some(project_dirs) = ProjectDirs::from("", "", "explorer") {
        let mut xdg_config_dir = project_dirs.config_dir().to_path_buf();
        xdg_config_dir.push(CONFIG_FILE_NAME);
        candidates.push(xdg_config_dir);
    }

    candidates.into_iter().find(|path| path.exists())
}

pub fn print_config(config_file_path: ConfigFilePath, config: &Configuration) -> String {
    println!("{} v{}\n", "explorer".underline(), crate_version!());

    match config_file_path {
        Some(path) => {
            println!(
                "Loading config file from {}",
                absolute_path(path).display().to_string().blue()
            );
        }
        None => {
            println!("No config file provided");
        }
    }

    println!();
    println!("{}\n", "Configuration".underline());

    let services = match &config.services {
        RegistrySource::File(path) => absolute_path(path).display().to_string(),
        RegistrySource::Url(url) => url.clone(),
    };

    format!(
        r"HTTP port: {}
Services: {}
Default service: {}
Geocoder: {}

Explorer is ready!
",
        config.http_port.to_string().blue(),
        services.blue(),
        config.default_service_id.blue(),
        config.geocoder_url.blue(),
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use explorer::ConfigFile;
    use tempfile::NamedTempFile;

    use clap::Parser;

    use super::{figment, Cli};

    #[test]
    fn later_sources_take_precedence() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
http_port = 8080
services = "https://example.org/config.json"
default_service_id = "stop-places"
"#
        )
        .unwrap();

        let cli = Cli {
            http_port: Some(9090),
            geocoder_size: Some(5),
            ..Cli::default()
        };

        let config: ConfigFile = figment(&Some(file.path().to_path_buf()), cli)
            .extract()
            .unwrap();

        assert_eq!(config.http_port, 9090);
        assert_eq!(config.services, "https://example.org/config.json");
        assert_eq!(config.default_service_id, "stop-places");
        assert_eq!(config.log_level, "off");
        assert_eq!(config.geocoder_size, 5);
    }

    #[test]
    fn defaults_without_config_file() {
        let config: ConfigFile = figment(&None, Cli::default()).extract().unwrap();

        assert_eq!(config.http_port, 3000);
        assert_eq!(config.services, "config.json");
        assert_eq!(config.geocoder_size, 20);
    }

    #[test]
    fn parses_command_line_arguments() {
        let cli = Cli::try_parse_from([
            "explorer",
            "--services",
            "https://example.org/config.json",
            "-n",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.services.as_deref(), Some("https://example.org/config.json"));
        assert_eq!(cli.geocoder_size, Some(5));
        assert!(Cli::try_parse_from(["explorer", "--geocoder-size", "many"]).is_err());
    }
}
