//! Optional `htdiff.toml` configuration, applied beneath explicit CLI flags.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde::Deserialize;

use crate::args::{HarnessArgs, parse_duration_arg};
use crate::error::{AppError, AppResult, ConfigError};

const DEFAULT_CONFIG_FILE: &str = "htdiff.toml";

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub subject_port: Option<u16>,
    pub nginx_port: Option<u16>,
    pub apache_port: Option<u16>,
    pub timeout: Option<String>,
    pub doc_root: Option<PathBuf>,
    pub diff_output: Option<PathBuf>,
    pub request_template: Option<PathBuf>,
    pub scenarios: Option<Vec<String>>,
    pub skip_cmp: Option<bool>,
    pub no_color: Option<bool>,
}

/// Loads the config from the provided path or the default filename.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        let path = PathBuf::from(path);
        return Ok(Some(load_config_file(&path)?));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return Ok(Some(load_config_file(&default_path)?));
    }

    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}

/// Fills in config values wherever the CLI left the built-in default.
///
/// # Errors
///
/// Returns an error when a config value fails to parse.
pub fn apply_config(
    args: &mut HarnessArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if let Some(host) = &config.host {
        if is_unset(matches, "host") {
            args.host = host.clone();
        }
    }
    if let Some(port) = config.subject_port {
        if is_unset(matches, "subject_port") {
            args.subject_port = port;
        }
    }
    if let Some(port) = config.nginx_port {
        if is_unset(matches, "nginx_port") {
            args.nginx_port = port;
        }
    }
    if let Some(port) = config.apache_port {
        if is_unset(matches, "apache_port") {
            args.apache_port = port;
        }
    }
    if let Some(timeout) = &config.timeout {
        if is_unset(matches, "timeout") {
            args.timeout = parse_duration_arg(timeout).map_err(|reason| {
                AppError::config(ConfigError::InvalidTimeout {
                    value: timeout.clone(),
                    reason,
                })
            })?;
        }
    }
    if let Some(doc_root) = &config.doc_root {
        if is_unset(matches, "doc_root") {
            args.doc_root = doc_root.clone();
        }
    }
    if let Some(diff_output) = &config.diff_output {
        if is_unset(matches, "diff_output") {
            args.diff_output = diff_output.clone();
        }
    }
    if let Some(template) = &config.request_template {
        if args.request_template.is_none() {
            args.request_template = Some(template.clone());
        }
    }
    if let Some(scenarios) = &config.scenarios {
        if args.scenarios.is_empty() {
            args.scenarios = scenarios.clone();
        }
    }
    if config.skip_cmp.unwrap_or(false) {
        args.skip_cmp = true;
    }
    if config.no_color.unwrap_or(false) {
        args.no_color = true;
    }
    Ok(())
}

fn is_unset(matches: &ArgMatches, id: &str) -> bool {
    !matches!(
        matches.value_source(id),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
