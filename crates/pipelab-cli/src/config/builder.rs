use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, ReasoningSettings};
use crate::error::{CliError, Result};
use crate::utils::parser;
use pipelab::engine::config::{ComposerConfig, ComposerConfigBuilder};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Layers built-in defaults, the optional TOML file and `--set` overrides.
/// Command flags are applied afterwards by the individual commands.
pub fn build_config(config_path: Option<&Path>, set_values: &[String]) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let library_defaults = ComposerConfig::default();

    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, set_values)?;

    let composer_file = file_config.composer.unwrap_or_default();
    let composer = ComposerConfigBuilder::new()
        .node_spacing_x(
            composer_file
                .node_spacing
                .unwrap_or(library_defaults.node_spacing_x),
        )
        .node_origin(library_defaults.node_origin)
        .fallback_confidence(
            composer_file
                .fallback_confidence
                .unwrap_or(library_defaults.fallback_confidence),
        )
        .min_ai_confidence(
            composer_file
                .min_ai_confidence
                .unwrap_or(library_defaults.min_ai_confidence),
        )
        .default_module(
            composer_file
                .default_module
                .unwrap_or(library_defaults.default_module),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let reasoning_file = file_config.reasoning.unwrap_or_default();
    let reasoning = ReasoningSettings {
        enabled: reasoning_file.enabled.unwrap_or(defaults.reasoning_enabled),
        api_url: reasoning_file.api_url.unwrap_or(defaults.api_url),
        model: reasoning_file.model.unwrap_or(defaults.model),
        api_key_env: reasoning_file.api_key_env.unwrap_or(defaults.api_key_env),
        timeout: Duration::from_secs(reasoning_file.timeout_secs.unwrap_or(defaults.timeout_secs)),
    };
    if reasoning.timeout.is_zero() {
        return Err(CliError::Config(
            "`reasoning.timeout-secs` must be at least 1.".to_string(),
        ));
    }

    let config = AppConfig {
        catalog_path: file_config.catalog.and_then(|c| c.path),
        composer,
        reasoning,
        store_path: file_config.mastery.and_then(|m| m.store_path),
    };
    debug!("Resolved configuration: {:?}", &config);
    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "catalog.path" => {
                config.catalog.get_or_insert_with(Default::default).path = Some(PathBuf::from(value));
            }
            "composer.node-spacing" => {
                config.composer.get_or_insert_with(Default::default).node_spacing =
                    Some(parse_value(key, value, "float")?);
            }
            "composer.fallback-confidence" => {
                config.composer.get_or_insert_with(Default::default).fallback_confidence =
                    Some(parse_value(key, value, "float")?);
            }
            "composer.min-ai-confidence" => {
                config.composer.get_or_insert_with(Default::default).min_ai_confidence =
                    Some(parse_value(key, value, "float")?);
            }
            "composer.default-module" => {
                config.composer.get_or_insert_with(Default::default).default_module =
                    Some(value.to_string());
            }
            "reasoning.enabled" => {
                config.reasoning.get_or_insert_with(Default::default).enabled =
                    Some(parse_value(key, value, "boolean")?);
            }
            "reasoning.api-url" => {
                config.reasoning.get_or_insert_with(Default::default).api_url = Some(value.to_string());
            }
            "reasoning.model" => {
                config.reasoning.get_or_insert_with(Default::default).model = Some(value.to_string());
            }
            "reasoning.api-key-env" => {
                config.reasoning.get_or_insert_with(Default::default).api_key_env =
                    Some(value.to_string());
            }
            "reasoning.timeout-secs" => {
                config.reasoning.get_or_insert_with(Default::default).timeout_secs =
                    Some(parse_value(key, value, "integer")?);
            }
            "mastery.store-path" => {
                config.mastery.get_or_insert_with(Default::default).store_path =
                    Some(PathBuf::from(value));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
