//! YAML loading for card configurations
//!
//! Supported tags:
//! - `!env_var VAR` - Environment variable substitution
//!
//! Unknown tags are rejected because the card schema has no tagged fields.

use std::fs;
use std::path::Path;

use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use tracing::{debug, trace};

use crate::card_config::Config;
use crate::error::{ConfigError, ConfigResult};

/// Load, normalize and validate a card configuration file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!("Loading card configuration: {:?}", path);

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config(&content, path)
}

/// Load a card configuration from a string; `source_name` is used in errors
pub fn load_config_str(content: &str, source_name: &str) -> ConfigResult<Config> {
    parse_config(content, Path::new(source_name))
}

fn parse_config(content: &str, source_path: &Path) -> ConfigResult<Config> {
    let parse_error = |e| ConfigError::ParseYaml {
        path: source_path.to_path_buf(),
        source: e,
    };

    let raw: Value = serde_yaml::from_str(content).map_err(parse_error)?;
    let value = process_value(raw)?;
    let config: Config = serde_yaml::from_value(value).map_err(parse_error)?;

    config.validate()?;
    debug!(
        "Loaded configuration for area '{}' with {} explicit entities",
        config.area,
        config.entities.len()
    );
    Ok(config)
}

/// Process a YAML value, handling custom tags
fn process_value(value: Value) -> ConfigResult<Value> {
    match value {
        Value::Tagged(tagged) => process_tagged(*tagged),
        Value::Mapping(map) => {
            let mut result = serde_yaml::Mapping::new();
            for (k, v) in map {
                result.insert(process_value(k)?, process_value(v)?);
            }
            Ok(Value::Mapping(result))
        }
        Value::Sequence(seq) => {
            let result: ConfigResult<Vec<Value>> = seq.into_iter().map(process_value).collect();
            Ok(Value::Sequence(result?))
        }
        _ => Ok(value),
    }
}

fn process_tagged(tagged: TaggedValue) -> ConfigResult<Value> {
    let tag = tagged.tag.to_string();
    trace!("Processing tag '{}' with value {:?}", tag, tagged.value);

    match tag.as_str() {
        "!env_var" => process_env_var(tagged.value),
        other => Err(ConfigError::InvalidValue {
            key: other.to_string(),
            reason: "unsupported YAML tag".to_string(),
        }),
    }
}

/// Process !env_var tag
fn process_env_var(value: Value) -> ConfigResult<Value> {
    let var_name = match value {
        Value::String(s) => s,
        _ => {
            return Err(ConfigError::InvalidValue {
                key: "!env_var".to_string(),
                reason: "environment variable name must be a string".to_string(),
            })
        }
    };

    let env_value = std::env::var(&var_name).map_err(|_| ConfigError::EnvVarNotFound {
        var: var_name.clone(),
    })?;

    debug!("Substituted env var: {}", var_name);
    Ok(Value::String(env_value))
}
