use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, LazyLock, RwLock};

/// Immutable, validated configuration handle shared by a handler instance.
pub struct Config<T> {
    value: T,
}

impl<T> Config<T>
where
    T: DeserializeOwned + Default,
{
    pub fn new(provider: impl ConfigProvider) -> Result<Self, ConfigError> {
        Ok(Self {
            value: provider.resolve()?,
        })
    }
}

impl<T> Config<T> {
    pub fn from_value(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

pub trait ConfigProvider {
    fn resolve<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default;
}

/// Resolves every configuration to its `Default` value.
pub struct DefaultConfigProvider;

impl ConfigProvider for DefaultConfigProvider {
    fn resolve<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(T::default())
    }
}

/// Resolves configurations from JSON files, caching file contents
/// process-wide so repeated construction does not re-read disk.
pub struct FileConfigProvider {
    path: String,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigProvider for FileConfigProvider {
    fn resolve<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        let contents = get_config_file(&self.path)?;
        serde_json::from_str(&contents)
            .map_err(|err| ConfigError::MalformedConfig(format!("{}: {}", self.path, err)))
    }
}

static FILE_CACHE: LazyLock<RwLock<HashMap<String, Arc<String>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

pub fn get_config_file(file_path: &str) -> Result<Arc<String>, ConfigError> {
    {
        let cache = FILE_CACHE.read().unwrap();
        if let Some(contents) = cache.get(file_path) {
            return Ok(contents.clone());
        }
    }

    let contents = Arc::new(
        std::fs::read_to_string(file_path)
            .map_err(|err| ConfigError::MissingConfig(format!("{}: {}", file_path, err)))?,
    );

    {
        let mut cache = FILE_CACHE.write().unwrap();
        cache.insert(file_path.to_string(), contents.clone());
    }

    Ok(contents)
}

pub fn clear_cache() {
    FILE_CACHE.write().unwrap().clear();
}

#[derive(Debug)]
pub enum ConfigError {
    MissingHeaderName,
    InvalidHeaderName(String),
    EmptyAllowed,
    EmptyMethods,
    UnknownResponseFormat(String),
    UnknownMethodPolicy(String),
    MissingConfig(String),
    MalformedConfig(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingHeaderName => {
                write!(f, "header_name field value is missing")
            }
            ConfigError::InvalidHeaderName(name) => {
                write!(f, "header_name field value '{}' is not a valid header name", name)
            }
            ConfigError::EmptyAllowed => {
                write!(f, "allowed field needs at least one value")
            }
            ConfigError::EmptyMethods => {
                write!(f, "methods field needs at least one value")
            }
            ConfigError::UnknownResponseFormat(format) => {
                write!(
                    f,
                    "response_type '{}' is not supported, expected 'json' or 'text'",
                    format
                )
            }
            ConfigError::UnknownMethodPolicy(policy) => {
                write!(
                    f,
                    "method_policy '{}' is not supported, expected 'strict' or 'scoped'",
                    policy
                )
            }
            ConfigError::MissingConfig(path) => {
                write!(f, "configuration file cannot be read: {}", path)
            }
            ConfigError::MalformedConfig(details) => {
                write!(f, "configuration file is malformed: {}", details)
            }
        }
    }
}

impl Error for ConfigError {}
