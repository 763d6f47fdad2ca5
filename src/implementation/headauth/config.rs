use crate::config::ConfigError;
use http::header::HeaderName;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Deserialize, Serialize, Default, Clone)]
pub struct HeaderField {
    #[serde(default)]
    pub name: String,
}

/// Declarative configuration for the header authorization filter.
///
/// Mirrors the external record format: `header_name.name`, `allowed`,
/// `methods`, optional `response_type` ("json"/"text") and optional
/// `method_policy` ("strict"/"scoped", default strict).
#[derive(Deserialize, Serialize, Default, Clone)]
pub struct HeaderAuthConfig {
    #[serde(default)]
    pub header_name: HeaderField,
    #[serde(default)]
    pub allowed: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub response_type: String,
    #[serde(default)]
    pub method_policy: String,
}

impl HeaderAuthConfig {
    pub fn header_name(&self) -> Result<HeaderName, ConfigError> {
        if self.header_name.name.is_empty() {
            return Err(ConfigError::MissingHeaderName);
        }
        HeaderName::from_bytes(self.header_name.name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeaderName(self.header_name.name.clone()))
    }

    /// Empty `response_type` falls back to the plain-text default.
    pub fn response_format(&self) -> Result<ResponseFormat, ConfigError> {
        if self.response_type.is_empty() {
            return Ok(ResponseFormat::default());
        }
        self.response_type.parse()
    }

    /// Empty `method_policy` falls back to the strict default.
    pub fn method_policy(&self) -> Result<MethodPolicy, ConfigError> {
        if self.method_policy.is_empty() {
            return Ok(MethodPolicy::default());
        }
        self.method_policy.parse()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ResponseFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ResponseFormat::Json),
            "text" | "plain" => Ok(ResponseFormat::Text),
            _ => Err(ConfigError::UnknownResponseFormat(s.to_owned())),
        }
    }
}

/// The decision rule applied per request.
///
/// `Strict` is the contract default: the header value and the method must
/// both be allow-listed. `Scoped` treats the methods list as the set of
/// methods subject to the check, so unlisted methods pass through unchecked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MethodPolicy {
    #[default]
    Strict,
    Scoped,
}

impl FromStr for MethodPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(MethodPolicy::Strict),
            "scoped" => Ok(MethodPolicy::Scoped),
            _ => Err(ConfigError::UnknownMethodPolicy(s.to_owned())),
        }
    }
}
