//! Client configuration.
//!
//! # Design
//! `Config` is validated once at construction and immutable afterwards. The
//! base URL is derived from the `Environment` and cannot be set on its own.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ApiError;

pub const PRODUCTION_URL: &str = "https://api.digitalhumani.com";
pub const SANDBOX_URL: &str = "https://api.sandbox.digitalhumani.com";

pub const API_KEY_VAR: &str = "DIGITALHUMANI_API_KEY";
pub const ENTERPRISE_ID_VAR: &str = "DIGITALHUMANI_ENTERPRISE_ID";
pub const ENVIRONMENT_VAR: &str = "DIGITALHUMANI_ENVIRONMENT";

/// Keys read by `Config::from_properties`.
pub const API_KEY_PROPERTY: &str = "API_KEY";
pub const ENTERPRISE_ID_PROPERTY: &str = "ENTERPRISE_ID";
pub const ENVIRONMENT_PROPERTY: &str = "ENVIRONMENT";

/// Deployment of the remote service to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Sandbox => SANDBOX_URL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Environment::Production),
            "sandbox" => Ok(Environment::Sandbox),
            _ if s.trim().is_empty() => Err(ApiError::Configuration(
                "environment must not be blank".to_string(),
            )),
            other => Err(ApiError::Configuration(format!(
                "unknown environment {other:?}, expected \"production\" or \"sandbox\""
            ))),
        }
    }
}

/// Validated client settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    enterprise_id: String,
    environment: Environment,
}

impl Config {
    /// Validate and build a configuration.
    ///
    /// Fails with `ApiError::Configuration` if `api_key` or `environment` is
    /// blank, or if `environment` is neither `production` nor `sandbox`.
    pub fn new(api_key: &str, enterprise_id: &str, environment: &str) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::Configuration(
                "API key must not be blank".to_string(),
            ));
        }
        let environment = environment.parse()?;
        Ok(Self {
            api_key: api_key.to_string(),
            enterprise_id: enterprise_id.to_string(),
            environment,
        })
    }

    /// Read the configuration from `DIGITALHUMANI_*` environment variables.
    /// A missing variable counts as blank.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration from a `KEY=value` properties file with the
    /// keys `API_KEY`, `ENTERPRISE_ID` and `ENVIRONMENT`. A missing key
    /// counts as blank. The process environment is left untouched.
    pub fn from_properties(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let unreadable = |err: dotenvy::Error| {
            ApiError::Configuration(format!("could not read {}: {err}", path.display()))
        };
        let properties = dotenvy::from_path_iter(path)
            .map_err(unreadable)?
            .collect::<Result<HashMap<String, String>, _>>()
            .map_err(unreadable)?;
        Self::from_keys(
            [API_KEY_PROPERTY, ENTERPRISE_ID_PROPERTY, ENVIRONMENT_PROPERTY],
            |name| properties.get(name).cloned(),
        )
    }

    /// Build a configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        Self::from_keys([API_KEY_VAR, ENTERPRISE_ID_VAR, ENVIRONMENT_VAR], lookup)
    }

    fn from_keys(
        [api_key, enterprise_id, environment]: [&str; 3],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ApiError> {
        let api_key = lookup(api_key).unwrap_or_default();
        let enterprise_id = lookup(enterprise_id).unwrap_or_default();
        let environment = lookup(environment).unwrap_or_default();
        Self::new(&api_key, &enterprise_id, &environment)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn enterprise_id(&self) -> &str {
        &self.enterprise_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("enterprise_id", &self.enterprise_id)
            .field("environment", &self.environment)
            .finish()
    }
}
