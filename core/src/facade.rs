//! Public entry point.
//!
//! `DigitalHumani` owns the validated `Config` and one transport handle
//! shared by its two resource clients. The enterprise id from the
//! configuration is filled in on every call.

use std::sync::Arc;

use crate::client::{EnterpriseClient, TreeClient};
use crate::config::Config;
use crate::error::ApiError;
use crate::outcome::Outcome;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{MonthlyCount, Tree};

/// Client for the DigitalHumani reforestation API.
pub struct DigitalHumani<X = ReqwestTransport> {
    config: Config,
    trees: TreeClient<X>,
    enterprises: EnterpriseClient<X>,
}

impl<X> Clone for DigitalHumani<X> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            trees: self.trees.clone(),
            enterprises: self.enterprises.clone(),
        }
    }
}

impl<X> std::fmt::Debug for DigitalHumani<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalHumani")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DigitalHumani<ReqwestTransport> {
    /// Validate the settings and build a client over a default
    /// `reqwest::Client`. No request is made.
    pub fn new(api_key: &str, enterprise_id: &str, environment: &str) -> Result<Self, ApiError> {
        Ok(Self::from_config(Config::new(api_key, enterprise_id, environment)?))
    }

    /// Build a client from `DIGITALHUMANI_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::from_config(Config::from_env()?))
    }

    /// Build a client from a properties file; see `Config::from_properties`.
    pub fn from_properties(path: impl AsRef<std::path::Path>) -> Result<Self, ApiError> {
        Ok(Self::from_config(Config::from_properties(path)?))
    }

    pub fn from_config(config: Config) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<X: Transport> DigitalHumani<X> {
    pub fn with_transport(config: Config, transport: X) -> Self {
        let transport = Arc::new(transport);
        let base_url = config.base_url();
        let trees = TreeClient::new(base_url, config.api_key(), Arc::clone(&transport));
        let enterprises = EnterpriseClient::new(base_url, config.api_key(), transport);
        Self {
            config,
            trees,
            enterprises,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn trees(&self) -> &TreeClient<X> {
        &self.trees
    }

    pub fn enterprises(&self) -> &EnterpriseClient<X> {
        &self.enterprises
    }

    pub async fn plant_one(&self, project_id: &str, user: &str) -> Outcome<Tree> {
        self.trees
            .plant_one(self.config.enterprise_id(), project_id, user)
            .await
    }

    pub async fn plant_many(&self, project_id: &str, user: &str, count: u32) -> Outcome<Tree> {
        self.trees
            .plant_many(self.config.enterprise_id(), project_id, user, count)
            .await
    }

    pub async fn fetch_by_id(&self, id: &str) -> Outcome<Tree> {
        self.trees.fetch_by_id(id).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Outcome<bool> {
        self.trees.delete_by_id(id).await
    }

    /// Trees planted by the configured enterprise in `month`.
    pub async fn monthly_total(&self, month: &str) -> Outcome<MonthlyCount> {
        self.enterprises
            .monthly_total(self.config.enterprise_id(), month)
            .await
    }
}
