use super::api::{ExecutionsApi, UsersApi};
use super::http::HttpApi;
use crate::config::{ConfigError, ProviderConfig};
use std::fmt;
use std::sync::Arc;

/// The shared API handle every resource and data source talks through.
///
/// Built once per provider configuration and handed out as provider data. Cloning is
/// cheap; the underlying implementations are reference-counted.
#[derive(Clone)]
pub struct N8nClient {
    base_url: String,
    users: Arc<dyn UsersApi>,
    executions: Arc<dyn ExecutionsApi>,
}

impl N8nClient {
    /// Client backed by the HTTP API.
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let http = Arc::new(HttpApi::new(config)?);
        Ok(Self::from_api(config.base_url.clone(), http))
    }

    /// Client backed by one value implementing both API traits.
    pub fn from_api<A>(base_url: impl Into<String>, api: Arc<A>) -> Self
    where
        A: UsersApi + ExecutionsApi + 'static,
    {
        Self {
            base_url: base_url.into(),
            users: api.clone(),
            executions: api,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn users(&self) -> &dyn UsersApi {
        self.users.as_ref()
    }

    pub fn executions(&self) -> &dyn ExecutionsApi {
        self.executions.as_ref()
    }
}

impl fmt::Debug for N8nClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("N8nClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
