use crate::clients::N8nClient;
use crate::config::{ConfigError, ProviderConfig, ProviderSettings};
use crate::execution::{ExecutionDataSource, ExecutionRetryResource, ExecutionsDataSource};
use crate::user::{UserDataSource, UserResource, UsersDataSource};
use reconcile_framework::{ProviderData, ReconcileError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Top-level wiring for the n8n provider.
///
/// `N8nProvider` is responsible for:
/// - **Configuration**: Resolving the provider block against the environment
/// - **Client Ownership**: Building the one [`N8nClient`] every resource shares
/// - **Dependency Wiring**: Handing that client to each resource and data source
///
/// # Example
///
/// ```ignore
/// let mut provider = N8nProvider::new("0.1.0");
/// provider.configure(&settings)?;
///
/// let resources = provider.resources()?;
/// let user = resources.users.create(&ctx, plan).await?;
/// ```
#[derive(Debug, Clone)]
pub struct N8nProvider {
    version: String,
    data: Option<ProviderData>,
}

/// The configured resources.
pub struct Resources {
    pub users: UserResource,
    pub execution_retries: ExecutionRetryResource,
}

/// The configured data sources.
pub struct DataSources {
    pub user: UserDataSource,
    pub users: UsersDataSource,
    pub execution: ExecutionDataSource,
    pub executions: ExecutionsDataSource,
}

impl N8nProvider {
    pub const TYPE_NAME: &'static str = "n8n";

    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            data: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn resource_types() -> [&'static str; 2] {
        [UserResource::TYPE_NAME, ExecutionRetryResource::TYPE_NAME]
    }

    pub fn data_source_types() -> [&'static str; 4] {
        [
            UserDataSource::TYPE_NAME,
            UsersDataSource::TYPE_NAME,
            ExecutionDataSource::TYPE_NAME,
            ExecutionsDataSource::TYPE_NAME,
        ]
    }

    /// Resolves `settings` (with environment fallback) and builds the HTTP client.
    pub fn configure(
        &mut self,
        settings: &ProviderSettings,
    ) -> Result<Arc<N8nClient>, ConfigError> {
        let config = ProviderConfig::resolve(settings).map_err(|e| {
            warn!(error = %e, "Provider configuration is incomplete");
            e
        })?;
        let client = N8nClient::new(&config)?;
        Ok(self.configure_client(client))
    }

    /// Installs an already-built client, e.g. one backed by [`MockApi`](crate::mock::MockApi).
    pub fn configure_client(&mut self, client: N8nClient) -> Arc<N8nClient> {
        info!(base_url = client.base_url(), version = %self.version, "Provider configured");
        let client = Arc::new(client);
        self.data = Some(ProviderData::new(client.clone()));
        client
    }

    /// `None` until the provider has been configured.
    pub fn provider_data(&self) -> Option<&ProviderData> {
        self.data.as_ref()
    }

    /// Every resource, handed the shared client.
    ///
    /// Before `configure` the resources come back unconfigured and fail with
    /// [`ReconcileError::NotConfigured`] on first use.
    pub fn resources(&self) -> Result<Resources, ReconcileError> {
        let data = self.provider_data();
        debug!(configured = data.is_some(), "Wiring resources");

        let mut users = UserResource::new();
        users.configure(data)?;
        let mut execution_retries = ExecutionRetryResource::new();
        execution_retries.configure(data)?;

        Ok(Resources {
            users,
            execution_retries,
        })
    }

    /// Every data source, handed the shared client.
    pub fn data_sources(&self) -> Result<DataSources, ReconcileError> {
        let data = self.provider_data();
        debug!(configured = data.is_some(), "Wiring data sources");

        let mut user = UserDataSource::new();
        user.configure(data)?;
        let mut users = UsersDataSource::new();
        users.configure(data)?;
        let mut execution = ExecutionDataSource::new();
        execution.configure(data)?;
        let mut executions = ExecutionsDataSource::new();
        executions.configure(data)?;

        Ok(DataSources {
            user,
            users,
            execution,
            executions,
        })
    }
}
