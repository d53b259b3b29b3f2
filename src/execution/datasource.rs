//! The `n8n_execution` and `n8n_executions` data sources.

use super::parse_execution_id;
use super::translate::{apply_to_data_source, to_item};
use crate::clients::{ExecutionListFilters, N8nClient};
use crate::model::wire::Execution;
use crate::model::{ExecutionDataSourceModel, ExecutionItem, ExecutionsDataSourceModel};
use async_trait::async_trait;
use reconcile_framework::{
    resolve_identifier, CallContext, Candidate, ClientSlot, ListReconciler, ListSource,
    Operation, ProviderData, ReconcileError, RemoteError,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Looks up one execution by `id`.
pub struct ExecutionDataSource {
    client: ClientSlot<N8nClient>,
}

impl Default for ExecutionDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionDataSource {
    pub const TYPE_NAME: &'static str = "n8n_execution";

    pub fn new() -> Self {
        Self {
            client: ClientSlot::empty(Self::TYPE_NAME),
        }
    }

    pub fn with_client(client: Arc<N8nClient>) -> Self {
        Self {
            client: ClientSlot::with_client(Self::TYPE_NAME, client),
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.client.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    #[instrument(skip_all, fields(data_source = Self::TYPE_NAME))]
    pub async fn read(
        &self,
        ctx: &CallContext,
        mut config: ExecutionDataSourceModel,
    ) -> Result<ExecutionDataSourceModel, ReconcileError> {
        let client = self.client.get()?;
        let identifier = resolve_identifier([Candidate::new("id", &config.id)])?;
        let id = parse_execution_id(identifier.attribute, &identifier.value)?;
        debug!(execution_id = id, "Looking up execution");

        let execution = client
            .executions()
            .get_execution(ctx, id, config.include_data.to_option())
            .await
            .map_err(|e| {
                ReconcileError::remote(Self::TYPE_NAME, Operation::Read, id.to_string(), e)
            })?;

        apply_to_data_source(&execution, &mut config);
        Ok(config)
    }
}

pub struct ExecutionListing;

#[async_trait]
impl ListSource for ExecutionListing {
    const RESOURCE_TYPE: &'static str = "n8n_executions";
    type Filters = ExecutionListFilters;
    type Remote = Execution;
    type Item = ExecutionItem;
    type Client = N8nClient;

    async fn fetch_all(
        client: &N8nClient,
        ctx: &CallContext,
        filters: &ExecutionListFilters,
    ) -> Result<Option<Vec<Execution>>, RemoteError> {
        let list = client.executions().list_executions(ctx, filters).await?;
        Ok(list.data)
    }

    fn translate(remote: &Execution) -> ExecutionItem {
        to_item(remote)
    }
}

/// Executions matching the optional `workflow_id`, `project_id`, `status` and
/// `include_data` filters, in server order.
#[derive(Default)]
pub struct ExecutionsDataSource {
    inner: ListReconciler<ExecutionListing>,
}

impl ExecutionsDataSource {
    pub const TYPE_NAME: &'static str = ExecutionListing::RESOURCE_TYPE;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Arc<N8nClient>) -> Self {
        Self {
            inner: ListReconciler::with_client(client),
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.inner.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    #[instrument(skip_all, fields(data_source = Self::TYPE_NAME))]
    pub async fn read(
        &self,
        ctx: &CallContext,
        mut config: ExecutionsDataSourceModel,
    ) -> Result<ExecutionsDataSourceModel, ReconcileError> {
        let filters = ExecutionListFilters {
            workflow_id: config.workflow_id.to_option(),
            project_id: config.project_id.to_option(),
            status: config.status.to_option(),
            include_data: config.include_data.to_option(),
        };
        config.executions = Some(self.inner.list(ctx, &filters).await?);
        Ok(config)
    }
}
