//! The `n8n_execution_retry` resource.
//!
//! Creating the resource retries the named execution once and records the execution the
//! retry started. There is nothing to read back or tear down afterwards: reads return the
//! recorded state, updates are rejected, and deleting only forgets the resource. To retry
//! again, create a new resource.

use super::parse_execution_id;
use super::translate::apply_to_retry;
use crate::clients::N8nClient;
use crate::model::wire::Execution;
use crate::model::RetryResourceModel;
use async_trait::async_trait;
use reconcile_framework::{
    resolve_identifier, ActionEntity, ActionReconciler, ActionState, CallContext, Candidate,
    Field, ProviderData, ReconcileError, RemoteError,
};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct RetryAction;

#[async_trait]
impl ActionEntity for RetryAction {
    const RESOURCE_TYPE: &'static str = "n8n_execution_retry";
    type Model = RetryResourceModel;
    type Outcome = Execution;
    type Client = N8nClient;
    type SourceId = u64;

    fn seed(source_id: String) -> RetryResourceModel {
        RetryResourceModel {
            execution_id: Field::Known(source_id),
            ..RetryResourceModel::default()
        }
    }

    fn source_id(plan: &RetryResourceModel) -> Result<u64, ReconcileError> {
        let resolved = resolve_identifier([Candidate::new("execution_id", &plan.execution_id)])?;
        parse_execution_id(resolved.attribute, &resolved.value)
    }

    async fn invoke(
        client: &N8nClient,
        ctx: &CallContext,
        source_id: &u64,
    ) -> Result<Execution, RemoteError> {
        client.executions().retry_execution(ctx, *source_id).await
    }

    fn capture(outcome: &Execution, model: &mut RetryResourceModel) {
        apply_to_retry(outcome, model);
    }
}

/// Reconciler for the `n8n_execution_retry` resource.
#[derive(Default)]
pub struct ExecutionRetryResource {
    inner: ActionReconciler<RetryAction>,
}

impl ExecutionRetryResource {
    pub const TYPE_NAME: &'static str = RetryAction::RESOURCE_TYPE;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Arc<N8nClient>) -> Self {
        Self {
            inner: ActionReconciler::with_client(client),
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.inner.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    #[instrument(
        skip_all,
        fields(resource_type = Self::TYPE_NAME, execution_id = %plan.execution_id)
    )]
    pub async fn create(
        &self,
        ctx: &CallContext,
        plan: RetryResourceModel,
    ) -> Result<ActionState<RetryResourceModel>, ReconcileError> {
        debug!("Sending request");
        self.inner.create(ctx, plan).await
    }

    pub fn read(&self, state: ActionState<RetryResourceModel>) -> ActionState<RetryResourceModel> {
        self.inner.read(state)
    }

    pub fn update(
        &self,
        declared: &RetryResourceModel,
        stored: &ActionState<RetryResourceModel>,
    ) -> Result<ActionState<RetryResourceModel>, ReconcileError> {
        self.inner.update(declared, stored)
    }

    pub fn delete(
        &self,
        state: ActionState<RetryResourceModel>,
    ) -> ActionState<RetryResourceModel> {
        self.inner.delete(state)
    }

    /// Seeds `execution_id`; the retry itself is not repeated.
    pub fn import(&self, execution_id: impl Into<String>) -> RetryResourceModel {
        self.inner.import(execution_id)
    }
}
