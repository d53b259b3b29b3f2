//! n8n executions: the `n8n_execution_retry` action resource and the `n8n_execution` /
//! `n8n_executions` data sources.

pub mod datasource;
pub mod retry;
pub mod translate;

pub use datasource::{ExecutionDataSource, ExecutionListing, ExecutionsDataSource};
pub use retry::{ExecutionRetryResource, RetryAction};

use reconcile_framework::ReconcileError;

/// Execution ids are numeric on the API side.
pub(crate) fn parse_execution_id(
    attribute: &'static str,
    value: &str,
) -> Result<u64, ReconcileError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ReconcileError::InvalidAttribute {
            attribute,
            reason: format!("`{value}` is not a numeric execution id ({e})"),
        })
}
