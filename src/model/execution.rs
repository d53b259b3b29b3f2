//! Local execution models.

use reconcile_framework::Field;
use serde::{Deserialize, Serialize};

/// State of an `n8n_execution_retry` resource.
///
/// `execution_id` names the execution to retry; every other attribute describes the
/// execution the retry produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryResourceModel {
    pub execution_id: Field<String>,
    pub new_execution_id: Field<String>,
    pub workflow_id: Field<String>,
    pub finished: Field<bool>,
    pub mode: Field<String>,
    pub started_at: Field<String>,
    pub stopped_at: Field<String>,
    pub status: Field<String>,
}

impl RetryResourceModel {
    pub fn planned(execution_id: &str) -> Self {
        Self {
            execution_id: execution_id.into(),
            new_execution_id: Field::Unknown,
            workflow_id: Field::Unknown,
            finished: Field::Unknown,
            mode: Field::Unknown,
            started_at: Field::Unknown,
            stopped_at: Field::Unknown,
            status: Field::Unknown,
        }
    }
}

/// Lookup of a single execution by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionDataSourceModel {
    pub id: Field<String>,
    pub include_data: Field<bool>,
    pub workflow_id: Field<String>,
    pub finished: Field<bool>,
    pub mode: Field<String>,
    pub started_at: Field<String>,
    pub stopped_at: Field<String>,
    pub status: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionItem {
    pub id: Field<String>,
    pub workflow_id: Field<String>,
    pub finished: Field<bool>,
    pub mode: Field<String>,
    pub started_at: Field<String>,
    pub stopped_at: Field<String>,
    pub status: Field<String>,
}

/// The `n8n_executions` list with its optional filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionsDataSourceModel {
    pub workflow_id: Field<String>,
    pub project_id: Field<String>,
    pub status: Field<String>,
    pub include_data: Field<bool>,
    pub executions: Option<Vec<ExecutionItem>>,
}
