//! Remote execution to local models.

use crate::model::wire::Execution;
use crate::model::{nullable_timestamp, timestamp};
use crate::model::{ExecutionDataSourceModel, ExecutionItem, RetryResourceModel};
use reconcile_framework::Field;

pub fn to_item(execution: &Execution) -> ExecutionItem {
    ExecutionItem {
        id: Field::from_option(execution.id.as_ref().map(ToString::to_string)),
        workflow_id: Field::from_option(execution.workflow_id.as_ref().map(ToString::to_string)),
        finished: Field::from_option(execution.finished),
        mode: Field::from_option(execution.mode.clone()),
        started_at: timestamp(execution.started_at.as_ref()),
        stopped_at: nullable_timestamp(&execution.stopped_at),
        status: Field::from_option(execution.status.clone()),
    }
}

/// Captures the execution a retry produced. `execution_id` is left as declared.
pub fn apply_to_retry(execution: &Execution, model: &mut RetryResourceModel) {
    let item = to_item(execution);
    model.new_execution_id = item.id;
    model.workflow_id = item.workflow_id;
    model.finished = item.finished;
    model.mode = item.mode;
    model.started_at = item.started_at;
    model.stopped_at = item.stopped_at;
    model.status = item.status;
}

pub fn apply_to_data_source(execution: &Execution, model: &mut ExecutionDataSourceModel) {
    let item = to_item(execution);
    if item.id.is_known() {
        model.id = item.id;
    }
    if model.include_data.is_unknown() {
        model.include_data = Field::Null;
    }
    model.workflow_id = item.workflow_id;
    model.finished = item.finished;
    model.mode = item.mode;
    model.started_at = item.started_at;
    model.stopped_at = item.stopped_at;
    model.status = item.status;
}
