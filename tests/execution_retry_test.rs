use chrono::{TimeZone, Utc};
use n8n_provider_core::execution::ExecutionRetryResource;
use n8n_provider_core::mock::{MockApi, RemoteCall};
use n8n_provider_core::model::wire::{Execution, WireId};
use n8n_provider_core::{
    ActionState, CallContext, ErrorKind, Field, ReconcileError, RemoteError, RetryResourceModel,
};
use reconcile_framework::Nullable;
use std::sync::Arc;

fn retried(id: u64) -> Execution {
    Execution {
        id: Some(WireId::from(id)),
        workflow_id: Some(WireId::from("wf-42")),
        finished: Some(false),
        mode: Some("retry".into()),
        started_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()),
        stopped_at: Nullable::Null,
        status: Some("running".into()),
    }
}

fn resource(mock: &MockApi) -> ExecutionRetryResource {
    ExecutionRetryResource::with_client(Arc::new(mock.client()))
}

#[tokio::test]
async fn test_create_retries_once_and_captures_result() {
    let mock = MockApi::new();
    mock.expect_retry_execution(1000).return_ok(retried(1001));

    let state = resource(&mock)
        .create(&CallContext::new(), RetryResourceModel::planned("1000"))
        .await
        .unwrap();

    let model = state.model().unwrap();
    assert_eq!(model.execution_id, Field::from("1000"));
    assert_eq!(model.new_execution_id, Field::from("1001"));
    assert_eq!(model.workflow_id, Field::from("wf-42"));
    assert_eq!(model.finished, Field::Known(false));
    assert_eq!(model.mode, Field::from("retry"));
    assert_eq!(model.started_at, Field::from("2024-06-01T08:30:00Z"));
    assert_eq!(model.stopped_at, Field::Null);
    assert_eq!(model.status, Field::from("running"));

    assert_eq!(mock.calls(), vec![RemoteCall::RetryExecution { id: 1000 }]);
    mock.verify();
}

#[tokio::test]
async fn test_non_numeric_execution_id_is_rejected_before_any_call() {
    let mock = MockApi::new();
    let err = resource(&mock)
        .create(&CallContext::new(), RetryResourceModel::planned("latest"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::InvalidAttribute {
            attribute: "execution_id",
            ..
        }
    ));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_missing_execution_id() {
    let mock = MockApi::new();
    let plan = RetryResourceModel {
        execution_id: Field::Unknown,
        ..RetryResourceModel::default()
    };
    let err = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::MissingIdentifier { .. }));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_failed_retry_stays_unmanaged() {
    let mock = MockApi::new();
    mock.expect_retry_execution(7)
        .return_err(RemoteError::status(409, "The execution has already succeeded"));

    let err = resource(&mock)
        .create(&CallContext::new(), RetryResourceModel::planned("7"))
        .await
        .unwrap_err();

    assert_eq!(err.remote_status(), Some(409));
    assert_eq!(err.kind(), ErrorKind::Rejected);
}

#[tokio::test]
async fn test_cancelled_retry_is_unreachable() {
    let mock = MockApi::new();
    mock.expect_retry_execution(7)
        .return_err(RemoteError::Cancelled);

    let ctx = CallContext::new();
    ctx.cancellation().cancel();
    let err = resource(&mock)
        .create(&ctx, RetryResourceModel::planned("7"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unreachable);
    assert!(mock.contexts()[0].is_cancelled());
}

#[tokio::test]
async fn test_read_update_delete_make_no_calls() {
    let mock = MockApi::new();
    mock.expect_retry_execution(1000).return_ok(retried(1001));

    let retries = resource(&mock);
    let state = retries
        .create(&CallContext::new(), RetryResourceModel::planned("1000"))
        .await
        .unwrap();
    let captured = state.clone();

    let state = retries.read(state);
    assert_eq!(state, captured);

    let declared = RetryResourceModel::planned("2000");
    let err = retries.update(&declared, &state).unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::UpdateNotSupported {
            resource: "n8n_execution_retry"
        }
    ));
    assert_eq!(state, captured);

    let state = retries.delete(state);
    assert_eq!(state, ActionState::Unmanaged);

    assert_eq!(mock.call_names(), vec!["retry_execution"]);
}

#[tokio::test]
async fn test_import_seeds_execution_id_only() {
    let retries = ExecutionRetryResource::new();
    let model = retries.import("1000");

    assert_eq!(model.execution_id, Field::from("1000"));
    assert!(model.new_execution_id.is_null());
    assert!(!retries.is_configured());
}

#[tokio::test]
async fn test_unconfigured_resource_fails_fast() {
    let err = ExecutionRetryResource::new()
        .create(&CallContext::new(), RetryResourceModel::planned("1000"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::NotConfigured { .. }));
}
