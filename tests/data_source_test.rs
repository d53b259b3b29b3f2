use n8n_provider_core::clients::{ExecutionListFilters, UserListFilters};
use n8n_provider_core::execution::{ExecutionDataSource, ExecutionsDataSource};
use n8n_provider_core::mock::{MockApi, RemoteCall};
use n8n_provider_core::model::wire::{Execution, ExecutionList, User, UserList, WireId};
use n8n_provider_core::user::{UserDataSource, UsersDataSource};
use n8n_provider_core::{
    CallContext, ExecutionDataSourceModel, ExecutionsDataSourceModel, Field, ReconcileError,
    RemoteError, UserDataSourceModel, UsersDataSourceModel,
};
use reconcile_framework::DEFAULT_LIST_CAPACITY;
use std::sync::Arc;

fn user(id: &str, email: &str) -> User {
    User {
        id: Some(id.to_string()),
        role: Some("global:member".into()),
        ..User::new(email)
    }
}

fn execution(id: u64, status: &str) -> Execution {
    Execution {
        id: Some(WireId::from(id)),
        status: Some(status.to_string()),
        ..Execution::default()
    }
}

// =============================================================================
// n8n_user
// =============================================================================

#[tokio::test]
async fn test_user_lookup_prefers_id_over_email() {
    let mock = MockApi::new();
    mock.expect_get_user("u-1")
        .return_ok(user("u-1", "ada@example.com"));

    let config = UserDataSourceModel {
        id: Field::from("u-1"),
        email: Field::from("someone-else@example.com"),
        ..UserDataSourceModel::default()
    };
    let found = UserDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap();

    assert_eq!(found.email, Field::from("ada@example.com"));
    assert_eq!(
        mock.calls(),
        vec![RemoteCall::GetUser {
            id_or_email: "u-1".into(),
            include_role: true,
        }]
    );
}

#[tokio::test]
async fn test_user_lookup_falls_back_to_email() {
    let mock = MockApi::new();
    mock.expect_get_user("a@b.com")
        .return_ok(user("u-7", "a@b.com"));

    let config = UserDataSourceModel {
        id: Field::Unknown,
        email: Field::from("a@b.com"),
        ..UserDataSourceModel::default()
    };
    let found = UserDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap();

    assert_eq!(found.id, Field::from("u-7"));
    assert_eq!(found.role, Field::from("global:member"));
    assert_eq!(found.first_name, Field::Null);
    mock.verify();
}

#[tokio::test]
async fn test_user_lookup_without_identifier() {
    let mock = MockApi::new();
    let config = UserDataSourceModel {
        id: Field::from(""),
        ..UserDataSourceModel::default()
    };
    let err = UserDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap_err();

    match err {
        ReconcileError::MissingIdentifier { candidates } => {
            assert_eq!(candidates, vec!["id", "email"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_user_lookup_not_found() {
    let mock = MockApi::new();
    mock.expect_get_user("ghost@example.com")
        .return_err(RemoteError::not_found("Not Found"));

    let config = UserDataSourceModel {
        email: Field::from("ghost@example.com"),
        ..UserDataSourceModel::default()
    };
    let err = UserDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// n8n_users
// =============================================================================

#[tokio::test]
async fn test_users_list_preserves_server_order() {
    let mock = MockApi::new();
    mock.expect_list_users().return_ok(UserList {
        data: Some(vec![
            user("u-3", "c@example.com"),
            user("u-1", "a@example.com"),
            user("u-2", "b@example.com"),
        ]),
        next_cursor: None,
    });

    let config = UsersDataSourceModel {
        project_id: Field::from("p-1"),
        users: None,
    };
    let listed = UsersDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap();

    let ids: Vec<_> = listed
        .users
        .unwrap()
        .into_iter()
        .map(|item| item.id.to_string())
        .collect();
    assert_eq!(ids, vec!["u-3", "u-1", "u-2"]);
    assert_eq!(
        mock.calls(),
        vec![RemoteCall::ListUsers(UserListFilters {
            project_id: Some("p-1".into()),
        })]
    );
}

#[tokio::test]
async fn test_empty_and_absent_collections_yield_empty_lists() {
    let mock = MockApi::new();
    mock.expect_list_users().return_ok(UserList {
        data: Some(Vec::new()),
        next_cursor: None,
    });
    mock.expect_list_users().return_ok(UserList::default());

    let users = UsersDataSource::with_client(Arc::new(mock.client()));
    let config = UsersDataSourceModel::default();
    assert!(config.users.is_none());

    for _ in 0..2 {
        let listed = users
            .read(&CallContext::new(), config.clone())
            .await
            .unwrap();
        let items = listed.users.expect("list should be populated");
        assert!(items.is_empty());
        assert!(items.capacity() >= DEFAULT_LIST_CAPACITY);
    }
    mock.verify();
}

// =============================================================================
// n8n_execution
// =============================================================================

#[tokio::test]
async fn test_execution_lookup() {
    let mock = MockApi::new();
    mock.expect_get_execution(1001)
        .return_ok(execution(1001, "success"));

    let config = ExecutionDataSourceModel {
        id: Field::from("1001"),
        include_data: Field::Known(true),
        ..ExecutionDataSourceModel::default()
    };
    let found = ExecutionDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap();

    assert_eq!(found.id, Field::from("1001"));
    assert_eq!(found.status, Field::from("success"));
    assert_eq!(found.include_data, Field::Known(true));
    assert_eq!(found.stopped_at, Field::Null);
    assert_eq!(
        mock.calls(),
        vec![RemoteCall::GetExecution {
            id: 1001,
            include_data: Some(true),
        }]
    );
}

#[tokio::test]
async fn test_execution_lookup_rejects_non_numeric_id() {
    let mock = MockApi::new();
    let config = ExecutionDataSourceModel {
        id: Field::from("abc"),
        ..ExecutionDataSourceModel::default()
    };
    let err = ExecutionDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::InvalidAttribute { attribute: "id", .. }));
    assert!(mock.calls().is_empty());
}

// =============================================================================
// n8n_executions
// =============================================================================

#[tokio::test]
async fn test_executions_list_forwards_only_set_filters() {
    let mock = MockApi::new();
    mock.expect_list_executions().return_ok(ExecutionList {
        data: Some(vec![execution(12, "error"), execution(11, "success")]),
        next_cursor: Some("next".into()),
    });

    let config = ExecutionsDataSourceModel {
        workflow_id: Field::from("wf-1"),
        status: Field::Unknown,
        ..ExecutionsDataSourceModel::default()
    };
    let listed = ExecutionsDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), config)
        .await
        .unwrap();

    let executions = listed.executions.unwrap();
    assert_eq!(executions.len(), 2);
    assert_eq!(executions[0].id, Field::from("12"));
    assert_eq!(executions[1].status, Field::from("success"));
    assert_eq!(
        mock.calls(),
        vec![RemoteCall::ListExecutions(ExecutionListFilters {
            workflow_id: Some("wf-1".into()),
            ..ExecutionListFilters::default()
        })]
    );
}

#[tokio::test]
async fn test_list_failure_is_reported() {
    let mock = MockApi::new();
    mock.expect_list_executions()
        .return_err(RemoteError::Transport("connection refused".into()));

    let err = ExecutionsDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), ExecutionsDataSourceModel::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::RemoteOperationFailed { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_list_404_is_a_failure_not_a_missing_entity() {
    let mock = MockApi::new();
    mock.expect_list_executions()
        .return_err(RemoteError::not_found("Project p-9 not found"));

    let err = ExecutionsDataSource::with_client(Arc::new(mock.client()))
        .read(&CallContext::new(), ExecutionsDataSourceModel::default())
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(err, ReconcileError::RemoteOperationFailed { .. }));
    assert_eq!(err.remote_status(), Some(404));
    assert!(err.to_string().contains("Project p-9 not found"));
}
