use chrono::{TimeZone, Utc};
use n8n_provider_core::mock::{MockApi, RemoteCall};
use n8n_provider_core::model::wire::{
    CreatedUser, RoleChange, User, UserCreateRequest, UserCreateResponse,
};
use n8n_provider_core::user::UserResource;
use n8n_provider_core::{
    CallContext, ErrorKind, Field, ReconcileError, RemoteError, UserResourceModel,
};
use reconcile_framework::Operation;
use std::sync::Arc;

fn created(id: &str) -> UserCreateResponse {
    UserCreateResponse {
        user: Some(CreatedUser {
            id: Some(id.to_string()),
            email: Some("ada@example.com".into()),
            ..CreatedUser::default()
        }),
        error: None,
    }
}

fn remote_user(id: &str, role: &str) -> User {
    User {
        id: Some(id.to_string()),
        first_name: Some("Ada".into()),
        is_pending: Some(true),
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        role: Some(role.to_string()),
        ..User::new("ada@example.com")
    }
}

fn stored(id: &str, role: &str) -> UserResourceModel {
    UserResourceModel {
        id: Field::from(id),
        email: Field::from("ada@example.com"),
        role: Field::from(role),
        ..UserResourceModel::default()
    }
}

fn resource(mock: &MockApi) -> UserResource {
    UserResource::with_client(Arc::new(mock.client()))
}

#[tokio::test]
async fn test_create_invites_then_reads_back() {
    let mock = MockApi::new();
    mock.expect_create_user().return_ok(created("u-1"));
    mock.expect_get_user("u-1")
        .return_ok(remote_user("u-1", "global:member"));

    let plan = UserResourceModel::planned("ada@example.com", Some("global:member"));
    let user = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap();

    assert_eq!(user.id, Field::from("u-1"));
    assert_eq!(user.first_name, Field::from("Ada"));
    assert_eq!(user.last_name, Field::Null);
    assert_eq!(user.is_pending, Field::Known(true));
    assert_eq!(user.created_at, Field::from("2024-03-01T12:00:00Z"));
    assert_eq!(user.updated_at, Field::Null);

    assert_eq!(
        mock.calls(),
        vec![
            RemoteCall::CreateUser(UserCreateRequest {
                email: "ada@example.com".into(),
                role: Some("global:member".into()),
            }),
            RemoteCall::GetUser {
                id_or_email: "u-1".into(),
                include_role: true,
            },
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn test_create_without_role_leaves_it_to_the_remote() {
    let mock = MockApi::new();
    mock.expect_create_user().return_ok(created("u-2"));
    mock.expect_get_user("u-2")
        .return_ok(remote_user("u-2", "global:member"));

    let plan = UserResourceModel::planned("ada@example.com", None);
    let user = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap();

    assert_eq!(user.role, Field::from("global:member"));
    assert_eq!(
        mock.calls()[0],
        RemoteCall::CreateUser(UserCreateRequest {
            email: "ada@example.com".into(),
            role: None,
        })
    );
}

#[tokio::test]
async fn test_create_response_without_id_skips_read_back() {
    let mock = MockApi::new();
    mock.expect_create_user().return_ok(UserCreateResponse {
        user: None,
        error: Some("already invited".into()),
    });

    let plan = UserResourceModel::planned("ada@example.com", None);
    let err = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::IncompleteCreateResponse { .. }));
    assert_eq!(mock.call_names(), vec!["create_user"]);
}

#[tokio::test]
async fn test_create_404_is_a_failure_not_a_missing_user() {
    let mock = MockApi::new();
    mock.expect_create_user()
        .return_err(RemoteError::not_found("Role global:owner not found"));

    let plan = UserResourceModel::planned("ada@example.com", Some("global:owner"));
    let err = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(
        err,
        ReconcileError::RemoteOperationFailed {
            operation: Operation::Create,
            ..
        }
    ));
    assert_eq!(err.remote_status(), Some(404));
    assert!(err.to_string().contains("Role global:owner not found"));
    assert_eq!(mock.call_names(), vec!["create_user"]);
}

#[tokio::test]
async fn test_create_surfaces_failed_read_back() {
    let mock = MockApi::new();
    mock.expect_create_user().return_ok(created("u-1"));
    mock.expect_get_user("u-1")
        .return_err(RemoteError::status(500, "boom"));

    let plan = UserResourceModel::planned("ada@example.com", None);
    let err = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap_err();

    match err {
        ReconcileError::RemoteOperationFailed {
            operation, target, ..
        } => {
            assert_eq!(operation, Operation::ReadBack);
            assert_eq!(target, "u-1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mock.call_names(), vec!["create_user", "get_user"]);
    mock.verify();
}

#[tokio::test]
async fn test_empty_email_is_rejected_before_any_call() {
    let mock = MockApi::new();
    let plan = UserResourceModel::planned("", None);
    let err = resource(&mock)
        .create(&CallContext::new(), plan)
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::InvalidAttribute { attribute: "email", .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_role_change_patches_once_then_reads_back() {
    let mock = MockApi::new();
    mock.expect_patch_user_role("u-1").return_ok(());
    mock.expect_get_user("u-1")
        .return_ok(remote_user("u-1", "global:admin"));

    let declared = UserResourceModel {
        role: Field::from("global:admin"),
        ..stored("u-1", "global:member")
    };
    let user = resource(&mock)
        .update(&CallContext::new(), declared, &stored("u-1", "global:member"))
        .await
        .unwrap();

    assert_eq!(user.role, Field::from("global:admin"));
    assert_eq!(
        mock.calls(),
        vec![
            RemoteCall::PatchUserRole {
                id: "u-1".into(),
                change: RoleChange {
                    new_role_name: "global:admin".into(),
                },
            },
            RemoteCall::GetUser {
                id_or_email: "u-1".into(),
                include_role: true,
            },
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn test_update_surfaces_failed_read_back_after_patch() {
    let mock = MockApi::new();
    mock.expect_patch_user_role("u-1").return_ok(());
    mock.expect_get_user("u-1")
        .return_err(RemoteError::status(500, "boom"));

    let declared = UserResourceModel {
        role: Field::from("global:admin"),
        ..stored("u-1", "global:member")
    };
    let err = resource(&mock)
        .update(&CallContext::new(), declared, &stored("u-1", "global:member"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::RemoteOperationFailed {
            operation: Operation::ReadBack,
            ..
        }
    ));
    assert_eq!(err.remote_status(), Some(500));
    assert_eq!(mock.call_names(), vec!["patch_user_role", "get_user"]);
    mock.verify();
}

#[tokio::test]
async fn test_email_change_is_rejected_without_remote_calls() {
    let mock = MockApi::new();
    let declared = UserResourceModel {
        email: Field::from("new@example.com"),
        role: Field::from("global:admin"),
        ..stored("u-1", "global:member")
    };
    let err = resource(&mock)
        .update(&CallContext::new(), declared, &stored("u-1", "global:member"))
        .await
        .unwrap_err();

    match err {
        ReconcileError::ImmutableFieldChanged {
            field,
            stored,
            declared,
            ..
        } => {
            assert_eq!(field, "email");
            assert_eq!(stored, "ada@example.com");
            assert_eq!(declared, "new@example.com");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_unchanged_update_only_reads_back() {
    let mock = MockApi::new();
    mock.expect_get_user("u-1")
        .return_ok(remote_user("u-1", "global:member"));

    let current = stored("u-1", "global:member");
    resource(&mock)
        .update(&CallContext::new(), current.clone(), &current)
        .await
        .unwrap();

    assert_eq!(mock.call_names(), vec!["get_user"]);
}

#[tokio::test]
async fn test_patch_of_vanished_user_is_not_found() {
    let mock = MockApi::new();
    mock.expect_patch_user_role("u-1")
        .return_err(RemoteError::not_found("Not Found"));

    let declared = UserResourceModel {
        role: Field::from("global:admin"),
        ..stored("u-1", "global:member")
    };
    let err = resource(&mock)
        .update(&CallContext::new(), declared, &stored("u-1", "global:member"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(mock.call_names(), vec!["patch_user_role"]);
}

#[tokio::test]
async fn test_read_of_vanished_user_is_not_found() {
    let mock = MockApi::new();
    mock.expect_get_user("u-1")
        .return_err(RemoteError::not_found("Not Found"));

    let err = resource(&mock)
        .read(&CallContext::new(), stored("u-1", "global:member"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReconcileError::RemoteNotFound { resource: "n8n_user", ref id, .. } if id == "u-1"
    ));
}

#[tokio::test]
async fn test_read_keeps_id_when_payload_omits_it() {
    let mock = MockApi::new();
    mock.expect_get_user("u-1")
        .return_ok(User::new("ada@example.com"));

    let user = resource(&mock)
        .read(&CallContext::new(), stored("u-1", "global:member"))
        .await
        .unwrap();

    assert_eq!(user.id, Field::from("u-1"));
    assert_eq!(user.role, Field::Null);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let mock = MockApi::new();
    mock.expect_delete_user("u-1").return_ok(());
    mock.expect_delete_user("u-1")
        .return_err(RemoteError::not_found("Not Found"));

    let users = resource(&mock);
    let state = stored("u-1", "global:member");
    users.delete(&CallContext::new(), &state).await.unwrap();
    users.delete(&CallContext::new(), &state).await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_delete_surfaces_other_failures() {
    let mock = MockApi::new();
    mock.expect_delete_user("u-1")
        .return_err(RemoteError::status(403, "Forbidden"));

    let err = resource(&mock)
        .delete(&CallContext::new(), &stored("u-1", "global:member"))
        .await
        .unwrap_err();

    assert_eq!(err.remote_status(), Some(403));
    assert_eq!(err.kind(), ErrorKind::Rejected);
}

#[tokio::test]
async fn test_import_then_read() {
    let mock = MockApi::new();
    mock.expect_get_user("u-9")
        .return_ok(remote_user("u-9", "global:member"));

    let users = resource(&mock);
    let seeded = users.import("u-9");
    assert_eq!(seeded.id, Field::from("u-9"));
    assert!(mock.calls().is_empty());

    let user = users.read(&CallContext::new(), seeded).await.unwrap();
    assert_eq!(user.email, Field::from("ada@example.com"));
}

#[tokio::test]
async fn test_unconfigured_resource_fails_fast() {
    let users = UserResource::new();
    let err = users
        .read(&CallContext::new(), stored("u-1", "global:member"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReconcileError::NotConfigured { resource: "n8n_user" }));

    assert_eq!(users.import("u-1").id, Field::from("u-1"));
}

#[tokio::test]
async fn test_context_reaches_every_call() {
    let mock = MockApi::new();
    mock.expect_create_user().return_ok(created("u-1"));
    mock.expect_get_user("u-1")
        .return_ok(remote_user("u-1", "global:member"));

    let token = tokio_util::sync::CancellationToken::new();
    let ctx = CallContext::with_cancellation(token.clone())
        .with_timeout(std::time::Duration::from_secs(30));
    resource(&mock)
        .create(&ctx, UserResourceModel::planned("ada@example.com", None))
        .await
        .unwrap();

    let seen = mock.contexts();
    assert_eq!(seen.len(), 2);
    token.cancel();
    for recorded in seen {
        assert_eq!(recorded.deadline(), ctx.deadline());
        assert!(recorded.is_cancelled());
    }
}
