//! The `n8n_user` resource.
//!
//! | Attribute | Policy |
//! |-----------|--------|
//! | `email` | required, immutable (changing it needs a new user) |
//! | `role` | optional, mutable via `PATCH /users/{id}/role` |
//! | `id`, `first_name`, `last_name`, `is_pending`, `created_at`, `updated_at` | computed |

use super::translate::apply_to_resource;
use crate::clients::N8nClient;
use crate::model::wire::{RoleChange, User, UserCreateRequest, UserCreateResponse};
use crate::model::UserResourceModel;
use async_trait::async_trait;
use reconcile_framework::{
    resolve_identifier, CallContext, Candidate, DurableEntity, DurableReconciler, Field,
    MutationPlan, ProviderData, ReconcileError, RemoteError,
};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct UserEntity;

/// Targeted change to a managed user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPatch {
    Role(String),
}

#[async_trait]
impl DurableEntity for UserEntity {
    const RESOURCE_TYPE: &'static str = "n8n_user";
    type Model = UserResourceModel;
    type Remote = User;
    type CreatePayload = UserCreateRequest;
    type Created = UserCreateResponse;
    type Patch = UserPatch;
    type Client = N8nClient;

    fn seed(id: String) -> UserResourceModel {
        UserResourceModel {
            id: Field::Known(id),
            ..UserResourceModel::default()
        }
    }

    fn stored_id(model: &UserResourceModel) -> Result<String, ReconcileError> {
        resolve_identifier([Candidate::new("id", &model.id)]).map(|resolved| resolved.value)
    }

    fn create_payload(plan: &UserResourceModel) -> Result<UserCreateRequest, ReconcileError> {
        let email = plan
            .email
            .non_empty()
            .ok_or(ReconcileError::InvalidAttribute {
                attribute: "email",
                reason: "a non-empty email address is required".to_string(),
            })?;
        Ok(UserCreateRequest {
            email: email.to_string(),
            role: plan.role.to_option(),
        })
    }

    fn created_id(created: &UserCreateResponse) -> Option<String> {
        created.user_id().map(str::to_string)
    }

    fn plan_update(
        declared: &UserResourceModel,
        stored: &UserResourceModel,
    ) -> MutationPlan<UserPatch> {
        MutationPlan::new(Self::RESOURCE_TYPE)
            .immutable("email", &declared.email, &stored.email)
            .mutable("role", &declared.role, &stored.role, UserPatch::Role)
            .computed("id")
            .computed("first_name")
            .computed("last_name")
            .computed("is_pending")
            .computed("created_at")
            .computed("updated_at")
    }

    fn translate(id: &str, remote: &User, model: &mut UserResourceModel) {
        apply_to_resource(id, remote, model);
    }

    async fn fetch(client: &N8nClient, ctx: &CallContext, id: &str) -> Result<User, RemoteError> {
        client.users().get_user(ctx, id, true).await
    }

    async fn create(
        client: &N8nClient,
        ctx: &CallContext,
        payload: UserCreateRequest,
    ) -> Result<UserCreateResponse, RemoteError> {
        client.users().create_user(ctx, payload).await
    }

    async fn patch(
        client: &N8nClient,
        ctx: &CallContext,
        id: &str,
        patch: UserPatch,
    ) -> Result<(), RemoteError> {
        match patch {
            UserPatch::Role(new_role_name) => {
                client
                    .users()
                    .patch_user_role(ctx, id, RoleChange { new_role_name })
                    .await
            }
        }
    }

    async fn delete(client: &N8nClient, ctx: &CallContext, id: &str) -> Result<(), RemoteError> {
        client.users().delete_user(ctx, id).await
    }
}

/// Reconciler for the `n8n_user` resource.
#[derive(Default)]
pub struct UserResource {
    inner: DurableReconciler<UserEntity>,
}

impl UserResource {
    pub const TYPE_NAME: &'static str = UserEntity::RESOURCE_TYPE;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Arc<N8nClient>) -> Self {
        Self {
            inner: DurableReconciler::with_client(client),
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.inner.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    /// Invites the user, then reads it back.
    #[instrument(skip_all, fields(resource_type = Self::TYPE_NAME, email = %plan.email))]
    pub async fn create(
        &self,
        ctx: &CallContext,
        plan: UserResourceModel,
    ) -> Result<UserResourceModel, ReconcileError> {
        debug!("Sending request");
        self.inner.create(ctx, plan).await
    }

    #[instrument(skip_all, fields(resource_type = Self::TYPE_NAME, id = %state.id))]
    pub async fn read(
        &self,
        ctx: &CallContext,
        state: UserResourceModel,
    ) -> Result<UserResourceModel, ReconcileError> {
        debug!("Sending request");
        self.inner.read(ctx, state).await
    }

    #[instrument(skip_all, fields(resource_type = Self::TYPE_NAME, id = %stored.id))]
    pub async fn update(
        &self,
        ctx: &CallContext,
        declared: UserResourceModel,
        stored: &UserResourceModel,
    ) -> Result<UserResourceModel, ReconcileError> {
        debug!("Sending request");
        self.inner.update(ctx, declared, stored).await
    }

    #[instrument(skip_all, fields(resource_type = Self::TYPE_NAME, id = %stored.id))]
    pub async fn delete(
        &self,
        ctx: &CallContext,
        stored: &UserResourceModel,
    ) -> Result<(), ReconcileError> {
        debug!("Sending request");
        self.inner.delete(ctx, stored).await
    }

    pub fn import(&self, id: impl Into<String>) -> UserResourceModel {
        self.inner.import(id)
    }
}
