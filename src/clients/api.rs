//! Outbound interface to the n8n public API.
//!
//! Reconcilers only see these traits. The production implementation is
//! [`HttpApi`](super::HttpApi); tests use [`MockApi`](crate::mock::MockApi).
//! Every call takes the caller's [`CallContext`] unchanged.

use crate::model::wire::{
    Execution, ExecutionList, RoleChange, User, UserCreateRequest, UserCreateResponse, UserList,
};
use async_trait::async_trait;
use reconcile_framework::{CallContext, RemoteError};

#[async_trait]
pub trait UsersApi: Send + Sync {
    /// `GET /users/{id_or_email}`
    async fn get_user(
        &self,
        ctx: &CallContext,
        id_or_email: &str,
        include_role: bool,
    ) -> Result<User, RemoteError>;

    /// `POST /users` with a single invitee.
    async fn create_user(
        &self,
        ctx: &CallContext,
        request: UserCreateRequest,
    ) -> Result<UserCreateResponse, RemoteError>;

    /// `PATCH /users/{id}/role`
    async fn patch_user_role(
        &self,
        ctx: &CallContext,
        id: &str,
        change: RoleChange,
    ) -> Result<(), RemoteError>;

    /// `DELETE /users/{id}`
    async fn delete_user(&self, ctx: &CallContext, id: &str) -> Result<(), RemoteError>;

    /// `GET /users`
    async fn list_users(
        &self,
        ctx: &CallContext,
        filters: &UserListFilters,
    ) -> Result<UserList, RemoteError>;
}

#[async_trait]
pub trait ExecutionsApi: Send + Sync {
    /// `POST /executions/{id}/retry`
    async fn retry_execution(&self, ctx: &CallContext, id: u64) -> Result<Execution, RemoteError>;

    /// `GET /executions/{id}`
    async fn get_execution(
        &self,
        ctx: &CallContext,
        id: u64,
        include_data: Option<bool>,
    ) -> Result<Execution, RemoteError>;

    /// `GET /executions`
    async fn list_executions(
        &self,
        ctx: &CallContext,
        filters: &ExecutionListFilters,
    ) -> Result<ExecutionList, RemoteError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListFilters {
    pub project_id: Option<String>,
}

impl UserListFilters {
    /// Query parameters; roles are always requested.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("includeRole", "true".to_string())];
        if let Some(project_id) = &self.project_id {
            query.push(("projectId", project_id.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionListFilters {
    pub workflow_id: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<String>,
    pub include_data: Option<bool>,
}

impl ExecutionListFilters {
    /// Query parameters for the filters that are set. Absent filters are omitted.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(workflow_id) = &self.workflow_id {
            query.push(("workflowId", workflow_id.clone()));
        }
        if let Some(project_id) = &self.project_id {
            query.push(("projectId", project_id.clone()));
        }
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(include_data) = self.include_data {
            query.push(("includeData", include_data.to_string()));
        }
        query
    }
}
