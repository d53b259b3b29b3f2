//! The `n8n_user` and `n8n_users` data sources.

use super::translate::{apply_to_data_source, to_item};
use crate::clients::{N8nClient, UserListFilters};
use crate::model::wire::User;
use crate::model::{UserDataSourceModel, UserItem, UsersDataSourceModel};
use async_trait::async_trait;
use reconcile_framework::{
    resolve_identifier, CallContext, Candidate, ClientSlot, ListReconciler, ListSource,
    Operation, ProviderData, ReconcileError, RemoteError,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Looks up one user by `id`, or by `email` when no id is given.
pub struct UserDataSource {
    client: ClientSlot<N8nClient>,
}

impl Default for UserDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDataSource {
    pub const TYPE_NAME: &'static str = "n8n_user";

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
        mut config: UserDataSourceModel,
    ) -> Result<UserDataSourceModel, ReconcileError> {
        let client = self.client.get()?;
        let identifier = resolve_identifier([
            Candidate::new("id", &config.id),
            Candidate::new("email", &config.email),
        ])?;
        debug!(attribute = identifier.attribute, value = %identifier.value, "Looking up user");

        let user = client
            .users()
            .get_user(ctx, &identifier.value, true)
            .await
            .map_err(|e| {
                let target = identifier.value.clone();
                ReconcileError::remote(Self::TYPE_NAME, Operation::Read, target, e)
            })?;

        apply_to_data_source(&user, &mut config);
        Ok(config)
    }
}

/// Every user visible to the API key, optionally limited to one project.
pub struct UserListing;

#[async_trait]
impl ListSource for UserListing {
    const RESOURCE_TYPE: &'static str = "n8n_users";
    type Filters = UserListFilters;
    type Remote = User;
    type Item = UserItem;
    type Client = N8nClient;

    async fn fetch_all(
        client: &N8nClient,
        ctx: &CallContext,
        filters: &UserListFilters,
    ) -> Result<Option<Vec<User>>, RemoteError> {
        let list = client.users().list_users(ctx, filters).await?;
        Ok(list.data)
    }

    fn translate(remote: &User) -> UserItem {
        to_item(remote)
    }
}

#[derive(Default)]
pub struct UsersDataSource {
    inner: ListReconciler<UserListing>,
}

impl UsersDataSource {
    pub const TYPE_NAME: &'static str = UserListing::RESOURCE_TYPE;

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
        mut config: UsersDataSourceModel,
    ) -> Result<UsersDataSourceModel, ReconcileError> {
        let filters = UserListFilters {
            project_id: config.project_id.to_option(),
        };
        config.users = Some(self.inner.list(ctx, &filters).await?);
        Ok(config)
    }
}
