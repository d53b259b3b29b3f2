//! # Durable Reconciler
//!
//! The generic CRUD engine for any [`DurableEntity`].
//!
//! | Operation | Remote calls | Notes |
//! |-----------|--------------|-------|
//! | `create`  | create, fetch | missing id in the create response fails; the read-back is authoritative |
//! | `read`    | fetch | 404 is reported as `RemoteNotFound` so the host can drop the entity |
//! | `update`  | patch per changed mutable attribute, fetch | immutable violations fail before any call |
//! | `delete`  | delete | 404 counts as success |
//! | `import`  | none | seeds the id attribute |
//!
//! The reconciler holds no mutable state besides its [`ClientSlot`], so a single instance
//! may serve concurrent operations on different entities.

use crate::client::{ClientSlot, ProviderData};
use crate::context::CallContext;
use crate::entity::DurableEntity;
use crate::error::{Operation, ReconcileError};
use crate::policy::FieldPatch;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct DurableReconciler<E: DurableEntity> {
    client: ClientSlot<E::Client>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: DurableEntity> Default for DurableReconciler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DurableEntity> DurableReconciler<E> {
    pub fn new() -> Self {
        Self {
            client: ClientSlot::empty(E::RESOURCE_TYPE),
            _entity: PhantomData,
        }
    }

    pub fn with_client(client: Arc<E::Client>) -> Self {
        Self {
            client: ClientSlot::with_client(E::RESOURCE_TYPE, client),
            _entity: PhantomData,
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.client.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Seeds a model from an externally supplied id. No remote call.
    pub fn import(&self, id: impl Into<String>) -> E::Model {
        E::seed(id.into())
    }

    pub async fn create(
        &self,
        ctx: &CallContext,
        plan: E::Model,
    ) -> Result<E::Model, ReconcileError> {
        let client = self.client.get()?;
        let payload = E::create_payload(&plan)?;
        debug!(resource_type = E::RESOURCE_TYPE, ?payload, "Creating remote entity");

        let created = E::create(client, ctx, payload).await.map_err(|e| {
            warn!(resource_type = E::RESOURCE_TYPE, error = %e, "Create failed");
            ReconcileError::remote(E::RESOURCE_TYPE, Operation::Create, "new entity", e)
        })?;

        let id = E::created_id(&created)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                warn!(resource_type = E::RESOURCE_TYPE, ?created, "Create response has no id");
                ReconcileError::IncompleteCreateResponse {
                    resource: E::RESOURCE_TYPE,
                    detail: "the remote did not return the new entity's id".to_string(),
                }
            })?;

        let model = self.read_back(client, ctx, &id, plan).await?;
        info!(resource_type = E::RESOURCE_TYPE, %id, operation = "create", "Reconciled");
        Ok(model)
    }

    pub async fn read(
        &self,
        ctx: &CallContext,
        mut state: E::Model,
    ) -> Result<E::Model, ReconcileError> {
        let client = self.client.get()?;
        let id = E::stored_id(&state)?;
        debug!(resource_type = E::RESOURCE_TYPE, %id, "Reading remote entity");

        let remote = E::fetch(client, ctx, &id).await.map_err(|e| {
            if e.is_not_found() {
                info!(resource_type = E::RESOURCE_TYPE, %id, "Remote entity is gone");
            } else {
                warn!(resource_type = E::RESOURCE_TYPE, %id, error = %e, "Read failed");
            }
            ReconcileError::remote(E::RESOURCE_TYPE, Operation::Read, id.clone(), e)
        })?;

        E::translate(&id, &remote, &mut state);
        Ok(state)
    }

    /// Applies the declared model on top of the stored one.
    pub async fn update(
        &self,
        ctx: &CallContext,
        declared: E::Model,
        stored: &E::Model,
    ) -> Result<E::Model, ReconcileError> {
        let client = self.client.get()?;
        let patches = E::plan_update(&declared, stored).into_patches().map_err(|e| {
            warn!(resource_type = E::RESOURCE_TYPE, error = %e, "Update rejected");
            e
        })?;
        let id = E::stored_id(stored)?;

        for FieldPatch { field, patch } in patches {
            debug!(resource_type = E::RESOURCE_TYPE, %id, field, ?patch, "Patching remote entity");
            E::patch(client, ctx, &id, patch).await.map_err(|e| {
                warn!(resource_type = E::RESOURCE_TYPE, %id, field, error = %e, "Patch failed");
                ReconcileError::remote(E::RESOURCE_TYPE, Operation::Patch(field), id.clone(), e)
            })?;
        }

        let model = self.read_back(client, ctx, &id, declared).await?;
        info!(resource_type = E::RESOURCE_TYPE, %id, operation = "update", "Reconciled");
        Ok(model)
    }

    pub async fn delete(&self, ctx: &CallContext, stored: &E::Model) -> Result<(), ReconcileError> {
        let client = self.client.get()?;
        let id = E::stored_id(stored)?;
        debug!(resource_type = E::RESOURCE_TYPE, %id, "Deleting remote entity");

        match E::delete(client, ctx, &id).await {
            Ok(()) => {
                info!(resource_type = E::RESOURCE_TYPE, %id, operation = "delete", "Reconciled");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                info!(resource_type = E::RESOURCE_TYPE, %id, "Remote entity already gone");
                Ok(())
            }
            Err(e) => {
                warn!(resource_type = E::RESOURCE_TYPE, %id, error = %e, "Delete failed");
                Err(ReconcileError::remote(E::RESOURCE_TYPE, Operation::Delete, id, e))
            }
        }
    }

    async fn read_back(
        &self,
        client: &E::Client,
        ctx: &CallContext,
        id: &str,
        mut model: E::Model,
    ) -> Result<E::Model, ReconcileError> {
        let remote = E::fetch(client, ctx, id).await.map_err(|e| {
            warn!(resource_type = E::RESOURCE_TYPE, %id, error = %e, "Read-back failed");
            ReconcileError::remote(E::RESOURCE_TYPE, Operation::ReadBack, id, e)
        })?;
        E::translate(id, &remote, &mut model);
        Ok(model)
    }
}
