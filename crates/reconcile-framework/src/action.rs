//! # Action Reconciler
//!
//! Runs a one-shot remote side effect as if it were a resource. The lifecycle is an
//! explicit two-state machine:
//!
//! ```text
//!   Unmanaged --create--> Invoked(model) --read--> Invoked(model)
//!       ^                        |
//!       +--------delete----------+      update: always rejected
//! ```
//!
//! `read`, `update` and `delete` never talk to the remote, so they are synchronous and
//! take no [`CallContext`]. Repeating the action means creating a new resource.

use crate::client::{ClientSlot, ProviderData};
use crate::context::CallContext;
use crate::entity::ActionEntity;
use crate::error::{Operation, ReconcileError};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where an action instance is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionState<M> {
    Unmanaged,
    Invoked(M),
}

impl<M> ActionState<M> {
    pub fn is_invoked(&self) -> bool {
        matches!(self, ActionState::Invoked(_))
    }

    pub fn model(&self) -> Option<&M> {
        match self {
            ActionState::Invoked(model) => Some(model),
            ActionState::Unmanaged => None,
        }
    }

    pub fn into_model(self) -> Option<M> {
        match self {
            ActionState::Invoked(model) => Some(model),
            ActionState::Unmanaged => None,
        }
    }
}

pub struct ActionReconciler<A: ActionEntity> {
    client: ClientSlot<A::Client>,
    _action: PhantomData<fn() -> A>,
}

impl<A: ActionEntity> Default for ActionReconciler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ActionEntity> ActionReconciler<A> {
    pub fn new() -> Self {
        Self {
            client: ClientSlot::empty(A::RESOURCE_TYPE),
            _action: PhantomData,
        }
    }

    pub fn with_client(client: Arc<A::Client>) -> Self {
        Self {
            client: ClientSlot::with_client(A::RESOURCE_TYPE, client),
            _action: PhantomData,
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.client.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Seeds the source id only; the captured result stays unset until a create.
    pub fn import(&self, source_id: impl Into<String>) -> A::Model {
        A::seed(source_id.into())
    }

    /// Invokes the action once and captures its result. No read-back.
    pub async fn create(
        &self,
        ctx: &CallContext,
        plan: A::Model,
    ) -> Result<ActionState<A::Model>, ReconcileError> {
        let client = self.client.get()?;
        let source_id = A::source_id(&plan)?;
        debug!(resource_type = A::RESOURCE_TYPE, %source_id, "Invoking remote action");

        let outcome = A::invoke(client, ctx, &source_id).await.map_err(|e| {
            warn!(resource_type = A::RESOURCE_TYPE, %source_id, error = %e, "Action failed");
            ReconcileError::remote(A::RESOURCE_TYPE, Operation::Invoke, source_id.to_string(), e)
        })?;

        let mut model = plan;
        A::capture(&outcome, &mut model);
        info!(resource_type = A::RESOURCE_TYPE, %source_id, operation = "create", "Action invoked");
        Ok(ActionState::Invoked(model))
    }

    /// Returns the stored state untouched.
    pub fn read(&self, state: ActionState<A::Model>) -> ActionState<A::Model> {
        state
    }

    /// Always rejected; the stored state is left as it was.
    pub fn update(
        &self,
        _declared: &A::Model,
        _stored: &ActionState<A::Model>,
    ) -> Result<ActionState<A::Model>, ReconcileError> {
        warn!(resource_type = A::RESOURCE_TYPE, "Update requested for an action resource");
        Err(ReconcileError::UpdateNotSupported {
            resource: A::RESOURCE_TYPE,
        })
    }

    /// Forgets the instance locally. The remote side effect is not undone.
    pub fn delete(&self, _state: ActionState<A::Model>) -> ActionState<A::Model> {
        debug!(resource_type = A::RESOURCE_TYPE, "Releasing action resource");
        ActionState::Unmanaged
    }
}
