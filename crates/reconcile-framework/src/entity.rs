//! # Entity Traits
//!
//! The contracts an entity kind implements so the generic reconcilers can manage it.
//! There are three flavors:
//!
//! - [`DurableEntity`]: a long-lived remote object with full CRUD (e.g. a user).
//! - [`ActionEntity`]: a one-shot remote side effect modelled as a resource (e.g. an
//!   execution retry).
//! - [`ListSource`]: a read-only, possibly filtered collection.
//!
//! # Architecture Note
//! By defining these contracts once, the reconcile logic (read-back after create,
//! 404 handling, immutable checks, the action state machine) is written *once* in
//! [`crate::DurableReconciler`], [`crate::ActionReconciler`] and [`crate::ListReconciler`].
//! An entity kind only supplies its wire calls, its translator and its mutation policy.
//!
//! Associated types keep each kind honest: a user reconciler cannot be handed an
//! execution payload, and the compiler proves it.

use crate::context::CallContext;
use crate::error::{ReconcileError, RemoteError};
use crate::policy::MutationPlan;
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// A remote entity with a stable id and a create/read/patch/delete lifecycle.
#[async_trait]
pub trait DurableEntity: Send + Sync + 'static {
    /// Host-visible resource type name, also used in log fields.
    const RESOURCE_TYPE: &'static str;

    /// Local model (all attributes are `Field`s).
    type Model: Clone + Debug + Send + Sync;

    /// Remote representation returned by a fetch.
    type Remote: Debug + Send + Sync;

    /// Body of the create call. Carries creation-time attributes only.
    type CreatePayload: Debug + Send + Sync;

    /// Response of the create call.
    type Created: Debug + Send + Sync;

    /// One targeted change to a mutable attribute.
    type Patch: Debug + Send + Sync;

    /// The outbound API this entity talks through.
    type Client: Send + Sync + 'static;

    /// Model holding only the primary id, as produced by import.
    fn seed(id: String) -> Self::Model;

    /// Id of an already-managed entity.
    fn stored_id(model: &Self::Model) -> Result<String, ReconcileError>;

    fn create_payload(plan: &Self::Model) -> Result<Self::CreatePayload, ReconcileError>;

    /// Id assigned by the remote, if the response carried one.
    fn created_id(created: &Self::Created) -> Option<String>;

    fn plan_update(declared: &Self::Model, stored: &Self::Model) -> MutationPlan<Self::Patch>;

    /// Writes every mapped attribute of `remote` into `model`.
    ///
    /// `id` is the id the entity was addressed by; it stands in for the remote id when the
    /// payload omits it.
    fn translate(id: &str, remote: &Self::Remote, model: &mut Self::Model);

    async fn fetch(
        client: &Self::Client,
        ctx: &CallContext,
        id: &str,
    ) -> Result<Self::Remote, RemoteError>;

    async fn create(
        client: &Self::Client,
        ctx: &CallContext,
        payload: Self::CreatePayload,
    ) -> Result<Self::Created, RemoteError>;

    async fn patch(
        client: &Self::Client,
        ctx: &CallContext,
        id: &str,
        patch: Self::Patch,
    ) -> Result<(), RemoteError>;

    async fn delete(client: &Self::Client, ctx: &CallContext, id: &str)
        -> Result<(), RemoteError>;
}

/// A remote side effect managed as a resource.
///
/// Creating the resource invokes the action once. There is no remote object to read back,
/// patch or delete afterwards; the reconciler keeps the captured result as-is.
#[async_trait]
pub trait ActionEntity: Send + Sync + 'static {
    const RESOURCE_TYPE: &'static str;

    type Model: Clone + Debug + Send + Sync;

    /// What the action returned.
    type Outcome: Debug + Send + Sync;

    type Client: Send + Sync + 'static;

    /// Parsed id of the entity the action targets.
    type SourceId: Display + Send + Sync;

    /// Model holding only the source id, as produced by import.
    fn seed(source_id: String) -> Self::Model;

    /// Validates and parses the declared source id.
    fn source_id(plan: &Self::Model) -> Result<Self::SourceId, ReconcileError>;

    async fn invoke(
        client: &Self::Client,
        ctx: &CallContext,
        source_id: &Self::SourceId,
    ) -> Result<Self::Outcome, RemoteError>;

    /// Writes the outcome's attributes into `model`.
    fn capture(outcome: &Self::Outcome, model: &mut Self::Model);
}

/// A read-only remote collection.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    const RESOURCE_TYPE: &'static str;

    type Filters: Debug + Send + Sync;
    type Remote: Send + Sync;
    type Item: Debug + Send + Sync;
    type Client: Send + Sync + 'static;

    /// `Ok(None)` means the response had no collection field at all.
    async fn fetch_all(
        client: &Self::Client,
        ctx: &CallContext,
        filters: &Self::Filters,
    ) -> Result<Option<Vec<Self::Remote>>, RemoteError>;

    fn translate(remote: &Self::Remote) -> Self::Item;
}
