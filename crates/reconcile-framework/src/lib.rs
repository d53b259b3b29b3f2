//! # Reconcile Framework
//!
//! Building blocks for declarative resource reconciliation: a host declares the desired
//! state of an entity that lives in a remote system, and a reconciler creates, reads,
//! updates or deletes the remote entity so it matches, then maps the remote representation
//! back into a locally-typed model.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Model Layer** ([`Field`], [`Nullable`]) - tri-state attributes and their mapping to
//!    remote optional values
//! 2. **Entity Layer** ([`DurableEntity`], [`ActionEntity`], [`ListSource`]) - what an entity
//!    kind supplies: wire calls, translator, mutation policy
//! 3. **Engine Layer** ([`DurableReconciler`], [`ActionReconciler`], [`ListReconciler`]) - the
//!    lifecycle logic, written once for every entity kind
//!
//! Shared pieces:
//!
//! - [`identifier`] picks the attribute that addresses an entity;
//! - [`policy`] classifies attributes as immutable, mutable or computed;
//! - [`ClientSlot`] and [`ProviderData`] carry the configured API client into each reconciler;
//! - [`CallContext`] carries cancellation and a deadline into every remote call;
//! - [`ReconcileError`] is the single error type every operation reports.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use reconcile_framework::{
//!     CallContext, DurableEntity, DurableReconciler, Field, MutationPlan, ReconcileError,
//!     RemoteError,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tag { id: Field<String>, label: Field<String> }
//!
//! struct StaticApi;
//!
//! struct TagEntity;
//!
//! #[async_trait]
//! impl DurableEntity for TagEntity {
//!     const RESOURCE_TYPE: &'static str = "demo_tag";
//!     type Model = Tag;
//!     type Remote = String;
//!     type CreatePayload = String;
//!     type Created = String;
//!     type Patch = String;
//!     type Client = StaticApi;
//!
//!     fn seed(id: String) -> Tag { Tag { id: Field::Known(id), ..Tag::default() } }
//!     fn stored_id(model: &Tag) -> Result<String, ReconcileError> {
//!         Ok(model.id.to_option().unwrap_or_default())
//!     }
//!     fn create_payload(plan: &Tag) -> Result<String, ReconcileError> {
//!         Ok(plan.label.to_option().unwrap_or_default())
//!     }
//!     fn created_id(_: &String) -> Option<String> { Some("t1".into()) }
//!     fn plan_update(declared: &Tag, stored: &Tag) -> MutationPlan<String> {
//!         MutationPlan::new("demo_tag").mutable("label", &declared.label, &stored.label, |l| l)
//!     }
//!     fn translate(id: &str, remote: &String, model: &mut Tag) {
//!         model.id = Field::Known(id.to_string());
//!         model.label = Field::Known(remote.clone());
//!     }
//!     async fn fetch(_: &StaticApi, _: &CallContext, _: &str) -> Result<String, RemoteError> {
//!         Ok("urgent".into())
//!     }
//!     async fn create(_: &StaticApi, _: &CallContext, _: String) -> Result<String, RemoteError> {
//!         Ok(String::new())
//!     }
//!     async fn patch(_: &StaticApi, _: &CallContext, _: &str, _: String) -> Result<(), RemoteError> {
//!         Ok(())
//!     }
//!     async fn delete(_: &StaticApi, _: &CallContext, _: &str) -> Result<(), RemoteError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let tags = DurableReconciler::<TagEntity>::with_client(Arc::new(StaticApi));
//!     let plan = Tag { id: Field::Unknown, label: Field::from("urgent") };
//!     let tag = tags.create(&CallContext::new(), plan).await.unwrap();
//!     assert_eq!(tag.id, Field::from("t1"));
//! }
//! ```

pub mod action;
pub mod client;
pub mod context;
pub mod durable;
pub mod entity;
pub mod error;
pub mod field;
pub mod identifier;
pub mod list;
pub mod policy;
pub mod tracing;

// Re-export core types for convenience
pub use action::{ActionReconciler, ActionState};
pub use client::{ClientSlot, ProviderData};
pub use context::CallContext;
pub use durable::DurableReconciler;
pub use entity::{ActionEntity, DurableEntity, ListSource};
pub use error::{ErrorKind, Operation, ReconcileError, RemoteError};
pub use field::{Field, Nullable};
pub use identifier::{resolve_identifier, Candidate, ResolvedIdentifier};
pub use list::{ListReconciler, DEFAULT_LIST_CAPACITY};
pub use policy::{FieldPatch, MutationPlan};
