//! # n8n Provider Core
//!
//! > **Declarative reconciliation of n8n users and executions.**
//!
//! A host describes the users and execution retries it wants; this crate creates, reads,
//! updates or deletes the matching entities through the n8n public API and maps the
//! responses back into the host's tri-state models.
//!
//! ## 🏗️ Design Philosophy
//!
//! The lifecycle logic lives in the `reconcile_framework` crate and is written once. This
//! crate only supplies what is n8n-specific about each entity kind:
//!
//! - the wire calls ([`clients::UsersApi`], [`clients::ExecutionsApi`]);
//! - the translators from remote JSON to local models ([`user::translate`],
//!   [`execution::translate`]);
//! - the mutation policy of each attribute (see [`user::UserEntity`]).
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Tri-state attributes
//! Every model attribute is a [`Field`]: `Known`, `Null` or `Unknown` (computed, not yet
//! read). Remote optional values map to `Null`, never to a zero value.
//!
//! ### 2. Durable vs. action resources
//! `n8n_user` is durable: it reads back after every write and rejects email changes.
//! `n8n_execution_retry` is an action: creating it retries an execution once, reads return
//! what was captured, and updates are refused.
//!
//! ### 3. Late binding
//! Resources are built unconfigured and receive the shared [`N8nClient`] through
//! `configure(Option<&ProviderData>)`. Until then, any operation that would reach the
//! remote fails with `NotConfigured`.
//!
//! ### 4. Observability
//! Every operation emits structured `tracing` events. Call [`setup_tracing`] once to see
//! them on stderr, filtered by `RUST_LOG`.
//!
//! ## 🗺️ Module Tour
//!
//! - [`provider`]: configuration and wiring ([`N8nProvider`]).
//! - [`config`]: the provider block and its environment fallbacks.
//! - [`clients`]: the outbound API traits and their `reqwest` implementation.
//! - [`model`]: wire types and local models.
//! - [`user`], [`execution`]: the entity kinds.
//! - [`mock`]: a scripted fake of the API for tests.
//!
//! ## 🚀 Quick Start
//!
//! ```no_run
//! use n8n_provider_core::{CallContext, N8nProvider, ProviderSettings, UserResourceModel};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut provider = N8nProvider::new(env!("CARGO_PKG_VERSION"));
//! provider.configure(&ProviderSettings {
//!     base_url: Some("https://n8n.example.com".into()),
//!     api_key: None, // falls back to N8N_API_TOKEN
//! })?;
//!
//! let resources = provider.resources()?;
//! let ctx = CallContext::new();
//! let user = resources
//!     .users
//!     .create(&ctx, UserResourceModel::planned("ada@example.com", Some("global:member")))
//!     .await?;
//! println!("invited {}", user.id);
//! # Ok(())
//! # }
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod clients;
pub mod config;
pub mod execution;
pub mod mock;
pub mod model;
pub mod provider;
pub mod user;

pub use clients::N8nClient;
pub use config::{ConfigError, ProviderConfig, ProviderSettings};
pub use model::{
    ExecutionDataSourceModel, ExecutionItem, ExecutionsDataSourceModel, RetryResourceModel,
    UserDataSourceModel, UserItem, UserResourceModel, UsersDataSourceModel,
};
pub use provider::{DataSources, N8nProvider, Resources};
pub use reconcile_framework::tracing::setup_tracing;
pub use reconcile_framework::{
    ActionState, CallContext, ErrorKind, Field, ProviderData, ReconcileError, RemoteError,
};
