//! # Client Handle
//!
//! The host builds one API client per provider and hands it to every resource through an
//! opaque [`ProviderData`] value. Each reconciler keeps it in a [`ClientSlot`]: empty
//! until `configure` runs, then read-only.
//!
//! # Architecture Note
//! The handle is injected per reconciler instead of living in a global. Tests build a
//! reconciler around a fake client with [`ClientSlot::with_client`] and never touch
//! provider wiring at all.

use crate::error::ReconcileError;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Opaque, cheaply cloneable provider payload.
#[derive(Clone)]
pub struct ProviderData {
    handle: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ProviderData {
    pub fn new<T: Any + Send + Sync>(handle: Arc<T>) -> Self {
        Self {
            handle,
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.handle.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderData")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Configure-once holder for the client a reconciler talks through.
pub struct ClientSlot<C> {
    resource: &'static str,
    client: Option<Arc<C>>,
}

impl<C: Any + Send + Sync> ClientSlot<C> {
    pub fn empty(resource: &'static str) -> Self {
        Self {
            resource,
            client: None,
        }
    }

    pub fn with_client(resource: &'static str, client: Arc<C>) -> Self {
        Self {
            resource,
            client: Some(client),
        }
    }

    /// Installs the client carried by `data`.
    ///
    /// `None` means the host has not configured the provider yet and is ignored.
    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        let Some(data) = data else {
            return Ok(());
        };
        let client = data
            .downcast::<C>()
            .ok_or(ReconcileError::ClientTypeMismatch {
                expected: type_name::<C>(),
                actual: data.type_name(),
            })?;
        self.client = Some(client);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// The client, or [`ReconcileError::NotConfigured`].
    pub fn get(&self) -> Result<&C, ReconcileError> {
        self.client
            .as_deref()
            .ok_or(ReconcileError::NotConfigured {
                resource: self.resource,
            })
    }
}

impl<C> fmt::Debug for ClientSlot<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSlot")
            .field("resource", &self.resource)
            .field("configured", &self.client.is_some())
            .finish()
    }
}
