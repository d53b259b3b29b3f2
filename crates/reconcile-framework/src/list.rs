//! # List Reconciler
//!
//! Fetches a filtered remote collection and translates each element. Filters are
//! forwarded as given and server order is preserved.

use crate::client::{ClientSlot, ProviderData};
use crate::context::CallContext;
use crate::entity::ListSource;
use crate::error::{Operation, ReconcileError};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Initial capacity of every list result.
pub const DEFAULT_LIST_CAPACITY: usize = 10;

pub struct ListReconciler<L: ListSource> {
    client: ClientSlot<L::Client>,
    _source: PhantomData<fn() -> L>,
}

impl<L: ListSource> Default for ListReconciler<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ListSource> ListReconciler<L> {
    pub fn new() -> Self {
        Self {
            client: ClientSlot::empty(L::RESOURCE_TYPE),
            _source: PhantomData,
        }
    }

    pub fn with_client(client: Arc<L::Client>) -> Self {
        Self {
            client: ClientSlot::with_client(L::RESOURCE_TYPE, client),
            _source: PhantomData,
        }
    }

    pub fn configure(&mut self, data: Option<&ProviderData>) -> Result<(), ReconcileError> {
        self.client.configure(data)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// A response without a collection field yields an empty list, not an error.
    pub async fn list(
        &self,
        ctx: &CallContext,
        filters: &L::Filters,
    ) -> Result<Vec<L::Item>, ReconcileError> {
        let client = self.client.get()?;
        debug!(resource_type = L::RESOURCE_TYPE, ?filters, "Listing remote collection");

        let page = L::fetch_all(client, ctx, filters).await.map_err(|e| {
            warn!(resource_type = L::RESOURCE_TYPE, error = %e, "List failed");
            ReconcileError::remote(L::RESOURCE_TYPE, Operation::List, L::RESOURCE_TYPE, e)
        })?;

        let mut items = Vec::with_capacity(DEFAULT_LIST_CAPACITY);
        items.extend(page.iter().flatten().map(L::translate));
        info!(resource_type = L::RESOURCE_TYPE, count = items.len(), "Listed");
        Ok(items)
    }
}
