pub mod notion;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "store" trait that clients must implement.
///
/// A store persists shared links as records in an external table. Every call
/// creates a new record; there is no lookup or deduplication.
#[async_trait]
pub trait GenericStoreClient: Send + Sync + 'static {
    /// Create one record holding the page title and the link exactly as given.
    async fn create_link_record(&self, title: &str, url: &str) -> Void;
}

// Structs.

/// Store client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn GenericStoreClient>,
}

impl Deref for StoreClient {
    type Target = dyn GenericStoreClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl StoreClient {
    pub fn new(inner: Arc<dyn GenericStoreClient>) -> Self {
        Self { inner }
    }
}
