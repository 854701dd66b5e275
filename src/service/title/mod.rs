pub mod scrape;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic "title" trait that clients must implement.
///
/// Given a shared link, a title client fetches the page behind it and
/// returns the text of its `<title>` element.
#[async_trait]
pub trait GenericTitleClient: Send + Sync + 'static {
    /// Fetch the page at `url` and extract its title.
    ///
    /// Any failure (network, status, size ceiling, or a page without a
    /// usable title) is returned as an error; callers treat them alike.
    async fn fetch_title(&self, url: &str) -> Res<String>;
}

// Structs.

/// Title client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct TitleClient {
    inner: Arc<dyn GenericTitleClient>,
}

impl Deref for TitleClient {
    type Target = dyn GenericTitleClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl TitleClient {
    pub fn new(inner: Arc<dyn GenericTitleClient>) -> Self {
        Self { inner }
    }
}
