//! List-filter resolver
//!
//! Fetches a collection from a list endpoint and resolves a single entity by
//! an exact, case-sensitive match on one of its fields. Entities are scanned
//! in the order the API returns them and the first match wins; the API is
//! not known to guarantee uniqueness of every selector field.

use chainlaunch_core::{ProviderError, RemoteClient, Result, decode_body};
use serde::de::DeserializeOwned;

/// Envelope of a list endpoint response
pub trait Listing: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

/// A list endpoint bound to a client
pub struct ListFilter<'a> {
    client: &'a dyn RemoteClient,
    path: String,
}

impl<'a> ListFilter<'a> {
    pub fn new(client: &'a dyn RemoteClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetch the whole collection
    pub async fn fetch<L: Listing>(&self) -> Result<Vec<L::Item>> {
        tracing::debug!("Listing {}", self.path);
        let body = self.client.get(&self.path).await?;
        let listing: L = decode_body(&self.path, &body)?;
        Ok(listing.into_items())
    }

    /// Fetch the collection and return the first entity whose `field` equals `query`
    pub async fn find_first<L, F>(&self, field: &str, query: &str, selector: F) -> Result<L::Item>
    where
        L: Listing,
        F: Fn(&L::Item) -> &str,
    {
        let items = self.fetch::<L>().await?;
        let total = items.len();
        select_first(items, query, selector).ok_or_else(|| {
            tracing::debug!("No match for {}={:?} among {} entities", field, query, total);
            ProviderError::NotFound(format!(
                "no entity with {} {:?} at {}",
                field, query, self.path
            ))
        })
    }
}

/// First item whose selector equals `query` exactly
pub fn select_first<T, F>(items: Vec<T>, query: &str, selector: F) -> Option<T>
where
    F: Fn(&T) -> &str,
{
    items.into_iter().find(|item| selector(item) == query)
}
