//! Host-supplied collaborators: catalog and identity.
//!
//! Loading and error states are terminal here: the core never retries, the
//! caller decides whether to re-request a snapshot.

use thiserror::Error;

use figforge_catalog::{CatalogSnapshot, Product};

/// Catalog provider failure, propagated upward unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The provider has not finished loading the snapshot.
    #[error("catalog still loading")]
    Loading,

    /// The provider reported an error.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Furnishes the ordered product list as a complete snapshot.
pub trait CatalogProvider {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError>;
}

/// Furnishes a display name used only for cosmetic labeling. Never read by
/// the categorizer, the selection store, or the image resolver.
pub trait IdentityProvider {
    fn display_name(&self) -> Option<String>;
}

/// Catalog provider backed by a fixed in-memory product list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogProvider {
    products: Vec<Product>,
}

impl InMemoryCatalogProvider {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CatalogProvider for InMemoryCatalogProvider {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        Ok(CatalogSnapshot::new(self.products.clone()))
    }
}

/// Catalog provider that always reports the given terminal state.
#[derive(Debug, Clone)]
pub struct UnavailableCatalog(pub CatalogError);

impl CatalogProvider for UnavailableCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        Err(self.0.clone())
    }
}

/// Identity provider backed by a fixed optional display name.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<String>);

impl StaticIdentity {
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn display_name(&self) -> Option<String> {
        self.0.clone()
    }
}
