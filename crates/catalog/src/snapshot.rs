use crate::buckets::{CategoryBuckets, group_by_category};
use crate::product::{Product, ProductId};

/// The complete product list as delivered by the host at one point in time.
///
/// Immutable once constructed; the core never mutates or refreshes it.
/// Selections made against an older snapshot may fail to resolve against a
/// newer one, which the image resolver tolerates by omission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Linear id lookup. Snapshots are small (one screen of products);
    /// an index would not pay for itself.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Partition this snapshot into category buckets (locals appended).
    pub fn buckets(&self) -> CategoryBuckets {
        group_by_category(self.products.iter().cloned())
    }
}

impl FromIterator<Product> for CatalogSnapshot {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
