use crate::category::{Category, categorize};
use crate::product::Product;

/// Catalog-external accessory records bundled into every `Accessories`
/// bucket: bonus items the host catalog does not carry.
pub fn local_accessories() -> Vec<Product> {
    vec![
        Product::new("local-skateboard", "Skateboard")
            .with_product_type("Accessories")
            .with_image("/accessories/Skateboard.png"),
        Product::new("local-balloon", "Balloon")
            .with_product_type("Accessories")
            .with_image("/accessories/Balloon.png"),
        Product::new("local-flower", "Flower")
            .with_product_type("Accessories")
            .with_image("/accessories/Flower.png"),
    ]
}

/// Per-category buckets produced by `group_by_category`.
///
/// Relative input order is preserved within each bucket. The `Accessories`
/// bucket additionally carries the fixed local accessories, appended after
/// all host products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBuckets {
    pub tops: Vec<Product>,
    pub bottoms: Vec<Product>,
    pub headwear: Vec<Product>,
    pub accessories: Vec<Product>,
    pub other: Vec<Product>,
}

impl CategoryBuckets {
    pub fn get(&self, category: Category) -> &[Product] {
        match category {
            Category::Top => &self.tops,
            Category::Bottom => &self.bottoms,
            Category::Headwear => &self.headwear,
            Category::Accessories => &self.accessories,
            Category::Other => &self.other,
        }
    }

    /// Buckets in rack order, excluding `Other` (never shown to the user).
    pub fn visible(&self) -> [(Category, &[Product]); 4] {
        [
            (Category::Top, self.tops.as_slice()),
            (Category::Bottom, self.bottoms.as_slice()),
            (Category::Headwear, self.headwear.as_slice()),
            (Category::Accessories, self.accessories.as_slice()),
        ]
    }

    /// Total items across all buckets, local accessories included.
    pub fn len(&self) -> usize {
        self.tops.len()
            + self.bottoms.len()
            + self.headwear.len()
            + self.accessories.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition a product list into category buckets.
///
/// Every input product lands in exactly one bucket, in input order. The
/// fixed local accessories are appended to the `Accessories` bucket
/// unconditionally afterwards.
pub fn group_by_category(products: impl IntoIterator<Item = Product>) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::default();

    for product in products {
        match categorize(&product) {
            Category::Top => buckets.tops.push(product),
            Category::Bottom => buckets.bottoms.push(product),
            Category::Headwear => buckets.headwear.push(product),
            Category::Accessories => buckets.accessories.push(product),
            Category::Other => buckets.other.push(product),
        }
    }

    buckets.accessories.extend(local_accessories());
    buckets
}
