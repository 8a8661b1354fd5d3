use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Outfit-slot category a product is classified into.
///
/// Fixed closed set. `Other` is the fallback bucket for unmatched products
/// and is never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Headwear,
    Accessories,
    Other,
}

/// Keyword tables, one per non-`Other` category.
///
/// Matching is substring containment against the lower-cased `title` and
/// `product_type`, not whole-word matching: "Top-Loading Washer" lands in
/// `Top`. That is the contract, callers must accept the false positives.
const TOP_KEYWORDS: &[&str] = &[
    "shirt", "tee", "top", "hoodie", "sweater", "jacket", "blouse", "cardigan",
];

const BOTTOM_KEYWORDS: &[&str] = &[
    "pant", "jean", "trouser", "short", "skirt", "legging", "bottom",
];

const HEADWEAR_KEYWORDS: &[&str] = &["hat", "cap", "beanie", "helmet", "visor", "headband"];

const ACCESSORY_KEYWORDS: &[&str] = &[
    "belt", "bag", "glasses", "watch", "necklace", "scarf", "bracelet", "accessor",
];

impl Category {
    /// Priority order for categorization. First match wins.
    pub const PRIORITY: [Category; 4] = [
        Category::Top,
        Category::Bottom,
        Category::Headwear,
        Category::Accessories,
    ];

    /// The keyword set driving classification into this category.
    ///
    /// `Other` has no keywords; it is reached only by falling through.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Top => TOP_KEYWORDS,
            Category::Bottom => BOTTOM_KEYWORDS,
            Category::Headwear => HEADWEAR_KEYWORDS,
            Category::Accessories => ACCESSORY_KEYWORDS,
            Category::Other => &[],
        }
    }

    /// Whether the picker shows this category to the user.
    pub fn is_visible(self) -> bool {
        !matches!(self, Category::Other)
    }

    /// Display label for the picker rack.
    pub fn label(self) -> &'static str {
        match self {
            Category::Top => "Tops",
            Category::Bottom => "Bottoms",
            Category::Headwear => "Headwear",
            Category::Accessories => "Accessories",
            Category::Other => "Other",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a product into exactly one category.
///
/// Pure function of `title` and `product_type`: both are lower-cased and
/// tested against each category's keyword set in `Category::PRIORITY` order;
/// the first category matching either field wins, otherwise `Other`.
pub fn categorize(product: &Product) -> Category {
    let title = product.title.to_lowercase();
    let product_type = product
        .product_type
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    for category in Category::PRIORITY {
        if category
            .keywords()
            .iter()
            .any(|kw| title.contains(kw) || product_type.contains(kw))
        {
            return category;
        }
    }

    Category::Other
}
