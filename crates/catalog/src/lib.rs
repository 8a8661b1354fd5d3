//! Catalog domain module: product records and keyword categorization.
//!
//! This crate contains the catalog side of the customizer, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage): the host
//! delivers a complete product snapshot, and this crate partitions it into
//! the fixed outfit-slot categories the picker renders.

pub mod buckets;
pub mod category;
pub mod product;
pub mod snapshot;

pub use buckets::{CategoryBuckets, group_by_category, local_accessories};
pub use category::{Category, categorize};
pub use product::{ImageRef, Price, Product, ProductId};
pub use snapshot::CatalogSnapshot;
