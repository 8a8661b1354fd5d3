use figforge_catalog::{CatalogSnapshot, ImageRef, Product, ProductId, local_accessories};
use figforge_outfit::{SelectionState, WearSlot};

/// The fixed avatar-head sprite every look starts with.
pub const DEFAULT_HEAD_ASSET: &str = "/faces/Faces.png";

/// Upper bound on a resolved look: head + 3 wear slots + 2 accessories.
pub const MAX_LOOK_IMAGES: usize = 6;

/// Resolve the ordered image list representing the current complete look.
///
/// Fixed order: the head asset first, then `Top`, `Bottom`, `Headwear` (one
/// image per populated slot), then accessories in insertion order. Wear-slot
/// ids resolve against the catalog snapshot; accessory ids resolve against
/// the snapshot and the fixed local-accessory set. A stored id that no
/// longer resolves, or resolves to a product without an image, is omitted
/// silently; a stale selection must never block the flow.
///
/// Pure projection: recomputed fresh on every call, never cached.
pub fn resolve_look_images(
    selection: &SelectionState,
    catalog: &CatalogSnapshot,
    head_asset: &ImageRef,
) -> Vec<ImageRef> {
    let mut images = Vec::with_capacity(MAX_LOOK_IMAGES);
    images.push(head_asset.clone());

    for slot in [WearSlot::Top, WearSlot::Bottom, WearSlot::Headwear] {
        let image = selection
            .wear(slot)
            .and_then(|id| catalog.get(id))
            .and_then(|product| product.image_url.clone());
        if let Some(image) = image {
            images.push(image);
        }
    }

    let locals = local_accessories();
    for id in selection.accessories() {
        let image = resolve_accessory(catalog, &locals, id).and_then(|p| p.image_url.clone());
        if let Some(image) = image {
            images.push(image);
        }
    }

    images
}

fn resolve_accessory<'a>(
    catalog: &'a CatalogSnapshot,
    locals: &'a [Product],
    id: &ProductId,
) -> Option<&'a Product> {
    catalog.get(id).or_else(|| locals.iter().find(|p| &p.id == id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figforge_catalog::Category;
    use figforge_core::{Aggregate, AggregateId, SessionId};
    use figforge_outfit::{
        Outfit, OutfitCommand, OutfitId, StartCustomization, ToggleSelection,
    };

    fn head() -> ImageRef {
        ImageRef::new(DEFAULT_HEAD_ASSET)
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            Product::new("p1", "Graphic Tee").with_image("/img/tee.png"),
            Product::new("p2", "Denim Jeans").with_image("/img/jeans.png"),
            Product::new("p3", "Leather Belt").with_image("/img/belt.png"),
            Product::new("p4", "Bucket Hat").with_image("/img/hat.png"),
            Product::new("p5", "Plain Tee"),
        ])
    }

    /// Drive a selection through the aggregate so the state under test is
    /// exactly what toggling produces.
    fn selection_of(picks: &[(Category, &str)]) -> SelectionState {
        let session_id = SessionId::new();
        let outfit_id = OutfitId::new(AggregateId::new());
        let mut outfit = Outfit::empty(outfit_id);

        let start = StartCustomization {
            session_id,
            outfit_id,
            occurred_at: chrono::Utc::now(),
        };
        let events = outfit
            .handle(&OutfitCommand::StartCustomization(start))
            .unwrap();
        outfit.apply(&events[0]);

        for (category, product_id) in picks {
            let cmd = ToggleSelection {
                session_id,
                outfit_id,
                category: *category,
                product_id: ProductId::new(*product_id),
                occurred_at: chrono::Utc::now(),
            };
            let events = outfit.handle(&OutfitCommand::ToggleSelection(cmd)).unwrap();
            for event in &events {
                outfit.apply(event);
            }
        }

        outfit.selection().clone()
    }

    #[test]
    fn empty_selection_resolves_to_head_only() {
        let images = resolve_look_images(&SelectionState::default(), &catalog(), &head());
        assert_eq!(images, [head()]);
    }

    #[test]
    fn head_asset_is_always_first() {
        let selection = selection_of(&[
            (Category::Top, "p1"),
            (Category::Bottom, "p2"),
            (Category::Accessories, "p3"),
        ]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(images[0], head());
    }

    #[test]
    fn full_look_is_ordered_head_then_slots_then_accessories() {
        let selection = selection_of(&[
            (Category::Accessories, "p3"),
            (Category::Headwear, "p4"),
            (Category::Top, "p1"),
            (Category::Bottom, "p2"),
        ]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(
            images,
            [
                head(),
                ImageRef::new("/img/tee.png"),
                ImageRef::new("/img/jeans.png"),
                ImageRef::new("/img/hat.png"),
                ImageRef::new("/img/belt.png"),
            ]
        );
    }

    #[test]
    fn stale_selection_is_omitted_without_disturbing_order() {
        let selection = selection_of(&[
            (Category::Top, "p1"),
            (Category::Bottom, "gone"),
            (Category::Headwear, "p4"),
        ]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(
            images,
            [head(), ImageRef::new("/img/tee.png"), ImageRef::new("/img/hat.png")]
        );
    }

    #[test]
    fn product_without_an_image_is_omitted() {
        let selection = selection_of(&[(Category::Top, "p5")]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(images, [head()]);
    }

    #[test]
    fn accessories_resolve_against_the_local_set_too() {
        let selection = selection_of(&[(Category::Accessories, "local-skateboard")]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(images, [head(), ImageRef::new("/accessories/Skateboard.png")]);
    }

    #[test]
    fn accessories_keep_insertion_order() {
        let selection = selection_of(&[
            (Category::Accessories, "p3"),
            (Category::Accessories, "local-balloon"),
        ]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(
            images,
            [
                head(),
                ImageRef::new("/img/belt.png"),
                ImageRef::new("/accessories/Balloon.png"),
            ]
        );
    }

    #[test]
    fn output_never_exceeds_the_bound() {
        let selection = selection_of(&[
            (Category::Top, "p1"),
            (Category::Bottom, "p2"),
            (Category::Headwear, "p4"),
            (Category::Accessories, "p3"),
            (Category::Accessories, "local-skateboard"),
        ]);

        let images = resolve_look_images(&selection, &catalog(), &head());
        assert_eq!(images.len(), MAX_LOOK_IMAGES);
    }

    #[test]
    fn graphic_tee_and_belt_scenario_resolves_end_to_end() {
        let catalog = CatalogSnapshot::new(vec![
            Product::new("p1", "Graphic Tee").with_image("/img/p1.png"),
            Product::new("p2", "Denim Jeans").with_image("/img/p2.png"),
            Product::new("p3", "Leather Belt").with_image("/img/p3.png"),
        ]);

        let buckets = catalog.buckets();
        assert_eq!(buckets.tops.len(), 1);
        assert_eq!(buckets.bottoms.len(), 1);
        assert_eq!(buckets.accessories[0].id, ProductId::new("p3"));
        assert!(buckets.accessories.len() > 1); // locals appended

        let selection = selection_of(&[(Category::Top, "p1"), (Category::Accessories, "p3")]);
        let images = resolve_look_images(&selection, &catalog, &head());
        assert_eq!(
            images,
            [head(), ImageRef::new("/img/p1.png"), ImageRef::new("/img/p3.png")]
        );
    }
}
