//! Black-box flow test: host catalog in, finished look out.

use figforge_catalog::{Category, ImageRef, Product, ProductId};
use figforge_look::DEFAULT_HEAD_ASSET;
use figforge_session::{
    CustomizerSession, InMemoryCatalogProvider, SelectionProjection, StaticIdentity,
};

fn host_catalog() -> InMemoryCatalogProvider {
    InMemoryCatalogProvider::new(vec![
        Product::new("p1", "Graphic Tee").with_image("/img/p1.png"),
        Product::new("p2", "Denim Jeans").with_image("/img/p2.png"),
        Product::new("p3", "Leather Belt").with_image("/img/p3.png"),
        Product::new("p4", "Bucket Hat").with_image("/img/p4.png"),
        Product::new("p5", "Canvas Bag").with_image("/img/p5.png"),
        Product::new("p6", "Gift Card"),
    ])
}

#[test]
fn full_customization_flow_produces_an_ordered_look() {
    let mut session =
        CustomizerSession::begin(&host_catalog(), &StaticIdentity::named("Casey")).unwrap();

    assert_eq!(session.title(), "Casey's Avatar");

    // The rack shows each visible bucket; the gift card is nowhere.
    let rack = session.rack();
    let (top_category, tops) = rack[0];
    assert_eq!(top_category, Category::Top);
    assert_eq!(tops.len(), 1);
    for (_, products) in rack {
        assert!(products.iter().all(|p| p.id != ProductId::new("p6")));
    }

    // Dress the figure.
    session.toggle(Category::Top, ProductId::new("p1")).unwrap();
    session.toggle(Category::Bottom, ProductId::new("p2")).unwrap();
    session.toggle(Category::Headwear, ProductId::new("p4")).unwrap();
    session
        .toggle(Category::Accessories, ProductId::new("p3"))
        .unwrap();
    session
        .toggle(Category::Accessories, ProductId::new("p5"))
        .unwrap();

    // Third accessory evicts the oldest (the belt).
    session
        .toggle(Category::Accessories, ProductId::new("local-skateboard"))
        .unwrap();

    assert_eq!(
        session.look_images(),
        [
            ImageRef::new(DEFAULT_HEAD_ASSET),
            ImageRef::new("/img/p1.png"),
            ImageRef::new("/img/p2.png"),
            ImageRef::new("/img/p4.png"),
            ImageRef::new("/img/p5.png"),
            ImageRef::new("/accessories/Skateboard.png"),
        ]
    );

    session.complete().unwrap();
}

#[test]
fn selection_read_model_rebuilds_from_the_event_history() {
    let mut session =
        CustomizerSession::begin(&host_catalog(), &StaticIdentity::anonymous()).unwrap();

    session.toggle(Category::Top, ProductId::new("p1")).unwrap();
    session
        .toggle(Category::Accessories, ProductId::new("p3"))
        .unwrap();
    session
        .toggle(Category::Accessories, ProductId::new("p3"))
        .unwrap(); // deselect again

    let mut rebuilt = SelectionProjection::new(session.session_id(), session.outfit_id().0);
    for envelope in session.history() {
        rebuilt.apply_envelope(envelope).unwrap();
    }

    assert_eq!(rebuilt.state(), session.selection());
    assert!(rebuilt.state().accessories().is_empty());
}

#[test]
fn abandoning_discards_the_session() {
    let mut session =
        CustomizerSession::begin(&host_catalog(), &StaticIdentity::anonymous()).unwrap();
    session.toggle(Category::Top, ProductId::new("p1")).unwrap();

    session.abandon().unwrap();
    // The session is consumed; nothing persists past this point.
}
