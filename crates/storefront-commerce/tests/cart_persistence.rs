//! Cart state survives reopening a directory-backed cache.

use rust_decimal::Decimal;
use storefront_cache::Cache;
use storefront_commerce::cart::CART_STORAGE_KEY;
use storefront_commerce::prelude::*;

fn open_store(dir: &std::path::Path) -> CartStore<CacheStorage> {
    let cache = Cache::open_dir(dir).unwrap();
    CartStore::open(CacheStorage::new(cache))
}

#[test]
fn cart_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = open_store(dir.path());
        assert!(cart.is_empty());
        cart.add_item(
            NewCartLine::new("42-7", "42", "Tee", Decimal::new(2505, 1))
                .with_variant(CartVariant::new("7", "M / Red").with_value("size", "M"))
                .with_quantity(2),
        );
        cart.add_item(NewCartLine::new("9", "9", "Mug", Decimal::from(8900)));
        cart.set_open(true);
    }

    let cart = open_store(dir.path());
    assert_eq!(cart.line_count(), 2);
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Decimal::new(94010, 1));
    assert!(!cart.is_open());

    let tee = cart.get_item(&LineId::new("42-7")).unwrap();
    assert_eq!(tee.variant.as_ref().unwrap().values["size"], "M");
}

#[test]
fn cleared_cart_stays_cleared() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = open_store(dir.path());
        cart.add_item(NewCartLine::new("1", "1", "Mug", Decimal::from(100)));
        cart.clear_cart();
    }

    assert!(open_store(dir.path()).is_empty());
}

#[test]
fn corrupt_record_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", CART_STORAGE_KEY)), b"{not json").unwrap();

    let mut cart = open_store(dir.path());
    assert!(cart.is_empty());

    // The next mutation overwrites the broken record.
    cart.add_item(NewCartLine::new("1", "1", "Mug", Decimal::from(100)));
    assert_eq!(open_store(dir.path()).total_items(), 1);
}
