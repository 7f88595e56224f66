//! Storefront Integration Tests
//!
//! Exercises the full wiring: composition root, per-domain caches, the
//! read-through and invalidation paths, TTL expiry, and the background
//! sweep. Source traffic is observed through the memory source's read
//! counter.

use std::sync::Arc;
use std::time::Duration;

use shopcache::cache::{Cache, CacheStore};
use shopcache::storefront::{
    Category, MemorySource, PageQuery, Product, Profile, ProfileUpdate, Storefront,
};
use shopcache::{CacheConfig, SourceError};

// == Fixtures ==
fn seeded_source() -> Arc<MemorySource> {
    Arc::new(
        MemorySource::new()
            .with_categories(vec![
                Category {
                    id: "c1".to_string(),
                    name: "Fruits".to_string(),
                },
                Category {
                    id: "c2".to_string(),
                    name: "Dairy".to_string(),
                },
            ])
            .with_products(vec![
                Product {
                    id: "p1".to_string(),
                    name: "Apple".to_string(),
                    price: 2,
                    rating: 4.5,
                    category_id: "c1".to_string(),
                },
                Product {
                    id: "p2".to_string(),
                    name: "Milk".to_string(),
                    price: 3,
                    rating: 4.8,
                    category_id: "c2".to_string(),
                },
                Product {
                    id: "p3".to_string(),
                    name: "Banana".to_string(),
                    price: 1,
                    rating: 4.1,
                    category_id: "c1".to_string(),
                },
            ])
            .with_profile(Profile {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
    )
}

fn long_lived_config() -> CacheConfig {
    CacheConfig {
        default_ttl: Duration::from_secs(300),
        // Sweeps stay out of the way unless a test is about them.
        sweep_interval: Duration::from_secs(600),
        capacity: None,
    }
}

// == Read-Through ==
#[tokio::test]
async fn test_categories_served_from_cache_after_first_read() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    let first = storefront.catalog.categories().await.unwrap();
    let second = storefront.catalog.categories().await.unwrap();

    assert_eq!(source.read_count(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 2);

    let stats = storefront.cache_stats().await;
    assert_eq!(stats.categories.hits, 1);
    assert_eq!(stats.categories.misses, 1);
    assert_eq!(stats.categories.total_entries, 1);
}

#[tokio::test]
async fn test_top_products_defaults_and_explicit_defaults_share_one_entry() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    storefront
        .catalog
        .top_products(PageQuery::default())
        .await
        .unwrap();
    storefront
        .catalog
        .top_products(PageQuery {
            page: Some(1),
            limit: Some(10),
        })
        .await
        .unwrap();

    assert_eq!(source.read_count(), 1);

    // A different limit is a different key and a fresh source read.
    let short = storefront
        .catalog
        .top_products(PageQuery {
            page: Some(1),
            limit: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(source.read_count(), 2);
    assert_eq!(short.products.len(), 2);
    // Best rated first.
    assert_eq!(short.products[0].id, "p2");
}

#[tokio::test]
async fn test_category_browse_case_variants_share_one_entry() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    let upper = storefront
        .catalog
        .products_by_category("FRUITS", PageQuery::default())
        .await
        .unwrap();
    let lower = storefront
        .catalog
        .products_by_category("fruits", PageQuery::default())
        .await
        .unwrap();

    assert_eq!(source.read_count(), 1);
    assert!(Arc::ptr_eq(&upper, &lower));
    assert_eq!(upper.total_products, 2);
}

#[tokio::test]
async fn test_search_caches_results_and_rejects_empty_terms() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    let results = storefront.catalog.search_products("apple").await.unwrap();
    storefront.catalog.search_products(" Apple ").await.unwrap();

    assert_eq!(source.read_count(), 1);
    assert_eq!(results.total_products, 1);
    assert_eq!(results.products[0].id, "p1");

    let rejected = storefront.catalog.search_products("   ").await;
    assert!(matches!(rejected, Err(SourceError::InvalidQuery(_))));
    assert_eq!(source.read_count(), 1);
}

// == Invalidation ==
#[tokio::test]
async fn test_profile_update_refreshes_cache_without_extra_read() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    let before = storefront.profiles.profile("u1").await.unwrap();
    assert_eq!(before.name, "Ada");
    assert_eq!(source.read_count(), 1);

    storefront
        .profiles
        .update_profile(
            "u1",
            ProfileUpdate {
                name: Some("Ada Lovelace".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    // The overwritten entry serves the new value; no second source read.
    let after = storefront.profiles.profile("u1").await.unwrap();
    assert_eq!(after.name, "Ada Lovelace");
    assert_eq!(after.email, "ada@example.com");
    assert_eq!(source.read_count(), 1);
}

#[tokio::test]
async fn test_cart_mutations_invalidate_the_cached_view() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    let empty = storefront.profiles.cart("u1").await.unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(source.read_count(), 1);

    storefront.profiles.add_to_cart("u1", "p1", 2).await.unwrap();
    let one_line = storefront.profiles.cart("u1").await.unwrap();
    assert_eq!(one_line.items.len(), 1);
    assert_eq!(one_line.items[0].quantity, 2);
    assert_eq!(source.read_count(), 2);

    // Same product again merges quantity; the stale view never shows.
    storefront.profiles.add_to_cart("u1", "p1", 1).await.unwrap();
    let merged = storefront.profiles.cart("u1").await.unwrap();
    assert_eq!(merged.items[0].quantity, 3);
    assert_eq!(source.read_count(), 3);

    storefront.profiles.remove_from_cart("u1", "p1").await.unwrap();
    let emptied = storefront.profiles.cart("u1").await.unwrap();
    assert!(emptied.items.is_empty());
    assert_eq!(source.read_count(), 4);
}

#[tokio::test]
async fn test_catalog_entries_survive_profile_writes() {
    let source = seeded_source();
    let storefront = Storefront::new(Arc::clone(&source), &long_lived_config());

    storefront.catalog.categories().await.unwrap();
    storefront.profiles.cart("u1").await.unwrap();
    assert_eq!(source.read_count(), 2);

    storefront.profiles.add_to_cart("u1", "p2", 1).await.unwrap();

    // Only the cart entry was invalidated.
    storefront.catalog.categories().await.unwrap();
    assert_eq!(source.read_count(), 2);
    storefront.profiles.cart("u1").await.unwrap();
    assert_eq!(source.read_count(), 3);
}

// == Expiry and Sweep ==
#[tokio::test]
async fn test_expired_entries_recomputed_on_read() {
    let source = seeded_source();
    let config = CacheConfig {
        default_ttl: Duration::from_millis(40),
        sweep_interval: Duration::from_secs(600),
        capacity: None,
    };
    let storefront = Storefront::new(Arc::clone(&source), &config);

    storefront.catalog.categories().await.unwrap();
    storefront.catalog.categories().await.unwrap();
    assert_eq!(source.read_count(), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;

    storefront.catalog.categories().await.unwrap();
    assert_eq!(source.read_count(), 2);

    let stats = storefront.cache_stats().await;
    assert_eq!(stats.categories.expirations, 1);
}

#[tokio::test]
async fn test_background_sweep_drops_expired_entries_without_reads() {
    let source = seeded_source();
    let config = CacheConfig {
        default_ttl: Duration::from_millis(40),
        sweep_interval: Duration::from_millis(30),
        capacity: None,
    };
    let storefront = Storefront::new(Arc::clone(&source), &config);

    storefront.catalog.categories().await.unwrap();
    storefront.catalog.search_products("milk").await.unwrap();

    let before = storefront.cache_stats().await;
    assert_eq!(before.categories.total_entries, 1);
    assert_eq!(before.searches.total_entries, 1);

    // No further reads: only the sweep task can remove the entries.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let after = storefront.cache_stats().await;
    assert_eq!(after.categories.total_entries, 0);
    assert_eq!(after.searches.total_entries, 0);
    assert_eq!(after.categories.expirations, 1);
}

// == Concurrency ==
#[tokio::test]
async fn test_concurrent_access_to_one_key_is_safe() {
    let cache: Cache<String> =
        Cache::from_store(CacheStore::new(None, Duration::from_secs(60)));

    let mut handles = Vec::new();
    for writer in 0..16 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for round in 0..50 {
                cache
                    .set("contended", format!("writer-{writer}-round-{round}"))
                    .await;
                cache.get("contended").await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Last write wins; whichever it was, exactly one entry remains.
    assert_eq!(cache.len().await, 1);
    let last = cache.set("contended", "final".to_string()).await;
    let read = cache.get("contended").await.unwrap();
    assert!(Arc::ptr_eq(&last, &read));
}
