//! Storefront Module
//!
//! The caller side of the cache contract: read services that cache, write
//! services that invalidate, and the composition root that owns the cache
//! instances and their sweep tasks.
//!
//! Cached read set (everything else goes straight to the source):
//! - category list
//! - top products, category browse, price-range browse (paginated)
//! - product search
//! - user profile and cart view (per-user keys)

mod catalog;
mod models;
mod profile;
mod source;

pub use catalog::CatalogService;
pub use models::{
    CartItem, CartLine, CartView, Category, PageQuery, PriceRangeQuery, Product, ProductPage,
    Profile, ProfileUpdate, SearchResults,
};
pub use profile::{cart_key, profile_key, ProfileService};
pub use source::{CatalogSource, MemorySource, ProfileSource};

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{Cache, CacheStats};
use crate::config::CacheConfig;
use crate::tasks::spawn_sweep_task;

// == Cache Namespaces ==
/// One namespace per logical cache domain; every key starts with one.
pub const NS_CATEGORIES: &str = "categories";
pub const NS_PRODUCTS: &str = "products";
pub const NS_PROFILES: &str = "profiles";
pub const NS_CARTS: &str = "carts";

// == Storefront ==
/// Composition root: builds one cache per domain from a single
/// configuration, wires the services, and runs a sweep task per cache
/// until shutdown.
pub struct Storefront<S> {
    pub catalog: CatalogService<S>,
    pub profiles: ProfileService<S>,
    categories_cache: Cache<Vec<Category>>,
    pages_cache: Cache<ProductPage>,
    searches_cache: Cache<SearchResults>,
    profiles_cache: Cache<Profile>,
    carts_cache: Cache<CartView>,
    sweeps: Vec<JoinHandle<()>>,
}

/// Per-domain cache counters, for operational visibility.
#[derive(Debug, Clone)]
pub struct StorefrontStats {
    pub categories: CacheStats,
    pub pages: CacheStats,
    pub searches: CacheStats,
    pub profiles: CacheStats,
    pub carts: CacheStats,
}

impl<S> Storefront<S>
where
    S: CatalogSource + ProfileSource + 'static,
{
    /// Wires services and sweep tasks around `source`.
    ///
    /// Must be called within a Tokio runtime; the sweep tasks are spawned
    /// here and run until [`Storefront::shutdown`] or drop.
    pub fn new(source: Arc<S>, config: &CacheConfig) -> Self {
        let categories_cache: Cache<Vec<Category>> = Cache::new(config);
        let pages_cache: Cache<ProductPage> = Cache::new(config);
        let searches_cache: Cache<SearchResults> = Cache::new(config);
        let profiles_cache: Cache<Profile> = Cache::new(config);
        let carts_cache: Cache<CartView> = Cache::new(config);

        let sweeps = vec![
            spawn_sweep_task(categories_cache.clone(), config.sweep_interval),
            spawn_sweep_task(pages_cache.clone(), config.sweep_interval),
            spawn_sweep_task(searches_cache.clone(), config.sweep_interval),
            spawn_sweep_task(profiles_cache.clone(), config.sweep_interval),
            spawn_sweep_task(carts_cache.clone(), config.sweep_interval),
        ];
        info!(
            domains = sweeps.len(),
            default_ttl = ?config.default_ttl,
            sweep_interval = ?config.sweep_interval,
            "storefront caches initialized"
        );

        Self {
            catalog: CatalogService::new(
                Arc::clone(&source),
                categories_cache.clone(),
                pages_cache.clone(),
                searches_cache.clone(),
            ),
            profiles: ProfileService::new(source, profiles_cache.clone(), carts_cache.clone()),
            categories_cache,
            pages_cache,
            searches_cache,
            profiles_cache,
            carts_cache,
            sweeps,
        }
    }

    /// Snapshot of every domain cache's counters.
    pub async fn cache_stats(&self) -> StorefrontStats {
        StorefrontStats {
            categories: self.categories_cache.stats().await,
            pages: self.pages_cache.stats().await,
            searches: self.searches_cache.stats().await,
            profiles: self.profiles_cache.stats().await,
            carts: self.carts_cache.stats().await,
        }
    }
}

impl<S> Storefront<S> {
    /// Stops the background sweep tasks. Also runs on drop.
    pub fn shutdown(&mut self) {
        for handle in self.sweeps.drain(..) {
            handle.abort();
        }
    }
}

impl<S> Drop for Storefront<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
