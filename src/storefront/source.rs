//! Data Source Module
//!
//! The authoritative-store collaborators the cache sits in front of. The
//! read services query these on a cache miss; the write services mutate
//! through them and then invalidate. `MemorySource` is an in-memory
//! implementation used for composition in tests and demos; it counts
//! reads so tests can observe which requests were served from cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Result, SourceError};
use crate::storefront::models::{
    CartItem, CartLine, CartView, Category, Product, Profile, ProfileUpdate,
};

// == Catalog Source ==
/// Read queries over the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All categories.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Products rated 4.0 or higher, best-rated first. Returns the
    /// matching products for the requested page plus the total count.
    async fn top_products(&self, page: u32, limit: u32) -> Result<(usize, Vec<Product>)>;

    /// Products in categories whose name contains `category`
    /// (case-insensitive), best-rated first.
    async fn products_by_category(
        &self,
        category: &str,
        page: u32,
        limit: u32,
    ) -> Result<(usize, Vec<Product>)>;

    /// Products with `min <= price <= max`, cheapest first.
    async fn products_in_price_range(
        &self,
        min: u64,
        max: u64,
        page: u32,
        limit: u32,
    ) -> Result<(usize, Vec<Product>)>;

    /// Products whose name contains `term` (case-insensitive), best-rated
    /// first. Unpaginated.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>>;

    /// Single product lookup by id.
    async fn product_details(&self, product_id: &str) -> Result<Product>;
}

// == Profile Source ==
/// Per-user reads and writes: profile and cart.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self, user_id: &str) -> Result<Profile>;

    /// Applies the update and returns the resulting profile.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile>;

    /// The user's cart with product details resolved.
    async fn cart(&self, user_id: &str) -> Result<CartView>;

    /// Adds `quantity` of a product to the cart, merging with an existing
    /// line for the same product.
    async fn add_to_cart(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()>;

    /// Removes a product from the cart; absent lines are a no-op.
    async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()>;
}

// == Memory Source ==

#[derive(Debug, Default)]
struct MemoryData {
    categories: Vec<Category>,
    products: Vec<Product>,
    profiles: HashMap<String, Profile>,
    carts: HashMap<String, Vec<CartItem>>,
}

/// In-memory authoritative store.
///
/// Every read query increments a counter, so a test can assert how many
/// requests actually reached the source versus being served from cache.
#[derive(Debug, Default)]
pub struct MemorySource {
    data: Mutex<MemoryData>,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    // == Seeding ==
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        if let Ok(mut data) = self.data.lock() {
            data.categories = categories;
        }
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        if let Ok(mut data) = self.data.lock() {
            data.products = products;
        }
        self
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        if let Ok(mut data) = self.data.lock() {
            data.profiles.insert(profile.id.clone(), profile);
        }
        self
    }

    /// Number of read queries that reached this source.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn data(&self) -> Result<MutexGuard<'_, MemoryData>> {
        self.data
            .lock()
            .map_err(|_| SourceError::Unavailable("memory source lock poisoned".to_string()))
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sorts best-rated first, then returns the requested page and the total
/// match count. `skip = (page - 1) * limit`, as the API has always paged.
fn paginate(mut products: Vec<Product>, page: u32, limit: u32) -> (usize, Vec<Product>) {
    products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    let total = products.len();
    let skip = ((page - 1) as usize).saturating_mul(limit as usize);
    let page_items = products.into_iter().skip(skip).take(limit as usize).collect();
    (total, page_items)
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.record_read();
        Ok(self.data()?.categories.clone())
    }

    async fn top_products(&self, page: u32, limit: u32) -> Result<(usize, Vec<Product>)> {
        self.record_read();
        let matching: Vec<Product> = self
            .data()?
            .products
            .iter()
            .filter(|p| p.rating >= 4.0)
            .cloned()
            .collect();
        Ok(paginate(matching, page, limit))
    }

    async fn products_by_category(
        &self,
        category: &str,
        page: u32,
        limit: u32,
    ) -> Result<(usize, Vec<Product>)> {
        self.record_read();
        let data = self.data()?;
        let needle = category.to_lowercase();

        let category_ids: Vec<&String> = data
            .categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .map(|c| &c.id)
            .collect();
        if category_ids.is_empty() {
            return Err(SourceError::CategoryNotFound(category.to_string()));
        }

        let matching: Vec<Product> = data
            .products
            .iter()
            .filter(|p| category_ids.contains(&&p.category_id))
            .cloned()
            .collect();
        Ok(paginate(matching, page, limit))
    }

    async fn products_in_price_range(
        &self,
        min: u64,
        max: u64,
        page: u32,
        limit: u32,
    ) -> Result<(usize, Vec<Product>)> {
        self.record_read();
        let mut matching: Vec<Product> = self
            .data()?
            .products
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
            .cloned()
            .collect();

        // Price browsing sorts cheapest first, unlike the rating sort.
        matching.sort_by_key(|p| p.price);
        let total = matching.len();
        let skip = ((page - 1) as usize).saturating_mul(limit as usize);
        let page_items: Vec<Product> =
            matching.into_iter().skip(skip).take(limit as usize).collect();
        Ok((total, page_items))
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>> {
        self.record_read();
        let needle = term.to_lowercase();
        let mut matching: Vec<Product> = self
            .data()?
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(matching)
    }

    async fn product_details(&self, product_id: &str) -> Result<Product> {
        self.record_read();
        self.data()?
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| SourceError::ProductNotFound(product_id.to_string()))
    }
}

#[async_trait]
impl ProfileSource for MemorySource {
    async fn profile(&self, user_id: &str) -> Result<Profile> {
        self.record_read();
        self.data()?
            .profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| SourceError::UserNotFound(user_id.to_string()))
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Profile> {
        let mut data = self.data()?;
        let profile = data
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| SourceError::UserNotFound(user_id.to_string()))?;

        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(email) = update.email {
            profile.email = email;
        }
        Ok(profile.clone())
    }

    async fn cart(&self, user_id: &str) -> Result<CartView> {
        self.record_read();
        let data = self.data()?;
        if !data.profiles.contains_key(user_id) {
            return Err(SourceError::UserNotFound(user_id.to_string()));
        }

        let mut items = Vec::new();
        for item in data.carts.get(user_id).into_iter().flatten() {
            let product = data
                .products
                .iter()
                .find(|p| p.id == item.product_id)
                .cloned()
                .ok_or_else(|| SourceError::ProductNotFound(item.product_id.clone()))?;
            items.push(CartLine {
                product,
                quantity: item.quantity,
            });
        }
        Ok(CartView { items })
    }

    async fn add_to_cart(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()> {
        let mut data = self.data()?;
        if !data.products.iter().any(|p| p.id == product_id) {
            return Err(SourceError::ProductNotFound(product_id.to_string()));
        }
        if !data.profiles.contains_key(user_id) {
            return Err(SourceError::UserNotFound(user_id.to_string()));
        }

        let cart = data.carts.entry(user_id.to_string()).or_default();
        match cart.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => cart.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
        Ok(())
    }

    async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()> {
        let mut data = self.data()?;
        if let Some(cart) = data.carts.get_mut(user_id) {
            cart.retain(|item| item.product_id != product_id);
        }
        Ok(())
    }
}
