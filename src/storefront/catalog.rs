//! Catalog Read Services
//!
//! Read-through handlers for the catalog endpoints: normalize the request
//! parameters, derive the cache key from every parameter that affects the
//! result, consult the cache, and fall through to the data source on a
//! miss. Results are returned by shared handle exactly as cached.

use std::sync::Arc;

use crate::cache::{Cache, KeyBuilder};
use crate::error::{Result, SourceError};
use crate::storefront::models::{
    Category, PageQuery, PriceRangeQuery, Product, ProductPage, SearchResults,
};
use crate::storefront::source::CatalogSource;
use crate::storefront::{NS_CATEGORIES, NS_PRODUCTS};

// == Catalog Service ==
/// Cached read access to categories and product listings.
pub struct CatalogService<S> {
    source: Arc<S>,
    categories: Cache<Vec<Category>>,
    pages: Cache<ProductPage>,
    searches: Cache<SearchResults>,
}

impl<S: CatalogSource> CatalogService<S> {
    pub fn new(
        source: Arc<S>,
        categories: Cache<Vec<Category>>,
        pages: Cache<ProductPage>,
        searches: Cache<SearchResults>,
    ) -> Self {
        Self {
            source,
            categories,
            pages,
            searches,
        }
    }

    // == Category List ==
    /// The full category list. Parameterless, so one key covers it.
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>> {
        let key = KeyBuilder::new(NS_CATEGORIES, "list").build();
        let source = Arc::clone(&self.source);
        self.categories
            .get_or_insert_with(&key, move || async move { source.categories().await })
            .await
    }

    // == Top Products ==
    /// Best-rated products, paginated.
    pub async fn top_products(&self, query: PageQuery) -> Result<Arc<ProductPage>> {
        let (page, limit) = query.normalize();
        let key = KeyBuilder::new(NS_PRODUCTS, "top")
            .param("page", page)
            .param("limit", limit)
            .build();

        let source = Arc::clone(&self.source);
        self.pages
            .get_or_insert_with(&key, move || async move {
                let (total, products) = source.top_products(page, limit).await?;
                Ok(ProductPage::new(total, page, limit, products))
            })
            .await
    }

    // == Browse By Category ==
    /// Products in categories matching `category`, paginated. The
    /// category name is a case-insensitive key dimension: `Fruits` and
    /// `fruits` share one cached page.
    pub async fn products_by_category(
        &self,
        category: &str,
        query: PageQuery,
    ) -> Result<Arc<ProductPage>> {
        let category = category.trim();
        if category.is_empty() {
            return Err(SourceError::InvalidQuery(
                "category name is required".to_string(),
            ));
        }

        let (page, limit) = query.normalize();
        let key = KeyBuilder::new(NS_PRODUCTS, "by_category")
            .param_ci("category", category)
            .param("page", page)
            .param("limit", limit)
            .build();

        let source = Arc::clone(&self.source);
        let category = category.to_lowercase();
        self.pages
            .get_or_insert_with(&key, move || async move {
                let (total, products) =
                    source.products_by_category(&category, page, limit).await?;
                Ok(ProductPage::new(total, page, limit, products))
            })
            .await
    }

    // == Browse By Price ==
    /// Products within a price window, cheapest first, paginated.
    pub async fn products_in_price_range(
        &self,
        query: PriceRangeQuery,
    ) -> Result<Arc<ProductPage>> {
        let (min, max, page, limit) = query.normalize();
        let key = KeyBuilder::new(NS_PRODUCTS, "price_range")
            .param("min", min)
            .param("max", max)
            .param("page", page)
            .param("limit", limit)
            .build();

        let source = Arc::clone(&self.source);
        self.pages
            .get_or_insert_with(&key, move || async move {
                let (total, products) =
                    source.products_in_price_range(min, max, page, limit).await?;
                Ok(ProductPage::new(total, page, limit, products))
            })
            .await
    }

    // == Search ==
    /// Case-insensitive substring search over product names.
    pub async fn search_products(&self, term: &str) -> Result<Arc<SearchResults>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SourceError::InvalidQuery(
                "search query is required".to_string(),
            ));
        }

        let key = KeyBuilder::new(NS_PRODUCTS, "search")
            .param_ci("term", term)
            .build();

        let source = Arc::clone(&self.source);
        let term = term.to_lowercase();
        self.searches
            .get_or_insert_with(&key, move || async move {
                let products = source.search_products(&term).await?;
                Ok(SearchResults {
                    total_products: products.len(),
                    products,
                })
            })
            .await
    }

    // == Product Details ==
    /// Single product lookup. Served straight from the source: detail
    /// reads are not in the cached read set.
    pub async fn product_details(&self, product_id: &str) -> Result<Product> {
        self.source.product_details(product_id).await
    }
}
