//! Storefront models
//!
//! Response payloads cached by the read services and the normalized query
//! types the read handlers derive cache keys from. All payloads are plain
//! serde-serializable objects; the cache stores them as given and hands
//! them back by shared handle.

use serde::{Deserialize, Serialize};

// == Catalog ==

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A product as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in whole currency units
    pub price: u64,
    /// Average review rating, 0.0 - 5.0
    pub rating: f32,
    pub category_id: String,
}

/// One page of a paginated product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Total products matching the filter, across all pages
    pub total_products: usize,
    pub current_page: u32,
    pub total_pages: u32,
    pub products: Vec<Product>,
}

impl ProductPage {
    /// Assembles a page, deriving `total_pages` from the page size.
    pub fn new(total_products: usize, page: u32, limit: u32, products: Vec<Product>) -> Self {
        let total_pages = (total_products as u32).div_ceil(limit.max(1));
        Self {
            total_products,
            current_page: page,
            total_pages,
            products,
        }
    }
}

/// Unpaginated search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub total_products: usize,
    pub products: Vec<Product>,
}

// == Users ==

/// A user profile as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// A cart line as stored: product reference plus quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A cart line as returned to clients, with the product resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// The cart view returned by the cart read endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
}

// == Queries ==

/// Raw pagination parameters as they arrive from the transport layer.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Substitutes defaults: page 1, limit 10. A zero in either position
    /// falls back to the default as well, so every caller lands on the
    /// same normalized pair (and therefore the same cache key).
    pub fn normalize(self) -> (u32, u32) {
        let page = match self.page {
            None | Some(0) => 1,
            Some(page) => page,
        };
        let limit = match self.limit {
            None | Some(0) => 10,
            Some(limit) => limit,
        };
        (page, limit)
    }
}

/// Raw price-range browse parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PriceRangeQuery {
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PriceRangeQuery {
    /// Substitutes defaults: price window 0 - 200, pagination as in
    /// [`PageQuery::normalize`]. Returns (min, max, page, limit).
    pub fn normalize(self) -> (u64, u64, u32, u32) {
        let (page, limit) = PageQuery {
            page: self.page,
            limit: self.limit,
        }
        .normalize();
        (
            self.min_price.unwrap_or(0),
            self.max_price.unwrap_or(200),
            page,
            limit,
        )
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            price: 10,
            rating: 4.5,
            category_id: "c1".to_string(),
        }
    }

    #[test]
    fn test_product_page_rounds_pages_up() {
        let page = ProductPage::new(21, 1, 10, vec![product("p1")]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_product_page_zero_results() {
        let page = ProductPage::new(0, 1, 10, Vec::new());
        assert_eq!(page.total_pages, 0);
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_page_query_defaults() {
        assert_eq!(PageQuery::default().normalize(), (1, 10));
        assert_eq!(
            PageQuery {
                page: Some(0),
                limit: Some(0)
            }
            .normalize(),
            (1, 10)
        );
        assert_eq!(
            PageQuery {
                page: Some(3),
                limit: Some(25)
            }
            .normalize(),
            (3, 25)
        );
    }

    #[test]
    fn test_price_range_defaults() {
        assert_eq!(PriceRangeQuery::default().normalize(), (0, 200, 1, 10));
        assert_eq!(
            PriceRangeQuery {
                min_price: Some(5),
                max_price: Some(50),
                page: Some(2),
                limit: None
            }
            .normalize(),
            (5, 50, 2, 10)
        );
    }

    #[test]
    fn test_profile_serializes() {
        let profile = Profile {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("ada@example.com"));
    }
}
