//! Profile and Cart Services
//!
//! User-scoped reads and the write paths that invalidate them. Every key
//! embeds the user id, so one user's mutation never touches another's
//! cached data. Profile updates overwrite the cached profile with the
//! fresh value; cart mutations delete the cached view so the next read
//! recomputes it.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{Cache, KeyBuilder};
use crate::error::Result;
use crate::storefront::models::{CartView, Profile, ProfileUpdate};
use crate::storefront::source::ProfileSource;
use crate::storefront::{NS_CARTS, NS_PROFILES};

// == Keys ==
// Key spelling lives here and only here: the read side and the
// invalidating write side must agree on it by construction.

/// Cache key for a user's profile.
pub fn profile_key(user_id: &str) -> String {
    KeyBuilder::new(NS_PROFILES, "profile")
        .param("user", user_id)
        .build()
}

/// Cache key for a user's cart view.
pub fn cart_key(user_id: &str) -> String {
    KeyBuilder::new(NS_CARTS, "cart")
        .param("user", user_id)
        .build()
}

// == Profile Service ==
/// Cached per-user reads plus the invalidating writes.
pub struct ProfileService<S> {
    source: Arc<S>,
    profiles: Cache<Profile>,
    carts: Cache<CartView>,
}

impl<S: ProfileSource> ProfileService<S> {
    pub fn new(source: Arc<S>, profiles: Cache<Profile>, carts: Cache<CartView>) -> Self {
        Self {
            source,
            profiles,
            carts,
        }
    }

    // == Profile Read ==
    pub async fn profile(&self, user_id: &str) -> Result<Arc<Profile>> {
        let key = profile_key(user_id);
        let source = Arc::clone(&self.source);
        let user_id = user_id.to_string();
        self.profiles
            .get_or_insert_with(&key, move || async move { source.profile(&user_id).await })
            .await
    }

    // == Profile Update ==
    /// Applies the update at the source, then overwrites the cached
    /// profile with the fresh value so the next read serves the update
    /// without another source round-trip.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Arc<Profile>> {
        let updated = self.source.update_profile(user_id, update).await?;
        let shared = self.profiles.set(profile_key(user_id), updated).await;
        debug!(user = user_id, "profile cache refreshed after update");
        Ok(shared)
    }

    // == Cart Read ==
    pub async fn cart(&self, user_id: &str) -> Result<Arc<CartView>> {
        let key = cart_key(user_id);
        let source = Arc::clone(&self.source);
        let user_id = user_id.to_string();
        self.carts
            .get_or_insert_with(&key, move || async move { source.cart(&user_id).await })
            .await
    }

    // == Cart Writes ==
    /// Adds a product to the cart and drops the cached cart view; the
    /// next read rebuilds it from the source.
    pub async fn add_to_cart(&self, user_id: &str, product_id: &str, quantity: u32) -> Result<()> {
        self.source.add_to_cart(user_id, product_id, quantity).await?;
        self.carts.delete(&cart_key(user_id)).await;
        debug!(user = user_id, product = product_id, "cart cache invalidated after add");
        Ok(())
    }

    /// Removes a product from the cart and drops the cached cart view.
    pub async fn remove_from_cart(&self, user_id: &str, product_id: &str) -> Result<()> {
        self.source.remove_from_cart(user_id, product_id).await?;
        self.carts.delete(&cart_key(user_id)).await;
        debug!(user = user_id, product = product_id, "cart cache invalidated after remove");
        Ok(())
    }
}
