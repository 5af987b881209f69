use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    models::{Cart, CartError, CartSummary, Catalog, SessionId},
    repositories::{CartRepository, CartRepositoryError},
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("Melon not found: {id}")]
    MelonNotFound { id: String },

    #[error("Cart error: {0}")]
    CartError(CartError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] CartRepositoryError),
}

impl From<CartError> for CartServiceError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound { id } => CartServiceError::MelonNotFound { id },
            other => CartServiceError::CartError(other),
        }
    }
}

/// Session-facing cart operations. Carts are loaded, changed and saved back
/// through the repository; the catalog is shared and read-only.
pub struct CartService {
    cart_repository: Arc<dyn CartRepository>,
    catalog: Arc<Catalog>,
}

impl CartService {
    pub fn new(cart_repository: Arc<dyn CartRepository>, catalog: Arc<Catalog>) -> Self {
        Self {
            cart_repository,
            catalog,
        }
    }

    /// Add one melon to the session's cart. Unknown ids are rejected before the cart is touched.
    pub async fn add_to_cart(
        &self,
        session: &SessionId,
        melon_id: &str,
    ) -> Result<Cart, CartServiceError> {
        if !self.catalog.contains(melon_id) {
            warn!("Rejected add of unknown melon '{}' for session {}", melon_id, session);
            return Err(CartServiceError::MelonNotFound {
                id: melon_id.to_string(),
            });
        }

        let mut cart = self.cart_repository.load(session).await?;
        let quantity = cart.add(melon_id)?;

        self.cart_repository.save(session, &cart).await.map_err(|e| {
            error!("Failed to save cart for session {}: {}", session, e);
            CartServiceError::RepositoryError(e)
        })?;

        info!(
            "Added melon '{}' to cart for session {} (quantity {})",
            melon_id, session, quantity
        );
        Ok(cart)
    }

    /// Render the session's cart against the catalog
    pub async fn get_cart(&self, session: &SessionId) -> Result<CartSummary, CartServiceError> {
        let cart = self.cart_repository.load(session).await?;
        let summary = cart.render(&self.catalog).map_err(|e| {
            warn!("Cart for session {} could not be rendered: {}", session, e);
            CartServiceError::from(e)
        })?;

        debug!(
            "Rendered cart for session {}: {} entries, total {}",
            session,
            summary.entries.len(),
            summary.total
        );
        Ok(summary)
    }

    /// Drop the session's cart. Returns whether one existed.
    pub async fn end_session(&self, session: &SessionId) -> Result<bool, CartServiceError> {
        let removed = self.cart_repository.delete(session).await?;
        if removed {
            info!("Ended session {}", session);
        } else {
            debug!("Session {} had no cart to remove", session);
        }
        Ok(removed)
    }
}
