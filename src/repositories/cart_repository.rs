use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Cart, SessionId};

#[derive(Error, Debug)]
pub enum CartRepositoryError {
    #[error("Cart storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Binds carts to sessions. A session with no stored cart loads as empty.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn load(&self, session: &SessionId) -> Result<Cart, CartRepositoryError>;
    async fn save(&self, session: &SessionId, cart: &Cart) -> Result<(), CartRepositoryError>;
    async fn delete(&self, session: &SessionId) -> Result<bool, CartRepositoryError>;
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<SessionId, Cart>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn load(&self, session: &SessionId) -> Result<Cart, CartRepositoryError> {
        Ok(self
            .carts
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, session: &SessionId, cart: &Cart) -> Result<(), CartRepositoryError> {
        self.carts
            .write()
            .await
            .insert(session.clone(), cart.clone());
        Ok(())
    }

    async fn delete(&self, session: &SessionId) -> Result<bool, CartRepositoryError> {
        Ok(self.carts.write().await.remove(session).is_some())
    }
}

/// Stores each session's cart as `<dir>/<session>.json`
pub struct JsonFileCartRepository {
    dir: PathBuf,
}

impl JsonFileCartRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn cart_path(&self, session: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json", session.as_str()))
    }

    fn temp_path(&self, session: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", session.as_str()))
    }
}

#[async_trait]
impl CartRepository for JsonFileCartRepository {
    async fn load(&self, session: &SessionId) -> Result<Cart, CartRepositoryError> {
        let path = self.cart_path(session);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cart stored for session {}", session);
                Ok(Cart::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &SessionId, cart: &Cart) -> Result<(), CartRepositoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(cart)?;
        // Readers only ever see a complete file.
        let temp = self.temp_path(session);
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, self.cart_path(session)).await?;
        debug!("Saved cart for session {} ({} lines)", session, cart.len());
        Ok(())
    }

    async fn delete(&self, session: &SessionId) -> Result<bool, CartRepositoryError> {
        match tokio::fs::remove_file(self.cart_path(session)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
