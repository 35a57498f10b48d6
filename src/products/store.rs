//! In-memory product store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::model::{Product, ProductFields, ProductId};

#[derive(Debug)]
struct Inner {
    products: Vec<Product>,
    next_id: ProductId,
}

/// Ordered, in-memory collection of products plus the id counter.
///
/// Cloning is cheap and every clone sees the same data. Mutations take the
/// write lock, so at most one is applied at a time and readers always see a
/// consistent snapshot. Nothing survives the process.
#[derive(Clone, Debug)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

impl Default for Store {
    fn default() -> Self { Self::new() }
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner { products: Vec::new(), next_id: 1 })),
        }
    }

    /// Every product, in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Assigns the next id, appends the product and returns it.
    pub async fn create(&self, fields: ProductFields) -> Product {
        let mut inner = self.inner.write().await;
        let product = Product::from_fields(inner.next_id, fields);
        inner.next_id += 1;
        inner.products.push(product.clone());
        debug!(product_id = product.id, "created product");
        product
    }

    pub async fn find_by_id(&self, id: ProductId) -> Option<Product> {
        self.inner.read().await.products.iter().find(|p| p.id == id).cloned()
    }

    /// Overwrites every field but the id. `None` if no such product.
    pub async fn update(&self, id: ProductId, fields: ProductFields) -> Option<Product> {
        let mut inner = self.inner.write().await;
        let product = inner.products.iter_mut().find(|p| p.id == id)?;
        product.overwrite(fields);
        debug!(product_id = id, "updated product");
        Some(product.clone())
    }

    /// Removes the product and hands it back. `None` if no such product.
    pub async fn delete(&self, id: ProductId) -> Option<Product> {
        let mut inner = self.inner.write().await;
        let index = inner.products.iter().position(|p| p.id == id)?;
        let removed = inner.products.remove(index);
        debug!(product_id = id, "deleted product");
        Some(removed)
    }
}
