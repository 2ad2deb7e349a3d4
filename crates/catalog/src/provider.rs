use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::{CatalogError, Product, ProductPage, Result, ShopFilters};

/// Source of product data for the storefront.
///
/// Implementations may call a remote backend; the cart only ever sees the
/// `Product` snapshots returned here. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches a single product.
    ///
    /// Returns None if the catalog has no product with this ID.
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Returns one page of products matching `filters`.
    async fn list_products(&self, filters: &ShopFilters) -> Result<ProductPage>;

    /// Returns the distinct category labels, in catalog order.
    async fn categories(&self) -> Result<Vec<String>>;
}

/// Extension trait providing convenience methods for catalog providers.
#[async_trait]
pub trait CatalogProviderExt: CatalogProvider {
    /// Fetches a product, failing with `ProductNotFound` if it doesn't exist.
    async fn require_product(&self, id: &ProductId) -> Result<Product> {
        self.fetch_product(id)
            .await?
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }
}

// Blanket implementation for all CatalogProvider implementations
impl<T: CatalogProvider + ?Sized> CatalogProviderExt for T {}

/// In-memory catalog.
///
/// Stands in for the storefront backend in tests and in the command-line
/// host. Products keep the order they were inserted in, which is the
/// `Featured` sort order.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Creates a catalog seeded with the demo clothing range.
    pub fn with_demo_products() -> Self {
        Self::with_products(crate::demo::demo_products())
    }

    /// Inserts a product, replacing any existing product with the same ID
    /// in place.
    pub async fn insert(&self, product: Product) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
    }

    /// Returns the number of products in the catalog.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if the catalog has no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    #[tracing::instrument(skip(self), fields(product_id = %id))]
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn list_products(&self, filters: &ShopFilters) -> Result<ProductPage> {
        let products = self.products.read().await;
        let page = filters.apply(&products);
        tracing::debug!(total = page.total, returned = page.items.len(), "listed products");
        Ok(page)
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let products = self.products.read().await;
        let mut categories: Vec<String> = Vec::new();
        for product in products.iter() {
            if !product.category.is_empty() && !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }
}
