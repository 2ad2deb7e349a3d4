use common::{ProductId, VariantId};
use thiserror::Error;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with this ID.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product exists but has no variant with this ID.
    #[error("Variant {variant_id} not found on product {product_id}")]
    VariantNotFound {
        product_id: ProductId,
        variant_id: VariantId,
    },

    /// A price string could not be parsed.
    #[error("Invalid price: {input:?}")]
    InvalidPrice { input: String },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
