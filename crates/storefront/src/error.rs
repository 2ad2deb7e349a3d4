//! Command-line error types.

use cart::CartError;
use catalog::CatalogError;
use common::ProductId;
use kv_store::StorageError;
use thiserror::Error;

/// Errors reported by storefront commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product or the chosen variant cannot be bought right now.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// The product has variants but none was chosen.
    #[error("Product {0} requires a variant; see `storefront product {0}`")]
    VariantRequired(ProductId),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for storefront commands.
pub type Result<T> = std::result::Result<T, CliError>;
