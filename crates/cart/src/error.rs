//! Cart error types.

use kv_store::StorageError;
use thiserror::Error;

/// Errors that can occur at the cart's boundaries.
///
/// Cart mutations themselves never fail; these errors come from input
/// validation and from explicit saves.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity must be at least one.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i64 },

    /// Unknown match policy name.
    #[error("Invalid match policy: {0:?} (expected \"exact\" or \"permissive\")")]
    InvalidMatchPolicy(String),

    /// The storage slot could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
