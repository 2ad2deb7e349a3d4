//! Product catalog for the storefront.
//!
//! The catalog is an external collaborator of the cart: it supplies the
//! [`Product`] snapshots that get added to a cart and answers the
//! category/search listings the shop pages show.
//!
//! - [`Money`] and [`CurrencyCode`] for prices
//! - [`Product`] and [`ProductVariant`]
//! - [`ShopFilters`] for filtering, sorting and paging listings
//! - [`CatalogProvider`] trait with an [`InMemoryCatalog`] implementation

pub mod demo;
pub mod error;
pub mod filters;
pub mod money;
pub mod product;
pub mod provider;

pub use common::{ProductId, VariantId};
pub use error::{CatalogError, Result};
pub use filters::{ProductPage, ShopFilters, SortOrder};
pub use money::{CurrencyCode, Money};
pub use product::{Product, ProductVariant};
pub use provider::{CatalogProvider, CatalogProviderExt, InMemoryCatalog};
