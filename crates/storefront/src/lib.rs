//! Command-line storefront host.
//!
//! Wires the demo catalog, a file-backed cart slot and the cart store
//! together and exposes them as subcommands. Every invocation reopens the
//! cart from the same file, so the cart survives between runs.

pub mod cli;
pub mod config;
pub mod error;
pub mod render;

use std::sync::Arc;

use cart::{CartLine, CartStore, LineOptions, Notice, Notifier, Quantity};
use catalog::{CatalogProvider, CatalogProviderExt, InMemoryCatalog};
use common::{ProductId, VariantId};
use kv_store::FileKeyValueStore;

pub use cli::{Cli, Command};
pub use config::{Config, LogFormat};
pub use error::{CliError, Result};

/// Prints notices to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        println!("{notice}");
    }
}

/// Catalog and cart for one shopper.
pub struct Storefront {
    catalog: Arc<dyn CatalogProvider>,
    cart: Arc<CartStore>,
}

impl Storefront {
    pub fn new(catalog: Arc<dyn CatalogProvider>, cart: Arc<CartStore>) -> Self {
        Self { catalog, cart }
    }

    /// Opens the cart file named by `config` against the demo catalog.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = FileKeyValueStore::open(&config.cart_path)?;
        let cart = CartStore::builder(Arc::new(storage))
            .config(config.cart.clone())
            .notifier(Arc::new(ConsoleNotifier))
            .open();

        tracing::debug!(
            path = %config.cart_path.display(),
            lines = cart.line_count(),
            "storefront opened"
        );
        Ok(Self::new(
            Arc::new(InMemoryCatalog::with_demo_products()),
            Arc::new(cart),
        ))
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Runs one command and returns the text to print.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, command: Command) -> Result<String> {
        match command {
            Command::Products {
                category,
                search,
                min_price,
                max_price,
                in_stock,
                sort,
                page,
                per_page,
            } => {
                let filters = cli::filters(
                    category, search, min_price, max_price, in_stock, sort, page, per_page,
                );
                let page = self.catalog.list_products(&filters).await?;
                Ok(render::product_page(&page))
            }
            Command::Categories => {
                let categories = self.catalog.categories().await?;
                Ok(categories
                    .iter()
                    .map(|c| format!("{c}\n"))
                    .collect::<String>())
            }
            Command::Product { id, json } => {
                let product = self.catalog.require_product(&id).await?;
                if json {
                    Ok(format!("{}\n", serde_json::to_string_pretty(&product)?))
                } else {
                    Ok(render::product_detail(&product))
                }
            }
            Command::Add {
                product_id,
                quantity,
                variant,
                size,
                color,
            } => {
                let options = LineOptions {
                    variant_id: variant,
                    size,
                    color,
                };
                self.add(&product_id, quantity, options).await?;
                Ok(self.render_cart())
            }
            Command::Remove {
                product_id,
                variant,
            } => match self.cart.remove_line(&product_id, variant.as_ref()) {
                Some(_) => Ok(self.render_cart()),
                None => Ok(format!(
                    "{} is not in your cart.\n",
                    line_label(&product_id, variant.as_ref())
                )),
            },
            Command::Update {
                product_id,
                quantity,
                variant,
            } => {
                if self
                    .cart
                    .update_quantity(&product_id, quantity, variant.as_ref())
                {
                    Ok(self.render_cart())
                } else {
                    Ok(format!(
                        "No change to {}.\n",
                        line_label(&product_id, variant.as_ref())
                    ))
                }
            }
            Command::Clear => {
                self.cart.clear();
                Ok(self.render_cart())
            }
            Command::Show { json } => {
                if json {
                    Ok(format!(
                        "{}\n",
                        serde_json::to_string_pretty(&self.cart.lines())?
                    ))
                } else {
                    Ok(self.render_cart())
                }
            }
        }
    }

    /// Adds a catalog product to the cart after checking it can be bought.
    pub async fn add(
        &self,
        product_id: &ProductId,
        quantity: u32,
        options: LineOptions,
    ) -> Result<CartLine> {
        let product = self.catalog.require_product(product_id).await?;
        if !product.in_stock {
            return Err(CliError::OutOfStock(product.title));
        }

        match &options.variant_id {
            Some(variant_id) => {
                let variant = product.require_variant(variant_id)?;
                if !variant.available {
                    return Err(CliError::OutOfStock(format!(
                        "{} ({})",
                        product.title, variant.title
                    )));
                }
            }
            None if product.has_variants() => {
                return Err(CliError::VariantRequired(product.id));
            }
            None => {}
        }

        let quantity = Quantity::new(quantity)?;
        Ok(self.cart.add_line(&product, quantity, options))
    }

    fn render_cart(&self) -> String {
        render::cart(
            &self.cart.lines(),
            self.cart.item_count(),
            self.cart.subtotal(),
        )
    }
}

fn line_label(product_id: &ProductId, variant_id: Option<&VariantId>) -> String {
    match variant_id {
        Some(variant_id) => format!("{product_id} ({variant_id})"),
        None => product_id.to_string(),
    }
}
