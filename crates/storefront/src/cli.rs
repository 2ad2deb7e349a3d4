//! Command-line arguments.

use catalog::filters::DEFAULT_PER_PAGE;
use catalog::{Money, ShopFilters, SortOrder};
use clap::{Parser, Subcommand};
use common::{ProductId, VariantId};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Browse the shop and manage your cart")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List products, optionally filtered
    Products {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Match title, description or category
        #[arg(short, long)]
        search: Option<String>,

        /// Lowest unit price, e.g. `10` or `9.99`
        #[arg(long)]
        min_price: Option<Money>,

        /// Highest unit price
        #[arg(long)]
        max_price: Option<Money>,

        /// Hide products that cannot be bought
        #[arg(long)]
        in_stock: bool,

        /// `featured`, `price_asc`, `price_desc` or `title_asc`
        #[arg(long, default_value = "featured")]
        sort: SortOrder,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: usize,
    },

    /// List categories
    Categories,

    /// Show a product and its variants
    Product {
        id: ProductId,

        /// Print the product as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a product to the cart
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Variant to add, required for products with variants
        #[arg(short, long)]
        variant: Option<VariantId>,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a line from the cart
    Remove {
        product_id: ProductId,

        #[arg(short, long)]
        variant: Option<VariantId>,
    },

    /// Set the quantity of a line; zero or less removes it
    Update {
        product_id: ProductId,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        #[arg(short, long)]
        variant: Option<VariantId>,
    },

    /// Empty the cart
    Clear,

    /// Show the cart
    Show {
        /// Print the cart lines as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Builds listing filters from `products` arguments.
#[allow(clippy::too_many_arguments)]
pub(crate) fn filters(
    category: Option<String>,
    search: Option<String>,
    min_price: Option<Money>,
    max_price: Option<Money>,
    in_stock: bool,
    sort: SortOrder,
    page: usize,
    per_page: usize,
) -> ShopFilters {
    let mut filters = ShopFilters::new()
        .in_stock_only(in_stock)
        .sort(sort)
        .page(page)
        .per_page(per_page);
    if let Some(category) = category {
        filters = filters.category(category);
    }
    if let Some(search) = search {
        filters = filters.search(search);
    }
    if let Some(min) = min_price {
        filters = filters.min_price(min);
    }
    if let Some(max) = max_price {
        filters = filters.max_price(max);
    }
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("storefront").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_parse_add_with_variant() {
        let command = parse(&["add", "tee-classic", "-q", "2", "--variant", "tee-classic-m-red"]);
        assert_eq!(
            command,
            Command::Add {
                product_id: ProductId::new("tee-classic"),
                quantity: 2,
                variant: Some(VariantId::new("tee-classic-m-red")),
                size: None,
                color: None,
            }
        );
    }

    #[test]
    fn test_parse_products_defaults() {
        let command = parse(&["products"]);
        assert_eq!(
            command,
            Command::Products {
                category: None,
                search: None,
                min_price: None,
                max_price: None,
                in_stock: false,
                sort: SortOrder::Featured,
                page: 1,
                per_page: DEFAULT_PER_PAGE,
            }
        );
    }

    #[test]
    fn test_parse_products_price_range() {
        let Command::Products {
            min_price,
            max_price,
            sort,
            ..
        } = parse(&[
            "products",
            "--min-price",
            "10",
            "--max-price",
            "$49.99",
            "--sort",
            "price-desc",
        ])
        else {
            panic!("expected products command");
        };
        assert_eq!(min_price, Some(Money::from_cents(1000)));
        assert_eq!(max_price, Some(Money::from_cents(4999)));
        assert_eq!(sort, SortOrder::PriceDesc);
    }

    #[test]
    fn test_parse_update_negative_quantity() {
        let command = parse(&["update", "p1", "-1"]);
        assert_eq!(
            command,
            Command::Update {
                product_id: ProductId::new("p1"),
                quantity: -1,
                variant: None,
            }
        );
    }

    #[test]
    fn test_rejects_bad_price_and_zero_args() {
        assert!(Cli::try_parse_from(["storefront", "products", "--min-price", "abc"]).is_err());
        assert!(Cli::try_parse_from(["storefront", "add"]).is_err());
        assert!(Cli::try_parse_from(["storefront", "products", "--sort", "random"]).is_err());
    }

    #[test]
    fn test_filters_from_args() {
        let filters = filters(
            Some("Tops".to_string()),
            None,
            Some(Money::from_dollars(10)),
            None,
            true,
            SortOrder::TitleAsc,
            2,
            5,
        );
        assert_eq!(filters.category.as_deref(), Some("Tops"));
        assert_eq!(filters.min_price, Some(Money::from_dollars(10)));
        assert!(filters.in_stock_only);
        assert_eq!(filters.page, 2);
        assert_eq!(filters.per_page, 5);
    }
}
