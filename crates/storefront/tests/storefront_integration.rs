//! Integration tests for the storefront commands.
//!
//! Commands run against the demo catalog with either an in-memory cart or
//! a cart file in a temporary directory.

use std::sync::Arc;

use cart::{CartConfig, CartStore, LineOptions, NullNotifier};
use catalog::{InMemoryCatalog, SortOrder};
use common::ProductId;
use kv_store::InMemoryKeyValueStore;
use storefront::{CliError, Command, Config, Storefront};

fn storefront() -> Storefront {
    let cart = CartStore::builder(Arc::new(InMemoryKeyValueStore::new()))
        .notifier(Arc::new(NullNotifier))
        .open();
    Storefront::new(
        Arc::new(InMemoryCatalog::with_demo_products()),
        Arc::new(cart),
    )
}

fn add(product_id: &str, quantity: u32, variant: Option<&str>) -> Command {
    Command::Add {
        product_id: ProductId::new(product_id),
        quantity,
        variant: variant.map(Into::into),
        size: None,
        color: None,
    }
}

mod browsing {
    use super::*;

    #[tokio::test]
    async fn list_products_by_category() {
        let shop = storefront();

        let output = shop
            .execute(Command::Products {
                category: Some("Bottoms".to_string()),
                search: None,
                min_price: None,
                max_price: None,
                in_stock: false,
                sort: SortOrder::Featured,
                page: 1,
                per_page: 12,
            })
            .await
            .unwrap();

        assert!(output.contains("jeans-slim"));
        assert!(output.contains("shorts-cargo"));
        assert!(output.contains("(out of stock)"));
        assert!(!output.contains("tee-classic"));
    }

    #[tokio::test]
    async fn in_stock_filter_hides_unavailable() {
        let shop = storefront();

        let output = shop
            .execute(Command::Products {
                category: Some("Bottoms".to_string()),
                search: None,
                min_price: None,
                max_price: None,
                in_stock: true,
                sort: SortOrder::PriceAsc,
                page: 1,
                per_page: 12,
            })
            .await
            .unwrap();

        assert!(!output.contains("shorts-cargo"));
    }

    #[tokio::test]
    async fn categories_are_listed() {
        let output = storefront().execute(Command::Categories).await.unwrap();
        assert_eq!(output, "Tops\nBottoms\nAccessories\n");
    }

    #[tokio::test]
    async fn product_detail_and_json() {
        let shop = storefront();

        let text = shop
            .execute(Command::Product {
                id: ProductId::new("tee-classic"),
                json: false,
            })
            .await
            .unwrap();
        assert!(text.contains("tee-classic-m-blue"));

        let json = shop
            .execute(Command::Product {
                id: ProductId::new("tee-classic"),
                json: true,
            })
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "tee-classic");
    }

    #[tokio::test]
    async fn unknown_product_is_an_error() {
        let result = storefront()
            .execute(Command::Product {
                id: ProductId::new("nope"),
                json: false,
            })
            .await;
        assert!(matches!(result, Err(CliError::Catalog(_))));
    }
}

mod cart_commands {
    use super::*;

    #[tokio::test]
    async fn add_merges_and_shows_totals() {
        let shop = storefront();

        shop.execute(add("cap-baseball", 1, None)).await.unwrap();
        let output = shop.execute(add("cap-baseball", 2, None)).await.unwrap();

        assert_eq!(shop.cart().line_count(), 1);
        assert!(output.ends_with("3 items, subtotal $45.00\n"));
    }

    #[tokio::test]
    async fn add_requires_variant_when_product_has_them() {
        let result = storefront().execute(add("tee-classic", 1, None)).await;
        assert!(matches!(result, Err(CliError::VariantRequired(_))));
    }

    #[tokio::test]
    async fn add_rejects_unknown_variant() {
        let result = storefront()
            .execute(add("tee-classic", 1, Some("tee-classic-xl-green")))
            .await;
        assert!(matches!(result, Err(CliError::Catalog(_))));
    }

    #[tokio::test]
    async fn add_rejects_out_of_stock() {
        let shop = storefront();

        let product = shop.execute(add("shorts-cargo", 1, None)).await;
        assert!(matches!(product, Err(CliError::OutOfStock(_))));

        let variant = shop
            .execute(add("jeans-slim", 1, Some("jeans-slim-34-indigo")))
            .await;
        assert!(matches!(variant, Err(CliError::OutOfStock(_))));

        assert!(shop.cart().is_empty());
    }

    #[tokio::test]
    async fn add_rejects_zero_quantity() {
        let result = storefront().execute(add("cap-baseball", 0, None)).await;
        assert!(matches!(result, Err(CliError::Cart(_))));
    }

    #[tokio::test]
    async fn variant_line_gets_size_and_color() {
        let shop = storefront();

        let output = shop
            .execute(add("tee-classic", 2, Some("tee-classic-l-red")))
            .await
            .unwrap();

        assert!(output.contains("Classic Tee (L, Red)"));
    }

    #[tokio::test]
    async fn update_remove_and_clear() {
        let shop = storefront();
        shop.execute(add("socks-pack", 1, None)).await.unwrap();
        shop.execute(add("hoodie-zip", 1, Some("hoodie-zip-m-grey")))
            .await
            .unwrap();

        shop.execute(Command::Update {
            product_id: ProductId::new("socks-pack"),
            quantity: 4,
            variant: None,
        })
        .await
        .unwrap();
        assert_eq!(shop.cart().item_count(), 5);

        let missing = shop
            .execute(Command::Remove {
                product_id: ProductId::new("hoodie-zip"),
                variant: None,
            })
            .await
            .unwrap();
        assert_eq!(missing, "hoodie-zip is not in your cart.\n");

        shop.execute(Command::Update {
            product_id: ProductId::new("socks-pack"),
            quantity: -1,
            variant: None,
        })
        .await
        .unwrap();
        assert_eq!(shop.cart().line_count(), 1);

        let output = shop.execute(Command::Clear).await.unwrap();
        assert_eq!(output, "Your cart is empty.\n");
    }

    #[tokio::test]
    async fn permissive_policy_removes_without_variant() {
        let cart = CartStore::builder(Arc::new(InMemoryKeyValueStore::new()))
            .config(CartConfig {
                match_policy: cart::MatchPolicy::Permissive,
                ..CartConfig::default()
            })
            .notifier(Arc::new(NullNotifier))
            .open();
        let shop = Storefront::new(
            Arc::new(InMemoryCatalog::with_demo_products()),
            Arc::new(cart),
        );
        shop.execute(add("hoodie-zip", 1, Some("hoodie-zip-l-grey")))
            .await
            .unwrap();

        shop.execute(Command::Remove {
            product_id: ProductId::new("hoodie-zip"),
            variant: None,
        })
        .await
        .unwrap();

        assert!(shop.cart().is_empty());
    }

    #[tokio::test]
    async fn show_json_lists_lines() {
        let shop = storefront();
        shop.add(
            &ProductId::new("cap-baseball"),
            2,
            LineOptions::new().color("Black"),
        )
        .await
        .unwrap();

        let json = shop.execute(Command::Show { json: true }).await.unwrap();
        let lines: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["quantity"], 2);
        assert_eq!(lines[0]["color"], "Black");
    }
}

mod file_backed {
    use super::*;

    #[tokio::test]
    async fn cart_survives_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            cart_path: dir.path().join("cart.json"),
            ..Config::default()
        };

        {
            let shop = Storefront::open(&config).unwrap();
            shop.execute(add("cap-baseball", 2, None)).await.unwrap();
        }

        let shop = Storefront::open(&config).unwrap();
        let output = shop.execute(Command::Show { json: false }).await.unwrap();

        assert!(output.contains("Baseball Cap"));
        assert!(output.ends_with("2 items, subtotal $30.00\n"));
    }

    #[tokio::test]
    async fn corrupt_cart_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "garbage").unwrap();
        let config = Config {
            cart_path: path,
            ..Config::default()
        };

        let shop = Storefront::open(&config).unwrap();
        assert!(shop.cart().is_empty());
    }
}
