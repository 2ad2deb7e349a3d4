//! Demo clothing range used by the command-line host.

use crate::{Money, Product, ProductVariant};

fn sized(product_id: &str, cents: i64, sizes: &[&str], color: &str) -> Vec<ProductVariant> {
    sizes
        .iter()
        .map(|size| {
            ProductVariant::new(
                format!("{product_id}-{}-{}", size.to_lowercase(), color.to_lowercase()),
                format!("{size} / {color}"),
                Money::from_cents(cents),
            )
            .with_options(*size, color)
        })
        .collect()
}

/// Returns the demo product set.
pub fn demo_products() -> Vec<Product> {
    let mut tee = Product::new("tee-classic", "Classic Tee", Money::from_cents(2000))
        .with_category("Tops")
        .with_description("Heavyweight cotton crew neck tee")
        .with_image("/images/tee-classic.jpg");
    tee.variants = sized("tee-classic", 2000, &["S", "M", "L"], "Red");
    tee.variants.extend(sized("tee-classic", 2000, &["M", "L"], "Blue"));

    let mut hoodie = Product::new("hoodie-zip", "Zip Hoodie", Money::from_cents(5500))
        .with_category("Tops")
        .with_description("Brushed fleece hoodie with full zip")
        .with_image("/images/hoodie-zip.jpg");
    hoodie.variants = sized("hoodie-zip", 5500, &["M", "L", "XL"], "Grey");

    let mut jeans = Product::new("jeans-slim", "Slim Jeans", Money::from_cents(7000))
        .with_category("Bottoms")
        .with_description("Stretch denim in a slim fit")
        .with_image("/images/jeans-slim.jpg");
    jeans.variants = sized("jeans-slim", 7000, &["30", "32", "34"], "Indigo");
    if let Some(last) = jeans.variants.last_mut() {
        last.available = false;
    }

    vec![
        tee,
        hoodie,
        jeans,
        Product::new("shorts-cargo", "Cargo Shorts", Money::from_cents(3500))
            .with_category("Bottoms")
            .with_description("Cotton twill shorts with side pockets")
            .out_of_stock(),
        Product::new("cap-baseball", "Baseball Cap", Money::from_cents(1500))
            .with_category("Accessories")
            .with_description("Six-panel cotton cap"),
        Product::new("socks-pack", "Crew Socks (3 pack)", Money::from_cents(1200))
            .with_category("Accessories")
            .with_description("Ribbed cotton socks"),
    ]
}
