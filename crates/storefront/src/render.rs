//! Plain-text rendering of catalog listings and the cart.

use std::fmt::Write;

use cart::{CartLine, Money};
use catalog::{Product, ProductPage};

/// Renders one page of a product listing.
pub fn product_page(page: &ProductPage) -> String {
    if page.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = String::new();
    for product in &page.items {
        let stock = if product.is_purchasable() {
            ""
        } else {
            "  (out of stock)"
        };
        let _ = writeln!(
            out,
            "{:<16} {:<20} {:>9}{stock}",
            product.id,
            product.title,
            product.display_price()
        );
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} products)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
    out
}

/// Renders a product with its variants.
pub fn product_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", product.title, product.id);
    let _ = writeln!(out, "Price: {}", product.display_price());
    if !product.category.is_empty() {
        let _ = writeln!(out, "Category: {}", product.category);
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "{}", product.description);
    }
    if !product.in_stock {
        let _ = writeln!(out, "Out of stock");
    }

    if product.has_variants() {
        let _ = writeln!(out, "Variants:");
        for variant in &product.variants {
            let status = if variant.available { "" } else { "  (unavailable)" };
            let _ = writeln!(
                out,
                "  {:<24} {:<12} {:>9}{status}",
                variant.id,
                variant.title,
                variant.price.format_in(product.currency)
            );
        }
    }
    out
}

/// Renders the cart lines and totals.
pub fn cart(lines: &[CartLine], item_count: u64, subtotal: Money) -> String {
    if lines.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in lines {
        let mut options: Vec<&str> = Vec::new();
        if let Some(size) = &line.size {
            options.push(size);
        }
        if let Some(color) = &line.color {
            options.push(color);
        }
        let title = if options.is_empty() {
            line.title().to_string()
        } else {
            format!("{} ({})", line.title(), options.join(", "))
        };
        let _ = writeln!(
            out,
            "{:>3} x {:<32} {:>9}",
            line.quantity,
            title,
            line.line_total()
        );
    }
    let noun = if item_count == 1 { "item" } else { "items" };
    let _ = writeln!(out, "{item_count} {noun}, subtotal {subtotal}");
    out
}
