//! Product records as served by the catalog backend.

use common::{ProductId, VariantId};
use serde::{Deserialize, Serialize};

use crate::{CatalogError, CurrencyCode, Money, Result};

/// A purchasable configuration of a product, such as "M / Red".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,

    /// Display title, e.g. "M / Red".
    pub title: String,

    pub price: Money,

    pub available: bool,

    /// First option value, conventionally the size.
    #[serde(default)]
    pub option1: Option<String>,

    /// Second option value, conventionally the color.
    #[serde(default)]
    pub option2: Option<String>,
}

impl ProductVariant {
    /// Creates an available variant with no option values.
    pub fn new(id: impl Into<VariantId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            available: true,
            option1: None,
            option2: None,
        }
    }

    /// Sets the size and color option values.
    pub fn with_options(mut self, size: impl Into<String>, color: impl Into<String>) -> Self {
        self.option1 = Some(size.into());
        self.option2 = Some(color.into());
        self
    }

    /// Marks the variant as sold out.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// The size option, if any.
    pub fn size(&self) -> Option<&str> {
        self.option1.as_deref()
    }

    /// The color option, if any.
    pub fn color(&self) -> Option<&str> {
        self.option2.as_deref()
    }
}

/// A catalog product.
///
/// The cart stores a clone of this record at the moment a line is added,
/// so catalog updates never reach lines already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,

    /// Unit price in the product's currency.
    pub price: Money,

    #[serde(default)]
    pub currency: CurrencyCode,

    /// Primary image URL.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Category label used by landing pages and filters.
    #[serde(default)]
    pub category: String,

    pub in_stock: bool,

    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Creates an in-stock product with no variants.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            currency: CurrencyCode::default(),
            image_url: None,
            category: String::new(),
            in_stock: true,
            variants: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Marks the product as out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Looks up a variant by ID.
    pub fn variant(&self, variant_id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == variant_id)
    }

    /// Looks up a variant by ID, failing if the product doesn't carry it.
    pub fn require_variant(&self, variant_id: &VariantId) -> Result<&ProductVariant> {
        self.variant(variant_id)
            .ok_or_else(|| CatalogError::VariantNotFound {
                product_id: self.id.clone(),
                variant_id: variant_id.clone(),
            })
    }

    /// Returns true if the product has purchasable variants.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Returns true if the product can currently be bought.
    ///
    /// A product with variants is purchasable only while at least one
    /// variant is available.
    pub fn is_purchasable(&self) -> bool {
        self.in_stock && (self.variants.is_empty() || self.variants.iter().any(|v| v.available))
    }

    /// Formats the unit price in the product's currency.
    pub fn display_price(&self) -> String {
        self.price.format_in(self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee() -> Product {
        Product::new("tee-classic", "Classic Tee", Money::from_cents(2000))
            .with_category("Tops")
            .with_variant(
                ProductVariant::new("tee-m-red", "M / Red", Money::from_cents(2000))
                    .with_options("M", "Red"),
            )
            .with_variant(
                ProductVariant::new("tee-l-blue", "L / Blue", Money::from_cents(2200))
                    .with_options("L", "Blue")
                    .unavailable(),
            )
    }

    #[test]
    fn test_variant_lookup() {
        let product = tee();
        let variant = product.variant(&VariantId::new("tee-m-red")).unwrap();
        assert_eq!(variant.size(), Some("M"));
        assert_eq!(variant.color(), Some("Red"));
        assert!(product.variant(&VariantId::new("missing")).is_none());
    }

    #[test]
    fn test_require_variant_reports_missing() {
        let product = tee();
        let result = product.require_variant(&VariantId::new("tee-xs-green"));
        assert!(matches!(result, Err(CatalogError::VariantNotFound { .. })));
    }

    #[test]
    fn test_purchasable_rules() {
        assert!(tee().is_purchasable());
        assert!(!tee().out_of_stock().is_purchasable());

        let sold_out = Product::new("cap", "Cap", Money::from_cents(1500)).with_variant(
            ProductVariant::new("cap-os", "One Size", Money::from_cents(1500)).unavailable(),
        );
        assert!(!sold_out.is_purchasable());

        let simple = Product::new("sock", "Socks", Money::from_cents(800));
        assert!(simple.is_purchasable());
    }

    #[test]
    fn test_display_price_uses_currency() {
        let product = Product::new("scarf", "Scarf", Money::from_cents(3450))
            .with_currency(CurrencyCode::EUR);
        assert_eq!(product.display_price(), "€34.50");
    }

    #[test]
    fn test_deserialize_minimal_backend_shape() {
        let json = serde_json::json!({
            "id": "p1",
            "title": "Linen Shirt",
            "price": { "cents": 4500 },
            "in_stock": true
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.currency, CurrencyCode::USD);
        assert!(product.variants.is_empty());
        assert!(product.category.is_empty());
    }
}
