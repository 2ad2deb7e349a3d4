//! Cart line value objects.

use catalog::{Money, Product};
use common::{LineIdentity, VariantId};
use serde::{Deserialize, Serialize};

use crate::CartError;

/// A validated line quantity (at least one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Creates a quantity, rejecting zero.
    pub fn new(quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity: 0 });
        }
        Ok(Self(quantity))
    }

    /// Returns the quantity as a plain integer.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = CartError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|q| *q > 0)
            .map(Self)
            .ok_or(CartError::InvalidQuantity { quantity: value })
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional attributes supplied when adding a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOptions {
    pub variant_id: Option<VariantId>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineOptions {
    /// No variant and no display attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options selecting a specific variant.
    pub fn for_variant(variant_id: impl Into<VariantId>) -> Self {
        Self::new().variant(variant_id)
    }

    pub fn variant(mut self, variant_id: impl Into<VariantId>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as it was when the line was added.
    pub product: Product,

    pub quantity: u32,

    #[serde(default)]
    pub variant_id: Option<VariantId>,

    /// Size shown with the line.
    #[serde(default)]
    pub size: Option<String>,

    /// Color shown with the line.
    #[serde(default)]
    pub color: Option<String>,
}

impl CartLine {
    /// Creates a line from a product snapshot.
    ///
    /// Size and color that are not given are taken from the selected
    /// variant's option values when the product carries that variant.
    pub fn new(product: Product, quantity: Quantity, options: LineOptions) -> Self {
        let LineOptions {
            variant_id,
            mut size,
            mut color,
        } = options;

        if let Some(variant) = variant_id.as_ref().and_then(|id| product.variant(id)) {
            if size.is_none() {
                size = variant.option1.clone();
            }
            if color.is_none() {
                color = variant.option2.clone();
            }
        }

        Self {
            product,
            quantity: quantity.get(),
            variant_id,
            size,
            color,
        }
    }

    /// Returns this line's identity.
    pub fn identity(&self) -> LineIdentity {
        LineIdentity::new(self.product.id.clone(), self.variant_id.clone())
    }

    /// Returns true if this line has the given identity.
    pub fn has_identity(&self, identity: &LineIdentity) -> bool {
        self.product.id == identity.product_id && self.variant_id == identity.variant_id
    }

    /// Unit price captured on the product snapshot.
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Returns the total price for this line (quantity * unit price).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply(self.quantity)
    }

    pub fn title(&self) -> &str {
        &self.product.title
    }
}
