use serde::{Deserialize, Serialize};

/// Catalog identifier of a product.
///
/// Product ids come from the backend as opaque strings (handles or SKUs),
/// so no format is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a purchasable variant (a size/color combination).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    /// Creates a variant ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the variant ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VariantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VariantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for VariantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The identity of a cart line.
///
/// Two lines are the same line exactly when both the product and the
/// variant match; a missing variant only equals another missing variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineIdentity {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
}

impl LineIdentity {
    /// Creates an identity from a product and optional variant.
    pub fn new(product_id: impl Into<ProductId>, variant_id: Option<VariantId>) -> Self {
        Self {
            product_id: product_id.into(),
            variant_id,
        }
    }

    /// Identity of a product line without a variant.
    pub fn product(product_id: impl Into<ProductId>) -> Self {
        Self::new(product_id, None)
    }

    /// Returns true if this identity carries a variant.
    pub fn has_variant(&self) -> bool {
        self.variant_id.is_some()
    }
}

impl std::fmt::Display for LineIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variant_id {
            Some(variant) => write!(f, "{}/{}", self.product_id, variant),
            None => write!(f, "{}", self.product_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_string_conversion() {
        let id = ProductId::new("tee-classic");
        assert_eq!(id.as_str(), "tee-classic");

        let id2: ProductId = "hoodie-zip".into();
        assert_eq!(id2.to_string(), "hoodie-zip");
    }

    #[test]
    fn identity_without_variant_only_equals_without_variant() {
        let plain = LineIdentity::product("p1");
        let with_variant = LineIdentity::new("p1", Some(VariantId::new("v1")));

        assert_eq!(plain, LineIdentity::product("p1"));
        assert_ne!(plain, with_variant);
        assert_ne!(
            with_variant,
            LineIdentity::new("p1", Some(VariantId::new("v2")))
        );
    }

    #[test]
    fn identity_display() {
        assert_eq!(LineIdentity::product("p1").to_string(), "p1");
        assert_eq!(
            LineIdentity::new("p1", Some("v1".into())).to_string(),
            "p1/v1"
        );
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&VariantId::new("v-m-red")).unwrap();
        assert_eq!(json, "\"v-m-red\"");

        let identity = LineIdentity::new("p1", None);
        let json = serde_json::to_string(&identity).unwrap();
        let restored: LineIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(identity, restored);
    }
}
