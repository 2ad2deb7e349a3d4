//! How an omitted variant is matched on remove and update.

use std::str::FromStr;

use common::{ProductId, VariantId};
use serde::{Deserialize, Serialize};

use crate::{CartError, CartLine};

/// Matching rule for remove/update calls that don't name a variant.
///
/// With a variant given, both policies require the exact identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// An omitted variant matches only the variant-less line.
    #[default]
    Exact,

    /// An omitted variant matches the first line for the product,
    /// whatever its variant. Kept for callers that don't track variants.
    Permissive,
}

impl MatchPolicy {
    /// Returns true if `line` is targeted by `(product_id, variant_id)`.
    pub fn matches(
        &self,
        line: &CartLine,
        product_id: &ProductId,
        variant_id: Option<&VariantId>,
    ) -> bool {
        if &line.product.id != product_id {
            return false;
        }
        match (variant_id, self) {
            (Some(variant), _) => line.variant_id.as_ref() == Some(variant),
            (None, MatchPolicy::Exact) => line.variant_id.is_none(),
            (None, MatchPolicy::Permissive) => true,
        }
    }

    /// Returns the policy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Exact => "exact",
            MatchPolicy::Permissive => "permissive",
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(MatchPolicy::Exact),
            "permissive" => Ok(MatchPolicy::Permissive),
            _ => Err(CartError::InvalidMatchPolicy(s.to_string())),
        }
    }
}
