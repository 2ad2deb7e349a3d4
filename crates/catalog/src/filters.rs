//! Shop listing filters, sorting and pagination.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Money, Product};

/// Number of products per page when none is requested.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: usize = 100;

/// Order in which a listing is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    TitleAsc,
}

impl SortOrder {
    /// Returns the sort key as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::TitleAsc => "title_asc",
        }
    }

    fn sort(&self, products: &mut [Product]) {
        match self {
            SortOrder::Featured => {}
            SortOrder::PriceAsc => products.sort_by_key(|p| p.price),
            SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::TitleAsc => products.sort_by_key(|p| p.title.to_lowercase()),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "featured" => Ok(SortOrder::Featured),
            "price_asc" | "price-asc" => Ok(SortOrder::PriceAsc),
            "price_desc" | "price-desc" => Ok(SortOrder::PriceDesc),
            "title_asc" | "title-asc" | "title" => Ok(SortOrder::TitleAsc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Builder for constructing product listing queries.
///
/// Allows filtering products by category, free-text search, price range
/// and stock, then sorting and paging the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopFilters {
    /// Filter by category label (case-insensitive).
    pub category: Option<String>,

    /// Case-insensitive substring search over title and description.
    pub search: Option<String>,

    /// Minimum unit price (inclusive).
    pub min_price: Option<Money>,

    /// Maximum unit price (inclusive).
    pub max_price: Option<Money>,

    /// Only return products that can currently be bought.
    pub in_stock_only: bool,

    pub sort: SortOrder,

    /// 1-based page number.
    pub page: usize,

    pub per_page: usize,
}

impl Default for ShopFilters {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            min_price: None,
            max_price: None,
            in_stock_only: false,
            sort: SortOrder::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ShopFilters {
    /// Creates filters matching every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates filters for a category landing page.
    pub fn for_category(category: impl Into<String>) -> Self {
        Self::new().category(category)
    }

    /// Creates filters for a search results page.
    pub fn for_search(query: impl Into<String>) -> Self {
        Self::new().search(query)
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn min_price(mut self, price: Money) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: Money) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Selects a page; page 0 is treated as page 1.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size, clamped to `1..=MAX_PER_PAGE` when applied.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Returns true if `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category
            && !product.category.eq_ignore_ascii_case(category.trim())
        {
            return false;
        }
        if let Some(ref query) = self.search {
            let needle = query.trim().to_lowercase();
            if !needle.is_empty()
                && !product.title.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        if self.in_stock_only && !product.is_purchasable() {
            return false;
        }
        true
    }

    /// Filters, sorts and pages `products`.
    pub fn apply(&self, products: &[Product]) -> ProductPage {
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        self.sort.sort(&mut matching);

        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        let total = matching.len();
        let offset = (page - 1).saturating_mul(per_page);

        let items = matching.into_iter().skip(offset).take(per_page).collect();

        ProductPage {
            items,
            total,
            page,
            per_page,
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,

    /// Number of products matching the filters across all pages.
    pub total: usize,

    pub page: usize,
    pub per_page: usize,
}

impl ProductPage {
    /// Number of pages needed to show every match. Zero when nothing matched.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
