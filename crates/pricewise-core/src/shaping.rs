//! Client-side result shaping: filtering, sorting, best-deal selection, and
//! the facet lists the filter controls are built from.
//!
//! Everything here is a pure function of the raw result set and the current
//! [`FilterState`]; nothing is cached between calls.

use std::str::FromStr;

use crate::products::{Product, Source};
use crate::FilterError;

/// Source selection. `All` passes every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceFilter {
    #[default]
    All,
    Only(Source),
}

impl SourceFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(source) => product.source == *source,
        }
    }
}

impl FromStr for SourceFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FilterError::Empty);
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(SourceFilter::All);
        }
        Ok(SourceFilter::Only(Source::from(s)))
    }
}

/// Category selection. `All` passes every product; a specific category never
/// matches a product without one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => {
                product.category.as_deref() == Some(category.as_str())
            }
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FilterError::Empty);
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Price: low to high.
    #[default]
    PriceAsc,
    /// Price: high to low.
    PriceDesc,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price-asc" | "asc" => Ok(SortKey::PriceAsc),
            "price-desc" | "desc" => Ok(SortKey::PriceDesc),
            _ => Err(FilterError::UnknownSortKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient UI filter state. Defaults to all sources, all categories,
/// cheapest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub source: SourceFilter,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl FilterState {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.source.matches(product) && self.category.matches(product)
    }
}

/// Filters `products` by source and category, then sorts by `price_num`.
///
/// The sort is stable: products with equal prices keep their input order.
#[must_use]
pub fn shape<'a>(products: &'a [Product], filter: &FilterState) -> Vec<&'a Product> {
    let mut shaped: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    match filter.sort {
        SortKey::PriceAsc => shaped.sort_by(|a, b| a.price_num.total_cmp(&b.price_num)),
        SortKey::PriceDesc => shaped.sort_by(|a, b| b.price_num.total_cmp(&a.price_num)),
    }
    shaped
}

/// The best deal is the first product of the shaped list.
#[must_use]
pub fn best_deal<'a>(shaped: &[&'a Product]) -> Option<&'a Product> {
    shaped.first().copied()
}

/// Distinct sources in first-seen order, each with its product count.
#[must_use]
pub fn source_facets(products: &[Product]) -> Vec<(Source, usize)> {
    let mut facets: Vec<(Source, usize)> = Vec::new();
    for product in products {
        match facets.iter_mut().find(|(s, _)| *s == product.source) {
            Some((_, count)) => *count += 1,
            None => facets.push((product.source.clone(), 1)),
        }
    }
    facets
}

/// Distinct categories in first-seen order. Products without a category
/// contribute nothing.
#[must_use]
pub fn category_facets(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in products.iter().filter_map(|p| p.category.as_deref()) {
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

/// A shaped result list together with the size of the raw set it came from.
#[derive(Debug, Clone)]
pub struct ShapedView<'a> {
    pub products: Vec<&'a Product>,
    pub total: usize,
}

impl<'a> ShapedView<'a> {
    #[must_use]
    pub fn new(products: &'a [Product], filter: &FilterState) -> Self {
        Self {
            products: shape(products, filter),
            total: products.len(),
        }
    }

    #[must_use]
    pub fn best_deal(&self) -> Option<&'a Product> {
        best_deal(&self.products)
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} products",
            self.products.len(),
            self.total
        )
    }
}

#[cfg(test)]
#[path = "shaping_test.rs"]
mod tests;
