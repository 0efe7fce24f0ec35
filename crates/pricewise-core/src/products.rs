use serde::{Deserialize, Serialize};

/// Retailer a product listing was collected from.
///
/// Known retailers get their own variant; anything else the backend reports
/// is kept verbatim in [`Source::Other`]. Serialized as the display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Flipkart,
    Amazon,
    VijaySales,
    JioMart,
    Other(String),
}

impl Source {
    /// Display name, exactly as the backend spells it.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Source::Flipkart => "Flipkart",
            Source::Amazon => "Amazon",
            Source::VijaySales => "Vijay Sales",
            Source::JioMart => "JioMart",
            Source::Other(name) => name,
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Source::Flipkart => "\u{1f4f1}",
            Source::Amazon => "\u{1f6d2}",
            Source::VijaySales => "\u{1f3ec}",
            Source::JioMart => "\u{1f535}",
            Source::Other(_) => "\u{1f6cd}\u{fe0f}",
        }
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Flipkart" => Source::Flipkart,
            "Amazon" => Source::Amazon,
            "Vijay Sales" => Source::VijaySales,
            "JioMart" => Source::JioMart,
            _ => Source::Other(name),
        }
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Source::from(name.to_string())
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single listing returned by the search backend.
///
/// Immutable once received; a new search replaces the whole result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    /// Price as the retailer displays it, e.g. `"₹1,29,999"`.
    pub price: String,
    /// Numeric price used for sorting.
    pub price_num: f64,
    /// Pre-discount display price, if the retailer shows one.
    pub original_price: Option<String>,
    pub source: Source,
    pub category: Option<String>,
    pub rating: Option<f64>,
    /// Product image URL.
    pub image: Option<String>,
    /// Link to the listing on the retailer's site.
    pub link: String,
}

impl Product {
    /// Returns `true` when a different pre-discount price is available.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.original_price
            .as_deref()
            .is_some_and(|original| original != self.price)
    }
}
