//! Normalization from backend wire types to [`pricewise_core::Product`].
//!
//! The backend passes scraped text through mostly untouched, so this is where
//! placeholder values (`"N/A"`, blank strings) become `None` and a missing
//! numeric price is recovered from the display price.

use pricewise_core::{parse_price, Product, Source};

use crate::error::SearchError;
use crate::types::WireProduct;

const UNTITLED: &str = "<untitled>";

/// Normalizes every product in a response, dropping the ones that cannot be
/// decoded, priced or linked. Dropped products are logged at `warn`.
#[must_use]
pub fn normalize_products(products: Vec<serde_json::Value>) -> Vec<Product> {
    products
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match decode_and_normalize(value) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping product");
                None
            }
        })
        .collect()
}

fn decode_and_normalize(value: serde_json::Value) -> Result<Product, SearchError> {
    let wire: WireProduct =
        serde_json::from_value(value).map_err(|source| SearchError::Deserialize {
            context: "search result product".to_string(),
            source,
        })?;
    normalize_product(wire)
}

/// Normalizes a single [`WireProduct`].
///
/// # Errors
///
/// Returns [`SearchError::Normalization`] if the product has no title, no
/// source, no usable numeric price or no link.
pub fn normalize_product(wire: WireProduct) -> Result<Product, SearchError> {
    let title = non_placeholder(wire.title).ok_or_else(|| SearchError::Normalization {
        title: UNTITLED.to_string(),
        reason: "no title".into(),
    })?;

    let source = non_placeholder(wire.source).ok_or_else(|| SearchError::Normalization {
        title: title.clone(),
        reason: "no source".into(),
    })?;

    let price = non_placeholder(wire.price);

    let price_num = wire
        .price_num
        .filter(|n| n.is_finite())
        .or_else(|| price.as_deref().and_then(parse_price))
        .ok_or_else(|| SearchError::Normalization {
            title: title.clone(),
            reason: "no numeric price".into(),
        })?;

    let link = non_placeholder(wire.link)
        .or_else(|| non_placeholder(wire.url))
        .ok_or_else(|| SearchError::Normalization {
            title: title.clone(),
            reason: "no product link".into(),
        })?;

    // Fall back to a plain rendering so the table never shows a blank price.
    let price = price.unwrap_or_else(|| format!("{price_num}"));

    Ok(Product {
        title,
        price,
        price_num,
        original_price: non_placeholder(wire.original_price),
        source: Source::from(source),
        category: non_placeholder(wire.category),
        rating: wire.rating.as_ref().and_then(parse_rating),
        image: non_placeholder(wire.image),
        link,
    })
}

/// Treats blank strings and `"N/A"` as absent.
fn non_placeholder(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("n/a"))
}

/// Reads a rating from a bare number or from text whose leading token is a
/// number, e.g. `"4.3 out of 5 stars"`.
fn parse_rating(value: &serde_json::Value) -> Option<f64> {
    let rating = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => {
            let token: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            token.parse::<f64>().ok()?
        }
        _ => return None,
    };
    rating.is_finite().then_some(rating)
}
