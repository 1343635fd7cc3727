//! Search criteria and the record predicate they compose.

use crate::product::Product;
use serde::Deserialize;

/// Optional multi-dimensional search criteria. Each field is independently
/// present or absent; an absent field imposes no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// True when no criterion is set. A search with an empty filter is
    /// equivalent to a full listing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// A record matches iff every present criterion is satisfied. Name is a
    /// case-insensitive contiguous substring (the empty pattern matches
    /// everything), category is exact case-sensitive equality, and the price
    /// bounds are inclusive. A `min_price` above `max_price` is evaluated
    /// literally and simply matches nothing.
    ///
    /// `%` and `_` in the name pattern are ordinary characters here; the SQL
    /// realization forwards them to ILIKE unescaped, where they act as
    /// wildcards. Patterns without LIKE metacharacters behave identically on
    /// both paths.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(pattern) = &self.name {
            if !product
                .name
                .to_lowercase()
                .contains(&pattern.to_lowercase())
            {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}
