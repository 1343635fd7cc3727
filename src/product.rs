//! Product record and wire input types.

use serde::{Deserialize, Serialize};

/// A persisted catalog record. Treated as an immutable value: updates replace
/// the whole record rather than mutating fields in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
}

/// Wire input for create and update. A caller-supplied `id` is never honored:
/// the store assigns identity on create, and the path id is authoritative on
/// update. Every payload field is the full desired state (no partial patch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
}

impl ProductDraft {
    /// Materialize the draft as a record under the given identity.
    pub fn with_id(&self, id: i64) -> Product {
        Product {
            id,
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            stock: self.stock,
        }
    }
}
