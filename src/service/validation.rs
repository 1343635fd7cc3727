//! Boundary validation of product drafts. Runs in the handlers, before any
//! data reaches the service or store.

use crate::error::AppError;
use crate::product::ProductDraft;

pub struct DraftValidator;

impl DraftValidator {
    /// Reject blank text fields and negative numeric fields. Passing drafts
    /// satisfy every store invariant.
    pub fn validate(draft: &ProductDraft) -> Result<(), AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be blank".into()));
        }
        if draft.category.trim().is_empty() {
            return Err(AppError::Validation("category must not be blank".into()));
        }
        if draft.price < 0.0 {
            return Err(AppError::Validation(
                "price must be greater than or equal to 0".into(),
            ));
        }
        if draft.stock < 0 {
            return Err(AppError::Validation(
                "stock must be greater than or equal to 0".into(),
            ));
        }
        Ok(())
    }
}
