//! Draft validation.
//!
//! Validation is a pure function of the draft. Its result is data, attached
//! to the draft on submit and rendered next to the offending fields.

use super::form::Draft;
use serde::Serialize;

pub const NAME_REQUIRED: &str = "Item name is required.";
pub const CATEGORY_REQUIRED: &str = "Item category is required.";
pub const PRICE_REQUIRED: &str = "Item must have a valid price.";
pub const VARIANT_PRICE_REQUIRED: &str = "Price required.";
pub const VARIANT_TYPE_REQUIRED: &str = "Type required.";

/// Field errors of one variant row.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VariantError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl VariantError {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.kind.is_none()
    }
}

/// Errors derived from a draft. `variants` is index-aligned with the draft's
/// variants and only as long as the last failing row.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Option<VariantError>>>,
}

impl FormErrors {
    /// True when no rule fired.
    ///
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.variants.is_none()
    }

    /// Error of the variant at `index`, if any.
    ///
    pub fn variant(&self, index: usize) -> Option<&VariantError> {
        self.variants
            .as_ref()
            .and_then(|list| list.get(index))
            .and_then(Option::as_ref)
    }

    /// Number of messages, used for the status line.
    ///
    pub fn count(&self) -> usize {
        let top = [&self.name, &self.category, &self.price]
            .iter()
            .filter(|e| e.is_some())
            .count();
        let rows: usize = self
            .variants
            .iter()
            .flatten()
            .flatten()
            .map(|e| e.price.iter().count() + e.kind.iter().count())
            .sum();
        top + rows
    }
}

/// Derive the error map for a draft.
///
/// A price of exactly zero counts as missing, so free items cannot be saved.
pub fn validate(draft: &Draft) -> FormErrors {
    let mut errors = FormErrors::default();
    if draft.name.is_empty() {
        errors.name = Some(NAME_REQUIRED.to_string());
    }
    if draft.category.is_empty() {
        errors.category = Some(CATEGORY_REQUIRED.to_string());
    }

    if draft.is_single_sized {
        if draft.price == 0.0 {
            errors.price = Some(PRICE_REQUIRED.to_string());
        }
        return errors;
    }

    let mut rows: Vec<Option<VariantError>> = vec![];
    for (i, variant) in draft.variants.iter().enumerate() {
        let mut row = VariantError::default();
        if variant.price == 0.0 {
            row.price = Some(VARIANT_PRICE_REQUIRED.to_string());
        }
        if variant.kind.is_empty() {
            row.kind = Some(VARIANT_TYPE_REQUIRED.to_string());
        }
        if !row.is_empty() {
            rows.resize(i, None);
            rows.push(Some(row));
        }
    }
    if !rows.is_empty() {
        errors.variants = Some(rows);
    }
    errors
}
