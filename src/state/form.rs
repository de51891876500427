//! Item form state.
//!
//! The form owns one draft item. Every change replaces the draft with a new
//! value; nothing here talks to the store, persistence is left to whoever
//! receives the submitted draft.

use super::validation::{validate, FormErrors};
use super::StateError;
use crate::store::Variant;

/// In-progress item backing the form.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    /// Key of the persisted item being edited; `None` for a new item.
    pub firebase_id: Option<String>,
    pub category: String,
    pub name: String,
    pub price: f64,
    pub cost: f64,
    pub stocks: i64,
    pub variants: Vec<Variant>,
    pub is_single_sized: bool,
    pub errors: FormErrors,
}

impl Default for Draft {
    fn default() -> Self {
        Draft {
            firebase_id: None,
            category: String::new(),
            name: String::new(),
            price: 0.0,
            cost: 0.0,
            stocks: 0,
            variants: vec![Variant::default()],
            is_single_sized: true,
            errors: FormErrors::default(),
        }
    }
}

impl Draft {
    /// Whether saving this draft updates an existing item.
    ///
    pub fn is_update(&self) -> bool {
        self.firebase_id.is_some()
    }
}

/// Change to one field of a variant row.
///
#[derive(Clone, Debug, PartialEq)]
pub enum VariantEdit {
    Type(String),
    Price(f64),
    Cost(f64),
    Stocks(i64),
}

/// Commands accepted by the form.
///
#[derive(Clone, Debug, PartialEq)]
pub enum FormMessage {
    SetCategory(String),
    SetName(String),
    SetSingleSized(bool),
    SetPrice(f64),
    SetCost(f64),
    SetStocks(i64),
    AddVariant,
    DeleteVariant(usize),
    SetVariantField(usize, VariantEdit),
}

/// Owns the draft and applies field changes to it.
///
#[derive(Clone, Debug, Default)]
pub struct ItemFormHandler {
    draft: Draft,
}

impl ItemFormHandler {
    /// Return a handler with an empty draft.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a handler seeded with an existing draft.
    ///
    pub fn from_draft(draft: Draft) -> Self {
        ItemFormHandler { draft }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_category(&mut self, category: String) {
        self.draft = Draft {
            category,
            ..self.draft.clone()
        };
    }

    pub fn set_name(&mut self, name: String) {
        self.draft = Draft {
            name,
            ..self.draft.clone()
        };
    }

    pub fn set_is_single_sized(&mut self, is_single_sized: bool) {
        self.draft = Draft {
            is_single_sized,
            ..self.draft.clone()
        };
    }

    pub fn set_price(&mut self, price: f64) {
        self.draft = Draft {
            price,
            ..self.draft.clone()
        };
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.draft = Draft {
            cost,
            ..self.draft.clone()
        };
    }

    pub fn set_stocks(&mut self, stocks: i64) {
        self.draft = Draft {
            stocks,
            ..self.draft.clone()
        };
    }

    /// Replace the whole variant list. An empty list is ignored so the draft
    /// always keeps at least one variant.
    ///
    pub fn set_variants(&mut self, variants: Vec<Variant>) {
        if variants.is_empty() {
            log::warn!("Ignoring empty variant list");
            return;
        }
        self.draft = Draft {
            variants,
            ..self.draft.clone()
        };
    }

    /// Validate the draft, store it with its errors and hand it to
    /// `callback`. The callback runs exactly once whether or not the draft
    /// is valid; checking `errors` is up to the caller.
    ///
    pub fn submit<R>(&mut self, callback: impl FnOnce(&Draft) -> R) -> R {
        let errors = validate(&self.draft);
        self.draft = Draft {
            errors,
            ..self.draft.clone()
        };
        callback(&self.draft)
    }

    /// Apply one command to the draft.
    ///
    pub fn apply(&mut self, message: FormMessage) -> Result<(), StateError> {
        match message {
            FormMessage::SetCategory(category) => self.set_category(category),
            FormMessage::SetName(name) => self.set_name(name),
            FormMessage::SetSingleSized(value) => self.set_is_single_sized(value),
            FormMessage::SetPrice(price) => self.set_price(price),
            FormMessage::SetCost(cost) => self.set_cost(cost),
            FormMessage::SetStocks(stocks) => self.set_stocks(stocks),
            FormMessage::AddVariant => {
                let mut variants = self.draft.variants.clone();
                variants.push(Variant::default());
                self.set_variants(variants);
            }
            FormMessage::DeleteVariant(index) => {
                let len = self.draft.variants.len();
                if index >= len {
                    return Err(StateError::VariantIndexOutOfRange { index, len });
                }
                if len == 1 {
                    return Ok(());
                }
                let mut variants = self.draft.variants.clone();
                variants.remove(index);
                self.set_variants(variants);
            }
            FormMessage::SetVariantField(index, edit) => {
                let len = self.draft.variants.len();
                let mut variants = self.draft.variants.clone();
                let variant = variants
                    .get_mut(index)
                    .ok_or(StateError::VariantIndexOutOfRange { index, len })?;
                match edit {
                    VariantEdit::Type(kind) => variant.kind = kind,
                    VariantEdit::Price(price) => variant.price = price,
                    VariantEdit::Cost(cost) => variant.cost = cost,
                    VariantEdit::Stocks(stocks) => variant.stocks = stocks,
                }
                self.set_variants(variants);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validation::{NAME_REQUIRED, VARIANT_TYPE_REQUIRED};
    use fake::{Fake, Faker};

    fn filled() -> ItemFormHandler {
        let mut form = ItemFormHandler::new();
        form.set_category("Drinks".to_string());
        form.set_name("Iced Tea".to_string());
        form.set_price(15.0);
        form.set_cost(10.0);
        form.set_stocks(5);
        form
    }

    #[test]
    fn new_draft_defaults() {
        let form = ItemFormHandler::new();
        let draft = form.draft();
        assert!(draft.is_single_sized);
        assert!(!draft.is_update());
        assert_eq!(draft.variants, vec![Variant::default()]);
        assert!(draft.errors.is_empty());
    }

    #[test]
    fn setters_change_only_their_field() {
        let mut form = filled();
        let before = form.draft().clone();
        form.set_name("Hot Tea".to_string());
        let after = form.draft();
        assert_eq!(after.name, "Hot Tea");
        assert_eq!(
            Draft {
                name: before.name.clone(),
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn set_variants_replaces_list() {
        let mut form = ItemFormHandler::new();
        let variants: Vec<Variant> = vec![Faker.fake(), Faker.fake()];
        form.set_variants(variants.clone());
        assert_eq!(form.draft().variants, variants);

        form.set_variants(vec![]);
        assert_eq!(form.draft().variants, variants);
    }

    #[test]
    fn submit_calls_back_once_with_errors() {
        let mut form = ItemFormHandler::new();
        let mut calls = 0;
        let errors = form.submit(|draft| {
            calls += 1;
            draft.errors.clone()
        });
        assert_eq!(calls, 1);
        assert_eq!(errors.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(form.draft().errors, errors);
    }

    #[test]
    fn submit_only_adds_errors() {
        let mut form = ItemFormHandler::new();
        form.set_name("Fries".to_string());
        let before = form.draft().clone();
        let submitted = form.submit(|draft| draft.clone());
        assert_eq!(
            Draft {
                errors: FormErrors::default(),
                ..submitted.clone()
            },
            before
        );
        assert!(!submitted.errors.is_empty());
    }

    #[test]
    fn submit_valid_draft() {
        let mut form = filled();
        assert!(form.submit(|draft| draft.errors.is_empty()));
    }

    #[test]
    fn resubmit_rederives_errors() {
        let mut form = ItemFormHandler::new();
        form.submit(|_| ());
        assert!(!form.draft().errors.is_empty());
        let mut form = ItemFormHandler::from_draft(Draft {
            errors: form.draft().errors.clone(),
            ..filled().draft().clone()
        });
        assert!(form.submit(|draft| draft.errors.is_empty()));
    }

    #[test]
    fn add_variant_appends_blank() {
        let mut form = ItemFormHandler::new();
        form.apply(FormMessage::SetVariantField(
            0,
            VariantEdit::Type("Small".to_string()),
        ))
        .unwrap();
        let first = form.draft().variants[0].clone();
        form.apply(FormMessage::AddVariant).unwrap();
        let variants = &form.draft().variants;
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0], first);
        assert_eq!(variants[1], Variant::default());
    }

    #[test]
    fn delete_last_variant_is_noop() {
        let mut form = ItemFormHandler::new();
        form.apply(FormMessage::DeleteVariant(0)).unwrap();
        assert_eq!(form.draft().variants.len(), 1);
    }

    #[test]
    fn delete_variant_by_index() {
        let mut form = ItemFormHandler::new();
        form.apply(FormMessage::AddVariant).unwrap();
        form.apply(FormMessage::SetVariantField(
            1,
            VariantEdit::Type("Large".to_string()),
        ))
        .unwrap();
        form.apply(FormMessage::DeleteVariant(0)).unwrap();
        assert_eq!(form.draft().variants.len(), 1);
        assert_eq!(form.draft().variants[0].kind, "Large");
    }

    #[test]
    fn delete_variant_out_of_range() {
        let mut form = ItemFormHandler::new();
        form.apply(FormMessage::AddVariant).unwrap();
        let result = form.apply(FormMessage::DeleteVariant(5));
        assert!(matches!(
            result,
            Err(StateError::VariantIndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn set_variant_fields() {
        let mut form = ItemFormHandler::new();
        form.apply(FormMessage::SetVariantField(0, VariantEdit::Price(25.5)))
            .unwrap();
        form.apply(FormMessage::SetVariantField(0, VariantEdit::Cost(12.0)))
            .unwrap();
        form.apply(FormMessage::SetVariantField(0, VariantEdit::Stocks(7)))
            .unwrap();
        let variant = &form.draft().variants[0];
        assert_eq!(variant.price, 25.5);
        assert_eq!(variant.cost, 12.0);
        assert_eq!(variant.stocks, 7);

        let result = form.apply(FormMessage::SetVariantField(3, VariantEdit::Stocks(1)));
        assert!(result.is_err());
    }

    #[test]
    fn switching_modes_keeps_both_sides() {
        let mut form = filled();
        form.apply(FormMessage::SetSingleSized(false)).unwrap();
        let errors = form.submit(|draft| draft.errors.clone());
        let row = errors.variant(0).unwrap();
        assert_eq!(row.kind.as_deref(), Some(VARIANT_TYPE_REQUIRED));
        assert_eq!(form.draft().price, 15.0);

        form.apply(FormMessage::SetSingleSized(true)).unwrap();
        assert!(form.submit(|draft| draft.errors.is_empty()));
    }
}
