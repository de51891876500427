//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Item form handling and draft validation
//! - Conversions between stored items, table rows and drafts
//! - Navigation types (View, FormField)
//! - State error handling

mod error;
mod form;
mod items;
mod navigation;
mod validation;

pub use error::StateError;
pub use form::{Draft, FormMessage, ItemFormHandler, VariantEdit};
pub use items::{
    draft_from_stored, flatten_items, menu_sections, payload_from_draft, ItemRow, MenuEntry,
    MenuSection,
};
pub use navigation::{form_fields, next_field, previous_field, FormField, VariantColumn, View};
pub use validation::{
    validate, FormErrors, VariantError, CATEGORY_REQUIRED, NAME_REQUIRED, PRICE_REQUIRED,
    VARIANT_PRICE_REQUIRED, VARIANT_TYPE_REQUIRED,
};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
