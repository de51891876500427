//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No item form is open
    #[error("Item form is not open")]
    FormNotOpen,

    /// Variant index does not exist in the draft
    #[error("Variant index {index} out of range (draft has {len} variants)")]
    VariantIndexOutOfRange { index: usize, len: usize },

    /// Table has no selected row
    #[error("No item selected")]
    NoRowSelected,

    /// A save is already in flight
    #[error("Item is already being saved")]
    SaveInProgress,

    /// Another form took the screen before an item arrived
    #[error("Another item form is already open")]
    FormAlreadyOpen,
}
