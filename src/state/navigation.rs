//! Navigation-related state types.
//!
//! This module contains the views of the application and the focusable
//! fields of the item form.

use super::form::Draft;

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Items,
    Menu,
    ItemForm,
}

/// Specifying the editable columns of a variant row.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VariantColumn {
    Type,
    Price,
    Cost,
    Stocks,
}

impl VariantColumn {
    pub const ALL: [VariantColumn; 4] = [
        VariantColumn::Type,
        VariantColumn::Price,
        VariantColumn::Cost,
        VariantColumn::Stocks,
    ];
}

/// Specifying the focusable fields of the item form.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Category,
    Name,
    Price,
    Cost,
    Stocks,
    Variant(usize, VariantColumn),
    AddVariant,
    SingleSized,
    Submit,
    Close,
}

impl FormField {
    /// Whether the field is edited as free text.
    ///
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::Price
                | FormField::Cost
                | FormField::Stocks
                | FormField::Variant(_, VariantColumn::Price)
                | FormField::Variant(_, VariantColumn::Cost)
                | FormField::Variant(_, VariantColumn::Stocks)
        )
    }

    /// Whether the field is chosen from a vocabulary.
    ///
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FormField::Category | FormField::Variant(_, VariantColumn::Type)
        )
    }
}

/// Return the focus order of the form for the given draft.
///
pub fn form_fields(draft: &Draft) -> Vec<FormField> {
    let mut fields = vec![FormField::Category, FormField::Name];
    if draft.is_single_sized {
        fields.extend([FormField::Price, FormField::Cost, FormField::Stocks]);
    } else {
        for index in 0..draft.variants.len() {
            fields.extend(
                VariantColumn::ALL
                    .iter()
                    .map(|column| FormField::Variant(index, *column)),
            );
        }
        fields.push(FormField::AddVariant);
    }
    fields.extend([FormField::SingleSized, FormField::Submit, FormField::Close]);
    fields
}

/// Return the field after `current`, wrapping around.
///
pub fn next_field(draft: &Draft, current: FormField) -> FormField {
    let fields = form_fields(draft);
    match fields.iter().position(|f| *f == current) {
        Some(i) => fields[(i + 1) % fields.len()],
        None => fields[0],
    }
}

/// Return the field before `current`, wrapping around.
///
pub fn previous_field(draft: &Draft, current: FormField) -> FormField {
    let fields = form_fields(draft);
    match fields.iter().position(|f| *f == current) {
        Some(0) | None => fields[fields.len() - 1],
        Some(i) => fields[i - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Variant;

    #[test]
    fn single_sized_fields() {
        let fields = form_fields(&Draft::default());
        assert_eq!(
            fields,
            vec![
                FormField::Category,
                FormField::Name,
                FormField::Price,
                FormField::Cost,
                FormField::Stocks,
                FormField::SingleSized,
                FormField::Submit,
                FormField::Close,
            ]
        );
    }

    #[test]
    fn multi_size_fields() {
        let draft = Draft {
            is_single_sized: false,
            variants: vec![Variant::default(), Variant::default()],
            ..Draft::default()
        };
        let fields = form_fields(&draft);
        assert_eq!(fields.len(), 2 + 8 + 1 + 3);
        assert_eq!(fields[2], FormField::Variant(0, VariantColumn::Type));
        assert_eq!(fields[9], FormField::Variant(1, VariantColumn::Stocks));
        assert_eq!(fields[10], FormField::AddVariant);
        assert!(!fields.contains(&FormField::Price));
    }

    #[test]
    fn navigation_wraps() {
        let draft = Draft::default();
        assert_eq!(next_field(&draft, FormField::Close), FormField::Category);
        assert_eq!(previous_field(&draft, FormField::Category), FormField::Close);
        assert_eq!(next_field(&draft, FormField::Name), FormField::Price);
        assert_eq!(previous_field(&draft, FormField::Price), FormField::Name);
    }

    #[test]
    fn navigation_from_stale_field() {
        let draft = Draft::default();
        let stale = FormField::Variant(3, VariantColumn::Cost);
        assert_eq!(next_field(&draft, stale), FormField::Category);
        assert_eq!(previous_field(&draft, stale), FormField::Close);
    }

    #[test]
    fn field_kinds() {
        assert!(FormField::Name.is_text());
        assert!(FormField::Variant(0, VariantColumn::Stocks).is_text());
        assert!(!FormField::Category.is_text());
        assert!(FormField::Category.is_choice());
        assert!(FormField::Variant(1, VariantColumn::Type).is_choice());
        assert!(!FormField::Submit.is_choice());
    }
}
