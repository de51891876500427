//! Conversions between persisted items, table rows and drafts.

use super::form::Draft;
use crate::store::{StoredItem, Variant, DEFAULT_SIZE};
use crate::utils::text_processing::capitalized_first;
use std::collections::BTreeMap;

/// One table row: a single size of a persisted item.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRow {
    pub id: String,
    pub firebase_id: String,
    pub category: String,
    pub name: String,
    pub size: String,
    pub price: f64,
    pub cost: f64,
    pub stocks: i64,
}

/// Flatten stored items into one row per size, keyed `<key>_<index>`.
///
pub fn flatten_items(items: &BTreeMap<String, StoredItem>) -> Vec<ItemRow> {
    items
        .iter()
        .flat_map(|(key, item)| {
            item.sizes.iter().enumerate().map(move |(i, size)| ItemRow {
                id: format!("{}_{}", key, i),
                firebase_id: key.to_owned(),
                category: item.category.to_owned(),
                name: item.name.to_owned(),
                size: size.kind.to_owned(),
                price: size.price,
                cost: size.cost,
                stocks: size.stocks,
            })
        })
        .collect()
}

/// Rebuild an editable draft from a persisted item.
///
pub fn draft_from_stored(firebase_id: &str, item: StoredItem) -> Draft {
    let first = item.sizes.first().cloned().unwrap_or_default();
    let (price, cost, stocks) = if item.is_single_sized {
        (first.price, first.cost, first.stocks)
    } else {
        (0.0, 0.0, 0)
    };
    let variants = if item.sizes.is_empty() {
        vec![Variant::default()]
    } else {
        item.sizes
    };
    Draft {
        firebase_id: Some(firebase_id.to_owned()),
        category: item.category,
        name: item.name,
        price,
        cost,
        stocks,
        variants,
        is_single_sized: item.is_single_sized,
        ..Draft::default()
    }
}

/// Build the record written to the store for a validated draft.
///
pub fn payload_from_draft(draft: &Draft) -> StoredItem {
    let sizes = if draft.is_single_sized {
        vec![Variant {
            kind: DEFAULT_SIZE.to_string(),
            price: draft.price,
            cost: draft.cost,
            stocks: draft.stocks,
        }]
    } else {
        draft.variants.clone()
    };
    StoredItem {
        category: draft.category.to_owned(),
        name: capitalized_first(&draft.name),
        is_single_sized: draft.is_single_sized,
        sizes,
    }
}

/// One item on the menu.
///
#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry {
    pub name: String,
    pub sizes: Vec<Variant>,
}

impl MenuEntry {
    /// Single-sized entries are shown on one line with their price.
    ///
    pub fn is_single_line(&self) -> bool {
        matches!(self.sizes.as_slice(), [only] if only.kind == DEFAULT_SIZE)
    }

    pub fn line_count(&self) -> usize {
        if self.is_single_line() {
            1
        } else {
            1 + self.sizes.len()
        }
    }
}

/// Items of one category on the menu.
///
#[derive(Clone, Debug, PartialEq)]
pub struct MenuSection {
    pub category: String,
    pub entries: Vec<MenuEntry>,
}

impl MenuSection {
    /// Rendered lines: header, entries and a trailing blank line.
    ///
    pub fn line_count(&self) -> usize {
        2 + self.entries.iter().map(MenuEntry::line_count).sum::<usize>()
    }
}

/// Group items by category, categories and names in alphabetical order.
///
pub fn menu_sections(items: &BTreeMap<String, StoredItem>) -> Vec<MenuSection> {
    let mut grouped: BTreeMap<&str, Vec<MenuEntry>> = BTreeMap::new();
    for item in items.values() {
        grouped.entry(item.category.as_str()).or_default().push(MenuEntry {
            name: item.name.to_owned(),
            sizes: item.sizes.clone(),
        });
    }
    grouped
        .into_iter()
        .map(|(category, mut entries)| {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            MenuSection {
                category: category.to_owned(),
                entries,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validation::validate;
    use fake::{Fake, Faker};
    use serde_json::json;

    fn variant(kind: &str, price: f64, cost: f64, stocks: i64) -> Variant {
        Variant {
            kind: kind.to_string(),
            price,
            cost,
            stocks,
        }
    }

    fn coffee() -> StoredItem {
        StoredItem {
            category: "Drinks".to_string(),
            name: "Coffee".to_string(),
            is_single_sized: false,
            sizes: vec![variant("Small", 50.0, 20.0, 3), variant("Large", 80.0, 30.0, 1)],
        }
    }

    fn fries() -> StoredItem {
        StoredItem {
            category: "Food".to_string(),
            name: "Fries".to_string(),
            is_single_sized: true,
            sizes: vec![variant(DEFAULT_SIZE, 40.0, 15.0, 12)],
        }
    }

    #[test]
    fn flatten_one_row_per_size() {
        let mut items = BTreeMap::new();
        items.insert("-Na".to_string(), coffee());
        items.insert("-Nb".to_string(), fries());

        let rows = flatten_items(&items);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "-Na_0");
        assert_eq!(rows[1].id, "-Na_1");
        assert_eq!(rows[1].size, "Large");
        assert_eq!(rows[1].price, 80.0);
        assert_eq!(rows[2].firebase_id, "-Nb");
        assert_eq!(rows[2].category, "Food");
        assert_eq!(rows[2].stocks, 12);
    }

    #[test]
    fn flatten_item_without_sizes() {
        let mut items = BTreeMap::new();
        items.insert("-Na".to_string(), StoredItem::default());
        assert!(flatten_items(&items).is_empty());
    }

    #[test]
    fn draft_from_single_sized_item() {
        let draft = draft_from_stored("-Nb", fries());
        assert_eq!(draft.firebase_id.as_deref(), Some("-Nb"));
        assert!(draft.is_update());
        assert!(draft.is_single_sized);
        assert_eq!(draft.price, 40.0);
        assert_eq!(draft.cost, 15.0);
        assert_eq!(draft.stocks, 12);
        assert!(draft.errors.is_empty());
    }

    #[test]
    fn draft_from_multi_size_item() {
        let draft = draft_from_stored("-Na", coffee());
        assert!(!draft.is_single_sized);
        assert_eq!(draft.variants.len(), 2);
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn draft_from_item_without_sizes_keeps_one_variant() {
        let item = StoredItem {
            is_single_sized: true,
            ..Faker.fake::<StoredItem>()
        };
        let draft = draft_from_stored(
            "-Nc",
            StoredItem {
                sizes: vec![],
                ..item
            },
        );
        assert_eq!(draft.variants.len(), 1);
        assert_eq!(draft.price, 0.0);
    }

    #[test]
    fn single_sized_payload() {
        let draft = Draft {
            category: "Drinks".to_string(),
            name: "Iced Tea".to_string(),
            price: 15.0,
            cost: 10.0,
            stocks: 5,
            ..Draft::default()
        };
        assert!(validate(&draft).is_empty());
        let payload = payload_from_draft(&draft);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "category": "Drinks",
                "name": "Iced Tea",
                "is_single_sized": true,
                "sizes": [{ "type": "Default", "price": 15.0, "cost": 10.0, "stocks": 5 }]
            })
        );
    }

    #[test]
    fn multi_size_payload_keeps_variants() {
        let draft = Draft {
            category: "Drinks".to_string(),
            name: "hot coffee".to_string(),
            price: 99.0,
            is_single_sized: false,
            variants: vec![variant("Small", 50.0, 20.0, 3)],
            ..Draft::default()
        };
        let payload = payload_from_draft(&draft);
        assert_eq!(payload.name, "Hot Coffee");
        assert_eq!(payload.sizes, draft.variants);
    }

    #[test]
    fn edit_round_trip() {
        let draft = draft_from_stored("-Na", coffee());
        assert_eq!(payload_from_draft(&draft), coffee());
        let draft = draft_from_stored("-Nb", fries());
        assert_eq!(payload_from_draft(&draft), fries());
    }

    #[test]
    fn menu_groups_by_category() {
        let mut items = BTreeMap::new();
        items.insert("-Na".to_string(), coffee());
        items.insert("-Nb".to_string(), fries());
        items.insert(
            "-Nc".to_string(),
            StoredItem {
                name: "Americano".to_string(),
                ..coffee()
            },
        );

        let sections = menu_sections(&items);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].category, "Drinks");
        let names: Vec<&str> = sections[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Americano", "Coffee"]);
        assert_eq!(sections[1].entries[0].sizes.len(), 1);
    }

    #[test]
    fn menu_line_counts() {
        let mut items = BTreeMap::new();
        items.insert("-Na".to_string(), coffee());
        items.insert("-Nb".to_string(), fries());

        let sections = menu_sections(&items);
        assert!(!sections[0].entries[0].is_single_line());
        assert_eq!(sections[0].line_count(), 2 + 1 + coffee().sizes.len());
        assert!(sections[1].entries[0].is_single_line());
        assert_eq!(sections[1].line_count(), 3);
    }
}
