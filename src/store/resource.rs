use fake::Dummy;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Label used for the synthetic size of single-sized items.
///
pub const DEFAULT_SIZE: &str = "Default";

/// Defines one purchasable size/option of an item.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub stocks: i64,
}

/// Defines the item record as persisted under `items/<key>`.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_single_sized: bool,
    #[serde(default, deserialize_with = "sizes_from_array_or_map")]
    pub sizes: Vec<Variant>,
}

/// Sparse arrays come back from the database as objects keyed by index.
///
fn sizes_from_array_or_map<'de, D>(deserializer: D) -> Result<Vec<Variant>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sizes {
        List(Vec<Option<Variant>>),
        Keyed(BTreeMap<String, Variant>),
        Missing(()),
    }

    Ok(match Sizes::deserialize(deserializer)? {
        Sizes::List(list) => list.into_iter().flatten().collect(),
        Sizes::Keyed(map) => {
            let mut entries: Vec<(usize, Variant)> = map
                .into_iter()
                .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v)))
                .collect();
            entries.sort_by_key(|(i, _)| *i);
            entries.into_iter().map(|(_, v)| v).collect()
        }
        Sizes::Missing(()) => vec![],
    })
}

/// Convert the snapshot stored at `items` into keyed records, skipping entries
/// that do not look like items.
///
pub fn items_from_snapshot(snapshot: &Value) -> BTreeMap<String, StoredItem> {
    let mut items = BTreeMap::new();
    if let Value::Object(map) = snapshot {
        for (key, value) in map {
            match serde_json::from_value::<StoredItem>(value.clone()) {
                Ok(item) => {
                    items.insert(key.to_owned(), item);
                }
                Err(e) => log::warn!("Skipping malformed item '{}': {}", key, e),
            }
        }
    }
    items
}

/// Return the labels held by a vocabulary node such as `categories` or
/// `sizes`, which may be stored as an array or as an object.
///
pub fn labels_from_value(value: &Value) -> Vec<String> {
    let values: Vec<&Value> = match value {
        Value::Array(list) => list.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => vec![],
    };
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.to_owned()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}
