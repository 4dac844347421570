use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::params::{BaseSize, BaseType};

/// One (archetype, position) pair inside a recipe, in placement order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToppingRecord {
    pub archetype_id: String,
    pub pos: Vec3,
}

/// Immutable snapshot of a finished pizza, ready for the feed or a
/// profile. Field names match the JSON documents on disk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub author: String,
    pub uid: String,
    pub base_type: BaseType,
    pub base_size: BaseSize,
    pub cheese_amount: u32,
    pub toppings: Vec<ToppingRecord>,
    pub created_at: String,
}

/// A published recipe: the recipe fields plus a millisecond-epoch id,
/// spread into one flat JSON object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: u64,
    #[serde(flatten)]
    pub recipe: Recipe,
}

/// Session identity as persisted in the users list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            author: "Ada".to_owned(),
            uid: "u-1".to_owned(),
            base_type: BaseType::Thick,
            base_size: BaseSize::Cm40,
            cheese_amount: 400,
            toppings: vec![
                ToppingRecord {
                    archetype_id: "pepperoni".to_owned(),
                    pos: Vec3::new(1.1, 0.09, 0.0),
                },
                ToppingRecord {
                    archetype_id: "basil".to_owned(),
                    pos: Vec3::new(-0.4, 0.09, 0.7),
                },
            ],
            created_at: "2026-08-23T12:00:00Z".to_owned(),
        }
    }

    #[test]
    fn recipe_round_trips_and_keeps_topping_order() {
        let recipe = sample_recipe();
        let text = serde_json::to_string(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&text).unwrap();
        assert_eq!(back, recipe);
        assert_eq!(back.toppings[0].archetype_id, "pepperoni");
        assert_eq!(back.toppings[1].archetype_id, "basil");
    }

    #[test]
    fn recipe_json_uses_camel_case_keys() {
        let text = serde_json::to_string(&sample_recipe()).unwrap();
        assert!(text.contains("\"baseType\":\"thick\""));
        assert!(text.contains("\"baseSize\":40"));
        assert!(text.contains("\"cheeseAmount\":400"));
        assert!(text.contains("\"createdAt\""));
        assert!(text.contains("\"uid\":\"u-1\""));
    }

    #[test]
    fn feed_entry_flattens_recipe_fields() {
        let entry = FeedEntry {
            id: 1_766_000_000_000,
            recipe: sample_recipe(),
        };
        let value: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 1_766_000_000_000u64);
        assert_eq!(value["author"], "Ada");
        assert!(value.get("recipe").is_none());
        let back: FeedEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
