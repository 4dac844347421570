//! Domain model for the pizza builder: ingredient archetypes, base
//! parameters, the placed-topping component, and the serializable recipe
//! and feed records.

pub mod archetypes;
pub mod format;
pub mod params;
mod time;

use bevy::prelude::*;

pub use archetypes::{Archetype, ArchetypeRegistry, ShapeKind, Topping, builtin_archetypes};
pub use format::{FeedEntry, Recipe, ToppingRecord, UserRecord};
pub use params::{BaseParams, BaseSize, BaseType, CHEESE_MAX, CHEESE_MIN, CHEESE_STEP};
pub use time::{epoch_millis, utc_timestamp};

pub struct RecipePlugin;

impl Plugin for RecipePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Topping>()
            .register_type::<ShapeKind>()
            .register_type::<BaseType>()
            .register_type::<BaseSize>()
            .register_type::<BaseParams>()
            .init_resource::<BaseParams>()
            .insert_resource(ArchetypeRegistry::default());
    }
}
