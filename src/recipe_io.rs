//! Capturing the live build as a recipe document and applying stored
//! documents back onto the scene.

use bevy::prelude::*;
use pizzaforge_geometry::{base_top_height, topping_rest_height};
use pizzaforge_recipe::{
    ArchetypeRegistry, BaseParams, CHEESE_MAX, CHEESE_MIN, FeedEntry, Recipe, Topping,
    ToppingRecord, epoch_millis, utc_timestamp,
};

use crate::Store;
use crate::collections::{CollectionViewState, RecipeCollection};
use crate::placement::spawn_topping;
use crate::scene::{SAUCE_OFFSET, ToppingsRoot};
use crate::session::Session;

pub struct RecipeIoPlugin;

impl Plugin for RecipeIoPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_publish)
            .add_observer(on_save_to_profile)
            .add_observer(on_clear_toppings)
            .add_observer(on_apply_recipe);
    }
}

#[derive(Event)]
pub struct PublishRecipe;

#[derive(Event)]
pub struct SaveRecipeToProfile;

#[derive(Event)]
pub struct ClearToppings;

/// Replaces the current build with a stored recipe.
#[derive(Event)]
pub struct ApplyRecipe(pub Recipe);

/// Snapshot of the live build. Toppings come out in placement order.
fn capture_recipe(
    session: &Session,
    params: &BaseParams,
    roots: &Query<&Children, With<ToppingsRoot>>,
    toppings: &Query<(&Topping, &Transform)>,
) -> Recipe {
    let mut records = Vec::new();
    if let Ok(children) = roots.single() {
        for child in children.iter() {
            if let Ok((topping, transform)) = toppings.get(child) {
                records.push(ToppingRecord {
                    archetype_id: topping.archetype_id.clone(),
                    pos: transform.translation,
                });
            }
        }
    }
    Recipe {
        author: session.display_name.clone(),
        uid: session.uid.clone(),
        base_type: params.base_type,
        base_size: params.base_size,
        cheese_amount: params.cheese_amount,
        toppings: records,
        created_at: utc_timestamp(),
    }
}

fn on_publish(
    _: On<PublishRecipe>,
    store: Res<Store>,
    session: Res<Session>,
    params: Res<BaseParams>,
    mut view: ResMut<CollectionViewState>,
    roots: Query<&Children, With<ToppingsRoot>>,
    toppings: Query<(&Topping, &Transform)>,
) {
    let recipe = capture_recipe(&session, &params, &roots, &toppings);
    let entry = FeedEntry {
        id: epoch_millis(),
        recipe,
    };
    match store.prepend_feed(entry) {
        Ok(()) => {
            info!("published recipe to the feed");
            // A fresh publish shows up in the feed and in the author's
            // own-entries view.
            if matches!(
                view.active,
                Some(RecipeCollection::Feed | RecipeCollection::Mine)
            ) {
                view.needs_rebuild = true;
            }
        }
        Err(err) => error!("failed to publish recipe: {err}"),
    }
}

fn on_save_to_profile(
    _: On<SaveRecipeToProfile>,
    store: Res<Store>,
    session: Res<Session>,
    params: Res<BaseParams>,
    roots: Query<&Children, With<ToppingsRoot>>,
    toppings: Query<(&Topping, &Transform)>,
) {
    let recipe = capture_recipe(&session, &params, &roots, &toppings);
    let entry = FeedEntry {
        id: epoch_millis(),
        recipe,
    };
    match store.prepend_recipe(&session.uid, entry) {
        Ok(()) => info!("saved recipe to profile"),
        Err(err) => error!("failed to save recipe: {err}"),
    }
}

fn on_clear_toppings(
    _: On<ClearToppings>,
    mut commands: Commands,
    roots: Query<&Children, With<ToppingsRoot>>,
    toppings: Query<(), With<Topping>>,
) {
    let Ok(children) = roots.single() else {
        return;
    };
    for child in children.iter() {
        if toppings.contains(child) {
            commands.entity(child).despawn();
        }
    }
}

/// Rebuilds the scene from a stored recipe: base parameters first, then the
/// topping set. Stored positions keep their horizontal placement while the
/// height is re-projected onto the rebuilt surface. Records whose archetype
/// is no longer registered are skipped with a warning instead of failing the
/// whole load.
fn on_apply_recipe(
    event: On<ApplyRecipe>,
    mut commands: Commands,
    mut params: ResMut<BaseParams>,
    registry: Res<ArchetypeRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    roots: Query<(Entity, Option<&Children>), With<ToppingsRoot>>,
    toppings: Query<(), With<Topping>>,
) {
    let Ok((root, children)) = roots.single() else {
        return;
    };
    if let Some(children) = children {
        for child in children.iter() {
            if toppings.contains(child) {
                commands.entity(child).despawn();
            }
        }
    }

    let recipe = &event.0;
    let next = BaseParams {
        base_type: recipe.base_type,
        base_size: recipe.base_size,
        cheese_amount: recipe.cheese_amount.clamp(CHEESE_MIN, CHEESE_MAX),
    };

    let sauce_top = next.height() - SAUCE_OFFSET;
    let rest = topping_rest_height(Some(sauce_top), Some(base_top_height(next.height())));

    if *params != next {
        *params = next;
    }

    for record in &recipe.toppings {
        let Some(archetype) = registry.get(&record.archetype_id) else {
            warn!("skipping unknown archetype {:?}", record.archetype_id);
            continue;
        };
        spawn_topping(
            &mut commands,
            &mut meshes,
            &mut materials,
            root,
            archetype,
            Vec3::new(record.pos.x, rest, record.pos.z),
        );
    }
}
