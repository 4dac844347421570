//! Topping selection state and keyboard deletion.

use bevy::prelude::*;
use pizzaforge_recipe::Topping;

use crate::BuilderInput;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .add_systems(Update, delete_selected_topping.in_set(BuilderInput))
            .add_observer(on_selected_removed);
    }
}

/// Marker component placed on the selected topping entity.
#[derive(Component)]
pub struct Selected;

/// At most one topping is selected at a time.
#[derive(Resource, Default)]
pub struct Selection {
    pub entity: Option<Entity>,
}

impl Selection {
    pub fn select(&mut self, commands: &mut Commands, entity: Entity) {
        if self.entity == Some(entity) {
            return;
        }
        if let Some(previous) = self.entity.take()
            && let Ok(mut ec) = commands.get_entity(previous)
        {
            ec.remove::<Selected>();
        }
        self.entity = Some(entity);
        commands.entity(entity).insert(Selected);
    }

    pub fn clear(&mut self, commands: &mut Commands) {
        if let Some(previous) = self.entity.take()
            && let Ok(mut ec) = commands.get_entity(previous)
        {
            ec.remove::<Selected>();
        }
    }
}

fn delete_selected_topping(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<Selection>,
    toppings: Query<(), With<Topping>>,
) {
    if !keys.just_pressed(KeyCode::Delete) && !keys.just_pressed(KeyCode::Backspace) {
        return;
    }
    let Some(entity) = selection.entity else {
        return;
    };
    if toppings.contains(entity) {
        commands.entity(entity).despawn();
    }
    selection.clear(&mut commands);
}

/// Keeps the resource honest when a selected topping despawns through any
/// path other than `Selection::clear` (remove-all, recipe load).
fn on_selected_removed(trigger: On<Remove, Selected>, mut selection: ResMut<Selection>) {
    if selection.entity == Some(trigger.event_target()) {
        selection.entity = None;
    }
}
