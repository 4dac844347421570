//! Saving a PNG of the current build.

use bevy::prelude::*;
use bevy::render::view::window::screenshot::{Screenshot, save_to_disk};
use pizzaforge_recipe::epoch_millis;

pub struct SnapshotPlugin;

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_take_snapshot);
    }
}

#[derive(Event)]
pub struct TakeSnapshot;

/// Captures the primary window, UI included, into `pizza-<millis>.png` in
/// the working directory.
fn on_take_snapshot(_: On<TakeSnapshot>, mut commands: Commands) {
    let path = format!("pizza-{}.png", epoch_millis());
    info!("saving snapshot to {path}");
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}
