pub mod collections;
pub mod dragging;
pub mod palette;
pub mod placement;
pub mod recipe_io;
pub mod scene;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod status_bar;
pub mod theme;

use bevy::{prelude::*, ui::UiGlobalTransform};
use pizzaforge_camera::{OrbitCameraPlugin, OrbitCameraSet};
use pizzaforge_recipe::RecipePlugin;
use pizzaforge_store::RecipeStore;

pub struct BuilderPlugin;

/// Systems that handle pointer and keyboard interaction in the viewport.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuilderInput;

/// Systems that react to panel buttons and collection actions.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuilderActions;

/// Systems that destroy and recreate scene content after parameter changes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuilderRebuild;

impl Plugin for BuilderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RecipePlugin,
            OrbitCameraPlugin,
            scene::ScenePlugin,
            selection::SelectionPlugin,
            placement::PlacementPlugin,
            dragging::DraggingPlugin,
            palette::PalettePlugin,
            collections::CollectionsPlugin,
            recipe_io::RecipeIoPlugin,
            session::SessionPlugin,
            snapshot::SnapshotPlugin,
            status_bar::StatusBarPlugin,
        ))
        .insert_resource(Store(RecipeStore::new()))
        .init_resource::<SnapToRings>()
        // Rebuild must observe entities the action phase spawned this frame.
        .configure_sets(
            Update,
            (BuilderInput, BuilderActions, BuilderRebuild).chain(),
        )
        // The camera must see drag claims from the same frame.
        .configure_sets(Update, OrbitCameraSet.after(BuilderInput));
    }
}

/// App handle to the on-disk recipe store.
#[derive(Resource, Deref)]
pub struct Store(pub RecipeStore);

/// Whether drops and drags pull toward the concentric guide rings.
#[derive(Resource)]
pub struct SnapToRings(pub bool);

impl Default for SnapToRings {
    fn default() -> Self {
        Self(true)
    }
}

/// Marker for UI regions that swallow pointer input before it reaches the
/// 3D scene (the side panel, the status bar, the collection overlay).
#[derive(Component)]
pub struct PointerBlocking;

/// True when the cursor sits inside any blocking UI region.
pub fn cursor_over_ui(
    cursor: Vec2,
    blockers: &Query<(&ComputedNode, &UiGlobalTransform), With<PointerBlocking>>,
) -> bool {
    for (computed, tf) in blockers {
        let scale = computed.inverse_scale_factor();
        let pos = tf.translation * scale;
        let size = computed.size() * scale;
        let top_left = pos - size / 2.0;
        let local = cursor - top_left;
        if local.x >= 0.0 && local.y >= 0.0 && local.x <= size.x && local.y <= size.y {
            return true;
        }
    }
    false
}
