//! Pointer pick-up and drag of placed toppings, and the camera suppression
//! that keeps orbiting from fighting an active drag.

use bevy::{
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility},
    prelude::*,
    ui::UiGlobalTransform,
};
use pizzaforge_camera::OrbitCamera;
use pizzaforge_geometry::{
    base_top_height, ray_plane_intersection, snap_to_rings, topping_rest_height,
};
use pizzaforge_recipe::{BaseParams, Topping};

use crate::collections::CollectionViewState;
use crate::scene::{BaseSurface, SauceSurface};
use crate::selection::Selection;
use crate::{BuilderInput, PointerBlocking, SnapToRings, cursor_over_ui};

/// Scale feedback applied to a topping while it is held.
pub const PICKUP_SCALE: f32 = 1.15;

pub struct DraggingPlugin;

impl Plugin for DraggingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>().add_systems(
            Update,
            (begin_drag, update_drag, end_drag, update_camera_suppression)
                .chain()
                .in_set(BuilderInput),
        );
    }
}

/// Pointer drag bookkeeping. `offset` keeps the grab point stable under the
/// cursor instead of snapping the topping center to it.
#[derive(Resource, Default)]
pub struct DragState {
    pub active: bool,
    pub offset: Vec3,
    pub original_scale: Option<Vec3>,
}

fn begin_drag(
    mut commands: Commands,
    mut ray_cast: MeshRayCast,
    mut drag: ResMut<DragState>,
    mut selection: ResMut<Selection>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    blockers: Query<(&ComputedNode, &UiGlobalTransform), With<PointerBlocking>>,
    mut toppings: Query<&mut Transform, With<Topping>>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if cursor_over_ui(cursor, &blockers) {
        return;
    }
    let Ok((camera, cam_tf)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_tf, cursor) else {
        return;
    };

    let settings = MeshRayCastSettings::default().with_visibility(RayCastVisibility::Any);
    let hit = ray_cast
        .cast_ray(ray, &settings)
        .iter()
        .find(|(entity, _)| toppings.contains(*entity))
        .map(|(entity, hit)| (*entity, hit.point));

    match hit {
        Some((entity, point)) => {
            if let Ok(mut transform) = toppings.get_mut(entity) {
                drag.offset = transform.translation - point;
                drag.original_scale = Some(transform.scale);
                transform.scale *= PICKUP_SCALE;
                drag.active = true;
                selection.select(&mut commands, entity);
            }
        }
        None => {
            // Empty click: undo any stale pick-up scale and deselect.
            if let Some(entity) = selection.entity
                && let Some(original) = drag.original_scale.take()
                && let Ok(mut transform) = toppings.get_mut(entity)
            {
                transform.scale = original;
            }
            selection.clear(&mut commands);
            drag.active = false;
        }
    }
}

fn update_drag(
    drag: Res<DragState>,
    selection: Res<Selection>,
    snap: Res<SnapToRings>,
    params: Res<BaseParams>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    sauce: Query<&Transform, (With<SauceSurface>, Without<Topping>)>,
    base: Query<(), With<BaseSurface>>,
    mut toppings: Query<&mut Transform, With<Topping>>,
) {
    if !drag.active {
        return;
    }
    let Some(entity) = selection.entity else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_tf, cursor) else {
        return;
    };
    let Some(distance) = ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Y) else {
        return;
    };

    let target = ray.get_point(distance) + drag.offset;
    let snapped = snap_to_rings(Vec2::new(target.x, target.z), params.radius(), snap.0);
    let sauce_top = sauce.single().ok().map(|tf| tf.translation.y);
    let base_top = (!base.is_empty()).then(|| base_top_height(params.height()));
    let rest = topping_rest_height(sauce_top, base_top);

    if let Ok(mut transform) = toppings.get_mut(entity) {
        transform.translation = Vec3::new(snapped.x, rest, snapped.y);
    }
}

fn end_drag(
    mut drag: ResMut<DragState>,
    selection: Res<Selection>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut toppings: Query<&mut Transform, With<Topping>>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    drag.active = false;
    if let Some(original) = drag.original_scale.take()
        && let Some(entity) = selection.entity
        && let Ok(mut transform) = toppings.get_mut(entity)
    {
        transform.scale = original;
    }
}

/// The orbit camera yields to topping drags, presses that began over UI, and
/// the collection overlay. Drags that began in the viewport keep the camera
/// live even when the cursor sweeps across a panel.
fn update_camera_suppression(
    drag: Res<DragState>,
    buttons: Res<ButtonInput<MouseButton>>,
    view: Res<CollectionViewState>,
    windows: Query<&Window>,
    blockers: Query<(&ComputedNode, &UiGlobalTransform), With<PointerBlocking>>,
    mut cameras: Query<&mut OrbitCamera>,
    mut press_over_ui: Local<bool>,
) {
    let over_ui_now = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .is_some_and(|cursor| cursor_over_ui(cursor, &blockers));
    if buttons.just_pressed(MouseButton::Left) || buttons.just_pressed(MouseButton::Right) {
        *press_over_ui = over_ui_now;
    }
    let pointer_blocked = if buttons.pressed(MouseButton::Left) || buttons.pressed(MouseButton::Right)
    {
        *press_over_ui
    } else {
        over_ui_now
    };

    let enabled = !(drag.active || pointer_blocked || view.active.is_some());
    for mut orbit in &mut cameras {
        if orbit.enabled != enabled {
            orbit.enabled = enabled;
        }
    }
}
