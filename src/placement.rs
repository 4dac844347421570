//! Drop resolution: turning an armed palette payload into a placed topping.

use bevy::{
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility},
    prelude::*,
    ui::UiGlobalTransform,
};
use pizzaforge_geometry::{
    base_top_height, cylinder_mesh, disc_mesh, hemisphere_mesh, ray_plane_intersection,
    snap_to_rings, topping_rest_height, torus_mesh,
};
use pizzaforge_recipe::{Archetype, BaseParams, ShapeKind, Topping};

use crate::scene::{BaseSurface, SauceSurface, ToppingsRoot};
use crate::{BuilderInput, PointerBlocking, SnapToRings, cursor_over_ui};

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingDrop>()
            .add_systems(Update, resolve_pending_drop.in_set(BuilderInput));
    }
}

/// Archetype payload armed by pressing a palette row, consumed by the next
/// left release over the viewport.
#[derive(Resource, Default)]
pub struct PendingDrop {
    pub payload: Option<String>,
}

fn resolve_pending_drop(
    mut commands: Commands,
    mut ray_cast: MeshRayCast,
    mut pending: ResMut<PendingDrop>,
    buttons: Res<ButtonInput<MouseButton>>,
    snap: Res<SnapToRings>,
    params: Res<BaseParams>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    blockers: Query<(&ComputedNode, &UiGlobalTransform), With<PointerBlocking>>,
    sauce: Query<&Transform, With<SauceSurface>>,
    base: Query<(), With<BaseSurface>>,
    roots: Query<Entity, With<ToppingsRoot>>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    let Some(payload) = pending.payload.take() else {
        return;
    };
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
    let Ok(root) = roots.single() else {
        return;
    };

    let settings = MeshRayCastSettings::default().with_visibility(RayCastVisibility::Any);
    let hits = ray_cast.cast_ray(ray, &settings);
    let sauce_point = hits
        .iter()
        .find_map(|(entity, hit)| sauce.contains(*entity).then_some(hit.point));
    let base_point = hits
        .iter()
        .find_map(|(entity, hit)| base.contains(*entity).then_some(hit.point));
    let Some(point) = drop_point(&ray, sauce_point, base_point) else {
        return;
    };

    let sauce_top = sauce.single().ok().map(|t| t.translation.y);
    let base_top = (!base.is_empty()).then(|| base_top_height(params.height()));
    let rest = topping_rest_height(sauce_top, base_top);

    place_payload(
        &mut commands,
        &mut meshes,
        &mut materials,
        root,
        &payload,
        point,
        rest,
        params.radius(),
        snap.0,
    );
}

/// Sauce hits win over base hits; anything else falls through to the ground
/// plane so a drop over the viewport always lands somewhere.
fn drop_point(ray: &Ray3d, sauce_point: Option<Vec3>, base_point: Option<Vec3>) -> Option<Vec3> {
    sauce_point
        .or(base_point)
        .or_else(|| ray_plane_intersection(ray, Vec3::ZERO, Vec3::Y).map(|t| ray.get_point(t)))
}

/// Parse the armed payload and spawn its topping at the resolved point, ring
/// snap and surface projection applied. A malformed payload is logged and
/// spawns nothing.
fn place_payload(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    root: Entity,
    payload: &str,
    point: Vec3,
    rest: f32,
    radius: f32,
    snap: bool,
) {
    let archetype: Archetype = match serde_json::from_str(payload) {
        Ok(archetype) => archetype,
        Err(err) => {
            warn!("ignoring malformed ingredient payload: {err}");
            return;
        }
    };
    let snapped = snap_to_rings(Vec2::new(point.x, point.z), radius, snap);
    spawn_topping(
        commands,
        meshes,
        materials,
        root,
        &archetype,
        Vec3::new(snapped.x, rest, snapped.y),
    );
}

/// Spawn one topping under the toppings root. Shared by drop resolution and
/// recipe application.
pub fn spawn_topping(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    root: Entity,
    archetype: &Archetype,
    position: Vec3,
) {
    commands.spawn((
        Name::new(archetype.name.clone()),
        Topping {
            archetype_id: archetype.id.clone(),
        },
        Mesh3d(meshes.add(topping_mesh(archetype.shape))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: archetype.color(),
            perceptual_roughness: 0.75,
            ..default()
        })),
        Transform::from_translation(position),
        ChildOf(root),
    ));
}

fn topping_mesh(shape: ShapeKind) -> Mesh {
    match shape {
        ShapeKind::Cylinder => cylinder_mesh(0.24, 0.06, 16),
        ShapeKind::Mushroom => hemisphere_mesh(0.18, 12, 8),
        ShapeKind::Torus => torus_mesh(0.09, 0.035, 6, 12),
        ShapeKind::Leaf => disc_mesh(0.14, 8),
        ShapeKind::Cube => Cuboid::new(0.22, 0.06, 0.22).into(),
        ShapeKind::Sphere => Sphere::new(0.12).mesh().uv(8, 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::mesh::VertexAttributeValues;
    use pizzaforge_recipe::builtin_archetypes;

    fn vertex_count(mesh: &Mesh) -> usize {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => positions.len(),
            _ => 0,
        }
    }

    fn drop_world() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        let root = world.spawn(ToppingsRoot).id();
        (world, root)
    }

    #[test]
    fn every_shape_produces_geometry() {
        for shape in [
            ShapeKind::Cylinder,
            ShapeKind::Mushroom,
            ShapeKind::Torus,
            ShapeKind::Leaf,
            ShapeKind::Cube,
            ShapeKind::Sphere,
        ] {
            assert!(vertex_count(&topping_mesh(shape)) > 0, "{shape:?}");
        }
    }

    #[test]
    fn flat_shapes_stay_close_to_the_surface() {
        for shape in [ShapeKind::Torus, ShapeKind::Leaf] {
            let mesh = topping_mesh(shape);
            let Some(VertexAttributeValues::Float32x3(positions)) =
                mesh.attribute(Mesh::ATTRIBUTE_POSITION)
            else {
                panic!("missing positions for {shape:?}");
            };
            for p in positions {
                assert!(p[1].abs() < 0.1, "{shape:?} vertex y {}", p[1]);
            }
        }
    }

    #[test]
    fn ray_missing_every_surface_still_lands_one_topping() {
        let (mut world, root) = drop_world();

        let ray = Ray3d::new(Vec3::new(4.0, 3.0, -1.0), Dir3::NEG_Y);
        let point = drop_point(&ray, None, None).unwrap();
        assert!(point.y.abs() < 1e-6);

        let archetypes = builtin_archetypes();
        let payload = serde_json::to_string(&archetypes[0]).unwrap();
        let rest = topping_rest_height(None, None);
        world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<StandardMaterial>>| {
                    place_payload(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        root,
                        &payload,
                        point,
                        rest,
                        2.2,
                        false,
                    );
                },
            )
            .unwrap();

        let mut placed = world.query::<(&Topping, &Transform)>();
        let toppings: Vec<_> = placed.iter(&world).collect();
        assert_eq!(toppings.len(), 1);
        let (topping, transform) = toppings[0];
        assert_eq!(topping.archetype_id, archetypes[0].id);
        assert!((transform.translation.x - point.x).abs() < 1e-6);
        assert!((transform.translation.y - rest).abs() < 1e-6);
        assert!((transform.translation.z - point.z).abs() < 1e-6);
    }

    #[test]
    fn malformed_payload_places_nothing() {
        let (mut world, root) = drop_world();

        world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<StandardMaterial>>| {
                    place_payload(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        root,
                        "pepperoni, extra cheese",
                        Vec3::new(0.4, 0.0, 0.4),
                        0.09,
                        2.2,
                        true,
                    );
                },
            )
            .unwrap();

        let mut toppings = world.query::<&Topping>();
        assert_eq!(toppings.iter(&world).count(), 0);
    }
}
