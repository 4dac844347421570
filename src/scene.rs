//! Scene lifecycle: camera, lighting rig, table, and the rebuildable
//! base/sauce/cheese content.
//!
//! The dough, sauce disc, and cheese blobs are derived from [`BaseParams`]
//! and rebuilt whenever it changes; placed toppings survive rebuilds and are
//! only re-projected onto the new surface height.

use bevy::prelude::*;
use pizzaforge_camera::OrbitCamera;
use pizzaforge_geometry::{
    CheeseBlob, base_mesh, base_top_height, disc_mesh, scatter_cheese, topping_rest_height,
};
use pizzaforge_recipe::{BaseParams, BaseSize, BaseType, Topping};

use crate::BuilderRebuild;

pub const TABLE_RADIUS: f32 = 2.8;
pub const TABLE_SEGMENTS: u32 = 64;

/// Sauce disc radius as a fraction of the base radius.
pub const SAUCE_RADIUS_RATIO: f32 = 0.95;
pub const SAUCE_SEGMENTS: u32 = 64;

/// The sauce disc sits this far below the nominal base height.
pub const SAUCE_OFFSET: f32 = 0.01;

/// Cheese blobs sink this far below the nominal base height.
pub const CHEESE_DEPTH: f32 = 0.02;

/// Presentation spin of the dough, radians per second.
pub const BASE_TURN_RATE: f32 = 0.006;

/// 0xfff2a1 before per-blob jitter.
pub const CHEESE_COLOR: Color = Color::srgb(1.0, 0.949, 0.631);

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.133, 0.133, 0.133)))
            .add_systems(Startup, setup_scene)
            .add_systems(Update, rotate_base)
            .add_systems(
                Update,
                (rebuild_base_and_sauce, regenerate_cheese, reposition_toppings)
                    .chain()
                    .in_set(BuilderRebuild),
            );
    }
}

/// The dough mesh. Its mesh asset is replaced when base parameters change.
#[derive(Component)]
pub struct BaseSurface;

/// The sauce disc covering the dough center.
#[derive(Component)]
pub struct SauceSurface;

/// Parent of the decorative cheese blobs.
#[derive(Component)]
pub struct CheeseLayer;

/// Parent of all placed toppings.
#[derive(Component)]
pub struct ToppingsRoot;

/// Handles shared across rebuilds. Blob spheres reuse one unit mesh and get
/// their size from the transform scale.
#[derive(Resource)]
pub struct SceneAssets {
    pub dough_material: Handle<StandardMaterial>,
    pub sauce_material: Handle<StandardMaterial>,
    pub blob_mesh: Handle<Mesh>,
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        Name::new("Key Light"),
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 5.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("Warm Light"),
        PointLight {
            color: Color::srgb_u8(0xff, 0xf2, 0xcc),
            intensity: 1_500_000.0,
            range: 15.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 6.0, 3.0),
    ));
    commands.spawn((
        Name::new("Fill Light"),
        DirectionalLight {
            color: Color::srgb_u8(0xff, 0xee, 0xdd),
            illuminance: 2_500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-3.0, 4.0, -2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let orbit = OrbitCamera::default();
    let camera_transform = orbit.transform();
    commands.spawn((
        Name::new("Builder Camera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 50.0_f32.to_radians(),
            ..default()
        }),
        orbit,
        camera_transform,
    ));

    commands.spawn((
        Name::new("Table"),
        Mesh3d(meshes.add(disc_mesh(TABLE_RADIUS, TABLE_SEGMENTS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0xe3, 0xdf, 0xd7).with_alpha(0.5),
            perceptual_roughness: 0.9,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
    ));

    // The crust profile is an open ribbon, so both faces must render.
    let dough_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xf5, 0xde, 0xb3),
        perceptual_roughness: 0.8,
        metallic: 0.0,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let sauce_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xc2, 0x3b, 0x22),
        perceptual_roughness: 0.6,
        metallic: 0.1,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let blob_mesh = meshes.add(Sphere::new(1.0).mesh().uv(8, 8));

    // Meshes for the dough and sauce arrive on the first rebuild pass, which
    // treats the freshly added params resource as changed.
    commands.spawn((
        Name::new("Dough"),
        BaseSurface,
        MeshMaterial3d(dough_material.clone()),
        Transform::IDENTITY,
        Visibility::default(),
    ));
    commands.spawn((
        Name::new("Sauce"),
        SauceSurface,
        MeshMaterial3d(sauce_material.clone()),
        Transform::IDENTITY,
        Visibility::default(),
    ));
    commands.spawn((
        Name::new("Cheese"),
        CheeseLayer,
        Transform::IDENTITY,
        Visibility::default(),
    ));
    commands.spawn((
        Name::new("Toppings"),
        ToppingsRoot,
        Transform::IDENTITY,
        Visibility::default(),
    ));

    commands.insert_resource(SceneAssets {
        dough_material,
        sauce_material,
        blob_mesh,
    });
}

fn rotate_base(time: Res<Time>, mut base: Query<&mut Transform, With<BaseSurface>>) {
    for mut transform in &mut base {
        transform.rotate_y(BASE_TURN_RATE * time.delta_secs());
    }
}

/// Swap the dough and sauce meshes for freshly generated ones and drop the
/// old assets. Runs on the first frame and when the base type or size
/// changes; a cheese-only step leaves both meshes in place.
fn rebuild_base_and_sauce(
    mut commands: Commands,
    params: Res<BaseParams>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut built_dims: Local<Option<(BaseType, BaseSize)>>,
    base: Query<(Entity, Option<&Mesh3d>), With<BaseSurface>>,
    mut sauce: Query<(Entity, Option<&Mesh3d>, &mut Transform), With<SauceSurface>>,
) {
    if !params.is_changed() {
        return;
    }
    let dims = (params.base_type, params.base_size);
    if *built_dims == Some(dims) {
        return;
    }
    let Ok((base_entity, old_base)) = base.single() else {
        return;
    };
    let Ok((sauce_entity, old_sauce, mut sauce_transform)) = sauce.single_mut() else {
        return;
    };
    *built_dims = Some(dims);

    if let Some(old) = old_base {
        meshes.remove(&old.0);
    }
    commands
        .entity(base_entity)
        .insert(Mesh3d(meshes.add(base_mesh(params.radius(), params.height()))));

    if let Some(old) = old_sauce {
        meshes.remove(&old.0);
    }
    commands.entity(sauce_entity).insert(Mesh3d(
        meshes.add(disc_mesh(params.radius() * SAUCE_RADIUS_RATIO, SAUCE_SEGMENTS)),
    ));
    sauce_transform.translation.y = params.height() - SAUCE_OFFSET;
}

/// Despawn and rescatter the whole cheese layer. Blobs are decorative and
/// never persisted, so wholesale regeneration is fine.
fn regenerate_cheese(
    mut commands: Commands,
    params: Res<BaseParams>,
    assets: Res<SceneAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layer: Query<(Entity, Option<&Children>), With<CheeseLayer>>,
    blob_materials: Query<&MeshMaterial3d<StandardMaterial>>,
) {
    if !params.is_changed() {
        return;
    }
    let Ok((layer_entity, children)) = layer.single() else {
        return;
    };

    if let Some(children) = children {
        for child in children.iter() {
            if let Ok(material) = blob_materials.get(child) {
                materials.remove(&material.0);
            }
            commands.entity(child).despawn();
        }
    }

    let cheese_y = params.height() - CHEESE_DEPTH;
    let base_hsla = Hsla::from(CHEESE_COLOR);
    let mut rng = rand::rng();
    let blobs = scatter_cheese(params.radius(), params.cheese_amount as usize, &mut rng);
    commands.entity(layer_entity).with_children(|parent| {
        for blob in &blobs {
            parent.spawn((
                Mesh3d(assets.blob_mesh.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: blob_color(base_hsla, blob),
                    perceptual_roughness: 0.8,
                    metallic: 0.05,
                    ..default()
                })),
                Transform {
                    translation: Vec3::new(blob.offset.x, cheese_y, blob.offset.y),
                    scale: blob.scale * blob.radius,
                    ..default()
                },
            ));
        }
    });
}

/// Re-project every placed topping onto the rebuilt surface. Plan position
/// and archetype stay untouched.
fn reposition_toppings(
    params: Res<BaseParams>,
    sauce: Query<&Transform, (With<SauceSurface>, Without<Topping>)>,
    mut toppings: Query<&mut Transform, With<Topping>>,
) {
    if !params.is_changed() {
        return;
    }
    let sauce_top = sauce.single().ok().map(|t| t.translation.y);
    let base_top = Some(base_top_height(params.height()));
    let rest = topping_rest_height(sauce_top, base_top);
    for mut transform in &mut toppings {
        transform.translation.y = rest;
    }
}

/// Cheese color with one blob's hue and saturation jitter applied.
fn blob_color(base: Hsla, blob: &CheeseBlob) -> Color {
    Hsla {
        hue: (base.hue + blob.hue_shift * 360.0).rem_euclid(360.0),
        saturation: (base.saturation + blob.saturation_shift).clamp(0.0, 1.0),
        ..base
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use pizzaforge_recipe::CHEESE_STEP;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn builder_world() -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.insert_resource(BaseParams::default());
        world.spawn((BaseSurface, Transform::IDENTITY));
        world.spawn((SauceSurface, Transform::IDENTITY));
        world
    }

    #[test]
    fn blob_color_wraps_hue_and_clamps_saturation() {
        let base = Hsla::new(350.0, 0.95, 0.8, 1.0);
        let blob = CheeseBlob {
            radius: 0.12,
            scale: Vec3::ONE,
            hue_shift: 0.05,
            saturation_shift: 0.1,
            offset: Vec2::ZERO,
        };
        let jittered = Hsla::from(blob_color(base, &blob));
        assert!((jittered.hue - 8.0).abs() < 1e-3);
        assert!((jittered.saturation - 1.0).abs() < 1e-6);
    }

    #[test]
    fn blob_color_without_jitter_is_the_base_color() {
        let base = Hsla::from(CHEESE_COLOR);
        let blob = CheeseBlob {
            radius: 0.12,
            scale: Vec3::ONE,
            hue_shift: 0.0,
            saturation_shift: 0.0,
            offset: Vec2::ZERO,
        };
        assert_eq!(blob_color(base, &blob), Color::from(base));
    }

    #[test]
    fn toppings_rest_just_above_the_sauce() {
        let params = BaseParams::default();
        let sauce_top = params.height() - SAUCE_OFFSET;
        let rest = topping_rest_height(Some(sauce_top), Some(base_top_height(params.height())));
        assert!((rest - (params.height() + 0.01)).abs() < 1e-6);
    }

    #[test]
    fn scatter_stays_inside_the_sauce_disc() {
        let params = BaseParams::default();
        let mut rng = StdRng::seed_from_u64(9);
        for blob in scatter_cheese(params.radius(), 64, &mut rng) {
            assert!(blob.offset.length() < params.radius() * SAUCE_RADIUS_RATIO);
        }
    }

    #[test]
    fn base_change_reprojects_toppings_in_place() {
        let mut world = builder_world();
        let olive = world
            .spawn((
                Topping {
                    archetype_id: "olive".into(),
                },
                Transform::from_xyz(0.8, 0.0, -0.4),
            ))
            .id();

        world.run_system_once(rebuild_base_and_sauce).unwrap();
        world.run_system_once(reposition_toppings).unwrap();
        let before = world.get::<Transform>(olive).unwrap().translation;

        world.resource_mut::<BaseParams>().base_type = BaseType::Thick;
        world.run_system_once(rebuild_base_and_sauce).unwrap();
        world.run_system_once(reposition_toppings).unwrap();

        let height = world.resource::<BaseParams>().height();
        let expected =
            topping_rest_height(Some(height - SAUCE_OFFSET), Some(base_top_height(height)));
        let after = world.get::<Transform>(olive).unwrap().translation;
        assert!((after.y - expected).abs() < 1e-6);
        assert!(after.y > before.y);
        assert_eq!(after.x, before.x);
        assert_eq!(after.z, before.z);
        assert_eq!(world.get::<Topping>(olive).unwrap().archetype_id, "olive");
    }

    #[test]
    fn cheese_only_change_keeps_the_dough_mesh() {
        let mut world = builder_world();
        let rebuild = world.register_system(rebuild_base_and_sauce);
        let mut dough = world.query_filtered::<&Mesh3d, With<BaseSurface>>();

        world.run_system(rebuild).unwrap();
        let first = dough.single(&world).unwrap().0.clone();

        world.resource_mut::<BaseParams>().cheese_amount += CHEESE_STEP;
        world.run_system(rebuild).unwrap();
        let second = dough.single(&world).unwrap().0.clone();
        assert_eq!(first, second);

        world.resource_mut::<BaseParams>().base_size = BaseSize::Cm40;
        world.run_system(rebuild).unwrap();
        let third = dough.single(&world).unwrap().0.clone();
        assert_ne!(second, third);
    }
}
