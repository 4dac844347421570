//! Parametric pizza geometry: the revolved crust solid, sauce and table
//! discs, topping shapes, cheese scatter sampling, and the pure placement
//! math (ring snapping, surface height, ray-plane intersection).
//!
//! Everything here is plain functions over `bevy::math` types. No ECS
//! access, no asset handles; callers own material and entity wiring.

pub mod meshes;
pub mod ray;
pub mod scatter;
pub mod snap;
pub mod surface;

pub use meshes::{
    base_mesh, base_top_height, crust_profile, cylinder_mesh, disc_mesh, hemisphere_mesh, revolve,
    torus_mesh,
};
pub use ray::ray_plane_intersection;
pub use scatter::{CheeseBlob, scatter_cheese};
pub use snap::snap_to_rings;
pub use surface::topping_rest_height;

pub const EPSILON: f32 = 1e-4;
