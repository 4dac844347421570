use bevy::{
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Revolution segments for the dough solid.
pub const BASE_SEGMENTS: u32 = 128;

// ---------------------------------------------------------------------------
// Crust profile
// ---------------------------------------------------------------------------

/// Hand-authored 2D cross-section of the dough, in (radial, vertical)
/// coordinates. Starts and ends at the inner radius on the midline: a lower
/// arc that sweeps outward while dipping below, then an upper arc sweeping
/// outward again while bulging above. Revolving it yields the crust ring;
/// the open center is covered by the sauce disc.
pub fn crust_profile(radius: f32, height: f32) -> Vec<Vec2> {
    let inner_radius = radius * 0.9;
    let crust_thickness = height * 2.2;
    let crust_depth = radius * 0.15;

    let mut points = Vec::with_capacity(52);
    points.push(Vec2::new(inner_radius, 0.0));
    for i in 0..=16 {
        let t = i as f32 / 16.0;
        let r = inner_radius + (t * FRAC_PI_2).sin() * crust_depth;
        let y = -(t * PI).sin() * crust_thickness * 0.4;
        points.push(Vec2::new(r, y));
    }
    for i in 0..=32 {
        let t = i as f32 / 32.0;
        let r = inner_radius + (t * FRAC_PI_2).sin() * crust_depth;
        let y = (t * PI).sin() * crust_thickness * 0.5;
        points.push(Vec2::new(r, y));
    }
    points.push(Vec2::new(inner_radius, 0.0));
    points
}

/// World-space height of the crust's topmost extent once the mesh has been
/// shifted to rest on y = 0.
pub fn base_top_height(height: f32) -> f32 {
    let profile = crust_profile(1.0, height);
    let min = profile.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    let max = profile.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    max - min
}

/// Dough mesh for the given dimensions, resting on y = 0. Rendered
/// double-sided: the profile traces both arcs outward, so strip winding is
/// not consistent front-to-back.
pub fn base_mesh(radius: f32, height: f32) -> Mesh {
    let mut profile = crust_profile(radius, height);
    let min = profile.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    for p in &mut profile {
        p.y -= min;
    }
    revolve(&profile, BASE_SEGMENTS)
}

// ---------------------------------------------------------------------------
// Revolution mesher
// ---------------------------------------------------------------------------

/// Revolve a 2D profile (x = radial distance, y = height) around +Y.
/// Vertices are laid out column-major per segment and welded across the
/// seam; normals are accumulated from face normals and normalized.
pub fn revolve(profile: &[Vec2], segments: u32) -> Mesh {
    let rings = profile.len();
    let segs = segments as usize;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(rings * segs);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(rings * segs);
    for s in 0..segs {
        let theta = s as f32 / segs as f32 * TAU;
        let (sin_t, cos_t) = theta.sin_cos();
        for (i, p) in profile.iter().enumerate() {
            positions.push([p.x * cos_t, p.y, p.x * sin_t]);
            uvs.push([s as f32 / segs as f32, i as f32 / (rings - 1) as f32]);
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity((rings - 1) * segs * 6);
    for s in 0..segs {
        let s2 = (s + 1) % segs;
        for i in 0..rings - 1 {
            let a = (s * rings + i) as u32;
            let b = a + 1;
            let c = (s2 * rings + i) as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    let normals = accumulated_normals(&positions, &indices);

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Smooth per-vertex normals: sum unnormalized face normals (area-weighted)
/// into each corner, then normalize. Degenerate triangles contribute
/// nothing.
fn accumulated_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let pa = Vec3::from_array(positions[a]);
        let pb = Vec3::from_array(positions[b]);
        let pc = Vec3::from_array(positions[c]);
        let face = (pb - pa).cross(pc - pa);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.normalize_or(Vec3::Y).to_array())
        .collect()
}

// ---------------------------------------------------------------------------
// Flat and revolved shapes
// ---------------------------------------------------------------------------

/// Filled circle in the XZ plane facing +Y. Used for the sauce layer, the
/// table surface, and the basil leaf.
pub fn disc_mesh(radius: f32, segments: u32) -> Mesh {
    let segs = segments as usize;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(segs + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(segs + 1);
    positions.push([0.0, 0.0, 0.0]);
    uvs.push([0.5, 0.5]);
    for s in 0..segs {
        let theta = s as f32 / segs as f32 * TAU;
        let (sin_t, cos_t) = theta.sin_cos();
        positions.push([radius * cos_t, 0.0, radius * sin_t]);
        uvs.push([0.5 + cos_t * 0.5, 0.5 + sin_t * 0.5]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(segs * 3);
    for s in 0..segs {
        let cur = 1 + s as u32;
        let next = 1 + ((s + 1) % segs) as u32;
        indices.extend_from_slice(&[0, next, cur]);
    }

    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Closed cylinder centered on the origin, axis +Y.
pub fn cylinder_mesh(radius: f32, height: f32, segments: u32) -> Mesh {
    let half = height * 0.5;
    let profile = [
        Vec2::new(0.0, -half),
        Vec2::new(radius, -half),
        Vec2::new(radius, half),
        Vec2::new(0.0, half),
    ];
    revolve(&profile, segments)
}

/// Upper half-sphere with an open bottom, resting on the origin plane.
pub fn hemisphere_mesh(radius: f32, segments: u32, rings: u32) -> Mesh {
    let profile: Vec<Vec2> = (0..=rings)
        .map(|i| {
            let phi = i as f32 / rings as f32 * FRAC_PI_2;
            Vec2::new(radius * phi.cos(), radius * phi.sin())
        })
        .collect();
    revolve(&profile, segments)
}

/// Torus lying flat around +Y (a ring viewed from above).
pub fn torus_mesh(ring_radius: f32, tube_radius: f32, tube_segments: u32, ring_segments: u32) -> Mesh {
    let profile: Vec<Vec2> = (0..=tube_segments)
        .map(|i| {
            let phi = i as f32 / tube_segments as f32 * TAU;
            Vec2::new(ring_radius + tube_radius * phi.cos(), tube_radius * phi.sin())
        })
        .collect();
    revolve(&profile, ring_segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn mesh_positions(mesh: &Mesh) -> Vec<Vec3> {
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("mesh has no position attribute");
        };
        positions.iter().map(|p| Vec3::from_array(*p)).collect()
    }

    fn mesh_normals(mesh: &Mesh) -> Vec<Vec3> {
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("mesh has no normal attribute");
        };
        normals.iter().map(|n| Vec3::from_array(*n)).collect()
    }

    fn mesh_index_count(mesh: &Mesh) -> usize {
        match mesh.indices() {
            Some(Indices::U32(indices)) => indices.len(),
            _ => panic!("mesh has no u32 indices"),
        }
    }

    #[test]
    fn crust_profile_starts_and_ends_at_inner_radius() {
        let profile = crust_profile(2.2, 0.08);
        assert_eq!(profile.len(), 52);
        let inner = 2.2 * 0.9;
        assert!((profile[0].x - inner).abs() < 1e-6);
        assert!(profile[0].y.abs() < 1e-6);
        assert!((profile[51].x - inner).abs() < 1e-6);
        assert!(profile[51].y.abs() < 1e-6);
    }

    #[test]
    fn crust_profile_extents_follow_thickness() {
        let height = 0.08;
        let profile = crust_profile(2.2, height);
        let max = profile.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let min = profile.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        // Upper bulge is 0.5 of crust thickness, lower dip 0.4.
        assert!((max - height * 2.2 * 0.5).abs() < 1e-4);
        assert!((min + height * 2.2 * 0.4).abs() < 1e-4);
        let outer = profile.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((outer - (2.2 * 0.9 + 2.2 * 0.15)).abs() < 1e-4);
    }

    #[test]
    fn base_top_height_spans_both_arcs() {
        let height = 0.15;
        assert!((base_top_height(height) - height * 2.2 * 0.9).abs() < 1e-4);
    }

    #[test]
    fn base_mesh_rests_on_ground() {
        let mesh = base_mesh(1.9, 0.04);
        let positions = mesh_positions(&mesh);
        let min = positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max = positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!(min.abs() < 1e-4);
        assert!((max - base_top_height(0.04)).abs() < 1e-4);
    }

    #[test]
    fn revolve_weld_counts() {
        let profile = [Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let mesh = revolve(&profile, 8);
        assert_eq!(mesh_positions(&mesh).len(), 2 * 8);
        assert_eq!(mesh_index_count(&mesh), 8 * 6);
    }

    #[test]
    fn revolve_wall_normals_point_outward() {
        let profile = [Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let mesh = revolve(&profile, 16);
        let positions = mesh_positions(&mesh);
        let normals = mesh_normals(&mesh);
        for (p, n) in positions.iter().zip(&normals) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            let radial = Vec3::new(p.x, 0.0, p.z).normalize();
            assert!(n.dot(radial) > 0.99, "normal {n} not radial at {p}");
        }
    }

    #[test]
    fn disc_faces_up() {
        let mesh = disc_mesh(0.14, 8);
        assert_eq!(mesh_positions(&mesh).len(), 9);
        assert_eq!(mesh_index_count(&mesh), 8 * 3);
        for n in mesh_normals(&mesh) {
            assert!((n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn cylinder_spans_half_height_each_way() {
        let mesh = cylinder_mesh(0.24, 0.06, 16);
        let positions = mesh_positions(&mesh);
        let min = positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max = positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!((min + 0.03).abs() < 1e-6);
        assert!((max - 0.03).abs() < 1e-6);
    }

    #[test]
    fn hemisphere_is_open_bottomed_dome() {
        let mesh = hemisphere_mesh(0.18, 12, 8);
        let positions = mesh_positions(&mesh);
        let min = positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max = positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!(min.abs() < 1e-6);
        assert!((max - 0.18).abs() < 1e-4);
    }

    #[test]
    fn torus_stays_within_ring_bounds() {
        let mesh = torus_mesh(0.09, 0.035, 6, 12);
        for p in mesh_positions(&mesh) {
            let radial = Vec2::new(p.x, p.z).length();
            assert!(radial <= 0.09 + 0.035 + 1e-4);
            assert!(p.y.abs() <= 0.035 + 1e-4);
        }
    }
}
