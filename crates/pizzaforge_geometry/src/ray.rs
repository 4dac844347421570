use bevy::prelude::*;

/// Intersection of a ray with an infinite plane.
///
/// Returns the distance along the ray, or None when the ray runs parallel
/// to the plane or the intersection lies behind the origin.
pub fn ray_plane_intersection(ray: &Ray3d, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 1e-4 {
        return None;
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }

    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_down_hits_ground() {
        let ray = Ray3d {
            origin: Vec3::new(0.3, 5.0, -0.2),
            direction: Dir3::NEG_Y,
        };
        let t = ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Y);
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
        let hit = ray.get_point(t.unwrap());
        assert!((hit - Vec3::new(0.3, 0.0, -0.2)).length() < 1e-5);
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray3d {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Dir3::X,
        };
        assert!(ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        let ray = Ray3d {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Dir3::Y,
        };
        assert!(ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn oblique_ray_lands_where_expected() {
        let ray = Ray3d {
            origin: Vec3::new(0.0, 4.0, 0.0),
            direction: Dir3::new(Vec3::new(1.0, -1.0, 0.0)).unwrap(),
        };
        let t = ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Y).unwrap();
        let hit = ray.get_point(t);
        assert!((hit - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
    }
}
