use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// One decorative cheese blob: a squashed, tinted sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheeseBlob {
    pub radius: f32,
    pub scale: Vec3,
    pub hue_shift: f32,
    pub saturation_shift: f32,
    /// Horizontal (x, z) offset from the pizza center.
    pub offset: Vec2,
}

/// Scatter `count` blobs over the sauce area. Polar sampling: angle uniform
/// in [0, 2π), distance uniform in [0, 0.9 * base_radius), which leaves the
/// scatter denser toward the center.
pub fn scatter_cheese(base_radius: f32, count: usize, rng: &mut impl Rng) -> Vec<CheeseBlob> {
    (0..count)
        .map(|_| {
            let radius = 0.12 + rng.random_range(0.0..0.05);
            let scale = Vec3::new(
                1.0 + rng.random_range(0.0..0.5),
                0.15 + rng.random_range(0.0..0.08),
                1.0 + rng.random_range(0.0..0.5),
            );
            let hue_shift = (rng.random_range(0.0..1.0f32) - 0.5) * 0.05;
            let saturation_shift = (rng.random_range(0.0..1.0f32) - 0.5) * 0.1;
            let angle = rng.random_range(0.0..TAU);
            let dist = rng.random_range(0.0..base_radius * 0.9);
            CheeseBlob {
                radius,
                scale,
                hue_shift,
                saturation_shift,
                offset: Vec2::new(angle.cos() * dist, angle.sin() * dist),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scatter_respects_count_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let blobs = scatter_cheese(2.2, 250, &mut rng);
        assert_eq!(blobs.len(), 250);
        for blob in &blobs {
            assert!(blob.offset.length() < 2.2 * 0.9 + 1e-5);
            assert!(blob.radius >= 0.12 && blob.radius < 0.17);
            assert!(blob.scale.x >= 1.0 && blob.scale.x < 1.5);
            assert!(blob.scale.y >= 0.15 && blob.scale.y < 0.23);
            assert!(blob.scale.z >= 1.0 && blob.scale.z < 1.5);
            assert!(blob.hue_shift.abs() <= 0.025 + 1e-6);
            assert!(blob.saturation_shift.abs() <= 0.05 + 1e-6);
        }
    }

    #[test]
    fn seeded_scatter_is_reproducible() {
        let a = scatter_cheese(1.9, 32, &mut StdRng::seed_from_u64(7));
        let b = scatter_cheese(1.9, 32, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_scatter_for_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(scatter_cheese(2.7, 0, &mut rng).is_empty());
    }
}
