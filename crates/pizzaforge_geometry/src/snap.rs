use bevy::prelude::*;

/// Concentric snap rings, as fractions of the base radius.
pub const RING_FRACTIONS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];
/// Maximum distance-to-ring difference that still snaps, in world units.
pub const SNAP_THRESHOLD: f32 = 0.3;
/// Margin kept between a clamped topping and the base rim.
pub const EDGE_MARGIN: f32 = 0.12;
/// Inside this distance from center the position passes through untouched.
pub const CENTER_DEADZONE: f32 = 0.001;

/// Nearest-ring-with-tolerance adjustment of a horizontal position.
///
/// When the radial distance is within [`SNAP_THRESHOLD`] of the closest
/// ring it is pulled onto that ring; otherwise it is clamped to stay
/// [`EDGE_MARGIN`] inside the rim. The angle is always preserved.
pub fn snap_to_rings(pos: Vec2, base_radius: f32, enabled: bool) -> Vec2 {
    if !enabled {
        return pos;
    }
    let d = pos.length();
    if d < CENTER_DEADZONE {
        return pos;
    }

    let mut best = RING_FRACTIONS[0] * base_radius;
    let mut best_diff = (d - best).abs();
    for fraction in &RING_FRACTIONS[1..] {
        let ring = fraction * base_radius;
        let diff = (d - ring).abs();
        if diff < best_diff {
            best = ring;
            best_diff = diff;
        }
    }

    let target = if best_diff <= SNAP_THRESHOLD {
        best
    } else {
        d.min(base_radius - EDGE_MARGIN)
    };
    pos * (target / d)
}
