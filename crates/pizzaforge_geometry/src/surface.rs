/// Vertical clearance between a topping's origin and the surface it rests on.
pub const TOPPING_SURFACE_OFFSET: f32 = 0.02;

/// Resting height for a new or repositioned topping.
///
/// Sauce wins over base, base over nothing; with neither present the
/// offset alone keeps toppings just above the ground plane.
pub fn topping_rest_height(sauce_top: Option<f32>, base_top: Option<f32>) -> f32 {
    sauce_top.or(base_top).unwrap_or(0.0) + TOPPING_SURFACE_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sauce_wins_regardless_of_base() {
        assert!((topping_rest_height(Some(0.07), Some(0.158)) - 0.09).abs() < 1e-6);
        assert!((topping_rest_height(Some(0.07), None) - 0.09).abs() < 1e-6);
    }

    #[test]
    fn base_top_used_when_no_sauce() {
        assert!((topping_rest_height(None, Some(0.158)) - 0.178).abs() < 1e-6);
    }

    #[test]
    fn bare_offset_when_nothing_built() {
        assert!((topping_rest_height(None, None) - TOPPING_SURFACE_OFFSET).abs() < 1e-6);
    }
}
