use glam::DVec2;

use crate::constants::render::{RAMP, RAMP_SCALE, REST_GLYPH, REST_SPEED};

/// Compass arrows, counter-clockwise from east
const ARROWS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];

/// Ramp index for a water fraction: floor(water * 32), clamped to the ramp
pub fn ramp_index(water: f64) -> usize {
    let last = RAMP.len() - 1;
    let idx = (water * RAMP_SCALE).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(last)
    }
}

/// Intensity glyph for a water fraction
pub fn ramp_glyph(water: f64) -> char {
    // RAMP is ASCII, byte index == char index
    RAMP.as_bytes()[ramp_index(water)] as char
}

/// Direction glyph for a velocity, `·` when nearly at rest
///
/// The grid's y axis points down, so the angle is taken with y flipped to
/// make falling water point down on screen. Sectors are 45° wide and
/// centered on the axes and diagonals.
pub fn velocity_arrow(velocity: DVec2) -> char {
    if velocity.length() < REST_SPEED {
        return REST_GLYPH;
    }

    // y flipped on purpose so arrows match the screen, not the grid
    let angle = (-velocity.y).atan2(velocity.x).to_degrees();
    let sector = ((angle + 22.5).rem_euclid(360.0) / 45.0).floor() as usize;
    ARROWS[sector % ARROWS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_full_maps_to_index_16() {
        assert_eq!(ramp_index(0.5), 16);
        assert_eq!(ramp_glyph(0.5), '?');
    }

    #[test]
    fn test_ramp_clamps() {
        assert_eq!(ramp_index(-0.2), 0);
        assert_eq!(ramp_index(0.01), 0);
        assert_eq!(ramp_index(1.0), RAMP.len() - 1);
        assert_eq!(ramp_index(2.5), RAMP.len() - 1);
        assert_eq!(ramp_glyph(1.0), 'M');
    }

    #[test]
    fn test_arrows_follow_screen_directions() {
        assert_eq!(velocity_arrow(DVec2::new(1.0, 0.0)), '→');
        assert_eq!(velocity_arrow(DVec2::new(-1.0, 0.0)), '←');
        assert_eq!(velocity_arrow(DVec2::new(0.0, 1.0)), '↓');
        assert_eq!(velocity_arrow(DVec2::new(0.0, -1.0)), '↑');
        assert_eq!(velocity_arrow(DVec2::new(1.0, 1.0)), '↘');
        assert_eq!(velocity_arrow(DVec2::new(-1.0, -1.0)), '↖');
        assert_eq!(velocity_arrow(DVec2::new(-1.0, 1.0)), '↙');
        assert_eq!(velocity_arrow(DVec2::new(1.0, -1.0)), '↗');
    }

    #[test]
    fn test_slow_cells_rest() {
        assert_eq!(velocity_arrow(DVec2::new(0.05, 0.05)), '·');
        assert_eq!(velocity_arrow(DVec2::ZERO), '·');
    }
}
