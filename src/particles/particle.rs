use glam::DVec2;

use crate::constants::water;

/// Individual water or wall particle
///
/// Position is continuous; the grid cell it occupies is the truncated
/// position. Particles are created from the map once and only mutated
/// in place afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in cell units, x to the right, y downwards
    pub position: DVec2,
    /// Displacement per frame
    pub velocity: DVec2,
    /// Water carried, untouched by the particle model
    pub water: f64,
    /// Wall particle, never moves
    pub obstacle: bool,
}

impl Particle {
    /// Saturated water particle at rest
    pub fn water(x: usize, y: usize) -> Self {
        Self {
            position: DVec2::new(x as f64, y as f64),
            velocity: DVec2::ZERO,
            water: water::FULL,
            obstacle: false,
        }
    }

    /// Wall particle
    pub fn obstacle(x: usize, y: usize) -> Self {
        Self {
            position: DVec2::new(x as f64, y as f64),
            velocity: DVec2::ZERO,
            water: water::EMPTY,
            obstacle: true,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Grid cell the particle occupies (truncated position)
    #[inline]
    pub fn cell(&self) -> (i64, i64) {
        (self.position.x.trunc() as i64, self.position.y.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_truncates() {
        let mut particle = Particle::water(3, 4);
        particle.position += DVec2::new(0.9, 0.2);
        assert_eq!(particle.cell(), (3, 4));
        assert!(!particle.obstacle);
        assert!(Particle::obstacle(0, 0).obstacle);
    }
}
