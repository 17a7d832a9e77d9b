use glam::DVec2;

use crate::constants::velocity::{BOUNDARY_LOSS, DAMPING, DOWNWARD_BIAS, GRAVITY, OBSTACLE_LOSS};
use crate::constants::water;
use crate::fluid::{FluidGrid, WaterLedger};

/// What stopped a cell's water from moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Target lies outside the grid
    Boundary,
    /// Target is an interior obstacle
    Obstacle,
}

impl Collision {
    /// Fraction of speed kept after the bounce
    pub fn loss(self) -> f64 {
        match self {
            Collision::Boundary => BOUNDARY_LOSS,
            Collision::Obstacle => OBSTACLE_LOSS,
        }
    }
}

/// Wetter cells bounce harder: 0.5 for a dry cell up to 1.0 when full
#[inline]
pub fn rebound_factor(water: f64) -> f64 {
    0.5 + 0.5 * water.min(water::FULL)
}

/// Reflect a cell velocity off a boundary or obstacle
pub fn reflect(velocity: DVec2, collision: Collision, water: f64) -> DVec2 {
    -velocity * collision.loss() * rebound_factor(water)
}

/// Per-cell velocity model
///
/// Every wet cell accelerates under gravity and tries to move its water
/// to the cell its velocity points at. Reads come from the pre-step
/// snapshot; destination headroom is checked against the evolving grid so
/// no cell ever overfills.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityField {
    /// Reproduce the old bounce behavior where a reflecting cell's water
    /// doubled. Unbounded, off unless exact legacy numbers are wanted.
    pub legacy_bounce_doubling: bool,
}

impl VelocityField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_legacy_bounce_doubling(mut self, enabled: bool) -> Self {
        self.legacy_bounce_doubling = enabled;
        self
    }

    /// Advance `grid` by one frame
    ///
    /// The velocity field has no drain row, so the ledger is untouched
    /// unless legacy bounce doubling creates water.
    pub fn step(&self, grid: &mut FluidGrid, ledger: &mut WaterLedger) {
        let snapshot = grid.clone();
        let width = grid.width();

        for y in (0..grid.height()).rev() {
            for x in 0..width {
                let cell = snapshot[(x, y)];
                if cell.obstacle || cell.water <= 0.0 {
                    continue;
                }

                let velocity = cell.velocity + DVec2::new(0.0, GRAVITY);
                let tx = (x as f64 + velocity.x).trunc() as i64;
                let ty = (y as f64 + velocity.y).trunc() as i64;

                let collision = match grid.get_signed(tx, ty) {
                    None => Some(Collision::Boundary),
                    Some(target) if target.obstacle => Some(Collision::Obstacle),
                    Some(_) => None,
                };

                if let Some(collision) = collision {
                    let source = &mut grid[(x, y)];
                    source.velocity = reflect(velocity, collision, cell.water);
                    if self.legacy_bounce_doubling {
                        source.water += cell.water;
                        ledger.record_added(cell.water);
                    }
                    continue;
                }

                let (tx, ty) = (tx as usize, ty as usize);
                if (tx, ty) == (x, y) {
                    grid[(x, y)].velocity = velocity;
                    continue;
                }

                let target = grid[(tx, ty)];
                if !target.has_room() {
                    // Resting against saturated water
                    grid[(x, y)].velocity = DVec2::ZERO;
                    continue;
                }

                let flow = cell.water.min(target.room());
                let destination = &mut grid[(tx, ty)];
                destination.water += flow;
                destination.velocity = DVec2::new(velocity.x * DAMPING, (velocity.y + DOWNWARD_BIAS) * DAMPING);

                let source = &mut grid[(x, y)];
                source.water -= flow;
                source.velocity = if source.water > 0.0 { velocity } else { DVec2::ZERO };
            }
        }
    }
}
