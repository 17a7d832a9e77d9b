use crate::constants::advection::{DECAY_RATE, DECAY_SNAP};
use crate::fluid::{FluidGrid, WaterLedger};

/// Mass-conserving cellular automaton
///
/// Rows are swept bottom-up from the drain row (`height - 2`) to the top,
/// columns left to right. A cell's own water is read from the pre-step
/// snapshot, while neighbor headroom is read from the evolving grid, so
/// water moves at most one row per frame and a cell never overfills.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeAdvection;

impl ConservativeAdvection {
    pub fn new() -> Self {
        Self
    }

    /// Advance `grid` by one frame, recording drained water in `ledger`
    pub fn step(&self, grid: &mut FluidGrid, ledger: &mut WaterLedger) {
        let height = grid.height();
        let width = grid.width();
        if height < 2 {
            return;
        }

        let snapshot = grid.clone();
        let drain_row = height - 2;

        for y in (0..=drain_row).rev() {
            for x in 0..width {
                let cell = snapshot[(x, y)];

                if y == drain_row {
                    if !cell.obstacle && cell.water > 0.0 {
                        ledger.record_decayed(drain(grid, x, y, cell.water));
                    }
                    continue;
                }

                if cell.obstacle || cell.water <= 0.0 {
                    continue;
                }

                let amount = cell.water;

                // Down-flow is exclusive with sideways flow
                let below = grid[(x, y + 1)];
                if below.has_room() {
                    let flow = amount.min(below.room());
                    transfer(grid, (x, y), (x, y + 1), flow);
                    continue;
                }

                if x > 0 {
                    let left = grid[(x - 1, y)];
                    if left.has_room() {
                        let flow = (amount / 2.0).min(left.room());
                        transfer(grid, (x, y), (x - 1, y), flow);
                    }
                }

                if x + 1 < width {
                    let right = grid[(x + 1, y)];
                    if right.has_room() {
                        let flow = (amount / 2.0).min(right.room());
                        transfer(grid, (x, y), (x + 1, y), flow);
                    }
                }
            }
        }
    }
}

/// Shrink a drain-row cell and return the water it lost
fn drain(grid: &mut FluidGrid, x: usize, y: usize, water: f64) -> f64 {
    let mut remaining = water * DECAY_RATE;
    if remaining < DECAY_SNAP {
        remaining = 0.0;
    }
    grid[(x, y)].water = remaining;
    water - remaining
}

#[inline]
fn transfer(grid: &mut FluidGrid, from: (usize, usize), to: (usize, usize), flow: f64) {
    grid[to].water += flow;
    grid[from].water -= flow;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid::Cell;

    #[test]
    fn test_single_cell_falls_one_row() {
        let mut grid = FluidGrid::new(5, 5);
        grid.set(2, 0, Cell::with_water(1.0));
        let mut ledger = WaterLedger::new();

        ConservativeAdvection::new().step(&mut grid, &mut ledger);

        assert_eq!(grid[(2, 0)].water, 0.0);
        assert_eq!(grid[(2, 1)].water, 1.0);
        assert_eq!(grid[(1, 0)].water, 0.0);
        assert_eq!(grid[(3, 0)].water, 0.0);
        assert_eq!(ledger.decayed_this_frame(), 0.0);
    }

    #[test]
    fn test_blocked_cell_spreads_both_ways() {
        let mut grid = FluidGrid::new(3, 3);
        for x in 0..3 {
            grid.set(x, 1, Cell::OBSTACLE);
        }
        grid.set(1, 0, Cell::with_water(0.6));
        let mut ledger = WaterLedger::new();

        ConservativeAdvection::new().step(&mut grid, &mut ledger);

        // Both sides draw half of the pre-step amount
        assert!((grid[(0, 0)].water - 0.3).abs() < 1e-12);
        assert!((grid[(2, 0)].water - 0.3).abs() < 1e-12);
        assert!(grid[(1, 0)].water.abs() < 1e-12);
    }

    #[test]
    fn test_sideways_flow_respects_headroom() {
        let mut grid = FluidGrid::new(3, 3);
        for x in 0..3 {
            grid.set(x, 1, Cell::OBSTACLE);
        }
        grid.set(0, 0, Cell::with_water(0.9));
        grid.set(1, 0, Cell::with_water(1.0));
        let mut ledger = WaterLedger::new();

        ConservativeAdvection::new().step(&mut grid, &mut ledger);

        assert!(grid.iter().all(|(_, _, c)| c.water <= 1.0 + 1e-12));
        assert!((grid.total_water() - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_drain_row_decays_and_snaps() {
        let mut grid = FluidGrid::new(2, 3);
        grid.set(0, 1, Cell::with_water(1.0));
        grid.set(1, 1, Cell::with_water(0.01));
        let mut ledger = WaterLedger::new();

        ConservativeAdvection::new().step(&mut grid, &mut ledger);

        assert!((grid[(0, 1)].water - 0.8).abs() < 1e-12);
        assert_eq!(grid[(1, 1)].water, 0.0);
        assert!((ledger.decayed_this_frame() - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_water_lands_on_drain_row() {
        let mut grid = FluidGrid::new(1, 6);
        grid.set(0, 3, Cell::with_water(0.5));
        let mut ledger = WaterLedger::new();

        ConservativeAdvection::new().step(&mut grid, &mut ledger);

        // Row 4 is the drain row; row 3 lands on it after it was drained
        assert_eq!(grid[(0, 3)].water, 0.0);
        assert_eq!(grid[(0, 4)].water, 0.5);
    }

    #[test]
    fn test_drop_moves_one_row_per_frame() {
        let mut grid = FluidGrid::new(1, 10);
        grid.set(0, 0, Cell::with_water(1.0));
        let mut ledger = WaterLedger::new();

        for frame in 1..=3 {
            ConservativeAdvection::new().step(&mut grid, &mut ledger);
            let column: Vec<f64> = (0..10).map(|y| grid[(0, y)].water).collect();
            let mut expected = vec![0.0; 10];
            expected[frame] = 1.0;
            assert_eq!(column, expected, "frame {}", frame);
        }
    }

    #[test]
    fn test_tiny_grid_is_untouched() {
        let mut grid = FluidGrid::new(3, 1);
        grid.set(1, 0, Cell::with_water(0.7));
        let before = grid.clone();

        ConservativeAdvection::new().step(&mut grid, &mut WaterLedger::new());

        assert_eq!(grid, before);
    }
}
