use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{injection, water};
use crate::fluid::{FluidGrid, WaterLedger};

/// What one injection actually put into the grid
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InjectionReport {
    /// Post-clamp water added, summed over every touched cell
    pub added: f64,
    /// Number of individual additions (inlet plus splash cells)
    pub cells_touched: usize,
    /// Whether the inlet saturated enough to splash
    pub splashed: bool,
}

/// Periodic water source on the top row
pub struct InjectionPolicy {
    rng: StdRng,
    interval: u64,
}

impl InjectionPolicy {
    /// Policy with a fixed seed, reproducible across runs
    pub fn seeded(seed: u64, interval: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            interval: interval.max(1),
        }
    }

    /// Policy seeded from OS entropy
    pub fn from_entropy(interval: u64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Injection fires on every `interval`-th frame
    pub fn is_due(&self, frame: u64) -> bool {
        frame > 0 && frame % self.interval == 0
    }

    /// Run the policy for `frame`, doing nothing when it is not due
    pub fn tick(&mut self, frame: u64, grid: &mut FluidGrid, ledger: &mut WaterLedger) -> InjectionReport {
        if !self.is_due(frame) {
            return InjectionReport::default();
        }
        self.inject(grid, ledger)
    }

    /// Add water at a random inlet column, splashing if it saturates
    pub fn inject(&mut self, grid: &mut FluidGrid, ledger: &mut WaterLedger) -> InjectionReport {
        let mut report = InjectionReport::default();
        if grid.width() == 0 || grid.height() == 0 {
            return report;
        }

        let x = self.rng.gen_range(0..grid.width());
        let y = 0;
        let amount = self.rng.gen_range(injection::AMOUNT_MIN..injection::AMOUNT_MAX);

        if grid[(x, y)].obstacle {
            return report;
        }

        report.added += add_clamped(grid, x, y, amount);
        report.cells_touched += 1;

        if grid[(x, y)].water >= injection::SPLASH_THRESHOLD {
            report.splashed = true;
            let radius = self.rng.gen_range(0..injection::SPLASH_RADIUS_MAX);
            log::debug!("splash at column {} with radius {}", x, radius);

            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if !grid.in_bounds(nx, ny) {
                        continue;
                    }
                    if ((dx * dx + dy * dy) as f64).sqrt() > radius as f64 {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    if grid[(nx, ny)].obstacle {
                        continue;
                    }

                    let splash = self
                        .rng
                        .gen_range(injection::SPLASH_AMOUNT_MIN..injection::SPLASH_AMOUNT_MAX);
                    report.added += add_clamped(grid, nx, ny, splash);
                    report.cells_touched += 1;
                }
            }
        }

        ledger.record_added(report.added);
        report
    }
}

/// Add `amount` to a cell, clamp to full, and return the real delta
fn add_clamped(grid: &mut FluidGrid, x: usize, y: usize, amount: f64) -> f64 {
    let Some(cell) = grid.get_mut(x, y) else {
        return 0.0;
    };
    let before = cell.water;
    cell.water = (cell.water + amount).min(water::FULL);
    cell.water - before
}
