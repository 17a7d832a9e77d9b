use crate::fluid::WaterLedger;

use super::physics::{apply_compression_force, apply_gravity, integrate, reflect_off_obstacle};
use super::{Particle, ParticleIndex};

/// Fixed population of particles inside a `width` x `height` box
///
/// A step is two passes, each reading a snapshot of the particles taken
/// at its start and indexed by cell: a velocity pass (obstacle bounces
/// and compression) and a motion pass (gravity, integration, edge
/// bounces).
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    width: usize,
    height: usize,
}

impl ParticleSystem {
    pub fn new(particles: Vec<Particle>, width: usize, height: usize) -> Self {
        log::debug!(
            "particle system: {} particles in {}x{}",
            particles.len(),
            width,
            height
        );
        Self {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn total_water(&self) -> f64 {
        self.particles.iter().map(|p| p.water).sum()
    }

    /// Advance every particle one frame
    ///
    /// Particles never gain or lose water, so the ledger only gets its
    /// per-frame counters left at zero.
    pub fn step(&mut self, _ledger: &mut WaterLedger) {
        self.update_velocities();
        self.update_positions();
    }

    /// Obstacle bounces and neighbor compression
    pub fn update_velocities(&mut self) {
        let snapshot = self.particles.clone();
        let index = ParticleIndex::build(&snapshot, self.width, self.height);

        for particle in self.particles.iter_mut().filter(|p| !p.obstacle) {
            let (x, y) = particle.cell();
            for n in index.neighbors(x, y) {
                let neighbor = &snapshot[n];
                if neighbor.obstacle {
                    reflect_off_obstacle(particle);
                } else {
                    apply_compression_force(particle, neighbor.position);
                }
            }
        }
    }

    /// Gravity, integration and edge bounces
    pub fn update_positions(&mut self) {
        let snapshot = self.particles.clone();
        let index = ParticleIndex::build(&snapshot, self.width, self.height);

        for particle in self.particles.iter_mut().filter(|p| !p.obstacle) {
            let (x, y) = particle.cell();
            let above = index.get(x, y - 1).map(|i| &snapshot[i]);
            apply_gravity(particle, above);
            integrate(particle, self.width, self.height);
        }
    }
}
