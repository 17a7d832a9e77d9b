use rustc_hash::FxHashMap;

use super::Particle;

/// Offsets of the 8 surrounding cells
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Cell coordinate -> particle index, rebuilt at the start of each pass
///
/// Only indices are stored, the particle slice stays the single owner.
/// When several particles share a cell the last one wins.
pub struct ParticleIndex {
    width: usize,
    height: usize,
    cells: FxHashMap<(i64, i64), usize>,
}

impl ParticleIndex {
    pub fn build(particles: &[Particle], width: usize, height: usize) -> Self {
        let mut cells = FxHashMap::default();
        cells.reserve(particles.len());

        for (i, particle) in particles.iter().enumerate() {
            let (x, y) = particle.cell();
            if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
                cells.insert((x, y), i);
            }
        }

        Self { width, height, cells }
    }

    /// Particle occupying a cell, if any
    pub fn get(&self, x: i64, y: i64) -> Option<usize> {
        self.cells.get(&(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Particles in the 8 cells around `(x, y)`
    pub fn neighbors(&self, x: i64, y: i64) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |(dx, dy)| {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx as usize >= self.width || ny as usize >= self.height {
                return None;
            }
            self.get(nx, ny)
        })
    }
}
