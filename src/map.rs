//! Text map loader
//!
//! One grid row per line: `#` is a wall, a space is empty, any other glyph
//! is a saturated water cell. Short lines are padded with empty cells.

use std::path::Path;

use crate::error::{MapErrorContext, SimError, SimResult};
use crate::fluid::{Cell, FluidGrid};
use crate::particles::{Particle, ParticleSystem};

/// Map cell kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Obstacle,
    Water,
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            '#' => Tile::Obstacle,
            ' ' => Tile::Empty,
            _ => Tile::Water,
        }
    }
}

/// Parsed map, sized either from its content or from a fixed frame
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl MapLayout {
    /// Size the grid as (longest line, line count)
    pub fn parse(text: &str) -> Self {
        let width = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let height = text.lines().count();
        Self::parse_sized(text, width, height)
    }

    /// Crop or pad the map to exactly `width` x `height`
    pub fn parse_sized(text: &str, width: usize, height: usize) -> Self {
        let mut tiles = vec![Tile::Empty; width * height];
        for (y, line) in text.lines().take(height).enumerate() {
            for (x, glyph) in line.chars().take(width).enumerate() {
                tiles[y * width + x] = Tile::from_glyph(glyph);
            }
        }
        Self { width, height, tiles }
    }

    /// Read a map file, sizing it dynamically or to `fixed_size`
    pub fn load(path: impl AsRef<Path>, fixed_size: Option<(usize, usize)>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_context(path)?;

        let layout = match fixed_size {
            Some((width, height)) => Self::parse_sized(&text, width, height),
            None => Self::parse(&text),
        };
        if layout.width == 0 || layout.height == 0 {
            return Err(SimError::EmptyMap {
                path: path.to_path_buf(),
            });
        }

        log::info!(
            "loaded map {} ({}x{}, {} water cells)",
            path.display(),
            layout.width,
            layout.height,
            layout.count(Tile::Water)
        );
        Ok(layout)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    pub fn count(&self, kind: Tile) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }

    fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i % width, i / width, *tile))
    }

    /// Initial state for the cell models
    pub fn to_grid(&self) -> FluidGrid {
        let mut grid = FluidGrid::new(self.width, self.height);
        for (x, y, tile) in self.tiles() {
            let cell = match tile {
                Tile::Empty => continue,
                Tile::Obstacle => Cell::OBSTACLE,
                Tile::Water => Cell::with_water(1.0),
            };
            grid.set(x, y, cell);
        }
        grid
    }

    /// Initial state for the particle model: one particle per non-blank tile
    pub fn to_particles(&self) -> ParticleSystem {
        let particles = self
            .tiles()
            .filter_map(|(x, y, tile)| match tile {
                Tile::Empty => None,
                Tile::Obstacle => Some(Particle::obstacle(x, y)),
                Tile::Water => Some(Particle::water(x, y)),
            })
            .collect();
        ParticleSystem::new(particles, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_dynamic_size_pads_short_lines() {
        let layout = MapLayout::parse("#~#\n#\n  x \n");

        assert_eq!((layout.width(), layout.height()), (4, 3));
        assert_eq!(layout.tile(1, 0), Some(Tile::Water));
        assert_eq!(layout.tile(2, 1), Some(Tile::Empty));
        assert_eq!(layout.tile(2, 2), Some(Tile::Water));
        assert_eq!(layout.tile(3, 0), Some(Tile::Empty));
        assert_eq!(layout.count(Tile::Obstacle), 3);
    }

    #[test]
    fn test_parse_sized_crops() {
        let layout = MapLayout::parse_sized("abc\ndef\nghi", 2, 2);

        assert_eq!(layout.count(Tile::Water), 4);
        assert_eq!(layout.tile(2, 0), None);
    }

    #[test]
    fn test_grid_and_particles_agree() {
        let layout = MapLayout::parse("# o\n oo");
        let grid = layout.to_grid();
        let system = layout.to_particles();

        assert_eq!(grid.total_water(), 3.0);
        assert_eq!(system.total_water(), 3.0);
        assert_eq!(system.particles().len(), 4);
        assert!(grid[(0, 0)].obstacle);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "#  #").expect("write");
        writeln!(file, "#~~#").expect("write");
        writeln!(file, "####").expect("write");

        let layout = MapLayout::load(file.path(), None).expect("load");
        assert_eq!((layout.width(), layout.height()), (4, 3));
        assert_eq!(layout.count(Tile::Water), 2);

        let classic = MapLayout::load(file.path(), Some((80, 24))).expect("load");
        assert_eq!((classic.width(), classic.height()), (80, 24));
        assert_eq!(classic.count(Tile::Water), 2);
    }

    #[test]
    fn test_missing_and_empty_maps_fail() {
        let missing = MapLayout::load("/definitely/not/here.map", None);
        assert!(matches!(missing, Err(SimError::MapRead { .. })));

        let file = tempfile::NamedTempFile::new().expect("temp file");
        let empty = MapLayout::load(file.path(), None);
        assert!(matches!(empty, Err(SimError::EmptyMap { .. })));
    }
}
