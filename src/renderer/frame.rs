use glam::DVec2;

use crate::constants::render::{EMPTY_GLYPH, OBSTACLE_GLYPH};
use crate::fluid::{FluidGrid, WaterLedger};
use crate::particles::ParticleSystem;

use super::glyphs::{ramp_glyph, velocity_arrow};

/// What the renderer needs to know about one occupied cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub obstacle: bool,
    pub water: f64,
    pub velocity: DVec2,
}

/// Anything that can be drawn as a grid of glyphs
pub trait FrameSource {
    /// Grid size as (width, height)
    fn size(&self) -> (usize, usize);

    /// Cells to draw; unlisted cells render blank, later cells overwrite
    fn cells(&self) -> Box<dyn Iterator<Item = CellView> + '_>;
}

impl FrameSource for FluidGrid {
    fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn cells(&self) -> Box<dyn Iterator<Item = CellView> + '_> {
        Box::new(self.iter().map(|(x, y, cell)| CellView {
            x,
            y,
            obstacle: cell.obstacle,
            water: cell.water,
            velocity: cell.velocity,
        }))
    }
}

impl FrameSource for ParticleSystem {
    fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn cells(&self) -> Box<dyn Iterator<Item = CellView> + '_> {
        let (width, height) = self.size();
        Box::new(self.particles().iter().filter_map(move |p| {
            let (x, y) = p.cell();
            if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
                return None;
            }
            Some(CellView {
                x: x as usize,
                y: y as usize,
                obstacle: p.obstacle,
                water: p.water,
                velocity: p.velocity,
            })
        }))
    }
}

/// Glyph for one cell
pub fn cell_glyph(cell: &CellView, debug: bool) -> char {
    if cell.obstacle {
        OBSTACLE_GLYPH
    } else if cell.water > 0.0 {
        if debug {
            velocity_arrow(cell.velocity)
        } else {
            ramp_glyph(cell.water)
        }
    } else {
        EMPTY_GLYPH
    }
}

/// One composed frame: grid rows followed by two status lines
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub rows: Vec<String>,
    pub status: [String; 2],
}

impl Frame {
    pub fn compose(source: &dyn FrameSource, ledger: &WaterLedger, debug: bool) -> Self {
        let (width, height) = source.size();
        let mut screen = vec![vec![EMPTY_GLYPH; width]; height];

        for cell in source.cells() {
            screen[cell.y][cell.x] = cell_glyph(&cell, debug);
        }

        let rows = screen.into_iter().map(|row| row.into_iter().collect()).collect();
        Self {
            rows,
            status: status_lines(ledger, width),
        }
    }

    /// Grid rows then status lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .chain(self.status.iter())
            .map(String::as_str)
    }
}

/// Ledger summary, each line cut to the grid width
pub fn status_lines(ledger: &WaterLedger, width: usize) -> [String; 2] {
    let first = format!(
        "Total Water: {:.2} | Added This Frame: {:.2}",
        ledger.total_water(),
        ledger.added_this_frame()
    );
    let second = format!(
        "Decayed This Frame: {:.2} | Total Decayed: {:.2}",
        ledger.decayed_this_frame(),
        ledger.total_decayed()
    );
    [truncate(first, width), truncate(second, width)]
}

fn truncate(mut line: String, width: usize) -> String {
    if let Some((cut, _)) = line.char_indices().nth(width) {
        line.truncate(cut);
    }
    line
}
