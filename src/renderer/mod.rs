/// ASCII renderer
///
/// Turns a grid or particle snapshot into text rows plus the ledger
/// status lines, and pushes them to the terminal.

pub mod glyphs;
pub mod frame;
pub mod terminal;

pub use glyphs::{ramp_glyph, ramp_index, velocity_arrow};
pub use frame::{cell_glyph, status_lines, CellView, Frame, FrameSource};
pub use terminal::TerminalGuard;
