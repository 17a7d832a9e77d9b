// Waterfall Constants - SINGLE SOURCE OF TRUTH
//
// Every physical constant of the simulation lives here. None of these are
// exposed on the command line or in the config file.

/// Grid-wide water limits
pub mod water {
    /// Water fraction of a saturated cell
    pub const FULL: f64 = 1.0;
    /// Water fraction of a dry cell
    pub const EMPTY: f64 = 0.0;
}

/// Injection policy (inlet on the top row)
pub mod injection {
    /// Inject once every this many frames
    pub const INTERVAL: u64 = 5;
    /// Inlet amount is uniform in [MIN, MAX)
    pub const AMOUNT_MIN: f64 = 0.1;
    pub const AMOUNT_MAX: f64 = 0.5;
    /// Water level at which the inlet cell splashes
    pub const SPLASH_THRESHOLD: f64 = 0.8;
    /// Splash radius is uniform in [0, RADIUS_MAX)
    pub const SPLASH_RADIUS_MAX: i64 = 4;
    /// Splash amount is uniform in [MIN, MAX)
    pub const SPLASH_AMOUNT_MIN: f64 = 0.05;
    pub const SPLASH_AMOUNT_MAX: f64 = 0.15;
}

/// Conservative advection (cellular automaton)
pub mod advection {
    /// Fraction kept by the drain row each frame (20% loss)
    pub const DECAY_RATE: f64 = 0.8;
    /// Drain row water below this snaps to zero
    pub const DECAY_SNAP: f64 = 0.01;
}

/// Velocity field over the cell grid
pub mod velocity {
    /// Downward acceleration per frame
    pub const GRAVITY: f64 = 0.08;
    /// Speed kept after hitting the grid boundary
    pub const BOUNDARY_LOSS: f64 = 0.6;
    /// Speed kept after hitting an interior obstacle
    pub const OBSTACLE_LOSS: f64 = 0.8;
    /// Damping applied to water arriving in a new cell
    pub const DAMPING: f64 = 0.98;
    /// Constant downward bias given to arriving water
    pub const DOWNWARD_BIAS: f64 = 0.05;
}

/// Particle representation of the velocity model
pub mod particles {
    /// Downward acceleration per frame
    pub const GRAVITY: f64 = 0.08;
    /// Vertical speed kept when held up by the particle below
    pub const SUPPORT_DAMPING: f64 = 0.2;
    /// Speed kept after crossing the grid boundary
    pub const BOUNDARY_LOSS: f64 = 0.6;
    /// Speed kept after touching an obstacle particle
    pub const OBSTACLE_LOSS: f64 = 0.8;
    /// Compression force numerator (force = STRENGTH / d²)
    pub const COMPRESSION_STRENGTH: f64 = 0.05;
    /// Share of a closing compression force sent into the vertical axis
    pub const SQUEEZE_SHARE: f64 = 0.5;
}

/// ASCII renderer
pub mod render {
    /// Intensity ramp, lightest to densest
    pub const RAMP: &str = " `.^,:~\"<!ct+{i7?u30pw4A8DX%#HWM";
    /// Ramp scale: index = floor(water * RAMP_SCALE)
    pub const RAMP_SCALE: f64 = 32.0;
    /// Speeds below this render as resting
    pub const REST_SPEED: f64 = 0.1;
    pub const OBSTACLE_GLYPH: char = '#';
    pub const EMPTY_GLYPH: char = ' ';
    pub const REST_GLYPH: char = '·';
}

/// Frame driver defaults
pub mod frame {
    /// Default frame interval for the cell models
    pub const CELL_INTERVAL_MS: u64 = 80;
    /// Default frame interval for the particle model
    pub const PARTICLE_INTERVAL_MS: u64 = 50;
    /// Fixed grid size of the classic terminal layout
    pub const CLASSIC_WIDTH: usize = 80;
    pub const CLASSIC_HEIGHT: usize = 24;
    /// Map used when no path is given
    pub const DEFAULT_MAP: &str = "map/basin.txt";
}
