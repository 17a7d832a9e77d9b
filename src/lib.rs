pub mod config;
pub mod constants;
pub mod error;
pub mod fluid;
pub mod map;
pub mod particles;
pub mod renderer;
pub mod simulation;

pub use config::{FixedSize, FlowModelKind, SimConfig};
pub use error::{SimError, SimResult};
pub use fluid::{Cell, FlowModel, FluidGrid, InjectionPolicy, InjectionReport, WaterLedger};
pub use map::{MapLayout, Tile};
pub use particles::{Particle, ParticleSystem};
pub use renderer::{Frame, FrameSource, TerminalGuard};
pub use simulation::Simulation;
