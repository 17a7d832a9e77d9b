//! One simulation instance: state, flow model, inlet and ledger
//!
//! Each call to [`Simulation::step`] runs a whole frame in order:
//! injection (when due), flow step, accounting. Rendering only ever sees
//! the state between steps.

use crate::config::{FlowModelKind, SimConfig};
use crate::fluid::{
    ConservativeAdvection, FlowModel, FluidGrid, InjectionPolicy, VelocityField, WaterLedger,
};
use crate::map::MapLayout;
use crate::particles::ParticleSystem;
use crate::renderer::{Frame, FrameSource};

/// Simulation state for the selected flow model
enum World {
    /// Cell grid stepped by a flow model and fed by the inlet
    Grid {
        grid: FluidGrid,
        flow: FlowModel,
        injection: InjectionPolicy,
    },
    /// Fixed particle population, no inlet
    Particles(ParticleSystem),
}

pub struct Simulation {
    world: World,
    ledger: WaterLedger,
    debug_render: bool,
}

impl Simulation {
    /// Grid simulation from an existing grid
    pub fn with_grid(grid: FluidGrid, flow: FlowModel, injection: InjectionPolicy) -> Self {
        let ledger = WaterLedger::with_initial_water(grid.total_water());
        Self {
            world: World::Grid {
                grid,
                flow,
                injection,
            },
            ledger,
            debug_render: false,
        }
    }

    /// Particle simulation from an existing particle system
    pub fn with_particles(system: ParticleSystem) -> Self {
        let ledger = WaterLedger::with_initial_water(system.total_water());
        Self {
            world: World::Particles(system),
            ledger,
            debug_render: false,
        }
    }

    /// Build the initial state from a map and a config
    pub fn from_layout(layout: &MapLayout, config: &SimConfig) -> Self {
        log::info!("flow model: {:?}", config.flow_model);

        let flow = match config.flow_model {
            FlowModelKind::ConservativeAdvection => Some(FlowModel::from(ConservativeAdvection::new())),
            FlowModelKind::VelocityField => Some(FlowModel::from(
                VelocityField::new().with_legacy_bounce_doubling(config.legacy_bounce_doubling),
            )),
            FlowModelKind::Particles => None,
        };

        let simulation = match flow {
            Some(flow) => {
                let injection = match config.seed {
                    Some(seed) => InjectionPolicy::seeded(seed, config.injection_interval),
                    None => InjectionPolicy::from_entropy(config.injection_interval),
                };
                log::info!("inlet fires every {} frames", injection.interval());
                Self::with_grid(layout.to_grid(), flow, injection)
            }
            None => Self::with_particles(layout.to_particles()),
        };
        simulation.with_debug_render(config.debug_render)
    }

    pub fn with_debug_render(mut self, debug_render: bool) -> Self {
        self.debug_render = debug_render;
        self
    }

    /// Run one frame and return its number
    pub fn step(&mut self) -> u64 {
        let frame = self.ledger.begin_frame();

        let total_water = match &mut self.world {
            World::Grid {
                grid,
                flow,
                injection,
            } => {
                let report = injection.tick(frame, grid, &mut self.ledger);
                if report.cells_touched > 0 {
                    log::debug!(
                        "frame {}: injected {:.3} over {} cells",
                        frame,
                        report.added,
                        report.cells_touched
                    );
                }
                flow.step(grid, &mut self.ledger);
                grid.total_water()
            }
            World::Particles(system) => {
                system.step(&mut self.ledger);
                system.total_water()
            }
        };

        self.ledger.end_frame(total_water);
        frame
    }

    /// Compose the current state as text
    pub fn render(&self) -> Frame {
        Frame::compose(self.source(), &self.ledger, self.debug_render)
    }

    fn source(&self) -> &dyn FrameSource {
        match &self.world {
            World::Grid { grid, .. } => grid as &dyn FrameSource,
            World::Particles(system) => system,
        }
    }

    pub fn ledger(&self) -> &WaterLedger {
        &self.ledger
    }

    pub fn grid(&self) -> Option<&FluidGrid> {
        match &self.world {
            World::Grid { grid, .. } => Some(grid),
            World::Particles(_) => None,
        }
    }

    pub fn particles(&self) -> Option<&ParticleSystem> {
        match &self.world {
            World::Grid { .. } => None,
            World::Particles(system) => Some(system),
        }
    }

    pub fn model_name(&self) -> &'static str {
        match &self.world {
            World::Grid { flow, .. } => flow.name(),
            World::Particles(_) => "particles",
        }
    }
}
