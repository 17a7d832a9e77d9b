/// Grid fluid simulation
///
/// Cell store, water bookkeeping, the top-row inlet and the two flow
/// models that step the grid. The particle flavor of the velocity model
/// lives in `crate::particles`.

pub mod grid;
pub mod ledger;
pub mod injection;
pub mod advection;
pub mod velocity_field;

pub use grid::{Cell, FluidGrid};
pub use ledger::WaterLedger;
pub use injection::{InjectionPolicy, InjectionReport};
pub use advection::ConservativeAdvection;
pub use velocity_field::{Collision, VelocityField};

/// Flow model stepping a [`FluidGrid`], picked once per simulation
#[derive(Debug, Clone, Copy)]
pub enum FlowModel {
    ConservativeAdvection(ConservativeAdvection),
    VelocityField(VelocityField),
}

impl FlowModel {
    pub fn name(&self) -> &'static str {
        match self {
            FlowModel::ConservativeAdvection(_) => "conservative-advection",
            FlowModel::VelocityField(_) => "velocity-field",
        }
    }

    /// Advance the grid one frame
    pub fn step(&self, grid: &mut FluidGrid, ledger: &mut WaterLedger) {
        match self {
            FlowModel::ConservativeAdvection(model) => model.step(grid, ledger),
            FlowModel::VelocityField(model) => model.step(grid, ledger),
        }
    }
}

impl From<ConservativeAdvection> for FlowModel {
    fn from(model: ConservativeAdvection) -> Self {
        FlowModel::ConservativeAdvection(model)
    }
}

impl From<VelocityField> for FlowModel {
    fn from(model: VelocityField) -> Self {
        FlowModel::VelocityField(model)
    }
}
