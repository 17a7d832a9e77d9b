pub mod particle;
pub mod spatial_index;
pub mod physics;
pub mod system;

pub use particle::Particle;
pub use spatial_index::ParticleIndex;
pub use system::ParticleSystem;
