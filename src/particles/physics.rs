use glam::DVec2;

use crate::constants::particles::{
    BOUNDARY_LOSS, COMPRESSION_STRENGTH, GRAVITY, OBSTACLE_LOSS, SQUEEZE_SHARE, SUPPORT_DAMPING,
};

use super::Particle;

/// Bounce off a wall particle: both components flip and lose speed
pub fn reflect_off_obstacle(particle: &mut Particle) {
    particle.velocity = -particle.velocity * OBSTACLE_LOSS;
}

/// Push `particle` away from `neighbor`
///
/// The force falls off with the squared distance. When the particle is
/// closing in on the neighbor the push goes into the vertical axis,
/// squeezing the water up instead of sideways.
pub fn apply_compression_force(particle: &mut Particle, neighbor_position: DVec2) {
    let offset = particle.position - neighbor_position;
    let dist_sq = offset.length_squared();
    if dist_sq == 0.0 {
        return;
    }

    // Unit vector from the neighbor toward this particle
    let away = offset / dist_sq.sqrt();
    let force = COMPRESSION_STRENGTH / dist_sq;
    let dot = particle.velocity.dot(away);

    if dot < 0.0 {
        particle.velocity.y -= force * dot.abs() * SQUEEZE_SHARE;
    } else {
        particle.velocity += away * force;
    }
}

/// Gravity, damped when the particle above is holding it up
pub fn apply_gravity(particle: &mut Particle, above: Option<&Particle>) {
    particle.velocity.y += GRAVITY;

    if let Some(above) = above {
        if above.velocity.y <= particle.velocity.y {
            particle.velocity.y *= SUPPORT_DAMPING;
        }
    }
}

/// Move by one frame of velocity, bouncing off the grid edges
pub fn integrate(particle: &mut Particle, width: usize, height: usize) {
    particle.position += particle.velocity;

    let max_x = width.saturating_sub(1) as f64;
    let max_y = height.saturating_sub(1) as f64;

    if particle.position.x < 0.0 {
        particle.position.x = 0.0;
        particle.velocity.x = -particle.velocity.x * BOUNDARY_LOSS;
    }
    if particle.position.x >= width as f64 {
        particle.position.x = max_x;
        particle.velocity.x = -particle.velocity.x * BOUNDARY_LOSS;
    }
    if particle.position.y < 0.0 {
        particle.position.y = 0.0;
        particle.velocity.y = -particle.velocity.y * BOUNDARY_LOSS;
    }
    if particle.position.y >= height as f64 {
        particle.position.y = max_y;
        particle.velocity.y = -particle.velocity.y * BOUNDARY_LOSS;
    }
}
