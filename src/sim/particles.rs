//! Particle system
//!
//! Particles are cosmetic and never influence gameplay. They are spawned in
//! fixed-size bursts and fade out by a constant decay per tick.

use glam::Vec2;
use rand::Rng;

use super::state::{Color, Particle};
use crate::config::ParticleConfig;

/// Spawn a burst at `center`, truncated so the live total stays under the cap
pub fn burst<R: Rng + ?Sized>(
    center: Vec2,
    color: Color,
    live: usize,
    config: &ParticleConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let count = config
        .batch_size
        .min(config.max_particles.saturating_sub(live));

    (0..count)
        .map(|_| Particle {
            x: center.x,
            y: center.y,
            vx: (rng.random::<f32>() - 0.5) * 2.0 * config.spread,
            vy: (rng.random::<f32>() - 0.5) * 2.0 * config.spread,
            color,
            life: 1.0,
            decay: config.decay,
            size: config.min_size + rng.random::<f32>() * (config.max_size - config.min_size),
        })
        .collect()
}

/// Advance one particle by a tick; `None` once it has faded out
pub fn step(particle: &Particle, damping: f32) -> Option<Particle> {
    let life = particle.life - particle.decay;
    if life <= 0.0 {
        return None;
    }
    Some(Particle {
        x: particle.x + particle.vx,
        y: particle.y + particle.vy,
        vx: particle.vx * damping,
        vy: particle.vy * damping,
        life,
        size: particle.size * damping,
        ..particle.clone()
    })
}
