//! Particle effects
//!
//! Short-lived visual debris with their own gravity. Particles never feed back
//! into gameplay, so the collection can be cleared or capped freely.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_PARTICLES, JUMP_PARTICLES};

/// A single particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [u8; 3],
    /// Ticks left before removal
    pub lifetime: i32,
    /// Lifetime at spawn (for fade ratio)
    pub max_lifetime: i32,
    /// Radius at full life
    pub size: u32,
}

impl Particle {
    /// Advance one tick. Returns false once the particle has expired.
    pub fn advance(&mut self, gravity: f32) -> bool {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.lifetime -= 1;
        self.lifetime > 0
    }

    /// Remaining-life fraction in [0, 1]
    pub fn life_ratio(&self) -> f32 {
        if self.max_lifetime <= 0 {
            return 0.0;
        }
        (self.lifetime.max(0) as f32 / self.max_lifetime as f32).clamp(0.0, 1.0)
    }

    /// Opacity scaled by remaining life
    pub fn alpha(&self) -> u8 {
        (255.0 * self.life_ratio()) as u8
    }

    /// Draw radius scaled by remaining life, never below 1
    pub fn render_size(&self) -> u32 {
        ((self.size as f32 * self.life_ratio()) as u32).max(1)
    }
}

/// Velocity, lifetime and size distribution of a burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpec {
    pub count: usize,
    pub vx: (f32, f32),
    pub vy: (f32, f32),
    pub lifetime: (u32, u32),
    pub size: (u32, u32),
}

impl BurstSpec {
    /// Puff under the player on each flap
    pub fn jump() -> Self {
        Self {
            count: JUMP_PARTICLES,
            vx: (-2.0, 2.0),
            vy: (-3.0, -1.0),
            lifetime: (30, 30),
            size: (2, 5),
        }
    }

    /// Radial burst used for scoring and crashes
    pub fn explosion() -> Self {
        Self {
            count: EXPLOSION_PARTICLES,
            vx: (-4.0, 4.0),
            vy: (-4.0, 4.0),
            lifetime: (20, 40),
            size: (2, 5),
        }
    }
}

/// The active particle collection
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    /// Upper bound on live particles (0 disables effects)
    cap: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            cap: usize::MAX,
        }
    }

    /// Limit the live particle count (from settings)
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.particles.truncate(cap);
    }

    /// Append `burst.count` particles at `origin`
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        color: [u8; 3],
        burst: &BurstSpec,
        rng: &mut R,
    ) {
        for _ in 0..burst.count {
            // Draws happen even when capped; the RNG stream is independent of the cap
            let vel = Vec2::new(
                rng.random_range(burst.vx.0..=burst.vx.1),
                rng.random_range(burst.vy.0..=burst.vy.1),
            );
            let lifetime = rng.random_range(burst.lifetime.0..=burst.lifetime.1) as i32;
            let size = rng.random_range(burst.size.0..=burst.size.1);
            if self.particles.len() >= self.cap {
                continue;
            }
            self.particles.push(Particle {
                pos: origin,
                vel,
                color,
                lifetime,
                max_lifetime: lifetime,
                size,
            });
        }
    }

    /// Move every particle and drop the expired ones
    pub fn advance_all(&mut self, gravity: f32) {
        self.particles.retain_mut(|p| p.advance(gravity));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
