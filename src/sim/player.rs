//! The player body
//!
//! x never changes during a run; all motion is vertical.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::SimConfig;
use crate::consts::*;

/// The controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the collision box
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
    /// Visual tilt in degrees, derived from velocity
    pub rotation: f32,
    /// Idle animation phase (radians)
    pub idle_phase: f32,
    /// Current idle bob offset from `base_y`
    pub bob_offset: f32,
    /// Rest height the idle bob oscillates around
    pub base_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y))
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity: 0.0,
            rotation: 0.0,
            idle_phase: 0.0,
            bob_offset: 0.0,
            base_y: pos.y,
        }
    }

    /// Flap: replace velocity with the upward impulse
    pub fn jump(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Advance one tick
    ///
    /// Before the first flap the body only bobs around `base_y`; velocity is
    /// left untouched.
    pub fn update(&mut self, has_started: bool, config: &SimConfig) {
        if has_started {
            self.velocity += config.gravity;
            self.pos.y += self.velocity;
            self.rotation = rotation_for_velocity(self.velocity);
        } else {
            self.idle_phase += IDLE_PHASE_STEP;
            self.bob_offset = self.idle_phase.sin() * IDLE_BOB_AMPLITUDE;
            self.pos.y = self.base_y + self.bob_offset;
        }
    }

    /// Collision box
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT / 2.0)
    }

    /// Where flap particles come out
    pub fn lower_center(&self) -> Vec2 {
        self.pos + Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT)
    }
}

/// Tilt for a given vertical velocity, clamped to ±30°
#[inline]
pub fn rotation_for_velocity(velocity: f32) -> f32 {
    (velocity * ROTATION_PER_VELOCITY).clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_bob_tracks_phase() {
        let config = SimConfig::default();
        let mut player = Player::default();

        for tick in 1..=50 {
            player.update(false, &config);
            let phase = tick as f32 * IDLE_PHASE_STEP;
            assert_eq!(player.velocity, 0.0);
            assert!((player.idle_phase - phase).abs() < 1e-4);
            let expected = PLAYER_SPAWN_Y + 3.0 * player.idle_phase.sin();
            assert!((player.pos.y - expected).abs() < 1e-4);
        }
        assert_eq!(player.pos.x, PLAYER_SPAWN_X);
    }

    #[test]
    fn test_gravity_integration() {
        let config = SimConfig::default();
        let mut player = Player::default();
        player.jump(config.jump_impulse);
        assert_eq!(player.velocity, -10.0);

        let mut prev_v = player.velocity;
        let mut prev_y = player.pos.y;
        for _ in 0..40 {
            player.update(true, &config);
            assert!((player.velocity - (prev_v + 0.75)).abs() < 1e-5);
            assert!((player.pos.y - (prev_y + player.velocity)).abs() < 1e-4);
            assert_eq!(player.rotation, (player.velocity * 3.0).clamp(-30.0, 30.0));
            prev_v = player.velocity;
            prev_y = player.pos.y;
        }
    }

    #[test]
    fn test_rotation_clamps() {
        assert_eq!(rotation_for_velocity(-10.0), -30.0);
        assert_eq!(rotation_for_velocity(4.0), 12.0);
        assert_eq!(rotation_for_velocity(25.0), 30.0);
        assert_eq!(rotation_for_velocity(0.0), 0.0);
    }

    #[test]
    fn test_particle_anchor_points() {
        let player = Player::new(Vec2::new(100.0, 200.0));
        assert_eq!(player.lower_center(), Vec2::new(117.0, 224.0));
        assert_eq!(player.center(), Vec2::new(117.0, 212.0));
        assert_eq!(player.rect(), Rect::new(100.0, 200.0, 34.0, 24.0));
    }
}
