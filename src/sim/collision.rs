//! Collision detection
//!
//! Everything is an axis-aligned box. Overlap is strict on all four sides so a
//! player sliding exactly along a pipe lip survives.

use serde::{Deserialize, Serialize};

use super::pipes::Pipe;
use crate::config::SimConfig;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test; touching edges do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Vertical limits of the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Player y below this is a crash
    pub ceiling: f32,
    /// Player y above this is a crash
    pub floor: f32,
    /// Bottom pipes extend down to here
    pub height: f32,
}

impl WorldBounds {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            ceiling: config.ceiling,
            floor: config.floor,
            height: config.world_height,
        }
    }

    /// True when a player at `y` has left the playable band
    #[inline]
    pub fn out_of_bounds(&self, y: f32) -> bool {
        y < self.ceiling || y > self.floor
    }
}

/// Does the player box hit any pipe or leave the playfield?
pub fn check<'a, I>(player: &Rect, pipes: I, bounds: &WorldBounds) -> bool
where
    I: IntoIterator<Item = &'a Pipe>,
{
    if bounds.out_of_bounds(player.y) {
        return true;
    }
    pipes.into_iter().any(|pipe| {
        player.intersects(&pipe.top_rect()) || player.intersects(&pipe.bottom_rect(bounds.height))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

    fn player_at(x: f32, y: f32) -> Rect {
        Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn bounds() -> WorldBounds {
        WorldBounds::from_config(&SimConfig::default())
    }

    const NO_PIPES: [Pipe; 0] = [];

    fn pipe(x: f32, height: f32) -> Pipe {
        Pipe::new(x, height, 180.0, 2.4)
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edges on each side
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(-10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_bounds_edges() {
        let b = bounds();
        assert!(check(&player_at(168.0, -33.0), &NO_PIPES, &b));
        assert!(!check(&player_at(168.0, -32.0), &NO_PIPES, &b));
        assert!(!check(&player_at(168.0, 520.0), &NO_PIPES, &b));
        assert!(check(&player_at(168.0, 521.0), &NO_PIPES, &b));
    }

    #[test]
    fn test_top_and_bottom_pipe_hits() {
        let b = bounds();
        // Gap spans y 100..280
        let pipes = [pipe(150.0, 100.0)];
        assert!(check(&player_at(168.0, 90.0), &pipes, &b));
        assert!(check(&player_at(168.0, 260.0), &pipes, &b));
        assert!(!check(&player_at(168.0, 150.0), &pipes, &b));
        // Exactly flush with both lips
        assert!(!check(&player_at(168.0, 100.0), &pipes, &b));
        assert!(!check(&player_at(168.0, 280.0 - PLAYER_HEIGHT), &pipes, &b));
    }

    #[test]
    fn test_horizontal_edge_touch_is_safe() {
        let b = bounds();
        // Pipe ends exactly where the player starts
        let pipes = [pipe(168.0 - 52.0, 100.0)];
        assert!(!check(&player_at(168.0, 10.0), &pipes, &b));
        // Pipe starts exactly where the player ends
        let pipes = [pipe(168.0 + PLAYER_WIDTH, 100.0)];
        assert!(!check(&player_at(168.0, 10.0), &pipes, &b));
    }

    #[test]
    fn test_any_pipe_in_list_counts() {
        let b = bounds();
        let pipes = [pipe(400.0, 100.0), pipe(160.0, 50.0)];
        assert!(check(&player_at(168.0, 40.0), &pipes, &b));
        assert!(!check(&player_at(168.0, 120.0), &pipes, &b));
    }
}
