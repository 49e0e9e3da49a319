//! Pipe spawning, scrolling, recycling and scoring

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::SimConfig;
use crate::consts::{HIGHLIGHT_TICKS, PIPE_WIDTH};

/// A top/bottom pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Height of the top pipe (where the gap begins)
    pub height: f32,
    /// Vertical size of the gap
    pub gap: f32,
    /// Leftward speed per tick
    pub speed: f32,
    pub scored: bool,
    /// Glow after being passed
    pub highlight: bool,
    /// Ticks of glow left
    pub highlight_ticks: u32,
}

impl Pipe {
    pub fn new(x: f32, height: f32, gap: f32, speed: f32) -> Self {
        Self {
            x,
            height,
            gap,
            speed,
            scored: false,
            highlight: false,
            highlight_ticks: 0,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// y where the bottom pipe starts
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.height + self.gap
    }

    /// Vertical middle of the opening
    pub fn gap_center(&self) -> Vec2 {
        Vec2::new(self.x + PIPE_WIDTH / 2.0, self.height + self.gap / 2.0)
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, PIPE_WIDTH, self.height)
    }

    pub fn bottom_rect(&self, world_height: f32) -> Rect {
        let y = self.gap_bottom();
        Rect::new(self.x, y, PIPE_WIDTH, world_height - y)
    }

    /// Scroll left and age the highlight
    pub fn advance(&mut self) {
        self.x -= self.speed;
        if self.highlight {
            self.highlight_ticks = self.highlight_ticks.saturating_sub(1);
            if self.highlight_ticks == 0 {
                self.highlight = false;
            }
        }
    }

    fn mark_scored(&mut self) {
        self.scored = true;
        self.highlight = true;
        self.highlight_ticks = HIGHLIGHT_TICKS;
    }
}

/// A pipe that was just passed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPipe {
    pub x: f32,
    /// Where the score burst goes
    pub gap_center: Vec2,
}

/// The live pipe queue, ordered by x ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeManager {
    pipes: VecDeque<Pipe>,
}

impl PipeManager {
    /// Fresh queue for a new run
    pub fn new<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Self {
        let mut manager = Self {
            pipes: VecDeque::with_capacity(config.pipe_count),
        };
        for i in 0..config.pipe_count.max(1) {
            let x = config.first_spawn_x + i as f32 * config.pipe_spacing;
            manager.spawn(x, config, rng);
        }
        manager
    }

    /// Append one pipe at `x` with a random gap offset
    pub fn spawn<R: Rng + ?Sized>(&mut self, x: f32, config: &SimConfig, rng: &mut R) {
        let [min, max] = config.gap_range;
        let height = rng.random_range(min..=max) as f32;
        self.pipes
            .push_back(Pipe::new(x, height, config.gap_height, config.obstacle_speed));
    }

    /// Scroll every pipe one tick
    pub fn advance_all(&mut self) {
        for pipe in &mut self.pipes {
            pipe.advance();
        }
    }

    /// Replace pipes that have fully left the screen. Returns true if any were
    /// recycled. The queue length never changes.
    pub fn recycle_if_needed<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) -> bool {
        let mut recycled = false;
        while self.pipes.front().is_some_and(|p| p.right() < 0.0) {
            self.pipes.pop_front();
            let x = match self.pipes.back() {
                Some(last) => config.respawn_x.max(last.x + config.pipe_spacing),
                None => config.respawn_x,
            };
            self.spawn(x, config, rng);
            log::debug!("Recycled pipe, respawned at x={x}");
            recycled = true;
        }
        recycled
    }

    /// Mark every unscored pipe whose right edge is behind `player_x`
    pub fn score_pass(&mut self, player_x: f32) -> Vec<ScoredPipe> {
        let mut scored = Vec::new();
        for pipe in self.pipes.iter_mut() {
            if !pipe.scored && pipe.right() < player_x {
                pipe.mark_scored();
                scored.push(ScoredPipe {
                    x: pipe.x,
                    gap_center: pipe.gap_center(),
                });
            }
        }
        scored
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    /// Lowest-x pipe
    pub fn lead(&self) -> Option<&Pipe> {
        self.pipes.front()
    }

    pub fn lead_mut(&mut self) -> Option<&mut Pipe> {
        self.pipes.front_mut()
    }

    /// First pipe the player has not yet cleared
    pub fn next_ahead(&self, player_x: f32) -> Option<&Pipe> {
        self.pipes.iter().find(|p| p.right() >= player_x)
    }
}
