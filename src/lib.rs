//! Soarscape - a flap-through-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions)
//! - `renderer`: Canvas2D pixel-art rendering pipeline
//! - `flow`: Game flow controller (consent/idle/playing/over)
//! - `platform`: Browser/native storage abstraction
//! - `audio`: Fire-and-forget audio clips
//! - `prefs`: Persisted preferences and high score

pub mod audio;
pub mod flow;
pub mod platform;
pub mod prefs;
pub mod renderer;
pub mod sim;

pub use flow::{GameFlow, Phase};
pub use prefs::Prefs;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate - one tick per display frame at 60 Hz
    pub const TICK_HZ: u32 = 60;
    /// Fixed tick duration in seconds
    pub const TICK_DT: f64 = 1.0 / TICK_HZ as f64;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// Player sprite draw size (rendered from a 40x40 bitmap)
    pub const PLAYER_WIDTH: f32 = 55.0;
    pub const PLAYER_HEIGHT: f32 = 55.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Velocity assigned (not added) on a jump
    pub const JUMP_IMPULSE: f32 = -7.0;
    /// Tilt angle per unit of vertical velocity (degrees)
    pub const ROTATION_GAIN: f32 = 5.0;
    pub const ROTATION_MIN_DEG: f32 = -20.0;
    pub const ROTATION_MAX_DEG: f32 = 90.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    /// Gap height as a fraction of canvas height
    pub const PIPE_GAP_FRACTION: f32 = 0.28;
    /// Pipes spawn no closer than this to the top or bottom edge
    pub const PIPE_SPAWN_MARGIN: f32 = 80.0;
    /// Ticks between pipe spawns
    pub const PIPE_SPAWN_INTERVAL: u64 = 120;
    /// Leftward scroll per tick (pipes and coins move in lockstep)
    pub const SCROLL_SPEED: f32 = 2.5;
    /// Head cap of a pipe segment
    pub const PIPE_HEAD_HEIGHT: f32 = 40.0;
    /// Head cap sticks out this far on each side of the body
    pub const PIPE_HEAD_OVERHANG: f32 = 8.0;
    /// Extra off-screen allowance before a pipe is pruned
    pub const PIPE_PRUNE_MARGIN: f32 = 16.0;

    /// Coin draw size (rendered from a 20x20 bitmap)
    pub const COIN_SIZE: f32 = 30.0;
    /// Score awarded per coin pickup
    pub const COIN_BOUNTY: u64 = 100;

    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Trees scroll at this multiple of the pipe speed (parallax)
    pub const TREE_PARALLAX: f32 = 0.5;
}

/// Viewport dimensions in canvas pixels.
///
/// Size-derived values (gap height, ground line) are recomputed from
/// this whenever the drawing surface resizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical open space between a pipe pair's segments
    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.height * consts::PIPE_GAP_FRACTION
    }

    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.height - consts::GROUND_HEIGHT
    }
}

/// Clamp the cosmetic tilt derived from vertical velocity
#[inline]
pub fn rotation_for_velocity(velocity_y: f32) -> f32 {
    (velocity_y * consts::ROTATION_GAIN).clamp(consts::ROTATION_MIN_DEG, consts::ROTATION_MAX_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_derived_values() {
        let vp = Viewport::new(480.0, 640.0);
        assert!((vp.gap_height() - 640.0 * 0.28).abs() < f32::EPSILON);
        assert!((vp.ground_line() - 560.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rotation_clamped() {
        assert_eq!(rotation_for_velocity(-100.0), -20.0);
        assert_eq!(rotation_for_velocity(100.0), 90.0);
        assert_eq!(rotation_for_velocity(2.0), 10.0);
    }
}
