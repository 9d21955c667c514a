//! Session state and core simulation types
//!
//! Everything here is per-session: it is wholly discarded and rebuilt
//! on reset. Only score/high-score/mute/consent outlive a session, and
//! those live in `prefs`, not here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Viewport;
use crate::consts::*;
use crate::rotation_for_velocity;

/// The player avatar. X is fixed for the whole session; only y,
/// velocity and the derived tilt change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub velocity_y: f32,
    /// Cosmetic tilt in degrees, always `clamp(velocity * gain)`
    pub rotation_deg: f32,
}

impl Player {
    /// Player at the fixed start position for the given viewport
    pub fn at_start(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 4.0, viewport.height / 2.0),
            velocity_y: 0.0,
            rotation_deg: 0.0,
        }
    }

    /// Assign the jump impulse. An assignment, not an accumulation, so
    /// repeated inputs within one frame are harmless.
    pub fn jump(&mut self) {
        self.velocity_y = JUMP_IMPULSE;
    }

    /// One step of velocity integration plus the derived tilt
    pub fn integrate(&mut self) {
        self.velocity_y += GRAVITY;
        self.pos.y += self.velocity_y;
        self.rotation_deg = rotation_for_velocity(self.velocity_y);
    }
}

/// A pipe pair: top and bottom segments sharing one x and one gap.
/// The bottom segment's top edge is always `top_height + gap_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub top_height: f32,
    /// One-shot pass cue latch; passing awards no points
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, top_height: f32) -> Self {
        Self {
            x,
            top_height,
            passed: false,
        }
    }

    /// X of the trailing (right) edge of the pipe body
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Top edge of the bottom segment
    #[inline]
    pub fn bottom_top(&self, gap_height: f32) -> f32 {
        self.top_height + gap_height
    }

    /// Vertical midpoint of the gap
    #[inline]
    pub fn gap_center_y(&self, gap_height: f32) -> f32 {
        self.top_height + gap_height / 2.0
    }
}

/// A collectible coin, spawned centered in its pipe's gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub pos: Vec2,
}

/// Cloud silhouette variant (render tint only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudTint {
    White,
    Dark,
}

/// A decorative cloud with its own drift speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
    /// Leftward drift per tick (negative)
    pub speed: f32,
    pub tint: CloudTint,
}

/// Tree silhouette variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeVariant {
    Pine,
    Round,
}

/// A decorative tree on the ground strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub x: f32,
    pub size: f32,
    pub variant: TreeVariant,
}

/// Outcomes of a tick that the flow controller must react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A coin was collected; score already incremented by `bounty`
    CoinCollected { bounty: u64 },
    /// A pipe's trailing edge crossed left of the player (sound cue only)
    ObstaclePassed,
    /// Collision or out-of-bounds; the session is over
    GameOver,
}

/// Complete per-session simulation state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    pub player: Player,
    pub pipes: Vec<Pipe>,
    pub coins: Vec<Coin>,
    pub clouds: Vec<Cloud>,
    pub trees: Vec<Tree>,
    /// Running score; only ever increases, in coin-bounty steps
    pub score: u64,
    /// Simulation tick counter (drives the spawn cadence)
    pub tick_count: u64,
    pub rng: Pcg32,
}

impl SessionState {
    /// Create a fresh session for the given seed and viewport
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            viewport,
            player: Player::at_start(viewport),
            pipes: Vec::new(),
            coins: Vec::new(),
            clouds: Vec::new(),
            trees: Vec::new(),
            score: 0,
            tick_count: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Rebuild the session from scratch. Idempotent: repeated calls
    /// without intervening ticks yield identical state.
    pub fn reset(&mut self) {
        *self = Self::new(self.seed, self.viewport);
    }

    /// Apply new surface dimensions. Gap height and ground line are
    /// derived from the viewport, so they follow automatically.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Gap height for the current viewport
    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.viewport.gap_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_start_position() {
        let vp = Viewport::new(480.0, 640.0);
        let player = Player::at_start(vp);
        assert_eq!(player.pos, Vec2::new(120.0, 320.0));
        assert_eq!(player.velocity_y, 0.0);
        assert_eq!(player.rotation_deg, 0.0);
    }

    #[test]
    fn test_jump_is_assignment() {
        let mut player = Player::at_start(Viewport::default());
        player.velocity_y = 42.0;
        player.jump();
        assert_eq!(player.velocity_y, JUMP_IMPULSE);
        // A second jump in the same frame changes nothing
        player.jump();
        assert_eq!(player.velocity_y, JUMP_IMPULSE);
    }

    #[test]
    fn test_pipe_derived_edges() {
        let pipe = Pipe::new(480.0, 200.0);
        let gap = 179.2;
        assert_eq!(pipe.bottom_top(gap), 200.0 + gap);
        assert_eq!(pipe.gap_center_y(gap), 200.0 + gap / 2.0);
        assert_eq!(pipe.trailing_edge(), 480.0 + PIPE_WIDTH);
    }

    #[test]
    fn test_reset_idempotent() {
        let vp = Viewport::new(480.0, 640.0);
        let mut state = SessionState::new(7, vp);
        state.score = 300;
        state.tick_count = 99;
        state.pipes.push(Pipe::new(100.0, 150.0));
        state.reset();
        let after_first = state.clone();
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_count, 0);
        assert!(state.pipes.is_empty());
        assert!(state.coins.is_empty());
        assert!(state.clouds.is_empty());
        assert!(state.trees.is_empty());
        assert_eq!(state.player, after_first.player);
        assert_eq!(state.rng, after_first.rng);
    }
}
