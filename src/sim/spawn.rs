//! Obstacle, collectible and scenery spawning
//!
//! Pipe pairs (with their paired coin) spawn on a fixed tick cadence;
//! clouds and trees spawn probabilistically every tick. All randomness
//! comes from the session RNG so spawn sequences are reproducible.

use glam::Vec2;
use rand::Rng;

use super::state::{Cloud, CloudTint, Coin, Pipe, SessionState, Tree, TreeVariant};
use crate::consts::*;

/// Append a pipe pair at the right viewport edge with a uniformly
/// random top-segment height, plus a coin centered in the new gap.
pub fn spawn_pipe_pair(state: &mut SessionState) {
    let width = state.viewport.width;
    let gap = state.gap_height();

    // Integer heights, margin away from both edges so the gap is
    // never flush with top or bottom
    let min_height = PIPE_SPAWN_MARGIN as i32;
    let max_height = (state.viewport.height - gap - PIPE_SPAWN_MARGIN) as i32;
    let top_height = state.rng.random_range(min_height..=max_height.max(min_height)) as f32;

    let pipe = Pipe::new(width, top_height);
    let coin_y = pipe.gap_center_y(gap);
    state.pipes.push(pipe);
    state.coins.push(Coin {
        pos: Vec2::new(width + PIPE_WIDTH / 2.0, coin_y),
    });
}

/// Roll the per-tick scenery spawns (white cloud, dark cloud, tree)
pub fn spawn_scenery(state: &mut SessionState) {
    let width = state.viewport.width;
    let height = state.viewport.height;

    if state.rng.random::<f32>() < 0.01 {
        let y = state.rng.random::<f32>() * height * 0.5;
        let size = state.rng.random::<f32>() * 40.0 + 30.0;
        let speed = -(state.rng.random::<f32>() * 0.5 + 0.2);
        state.clouds.push(Cloud {
            pos: Vec2::new(width, y),
            size,
            speed,
            tint: CloudTint::White,
        });
    }

    if state.rng.random::<f32>() < 0.005 {
        let y = state.rng.random::<f32>() * height * 0.6;
        let size = state.rng.random::<f32>() * 50.0 + 40.0;
        let speed = -(state.rng.random::<f32>() * 0.2 + 0.1);
        state.clouds.push(Cloud {
            pos: Vec2::new(width, y),
            size,
            speed,
            tint: CloudTint::Dark,
        });
    }

    if state.rng.random::<f32>() < 0.02 {
        let size = state.rng.random::<f32>() * 30.0 + 30.0;
        let variant = if state.rng.random::<f32>() > 0.5 {
            TreeVariant::Pine
        } else {
            TreeVariant::Round
        };
        state.trees.push(Tree {
            x: width,
            size,
            variant,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;

    #[test]
    fn test_pipe_spawn_within_margins() {
        let vp = Viewport::new(480.0, 640.0);
        let gap = vp.gap_height();
        for seed in 0..50 {
            let mut state = SessionState::new(seed, vp);
            spawn_pipe_pair(&mut state);
            let pipe = &state.pipes[0];
            assert!(pipe.top_height >= PIPE_SPAWN_MARGIN);
            assert!(pipe.top_height <= vp.height - gap - PIPE_SPAWN_MARGIN);
            assert_eq!(pipe.x, vp.width);
        }
    }

    #[test]
    fn test_coin_centered_in_gap() {
        let vp = Viewport::new(480.0, 640.0);
        let mut state = SessionState::new(11, vp);
        spawn_pipe_pair(&mut state);
        let pipe = state.pipes[0];
        let coin = state.coins[0];
        assert_eq!(coin.pos.y, pipe.gap_center_y(vp.gap_height()));
        assert_eq!(coin.pos.x, pipe.x + PIPE_WIDTH / 2.0);
    }

    #[test]
    fn test_spawn_sequence_deterministic() {
        let vp = Viewport::new(480.0, 640.0);
        let mut a = SessionState::new(12345, vp);
        let mut b = SessionState::new(12345, vp);
        for _ in 0..10 {
            spawn_pipe_pair(&mut a);
            spawn_scenery(&mut a);
            spawn_pipe_pair(&mut b);
            spawn_scenery(&mut b);
        }
        assert_eq!(a.pipes, b.pipes);
        assert_eq!(a.clouds, b.clouds);
        assert_eq!(a.trees, b.trees);
    }
}
