//! Per-tick simulation update
//!
//! One tick advances the whole world: player physics, spawn cadence,
//! coin pickup, pipe/coin/scenery scroll and pruning, then the failure
//! checks. The function is pure with respect to platform state; the
//! flow controller reacts to the returned events.

use super::collision;
use super::spawn::{spawn_pipe_pair, spawn_scenery};
use super::state::{GameEvent, SessionState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Apply the jump impulse this tick
    pub jump: bool,
}

/// Advance the session by one tick. Only called while the flow
/// controller is in the `Playing` phase.
pub fn tick(state: &mut SessionState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.jump {
        state.player.jump();
    }

    // Velocity integration and derived tilt
    state.player.integrate();

    // Pipe + coin spawn cadence
    state.tick_count += 1;
    if state.tick_count.is_multiple_of(PIPE_SPAWN_INTERVAL) {
        spawn_pipe_pair(state);
    }

    // Coin pickup
    let player_pos = state.player.pos;
    let before = state.coins.len();
    state
        .coins
        .retain(|coin| !collision::coin_pickup(player_pos, coin.pos));
    for _ in state.coins.len()..before {
        state.score += COIN_BOUNTY;
        events.push(GameEvent::CoinCollected {
            bounty: COIN_BOUNTY,
        });
    }

    // Advance pipes, latching the one-shot pass cue
    for pipe in &mut state.pipes {
        pipe.x -= SCROLL_SPEED;
        if !pipe.passed && pipe.trailing_edge() < player_pos.x {
            pipe.passed = true;
            events.push(GameEvent::ObstaclePassed);
        }
    }
    // Coins move in lockstep with their pipes
    for coin in &mut state.coins {
        coin.pos.x -= SCROLL_SPEED;
    }
    state
        .pipes
        .retain(|pipe| pipe.trailing_edge() + PIPE_PRUNE_MARGIN > 0.0);
    state.coins.retain(|coin| coin.pos.x + COIN_SIZE > 0.0);

    // Decorative scenery: spawn rolls, drift, prune
    spawn_scenery(state);
    for cloud in &mut state.clouds {
        cloud.pos.x += cloud.speed;
    }
    state.clouds.retain(|cloud| cloud.pos.x + cloud.size * 2.0 > 0.0);
    for tree in &mut state.trees {
        tree.x -= SCROLL_SPEED * TREE_PARALLAX;
    }
    state.trees.retain(|tree| tree.x + tree.size > 0.0);

    // Boundary failure
    if collision::out_of_bounds(&state.player, state.viewport.ground_line()) {
        events.push(GameEvent::GameOver);
        return events;
    }

    // Pipe collision; the first overlapping pipe ends the game
    let player_box = collision::player_aabb(&state.player);
    let gap = state.gap_height();
    let canvas_height = state.viewport.height;
    for pipe in &state.pipes {
        if collision::hits_pipe(&player_box, pipe, gap, canvas_height) {
            events.push(GameEvent::GameOver);
            break;
        }
    }

    events
}
