//! Collision detection for the player against pipes, boundaries and
//! coins.
//!
//! All gameplay geometry is axis-aligned; only the coin pickup uses a
//! radial (distance) test.

use glam::Vec2;

use super::state::{Pipe, Player};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            top: center.y - height / 2.0,
            bottom: center.y + height / 2.0,
        }
    }
}

/// The player's bounding box at its current position
pub fn player_aabb(player: &Player) -> Aabb {
    Aabb::from_center(player.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/// True if the player's vertical extent crosses the ground line or the
/// top edge. Exactly touching the ground line is still safe; one unit
/// beyond is not.
pub fn out_of_bounds(player: &Player, ground_line: f32) -> bool {
    player.pos.y > ground_line - PLAYER_HEIGHT / 2.0 || player.pos.y < -PLAYER_HEIGHT / 2.0
}

/// Test the player box against both segments of a pipe pair.
///
/// The top segment spans from the canvas top down to `top_height`; the
/// bottom segment from `top_height + gap` to the canvas bottom.
pub fn hits_pipe(player: &Aabb, pipe: &Pipe, gap_height: f32, canvas_height: f32) -> bool {
    let top = Aabb {
        left: pipe.x,
        right: pipe.x + PIPE_WIDTH,
        top: 0.0,
        bottom: pipe.top_height,
    };
    let bottom = Aabb {
        left: pipe.x,
        right: pipe.x + PIPE_WIDTH,
        top: pipe.bottom_top(gap_height),
        bottom: canvas_height,
    };

    let overlaps_top = player.right > top.left && player.left < top.right && player.top < top.bottom;
    let overlaps_bottom =
        player.right > bottom.left && player.left < bottom.right && player.bottom > bottom.top;

    overlaps_top || overlaps_bottom
}

/// Coin pickup: Euclidean distance between centers under the sum of
/// half-widths
pub fn coin_pickup(player_pos: Vec2, coin_pos: Vec2) -> bool {
    player_pos.distance(coin_pos) < PLAYER_WIDTH / 2.0 + COIN_SIZE / 2.0
}
