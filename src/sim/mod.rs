//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Fixed per-tick integration only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, coin_pickup, hits_pipe, out_of_bounds, player_aabb};
pub use spawn::{spawn_pipe_pair, spawn_scenery};
pub use state::{
    Cloud, CloudTint, Coin, GameEvent, Pipe, Player, SessionState, Tree, TreeVariant,
};
pub use tick::{TickInput, tick};
