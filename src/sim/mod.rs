//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame steps only
//! - Seeded RNG only
//! - Stable iteration order (reverse insertion order for collision scans)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Circle, Rect, circle_rect_overlap, rects_overlap};
pub use state::{
    Bullet, Control, Enemy, FrameState, GameEvent, GamePhase, GameState, InputState, Player,
};
pub use tick::tick;
pub use timers::{IntervalTimer, SessionTimers};
