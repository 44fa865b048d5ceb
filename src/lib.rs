//! Holdout - a fixed-duration survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, session state machine)
//! - `tuning`: Data-driven game balance
//!
//! The binary in `main.rs` is a thin terminal front-end: it maps key events
//! to logical inputs, drives `sim::tick` once per frame, and renders the
//! per-frame snapshot. All gameplay decisions live in `sim`.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Fixed game geometry
pub mod consts {
    /// Logical play surface (portrait)
    pub const SURFACE_WIDTH: f32 = 480.0;
    pub const SURFACE_HEIGHT: f32 = 640.0;

    /// Player ship bounding box
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Bullet dimensions and per-frame climb
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_STEP: f32 = 7.0;

    /// Enemies are square
    pub const ENEMY_SIZE: f32 = 30.0;
}
