//! Session state and core simulation types
//!
//! One [`GameState`] value owns everything a run needs: the player, both
//! entity stores, the input flags, the three timers, the seeded RNG, and
//! the phase machine. External code holds one instance and talks to it
//! through `start`/`shoot`/`set_input`/`frame_state`/`drain_events`;
//! the per-frame advance lives in [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Circle, Rect};
use super::timers::SessionTimers;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
///
/// `Idle` is the initial phase; both terminal phases stay put until an
/// explicit `start()` re-enters `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed but never started, or waiting after a restartable end
    Idle,
    /// Active gameplay
    Running,
    /// Player collided with an enemy
    GameOver,
    /// Player survived the full countdown
    Victory,
}

/// Terminal notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameOver { final_score: u64 },
    Victory { final_score: u64 },
}

/// Logical input controls, mappable from keyboard or pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

/// Held-state of the five controls, mirroring external key state
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Movement per frame, per pressed axis
    pub speed: f32,
}

impl Player {
    /// Player at the session spawn point: bottom center of the surface
    pub fn spawn(speed: f32) -> Self {
        Self {
            pos: Vec2::new(SURFACE_WIDTH / 2.0, SURFACE_HEIGHT - PLAYER_HEIGHT),
            speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Collision shape: the circle inscribed on the box width
    pub fn hitbox(&self) -> Circle {
        Circle {
            center: self.bounds().center(),
            radius: PLAYER_WIDTH / 2.0,
        }
    }

    /// Where bullets leave the ship: top edge, horizontally centered
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
            self.pos.y,
        )
    }
}

/// A player bullet
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
}

impl Enemy {
    /// New enemy just above the top edge at the given column
    pub fn spawn(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, -ENEMY_SIZE),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(ENEMY_SIZE, ENEMY_SIZE))
    }
}

/// Read-only per-frame snapshot for rendering
#[derive(Debug)]
pub struct FrameState<'a> {
    pub player: Rect,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub score: u64,
    pub remaining_secs: u32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Whole seconds survived this run
    pub elapsed_secs: u32,
    /// Current enemy descent per frame
    pub enemy_speed: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub input: InputState,
    pub timers: SessionTimers,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            elapsed_secs: 0,
            enemy_speed: tuning.initial_enemy_speed,
            player: Player::spawn(tuning.player_speed),
            bullets: Vec::new(),
            enemies: Vec::new(),
            input: InputState::default(),
            timers: SessionTimers::new(tuning.speed_ramp_interval, tuning.shoot_delay),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whole seconds left until victory, floored at zero
    pub fn remaining_secs(&self) -> u32 {
        self.tuning.victory_time_secs.saturating_sub(self.elapsed_secs)
    }

    /// Begin a fresh run.
    ///
    /// Valid from `Idle` or either terminal phase; a no-op while already
    /// `Running`. Resets score, clock, enemy speed, player position and
    /// both entity stores, then arms the session timers. Input flags are
    /// left alone: they mirror key state the session does not own.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.score = 0;
        self.elapsed_secs = 0;
        self.enemy_speed = self.tuning.initial_enemy_speed;
        self.player = Player::spawn(self.tuning.player_speed);
        self.bullets.clear();
        self.enemies.clear();
        self.timers.arm_session();
        self.phase = GamePhase::Running;
        log::info!("session started (seed {})", self.seed);
    }

    /// Emit one bullet from the player's muzzle. Ignored unless running.
    pub fn shoot(&mut self) {
        if !self.is_running() {
            return;
        }
        self.bullets.push(Bullet {
            pos: self.player.muzzle(),
        });
    }

    /// Record a press/release of one logical control.
    ///
    /// Fire has press-edge semantics: the transition to pressed emits an
    /// immediate shot and arms the autofire cadence; release cancels it.
    pub fn set_input(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Left => self.input.left = pressed,
            Control::Right => self.input.right = pressed,
            Control::Up => self.input.up = pressed,
            Control::Down => self.input.down = pressed,
            Control::Fire => {
                let was_held = self.input.fire;
                self.input.fire = pressed;
                if pressed && !was_held {
                    self.shoot();
                    self.timers.autofire.arm();
                } else if !pressed && was_held {
                    self.timers.autofire.cancel();
                }
            }
        }
    }

    /// Read-only snapshot for the presentation layer
    pub fn frame_state(&self) -> FrameState<'_> {
        FrameState {
            player: self.player.bounds(),
            bullets: &self.bullets,
            enemies: &self.enemies,
            score: self.score,
            remaining_secs: self.remaining_secs(),
        }
    }

    /// Take all pending terminal notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Defeat transition: stop every timer, freeze state, notify
    pub(crate) fn game_over(&mut self) {
        self.timers.cancel_all();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "game over after {}s, final score {}",
            self.elapsed_secs,
            self.score
        );
    }

    /// Victory transition: stop every timer, freeze state, notify
    pub(crate) fn declare_victory(&mut self) {
        self.timers.cancel_all();
        self.phase = GamePhase::Victory;
        self.events.push(GameEvent::Victory {
            final_score: self.score,
        });
        log::info!("victory with final score {}", self.score);
    }
}
