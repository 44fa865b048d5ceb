//! Per-frame simulation advance
//!
//! `tick` is invoked once per animation frame while the session runs.
//! Entity motion uses fixed per-frame steps; `dt` (measured seconds since
//! the previous frame) feeds only the wall-clock timers, so the three
//! cadences stay honest regardless of the host's frame rate.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_rect_overlap, rects_overlap};
use super::state::{Enemy, GamePhase, GameState};
use crate::consts::*;

/// Advance the session by one frame
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    advance_clock(state, dt);
    // A timer may have ended the run; nothing else moves this frame.
    if state.phase != GamePhase::Running {
        return;
    }

    move_player(state);
    advance_bullets(state);
    advance_enemies(state);
    resolve_collisions(state);
}

/// Drive the three session cadences with measured frame time
fn advance_clock(state: &mut GameState, dt: f32) {
    let ramps = state.timers.speed_ramp.advance(dt);
    state.enemy_speed += state.tuning.speed_ramp_step * ramps as f32;

    let seconds = state.timers.countdown.advance(dt);
    for _ in 0..seconds {
        state.elapsed_secs += 1;
        if state.elapsed_secs >= state.tuning.victory_time_secs {
            state.declare_victory();
            return;
        }
    }

    let shots = state.timers.autofire.advance(dt);
    for _ in 0..shots {
        state.shoot();
    }
}

/// Apply held directional input, clamped to the surface on all sides
fn move_player(state: &mut GameState) {
    let input = state.input;
    let speed = state.player.speed;
    let pos = &mut state.player.pos;
    if input.left {
        pos.x -= speed;
    }
    if input.right {
        pos.x += speed;
    }
    if input.up {
        pos.y -= speed;
    }
    if input.down {
        pos.y += speed;
    }
    *pos = pos.clamp(
        Vec2::ZERO,
        Vec2::new(
            SURFACE_WIDTH - PLAYER_WIDTH,
            SURFACE_HEIGHT - PLAYER_HEIGHT,
        ),
    );
}

/// Climb every bullet one step, dropping those past the top edge
fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_STEP;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

/// Maybe spawn an enemy, then descend all of them one step
fn advance_enemies(state: &mut GameState) {
    if state.rng.random::<f32>() < state.tuning.spawn_chance {
        let x = state.rng.random_range(0.0..SURFACE_WIDTH - ENEMY_SIZE);
        state.enemies.push(Enemy::spawn(x));
    }

    let step = state.enemy_speed;
    for enemy in &mut state.enemies {
        enemy.pos.y += step;
    }
    state.enemies.retain(|e| e.pos.y <= SURFACE_HEIGHT);
}

/// Resolve collisions in reverse insertion order.
///
/// Per enemy: the player test runs first, and a hit ends the run without
/// touching the remaining enemies. Otherwise the first overlapping bullet
/// (scanning newest first) kills the enemy, so one bullet accounts for at
/// most one kill per frame and vice versa.
fn resolve_collisions(state: &mut GameState) {
    let hitbox = state.player.hitbox();

    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy_box = state.enemies[i].bounds();

        if circle_rect_overlap(&hitbox, &enemy_box) {
            state.game_over();
            return;
        }

        let mut j = state.bullets.len();
        while j > 0 {
            j -= 1;
            if rects_overlap(&state.bullets[j].bounds(), &enemy_box) {
                state.enemies.remove(i);
                state.bullets.remove(j);
                state.score += state.tuning.score_per_kill;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Control, GameEvent};
    use crate::tuning::Tuning;

    /// Balance with spawning disabled so tests control the enemy store
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn running_state() -> GameState {
        let mut state = GameState::with_tuning(7, quiet_tuning());
        state.start();
        state
    }

    #[test]
    fn idle_session_does_not_advance() {
        let mut state = GameState::with_tuning(7, quiet_tuning());
        state.enemies.push(Enemy::spawn(100.0));
        tick(&mut state, 1.0);
        assert_eq!(state.enemies[0].pos.y, -ENEMY_SIZE);
        assert_eq!(state.elapsed_secs, 0);
    }

    #[test]
    fn player_stays_on_surface() {
        let mut state = running_state();
        state.set_input(Control::Left, true);
        state.set_input(Control::Up, true);
        for _ in 0..200 {
            tick(&mut state, 0.0);
        }
        assert_eq!(state.player.pos, Vec2::ZERO);

        state.set_input(Control::Left, false);
        state.set_input(Control::Up, false);
        state.set_input(Control::Right, true);
        state.set_input(Control::Down, true);
        for _ in 0..300 {
            tick(&mut state, 0.0);
        }
        assert_eq!(
            state.player.pos,
            Vec2::new(SURFACE_WIDTH - PLAYER_WIDTH, SURFACE_HEIGHT - PLAYER_HEIGHT)
        );
    }

    #[test]
    fn enemy_descends_and_falls_off() {
        let mut state = running_state();
        state.enemies.push(Enemy::spawn(100.0));

        // 20 frames at the initial 1.5/frame bring y from -30 to 0
        for _ in 0..20 {
            tick(&mut state, 0.0);
        }
        assert!(state.enemies[0].pos.y.abs() < 1e-3);

        // Keeps descending until it clears the bottom edge, then drops out
        for _ in 0..500 {
            tick(&mut state, 0.0);
            if state.enemies.is_empty() {
                break;
            }
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn spawned_enemy_starts_above_surface_in_bounds() {
        let mut state = GameState::with_tuning(
            7,
            Tuning {
                spawn_chance: 1.0,
                ..Tuning::default()
            },
        );
        state.start();
        tick(&mut state, 0.0);

        assert_eq!(state.enemies.len(), 1);
        let e = &state.enemies[0];
        // Spawned at -30, then moved one step in the same frame
        assert!((e.pos.y - (-ENEMY_SIZE + state.enemy_speed)).abs() < 1e-3);
        assert!(e.pos.x >= 0.0 && e.pos.x < SURFACE_WIDTH - ENEMY_SIZE);
    }

    #[test]
    fn bullet_leaves_off_the_top() {
        let mut state = running_state();
        state.bullets.push(Bullet {
            pos: Vec2::new(100.0, 5.0),
        });
        tick(&mut state, 0.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn held_fire_for_one_second_yields_five_bullets() {
        let mut state = running_state();
        let muzzle_x = state.player.muzzle().x;
        state.set_input(Control::Fire, true);

        // 8 frames of 125 ms = 1000 ms held: 1 immediate + 4 repeats at 250 ms
        for _ in 0..8 {
            tick(&mut state, 0.125);
        }
        assert_eq!(state.bullets.len(), 5);
        assert!(state.bullets.iter().all(|b| b.pos.x == muzzle_x));
    }

    #[test]
    fn release_stops_autofire() {
        let mut state = running_state();
        state.set_input(Control::Fire, true);
        tick(&mut state, 0.25);
        assert_eq!(state.bullets.len(), 2);

        state.set_input(Control::Fire, false);
        tick(&mut state, 0.25);
        tick(&mut state, 0.25);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn first_bullet_hit_kills_enemy_once() {
        let mut state = running_state();
        state.enemies.push(Enemy::spawn(100.0));
        state.enemies[0].pos.y = 100.0;
        // Two bullets over the same enemy; only one may be consumed
        state.bullets.push(Bullet {
            pos: Vec2::new(110.0, 105.0),
        });
        state.bullets.push(Bullet {
            pos: Vec2::new(112.0, 108.0),
        });

        tick(&mut state, 0.0);

        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn enemy_contact_ends_the_run() {
        let mut state = running_state();
        state.score = 250;
        let mut enemy = Enemy::spawn(0.0);
        enemy.pos = state.player.bounds().center() - Vec2::splat(ENEMY_SIZE / 2.0);
        state.enemies.push(enemy);

        tick(&mut state, 0.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { final_score: 250 }]
        );

        // Terminal phase is frozen: nothing moves, nothing scores
        let enemy_y = state.enemies[0].pos.y;
        state.set_input(Control::Right, true);
        let player_x = state.player.pos.x;
        tick(&mut state, 1.0);
        assert_eq!(state.enemies[0].pos.y, enemy_y);
        assert_eq!(state.player.pos.x, player_x);
        assert_eq!(state.score, 250);
    }

    #[test]
    fn surviving_the_countdown_wins() {
        let mut state = running_state();
        state.score = 500;
        for _ in 0..9 {
            tick(&mut state, 1.0);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.elapsed_secs, 9);

        tick(&mut state, 1.0);

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.elapsed_secs, 10);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Victory { final_score: 500 }]
        );
        assert!(!state.timers.speed_ramp.is_armed());
        assert!(!state.timers.countdown.is_armed());
        assert!(!state.timers.autofire.is_armed());

        // Clock is stopped for good
        tick(&mut state, 5.0);
        assert_eq!(state.elapsed_secs, 10);
    }

    #[test]
    fn speed_ramp_accumulates() {
        let mut state = GameState::with_tuning(
            7,
            Tuning {
                spawn_chance: 0.0,
                victory_time_secs: 100,
                ..Tuning::default()
            },
        );
        state.start();
        assert_eq!(state.enemy_speed, 1.5);

        tick(&mut state, 10.0);
        assert_eq!(state.enemy_speed, 2.0);
        tick(&mut state, 10.0);
        assert_eq!(state.enemy_speed, 2.5);
    }

    #[test]
    fn same_seed_same_run() {
        let spawning = Tuning {
            spawn_chance: 0.2,
            ..Tuning::default()
        };
        let mut a = GameState::with_tuning(99, spawning.clone());
        let mut b = GameState::with_tuning(99, spawning);
        a.start();
        b.start();
        for _ in 0..120 {
            tick(&mut a, 0.0);
            tick(&mut b, 0.0);
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
