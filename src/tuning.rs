//! Data-driven game balance
//!
//! Everything a balance pass would want to tweak without touching the
//! simulation: speeds, cadences, spawn odds, scoring. Defaults are the
//! shipped balance; a JSON file can override them at startup.

use serde::Deserialize;

/// Balance values consumed by the simulation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement per frame, per pressed axis
    pub player_speed: f32,
    /// Enemy descent per frame at session start
    pub initial_enemy_speed: f32,
    /// Descent added by each speed ramp firing
    pub speed_ramp_step: f32,
    /// Seconds between speed ramp firings
    pub speed_ramp_interval: f32,
    /// Per-frame probability of a new enemy
    pub spawn_chance: f32,
    /// Seconds between autofire shots while fire is held
    pub shoot_delay: f32,
    /// Seconds the player must survive to win
    pub victory_time_secs: u32,
    /// Points per enemy destroyed
    pub score_per_kill: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            initial_enemy_speed: 1.5,
            speed_ramp_step: 0.5,
            speed_ramp_interval: 10.0,
            spawn_chance: 0.02,
            shoot_delay: 0.25,
            victory_time_secs: 10,
            score_per_kill: 100,
        }
    }
}

impl Tuning {
    /// Load tuning overrides from a JSON file, falling back to defaults.
    ///
    /// A missing file is normal (no overrides); a present-but-broken file
    /// is logged and ignored rather than aborting the game.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_balance() {
        let t = Tuning::default();
        assert_eq!(t.initial_enemy_speed, 1.5);
        assert_eq!(t.speed_ramp_step, 0.5);
        assert_eq!(t.shoot_delay, 0.25);
        assert_eq!(t.victory_time_secs, 10);
        assert_eq!(t.score_per_kill, 100);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let t: Tuning = serde_json::from_str(r#"{ "spawn_chance": 0.05 }"#).unwrap();
        assert_eq!(t.spawn_chance, 0.05);
        assert_eq!(t.player_speed, 5.0);
        assert_eq!(t.victory_time_secs, 10);
    }

    #[test]
    fn missing_file_falls_back() {
        let t = Tuning::load_or_default(std::path::Path::new("/nonexistent/tuning.json"));
        assert_eq!(t.spawn_chance, Tuning::default().spawn_chance);
    }
}
