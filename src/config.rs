//! Tunable parameters, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! [player]
//! jump_velocity = 360.0
//!
//! [boar]
//! sight_range = 200.0
//! ```

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub boar: BoarConfig,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, units/s².
    pub gravity: f32,
    /// Simulation steps per second.
    pub tick_rate: u32,
}

impl PhysicsConfig {
    /// Length of one simulation step in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            tick_rate: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub half_size: Vec2,
    pub max_health: i32,
    pub max_energy: f32,
    pub energy_regen: f32,

    pub run_speed: f32,
    pub floor_acceleration: f32,
    pub air_acceleration: f32,
    /// Upward launch speed.
    pub jump_velocity: f32,
    /// x is mirrored by the wall normal on launch.
    pub wall_jump_velocity: Vec2,
    /// Seconds after a wall jump before input steers again.
    pub wall_jump_lock: f32,
    pub knockback: f32,
    pub attack_damage: i32,
    /// Falls at least this tall end in the Landing state.
    pub landing_height: f32,

    pub sliding_duration: f32,
    pub sliding_speed: f32,
    pub sliding_energy: f32,

    pub jump_buffer: f32,
    pub coyote_time: f32,
    pub invincible_time: f32,
    pub combo_window: f32,
    pub slide_buffer: f32,

    /// Oscillations of the hurt flicker across one invincibility window.
    pub flicker_cycles: f32,
    pub camera_shake: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let run_speed = 160.0;
        Self {
            half_size: Vec2::new(10.0, 16.0),
            max_health: 5,
            max_energy: 10.0,
            energy_regen: 0.8,

            run_speed,
            floor_acceleration: run_speed / 0.2,
            air_acceleration: run_speed / 0.1,
            jump_velocity: 320.0,
            wall_jump_velocity: Vec2::new(380.0, 280.0),
            wall_jump_lock: 0.1,
            knockback: 512.0,
            attack_damage: 1,
            landing_height: 100.0,

            sliding_duration: 0.3,
            sliding_speed: 256.0,
            sliding_energy: 4.0,

            jump_buffer: 0.1,
            coyote_time: 0.1,
            invincible_time: 2.0,
            combo_window: 0.4,
            slide_buffer: 0.1,

            flicker_cycles: 12.0,
            camera_shake: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoarConfig {
    pub half_size: Vec2,
    pub max_health: i32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub knockback: f32,
    /// Seconds a boar keeps chasing after losing sight of its target.
    pub calm_down: f32,
    /// Seconds spent idle before wandering off again.
    pub idle_patience: f32,
    pub sight_range: f32,
    pub contact_damage: i32,
}

impl Default for BoarConfig {
    fn default() -> Self {
        let max_speed = 180.0;
        Self {
            half_size: Vec2::new(16.0, 12.0),
            max_health: 3,
            max_speed,
            acceleration: max_speed / 0.2,
            knockback: 512.0,
            calm_down: 2.5,
            idle_patience: 2.0,
            sight_range: 160.0,
            contact_damage: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            [player]
            jump_velocity = 400.0
            wall_jump_velocity = [300.0, 250.0]

            [physics]
            tick_rate = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.player.jump_velocity, 400.0);
        assert_eq!(config.player.wall_jump_velocity, Vec2::new(300.0, 250.0));
        assert_eq!(config.player.run_speed, 160.0);
        assert_eq!(config.boar, BoarConfig::default());
        assert!((config.physics.dt() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[boar]\nsight_range = 90.0").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.boar.sight_range, 90.0);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[player\njump_velocity = ").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GameConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
