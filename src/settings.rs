//! Formation and session configuration
//!
//! Plain serde structs with sensible defaults. Loading from disk or storage
//! is left to the caller; `SessionSettings::from_json` parses and validates.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, finite, non_negative};

/// Immutable parameters of one enemy formation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// X coordinate of column 0 before any movement
    pub bound_left: f32,
    /// Y coordinate of row 0 before any movement
    pub bound_top: f32,
    /// Length of the horizontal legs of the patrol loop
    pub line_width: f32,
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Patrol speed (grid units per second)
    pub speed: f32,
    /// Lower bound of the enemy shot cooldown (seconds, inclusive)
    pub cooldown_low: f32,
    /// Upper bound of the enemy shot cooldown (seconds, exclusive)
    pub cooldown_high: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            bound_left: DEFAULT_BOUND_LEFT,
            bound_top: DEFAULT_BOUND_TOP,
            line_width: DEFAULT_LINE_WIDTH,
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            speed: DEFAULT_SPEED,
            cooldown_low: DEFAULT_COOLDOWN_LOW,
            cooldown_high: DEFAULT_COOLDOWN_HIGH,
        }
    }
}

impl FormationConfig {
    /// Reject grids and numbers the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        finite("bound_left", self.bound_left)?;
        finite("bound_top", self.bound_top)?;
        non_negative("line_width", self.line_width)?;
        non_negative("speed", self.speed)?;
        let low = non_negative("cooldown_low", self.cooldown_low)?;
        let high = non_negative("cooldown_high", self.cooldown_high)?;
        if low > high {
            return Err(ConfigError::CooldownRange { low, high });
        }
        Ok(())
    }
}

/// Settings for a whole play session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Layout and tuning of every spawned wave
    pub formation: FormationConfig,
    /// Chance that a destroyed enemy drops a power-up (0.0 - 1.0)
    pub power_up_probability: f32,
    /// Falling speed of a dropped power-up (grid units per second)
    pub power_up_fall_speed: f32,
    /// How long a caught power-up stays active (seconds)
    pub power_up_duration: f32,
    /// Y coordinate of the play field floor; enemies reaching it end the run
    pub floor_y: f32,
    /// Enemy shots the player survives; the run ends when it reaches 0
    pub player_health: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            formation: FormationConfig::default(),
            power_up_probability: DEFAULT_POWER_UP_PROBABILITY,
            power_up_fall_speed: DEFAULT_POWER_UP_FALL_SPEED,
            power_up_duration: DEFAULT_POWER_UP_DURATION,
            floor_y: DEFAULT_FLOOR_Y,
            player_health: DEFAULT_PLAYER_HEALTH,
        }
    }
}

impl SessionSettings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.formation.validate()?;
        let p = finite("power_up_probability", self.power_up_probability)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Probability(p));
        }
        non_negative("power_up_fall_speed", self.power_up_fall_speed)?;
        non_negative("power_up_duration", self.power_up_duration)?;
        finite("floor_y", self.floor_y)?;
        if self.player_health == 0 {
            return Err(ConfigError::ZeroHealth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FormationConfig::default().validate().is_ok());
        assert!(SessionSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = FormationConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { width: 0, .. })
        ));

        let config = FormationConfig {
            height: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let config = FormationConfig {
            speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "speed", .. })
        ));

        let config = FormationConfig {
            line_width: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "line_width", .. })
        ));

        let config = FormationConfig {
            cooldown_low: 3.0,
            cooldown_high: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CooldownRange { .. })
        ));
    }

    #[test]
    fn test_equal_cooldown_bounds_allowed() {
        let config = FormationConfig {
            cooldown_low: 1.0,
            cooldown_high: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{ "power_up_probability": 0.5, "formation": { "width": 3, "height": 2 } }"#;
        let settings = SessionSettings::from_json(json).unwrap();
        assert_eq!(settings.formation.width, 3);
        assert_eq!(settings.formation.height, 2);
        assert_eq!(settings.formation.speed, DEFAULT_SPEED);
        assert!((settings.power_up_probability - 0.5).abs() < f32::EPSILON);
        assert_eq!(settings.floor_y, DEFAULT_FLOOR_Y);
        assert_eq!(settings.player_health, DEFAULT_PLAYER_HEALTH);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            SessionSettings::from_json(r#"{ "power_up_probability": 1.5 }"#),
            Err(ConfigError::Probability(_))
        ));
        assert!(matches!(
            SessionSettings::from_json(r#"{ "player_health": 0 }"#),
            Err(ConfigError::ZeroHealth)
        ));
        assert!(matches!(
            SessionSettings::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = SessionSettings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(SessionSettings::from_json(&json).unwrap(), settings);
    }
}
