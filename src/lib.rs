//! Ghost Formation - enemy formation core for a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic formation simulation (patrol path, liveness, shots, power-up gate)
//! - `session`: Headless run of consecutive waves built on `sim`
//! - `settings`: Data-driven formation and session tuning
//! - `error`: Configuration errors

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use session::{PowerUp, Session, SessionEvent, SessionPhase};
pub use settings::{FormationConfig, SessionSettings};
pub use sim::{Formation, FormationEvent, PowerUpKind};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Formation layout defaults (grid units)
    pub const DEFAULT_BOUND_LEFT: f32 = -8.0;
    pub const DEFAULT_BOUND_TOP: f32 = 8.0;
    pub const DEFAULT_LINE_WIDTH: f32 = 6.0;
    pub const DEFAULT_GRID_WIDTH: usize = 11;
    pub const DEFAULT_GRID_HEIGHT: usize = 5;

    /// Patrol speed (grid units per second)
    pub const DEFAULT_SPEED: f32 = 1.5;

    /// Enemy shot cooldown range (seconds)
    pub const DEFAULT_COOLDOWN_LOW: f32 = 0.5;
    pub const DEFAULT_COOLDOWN_HIGH: f32 = 2.0;

    /// Power-up defaults
    pub const DEFAULT_POWER_UP_PROBABILITY: f32 = 0.1;
    pub const DEFAULT_POWER_UP_FALL_SPEED: f32 = 3.0;
    pub const DEFAULT_POWER_UP_DURATION: f32 = 5.0;

    /// Enemy shots the player can take before the run ends
    pub const DEFAULT_PLAYER_HEALTH: u32 = 3;

    /// Enemies touching this line end the run
    pub const DEFAULT_FLOOR_Y: f32 = -8.0;
}
