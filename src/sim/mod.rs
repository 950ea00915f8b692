//! Deterministic formation simulation
//!
//! Everything here is driven by elapsed time and seeded random draws only:
//! - No rendering, physics or input dependencies
//! - Seeded RNG only
//! - Stable iteration order (row-major by cell)

pub mod formation;
pub mod gate;
pub mod liveness;
pub mod path;
pub mod shot;

pub use formation::{Formation, FormationEvent, PowerUpKind};
pub use gate::PowerUpGate;
pub use liveness::LivenessGrid;
pub use path::{lap_length, patrol_offset};
pub use shot::ShotScheduler;
