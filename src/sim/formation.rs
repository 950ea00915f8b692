//! Formation controller
//!
//! Owns progress along the patrol path, the liveness grid, shot state and
//! the power-up gate. External drivers address cells by `(x, y)`; the only
//! outbound call is the death listener.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::gate::PowerUpGate;
use super::liveness::LivenessGrid;
use super::path::patrol_offset;
use super::shot::ShotScheduler;
use crate::error::ConfigError;
use crate::settings::FormationConfig;

/// Notification sent to the registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationEvent {
    /// Cell `(x, y)` just died
    Died { x: usize, y: usize },
}

/// Power-up variants a dying enemy can drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Faster player movement
    Speed,
    /// Shorter player fire cooldown
    CooldownReduce,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Speed, PowerUpKind::CooldownReduce];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Speed",
            PowerUpKind::CooldownReduce => "CooldownReduce",
        }
    }
}

type Listener = Box<dyn FnMut(FormationEvent)>;

/// A grid of enemies moving as one rigid body
pub struct Formation {
    config: FormationConfig,
    /// Distance travelled along the patrol loop
    progress: f32,
    liveness: LivenessGrid,
    shots: ShotScheduler,
    gate: PowerUpGate,
    rng: Pcg32,
    listener: Option<Listener>,
}

impl fmt::Debug for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formation")
            .field("config", &self.config)
            .field("progress", &self.progress)
            .field("liveness", &self.liveness)
            .field("shots", &self.shots)
            .field("gate", &self.gate)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl Formation {
    /// Create a fully alive formation with its own seeded RNG
    pub fn new(config: FormationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Create a formation drawing from the given RNG
    pub fn with_rng(config: FormationConfig, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, rng))
    }

    /// Build from a config that has already passed `validate`
    pub(crate) fn from_validated(config: FormationConfig, rng: Pcg32) -> Self {
        let mut formation = Self {
            config,
            progress: 0.0,
            liveness: LivenessGrid::new(config.width, config.height),
            shots: ShotScheduler::new(config.cooldown_low, config.cooldown_high),
            gate: PowerUpGate::new(),
            rng,
            listener: None,
        };
        formation.retarget();
        formation
    }

    /// Register the death listener, replacing any previous one
    pub fn set_listener(&mut self, listener: impl FnMut(FormationEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // === Per-tick ===

    /// Advance the formation by `dt` seconds
    ///
    /// # Panics
    /// If `dt` is negative or NaN.
    pub fn update(&mut self, dt: f32) {
        assert!(dt >= 0.0, "update called with negative or NaN dt: {dt}");
        self.progress += self.config.speed * dt;
        self.shots.tick(dt);
    }

    // === Per-cell ===

    /// World position of cell `(x, y)`, dead or alive
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn position_of(&self, x: usize, y: usize) -> Vec2 {
        self.assert_cell(x, y);
        self.home_slot(x, y) + patrol_offset(self.progress, self.config.line_width)
    }

    /// Kill cell `(x, y)`. Returns true if it was alive.
    ///
    /// Retargets the shot scheduler when this empties the cell's column, then
    /// notifies the listener. Repeated calls for a dead cell do nothing.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn on_death(&mut self, x: usize, y: usize) -> bool {
        if !self.liveness.mark_dead(x, y) {
            return false;
        }

        if !self.liveness.is_column_alive(x) {
            log::debug!("Column {x} cleared, retargeting");
            self.retarget();
        }

        if let Some(listener) = self.listener.as_mut() {
            listener(FormationEvent::Died { x, y });
        }
        true
    }

    /// True if cell `(x, y)` is allowed to fire this frame
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn should_fire(&self, x: usize, y: usize) -> bool {
        self.shots.may_fire(x, self.liveness.is_front_runner(x, y))
    }

    /// Called once a shot has been taken. Does not re-check permission.
    pub fn on_fired(&mut self) {
        self.retarget();
    }

    // === Power-ups ===

    /// Take the power-up slot if nothing is outstanding
    pub fn try_drop_power_up(&mut self) -> bool {
        let acquired = self.gate.try_acquire();
        if acquired {
            log::debug!("Power-up slot taken");
        }
        acquired
    }

    /// Free the power-up slot (power-up expired or left the field)
    pub fn on_power_up_resolved(&mut self) {
        self.gate.release();
        log::debug!("Power-up slot freed");
    }

    /// Roll for a power-up drop from a dying enemy.
    ///
    /// Succeeds with `probability` and only if the slot is free, in which
    /// case the slot is taken and a random kind returned.
    pub fn roll_power_up_drop(&mut self, probability: f32) -> Option<PowerUpKind> {
        let roll: f32 = self.rng.random();
        // Accept only on `roll < probability`, so a probability of 0 never drops
        if roll >= probability || !self.try_drop_power_up() {
            return None;
        }
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        Some(kind)
    }

    // === Queries ===

    #[inline]
    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.liveness.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.liveness.height()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.liveness.contains(x, y)
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.liveness.alive_count()
    }

    /// True once every cell is dead
    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.liveness.alive_count() == 0
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.liveness.is_alive(x, y)
    }

    pub fn is_front_runner(&self, x: usize, y: usize) -> bool {
        self.liveness.is_front_runner(x, y)
    }

    pub fn alive_columns(&self) -> Vec<usize> {
        self.liveness.alive_columns()
    }

    /// Column armed to fire next
    #[inline]
    pub fn target_column(&self) -> Option<usize> {
        self.shots.target_column()
    }

    /// Seconds until the armed column may fire
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.shots.cooldown()
    }

    #[inline]
    pub fn power_up_slot_free(&self) -> bool {
        self.gate.is_free()
    }

    /// Iterate over `(x, y)` of every alive cell, row by row
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        (0..self.height())
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.liveness.is_alive(x, y))
    }

    /// Y coordinate of the lowest alive row, if any cell is alive
    pub fn lowest_alive_y(&self) -> Option<f32> {
        let row = (0..self.height())
            .rev()
            .find(|&y| (0..self.width()).any(|x| self.liveness.is_alive(x, y)))?;
        Some(self.position_of(0, row).y)
    }

    // === Internals ===

    fn home_slot(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            self.config.bound_left + x as f32,
            self.config.bound_top - y as f32,
        )
    }

    fn assert_cell(&self, x: usize, y: usize) {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) outside {}x{} formation",
            self.width(),
            self.height()
        );
    }

    fn retarget(&mut self) {
        let columns = self.liveness.alive_columns();
        self.shots.reset(&columns, &mut self.rng);
        if let Some(column) = self.shots.target_column() {
            log::trace!(
                "Armed column {column}, cooldown {:.2}s",
                self.shots.cooldown()
            );
        }
    }
}
