//! Headless play session
//!
//! Composes formations into a run: keeps score from death notifications,
//! asks every enemy whether it fires, moves the outstanding power-up, spawns
//! the next wave when one is cleared and ends the run when the player runs
//! out of health or the formation reaches the floor.

use std::sync::mpsc::{self, Receiver};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::ConfigError;
use crate::settings::SessionSettings;
use crate::sim::{Formation, FormationEvent, PowerUpKind};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waves are being played
    Running,
    /// Player health ran out or a formation reached the floor
    Lost,
}

/// The single outstanding power-up, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerUp {
    /// Dropped and falling toward the floor
    Falling { kind: PowerUpKind, pos: Vec2 },
    /// Caught by the player, in effect for `remaining` seconds
    Active { kind: PowerUpKind, remaining: f32 },
}

impl PowerUp {
    pub fn kind(&self) -> PowerUpKind {
        match *self {
            PowerUp::Falling { kind, .. } | PowerUp::Active { kind, .. } => kind,
        }
    }
}

/// Things that happened during a session call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    EnemyFired { x: usize, y: usize, pos: Vec2 },
    EnemyDestroyed { x: usize, y: usize, score: u64 },
    PowerUpDropped { kind: PowerUpKind, pos: Vec2 },
    /// Power-up fell off the field or its effect ran out
    PowerUpExpired { kind: PowerUpKind },
    WaveCleared { wave: u32 },
    WaveSpawned { wave: u32 },
    /// An enemy shot hit the player
    PlayerDamaged { health: u32 },
    FormationBreached,
}

/// One run of consecutive waves
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    /// Seeds each wave's formation
    rng: Pcg32,
    formation: Formation,
    deaths: Receiver<FormationEvent>,
    phase: SessionPhase,
    /// 1-based wave number
    wave: u32,
    score: u64,
    player_health: u32,
    power_up: Option<PowerUp>,
}

impl Session {
    /// Start a run at wave 1
    pub fn new(settings: SessionSettings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let (formation, deaths) = spawn_formation(&settings, &mut rng);
        log::info!("Session started with seed {seed}");
        Ok(Self {
            settings,
            rng,
            formation,
            deaths,
            phase: SessionPhase::Running,
            wave: 1,
            score: 0,
            player_health: settings.player_health,
            power_up: None,
        })
    }

    /// Advance the run by `dt` seconds
    ///
    /// # Panics
    /// If `dt` is negative or NaN.
    pub fn tick(&mut self, dt: f32) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase == SessionPhase::Lost {
            return events;
        }

        self.formation.update(dt);

        let cells: Vec<_> = self.formation.alive_cells().collect();
        for (x, y) in cells {
            if self.formation.should_fire(x, y) {
                self.formation.on_fired();
                let pos = self.formation.position_of(x, y);
                events.push(SessionEvent::EnemyFired { x, y, pos });
            }
        }

        self.advance_power_up(dt, &mut events);

        if let Some(lowest) = self.formation.lowest_alive_y() {
            if lowest <= self.settings.floor_y {
                log::info!("Wave {} reached the floor, run over (score {})", self.wave, self.score);
                self.phase = SessionPhase::Lost;
                events.push(SessionEvent::FormationBreached);
            }
        }

        events
    }

    /// A player projectile hit enemy `(x, y)`
    ///
    /// # Panics
    /// If `(x, y)` is outside the current formation.
    pub fn hit(&mut self, x: usize, y: usize) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase == SessionPhase::Lost || !self.formation.on_death(x, y) {
            return events;
        }

        for FormationEvent::Died { x, y } in self.deaths.try_iter() {
            self.score += 1;
            events.push(SessionEvent::EnemyDestroyed {
                x,
                y,
                score: self.score,
            });
        }

        if let Some(kind) = self
            .formation
            .roll_power_up_drop(self.settings.power_up_probability)
        {
            let pos = self.formation.position_of(x, y);
            log::debug!("{} power-up dropped at {pos}", kind.as_str());
            self.power_up = Some(PowerUp::Falling { kind, pos });
            events.push(SessionEvent::PowerUpDropped { kind, pos });
        }

        if self.formation.is_cleared() {
            log::info!("Wave {} cleared (score {})", self.wave, self.score);
            events.push(SessionEvent::WaveCleared { wave: self.wave });
            self.next_wave();
            events.push(SessionEvent::WaveSpawned { wave: self.wave });
        }

        events
    }

    /// An enemy shot reached the player
    pub fn player_hit(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase == SessionPhase::Lost {
            return events;
        }

        self.player_health = self.player_health.saturating_sub(1);
        events.push(SessionEvent::PlayerDamaged {
            health: self.player_health,
        });
        if self.player_health == 0 {
            log::info!("Player destroyed in wave {}, run over (score {})", self.wave, self.score);
            self.phase = SessionPhase::Lost;
        }
        events
    }

    /// The player touched the falling power-up
    pub fn catch_power_up(&mut self) -> Option<PowerUpKind> {
        if self.phase == SessionPhase::Lost {
            return None;
        }
        match self.power_up {
            Some(PowerUp::Falling { kind, .. }) => {
                log::debug!("{} power-up caught", kind.as_str());
                self.power_up = Some(PowerUp::Active {
                    kind,
                    remaining: self.settings.power_up_duration,
                });
                Some(kind)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn player_health(&self) -> u32 {
        self.player_health
    }

    #[inline]
    pub fn power_up(&self) -> Option<PowerUp> {
        self.power_up
    }

    #[inline]
    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    #[inline]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    fn advance_power_up(&mut self, dt: f32, events: &mut Vec<SessionEvent>) {
        let Some(current) = self.power_up.take() else {
            return;
        };
        let next = match current {
            PowerUp::Falling { kind, mut pos } => {
                pos.y -= self.settings.power_up_fall_speed * dt;
                (pos.y >= self.settings.floor_y).then_some(PowerUp::Falling { kind, pos })
            }
            PowerUp::Active { kind, remaining } => {
                let remaining = remaining - dt;
                (remaining > 0.0).then_some(PowerUp::Active { kind, remaining })
            }
        };

        self.power_up = next;
        if next.is_none() {
            self.formation.on_power_up_resolved();
            events.push(SessionEvent::PowerUpExpired {
                kind: current.kind(),
            });
        }
    }

    fn next_wave(&mut self) {
        let (mut formation, deaths) = spawn_formation(&self.settings, &mut self.rng);
        // An outstanding power-up keeps holding the slot in the new wave
        if self.power_up.is_some() {
            formation.try_drop_power_up();
        }
        self.formation = formation;
        self.deaths = deaths;
        self.wave += 1;
        log::info!("Wave {} spawned", self.wave);
    }
}

fn spawn_formation(
    settings: &SessionSettings,
    rng: &mut Pcg32,
) -> (Formation, Receiver<FormationEvent>) {
    let wave_rng = Pcg32::seed_from_u64(rng.random());
    let mut formation = Formation::from_validated(settings.formation, wave_rng);
    let (tx, rx) = mpsc::channel();
    formation.set_listener(move |event| {
        // Receiver lives as long as the formation inside the session
        let _ = tx.send(event);
    });
    (formation, rx)
}
