//! Ghost Formation headless demo
//!
//! Plays a scripted run at the fixed timestep and logs what happens.
//! Usage: `ghost-formation [seed] [settings.json]`, verbosity via `RUST_LOG`.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ghost_formation::consts::SIM_DT;
use ghost_formation::{Session, SessionEvent, SessionPhase, SessionSettings};

/// Seconds between scripted player hits
const HIT_INTERVAL: f32 = 0.4;
/// Stop after this many waves have been cleared
const MAX_WAVES: u32 = 3;
/// Hard cap on simulated time (seconds)
const MAX_SECONDS: f32 = 600.0;

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {arg:?}"))?,
        None => 12345,
    };
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings from {path}"))?;
            SessionSettings::from_json(&json).with_context(|| format!("bad settings in {path}"))?
        }
        None => SessionSettings::default(),
    };

    log::info!("Ghost Formation (headless) starting...");
    let mut session = Session::new(settings, seed)?;
    log::debug!("Settings: {:?}", session.settings());
    // The scripted player gets its own stream so the session stays reproducible
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);

    let mut elapsed = 0.0;
    let mut since_hit = 0.0;
    let mut shots_taken = 0u32;
    let mut caught = 0u32;

    while elapsed < MAX_SECONDS && session.phase() == SessionPhase::Running {
        let mut events = session.tick(SIM_DT);
        elapsed += SIM_DT;
        since_hit += SIM_DT;

        if since_hit >= HIT_INTERVAL {
            since_hit = 0.0;
            let columns = session.formation().alive_columns();
            if !columns.is_empty() {
                let x = columns[player.random_range(0..columns.len())];
                let front = (0..session.formation().height())
                    .rev()
                    .find(|&y| session.formation().is_alive(x, y));
                if let Some(y) = front {
                    events.extend(session.hit(x, y));
                }
            }
        }

        for event in &events {
            match *event {
                SessionEvent::EnemyFired { .. } => {
                    shots_taken += 1;
                    // About a fifth of enemy shots connect
                    if player.random_bool(0.2) {
                        for damage in session.player_hit() {
                            if let SessionEvent::PlayerDamaged { health } = damage {
                                log::info!("Player hit, health {health}");
                            }
                        }
                    }
                }
                SessionEvent::PowerUpDropped { kind, pos } => {
                    log::info!("{} power-up dropped at {pos}", kind.as_str());
                    // Catch roughly half of the drops
                    if player.random_bool(0.5) && session.catch_power_up().is_some() {
                        caught += 1;
                        log::info!("{} power-up caught", kind.as_str());
                    }
                }
                SessionEvent::PowerUpExpired { kind } => {
                    log::info!("{} power-up gone", kind.as_str());
                }
                SessionEvent::WaveCleared { wave } => {
                    log::info!("Wave {wave} cleared at {elapsed:.1}s");
                }
                SessionEvent::FormationBreached => {
                    log::warn!("Formation reached the floor at {elapsed:.1}s");
                }
                _ => {}
            }
            log::trace!("{event:?}");
        }

        if session.wave() > MAX_WAVES {
            break;
        }
    }

    log::info!(
        "Run finished: wave {}, score {}, enemy shots {}, power-ups caught {}",
        session.wave(),
        session.score(),
        shots_taken,
        caught
    );
    Ok(())
}
