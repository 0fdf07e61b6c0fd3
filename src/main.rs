//! Prize Darts entry point
//!
//! Headless demo: plays one round with the default (or a JSON) configuration,
//! logging every event, then prints the round summary as JSON.
//!
//! Usage: `prize-darts [config.json]` (set `RUST_LOG=info` to see the play-by-play)

use prize_darts::consts::SIM_DT;
use prize_darts::sim::GamePhase;
use prize_darts::{GameConfig, GameError, LogPresenter, Round};

/// Pause between landing and the next throw
const THINK_SECS: f32 = 1.3;

/// Hard stop for the demo loop (one minute of simulated time)
const MAX_TICKS: u64 = 60 * 60;

fn load_config() -> Result<GameConfig, GameError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| {
                GameError::InvalidConfig(format!("cannot read {}: {}", path, e))
            })?;
            GameConfig::from_json(&json)
        }
        None => Ok(GameConfig::default()),
    }
}

fn play(config: GameConfig) -> Result<(), GameError> {
    let mut round = Round::new(config, LogPresenter)?;
    let mut think = THINK_SECS;

    while round.time_ticks() < MAX_TICKS {
        round.tick(SIM_DT)?;

        match round.phase() {
            GamePhase::GameOver | GamePhase::Frenzy => break,
            _ => {}
        }

        if !round.dart_in_flight() {
            think -= SIM_DT;
            if think <= 0.0 && round.throw_dart().is_ok() {
                think = THINK_SECS;
            }
        }
    }

    log::info!(
        "Round finished in {:?} after {} ticks",
        round.phase(),
        round.time_ticks()
    );
    println!("{}", round.session().summary().to_json());
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Prize Darts (headless) starting...");

    if let Err(e) = load_config().and_then(play) {
        log::error!("{}", e);
        eprintln!("prize-darts: {}", e);
        std::process::exit(1);
    }
}
