//! Road Rush headless driver
//!
//! Runs the deterministic simulation without a renderer: useful for demo
//! runs, balance checks and profiling. Takes an optional JSON config path
//! as the first argument.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use road_rush::audio;
use road_rush::consts::SIM_DT;
use road_rush::sim::{GamePhase, TickInput};
use road_rush::{GameConfig, JsonHighScores, Session};

/// Ten simulated minutes, more than enough to win or lose a run
const MAX_DEMO_TICKS: u64 = 60 * 60 * 10;

fn load_config() -> Result<GameConfig, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|err| format!("cannot read config {path}: {err}"))?;
            serde_json::from_str(&json).map_err(|err| format!("bad config {path}: {err}"))
        }
        None => Ok(GameConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            log::error!("{message}");
            return ExitCode::FAILURE;
        }
    };
    let max_track = config.max_music_track;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let store = JsonHighScores::new("highscore.json");
    let mut session = match Session::new(config, seed, store) {
        Ok(session) => session,
        Err(err) => {
            log::error!("invalid config: {err}");
            return ExitCode::FAILURE;
        }
    };

    for frame in 0..MAX_DEMO_TICKS {
        // Scripted input: weave across the road, fire whenever armed
        let phase = (frame / 90) % 2 == 0;
        let input = TickInput {
            left: phase,
            right: !phase,
            fire: frame % 30 == 0,
            ..Default::default()
        };

        let events = session.advance(&input, SIM_DT);
        for command in audio::plan(&events, max_track) {
            log::debug!("audio: {command:?}");
        }

        if session.state().phase != GamePhase::Running {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "run over: {:?} at level {}, score {}, high score {}",
        state.phase,
        state.level,
        state.score,
        state.high_score
    );
    ExitCode::SUCCESS
}
