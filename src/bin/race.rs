//! Headless race in the terminal
//!
//! Usage: race [--fast] [--seed N] NAME NAME...
//!
//! `--fast` runs on a simulated clock instead of waiting for real frames.

use std::process::ExitCode;
use std::time::Duration;

use race_to_the_bottom::consts::FRAME_INTERVAL_SECS;
use race_to_the_bottom::sim::SessionPhase;
use race_to_the_bottom::view::{Scene, render_text};
use race_to_the_bottom::{Clock, ManualClock, MonotonicClock, RaceLoop, Settings};

/// Redraw the board every this many frames
const DRAW_EVERY: u64 = 30;
const BOARD_COLS: usize = 60;
const BOARD_ROWS: usize = 24;

struct Args {
    fast: bool,
    seed: Option<u64>,
    names: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        fast: false,
        seed: None,
        names: Vec::new(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fast" => args.fast = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value.parse().map_err(|_| format!("invalid seed {:?}", value))?;
                args.seed = Some(seed);
            }
            _ => args.names.push(arg),
        }
    }
    Ok(args)
}

/// Drive the race until it finishes. `wait` is called between frames.
fn run<C: Clock>(race: &mut RaceLoop<C>, mut wait: impl FnMut()) {
    let mut frame = 0u64;
    loop {
        let phase = race.pump();
        if frame % DRAW_EVERY == 0 || phase != SessionPhase::Running {
            print!("{}", render_text(&Scene::capture(race.state()), BOARD_COLS, BOARD_ROWS));
        }
        if phase != SessionPhase::Running {
            break;
        }
        frame += 1;
        wait();
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::load();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let state = settings.race_state();
    let frame = Duration::from_secs_f64(FRAME_INTERVAL_SECS);

    macro_rules! race_with {
        ($clock:expr, $wait:expr) => {{
            let mut race = RaceLoop::new(state, $clock);
            for name in &args.names {
                if let Err(e) = race.add_participant(name) {
                    log::warn!("Skipping {:?}: {}", name, e);
                }
            }
            if let Err(e) = race.start() {
                log::error!("Cannot start race: {}", e);
                return ExitCode::FAILURE;
            }
            run(&mut race, $wait);
            race.state().winner.clone()
        }};
    }

    let winner = if args.fast {
        let clock = ManualClock::new();
        let ticker = clock.clone();
        race_with!(clock, || ticker.advance(frame))
    } else {
        race_with!(MonotonicClock::default(), || std::thread::sleep(frame))
    };

    match winner {
        Some(name) => log::info!("Winner: {}", name),
        None => log::info!("Time ran out with no winner"),
    }
    ExitCode::SUCCESS
}
