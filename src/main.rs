//! Snake Core entry point
//!
//! Headless runner: plays the autopilot for a fixed number of ticks, logs
//! what happens and prints the final snapshot and leaderboard as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use snake_core::sim::{Direction, GameEvent, GameState, Snapshot, TickInput, tick};
    use snake_core::{AudioTrigger, GridMetric, Settings, SettingsError, SoundEffect};

    #[derive(Parser, Debug)]
    #[command(name = "snake-core", about = "Run the snake simulation headless")]
    struct Args {
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 5000)]
        ticks: u64,

        /// RNG seed (overrides the settings file)
        #[arg(long)]
        seed: Option<u64>,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Coordinate metric: cell or pixel (overrides the settings file)
        #[arg(long)]
        metric: Option<String>,

        /// Drive straight right without the autopilot
        #[arg(long)]
        manual: bool,

        /// Print the status line every N ticks (0 = never)
        #[arg(long, default_value_t = 0)]
        status_every: u64,
    }

    /// Writes cues to the log instead of a speaker
    struct LogAudio;

    impl AudioTrigger for LogAudio {
        fn play(&mut self, effect: SoundEffect) {
            log::debug!("Sound: {}", effect.as_str());
        }
    }

    fn load_settings(args: &Args) -> Result<Settings, SettingsError> {
        let mut settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(seed) = args.seed {
            settings.seed = seed;
        }
        if let Some(metric) = &args.metric {
            settings.metric = GridMetric::from_str(metric)
                .ok_or_else(|| SettingsError::Invalid(format!("unknown metric '{}'", metric)))?;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        let settings = match load_settings(&args) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };
        log::info!(
            "Snake Core starting: {}x{} {} grid, seed {}",
            settings.grid_width,
            settings.grid_height,
            settings.metric.as_str(),
            settings.seed
        );

        let mut state = GameState::new(settings);
        if !args.manual {
            state.toggle_autopilot();
        }

        let mut audio = LogAudio;
        let mut previous: Option<Snapshot> = None;
        let mut apples = 0u64;
        let mut crashes = 0u64;

        for _ in 0..args.ticks {
            // The autopilot only steers a moving snake, so kick it off after each reset
            let input = if state.direction == Direction::None {
                TickInput::turn(Direction::Right)
            } else {
                TickInput::default()
            };
            let snap = tick(&mut state, &input);
            audio.observe(previous.as_ref(), &snap);

            match snap.event {
                GameEvent::AteApple => apples += 1,
                GameEvent::Collided(_) => crashes += 1,
                GameEvent::None => {}
            }
            if args.status_every > 0 && state.clock % args.status_every == 0 {
                log::info!("[{}] {}", state.clock, snap.status_line());
            }
            previous = Some(snap);
        }

        log::info!(
            "Done after {} ticks: {} apples, {} crashes, best score {}",
            args.ticks,
            apples,
            crashes,
            state.best_score
        );

        let snapshot = match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let high_scores = match state.high_scores.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize high scores: {}", e);
                return ExitCode::FAILURE;
            }
        };
        println!("{}", snapshot);
        println!("{}", high_scores);
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedders drive the library directly on wasm32
}
