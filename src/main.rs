//! Panzer Dash headless runner
//!
//! Plays one match with the autopilot at the wheel and a fixed timestep, then
//! reports the outcome. Useful for balance passes over a tuning file.

use std::path::PathBuf;

use clap::Parser;

use panzer_dash::consts::FRAME_DT;
use panzer_dash::sim::{GameEvent, GamePhase, GameState, Level, LevelId, MatchSetup, Terrain, TickInput, tick};
use panzer_dash::ui::Hud;
use panzer_dash::{Result, Settings, Tuning};

/// Blocking border drawn around the stand-in terrain
const BORDER: u32 = 16;

#[derive(Parser, Debug)]
#[command(name = "panzer-dash")]
#[command(about = "Run a headless Panzer Dash match driven by the autopilot")]
struct Cli {
    /// Match seed (level pick, tank parts, powerups)
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Level number 1-6; picked from the seed when omitted
    #[arg(long)]
    level: Option<u8>,
    #[arg(long, default_value_t = 36_000)]
    max_frames: u32,
    /// Settings file; unlocks are saved back to it
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Balance overrides: a bare JSON object with only the fields to change, or a saved tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Career rules: a win with standard parts unlocks content
    #[arg(long)]
    career: bool,
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = cli.settings.as_deref().map(Settings::load).unwrap_or_default();
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut setup = MatchSetup::random(cli.seed);
    if let Some(n) = cli.level {
        setup.level = LevelId::from_number(n)?;
    }
    setup.unlock_content = cli.career;

    let level = Level::builtin(setup.level);
    let (width, height) = level.size;
    let terrain = Terrain::walled(width, height, BORDER);
    let mut state = GameState::new(&setup, level, terrain, tuning)?;

    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut unlocked = false;
    let mut frames = 0;

    'frames: while frames < cli.max_frames {
        tick(&mut state, &input, FRAME_DT);
        frames += 1;

        for event in &state.events {
            match event {
                GameEvent::ContentUnlocked => unlocked = true,
                GameEvent::ScreenChange => break 'frames,
                other => log::trace!("frame {frames}: {other:?}"),
            }
        }
        if state.phase == GamePhase::GameOver {
            input.confirm = true;
        }
    }

    let hud = Hud::from_state(&state);
    match hud.banner {
        Some(banner) => println!("{} ({frames} frames)", banner.text.replace('\n', " ")),
        None => println!("No result after {frames} frames"),
    }
    println!(
        "Objective: player {:.0}%, enemy {:.0}%",
        hud.player_objective * 100.0,
        hud.enemy_objective * 100.0
    );

    if unlocked {
        settings.record_unlock();
        if let Some(path) = &cli.settings {
            settings.save(path)?;
        }
    }
    Ok(())
}
