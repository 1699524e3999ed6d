mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bomb_buster::assets::SpriteSheet;
use bomb_buster::compute::{init_state, tick};
use bomb_buster::config::GameConfig;
use bomb_buster::entities::GameState;
use bomb_buster::input::{InputSignal, InputTracker};
use bomb_buster::scene::build_scene;

#[derive(Parser, Debug)]
#[command(name = "bomb_buster", about = "Dodge the bombs, shoot them down")]
struct Cli {
    /// JSON file overriding the default game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for hazard placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON sprite sheet replacing the built-in glyphs
    #[arg(long)]
    sprites: Option<PathBuf>,

    /// Write logs here (the terminal itself is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

enum Outcome {
    Quit,
    GameOver,
}

// ── Startup ───────────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path).context("loading game config"),
        None => {
            let config = GameConfig::default();
            config.validate().context("default game config")?;
            Ok(config)
        }
    }
}

fn load_sprites(path: Option<&Path>) -> Result<SpriteSheet> {
    match path {
        Some(path) => SpriteSheet::load(path).context("loading sprite sheet"),
        None => Ok(SpriteSheet::default()),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input → simulation → render, once per frame, paced to the target rate.
///
/// A quit key observed while draining input ends the loop before the next
/// simulation step.  Game over renders the final frame, holds it, and ends.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    config: &GameConfig,
    sheet: &SpriteSheet,
    rx: &mpsc::Receiver<Event>,
) -> Result<Outcome> {
    let frame_budget = config.frame_duration();
    let mut tracker = InputTracker::new();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if tracker.handle_event(&ev, state.frame) == InputSignal::Quit {
                log::info!("quit requested on frame {}", state.frame);
                return Ok(Outcome::Quit);
            }
        }

        let input = tracker.snapshot(state.frame);
        *state = tick(state, &input, config);

        let scene = build_scene(state);
        let (cols, rows) = terminal::size()?;
        display::render(out, &scene, sheet, cols, rows)?;

        if scene.game_over {
            thread::sleep(config.game_over_hold());
            return Ok(Outcome::GameOver);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Anything that can fail on bad files fails here, before the terminal
    // switches into raw mode.
    let config = load_config(cli.config.as_deref())?;
    let sheet = load_sprites(cli.sprites.as_deref())?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = init_state(&config, &mut rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut state, &config, &sheet, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result? {
        Outcome::GameOver => println!("Game over! Final score: {}", state.score.value()),
        Outcome::Quit => println!("Score: {}", state.score.value()),
    }
    Ok(())
}
