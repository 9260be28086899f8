//! Terminal falling-block game (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `falling_blocks::term`. The engine is advanced once per frame and the
//! screen is only redrawn when the engine reports a change.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use falling_blocks::core::{Game, GameConfig, GameSnapshot, SystemPlatform};
use falling_blocks::input::InputHandler;
use falling_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use falling_blocks::types::{GameEvents, FRAME_MS, INIT_DELAY_FALL_MS};

#[derive(Parser, Debug)]
#[command(name = "falling-blocks")]
#[command(about = "Falling-block puzzle game for the terminal", long_about = None)]
#[command(version)]
struct Args {
    /// Reject rotations that hit a side wall instead of pushing the piece back
    #[arg(long)]
    no_wall_kick: bool,

    /// Disable the shadow piece and its toggle key
    #[arg(long)]
    no_shadow: bool,

    /// Ignore the counter-clockwise rotation keys
    #[arg(long)]
    no_rotate_ccw: bool,

    /// Repeat clockwise rotation while the key is held
    #[arg(long)]
    rotation_autorepeat: bool,

    /// Fall delay at level 0, in milliseconds
    #[arg(long, default_value_t = INIT_DELAY_FALL_MS)]
    fall_delay_ms: u32,

    /// Deal the same pieces every game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is busy with the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig::default()
            .with_wall_kick(!self.no_wall_kick)
            .with_shadow(!self.no_shadow)
            .with_rotate_ccw(!self.no_rotate_ccw)
            .with_initial_fall_delay_ms(self.fall_delay_ms)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = match &args.log_file {
        Some(path) => Some(setup_logging(path)?),
        None => None,
    };

    let config = args.game_config();
    config.validate()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!("game loop failed: {err:#}");
    }
    result
}

/// File-only logging; stderr would corrupt the game screen.
fn setup_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("logging to {}", path.display());
    Ok(guard)
}

fn run(term: &mut TerminalRenderer, args: &Args, config: GameConfig) -> Result<()> {
    let platform = match args.seed {
        Some(seed) => SystemPlatform::new().with_fixed_seed(seed),
        None => SystemPlatform::new(),
    };
    tracing::info!(?config, seed = ?args.seed, "starting game");
    let mut game = Game::with_config(platform, config)?;

    let view = GameView::default();
    let mut input = InputHandler::new().with_rotation_autorepeat(args.rotation_autorepeat);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = GameSnapshot::default();

    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_frame = Instant::now();
    let mut events = GameEvents::empty();
    let mut force_redraw = true;

    loop {
        // Render only when something changed.
        if game.take_state_changed() || force_redraw {
            force_redraw = false;
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snapshot);
            view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => events |= input.handle_key_press(key),
                    // Held keys repeat through the input handler.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => input.handle_key_release(key),
                },
                Event::Resize(..) => {
                    term.invalidate();
                    force_redraw = true;
                }
                _ => {}
            }
        }

        if events.contains(GameEvents::QUIT) {
            let stats = game.stats();
            tracing::info!(score = stats.score, lines = stats.lines, level = stats.level, "quit");
            return Ok(());
        }

        // Frame.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            events |= input.update(elapsed.as_millis() as u32);
            if events.contains(GameEvents::RESTART) {
                input.reset();
            }
            game.push_events(events);
            game.tick();
            events = GameEvents::empty();
        }
    }
}
