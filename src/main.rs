//! Terminal Graytris runner (default binary).
//!
//! One loop iteration per frame: wait briefly for input and drain every
//! pending key into the session, tick the session with the wall-clock time
//! since the previous frame, then draw.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use graytris::apply_input;
use graytris::core::{FigureGenerator, Session};
use graytris::font::BitmapFont;
use graytris::input::poll_frame;
use graytris::term::{Canvas, GameView, Screen, Viewport};
use graytris::types::{SessionConfig, MAX_LEVEL, MIN_LEVEL};

/// graytris - falling blocks that fade to gray
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial level (1..9); out-of-range values are clamped
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Seed for the figure sequence (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Compiled bitmap font used to measure banner text
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Longest wait for input per frame, in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    if !(MIN_LEVEL..=MAX_LEVEL).contains(&args.level) {
        tracing::warn!(level = args.level, "initial level out of range, clamping");
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    let session = Session::new(SessionConfig::new(args.level), FigureGenerator::classic(seed));

    let mut view = GameView::default();
    if let Some(path) = &args.font {
        let font = BitmapFont::load(path)
            .with_context(|| format!("loading font {}", path.display()))?;
        view = view.with_metrics(Box::new(font));
    }

    let mut screen = Screen::new();
    screen.open()?;

    let result = run(&mut screen, &view, session, Duration::from_millis(args.frame_ms));

    // Restore the terminal even when the loop failed.
    let _ = screen.close();
    if let Err(e) = &result {
        tracing::error!("game loop failed: {e:#}");
    }
    result
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    // stdout belongs to the game screen; without a file, logs are dropped.
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(
    screen: &mut Screen,
    view: &GameView,
    mut session: Session,
    frame_wait: Duration,
) -> Result<()> {
    let mut canvas = Canvas::new(0, 0);
    let mut last = Instant::now();

    loop {
        let input = poll_frame(frame_wait)?;
        if input.resized {
            screen.invalidate();
        }
        if !apply_input(&mut session, &input) {
            tracing::info!(
                score = session.score(),
                level = session.level(),
                interrupted = input.quit,
                "quit"
            );
            return Ok(());
        }

        // Whole milliseconds only; the fraction stays in `last` for the next frame.
        let delta = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(delta as u64);
        session.tick(delta);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 30));
        view.render_into(&session, Viewport::new(w, h), &mut canvas);
        screen.present(&mut canvas)?;
    }
}
