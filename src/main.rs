use std::io::{stdout, BufWriter, Stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};

use space_shooter::display::TerminalScreen;
use space_shooter::{
    AchievementManager, EventLog, FileEventLog, GameConfig, GameController, GameModel,
    GameSummary, MemoryEventLog, PlayerStatsTracker, Screen as _,
};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS redraw / input poll

#[derive(Parser)]
#[command(name = "space_shooter")]
#[command(about = "Dodge and shoot asteroids and enemies on a small grid")]
struct Args {
    /// JSON file overriding game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where mastered achievements are appended
    #[arg(long, default_value = space_shooter::achievements::DEFAULT_LOCATION)]
    achievements: PathBuf,

    /// Keep achievement events in memory only
    #[arg(long)]
    no_save: bool,

    /// Seed for reproducible spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Log movement, shots, hits and level-ups
    #[arg(long)]
    verbose: bool,

    /// Milliseconds per simulation tick
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Diagnostic log file; the terminal is busy with the game
    #[arg(long, default_value = "space_shooter.log")]
    log_file: PathBuf,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

type Terminal = TerminalScreen<BufWriter<Stdout>>;

/// Drive ticks and forward keys until the player quits.
fn game_loop<E: EventLog>(
    controller: &mut GameController<Terminal, E>,
    rx: &mpsc::Receiver<Event>,
    tick_period: Duration,
) -> Result<()> {
    let mut tick: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char(c) => controller.handle_player_input(&c.to_string()),
                KeyCode::Up => controller.handle_player_input("W"),
                KeyCode::Left => controller.handle_player_input("A"),
                KeyCode::Down => controller.handle_player_input("S"),
                KeyCode::Right => controller.handle_player_input("D"),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_period {
            last_tick = Instant::now();
            tick += 1;
            controller
                .on_tick(tick)
                .with_context(|| format!("tick {tick} failed"))?;
        }

        controller.screen_mut().draw()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn play<E: EventLog>(args: &Args, config: GameConfig, event_log: E) -> Result<GameSummary> {
    let history = event_log.read().context("reading achievement history")?;
    log::info!("{} mastery events on record", history.len());
    for line in &history {
        log::info!("previously: {line}");
    }

    let arena = config.arena();
    let mut model = GameModel::new(config, PlayerStatsTracker::new());
    if let Some(seed) = args.seed {
        model.set_random_seed(seed);
    }

    let screen = TerminalScreen::new(BufWriter::new(stdout()), arena);
    let mut controller = GameController::new(screen, model, AchievementManager::new(event_log))?;
    controller.set_verbose(args.verbose);
    if !history.is_empty() {
        controller
            .screen_mut()
            .log(&format!("{} mastery events on record", history.len()));
    }

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

    let result = game_loop(&mut controller, &rx, Duration::from_millis(args.tick_ms.max(1)));
    controller.shutdown();
    result?;

    let mastered = controller.mastered();
    if !mastered.is_empty() {
        log::info!("Mastered this session: {}", mastered.join(", "));
    }
    Ok(controller.summary())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    space_shooter::logging::file_logger(&args.log_file)
        .with_context(|| format!("opening log file {}", args.log_file.display()))?
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let mut raw_out = stdout();
    terminal::enable_raw_mode()?;
    raw_out.execute(terminal::EnterAlternateScreen)?;
    raw_out.execute(cursor::Hide)?;

    let result = if args.no_save {
        play(&args, config, MemoryEventLog::new())
    } else {
        FileEventLog::new(args.achievements.clone())
            .context("invalid achievements location")
            .and_then(|event_log| play(&args, config, event_log))
    };

    // Always restore the terminal
    let _ = raw_out.execute(cursor::Show);
    let _ = raw_out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let summary = result?;
    println!("{summary}");
    Ok(())
}
