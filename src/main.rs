use anyhow::Context;
use chess_trainer::cli::{parse_command, TerminalApp, HELP};
use chess_trainer::core::{init_tracing, TrainerSettings};
use chess_trainer::game::ai::{Dispatch, EngineCoordinator, SearchEngine, UciEngine};
use chess_trainer::game::SessionController;
use clap::Parser;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

/// Play, watch, or drill openings against a UCI chess engine
#[derive(Parser, Debug)]
#[command(name = "chess-trainer", version, about)]
struct Args {
    /// Engine executable (defaults to STOCKFISH_PATH or a well-known location)
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Run without an engine: manual games as White and training only
    #[arg(long)]
    no_engine: bool,

    /// Settings file to use instead of the per-user one
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Opening book JSON file
    #[arg(long)]
    book: Option<PathBuf>,

    /// Statistics file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Control loop interval in milliseconds
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Log filter, e.g. `debug` or `chess_trainer=trace`
    #[arg(long)]
    log: Option<String>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(TrainerSettings::default_path);
    let mut settings = TrainerSettings::load_or_default(&settings_path);
    if let Some(engine) = args.engine {
        settings.engine_path = Some(engine);
    }
    if let Some(book) = args.book {
        settings.opening_book = Some(book);
    }
    if let Some(stats) = args.stats {
        settings.stats_path = Some(stats);
    }
    if let Some(poll_ms) = args.poll_ms {
        settings.poll_interval_ms = poll_ms;
    }
    let settings = settings.normalized();

    if args.save_settings {
        settings
            .save(&settings_path)
            .with_context(|| format!("saving settings to {}", settings_path.display()))?;
    }

    let engine: Option<Box<dyn SearchEngine>> = if args.no_engine {
        None
    } else {
        match UciEngine::discover(settings.engine_path.as_deref(), settings.engine) {
            Ok(engine) => {
                info!("[ENGINE] Using {}", engine.path().display());
                Some(Box::new(engine) as Box<dyn SearchEngine>)
            }
            Err(e) => {
                warn!("[ENGINE] No engine available: {}", e);
                println!("No engine found. Manual games as White and training still work.");
                None
            }
        }
    };

    let coordinator = EngineCoordinator::new(engine, Dispatch::Thread);
    let controller = SessionController::new(coordinator, settings.strength);
    let poll = settings.poll_interval();
    let mut app = TerminalApp::new(controller, settings);

    println!("{}", HELP);
    let input = spawn_stdin_reader();

    info!("[SESSION] Control loop running every {:?}", poll);
    loop {
        match input.recv_timeout(poll) {
            Ok(line) => match parse_command(&line) {
                Ok(Some(command)) => {
                    if !app.handle(command) {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{}", e),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        app.controller.update(Instant::now());
        app.report_events();
    }

    app.controller.stop();
    Ok(())
}

/// Forward stdin lines to the control loop so it never blocks on input
fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = unbounded();
    let spawned = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        warn!("[SESSION] Could not start input thread: {}", e);
    }
    receiver
}
