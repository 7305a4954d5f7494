//! Terminal front end
//!
//! Reads one command per line from stdin and renders the session as text. The
//! front end is only a consumer of [`SessionController`]: it turns commands into
//! controller calls and prints the [`SessionEvent`]s that come back.
//!
//! Anything that isn't a known command is submitted as a move, so typing `e4`
//! or `g1f3` plays it.

use crate::core::TrainerSettings;
use crate::game::resources::{format_clock, ClockConfig};
use crate::game::training::OpeningBook;
use crate::game::types::{color_name, parse_color, Strength};
use crate::game::{Mode, SessionController, SessionEvent};
use crate::persistence::pgn::{read_pgn, write_pgn};
use crate::persistence::GameStats;
use shakmaty::{Color, File, Position, Rank, Square};
use std::path::PathBuf;
use tracing::warn;

pub const HELP: &str = "\
Commands:
  new [white|black] [elo]      play the engine
  auto [white_elo] [black_elo] watch engine vs engine
  train <name> [white|black]   drill an opening line
  openings                     list opening lines
  clock <minutes> [increment]  time control for the next game
  hint | analyze | engine      ask the engine (engine = retry its move)
  undo | redo | resign | stop
  select <square> | flip | board | status
  pgn [file] | import <file>   export / import the move history
  stats | help | quit
Anything else is played as a move (e4, Nf3, e7e8q, O-O).";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New {
        human: Color,
        strength: Option<Strength>,
    },
    Auto {
        white: Option<Strength>,
        black: Option<Strength>,
    },
    Train {
        name: String,
        human: Option<Color>,
    },
    Openings,
    Clock {
        minutes: u32,
        increment: u32,
    },
    Hint,
    Analyze,
    EngineMove,
    Undo,
    Redo,
    Resign,
    Stop,
    Select(Option<Square>),
    Flip,
    Board,
    Status,
    Pgn(Option<PathBuf>),
    Import(PathBuf),
    Stats,
    Help,
    Quit,
    Move(String),
}

/// Input that names a command but can't be used as typed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    Number(String),
}

fn parse_strength(text: &str) -> Result<Strength, CommandError> {
    text.parse::<u32>()
        .map(Strength::new)
        .map_err(|_| CommandError::Number(text.to_string()))
}

fn parse_number(text: &str) -> Result<u32, CommandError> {
    text.parse().map_err(|_| CommandError::Number(text.to_string()))
}

/// Parse a line; blank lines give `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "new" | "play" => {
            let human = match args.first() {
                Some(text) => {
                    parse_color(text).ok_or(CommandError::Usage("new [white|black] [elo]"))?
                }
                None => Color::White,
            };
            let strength = args.get(1).map(|text| parse_strength(text)).transpose()?;
            Command::New { human, strength }
        }
        "auto" => Command::Auto {
            white: args.first().map(|text| parse_strength(text)).transpose()?,
            black: args.get(1).map(|text| parse_strength(text)).transpose()?,
        },
        "train" => {
            let name = args
                .first()
                .ok_or(CommandError::Usage("train <name> [white|black]"))?
                .to_string();
            let human = match args.get(1) {
                Some(text) => Some(
                    parse_color(text).ok_or(CommandError::Usage("train <name> [white|black]"))?,
                ),
                None => None,
            };
            Command::Train { name, human }
        }
        "openings" | "lines" => Command::Openings,
        "clock" => {
            let minutes = args
                .first()
                .ok_or(CommandError::Usage("clock <minutes> [increment]"))?;
            Command::Clock {
                minutes: parse_number(minutes)?,
                increment: args.get(1).map(|text| parse_number(text)).transpose()?.unwrap_or(0),
            }
        }
        "hint" => Command::Hint,
        "analyze" | "analyse" | "eval" => Command::Analyze,
        "engine" | "go" => Command::EngineMove,
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "resign" => Command::Resign,
        "stop" => Command::Stop,
        "select" => match args.first() {
            Some(text) => Command::Select(Some(
                text.parse::<Square>()
                    .map_err(|_| CommandError::Usage("select <square>"))?,
            )),
            None => Command::Select(None),
        },
        "flip" => Command::Flip,
        "board" => Command::Board,
        "status" => Command::Status,
        "pgn" | "export" => Command::Pgn(args.first().map(PathBuf::from)),
        "import" => Command::Import(PathBuf::from(
            args.first().ok_or(CommandError::Usage("import <file>"))?,
        )),
        "stats" => Command::Stats,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Move(line.trim().to_string()),
    };
    Ok(Some(command))
}

/// Text rendering of the board from `orientation`'s side
pub fn render_board(controller: &SessionController) -> String {
    let snapshot = controller.snapshot();
    let board = controller.board().position().board();
    let highlighted: Vec<Square> = snapshot
        .last_move
        .map(|mv| vec![mv.from, mv.to])
        .unwrap_or_default();

    let (ranks, files): (Vec<Rank>, Vec<File>) = match snapshot.orientation {
        Color::White => (Rank::ALL.iter().rev().copied().collect(), File::ALL.to_vec()),
        Color::Black => (Rank::ALL.to_vec(), File::ALL.iter().rev().copied().collect()),
    };

    let mut out = String::new();
    for rank in &ranks {
        out.push_str(&format!("{} ", rank.char()));
        for file in &files {
            let square = Square::from_coords(*file, *rank);
            let symbol = match board.piece_at(square) {
                Some(piece) => piece.char(),
                None if snapshot.legal_targets.contains(&square) => '*',
                None => '.',
            };
            let marker = if highlighted.contains(&square) { '\'' } else { ' ' };
            out.push(symbol);
            out.push(marker);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for file in &files {
        out.push(file.char());
        out.push(' ');
    }
    out.push('\n');
    out
}

/// One-line status: mode, side to move, clocks
pub fn render_status(controller: &SessionController) -> String {
    let snapshot = controller.snapshot();
    let mut status = format!(
        "[{}] {} to move | White {} | Black {}",
        snapshot.mode,
        color_name(snapshot.side_to_move),
        format_clock(snapshot.clocks.white),
        format_clock(snapshot.clocks.black)
    );
    if let Some(progress) = &snapshot.training {
        status.push_str(&format!(
            " | {} {}/{}",
            progress.name, progress.played, progress.total
        ));
    }
    if snapshot.awaiting_engine {
        status.push_str(" | engine thinking");
    }
    if let Some(record) = &snapshot.last_result {
        if !controller.mode().is_active() {
            status.push_str(&format!(" | {}", record.summary()));
        }
    }
    status
}

/// Interactive session: controller plus the files around it
pub struct TerminalApp {
    pub controller: SessionController,
    settings: TrainerSettings,
    book: OpeningBook,
    stats: GameStats,
    stats_path: PathBuf,
}

impl TerminalApp {
    pub fn new(controller: SessionController, settings: TrainerSettings) -> Self {
        let book = OpeningBook::load_or_builtin(settings.opening_book.as_deref());
        let stats_path = settings.stats_path();
        let stats = GameStats::load_or_default(&stats_path);
        Self {
            controller,
            settings,
            book,
            stats,
            stats_path,
        }
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Run one command; returns `false` when the user asked to quit
    pub fn handle(&mut self, command: Command) -> bool {
        let clock = self.settings.clock;
        let outcome = match command {
            Command::New { human, strength } => {
                let strength = strength.unwrap_or(self.settings.strength);
                self.controller.start_manual(human, clock, strength)
            }
            Command::Auto { white, black } => self.controller.start_auto(
                white.unwrap_or(self.settings.auto_white),
                black.unwrap_or(self.settings.auto_black),
                clock,
            ),
            Command::Train { name, human } => match self.book.get(&name) {
                Some(line) => {
                    let human = human.unwrap_or_else(|| line.recommended_color());
                    if !line.description.is_empty() {
                        println!("{}", line.description);
                    }
                    self.controller.start_training(&name, &line.moves, human, clock)
                }
                None => {
                    println!("No opening named '{}'. Try 'openings'.", name);
                    Ok(())
                }
            },
            Command::Openings => {
                for (name, line) in self.book.iter() {
                    println!(
                        "  {:<12} {} ({})",
                        name,
                        line.description,
                        color_name(line.recommended_color())
                    );
                }
                Ok(())
            }
            Command::Clock { minutes, increment } => {
                self.settings.clock = ClockConfig::new(minutes, increment);
                println!(
                    "Next game: {}+{}",
                    self.settings.clock.minutes, self.settings.clock.increment
                );
                Ok(())
            }
            Command::Hint => self.controller.request_hint().map(|_| ()),
            Command::Analyze => self.controller.request_analysis().map(|_| ()),
            Command::EngineMove => self.controller.request_engine_move().map(|_| ()),
            Command::Undo => {
                // Take back the engine's reply too so it is the human's turn again
                if self.controller.undo().is_some()
                    && matches!(self.controller.mode(), Mode::Manual { .. })
                    && !self.controller.session().is_human_turn()
                {
                    self.controller.undo();
                }
                Ok(())
            }
            Command::Redo => {
                self.controller.redo();
                Ok(())
            }
            Command::Resign => {
                self.controller.resign();
                Ok(())
            }
            Command::Stop => {
                self.controller.stop();
                Ok(())
            }
            Command::Select(square) => {
                self.controller.select_square(square);
                print!("{}", render_board(&self.controller));
                Ok(())
            }
            Command::Flip => {
                let flipped = !self.controller.snapshot().orientation;
                self.controller.set_orientation(flipped);
                print!("{}", render_board(&self.controller));
                Ok(())
            }
            Command::Board => {
                print!("{}", render_board(&self.controller));
                Ok(())
            }
            Command::Status => {
                println!("{}", render_status(&self.controller));
                Ok(())
            }
            Command::Pgn(path) => {
                let pgn = self.controller.export_pgn();
                match path {
                    Some(path) => match write_pgn(&path, &pgn) {
                        Ok(()) => println!("Saved {}", path.display()),
                        Err(e) => println!("Could not write {}: {}", path.display(), e),
                    },
                    None => print!("{}", pgn),
                }
                Ok(())
            }
            Command::Import(path) => match read_pgn(&path) {
                Ok(text) => self.controller.import_pgn(&text).map(|_| ()),
                Err(e) => {
                    println!("Could not read {}: {}", path.display(), e);
                    Ok(())
                }
            },
            Command::Stats => {
                println!("{}", self.stats.summary());
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => return false,
            Command::Move(text) => self.controller.submit_notation(&text),
        };

        if let Err(e) = outcome {
            println!("{}", e);
        }
        true
    }

    /// Print queued events and record finished games
    pub fn report_events(&mut self) {
        let events = self.controller.drain_events();
        let mut board_changed = false;

        for event in events {
            match event {
                SessionEvent::GameStarted => {
                    board_changed = true;
                    println!("New game.");
                }
                SessionEvent::MoveCommitted { side, san, .. } => {
                    board_changed = true;
                    println!("{} plays {}", color_name(side), san);
                }
                SessionEvent::MoveUndone(mv) => {
                    board_changed = true;
                    println!("Took back {}", mv);
                }
                SessionEvent::MoveRedone(mv) => {
                    board_changed = true;
                    println!("Replayed {}", mv);
                }
                SessionEvent::HintReady(mv) => {
                    let san = self.controller.board().san(mv).unwrap_or_else(|| mv.to_uci());
                    println!("Hint: {}", san);
                }
                SessionEvent::AnalysisReady(analysis) => match analysis.best_move {
                    Some(best) => println!("Evaluation: {} (best {})", analysis.evaluation, best),
                    None => println!("Evaluation: {}", analysis.evaluation),
                },
                SessionEvent::TrainingProgress(progress) => {
                    println!("{}: {}/{}", progress.name, progress.played, progress.total);
                }
                SessionEvent::TrainingCompleted { name } => {
                    println!("Line '{}' complete. The engine takes over.", name);
                }
                SessionEvent::EngineFailed(e) => println!("Engine: {}", e),
                SessionEvent::TimeExpired(color) => println!("{} ran out of time.", color_name(color)),
                SessionEvent::GameOver(record) => {
                    println!("{}", record.summary());
                    self.stats.record(&record);
                    if let Err(e) = self.stats.save(&self.stats_path) {
                        warn!("[STATS] Failed to save {:?}: {}", self.stats_path, e);
                    }
                }
                SessionEvent::Stopped => println!("Game stopped."),
                SessionEvent::Imported { plies } => {
                    board_changed = true;
                    println!("Imported {} plies.", plies);
                }
                SessionEvent::EngineRequested { .. }
                | SessionEvent::StaleResponseDiscarded { .. } => {}
            }
        }

        if board_changed {
            print!("{}", render_board(&self.controller));
            println!("{}", render_status(&self.controller));
        }
    }
}
