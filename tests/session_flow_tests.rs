//! Session Flow Integration Tests
//!
//! Drives the session controller end to end against a scripted engine:
//! - Manual games against the engine
//! - Automatic games and engine failure
//! - Clock expiry
//! - Stale engine responses after stop
//! - Undo/redo, hints, analysis and PGN import

mod common;

use chess_trainer::game::ai::{Analysis, Dispatch, EngineCoordinator, Evaluation, RequestPurpose};
use chess_trainer::game::mode::ModeKind;
use chess_trainer::game::resources::{ClockConfig, ResultKind};
use chess_trainer::game::rules::{BoardResult, Termination};
use chess_trainer::game::types::Strength;
use chess_trainer::game::{GameError, MoveSource, SessionController, SessionEvent};
use common::{
    clock, engineless_controller, has_event, inline_controller, moves, mv, step, EngineCall,
    Scripted, ScriptedEngine,
};
use shakmaty::{Color, Square};
use std::time::{Duration, Instant};

fn strength() -> Strength {
    Strength::new(1500)
}

// ============================================================================
// Manual Games
// ============================================================================

#[test]
fn test_manual_game_requests_engine_reply() {
    let (mut controller, engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.drain_events();

    controller.submit_human_move(mv("e2e4")).unwrap();

    assert_eq!(controller.board().moves(), moves(&["e2e4"]).as_slice());
    assert!(controller.session().awaiting_engine_move());
    let events = controller.drain_events();
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::MoveCommitted { source: MoveSource::Human, .. }
    )));
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::EngineRequested { purpose: RequestPurpose::Move, .. }
    )));
    assert_eq!(
        engine.calls(),
        vec![
            EngineCall::Configure(Some(strength())),
            EngineCall::SetPosition(moves(&["e2e4"])),
            EngineCall::BestMove,
        ]
    );

    // The reply is only applied by the control loop
    assert_eq!(controller.board().ply_count(), 1);
    let events = step(&mut controller);
    assert_eq!(controller.board().ply_count(), 2);
    assert!(controller.session().is_human_turn());
    assert!(!controller.session().awaiting_engine_move());
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::MoveCommitted { side: Color::Black, source: MoveSource::Engine, .. }
    )));
}

#[test]
fn test_engine_moves_first_when_human_plays_black() {
    let (mut controller, engine) = inline_controller();
    engine.push_move("d2d4");
    controller
        .start_manual(Color::Black, clock(), strength())
        .unwrap();

    assert!(!controller.session().is_human_turn());
    step(&mut controller);

    assert_eq!(controller.board().moves(), moves(&["d2d4"]).as_slice());
    assert!(controller.session().is_human_turn());
    assert_eq!(controller.snapshot().human, Some(Color::Black));
}

#[test]
fn test_submit_notation_accepts_san_and_uci() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.submit_notation("Nf3").unwrap();
    step(&mut controller);
    controller.submit_notation("d2d4").unwrap();

    assert_eq!(controller.board().moves()[0], mv("g1f3"));
    assert_eq!(controller.board().moves()[2], mv("d2d4"));
    assert!(matches!(
        controller.submit_notation("Qxz9"),
        Err(GameError::Notation { .. })
    ));
}

#[test]
fn test_fools_mate_is_a_loss_for_the_human() {
    let (mut controller, engine) = inline_controller();
    engine.push_move("e7e5");
    engine.push_move("d8h4");
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.submit_human_move(mv("f2f3")).unwrap();
    step(&mut controller);
    controller.submit_human_move(mv("g2g4")).unwrap();
    let events = step(&mut controller);

    let record = events
        .iter()
        .find_map(|e| match e {
            SessionEvent::GameOver(record) => Some(record.clone()),
            _ => None,
        })
        .expect("checkmate ends the game");
    assert_eq!(record.kind, ResultKind::Loss);
    assert_eq!(record.termination, Termination::Checkmate);
    assert_eq!(record.board_result, BoardResult::BlackWin);
    assert_eq!(record.plies, 4);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.mode, ModeKind::Idle);
    assert!(!snapshot.clocks.running);
    assert_eq!(snapshot.last_result, Some(record));
    assert!(controller.export_pgn().ends_with("0-1\n"));
}

#[test]
fn test_resign_records_loss() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.drain_events();

    controller.resign();

    let events = controller.drain_events();
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::GameOver(record)
            if record.kind == ResultKind::Loss && record.termination == Termination::Resignation
    )));
    assert_eq!(*controller.mode(), chess_trainer::game::Mode::Idle);
}

// ============================================================================
// Rejected Moves
// ============================================================================

#[test]
fn test_rejected_moves_change_nothing() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.drain_events();
    let before = controller.snapshot();

    assert_eq!(
        controller.submit_human_move(mv("e2e5")),
        Err(GameError::IllegalMove { mv: mv("e2e5") })
    );
    assert_eq!(
        controller.submit_human_move(mv("e7e5")),
        Err(GameError::IllegalMove { mv: mv("e7e5") })
    );
    assert_eq!(controller.snapshot(), before);
    assert!(controller.drain_events().is_empty());

    // Engine's turn now
    controller.submit_human_move(mv("e2e4")).unwrap();
    let fen = controller.snapshot().fen;
    assert_eq!(
        controller.submit_human_move(mv("e7e5")),
        Err(GameError::InvalidTurn)
    );
    assert_eq!(controller.snapshot().fen, fen);
}

#[test]
fn test_idle_session_refuses_moves() {
    let mut controller = engineless_controller();
    assert_eq!(
        controller.submit_human_move(mv("e2e4")),
        Err(GameError::InvalidTurn)
    );
    assert_eq!(controller.board().ply_count(), 0);
}

// ============================================================================
// Automatic Games
// ============================================================================

#[test]
fn test_auto_mode_rejects_human_moves() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_auto(Strength::new(2500), Strength::new(800), clock())
        .unwrap();
    let fen = controller.snapshot().fen;

    assert_eq!(
        controller.submit_human_move(mv("e2e4")),
        Err(GameError::InvalidTurn)
    );
    assert_eq!(controller.snapshot().fen, fen);
    assert_eq!(controller.board().ply_count(), 0);
}

#[test]
fn test_auto_game_alternates_strengths() {
    let (mut controller, engine) = inline_controller();
    controller
        .start_auto(Strength::new(2500), Strength::new(800), clock())
        .unwrap();

    for expected in 1..=4 {
        step(&mut controller);
        assert_eq!(controller.board().ply_count(), expected);
    }

    let strengths = engine.configured_strengths();
    assert_eq!(
        &strengths[..4],
        &[
            Some(Strength::new(2500)),
            Some(Strength::new(800)),
            Some(Strength::new(2500)),
            Some(Strength::new(800)),
        ]
    );
    assert_eq!(controller.snapshot().mode, ModeKind::Auto);
}

#[test]
fn test_auto_game_stops_on_engine_failure() {
    let (mut controller, engine) = inline_controller();
    engine.push_reply(Scripted::Fail("engine crashed".to_string()));
    controller
        .start_auto(Strength::new(2500), Strength::new(800), clock())
        .unwrap();
    controller.drain_events();

    let events = step(&mut controller);

    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::EngineFailed(GameError::EngineUnavailable { .. })
    )));
    assert!(has_event(&events, |e| matches!(e, SessionEvent::Stopped)));
    assert_eq!(controller.snapshot().mode, ModeKind::Idle);
    assert_eq!(controller.board().ply_count(), 0);
    assert!(controller.session().last_result().is_none());
}

#[test]
fn test_resign_in_auto_only_stops() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_auto(Strength::new(2500), Strength::new(800), clock())
        .unwrap();
    controller.drain_events();

    controller.resign();

    let events = controller.drain_events();
    assert!(has_event(&events, |e| matches!(e, SessionEvent::Stopped)));
    assert!(!has_event(&events, |e| matches!(e, SessionEvent::GameOver(_))));
    assert!(controller.session().last_result().is_none());
}

#[test]
fn test_illegal_engine_move_is_reported_and_retryable() {
    let (mut controller, engine) = inline_controller();
    engine.push_move("a2a3");
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();

    let events = step(&mut controller);
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::EngineFailed(GameError::EngineInvalidMove { mv: bad }) if *bad == mv("a2a3")
    )));
    assert_eq!(controller.board().ply_count(), 1);
    assert_eq!(controller.snapshot().mode, ModeKind::Manual);

    controller.request_engine_move().unwrap();
    step(&mut controller);
    assert_eq!(controller.board().ply_count(), 2);
}

// ============================================================================
// Missing Engine
// ============================================================================

#[test]
fn test_modes_needing_an_engine_fail_without_one() {
    let mut controller = engineless_controller();

    assert!(matches!(
        controller.start_auto(Strength::new(2500), Strength::new(800), clock()),
        Err(GameError::EngineUnavailable { .. })
    ));
    assert!(matches!(
        controller.start_manual(Color::Black, clock(), strength()),
        Err(GameError::EngineUnavailable { .. })
    ));
    assert_eq!(controller.snapshot().mode, ModeKind::Idle);
    assert!(controller.drain_events().is_empty());
}

#[test]
fn test_engine_failure_keeps_manual_game() {
    let mut controller = engineless_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.submit_human_move(mv("e2e4")).unwrap();

    let events = controller.drain_events();
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::EngineFailed(GameError::EngineUnavailable { .. })
    )));
    assert_eq!(controller.snapshot().mode, ModeKind::Manual);
    assert_eq!(controller.board().ply_count(), 1);
}

// ============================================================================
// Clock Tests
// ============================================================================

#[test]
fn test_flag_fall_ends_game() {
    let mut controller = engineless_controller();
    controller
        .start_manual(Color::White, ClockConfig::new(1, 0), strength())
        .unwrap();
    controller.drain_events();

    for _ in 0..59 {
        assert!(controller.tick());
    }
    assert_eq!(controller.snapshot().clocks.white, 1);
    assert!(controller.drain_events().is_empty());

    assert!(!controller.tick());
    let events = controller.drain_events();
    assert!(has_event(&events, |e| matches!(e, SessionEvent::TimeExpired(Color::White))));
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::GameOver(record)
            if record.kind == ResultKind::Loss && record.termination == Termination::Timeout
    )));

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.mode, ModeKind::Idle);
    assert_eq!(snapshot.clocks.white, 0);
    assert_eq!(snapshot.clocks.black, 60);

    // Further ticks are no-ops
    assert!(!controller.tick());
    assert!(controller.drain_events().is_empty());
    assert_eq!(controller.snapshot().clocks.white, 0);
}

#[test]
fn test_only_side_to_move_loses_time() {
    let mut controller = engineless_controller();
    controller
        .start_manual(Color::White, ClockConfig::new(10, 0), strength())
        .unwrap();

    for _ in 0..5 {
        controller.tick();
    }

    let clocks = controller.snapshot().clocks;
    assert_eq!(clocks.white, 595);
    assert_eq!(clocks.black, 600);
}

#[test]
fn test_update_ticks_whole_seconds() {
    let mut controller = engineless_controller();
    controller
        .start_manual(Color::White, ClockConfig::new(1, 0), strength())
        .unwrap();

    let start = Instant::now();
    controller.update(start);
    controller.update(start + Duration::from_millis(2500));
    assert_eq!(controller.snapshot().clocks.white, 58);

    // The half second carried over completes the third
    controller.update(start + Duration::from_millis(3000));
    assert_eq!(controller.snapshot().clocks.white, 57);
}

#[test]
fn test_increment_goes_to_the_mover() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, ClockConfig::new(1, 2), strength())
        .unwrap();

    controller.submit_human_move(mv("e2e4")).unwrap();
    assert_eq!(controller.snapshot().clocks.white, 62);
    assert_eq!(controller.snapshot().clocks.black, 60);

    step(&mut controller);
    assert_eq!(controller.snapshot().clocks.black, 62);
}

// ============================================================================
// Stale Responses
// ============================================================================

#[test]
fn test_response_after_stop_is_discarded() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::Black, clock(), strength())
        .unwrap();
    controller.stop();
    controller
        .start_manual(Color::Black, clock(), strength())
        .unwrap();
    let in_flight = controller.generation();
    assert_eq!(in_flight, 5);

    controller.stop();
    assert!(controller.generation() > in_flight);
    controller.drain_events();

    let events = step(&mut controller);
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::StaleResponseDiscarded { generation } if *generation == in_flight
    )));
    assert_eq!(controller.board().ply_count(), 0);
    assert_eq!(controller.snapshot().mode, ModeKind::Idle);
}

#[test]
fn test_threaded_response_after_stop_is_discarded() {
    let (engine, _handle, release) = ScriptedEngine::gated();
    let coordinator = EngineCoordinator::new(Some(Box::new(engine)), Dispatch::Thread);
    let mut controller = SessionController::new(coordinator, strength());

    controller
        .start_manual(Color::Black, clock(), strength())
        .unwrap();
    controller.stop();
    release.send(()).unwrap();

    let mut discarded = false;
    for _ in 0..500 {
        let events = step(&mut controller);
        if has_event(&events, |e| matches!(e, SessionEvent::StaleResponseDiscarded { .. })) {
            discarded = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    assert!(discarded, "worker reply should arrive and be dropped");
    assert_eq!(controller.board().ply_count(), 0);
}

#[test]
fn test_newer_hint_supersedes_older() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    let first = controller.request_hint().unwrap();
    let second = controller.request_hint().unwrap();
    assert!(second > first);

    let events = step(&mut controller);
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::StaleResponseDiscarded { generation } if *generation == first
    )));
    let hints = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::HintReady(_)))
        .count();
    assert_eq!(hints, 1);
}

// ============================================================================
// Hints and Analysis
// ============================================================================

#[test]
fn test_hint_is_cleared_by_the_next_move() {
    let (mut controller, engine) = inline_controller();
    engine.push_move("d2d4");
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.request_hint().unwrap();
    let events = step(&mut controller);
    assert!(has_event(&events, |e| matches!(e, SessionEvent::HintReady(hint) if *hint == mv("d2d4"))));
    assert_eq!(controller.snapshot().hint, Some(mv("d2d4")));
    assert!(engine.calls().contains(&EngineCall::Configure(None)));

    controller.submit_human_move(mv("d2d4")).unwrap();
    assert_eq!(controller.snapshot().hint, None);
}

#[test]
fn test_queries_respect_engine_turn() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();

    assert_eq!(controller.request_hint(), Err(GameError::InvalidTurn));
    assert_eq!(controller.request_analysis(), Err(GameError::EngineBusy));
    assert_eq!(controller.request_engine_move(), Err(GameError::EngineBusy));
}

#[test]
fn test_analysis_reaches_snapshot() {
    let (mut controller, engine) = inline_controller();
    let analysis = Analysis {
        evaluation: Evaluation::Centipawns(35),
        best_move: Some(mv("e2e4")),
    };
    engine.push_reply(Scripted::Eval(analysis));
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.request_analysis().unwrap();
    let events = step(&mut controller);

    assert!(has_event(&events, |e| matches!(e, SessionEvent::AnalysisReady(a) if *a == analysis)));
    assert_eq!(controller.snapshot().analysis, Some(analysis));
    assert!(engine.calls().contains(&EngineCall::Evaluate));
}

#[test]
fn test_selected_square_lists_targets() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.select_square(Some(Square::E2));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.selected_square, Some(Square::E2));
    assert_eq!(snapshot.legal_targets.len(), 2);
    assert!(snapshot.legal_targets.contains(&Square::E4));

    controller.submit_human_move(mv("e2e4")).unwrap();
    assert_eq!(controller.snapshot().selected_square, None);
}

// ============================================================================
// Undo / Redo
// ============================================================================

#[test]
fn test_undo_redo_round_trip() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();
    step(&mut controller);
    controller.submit_human_move(mv("d2d4")).unwrap();
    step(&mut controller);
    let fen = controller.snapshot().fen;
    assert_eq!(controller.board().ply_count(), 4);

    for _ in 0..4 {
        assert!(controller.undo().is_some());
    }
    assert_eq!(controller.board().ply_count(), 0);
    assert_eq!(controller.undo(), None);

    for _ in 0..4 {
        assert!(controller.redo().is_some());
    }
    assert_eq!(controller.snapshot().fen, fen);
    assert_eq!(controller.redo(), None);
}

#[test]
fn test_new_move_clears_redo() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();
    step(&mut controller);
    controller.submit_human_move(mv("d2d4")).unwrap();
    step(&mut controller);

    controller.undo();
    controller.undo();
    assert!(controller.snapshot().can_redo);
    assert!(controller.session().is_human_turn());

    controller.submit_human_move(mv("g1f3")).unwrap();
    assert!(!controller.snapshot().can_redo);
    assert_eq!(controller.redo(), None);
}

#[test]
fn test_undo_of_engine_reply_requests_a_new_one() {
    let (mut controller, engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();
    step(&mut controller);
    assert_eq!(engine.search_count(), 1);
    controller.drain_events();

    // Engine to move again after taking back only its reply
    assert!(controller.undo().is_some());
    assert_eq!(controller.board().ply_count(), 1);
    assert!(controller.session().awaiting_engine_move());
    assert!(has_event(&controller.drain_events(), |e| matches!(
        e,
        SessionEvent::EngineRequested { purpose: RequestPurpose::Move, .. }
    )));
    assert_eq!(engine.search_count(), 2);

    step(&mut controller);
    assert_eq!(controller.board().ply_count(), 2);
    assert!(controller.session().is_human_turn());
    assert_eq!(controller.snapshot().mode, ModeKind::Manual);
}

#[test]
fn test_redo_onto_engine_turn_requests_a_move() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();
    step(&mut controller);
    controller.undo();
    controller.undo();
    assert!(controller.session().is_human_turn());
    assert!(!controller.session().awaiting_engine_move());

    assert_eq!(controller.redo(), Some(mv("e2e4")));
    assert!(controller.session().awaiting_engine_move());

    step(&mut controller);
    assert_eq!(controller.board().ply_count(), 2);
    assert!(controller.session().is_human_turn());
}

#[test]
fn test_undo_disabled_in_auto() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_auto(Strength::new(2500), Strength::new(800), clock())
        .unwrap();
    step(&mut controller);

    assert_eq!(controller.undo(), None);
    assert_eq!(controller.redo(), None);
    assert_eq!(controller.board().ply_count(), 1);
}

// ============================================================================
// PGN
// ============================================================================

#[test]
fn test_import_pgn_enters_review() {
    let (mut controller, _engine) = inline_controller();

    let plies = controller
        .import_pgn("[Event \"Casual\"]\n\n1. e4 e5 2. Nf3 {develops} Nc6 *\n")
        .unwrap();

    assert_eq!(plies, 4);
    assert_eq!(controller.snapshot().mode, ModeKind::Idle);
    assert_eq!(
        controller.board().moves(),
        moves(&["e2e4", "e7e5", "g1f3", "b8c6"]).as_slice()
    );
    assert!(has_event(&controller.drain_events(), |e| matches!(
        e,
        SessionEvent::Imported { plies: 4 }
    )));

    // Review works on the imported game
    assert_eq!(controller.undo(), Some(mv("b8c6")));
    assert_eq!(controller.redo(), Some(mv("b8c6")));
    assert!(!controller.session().awaiting_engine_move());
}

#[test]
fn test_import_continues_manual_game() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.drain_events();

    controller
        .import_pgn("1. e4 e5 2. Nf3 Nc6 *")
        .unwrap();

    assert_eq!(controller.snapshot().mode, ModeKind::Manual);
    assert!(controller.session().is_human_turn());
    assert!(controller.session().timer().is_running);

    controller.submit_human_move(mv("f1b5")).unwrap();
    assert!(controller.session().awaiting_engine_move());
    step(&mut controller);
    assert_eq!(controller.board().ply_count(), 6);
    assert!(controller.session().is_human_turn());
}

#[test]
fn test_import_hands_engine_its_turn() {
    let (mut controller, engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    engine.push_move("b8c6");

    controller.import_pgn("1. e4 e5 2. Nf3 *").unwrap();

    assert_eq!(controller.snapshot().mode, ModeKind::Manual);
    assert!(controller.session().awaiting_engine_move());
    let events = step(&mut controller);
    assert!(has_event(&events, |e| matches!(
        e,
        SessionEvent::MoveCommitted { side: Color::Black, source: MoveSource::Engine, .. }
    )));
    assert_eq!(controller.board().moves().last(), Some(&mv("b8c6")));
    assert!(controller.session().is_human_turn());
}

#[test]
fn test_import_finished_game_stays_idle() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();

    controller.import_pgn("1. f3 e5 2. g4 Qh4# 0-1").unwrap();

    assert_eq!(controller.snapshot().mode, ModeKind::Idle);
    assert!(!controller.session().timer().is_running);
    assert!(!controller.session().awaiting_engine_move());
}

#[test]
fn test_import_pgn_rejects_illegal_game() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();
    step(&mut controller);
    let fen = controller.snapshot().fen;

    assert!(matches!(
        controller.import_pgn("1. e4 Ke7 *"),
        Err(GameError::Notation { .. })
    ));
    assert_eq!(controller.snapshot().fen, fen);
    assert_eq!(controller.snapshot().mode, ModeKind::Manual);
}

#[test]
fn test_import_refused_during_auto() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_auto(Strength::new(2500), Strength::new(800), clock())
        .unwrap();

    assert_eq!(
        controller.import_pgn("1. e4 e5 *"),
        Err(GameError::AutoModeActive)
    );
    assert_eq!(controller.snapshot().mode, ModeKind::Auto);
}

#[test]
fn test_export_lists_players() {
    let (mut controller, _engine) = inline_controller();
    controller
        .start_manual(Color::White, clock(), strength())
        .unwrap();
    controller.submit_human_move(mv("e2e4")).unwrap();

    let pgn = controller.export_pgn();
    assert!(pgn.contains("[White \"You\"]"));
    assert!(pgn.contains("[Black \"Stockfish\"]"));
    assert!(pgn.contains("[Result \"*\"]"));
    assert!(pgn.contains("1. e4 *"));
}
