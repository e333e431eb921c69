//! Tests for GameClient synchronization against an in-memory service.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use strictly_chess::{
    BoardResponse, BoardState, ClientError, ClientErrorKind, GameClient, GameService,
    InteractionController, MOVE_FAILED_MESSAGE, MessageCategory, MoveCommand,
    RESET_FAILED_MESSAGE, Turn,
};
use tokio::sync::oneshot;

const START: [&str; 8] = [
    "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
    "RNBQKBNR",
];

const AFTER_E4: [&str; 8] = [
    "rnbqkbnr", "pppppppp", "........", "........", "....P...", "........", "PPPP.PPP",
    "RNBQKBNR",
];

fn state(rows: [&str; 8], turn: &str, message: Option<&str>) -> BoardState {
    let response = BoardResponse {
        board: rows
            .iter()
            .map(|row| row.chars().map(|c| Some(c.to_string())).collect())
            .collect(),
        turn: turn.to_string(),
        message: message.map(str::to_string),
        success: None,
    };
    BoardState::try_from(response).expect("valid test board")
}

fn network_down() -> ClientError {
    ClientError::new(ClientErrorKind::Transport, "connection refused")
}

/// Scripted service: a "current" board, failure switches and call counters.
#[derive(Default)]
struct FakeService {
    current: Mutex<Option<BoardState>>,
    after_move: Mutex<Option<BoardState>>,
    fail_fetch: AtomicBool,
    fail_move: AtomicBool,
    fail_reset: AtomicBool,
    fetches: AtomicUsize,
    moves: Mutex<Vec<String>>,
    resets: AtomicUsize,
}

impl FakeService {
    fn with_board(board: BoardState) -> Self {
        let service = Self::default();
        *service.current.lock().unwrap() = Some(board);
        service
    }
}

#[async_trait::async_trait]
impl GameService for FakeService {
    async fn fetch_board(&self) -> Result<BoardState, ClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(network_down());
        }
        self.current
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::schema("no board"))
    }

    async fn submit_move(&self, cmd: &MoveCommand) -> Result<BoardState, ClientError> {
        self.moves.lock().unwrap().push(cmd.token());
        if self.fail_move.load(Ordering::SeqCst) {
            return Err(network_down());
        }
        let next = self
            .after_move
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::schema("no board"))?;
        *self.current.lock().unwrap() = Some(next.clone());
        Ok(next)
    }

    async fn reset(&self) -> Result<(), ClientError> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reset.load(Ordering::SeqCst) {
            return Err(network_down());
        }
        *self.current.lock().unwrap() = Some(state(START, "w", None));
        Ok(())
    }
}

#[tokio::test]
async fn test_initial_state_is_empty() {
    let client = GameClient::new(FakeService::default());
    let snapshot = client.snapshot();
    assert!(snapshot.board.is_none());
    assert_eq!(snapshot.message, "");
}

#[tokio::test]
async fn test_fetch_replaces_state() {
    let client = GameClient::new(FakeService::with_board(state(START, "w", None)));
    client.fetch_state().await;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.board, Some(state(START, "w", None)));
    assert_eq!(snapshot.message, "");
    assert_eq!(strictly_chess::tui::turn_label(&snapshot), "Turn: White");
}

#[tokio::test]
async fn test_fetch_takes_server_message() {
    let client = GameClient::new(FakeService::with_board(state(
        START,
        "b",
        Some("Check! Black is in check."),
    )));
    client.fetch_state().await;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.message, "Check! Black is in check.");
    assert_eq!(snapshot.category(), MessageCategory::Alert);
}

#[tokio::test]
async fn test_fetch_failure_leaves_state_untouched() {
    let client = GameClient::new(FakeService::with_board(state(START, "w", Some("Good move"))));
    client.fetch_state().await;
    let before = client.snapshot();

    client.service().fail_fetch.store(true, Ordering::SeqCst);
    client.fetch_state().await;

    assert_eq!(client.snapshot(), before);
}

#[tokio::test]
async fn test_fetch_failure_does_not_clear_move_error() {
    let service = FakeService::with_board(state(START, "w", None));
    service.fail_move.store(true, Ordering::SeqCst);
    let client = GameClient::new(service);
    client.fetch_state().await;
    client.submit_move("e2e4".parse().unwrap()).await;

    client.service().fail_fetch.store(true, Ordering::SeqCst);
    client.fetch_state().await;
    assert_eq!(client.snapshot().message, MOVE_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_submit_move_replaces_state() {
    let service = FakeService::with_board(state(START, "w", None));
    *service.after_move.lock().unwrap() = Some(state(AFTER_E4, "b", None));
    let client = GameClient::new(service);
    client.fetch_state().await;

    client.submit_move("e2e4".parse().unwrap()).await;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.board.as_ref().map(|s| s.turn()), Some(Turn::Black));
    assert_eq!(strictly_chess::tui::turn_label(&snapshot), "Turn: Black");
    assert_eq!(*client.service().moves.lock().unwrap(), vec!["e2e4"]);
}

#[tokio::test]
async fn test_submit_move_rejection_is_ordinary_response() {
    let service = FakeService::with_board(state(START, "w", None));
    *service.after_move.lock().unwrap() = Some(state(START, "w", Some("Illegal move")));
    let client = GameClient::new(service);

    client.submit_move("e2e2".parse().unwrap()).await;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.message, "Illegal move");
    assert_eq!(snapshot.category(), MessageCategory::Neutral);
}

#[tokio::test]
async fn test_submit_move_failure_sets_message_and_keeps_board() {
    let service = FakeService::with_board(state(START, "w", None));
    *service.after_move.lock().unwrap() = Some(state(AFTER_E4, "b", None));
    let client = GameClient::new(service);
    client.fetch_state().await;
    client.submit_move("e2e4".parse().unwrap()).await;
    let board_before = client.snapshot().board;

    client.service().fail_move.store(true, Ordering::SeqCst);
    client.submit_move("e7e5".parse().unwrap()).await;

    let snapshot = client.snapshot();
    assert_eq!(snapshot.board, board_before);
    assert_eq!(snapshot.message, "Move failed. Try again.");
}

#[tokio::test]
async fn test_checkmate_message_classifies_as_success() {
    let service = FakeService::with_board(state(START, "w", None));
    *service.after_move.lock().unwrap() =
        Some(state(AFTER_E4, "b", Some("Checkmate! White wins.")));
    let client = GameClient::new(service);

    client.submit_move("d1h5".parse().unwrap()).await;
    assert_eq!(client.snapshot().category(), MessageCategory::Success);
}

#[tokio::test]
async fn test_reset_clears_message_then_fetches_once() {
    let service = FakeService::with_board(state(START, "w", None));
    *service.after_move.lock().unwrap() = Some(state(AFTER_E4, "b", Some("Good move")));
    let client = GameClient::new(service);
    client.submit_move("e2e4".parse().unwrap()).await;
    assert_eq!(client.snapshot().message, "Good move");

    client.reset_game().await;

    let service = client.service();
    assert_eq!(service.resets.load(Ordering::SeqCst), 1);
    assert_eq!(service.fetches.load(Ordering::SeqCst), 1);

    let snapshot = client.snapshot();
    assert_eq!(snapshot.message, "");
    assert_eq!(snapshot.board, Some(state(START, "w", None)));
}

#[tokio::test]
async fn test_reset_failure_sets_message_without_fetch() {
    let service = FakeService::with_board(state(START, "w", None));
    service.fail_reset.store(true, Ordering::SeqCst);
    let client = GameClient::new(service);

    client.reset_game().await;

    assert_eq!(client.snapshot().message, RESET_FAILED_MESSAGE);
    assert_eq!(client.service().fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_subscribers_are_notified() {
    let client = GameClient::new(FakeService::with_board(state(START, "w", None)));
    let mut rx = client.subscribe();
    assert!(!rx.has_changed().unwrap());

    client.fetch_state().await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().board, Some(state(START, "w", None)));

    client.service().fail_fetch.store(true, Ordering::SeqCst);
    client.fetch_state().await;
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_clicks_drive_submission() {
    let service = FakeService::with_board(state(START, "w", None));
    *service.after_move.lock().unwrap() = Some(state(AFTER_E4, "b", None));
    let client = GameClient::new(service);
    let mut controller = InteractionController::new();

    assert!(controller.on_cell_click(6, 4).unwrap().is_none());
    let cmd = controller.on_cell_click(4, 4).unwrap().expect("second click emits");
    client.submit_move(cmd).await;

    assert_eq!(*client.service().moves.lock().unwrap(), vec!["e2e4"]);
    assert_eq!(
        client.snapshot().board.map(|s| s.turn()),
        Some(Turn::Black)
    );
}

/// Service whose move responses are released one by one by the test.
#[derive(Default)]
struct GatedService {
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

#[async_trait::async_trait]
impl GameService for GatedService {
    async fn fetch_board(&self) -> Result<BoardState, ClientError> {
        Err(network_down())
    }

    async fn submit_move(&self, cmd: &MoveCommand) -> Result<BoardState, ClientError> {
        let gate = self.gates.lock().unwrap().remove(&cmd.token());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let turn = if cmd.token() == "e2e4" { "b" } else { "w" };
        Ok(state(START, turn, Some(cmd.token().as_str())))
    }

    async fn reset(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_responses_apply_in_arrival_order() {
    let (release_first, first_gate) = oneshot::channel();
    let (release_second, second_gate) = oneshot::channel();
    let service = GatedService::default();
    service
        .gates
        .lock()
        .unwrap()
        .insert("e2e4".to_string(), first_gate);
    service
        .gates
        .lock()
        .unwrap()
        .insert("g1f3".to_string(), second_gate);
    let client = GameClient::new(service);

    let first = tokio::spawn({
        let client = client.clone();
        async move { client.submit_move("e2e4".parse().unwrap()).await }
    });
    let second = tokio::spawn({
        let client = client.clone();
        async move { client.submit_move("g1f3".parse().unwrap()).await }
    });

    // The newer command answers first, the older one last.
    release_second.send(()).unwrap();
    second.await.unwrap();
    assert_eq!(client.snapshot().message, "g1f3");

    release_first.send(()).unwrap();
    first.await.unwrap();

    let snapshot = client.snapshot();
    assert_eq!(snapshot.message, "e2e4");
    assert_eq!(snapshot.board.map(|s| s.turn()), Some(Turn::Black));
}
