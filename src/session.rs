//! Game session: one board, two players, alternating half-moves.

use crate::config::{ConfigError, GameConfig};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use strictly_grid::{
    Board, BoardRecord, GameStatus, GridError, GridErrorKind, MarksBalanced, Mark, Player, Point,
};
use tracing::{debug, info, instrument, warn};

/// Who chooses the moves for a mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves come from console input.
    Human,
    /// Moves come from the resolver chain.
    Engine,
}

/// Kind and parameters of one player, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Mark played.
    mark: Mark,
    /// Who moves.
    kind: PlayerKind,
    /// Win length.
    cnt_in_row: usize,
    /// Tie-break seed.
    seed: u64,
}

impl PlayerSpec {
    /// Creates a player spec.
    pub fn new(mark: Mark, kind: PlayerKind, cnt_in_row: usize, seed: u64) -> Self {
        Self {
            mark,
            kind,
            cnt_in_row,
            seed,
        }
    }

    fn build(&self) -> Result<Player, SessionError> {
        Ok(Player::with_seed(self.mark, self.cnt_in_row, self.seed)?)
    }
}

/// Persisted state of a session after a half-move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Board axes and items in placement order.
    pub board: BoardRecord,
    /// Player X then player O.
    pub players: [PlayerSpec; 2],
    /// Mark to move next.
    pub to_move: Mark,
    /// Points played so far, oldest first.
    pub history: Vec<Point>,
}

/// Specific session failures.
#[derive(Debug, Clone, Display)]
pub enum SessionErrorKind {
    /// The board or a player rejected the operation.
    #[display("{_0}")]
    Grid(GridError),

    /// Configuration could not be turned into a session.
    #[display("{_0}")]
    Config(ConfigError),

    /// A move was attempted after the game ended.
    #[display("Game is over: {_0}")]
    GameOver(String),

    /// Reading or writing a record failed.
    #[display("Session storage failed: {_0}")]
    Storage(String),

    /// Another holder of the lock panicked.
    #[display("Session lock poisoned")]
    Poisoned,
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// What went wrong.
    pub kind: SessionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<SessionErrorKind> for SessionError {
    #[track_caller]
    fn from(kind: SessionErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<GridError> for SessionError {
    #[track_caller]
    fn from(err: GridError) -> Self {
        Self::new(SessionErrorKind::Grid(err))
    }
}

impl From<ConfigError> for SessionError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        Self::new(SessionErrorKind::Config(err))
    }
}

/// One game in progress or finished.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    specs: [PlayerSpec; 2],
    to_move: Mark,
    history: Vec<Point>,
    status: GameStatus,
}

#[track_caller]
fn malformed(message: String) -> SessionError {
    warn!(%message, "Rejected session record");
    SessionError::new(SessionErrorKind::Grid(GridError::new(GridErrorKind::MalformedRecord(
        message,
    ))))
}

fn slot(mark: Mark) -> usize {
    match mark {
        Mark::X => 0,
        Mark::O => 1,
    }
}

impl GameSession {
    /// Starts a session from configuration. X moves first.
    ///
    /// Without a configured seed a random one is drawn and recorded, so a
    /// saved session replays its tie-breaks after loading.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig, x_kind: PlayerKind, o_kind: PlayerKind) -> Result<Self, SessionError> {
        config.validate()?;
        let seed = config.seed().unwrap_or_else(rand::random);
        let cnt_in_row = *config.cnt_in_row();
        let specs = [
            PlayerSpec::new(Mark::X, x_kind, cnt_in_row, seed),
            PlayerSpec::new(Mark::O, o_kind, cnt_in_row, seed.wrapping_add(1)),
        ];
        let board = config.build_board()?;
        info!(board = %board.id(), seed, "Creating game session");
        Self::assemble(board, specs, Mark::X, Vec::new())
    }

    fn assemble(
        board: Board,
        specs: [PlayerSpec; 2],
        to_move: Mark,
        history: Vec<Point>,
    ) -> Result<Self, SessionError> {
        let mut players = [specs[0].build()?, specs[1].build()?];
        let status = Self::scan_status(&board, &mut players)?;
        Ok(Self {
            board,
            players,
            specs,
            to_move,
            history,
            status,
        })
    }

    fn scan_status(board: &Board, players: &mut [Player; 2]) -> Result<GameStatus, SessionError> {
        for player in players.iter_mut() {
            let status = player.status(board)?;
            if matches!(status, GameStatus::Won(_)) {
                return Ok(status);
            }
        }
        if board.is_full() {
            return Ok(GameStatus::BoardFull);
        }
        Ok(GameStatus::InProgress)
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move next.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Kind of the player to move next.
    pub fn to_move_kind(&self) -> PlayerKind {
        self.specs[slot(self.to_move)].kind
    }

    /// Current status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Points played so far.
    pub fn history(&self) -> &[Point] {
        &self.history
    }

    /// Suggestion for the mark to move.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn suggest(&mut self) -> Result<Option<Point>, SessionError> {
        if self.status.is_terminal() {
            return Ok(None);
        }
        let player = &mut self.players[slot(self.to_move)];
        Ok(player.move_suggestion(&self.board)?)
    }

    /// Commits a move for the mark to move and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` after a terminal state, or the grid error for an
    /// occupied or out-of-range point. A rejected move keeps the turn.
    #[instrument(skip(self, point), fields(to_move = %self.to_move, point = %point))]
    pub fn play(&mut self, point: Point) -> Result<GameStatus, SessionError> {
        if self.status.is_terminal() {
            return Err(SessionError::new(SessionErrorKind::GameOver(self.status.to_string())));
        }
        let player = &mut self.players[slot(self.to_move)];
        let status = player.play(&mut self.board, point.clone()).inspect_err(|err| {
            warn!(error = %err.kind, "Move rejected");
        })?;
        self.history.push(point);
        self.to_move = self.to_move.opponent();
        self.status = status.clone();
        Ok(status)
    }

    /// Lets the engine choose and commit the next move.
    ///
    /// Returns `None` once the game is over.
    pub fn engine_step(&mut self) -> Result<Option<(Point, GameStatus)>, SessionError> {
        let Some(point) = self.suggest()? else {
            return Ok(None);
        };
        let status = self.play(point.clone())?;
        debug!(point = %point, ?status, "Engine moved");
        Ok(Some((point, status)))
    }

    /// Snapshot for persistence.
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            board: BoardRecord::from_board(&self.board),
            players: self.specs.clone(),
            to_move: self.to_move,
            history: self.history.clone(),
        }
    }

    /// Rebuilds a session from a record.
    ///
    /// # Errors
    ///
    /// Returns a malformed-record grid error when the players are not X then
    /// O with one win length, when the marks on the board are unbalanced, or
    /// when `to_move` and the history disagree with the pieces placed.
    #[instrument(skip_all, fields(moves = record.history.len()))]
    pub fn from_record(record: SessionRecord) -> Result<Self, SessionError> {
        let [x, o] = &record.players;
        if x.mark != Mark::X || o.mark != Mark::O {
            return Err(malformed(format!(
                "players should be X then O, found {} then {}",
                x.mark, o.mark
            )));
        }
        if x.cnt_in_row != o.cnt_in_row {
            return Err(malformed(format!(
                "players disagree on win length: {} and {}",
                x.cnt_in_row, o.cnt_in_row
            )));
        }

        let board = record.board.to_board()?;
        if !MarksBalanced::holds(&board) {
            return Err(malformed("marks on the board are unbalanced".to_string()));
        }
        let count = |mark: Mark| {
            board
                .items()
                .iter()
                .filter(|item| item.kind().mark() == Some(mark))
                .count()
        };
        let (x_count, o_count) = (count(Mark::X), count(Mark::O));
        let expected = if x_count == o_count { Mark::X } else { Mark::O };
        if record.to_move != expected {
            return Err(malformed(format!(
                "{} to move with {} X and {} O on the board",
                record.to_move, x_count, o_count
            )));
        }
        if record.history.len() != x_count + o_count {
            return Err(malformed(format!(
                "history has {} moves but the board holds {} pieces",
                record.history.len(),
                x_count + o_count
            )));
        }
        Self::assemble(board, record.players, record.to_move, record.history)
    }

    /// Writes the record as JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(&self.record())
            .map_err(|e| SessionError::new(SessionErrorKind::Storage(e.to_string())))?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| SessionError::new(SessionErrorKind::Storage(e.to_string())))?;
        debug!("Session saved");
        Ok(())
    }

    /// Reads a JSON record and rebuilds the session.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SessionError::new(SessionErrorKind::Storage(e.to_string())))?;
        let record: SessionRecord = serde_json::from_str(&json)
            .map_err(|e| SessionError::new(SessionErrorKind::Storage(e.to_string())))?;
        Self::from_record(record)
    }
}

/// A session behind one lock.
///
/// Each call to [`SharedSession::with_turn`] holds the lock for a whole
/// decide-and-commit cycle, so the players' segment caches never observe
/// a half-applied move.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
}

impl SharedSession {
    /// Wraps a session.
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Runs `turn` with exclusive access to the session.
    pub fn with_turn<R>(
        &self,
        turn: impl FnOnce(&mut GameSession) -> Result<R, SessionError>,
    ) -> Result<R, SessionError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| SessionError::new(SessionErrorKind::Poisoned))?;
        turn(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_moves_first_and_turns_alternate() {
        let config = GameConfig::default().with_seed(1);
        let mut session = GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine).unwrap();
        assert_eq!(session.to_move(), Mark::X);
        session.engine_step().unwrap().unwrap();
        assert_eq!(session.to_move(), Mark::O);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let config = GameConfig::default().with_seed(1);
        let mut session = GameSession::new(&config, PlayerKind::Human, PlayerKind::Engine).unwrap();
        session.play(Point::new("a", 1)).unwrap();
        let err = session.play(Point::new("a", 1)).unwrap_err();
        assert!(matches!(err.kind, SessionErrorKind::Grid(_)));
        assert_eq!(session.to_move(), Mark::O);
    }

    #[test]
    fn test_player_kind_text() {
        assert_eq!(PlayerKind::Engine.to_string(), "engine");
        assert_eq!("human".parse::<PlayerKind>().unwrap(), PlayerKind::Human);
    }
}
