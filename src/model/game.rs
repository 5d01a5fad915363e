//! Tic-tac-toe board and session state.
//!
//! These types hold the rules of the game and nothing else: no Discord types, no
//! locking, no rendering. The registry in `service::game` owns live sessions and the
//! renderer in `bot::render::game` turns a session into a message payload.

use std::time::Instant;

use crate::error::game::GameError;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// The eight winning lines, checked in order: rows, columns, then diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A player's symbol. X belongs to the player who started the game and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

/// A cell coordinate on the board, always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Builds a position from its row-major index (0 is top left, 8 is bottom right).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// All nine positions in row-major order.
    #[cfg(test)]
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Position::from_index)
    }
}

/// Outcome of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win(Mark),
    Tie,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.row][position.col]
    }

    /// Places a mark on an empty cell. Marked cells never change.
    pub fn place(&mut self, position: Position, mark: Mark) -> Result<(), GameError> {
        let cell = &mut self.cells[position.row][position.col];
        if *cell != Cell::Empty {
            return Err(GameError::CellOccupied);
        }
        *cell = Cell::Marked(mark);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| *cell != Cell::Empty)
    }

    #[cfg(test)]
    pub fn mark_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    /// Evaluates the board for a terminal state.
    ///
    /// A completed line wins even when the board is also full, so lines are checked
    /// before the tie condition.
    pub fn evaluate(&self) -> GameResult {
        for line in LINES {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            if let Cell::Marked(mark) = a {
                if a == b && b == c {
                    return GameResult::Win(mark);
                }
            }
        }

        if self.is_full() {
            return GameResult::Tie;
        }

        GameResult::InProgress
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub mark: Mark,
    pub result: GameResult,
    /// Session state after the move was applied.
    pub session: GameSession,
}

/// One game bound to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    id: u64,
    player_x: u64,
    player_o: u64,
    board: Board,
    turn: Mark,
    result: GameResult,
    last_activity: Instant,
}

impl GameSession {
    /// Creates a game with an empty board where `player_x` moves first.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - New in-progress session
    /// - `Err(GameError::SelfPlay)` - Both players are the same user
    pub fn new(id: u64, player_x: u64, player_o: u64) -> Result<Self, GameError> {
        if player_x == player_o {
            return Err(GameError::SelfPlay);
        }

        Ok(Self {
            id,
            player_x,
            player_o,
            board: Board::new(),
            turn: Mark::X,
            result: GameResult::InProgress,
            last_activity: Instant::now(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn player(&self, mark: Mark) -> u64 {
        match mark {
            Mark::X => self.player_x,
            Mark::O => self.player_o,
        }
    }

    pub fn current_player(&self) -> u64 {
        self.player(self.turn)
    }

    /// The mark a user plays with, if they are a participant.
    pub fn mark_of(&self, user_id: u64) -> Option<Mark> {
        if user_id == self.player_x {
            Some(Mark::X)
        } else if user_id == self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Applies a move for `actor` at `position`.
    ///
    /// Checks run in this order: terminal game, occupied cell, participant, turn.
    /// Every rejected move leaves the session untouched.
    ///
    /// # Returns
    /// - `Ok(MoveOutcome)` - Mark placed, turn passed and terminal state evaluated
    /// - `Err(GameError::NoActiveSession)` - The game already ended
    /// - `Err(GameError::CellOccupied)` - The cell holds a mark
    /// - `Err(GameError::NotAParticipant)` - `actor` is not one of the players
    /// - `Err(GameError::WrongTurn)` - `actor` is the player not on turn
    pub fn attempt_move(&mut self, actor: u64, position: Position) -> Result<MoveOutcome, GameError> {
        if self.result.is_terminal() {
            return Err(GameError::NoActiveSession);
        }
        if self.board.cell(position) != Cell::Empty {
            return Err(GameError::CellOccupied);
        }
        let mark = self.mark_of(actor).ok_or(GameError::NotAParticipant)?;
        if mark != self.turn {
            return Err(GameError::WrongTurn);
        }

        self.board.place(position, mark)?;
        self.turn = mark.opponent();
        self.result = self.board.evaluate();

        Ok(MoveOutcome {
            position,
            mark,
            result: self.result,
            session: self.clone(),
        })
    }

    pub(crate) fn touch(&mut self, at: Instant) {
        self.last_activity = at;
    }
}
