//! Tic-tac-toe message rendering.
//!
//! A game message is a status line plus a 3x3 grid of buttons. Each button's custom id
//! carries the session id and cell index so a press can be routed back to the right
//! session without any per-message state.

use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, Mentionable, UserId};

use crate::{
    error::internal::InternalError,
    model::game::{Cell, GameResult, GameSession, Mark, Position, BOARD_SIZE},
};

/// Prefix of every tic-tac-toe button custom id.
pub const MOVE_ID_PREFIX: &str = "ttt:";

/// Label for an empty cell; Discord rejects empty button labels.
const EMPTY_LABEL: &str = "\u{200b}";

fn mention(user_id: u64) -> String {
    UserId::new(user_id).mention().to_string()
}

/// Custom id for the button at `position` of session `session_id`.
pub fn move_id(session_id: u64, position: Position) -> String {
    format!("{}{}:{}", MOVE_ID_PREFIX, session_id, position.index())
}

/// Parses a button custom id back into the session id and targeted cell.
pub fn parse_move_id(custom_id: &str) -> Result<(u64, Position), InternalError> {
    let malformed = || InternalError::MalformedComponentId(custom_id.to_string());

    let rest = custom_id.strip_prefix(MOVE_ID_PREFIX).ok_or_else(malformed)?;
    let (session_id, index) = rest.split_once(':').ok_or_else(malformed)?;
    let session_id = session_id.parse::<u64>().map_err(|_| malformed())?;
    let position = index
        .parse::<usize>()
        .ok()
        .and_then(Position::from_index)
        .ok_or_else(malformed)?;

    Ok((session_id, position))
}

/// Status line for the current state of a session.
pub fn status_text(session: &GameSession) -> String {
    match session.result() {
        GameResult::InProgress => format!("It's {}'s turn!", mention(session.current_player())),
        GameResult::Win(mark) => format!("Game Over! {} won!", mention(session.player(mark))),
        GameResult::Tie => "Game Over! It's a tie!".to_string(),
    }
}

/// Content of the message that opens a game.
pub fn start_text(session: &GameSession) -> String {
    format!(
        "Tic Tac Toe: {} vs {}\n{}",
        mention(session.player(Mark::X)),
        mention(session.player(Mark::O)),
        status_text(session)
    )
}

/// Content shown once an abandoned game is closed.
pub fn expired_text(session: &GameSession) -> String {
    format!(
        "Tic Tac Toe: {} vs {}\nGame expired due to inactivity.",
        mention(session.player(Mark::X)),
        mention(session.player(Mark::O)),
    )
}

/// The 3x3 button grid for a session.
///
/// Marked cells are always disabled. With `disable_all` every button is disabled,
/// which is used for finished and expired games.
pub fn board_components(session: &GameSession, disable_all: bool) -> Vec<CreateActionRow> {
    let disable_all = disable_all || session.result().is_terminal();

    (0..BOARD_SIZE)
        .map(|row| {
            let buttons = (0..BOARD_SIZE)
                .filter_map(|col| Position::new(row, col))
                .map(|position| cell_button(session, position, disable_all))
                .collect();
            CreateActionRow::Buttons(buttons)
        })
        .collect()
}

fn cell_button(session: &GameSession, position: Position, disable_all: bool) -> CreateButton {
    let (label, style, marked) = match session.board().cell(position) {
        Cell::Empty => (EMPTY_LABEL, ButtonStyle::Secondary, false),
        Cell::Marked(Mark::X) => (Mark::X.symbol(), ButtonStyle::Danger, true),
        Cell::Marked(Mark::O) => (Mark::O.symbol(), ButtonStyle::Success, true),
    };

    CreateButton::new(move_id(session.id(), position))
        .label(label)
        .style(style)
        .disabled(disable_all || marked)
}
