use thiserror::Error;

/// Rule violations reported by the tic-tac-toe engine.
///
/// None of these are fatal; they are reported back to the player who caused them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A game is already running in the channel.
    #[error("A game is already active in this location")]
    AlreadyActive,

    /// A player tried to start a game against themselves.
    #[error("Players must be distinct")]
    SelfPlay,

    /// A player tried to start a game against a bot account.
    #[error("Opponent is a bot")]
    BotOpponent,

    /// The acting player is a participant but it is the other player's turn.
    #[error("It is not this player's turn")]
    WrongTurn,

    /// The acting user is not one of the two players.
    #[error("User is not a participant of this game")]
    NotAParticipant,

    /// The targeted cell already holds a mark.
    #[error("Cell is already occupied")]
    CellOccupied,

    /// No game with the given id is running in the channel.
    #[error("No active game session")]
    NoActiveSession,
}

impl GameError {
    /// Message shown to the player, `None` for violations acknowledged silently.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyActive => Some("There's already a game in progress in this channel!"),
            Self::SelfPlay => Some("You can't play against yourself!"),
            Self::BotOpponent => Some("You can't play against bots!"),
            Self::WrongTurn => Some("It is not your turn!"),
            Self::NotAParticipant => Some("You are not part of this game!"),
            Self::CellOccupied => None,
            Self::NoActiveSession => Some("This game is no longer active."),
        }
    }
}
