//! Tic-tac-toe session registry and game service.
//!
//! At most one game runs per channel. The registry is shared across every interaction
//! task; all reads and writes of a session happen while holding the registry lock, so
//! concurrent starts and moves in the same channel are serialized.

use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::{
    error::game::GameError,
    model::game::{GameSession, MoveOutcome, Position},
};

/// Inactivity window after which a game is abandoned and its buttons disabled.
pub const GAME_IDLE_TIMEOUT: Duration = Duration::from_secs(180);

/// Active sessions keyed by channel ID.
#[derive(Clone, Default)]
pub struct GameRegistry {
    sessions: Arc<Mutex<HashMap<u64, GameSession>>>,
    next_id: Arc<AtomicU64>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_session_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Outcome of an idle check on a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiry {
    /// The session was idle for the whole timeout and has been removed.
    Expired(GameSession),
    /// The session is still active; check again after this long.
    Pending(Duration),
    /// The session already ended or was replaced.
    Gone,
}

pub struct GameService<'a> {
    registry: &'a GameRegistry,
}

impl<'a> GameService<'a> {
    pub fn new(registry: &'a GameRegistry) -> Self {
        Self { registry }
    }

    /// Starts a game in `location` with `player_x` moving first.
    ///
    /// Checking for an existing session and inserting the new one happen under a single
    /// lock acquisition, so two concurrent starts in one channel never both succeed.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - The new session
    /// - `Err(GameError::AlreadyActive)` - A game is already running in the channel
    /// - `Err(GameError::SelfPlay)` - Both players are the same user
    pub async fn start_game(
        &self,
        location: u64,
        player_x: u64,
        player_o: u64,
    ) -> Result<GameSession, GameError> {
        let mut sessions = self.registry.sessions.lock().await;

        match sessions.entry(location) {
            Entry::Occupied(_) => Err(GameError::AlreadyActive),
            Entry::Vacant(slot) => {
                let session = GameSession::new(
                    self.registry.next_session_id(),
                    player_x,
                    player_o,
                )?;
                slot.insert(session.clone());

                tracing::debug!(
                    "Started game {} in channel {} ({} vs {})",
                    session.id(),
                    location,
                    player_x,
                    player_o
                );

                Ok(session)
            }
        }
    }

    /// Applies a move to the session running in `location`.
    ///
    /// Accepted moves refresh the session's activity timestamp. A move that ends the
    /// game removes the session from the registry.
    ///
    /// # Arguments
    /// - `location` - Channel the game runs in
    /// - `session_id` - Session the move was made on, as encoded in the button
    /// - `actor` - Discord ID of the user pressing the button
    /// - `position` - Targeted cell
    ///
    /// # Returns
    /// - `Ok(MoveOutcome)` - The accepted move and the resulting session state
    /// - `Err(GameError::NoActiveSession)` - No game in the channel or the IDs differ
    /// - `Err(GameError)` - The move broke a game rule; the board is unchanged
    pub async fn attempt_move(
        &self,
        location: u64,
        session_id: u64,
        actor: u64,
        position: Position,
    ) -> Result<MoveOutcome, GameError> {
        let mut sessions = self.registry.sessions.lock().await;

        let session = match sessions.get_mut(&location) {
            Some(session) if session.id() == session_id => session,
            _ => return Err(GameError::NoActiveSession),
        };

        let outcome = session.attempt_move(actor, position)?;
        session.touch(Instant::now());

        if outcome.result.is_terminal() {
            sessions.remove(&location);
            tracing::debug!(
                "Game {} in channel {} ended: {:?}",
                session_id,
                location,
                outcome.result
            );
        }

        Ok(outcome)
    }

    /// Removes the session in `location`, returning it if one was running.
    pub async fn end_game(&self, location: u64) -> Option<GameSession> {
        self.registry.sessions.lock().await.remove(&location)
    }

    /// Snapshot of the session running in `location`.
    #[cfg(test)]
    pub async fn get(&self, location: u64) -> Option<GameSession> {
        self.registry.sessions.lock().await.get(&location).cloned()
    }

    /// Removes the session when it has been idle for at least `timeout`.
    ///
    /// Only the session identified by `session_id` is considered; a newer game in the
    /// same channel is left alone.
    ///
    /// # Returns
    /// - `Expiry::Expired(GameSession)` - The session was removed
    /// - `Expiry::Pending(Duration)` - Time left until the session would expire
    /// - `Expiry::Gone` - The session no longer exists
    pub async fn expire_if_idle(
        &self,
        location: u64,
        session_id: u64,
        now: Instant,
        timeout: Duration,
    ) -> Expiry {
        let mut sessions = self.registry.sessions.lock().await;

        let Some(session) = sessions.get(&location).filter(|s| s.id() == session_id) else {
            return Expiry::Gone;
        };

        let idle = now.saturating_duration_since(session.last_activity());
        if idle < timeout {
            return Expiry::Pending(timeout - idle);
        }

        match sessions.remove(&location) {
            Some(session) => Expiry::Expired(session),
            None => Expiry::Gone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::game::{GameResult, Mark};

    const CHANNEL: u64 = 1000;
    const ALICE: u64 = 11;
    const BOB: u64 = 22;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[tokio::test]
    async fn second_start_in_same_channel_fails() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);

        service.start_game(CHANNEL, ALICE, BOB).await.unwrap();
        let second = service.start_game(CHANNEL, BOB, 33).await;

        assert_eq!(second, Err(GameError::AlreadyActive));
        assert_eq!(service.get(CHANNEL).await.unwrap().player(Mark::X), ALICE);
    }

    #[tokio::test]
    async fn games_in_different_channels_are_independent() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);

        let first = service.start_game(CHANNEL, ALICE, BOB).await.unwrap();
        let second = service.start_game(CHANNEL + 1, ALICE, BOB).await.unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn self_play_is_rejected_without_registering() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);

        assert_eq!(
            service.start_game(CHANNEL, ALICE, ALICE).await,
            Err(GameError::SelfPlay)
        );
        assert!(service.get(CHANNEL).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_starts_admit_exactly_one() {
        let registry = GameRegistry::new();

        let handles: Vec<_> = (0..16u64)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    GameService::new(&registry)
                        .start_game(CHANNEL, 100 + i, 200 + i)
                        .await
                })
            })
            .collect();

        let mut started = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => started += 1,
                Err(err) => assert_eq!(err, GameError::AlreadyActive),
            }
        }

        assert_eq!(started, 1);
    }

    #[tokio::test]
    async fn full_game_reports_win_and_removes_session() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let session = service.start_game(CHANNEL, ALICE, BOB).await.unwrap();
        let id = session.id();

        let moves = [
            (ALICE, pos(1, 1)),
            (BOB, pos(2, 2)),
            (ALICE, pos(0, 0)),
            (BOB, pos(2, 0)),
            (ALICE, pos(0, 1)),
            (BOB, pos(1, 0)),
        ];
        for (actor, position) in moves {
            let outcome = service.attempt_move(CHANNEL, id, actor, position).await.unwrap();
            assert_eq!(outcome.result, GameResult::InProgress);
        }

        let last = service.attempt_move(CHANNEL, id, ALICE, pos(0, 2)).await.unwrap();
        assert_eq!(last.result, GameResult::Win(Mark::X));
        assert!(service.get(CHANNEL).await.is_none());

        assert_eq!(
            service.attempt_move(CHANNEL, id, BOB, pos(2, 1)).await,
            Err(GameError::NoActiveSession)
        );
    }

    #[tokio::test]
    async fn rejected_moves_leave_session_untouched() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let id = service.start_game(CHANNEL, ALICE, BOB).await.unwrap().id();

        service.attempt_move(CHANNEL, id, ALICE, pos(0, 0)).await.unwrap();
        let before = service.get(CHANNEL).await.unwrap();

        assert_eq!(
            service.attempt_move(CHANNEL, id, BOB, pos(0, 0)).await,
            Err(GameError::CellOccupied)
        );
        assert_eq!(
            service.attempt_move(CHANNEL, id, ALICE, pos(1, 1)).await,
            Err(GameError::WrongTurn)
        );
        assert_eq!(
            service.attempt_move(CHANNEL, id, 99, pos(1, 1)).await,
            Err(GameError::NotAParticipant)
        );

        assert_eq!(service.get(CHANNEL).await.unwrap(), before);
    }

    #[tokio::test]
    async fn stale_session_id_is_not_active() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let id = service.start_game(CHANNEL, ALICE, BOB).await.unwrap().id();

        assert_eq!(
            service.attempt_move(CHANNEL, id + 1, ALICE, pos(0, 0)).await,
            Err(GameError::NoActiveSession)
        );
        assert_eq!(
            service.attempt_move(CHANNEL + 1, id, ALICE, pos(0, 0)).await,
            Err(GameError::NoActiveSession)
        );
    }

    #[tokio::test]
    async fn end_game_disables_further_moves() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let id = service.start_game(CHANNEL, ALICE, BOB).await.unwrap().id();

        assert!(service.end_game(CHANNEL).await.is_some());
        assert!(service.end_game(CHANNEL).await.is_none());
        assert_eq!(
            service.attempt_move(CHANNEL, id, ALICE, pos(0, 0)).await,
            Err(GameError::NoActiveSession)
        );
    }

    #[tokio::test]
    async fn abandoned_start_frees_channel_for_new_game() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let abandoned = service.start_game(CHANNEL, ALICE, BOB).await.unwrap().id();

        service.end_game(CHANNEL).await;
        let replacement = service.start_game(CHANNEL, BOB, ALICE).await.unwrap();

        assert_ne!(replacement.id(), abandoned);
        assert_eq!(
            service.attempt_move(CHANNEL, abandoned, ALICE, pos(0, 0)).await,
            Err(GameError::NoActiveSession)
        );
    }

    #[tokio::test]
    async fn idle_session_expires_after_timeout() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let session = service.start_game(CHANNEL, ALICE, BOB).await.unwrap();
        let started = session.last_activity();

        let early = service
            .expire_if_idle(CHANNEL, session.id(), started + Duration::from_secs(60), GAME_IDLE_TIMEOUT)
            .await;
        assert_eq!(early, Expiry::Pending(Duration::from_secs(120)));

        let late = service
            .expire_if_idle(CHANNEL, session.id(), started + GAME_IDLE_TIMEOUT, GAME_IDLE_TIMEOUT)
            .await;
        assert!(matches!(late, Expiry::Expired(ref s) if s.id() == session.id()));
        assert!(service.get(CHANNEL).await.is_none());
    }

    #[tokio::test]
    async fn expiry_ignores_newer_session_in_channel() {
        let registry = GameRegistry::new();
        let service = GameService::new(&registry);
        let old = service.start_game(CHANNEL, ALICE, BOB).await.unwrap();
        service.end_game(CHANNEL).await;
        let new = service.start_game(CHANNEL, ALICE, BOB).await.unwrap();

        let result = service
            .expire_if_idle(
                CHANNEL,
                old.id(),
                new.last_activity() + GAME_IDLE_TIMEOUT,
                GAME_IDLE_TIMEOUT,
            )
            .await;

        assert_eq!(result, Expiry::Gone);
        assert!(service.get(CHANNEL).await.is_some());
    }
}
