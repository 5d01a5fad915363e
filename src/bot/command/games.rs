//! Coin flips and tic-tac-toe.

use std::time::Instant;

use rand::Rng;
use serenity::all::{
    ChannelId, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditMessage, MessageId, User,
};

use crate::{
    bot::{
        command::{args::CommandArgs, reply::reply},
        render::game::{board_components, expired_text, parse_move_id, start_text},
    },
    error::{game::GameError, AppError},
    service::game::{Expiry, GameRegistry, GameService, GAME_IDLE_TIMEOUT},
    state::BotState,
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("flip").description("Flip a coin"),
        CreateCommand::new("tictactoe")
            .description("Start a game of Tic Tac Toe with another player")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "opponent", "Who to play against")
                    .required(true),
            ),
    ]
}

pub async fn flip(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let face = coin_face(rand::rng().random_bool(0.5));

    tracing::info!("{} flipped a coin, got {}", command.user.name, face);

    reply(ctx, command, format!("The coin shows: **{}**", face)).await
}

fn coin_face(heads: bool) -> &'static str {
    if heads {
        "Heads 🪙"
    } else {
        "Tails 🪙"
    }
}

/// Starts a game in the invoking channel, with the challenger playing X.
pub async fn tictactoe(
    ctx: &Context,
    state: &BotState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let opponent = CommandArgs::new(command).required_user("opponent")?;
    check_opponent(opponent)?;

    let location = command.channel_id.get();
    let games = GameService::new(&state.games);
    let session = games
        .start_game(location, command.user.id.get(), opponent.id.get())
        .await?;

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(start_text(&session))
            .components(board_components(&session, false)),
    );
    if let Err(e) = command.create_response(&ctx.http, response).await {
        games.end_game(location).await;
        return Err(e.into());
    }

    tracing::info!(
        "{} started tic-tac-toe against {} in channel {}",
        command.user.name,
        opponent.name,
        location
    );

    // Without the message id no watcher can expire the game, so free the channel.
    let message = match command.get_response(&ctx.http).await {
        Ok(message) => message,
        Err(e) => {
            games.end_game(location).await;
            return Err(e.into());
        }
    };
    spawn_expiry_watcher(
        ctx.clone(),
        state.games.clone(),
        command.channel_id,
        message.id,
        session.id(),
    );

    Ok(())
}

fn check_opponent(opponent: &User) -> Result<(), GameError> {
    if opponent.bot {
        return Err(GameError::BotOpponent);
    }
    Ok(())
}

/// Applies a board button press and redraws the game message.
pub async fn handle_move(
    ctx: &Context,
    state: &BotState,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let (session_id, position) = parse_move_id(&component.data.custom_id)?;

    let outcome = GameService::new(&state.games)
        .attempt_move(
            component.channel_id.get(),
            session_id,
            component.user.id.get(),
            position,
        )
        .await?;

    let redraw = component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(start_text(&outcome.session))
                    .components(board_components(&outcome.session, false)),
            ),
        )
        .await;
    if let Err(e) = redraw {
        tracing::warn!(
            "Move by {} in game {} was recorded but the board message was not updated: {}",
            component.user.name,
            session_id,
            e
        );
        return Err(e.into());
    }

    if outcome.result.is_terminal() {
        tracing::info!(
            "Game {} in channel {} finished: {:?}",
            session_id,
            component.channel_id,
            outcome.result
        );
    }

    Ok(())
}

/// Closes the game once it has been idle for [`GAME_IDLE_TIMEOUT`].
fn spawn_expiry_watcher(
    ctx: Context,
    registry: GameRegistry,
    channel_id: ChannelId,
    message_id: MessageId,
    session_id: u64,
) {
    tokio::spawn(async move {
        let games = GameService::new(&registry);

        loop {
            let expiry = games
                .expire_if_idle(channel_id.get(), session_id, Instant::now(), GAME_IDLE_TIMEOUT)
                .await;

            match expiry {
                Expiry::Pending(remaining) => tokio::time::sleep(remaining).await,
                Expiry::Gone => break,
                Expiry::Expired(session) => {
                    tracing::info!("Game {} in channel {} expired", session_id, channel_id);

                    let edit = EditMessage::new()
                        .content(expired_text(&session))
                        .components(board_components(&session, true));
                    if let Err(e) = channel_id.edit_message(&ctx, message_id, edit).await {
                        tracing::error!("Failed to close expired game {}: {}", session_id, e);
                    }
                    break;
                }
            }
        }
    });
}
