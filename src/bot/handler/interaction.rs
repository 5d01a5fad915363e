//! Interaction routing.
//!
//! Slash commands go through the command registry. Buttons and modals are routed by
//! their custom id; anything unrecognised is logged and ignored.

use serenity::all::{ComponentInteraction, Context, Interaction, ModalInteraction};

use crate::{
    bot::{
        command::{self, applications, games, reply::report_error, tickets},
        render::game::MOVE_ID_PREFIX,
    },
    error::AppError,
    state::BotState,
};

pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => command::handle_command(&ctx, state, &command).await,
        Interaction::Component(component) => {
            if let Err(err) = handle_component(state, &ctx, &component).await {
                report_error(&ctx, &component, err).await;
            }
        }
        Interaction::Modal(modal) => {
            if let Err(err) = handle_modal(state, &ctx, &modal).await {
                report_error(&ctx, &modal, err).await;
            }
        }
        _ => {}
    }
}

async fn handle_component(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let custom_id = component.data.custom_id.as_str();

    if custom_id.starts_with(MOVE_ID_PREFIX) {
        games::handle_move(ctx, state, component).await
    } else if custom_id == tickets::CLOSE_TICKET_ID {
        tickets::handle_close(ctx, component).await
    } else {
        tracing::debug!("Ignoring component interaction {}", custom_id);
        Ok(())
    }
}

async fn handle_modal(
    state: &BotState,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    if modal.data.custom_id == applications::APPLICATION_MODAL_ID {
        applications::handle_submission(ctx, state, modal).await
    } else {
        tracing::debug!("Ignoring modal submission {}", modal.data.custom_id);
        Ok(())
    }
}
