//! Interaction replies and error reporting.
//!
//! Commands, button presses and modal submissions share one reply path. Errors are
//! caught here at the interaction boundary and turned into an ephemeral notice;
//! nothing propagates back into the gateway loop.

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, ModalInteraction,
};

use crate::error::AppError;

/// An interaction the bot can answer.
pub trait Reply {
    async fn respond(&self, ctx: &Context, response: CreateInteractionResponse)
        -> serenity::Result<()>;

    async fn follow_up(
        &self,
        ctx: &Context,
        followup: CreateInteractionResponseFollowup,
    ) -> serenity::Result<()>;
}

macro_rules! impl_reply {
    ($interaction:ty) => {
        impl Reply for $interaction {
            async fn respond(
                &self,
                ctx: &Context,
                response: CreateInteractionResponse,
            ) -> serenity::Result<()> {
                self.create_response(&ctx.http, response).await
            }

            async fn follow_up(
                &self,
                ctx: &Context,
                followup: CreateInteractionResponseFollowup,
            ) -> serenity::Result<()> {
                self.create_followup(&ctx.http, followup).await.map(|_| ())
            }
        }
    };
}

impl_reply!(CommandInteraction);
impl_reply!(ComponentInteraction);
impl_reply!(ModalInteraction);

/// Replies with a plain message visible to the whole channel.
pub async fn reply(ctx: &Context, interaction: &impl Reply, content: impl Into<String>) -> Result<(), AppError> {
    interaction
        .respond(
            ctx,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(content)),
        )
        .await?;
    Ok(())
}

/// Replies with a message only the invoking user can see.
pub async fn reply_ephemeral(
    ctx: &Context,
    interaction: &impl Reply,
    content: impl Into<String>,
) -> Result<(), AppError> {
    interaction
        .respond(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

pub async fn reply_embed(
    ctx: &Context,
    interaction: &impl Reply,
    embed: CreateEmbed,
    ephemeral: bool,
) -> Result<(), AppError> {
    interaction
        .respond(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(ephemeral),
            ),
        )
        .await?;
    Ok(())
}

/// Reports a failed interaction to the user who triggered it.
///
/// Tries an initial response first and falls back to a follow-up when the
/// interaction was already answered.
pub async fn report_error(ctx: &Context, interaction: &impl Reply, err: AppError) {
    let Some(message) = err.into_user_message() else {
        if let Err(e) = interaction
            .respond(ctx, CreateInteractionResponse::Acknowledge)
            .await
        {
            tracing::debug!("Failed to acknowledge interaction: {}", e);
        }
        return;
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(message.clone())
            .ephemeral(true),
    );
    if interaction.respond(ctx, response).await.is_ok() {
        return;
    }

    let followup = CreateInteractionResponseFollowup::new()
        .content(message)
        .ephemeral(true);
    if let Err(e) = interaction.follow_up(ctx, followup).await {
        tracing::error!("Failed to report error to user: {}", e);
    }
}
