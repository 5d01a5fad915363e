//! Server applications submitted through a modal form.

use serenity::all::{
    ActionRowComponent, ChannelId, ChannelType, CommandInteraction, CommandOptionType, Context,
    CreateActionRow, CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    CreateInputText, CreateInteractionResponse, CreateMessage, CreateModal, InputTextStyle,
    ModalInteraction, Permissions, UserId,
};

use crate::{
    bot::{
        command::{args::CommandArgs, reply::reply_embed},
        render::embed::{create_embed, create_error_embed, create_success_embed, BLUE, GREEN},
    },
    error::{auth::AuthError, AppError},
    service::settings::GuildSettingsService,
    state::BotState,
};

pub const APPLICATION_MODAL_ID: &str = "application";

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("set_application_channel")
            .description("Set the channel where applications will be sent")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel that receives applications",
                )
                .channel_types(vec![ChannelType::Text])
                .required(true),
            ),
        CreateCommand::new("apply").description("Submit a server application"),
    ]
}

pub async fn set_application_channel(
    ctx: &Context,
    state: &BotState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let channel = CommandArgs::new(command).required_channel("channel")?;

    GuildSettingsService::new(&state.db)
        .set_application_channel(guild_id.get(), channel.id.get())
        .await?;

    tracing::info!(
        "{} set application channel to {}",
        command.user.name,
        channel.name.as_deref().unwrap_or_default()
    );

    reply_embed(
        ctx,
        command,
        create_success_embed(
            "Application Channel Set",
            format!("Applications will now be sent to <#{}>", channel.id),
        ),
        false,
    )
    .await
}

/// Opens the application form.
pub async fn apply(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let input = |style: InputTextStyle, label: &str, id: &str, placeholder: &str, max: u16| {
        CreateActionRow::InputText(
            CreateInputText::new(style, label, id)
                .placeholder(placeholder)
                .required(true)
                .max_length(max),
        )
    };

    let modal = CreateModal::new(APPLICATION_MODAL_ID, "Server Application").components(vec![
        input(InputTextStyle::Short, "Name", "name", "Your name", 50),
        input(InputTextStyle::Short, "Age", "age", "Your age", 3),
        input(
            InputTextStyle::Paragraph,
            "Why do you want to join?",
            "reason",
            "Tell us why you want to join our server...",
            1000,
        ),
        input(
            InputTextStyle::Paragraph,
            "What can you contribute?",
            "contribution",
            "What skills or contributions can you bring to our community?",
            1000,
        ),
    ]);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    tracing::info!("{} opened application form", command.user.name);

    Ok(())
}

/// Answers of a submitted application form.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub name: String,
    pub age: String,
    pub reason: String,
    pub contribution: String,
}

impl ApplicationForm {
    /// Collects the form from `(custom_id, value)` pairs, ignoring unknown inputs.
    pub fn from_inputs<'a>(inputs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (id, value) in inputs {
            let field = match id {
                "name" => &mut form.name,
                "age" => &mut form.age,
                "reason" => &mut form.reason,
                "contribution" => &mut form.contribution,
                _ => continue,
            };
            *field = value.to_string();
        }
        form
    }

    fn from_modal(modal: &ModalInteraction) -> Self {
        Self::from_inputs(
            modal
                .data
                .components
                .iter()
                .flat_map(|row| row.components.iter())
                .filter_map(|component| match component {
                    ActionRowComponent::InputText(input) => Some((
                        input.custom_id.as_str(),
                        input.value.as_deref().unwrap_or_default(),
                    )),
                    _ => None,
                }),
        )
    }

    pub fn embed(&self, applicant: UserId) -> CreateEmbed {
        create_embed(
            "New Application",
            format!("Application from <@{}>", applicant),
            BLUE,
        )
        .field("Name", &self.name, true)
        .field("Age", &self.age, true)
        .field("Why they want to join", &self.reason, false)
        .field("Potential contributions", &self.contribution, false)
        .footer(CreateEmbedFooter::new(format!("User ID: {}", applicant)))
    }
}

/// Posts a submitted application to the guild's application channel.
pub async fn handle_submission(
    ctx: &Context,
    state: &BotState,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let guild_id = modal.guild_id.ok_or(AuthError::GuildOnly)?;

    let Some(channel_id) = GuildSettingsService::new(&state.db)
        .application_channel(guild_id.get())
        .await?
    else {
        return reply_embed(
            ctx,
            modal,
            create_error_embed(
                "Error",
                "Application channel not set. Please ask an admin to set it up.",
            ),
            true,
        )
        .await;
    };

    let channel = ChannelId::new(channel_id)
        .to_channel(ctx)
        .await
        .ok()
        .and_then(|channel| channel.guild())
        .filter(|channel| channel.guild_id == guild_id);
    let Some(channel) = channel else {
        tracing::warn!(
            "Application channel {} is missing in guild {}",
            channel_id,
            guild_id
        );
        return reply_embed(
            ctx,
            modal,
            create_error_embed(
                "Error",
                "Application channel not found. Please contact an admin.",
            ),
            true,
        )
        .await;
    };

    let form = ApplicationForm::from_modal(modal);
    channel
        .id
        .send_message(ctx, CreateMessage::new().embed(form.embed(modal.user.id)))
        .await?;

    tracing::info!(
        "Application submitted by {} in guild {}",
        modal.user.name,
        guild_id
    );

    reply_embed(
        ctx,
        modal,
        create_embed(
            "Application Submitted",
            "Your application has been submitted successfully! The staff team will review it soon.",
            GREEN,
        ),
        true,
    )
    .await
}
