//! Embed builders shared by every command.

use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter, Mentionable, Timestamp, User};

use crate::model::warning::NO_REASON;

pub const BLUE: Colour = Colour::new(0x3498DB);
pub const RED: Colour = Colour::new(0xE74C3C);
pub const GREEN: Colour = Colour::new(0x2ECC71);
pub const GOLD: Colour = Colour::new(0xF1C40F);
pub const PURPLE: Colour = Colour::new(0x9B59B6);
pub const ORANGE: Colour = Colour::new(0xE67E22);

/// Colors selectable by the `embed` command, as (name, colour).
pub const EMBED_COLORS: [(&str, Colour); 5] = [
    ("blue", BLUE),
    ("red", RED),
    ("green", GREEN),
    ("gold", GOLD),
    ("purple", PURPLE),
];

/// Resolves a color name (any case), falling back to blue for unknown names.
pub fn parse_embed_color(name: Option<&str>) -> Colour {
    name.and_then(|name| {
        EMBED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, colour)| *colour)
    })
    .unwrap_or(BLUE)
}

/// Longest value Discord accepts in an embed field.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Cuts `text` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn create_embed(title: impl Into<String>, description: impl Into<String>, colour: Colour) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .colour(colour)
        .timestamp(Timestamp::now())
}

pub fn create_error_embed(title: impl Into<String>, description: impl Into<String>) -> CreateEmbed {
    create_embed(format!("❌ {}", title.into()), description, RED)
}

pub fn create_success_embed(title: impl Into<String>, description: impl Into<String>) -> CreateEmbed {
    create_embed(format!("✅ {}", title.into()), description, GREEN)
}

/// Embed announcing a warning in the channel where it was issued.
pub fn create_warning_embed(
    member: &User,
    reason: Option<&str>,
    moderator: &User,
    warning_count: u64,
) -> CreateEmbed {
    create_embed(
        "⚠️ Warning",
        format!("{} has been warned", member.mention()),
        ORANGE,
    )
    .field(
        "Reason",
        truncate(reason.unwrap_or(NO_REASON), FIELD_VALUE_LIMIT),
        false,
    )
    .field("Moderator", moderator.mention().to_string(), true)
    .field("Warning Count", warning_count.to_string(), true)
    .footer(CreateEmbedFooter::new(format!("User ID: {}", member.id)))
}
