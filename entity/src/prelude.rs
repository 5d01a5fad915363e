pub use super::guild::Entity as Guild;
pub use super::guild_settings::Entity as GuildSettings;
pub use super::warning::Entity as Warning;
