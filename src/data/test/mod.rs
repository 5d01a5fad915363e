mod guild;
mod guild_settings;
mod warning;
