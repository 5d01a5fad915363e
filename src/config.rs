use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    /// Guild to register slash commands in; commands are registered globally when unset.
    pub discord_guild_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            discord_bot_token: required_var("DISCORD_BOT_TOKEN")?,
            discord_guild_id: optional_id_var("DISCORD_GUILD_ID")?,
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_id_var(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_var_names_the_variable() {
        let err = required_var("SENTINEL_TEST_UNSET_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "SENTINEL_TEST_UNSET_VAR"));
    }

    #[test]
    fn optional_guild_id_parses_or_rejects() {
        std::env::set_var("SENTINEL_TEST_GUILD_OK", " 1308891968004292618 ");
        std::env::set_var("SENTINEL_TEST_GUILD_BAD", "my-guild");
        std::env::set_var("SENTINEL_TEST_GUILD_EMPTY", "");

        assert_eq!(
            optional_id_var("SENTINEL_TEST_GUILD_OK").unwrap(),
            Some(1308891968004292618)
        );
        assert!(matches!(
            optional_id_var("SENTINEL_TEST_GUILD_BAD"),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
        assert_eq!(optional_id_var("SENTINEL_TEST_GUILD_EMPTY").unwrap(), None);
        assert_eq!(optional_id_var("SENTINEL_TEST_GUILD_UNSET").unwrap(), None);
    }
}
