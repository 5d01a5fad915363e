use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Stored Discord snowflakes are persisted as strings; a value that fails to
    /// parse back indicates corrupted data.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A component interaction carried a custom id the bot never issues.
    #[error("Malformed component id '{0}'")]
    MalformedComponentId(String),
}
