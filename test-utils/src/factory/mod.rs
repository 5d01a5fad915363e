//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories that need a
//! parent guild create it themselves when one is not supplied.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let guild = factory::create_guild(&db).await?;
//! let warning = factory::warning::WarningFactory::new(&db, &guild.guild_id)
//!     .user_id("42")
//!     .reason(Some("spam".to_string()))
//!     .build()
//!     .await?;
//! ```

pub mod guild;
pub mod guild_settings;
pub mod helpers;
pub mod warning;

pub use guild::create_guild;
pub use guild_settings::create_guild_settings;
pub use warning::create_warning;
