//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating what
//! Discord's API would return.
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_role;
//!
//! let manager = create_test_role(111111111, "BotManager", 0xFF0000, 10);
//! ```

pub mod role;
pub mod user;

pub use role::{create_test_role, create_test_role_with_permissions};
pub use user::create_test_user;
