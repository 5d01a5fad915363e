//! Sentinel Test Utils
//!
//! Provides shared testing utilities for the sentinel bot. This crate offers a builder
//! pattern for creating test contexts with in-memory SQLite databases, factories for
//! seeding moderation data, and constructors for Serenity model objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_warnings() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_moderation_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
