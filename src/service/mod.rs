//! Service layer between command handlers and repositories.
//!
//! Services own business rules: the tic-tac-toe session registry, warning issuance and
//! guild configuration. Handlers never touch repositories directly.

pub mod game;
pub mod settings;
pub mod warning;
