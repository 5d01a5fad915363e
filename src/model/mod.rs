//! Domain models and parameter types.
//!
//! Persistent models are converted from entity models at the repository boundary so
//! that SeaORM types never leak into services or command handlers. The game and
//! authorization models are pure in-memory state.

pub mod auth;
pub mod game;
pub mod guild;
pub mod warning;
