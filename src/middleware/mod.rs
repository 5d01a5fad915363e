//! Checks that run before a command body.

pub mod auth;

#[cfg(test)]
mod test;
