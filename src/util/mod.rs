pub mod parse;
pub mod permission;
