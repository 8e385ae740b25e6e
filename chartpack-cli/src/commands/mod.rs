//! Command implementations

pub mod check;
pub mod extract;
pub mod list;
pub mod manifest;
pub mod verify;
