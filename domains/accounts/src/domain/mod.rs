//! Domain layer for accounts

pub mod delivery;
pub mod entities;
pub mod passwords;
pub mod reset;
