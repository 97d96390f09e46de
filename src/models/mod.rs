//! Domain models for the EconoArena inventory ledger

mod movement;
mod product;
mod user;

pub use movement::*;
pub use product::*;
pub use user::*;
