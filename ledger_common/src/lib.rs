mod coins;

pub mod helpers;
pub mod op;
mod secret;

pub use coins::{Coins, STARTING_BALANCE};
pub use secret::Secret;
