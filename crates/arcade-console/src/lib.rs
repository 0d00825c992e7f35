pub mod catalog;
pub mod console;
pub mod games;
pub mod overlay;
pub mod runner;

pub use catalog::{Cartridge, GameId};
pub use console::{Console, Mode};
pub use runner::{ConsoleRunner, StartupError, TickOutcome};
