pub mod collision;
pub mod rng;
pub mod time;
