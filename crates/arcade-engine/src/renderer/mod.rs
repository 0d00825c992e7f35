pub mod display;
pub mod frame;
