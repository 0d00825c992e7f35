pub mod breakout;
pub mod dino;
pub mod doodle;
pub mod flappy;
pub mod heli;
pub mod knife;
pub mod mario;
pub mod pong;
pub mod snake;
pub mod stack;
pub mod tetris;
pub mod tunnel;
