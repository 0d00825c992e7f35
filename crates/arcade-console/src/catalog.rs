//! The closed set of games the console can run.
//!
//! `cartridges!` generates both the menu-facing [`GameId`] and the
//! [`Cartridge`] enum holding one game's state, so adding a game is one
//! line in the list below.

use arcade_engine::{EngineContext, FrameBuffer, Game, GameStatus, InputState};

use crate::games::{
    breakout::Breakout, dino::Dino, doodle::Doodle, flappy::Flappy, heli::Heli, knife::Knife,
    mario::Mario, pong::Pong, snake::Snake, stack::Stack, tetris::Tetris, tunnel::Tunnel,
};

macro_rules! cartridges {
    ($($id:ident => $ty:ty, $title:literal;)+) => {
        /// Menu entry. Declaration order is menu order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum GameId {
            $($id,)+
        }

        impl GameId {
            pub const ALL: &'static [GameId] = &[$(GameId::$id,)+];

            pub fn title(self) -> &'static str {
                match self {
                    $(GameId::$id => $title,)+
                }
            }
        }

        /// State of the game in the slot.
        pub enum Cartridge {
            $($id($ty),)+
        }

        impl Cartridge {
            pub fn new(id: GameId) -> Self {
                match id {
                    $(GameId::$id => Cartridge::$id(<$ty>::new()),)+
                }
            }

            pub fn id(&self) -> GameId {
                match self {
                    $(Cartridge::$id(_) => GameId::$id,)+
                }
            }

            fn as_game(&self) -> &dyn Game {
                match self {
                    $(Cartridge::$id(g) => g,)+
                }
            }

            fn as_game_mut(&mut self) -> &mut dyn Game {
                match self {
                    $(Cartridge::$id(g) => g,)+
                }
            }
        }
    };
}

cartridges! {
    Snake => Snake, "SNAKE";
    Tetris => Tetris, "TETRIS";
    Pong => Pong, "PONG";
    Flappy => Flappy, "FLAPPY BIRD";
    Breakout => Breakout, "BRICK BREAKER";
    Knife => Knife, "KNIFE THROWER";
    Mario => Mario, "MARIO RUN";
    Heli => Heli, "HELICOPTER";
    Tunnel => Tunnel, "TUNNEL";
    Doodle => Doodle, "DOODLE JUMP";
    Stack => Stack, "STACK BUILDER";
    Dino => Dino, "DINO RUN";
}

impl GameId {
    pub const COUNT: usize = Self::ALL.len();

    /// Menu entry at `index`, if any.
    pub fn from_index(index: usize) -> Option<GameId> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl Game for Cartridge {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.as_game_mut().init(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        self.as_game_mut().update(ctx, input)
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        self.as_game().draw(frame);
    }
}
