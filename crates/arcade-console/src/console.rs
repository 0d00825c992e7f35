//! Menu / play / pause state machine.

use arcade_engine::{
    Button, ButtonPins, ConsoleConfig, EngineContext, FrameBuffer, Game, InputState, SoundCommand,
    SoundCue,
};

use crate::catalog::{Cartridge, GameId};
use crate::overlay;

/// Top-level console mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    Paused,
}

/// Owns the shared engine services and the game in the slot, and routes
/// each tick to the menu, the running game or the pause screen.
pub struct Console {
    config: ConsoleConfig,
    ctx: EngineContext,
    input: InputState,
    mode: Mode,
    menu_index: usize,
    cartridge: Option<Cartridge>,
    /// Set on the tick the game reported `Over`; the session is frozen
    /// until the game-over delay has passed.
    game_over_at: Option<u64>,
    last_score: Option<u32>,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            ctx: EngineContext::new(&config),
            input: InputState::new(config.long_press_ms),
            config,
            mode: Mode::Menu,
            menu_index: 0,
            cartridge: None,
            game_over_at: None,
            last_score: None,
        }
    }

    /// Sample the buttons and stamp the tick time.
    pub fn poll_input(&mut self, pins: &mut impl ButtonPins, now_ms: u64) {
        self.ctx.set_now(now_ms);
        self.input.poll(pins, now_ms);
    }

    /// Run the state machine for one tick.
    pub fn update(&mut self) {
        match self.mode {
            Mode::Menu => self.update_menu(),
            Mode::Playing => self.update_playing(),
            Mode::Paused => self.update_paused(),
        }
    }

    /// Compose the whole frame for the current mode.
    pub fn draw(&self, frame: &mut FrameBuffer) {
        match self.mode {
            Mode::Menu => overlay::draw_menu(
                frame,
                self.menu_index,
                self.config.menu_page_size,
                self.is_muted(),
            ),
            Mode::Playing | Mode::Paused => {
                if let Some(cartridge) = &self.cartridge {
                    cartridge.draw(frame);
                }
                overlay::draw_hud(frame, self.score());
                if self.is_game_over() {
                    overlay::draw_game_over(frame, self.score());
                }
                if self.mode == Mode::Paused {
                    overlay::draw_pause(frame, self.is_muted());
                }
            }
        }
    }

    /// Sound commands queued during this tick.
    pub fn drain_sound(&mut self) -> Vec<SoundCommand> {
        self.ctx.sound.drain()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    /// Game in the slot, if a session is running or paused.
    pub fn selected(&self) -> Option<GameId> {
        self.cartridge.as_ref().map(Cartridge::id)
    }

    pub fn score(&self) -> u32 {
        self.ctx.score()
    }

    /// Final score of the most recently finished session.
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// True while the game-over frame is held.
    pub fn is_game_over(&self) -> bool {
        self.game_over_at.is_some()
    }

    pub fn is_muted(&self) -> bool {
        self.ctx.sound.is_muted()
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    fn update_menu(&mut self) {
        let count = GameId::COUNT;
        if self.input.is_just_pressed(Button::Up) {
            self.menu_index = (self.menu_index + count - 1) % count;
            self.ctx.sound.cue(SoundCue::Click);
        }
        if self.input.is_just_pressed(Button::Down) {
            self.menu_index = (self.menu_index + 1) % count;
            self.ctx.sound.cue(SoundCue::Click);
        }
        if self.input.is_just_pressed(Button::Left) || self.input.is_just_pressed(Button::Right) {
            self.ctx.sound.toggle_mute();
            self.ctx.sound.cue(SoundCue::Click);
        }
        if self.input.is_just_pressed(Button::Select) {
            if let Some(id) = GameId::from_index(self.menu_index) {
                self.start(id);
            }
        }
    }

    fn start(&mut self, id: GameId) {
        self.ctx.reset_score();
        let mut cartridge = Cartridge::new(id);
        cartridge.init(&mut self.ctx);
        self.cartridge = Some(cartridge);
        self.game_over_at = None;
        self.mode = Mode::Playing;
        self.ctx.sound.cue(SoundCue::Select);
        log::info!("starting {}", id.title());
    }

    fn update_playing(&mut self) {
        let now = self.ctx.now_ms();
        if let Some(at) = self.game_over_at {
            if now.saturating_sub(at) >= self.config.game_over_delay_ms {
                self.leave_session();
            }
            return;
        }

        if self.input.is_long_pressed(Button::Select) {
            self.mode = Mode::Paused;
            log::info!("paused");
            return;
        }

        let Some(cartridge) = self.cartridge.as_mut() else {
            log::warn!("playing with an empty slot, back to menu");
            self.mode = Mode::Menu;
            return;
        };
        if cartridge.update(&mut self.ctx, &self.input).is_over() {
            let score = self.ctx.score();
            self.ctx.sound.cue(SoundCue::Collision);
            self.game_over_at = Some(now);
            self.last_score = Some(score);
            log::info!("{} over, score {}", cartridge.id().title(), score);
        }
    }

    fn update_paused(&mut self) {
        if self.input.is_just_pressed(Button::Select) {
            self.mode = Mode::Playing;
            log::info!("resumed");
        } else if self.input.is_just_pressed(Button::Left) {
            self.ctx.sound.stop();
            self.leave_session();
        } else if self.input.is_just_pressed(Button::Right) {
            self.ctx.sound.toggle_mute();
        }
    }

    fn leave_session(&mut self) {
        self.cartridge = None;
        self.game_over_at = None;
        self.mode = Mode::Menu;
        log::info!("back to menu");
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}
