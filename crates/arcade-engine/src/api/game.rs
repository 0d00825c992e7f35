use crate::api::config::ConsoleConfig;
use crate::audio::sound::Sound;
use crate::core::rng::Rng;
use crate::input::buttons::InputState;
use crate::renderer::frame::FrameBuffer;

/// Result of one game tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// A terminal condition was hit. The console stops updating the game
    /// on the tick it sees this.
    Over,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self == GameStatus::Over
    }
}

/// The core contract every game must fulfill.
///
/// Games step with constant per-tick increments; there is no delta time.
/// Anything slower than the tick rate is gated on `ctx.now_ms()`.
pub trait Game {
    /// Reset all state to the starting configuration.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Advance the simulation by one tick.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus;

    /// Render the current state. Must not change gameplay state.
    fn draw(&self, frame: &mut FrameBuffer);
}

/// Mutable access to engine services, passed to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub sound: Sound,
    pub rng: Rng,
    now_ms: u64,
    score: u32,
}

impl EngineContext {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            sound: Sound::new(config.tones, config.start_muted),
            rng: Rng::new(config.seed),
            now_ms: 0,
            score: 0,
        }
    }

    /// Monotonic time of the current tick in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&ConsoleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accumulates_and_resets() {
        let mut ctx = EngineContext::default();
        ctx.add_score(3);
        ctx.add_score(10);
        assert_eq!(ctx.score(), 13);
        ctx.reset_score();
        assert_eq!(ctx.score(), 0);
    }

    #[test]
    fn context_follows_config() {
        let config = ConsoleConfig {
            start_muted: true,
            ..ConsoleConfig::default()
        };
        let mut ctx = EngineContext::new(&config);
        assert!(ctx.sound.is_muted());
        ctx.set_now(1234);
        assert_eq!(ctx.now_ms(), 1234);
    }
}
