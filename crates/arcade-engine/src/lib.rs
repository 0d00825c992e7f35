pub mod api;
pub mod audio;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{ConsoleConfig, ToneConfig, TonePreset};
pub use api::game::{EngineContext, Game, GameStatus};
pub use api::types::{Button, SoundCue, ToneRequest};
pub use audio::sound::{RecordingToneSink, Sound, SoundCommand, ToneSink};
pub use crate::core::collision::{angles_within, normalize_angle, span_overlap, Aabb};
pub use crate::core::rng::Rng;
pub use crate::core::time::{Cadence, Interval};
pub use input::buttons::{ButtonLevels, ButtonPins, InputState};
pub use renderer::display::{Display, DisplayError, MemoryDisplay};
pub use renderer::frame::{
    FrameBuffer, CHAR_HEIGHT, CHAR_WIDTH, FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH,
};
