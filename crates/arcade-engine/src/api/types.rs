use bytemuck::{Pod, Zeroable};

/// One of the five logical buttons on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Select,
}

impl Button {
    /// Every button, in polling order.
    pub const ALL: [Button; 5] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Select,
    ];

    /// Stable index into per-button tables.
    pub const fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Select => 4,
        }
    }

    /// Inverse of [`Button::index`].
    pub fn from_index(index: usize) -> Option<Button> {
        Button::ALL.get(index).copied()
    }
}

/// A tone request forwarded to the buzzer.
/// Laid out as two `u32`s so hosts can read a flat buffer of requests.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ToneRequest {
    /// Frequency in Hz. Zero means "silence".
    pub frequency: u32,
    /// Duration in milliseconds.
    pub duration_ms: u32,
}

impl ToneRequest {
    pub const WORDS: usize = 2;

    pub const SILENCE: ToneRequest = ToneRequest {
        frequency: 0,
        duration_ms: 0,
    };

    pub const fn new(frequency: u32, duration_ms: u32) -> Self {
        Self {
            frequency,
            duration_ms,
        }
    }
}

/// Preset sound categories shared by every game and the console chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// UI feedback (menu cursor).
    Click,
    /// Confirmation.
    Select,
    /// Positive gameplay event.
    Score,
    /// Damage or game over.
    Collision,
}
