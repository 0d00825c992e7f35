use serde::{Deserialize, Serialize};

use crate::api::types::{SoundCue, ToneRequest};

/// Console-wide settings. Every field falls back to its default when
/// missing from the JSON source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Hold time (ms) that must be exceeded before a long press fires.
    pub long_press_ms: u64,
    /// How long the game-over frame stays up before returning to the menu.
    pub game_over_delay_ms: u64,
    /// Menu entries per screen.
    pub menu_page_size: usize,
    /// Seed for the shared RNG.
    pub seed: u64,
    /// Whether the console boots muted.
    pub start_muted: bool,
    /// Minimum time between ticks. Zero runs uncapped.
    pub tick_interval_ms: u64,
    /// Preset tones.
    pub tones: ToneConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 600,
            game_over_delay_ms: 1500,
            menu_page_size: 5,
            seed: 0x5EED,
            start_muted: false,
            tick_interval_ms: 0,
            tones: ToneConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A frequency/duration pair as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonePreset {
    pub frequency: u32,
    pub duration_ms: u32,
}

impl TonePreset {
    pub const fn new(frequency: u32, duration_ms: u32) -> Self {
        Self {
            frequency,
            duration_ms,
        }
    }

    pub fn request(self) -> ToneRequest {
        ToneRequest::new(self.frequency, self.duration_ms)
    }
}

/// The four preset cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub click: TonePreset,
    pub select: TonePreset,
    pub score: TonePreset,
    pub collision: TonePreset,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            click: TonePreset::new(2000, 15),
            select: TonePreset::new(1500, 60),
            score: TonePreset::new(2500, 40),
            collision: TonePreset::new(200, 300),
        }
    }
}

impl ToneConfig {
    pub fn preset(&self, cue: SoundCue) -> TonePreset {
        match cue {
            SoundCue::Click => self.click,
            SoundCue::Select => self.select,
            SoundCue::Score => self.score,
            SoundCue::Collision => self.collision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = ConsoleConfig::from_json("{}").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.long_press_ms, 600);
        assert_eq!(config.menu_page_size, 5);
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "long_press_ms": 800,
            "start_muted": true,
            "tones": { "collision": { "frequency": 150, "duration_ms": 500 } }
        }"#;
        let config = ConsoleConfig::from_json(json).unwrap();
        assert_eq!(config.long_press_ms, 800);
        assert!(config.start_muted);
        assert_eq!(config.tones.collision, TonePreset::new(150, 500));
        // Untouched presets keep their defaults
        assert_eq!(config.tones.click, ToneConfig::default().click);
        assert_eq!(config.game_over_delay_ms, 1500);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ConsoleConfig::from_json("{ \"seed\": \"abc\" }").is_err());
    }
}
