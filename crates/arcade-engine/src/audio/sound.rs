use crate::api::config::ToneConfig;
use crate::api::types::{SoundCue, ToneRequest};

/// Hardware side of the buzzer.
pub trait ToneSink {
    /// Start a tone. Must return immediately.
    fn tone(&mut self, frequency: u32, duration_ms: u32);
    /// Silence any running tone.
    fn silence(&mut self);
}

/// A command queued by game logic during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCommand {
    Tone(ToneRequest),
    Stop,
}

impl SoundCommand {
    /// Forward this command to a tone sink.
    pub fn send(self, sink: &mut impl ToneSink) {
        match self {
            SoundCommand::Tone(req) => sink.tone(req.frequency, req.duration_ms),
            SoundCommand::Stop => sink.silence(),
        }
    }
}

/// Non-blocking sound queue with a global mute flag.
///
/// Requests made while muted are dropped. Commands accumulate until the
/// runner drains them at the end of the tick.
#[derive(Debug, Clone)]
pub struct Sound {
    muted: bool,
    presets: ToneConfig,
    pending: Vec<SoundCommand>,
}

impl Sound {
    pub fn new(presets: ToneConfig, muted: bool) -> Self {
        Self {
            muted,
            presets,
            pending: Vec::with_capacity(8),
        }
    }

    /// Request a tone. No-op when muted.
    pub fn play(&mut self, frequency: u32, duration_ms: u32) {
        if self.muted {
            return;
        }
        self.pending
            .push(SoundCommand::Tone(ToneRequest::new(frequency, duration_ms)));
    }

    /// Play one of the preset cues.
    pub fn cue(&mut self, cue: SoundCue) {
        let preset = self.presets.preset(cue);
        self.play(preset.frequency, preset.duration_ms);
    }

    /// Silence immediately.
    pub fn stop(&mut self) {
        self.pending.push(SoundCommand::Stop);
    }

    /// Flip the mute flag. Becoming muted also silences any running tone.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.stop();
        }
        log::info!("sound {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Commands queued so far this tick.
    pub fn pending(&self) -> &[SoundCommand] {
        &self.pending
    }

    /// Take all queued commands.
    pub fn drain(&mut self) -> Vec<SoundCommand> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for Sound {
    fn default() -> Self {
        Self::new(ToneConfig::default(), false)
    }
}

/// Tone sink that records everything it is asked to play.
#[derive(Debug, Clone, Default)]
pub struct RecordingToneSink {
    pub played: Vec<ToneRequest>,
    pub silenced: usize,
}

impl ToneSink for RecordingToneSink {
    fn tone(&mut self, frequency: u32, duration_ms: u32) {
        self.played.push(ToneRequest::new(frequency, duration_ms));
    }

    fn silence(&mut self) {
        self.silenced += 1;
    }
}
