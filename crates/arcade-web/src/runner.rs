use arcade_console::{ConsoleRunner, Mode, StartupError};
use arcade_engine::{
    Button, ButtonLevels, ConsoleConfig, Display, DisplayError, FrameBuffer, ToneRequest, ToneSink,
};

/// The browser reads pixels straight out of wasm memory, so the panel
/// side only counts frames.
#[derive(Debug, Default)]
pub struct CanvasDisplay {
    frames: u64,
}

impl Display for CanvasDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn flush(&mut self, _frame: &FrameBuffer) -> Result<(), DisplayError> {
        self.frames += 1;
        Ok(())
    }
}

/// Collects the tone requests of one tick for the Web Audio side.
/// A stop is recorded as [`ToneRequest::SILENCE`].
#[derive(Debug, Default)]
pub struct WebTones {
    requests: Vec<ToneRequest>,
}

impl WebTones {
    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Requests as flat `(frequency, duration_ms)` word pairs.
    pub fn words(&self) -> &[u32] {
        bytemuck::cast_slice(&self.requests)
    }
}

impl ToneSink for WebTones {
    fn tone(&mut self, frequency: u32, duration_ms: u32) {
        self.requests.push(ToneRequest::new(frequency, duration_ms));
    }

    fn silence(&mut self) {
        self.requests.push(ToneRequest::SILENCE);
    }
}

/// Console runner specialised for the browser host.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps one of
/// these in a `thread_local!` and exports free functions around it.
pub struct WebRunner {
    inner: ConsoleRunner<CanvasDisplay, ButtonLevels, WebTones>,
}

impl WebRunner {
    pub fn start(config: ConsoleConfig) -> Result<Self, StartupError> {
        let inner = ConsoleRunner::start(
            config,
            CanvasDisplay::default(),
            ButtonLevels::none(),
            WebTones::default(),
        )?;
        Ok(Self { inner })
    }

    /// Run one tick. Tone requests from the previous tick are dropped first.
    pub fn tick(&mut self, now_ms: u64) {
        self.inner.tones_mut().clear();
        if let Err(e) = self.inner.tick(now_ms) {
            log::warn!("frame flush failed: {e}");
        }
    }

    /// Record a button level from a key or touch event.
    pub fn set_button(&mut self, index: usize, down: bool) {
        match Button::from_index(index) {
            Some(button) => self.inner.pins_mut().set(button, down),
            None => log::warn!("ignoring unknown button {index}"),
        }
    }

    pub fn frame_ptr(&self) -> *const u8 {
        self.inner.frame().as_bytes().as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.inner.frame().as_bytes().len() as u32
    }

    pub fn tones_ptr(&self) -> *const u32 {
        self.inner.tones().words().as_ptr()
    }

    /// Number of `u32` words (two per request).
    pub fn tones_len(&self) -> u32 {
        self.inner.tones().words().len() as u32
    }

    pub fn mode_code(&self) -> u32 {
        match self.inner.console().mode() {
            Mode::Menu => 0,
            Mode::Playing => 1,
            Mode::Paused => 2,
        }
    }

    pub fn score(&self) -> u32 {
        self.inner.console().score()
    }

    pub fn frames(&self) -> u64 {
        self.inner.display().frames
    }
}
