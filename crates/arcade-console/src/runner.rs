use arcade_engine::{
    ButtonPins, Cadence, ConsoleConfig, Display, DisplayError, FrameBuffer, ToneSink,
};
use thiserror::Error;

use crate::console::Console;

/// Startup failed; the console must not run.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("console startup failed: {0}")]
    Display(#[from] DisplayError),
}

/// What a call to [`ConsoleRunner::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ran,
    /// Called before the configured tick interval had elapsed.
    Skipped,
}

/// Tick scheduler that wires the console to its hardware.
///
/// One tick is: poll buttons, update the state machine, redraw the whole
/// frame, hand queued sound to the tone sink, flush to the display.
/// The host supplies monotonic time and decides how often to call `tick`.
pub struct ConsoleRunner<D: Display, P: ButtonPins, T: ToneSink> {
    console: Console,
    frame: FrameBuffer,
    display: D,
    pins: P,
    tones: T,
    cadence: Cadence,
    ticks: u64,
}

impl<D: Display, P: ButtonPins, T: ToneSink> ConsoleRunner<D, P, T> {
    /// Bring the display up and build the console. A display that fails
    /// to come up is fatal.
    pub fn start(
        config: ConsoleConfig,
        mut display: D,
        pins: P,
        tones: T,
    ) -> Result<Self, StartupError> {
        if let Err(e) = display.init() {
            log::error!("display bring-up failed: {e}");
            return Err(e.into());
        }
        log::info!(
            "console ready: tick interval {} ms, muted {}",
            config.tick_interval_ms,
            config.start_muted
        );
        Ok(Self {
            cadence: Cadence::new(config.tick_interval_ms),
            console: Console::new(config),
            frame: FrameBuffer::new(),
            display,
            pins,
            tones,
            ticks: 0,
        })
    }

    /// Run one tick at `now_ms` unless the cadence says it is too early.
    pub fn tick(&mut self, now_ms: u64) -> Result<TickOutcome, DisplayError> {
        if !self.cadence.due(now_ms) {
            return Ok(TickOutcome::Skipped);
        }

        self.console.poll_input(&mut self.pins, now_ms);
        self.console.update();

        self.frame.clear();
        self.console.draw(&mut self.frame);

        for command in self.console.drain_sound() {
            command.send(&mut self.tones);
        }

        self.ticks += 1;
        self.display.flush(&self.frame)?;
        Ok(TickOutcome::Ran)
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Frame composed by the last tick.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn tones(&self) -> &T {
        &self.tones
    }

    pub fn tones_mut(&mut self) -> &mut T {
        &mut self.tones
    }

    /// Ticks that actually ran.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_engine::{Button, ButtonLevels, MemoryDisplay, RecordingToneSink};

    type TestRunner = ConsoleRunner<MemoryDisplay, ButtonLevels, RecordingToneSink>;

    fn runner(config: ConsoleConfig) -> TestRunner {
        ConsoleRunner::start(
            config,
            MemoryDisplay::new(),
            ButtonLevels::none(),
            RecordingToneSink::default(),
        )
        .expect("memory display starts")
    }

    #[test]
    fn missing_display_is_fatal() {
        let result: Result<TestRunner, _> = ConsoleRunner::start(
            ConsoleConfig::default(),
            MemoryDisplay::missing(),
            ButtonLevels::none(),
            RecordingToneSink::default(),
        );
        let err = result.err().expect("startup must fail");
        assert!(matches!(err, StartupError::Display(DisplayError::NotFound)));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "console startup failed: display not found");
    }

    #[test]
    fn tick_flushes_frame() {
        let mut runner = runner(ConsoleConfig::default());
        assert_eq!(runner.tick(0), Ok(TickOutcome::Ran));
        assert_eq!(runner.display().flushes, 1);
        assert_eq!(&runner.display().frame, runner.frame());
        assert!(runner.frame().lit_count() > 0);
    }

    #[test]
    fn cadence_skips_early_ticks() {
        let config = ConsoleConfig {
            tick_interval_ms: 20,
            ..ConsoleConfig::default()
        };
        let mut runner = runner(config);
        assert_eq!(runner.tick(0), Ok(TickOutcome::Ran));
        assert_eq!(runner.tick(10), Ok(TickOutcome::Skipped));
        assert_eq!(runner.tick(20), Ok(TickOutcome::Ran));
        assert_eq!(runner.ticks(), 2);
        assert_eq!(runner.display().flushes, 2);
    }

    #[test]
    fn sound_reaches_the_tone_sink() {
        let mut runner = runner(ConsoleConfig::default());
        runner.pins_mut().set(Button::Down, true);
        runner.tick(0).expect("tick");
        assert_eq!(runner.tones().played.len(), 1);
        assert_eq!(runner.console().menu_index(), 1);
    }
}
