//! Panel abstraction.
//!
//! Everything above this trait draws into a [`FrameBuffer`]; a `Display`
//! only has to come up once and accept whole frames.

use thiserror::Error;

use super::frame::FrameBuffer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// The panel did not answer during bring-up.
    #[error("display not found")]
    NotFound,
    /// Transfer failure on the panel bus.
    #[error("display bus error: {0}")]
    Bus(String),
}

pub trait Display {
    /// Bring the panel up. Failure is fatal for the console.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Push a complete frame to the panel. Blocks until the transfer is done.
    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}

/// In-memory display for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    /// Last frame received by `flush`.
    pub frame: FrameBuffer,
    pub flushes: u64,
    pub initialized: bool,
    missing: bool,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// A display whose bring-up fails with [`DisplayError::NotFound`].
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }
}

impl Display for MemoryDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.missing {
            return Err(DisplayError::NotFound);
        }
        self.initialized = true;
        Ok(())
    }

    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::Bus("flush before init".into()));
        }
        self.frame.clone_from(frame);
        self.flushes += 1;
        Ok(())
    }
}
