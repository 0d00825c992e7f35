use crate::api::types::Button;

/// Raw access to the button pins.
/// Buttons are wired active-low: a held button reads low.
pub trait ButtonPins {
    fn is_high(&mut self, button: Button) -> bool;
}

/// Bitmask of held buttons, usable as a pin source.
/// Hosts that receive key events (and tests) drive the console through this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels(u8);

impl ButtonLevels {
    pub const fn none() -> Self {
        Self(0)
    }

    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn set(&mut self, button: Button, held: bool) {
        let bit = 1u8 << button.index();
        if held {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.0 & (1u8 << button.index()) != 0
    }
}

impl ButtonPins for ButtonLevels {
    fn is_high(&mut self, button: Button) -> bool {
        !self.is_held(button)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    held: bool,
    just_pressed: bool,
    long_pressed: bool,
    press_start_ms: u64,
    long_fired: bool,
}

/// Debounced view of the five buttons, refreshed once per tick.
///
/// `is_just_pressed` is true for exactly one poll after a press begins.
/// `is_long_pressed` is true for exactly one poll per continuous press,
/// the first one where the hold time exceeds the threshold.
#[derive(Debug, Clone)]
pub struct InputState {
    buttons: [ButtonState; 5],
    long_press_ms: u64,
}

impl InputState {
    pub fn new(long_press_ms: u64) -> Self {
        Self {
            buttons: [ButtonState::default(); 5],
            long_press_ms,
        }
    }

    /// Read every pin once and update level, edge and long-press state.
    pub fn poll(&mut self, pins: &mut impl ButtonPins, now_ms: u64) {
        for button in Button::ALL {
            let active = !pins.is_high(button);
            let state = &mut self.buttons[button.index()];

            state.just_pressed = active && !state.held;
            state.long_pressed = false;

            if state.just_pressed {
                state.press_start_ms = now_ms;
                state.long_fired = false;
            }

            if active {
                let held_for = now_ms.saturating_sub(state.press_start_ms);
                if !state.long_fired && held_for > self.long_press_ms {
                    state.long_pressed = true;
                    state.long_fired = true;
                }
            } else {
                state.long_fired = false;
            }

            state.held = active;
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].held
    }

    pub fn is_just_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].just_pressed
    }

    pub fn is_long_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].long_pressed
    }

    pub fn long_press_ms(&self) -> u64 {
        self.long_press_ms
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_with(input: &mut InputState, levels: ButtonLevels, now: u64) {
        let mut pins = levels;
        input.poll(&mut pins, now);
    }

    #[test]
    fn active_low_levels() {
        let mut levels = ButtonLevels::none().with(Button::Up);
        assert!(!levels.is_high(Button::Up));
        assert!(levels.is_high(Button::Down));
        levels.set(Button::Up, false);
        assert!(levels.is_high(Button::Up));
    }

    #[test]
    fn just_pressed_fires_once_per_press() {
        let mut input = InputState::new(600);
        let held = ButtonLevels::none().with(Button::Down);

        poll_with(&mut input, held, 0);
        assert!(input.is_just_pressed(Button::Down));
        assert!(input.is_pressed(Button::Down));

        for t in 1..50 {
            poll_with(&mut input, held, t * 20);
            assert!(!input.is_just_pressed(Button::Down), "re-fired at tick {t}");
            assert!(input.is_pressed(Button::Down));
        }

        poll_with(&mut input, ButtonLevels::none(), 1000);
        assert!(!input.is_pressed(Button::Down));
        assert!(!input.is_just_pressed(Button::Down));

        poll_with(&mut input, held, 1020);
        assert!(input.is_just_pressed(Button::Down));
    }

    #[test]
    fn long_press_fires_exactly_once() {
        let mut input = InputState::new(600);
        let held = ButtonLevels::none().with(Button::Select);

        let mut fired_at = Vec::new();
        for t in 0..100u64 {
            let now = 1000 + t * 20;
            poll_with(&mut input, held, now);
            if input.is_long_pressed(Button::Select) {
                fired_at.push(now);
            }
        }
        // Press began at 1000; 1600 is not strictly past the threshold.
        assert_eq!(fired_at, vec![1620]);
    }

    #[test]
    fn long_press_rearms_after_release() {
        let mut input = InputState::new(600);
        let held = ButtonLevels::none().with(Button::Select);

        poll_with(&mut input, held, 0);
        poll_with(&mut input, held, 700);
        assert!(input.is_long_pressed(Button::Select));
        poll_with(&mut input, held, 1400);
        assert!(!input.is_long_pressed(Button::Select));

        poll_with(&mut input, ButtonLevels::none(), 1500);
        poll_with(&mut input, held, 1600);
        assert!(!input.is_long_pressed(Button::Select));
        poll_with(&mut input, held, 2201);
        assert!(input.is_long_pressed(Button::Select));
    }

    #[test]
    fn short_press_never_long() {
        let mut input = InputState::new(600);
        let held = ButtonLevels::none().with(Button::Select);
        poll_with(&mut input, held, 0);
        poll_with(&mut input, held, 300);
        poll_with(&mut input, ButtonLevels::none(), 400);
        poll_with(&mut input, ButtonLevels::none(), 2000);
        assert!(!input.is_long_pressed(Button::Select));
    }
}
