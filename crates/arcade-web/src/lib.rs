pub mod runner;

pub use runner::{CanvasDisplay, WebRunner, WebTones};

use std::cell::RefCell;

use arcade_engine::ConsoleConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the console, or return `None` before `console_init`.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn js_error(msg: String) -> JsValue {
    js_sys::Error::new(&msg).into()
}

/// Boot the console. An empty string uses the default configuration.
/// Throws if the configuration does not parse or the console cannot start.
#[wasm_bindgen]
pub fn console_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        ConsoleConfig::default()
    } else {
        ConsoleConfig::from_json(config_json).map_err(|e| js_error(format!("bad config: {e}")))?
    };
    let runner = WebRunner::start(config).map_err(|e| js_error(e.to_string()))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("arcade: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn console_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms as u64));
}

/// Button index: 0 up, 1 down, 2 left, 3 right, 4 select.
#[wasm_bindgen]
pub fn console_set_button(index: u32, down: bool) {
    with_runner(|r| r.set_button(index as usize, down));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const u8 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_tones_ptr() -> *const u32 {
    with_runner(|r| r.tones_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_tones_len() -> u32 {
    with_runner(|r| r.tones_len()).unwrap_or(0)
}

/// 0 menu, 1 playing, 2 paused.
#[wasm_bindgen]
pub fn get_mode() -> u32 {
    with_runner(|r| r.mode_code()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_score() -> u32 {
    with_runner(|r| r.score()).unwrap_or(0)
}
