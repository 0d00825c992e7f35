//! Console chrome: menu screen, score strip, game-over and pause boxes.

use arcade_engine::{FrameBuffer, CHAR_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::catalog::GameId;

const MENU_TOP: i32 = 12;
const MENU_ROW_H: i32 = 10;
const LINE_H: i32 = CHAR_HEIGHT + 1;

fn centered(frame: &mut FrameBuffer, y: i32, text: &str) {
    let x = (SCREEN_WIDTH - FrameBuffer::text_width(text)) / 2;
    frame.text(x, y, text);
}

/// Blank box with an outline, centred on screen, sized for `lines` text lines.
/// Returns the y of the first text line.
fn boxed(frame: &mut FrameBuffer, width: i32, lines: i32) -> i32 {
    let height = lines * LINE_H + 5;
    let x = (SCREEN_WIDTH - width) / 2;
    let y = (SCREEN_HEIGHT - height) / 2;
    frame.clear_rect(x, y, width, height);
    frame.draw_rect(x, y, width, height);
    y + 3
}

/// Game list, one page at a time, with the highlighted entry inverted.
pub fn draw_menu(frame: &mut FrameBuffer, index: usize, page_size: usize, muted: bool) {
    let page_size = page_size.max(1);
    let page = index / page_size;
    let pages = GameId::COUNT.div_ceil(page_size);

    frame.text(2, 0, "ARCADE");
    let status = format!("{}/{} {}", page + 1, pages, if muted { "MUTE" } else { "SND" });
    frame.text(SCREEN_WIDTH - FrameBuffer::text_width(&status) - 1, 0, &status);
    frame.line(0, CHAR_HEIGHT + 1, SCREEN_WIDTH - 1, CHAR_HEIGHT + 1);

    let first = page * page_size;
    for (row, id) in GameId::ALL.iter().enumerate().skip(first).take(page_size) {
        let y = MENU_TOP + (row - first) as i32 * MENU_ROW_H;
        if row == index {
            frame.fill_rect(0, y - 1, SCREEN_WIDTH, MENU_ROW_H - 1);
            frame.text_inverted(4, y, id.title());
        } else {
            frame.text(4, y, id.title());
        }
    }
}

/// Score in the top-left corner, on a blanked strip so it stays readable.
pub fn draw_hud(frame: &mut FrameBuffer, score: u32) {
    let label = format!("S:{score}");
    frame.clear_rect(0, 0, FrameBuffer::text_width(&label) + 2, CHAR_HEIGHT + 1);
    frame.text(1, 0, &label);
}

pub fn draw_game_over(frame: &mut FrameBuffer, score: u32) {
    let y = boxed(frame, 80, 2);
    centered(frame, y, "GAME OVER");
    centered(frame, y + LINE_H, &format!("SCORE {score}"));
}

pub fn draw_pause(frame: &mut FrameBuffer, muted: bool) {
    let y = boxed(frame, 90, 4);
    centered(frame, y, "PAUSED");
    centered(frame, y + LINE_H, "SEL: RESUME");
    centered(frame, y + 2 * LINE_H, "LEFT: EXIT");
    centered(frame, y + 3 * LINE_H, if muted { "RIGHT: UNMUTE" } else { "RIGHT: MUTE" });
}
