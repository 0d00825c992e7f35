use arcade_engine::*;

const COLS: i32 = 10;
const ROWS: usize = 20;
const FULL_ROW: u16 = (1 << COLS) - 1;

const CELL: i32 = 3;
const BOARD_X: i32 = 49;
const BOARD_Y: i32 = 2;
const PREVIEW_X: i32 = 92;
const PREVIEW_Y: i32 = 12;

const SPAWN_X: i32 = 3;
const SPAWN_Y: i32 = -1;

// Gravity (ms per row)
const START_FALL_MS: u64 = 500;
const FALL_SPEEDUP_MS: u64 = 25;
const MIN_FALL_MS: u64 = 100;
const SOFT_DROP_MS: u64 = 50;

const POINTS_PER_ROW: u32 = 10;

type Shape = [(i32, i32); 4];

/// Cell offsets inside a 4×4 box, one table per rotation: I, O, T, S, Z, J, L.
const PIECES: [[Shape; 4]; 7] = [
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    kind: usize,
    rot: usize,
    x: i32,
    y: i32,
}

impl Piece {
    fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        PIECES[self.kind][self.rot]
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    fn moved(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    fn rotated(self) -> Self {
        Self {
            rot: (self.rot + 1) % 4,
            ..self
        }
    }
}

/// Ten-wide board stored as one bitmask per row (bit x = column x).
pub struct Tetris {
    board: [u16; ROWS],
    /// `None` on the tick between a lock and the next spawn.
    piece: Option<Piece>,
    next_kind: usize,
    gravity: Interval,
    lines: u32,
}

impl Tetris {
    pub fn new() -> Self {
        Self {
            board: [0; ROWS],
            piece: None,
            next_kind: 0,
            gravity: Interval::default(),
            lines: 0,
        }
    }

    /// Cells above the board are free; walls and the floor are not.
    fn collides(&self, piece: Piece) -> bool {
        piece.cells().any(|(x, y)| {
            if x < 0 || x >= COLS || y >= ROWS as i32 {
                return true;
            }
            y >= 0 && self.board[y as usize] & (1 << x) != 0
        })
    }

    fn spawn(&mut self, rng: &mut Rng) -> GameStatus {
        let piece = Piece {
            kind: self.next_kind,
            rot: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        };
        self.next_kind = rng.next_int(PIECES.len() as u32) as usize;
        self.piece = Some(piece);
        if self.collides(piece) {
            log::debug!("tetris: spawn blocked");
            GameStatus::Over
        } else {
            GameStatus::Running
        }
    }

    fn lock(&mut self, piece: Piece) -> GameStatus {
        self.piece = None;
        let mut status = GameStatus::Running;
        for (x, y) in piece.cells() {
            if y < 0 {
                status = GameStatus::Over;
                continue;
            }
            self.board[y as usize] |= 1 << x;
        }
        status
    }

    /// Remove full rows; everything above each removed row drops by one.
    fn clear_full_rows(&mut self) -> u32 {
        let mut write = ROWS;
        let mut cleared = 0;
        for read in (0..ROWS).rev() {
            if self.board[read] == FULL_ROW {
                cleared += 1;
                continue;
            }
            write -= 1;
            self.board[write] = self.board[read];
        }
        self.board[..write].fill(0);
        cleared
    }

    fn draw_shape(frame: &mut FrameBuffer, origin_x: i32, origin_y: i32, cells: impl Iterator<Item = (i32, i32)>) {
        for (x, y) in cells {
            if y >= 0 {
                frame.fill_rect(origin_x + x * CELL, origin_y + y * CELL, CELL - 1, CELL - 1);
            }
        }
    }
}

impl Default for Tetris {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Tetris {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.board = [0; ROWS];
        self.lines = 0;
        self.gravity = Interval::new(START_FALL_MS, ctx.now_ms());
        self.next_kind = ctx.rng.next_int(PIECES.len() as u32) as usize;
        self.spawn(&mut ctx.rng);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        let Some(mut piece) = self.piece else {
            let cleared = self.clear_full_rows();
            if cleared > 0 {
                self.lines += cleared;
                ctx.add_score(POINTS_PER_ROW * cleared);
                ctx.sound.cue(SoundCue::Score);
                self.gravity
                    .shorten(FALL_SPEEDUP_MS * cleared as u64, MIN_FALL_MS);
                log::debug!("tetris: cleared {cleared} rows");
            }
            return self.spawn(&mut ctx.rng);
        };

        if input.is_just_pressed(Button::Left) && !self.collides(piece.moved(-1, 0)) {
            piece = piece.moved(-1, 0);
        }
        if input.is_just_pressed(Button::Right) && !self.collides(piece.moved(1, 0)) {
            piece = piece.moved(1, 0);
        }
        if (input.is_just_pressed(Button::Up) || input.is_just_pressed(Button::Select))
            && !self.collides(piece.rotated())
        {
            piece = piece.rotated();
        }

        let period = if input.is_pressed(Button::Down) {
            SOFT_DROP_MS.min(self.gravity.period_ms())
        } else {
            self.gravity.period_ms()
        };

        if self.gravity.fire_after(ctx.now_ms(), period) {
            let below = piece.moved(0, 1);
            if self.collides(below) {
                ctx.sound.cue(SoundCue::Click);
                return self.lock(piece);
            }
            piece = below;
        }
        self.piece = Some(piece);
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        frame.draw_rect(
            BOARD_X - 1,
            BOARD_Y - 1,
            COLS * CELL + 2,
            ROWS as i32 * CELL + 2,
        );
        for (y, row) in self.board.iter().enumerate() {
            let cells = (0..COLS)
                .filter(|x| row & (1 << x) != 0)
                .map(|x| (x, y as i32));
            Self::draw_shape(frame, BOARD_X, BOARD_Y, cells);
        }
        if let Some(piece) = self.piece {
            Self::draw_shape(frame, BOARD_X, BOARD_Y, piece.cells());
        }

        frame.text(PREVIEW_X, PREVIEW_Y - 10, "NEXT");
        Self::draw_shape(
            frame,
            PREVIEW_X,
            PREVIEW_Y,
            PIECES[self.next_kind][0].into_iter(),
        );
        frame.text(PREVIEW_X, 40, &format!("L{}", self.lines));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::*;

    fn started() -> (Tetris, EngineContext) {
        let mut ctx = context_at(0);
        let mut tetris = Tetris::new();
        tetris.init(&mut ctx);
        (tetris, ctx)
    }

    #[test]
    fn rotation_tables_have_four_cells_in_box() {
        for piece in PIECES {
            for shape in piece {
                for (x, y) in shape {
                    assert!((0..4).contains(&x) && (0..4).contains(&y));
                }
            }
        }
    }

    #[test]
    fn full_row_clears_on_tick_after_lock() {
        let (mut tetris, mut ctx) = started();
        // Bottom row missing columns 0..4, filled by a flat I piece
        tetris.board[19] = FULL_ROW & !0b1111;
        tetris.board[18] = 0b10_0000_0000;
        tetris.piece = Some(Piece { kind: 0, rot: 0, x: 0, y: 18 });

        ctx.set_now(1000);
        assert_eq!(tetris.update(&mut ctx, &idle()), GameStatus::Running);
        assert!(tetris.piece.is_none());
        assert_eq!(tetris.board[19], FULL_ROW);
        assert_eq!(ctx.score(), 0);

        ctx.set_now(1016);
        assert_eq!(tetris.update(&mut ctx, &idle()), GameStatus::Running);
        assert_eq!(ctx.score(), 10);
        assert_eq!(tetris.board[19], 0b10_0000_0000);
        assert_eq!(tetris.board[18], 0);
        assert!(tetris.piece.is_some());
    }

    #[test]
    fn multiple_rows_shift_down() {
        let (mut tetris, mut ctx) = started();
        tetris.board[17] = 0b1;
        tetris.board[18] = FULL_ROW;
        tetris.board[19] = FULL_ROW;
        tetris.piece = None;
        tetris.update(&mut ctx, &idle());
        assert_eq!(ctx.score(), 20);
        assert_eq!(tetris.board[19], 0b1);
        assert_eq!(tetris.lines, 2);
        assert_eq!(tetris.gravity.period_ms(), 450);
    }

    #[test]
    fn blocked_spawn_ends_session() {
        let (mut tetris, mut ctx) = started();
        tetris.board[0] = 0b00_0111_1000;
        tetris.piece = None;
        assert_eq!(tetris.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn lock_above_board_ends_session() {
        let (mut tetris, mut ctx) = started();
        // T piece at spawn with its stem row resting on row 1
        tetris.piece = Some(Piece { kind: 2, rot: 0, x: 3, y: -1 });
        tetris.board[1] = 0b00_0011_1000;
        ctx.set_now(1000);
        assert_eq!(tetris.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn walls_block_shifts() {
        let (mut tetris, mut ctx) = started();
        tetris.piece = Some(Piece { kind: 1, rot: 0, x: -1, y: 5 });
        tetris.update(&mut ctx, &press(&[Button::Left]));
        assert_eq!(tetris.piece.map(|p| p.x), Some(-1));
        ctx.set_now(16);
        tetris.update(&mut ctx, &press(&[Button::Right]));
        assert_eq!(tetris.piece.map(|p| p.x), Some(0));
    }

    #[test]
    fn soft_drop_falls_faster() {
        let (mut tetris, mut ctx) = started();
        let start_y = tetris.piece.map(|p| p.y);
        ctx.set_now(60);
        tetris.update(&mut ctx, &hold(&[Button::Down]));
        assert_eq!(tetris.piece.map(|p| p.y), start_y.map(|y| y + 1));
    }

    #[test]
    fn init_then_draw() {
        let (tetris, _) = started();
        let mut frame = FrameBuffer::new();
        tetris.draw(&mut frame);
        assert!(frame.pixel(BOARD_X - 1, BOARD_Y - 1));
    }
}
