use arcade_engine::*;

const ROW_H: i32 = 4;
const ROWS: usize = 17;
const SCROLL_SPEED: f32 = 1.0;

const WALL_MIN: i32 = 2;
const WALL_MAX: i32 = 126;
const CENTER_STEP: i32 = 3;
const START_WIDTH: i32 = 60;
const MIN_WIDTH: i32 = 22;
const NARROW_EVERY: u32 = 10;

const PLAYER_Y: f32 = 54.0;
const PLAYER_SIZE: f32 = 4.0;
const PLAYER_SPEED: f32 = 2.0;

/// Open span of one tunnel row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Row {
    left: i32,
    width: i32,
}

impl Row {
    fn right(&self) -> i32 {
        self.left + self.width
    }
}

/// Vertical tunnel racer. The tunnel scrolls down past a player that
/// only steers sideways.
pub struct Tunnel {
    /// Row 0 is the top (newest) row.
    rows: [Row; ROWS],
    scroll: f32,
    center: i32,
    width: i32,
    generated: u32,
    player_x: f32,
}

impl Tunnel {
    pub fn new() -> Self {
        let center = SCREEN_WIDTH / 2;
        let start = Row {
            left: center - START_WIDTH / 2,
            width: START_WIDTH,
        };
        Self {
            rows: [start; ROWS],
            scroll: 0.0,
            center,
            width: START_WIDTH,
            generated: 0,
            player_x: (SCREEN_WIDTH as f32 - PLAYER_SIZE) / 2.0,
        }
    }

    fn next_row(&mut self, rng: &mut Rng) -> Row {
        self.generated += 1;
        if self.generated % NARROW_EVERY == 0 {
            self.width = (self.width - 1).max(MIN_WIDTH);
        }
        let half = self.width / 2;
        self.center = (self.center + rng.range(-CENTER_STEP, CENTER_STEP + 1))
            .clamp(WALL_MIN + half, WALL_MAX - (self.width - half));
        Row {
            left: self.center - half,
            width: self.width,
        }
    }

    fn row_y(&self, i: usize) -> i32 {
        (i as i32 - 1) * ROW_H + self.scroll as i32
    }

    fn hits_wall(&self) -> bool {
        let (x0, x1) = (self.player_x, self.player_x + PLAYER_SIZE);
        let (y0, y1) = (PLAYER_Y as i32, (PLAYER_Y + PLAYER_SIZE) as i32);
        self.rows.iter().enumerate().any(|(i, row)| {
            let y = self.row_y(i);
            let spans = y < y1 && y + ROW_H > y0;
            spans && (x0 < row.left as f32 || x1 > row.right() as f32)
        })
    }
}

impl Default for Tunnel {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Tunnel {
    fn init(&mut self, _ctx: &mut EngineContext) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_pressed(Button::Left) {
            self.player_x -= PLAYER_SPEED;
        }
        if input.is_pressed(Button::Right) {
            self.player_x += PLAYER_SPEED;
        }
        self.player_x = self.player_x.clamp(0.0, SCREEN_WIDTH as f32 - PLAYER_SIZE);

        self.scroll += SCROLL_SPEED;
        if self.scroll >= ROW_H as f32 {
            self.scroll -= ROW_H as f32;
            self.rows.copy_within(0..ROWS - 1, 1);
            self.rows[0] = self.next_row(&mut ctx.rng);
            ctx.add_score(1);
        }

        if self.hits_wall() {
            return GameStatus::Over;
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for (i, row) in self.rows.iter().enumerate() {
            let y = self.row_y(i);
            frame.fill_rect(0, y, row.left, ROW_H);
            frame.fill_rect(row.right(), y, SCREEN_WIDTH - row.right(), ROW_H);
        }
        let size = PLAYER_SIZE as i32;
        frame.draw_rect(self.player_x as i32, PLAYER_Y as i32, size, size);
    }
}
