use arcade_engine::*;

const BLOCK_H: i32 = 4;
const BASE_W: i32 = 40;
const BASE_X: i32 = (SCREEN_WIDTH - BASE_W) / 2;
const BASE_Y: i32 = SCREEN_HEIGHT - BLOCK_H;
const KEPT: usize = 16;

const BASE_SPEED: f32 = 1.0;
const SPEED_PER_LEVEL: f32 = 0.1;
const MAX_SPEED: f32 = 3.0;

/// Topmost placed block is kept at or below this line.
const VIEW_TOP: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Block {
    x: i32,
    w: i32,
    level: u32,
}

/// Stack builder. A block slides back and forth above the tower; dropping
/// it trims whatever hangs over the block below.
pub struct Stack {
    placed: [Block; KEPT],
    len: usize,
    current_x: f32,
    current_w: i32,
    dir: f32,
}

impl Stack {
    pub fn new() -> Self {
        let base = Block {
            x: BASE_X,
            w: BASE_W,
            level: 0,
        };
        Self {
            placed: [base; KEPT],
            len: 1,
            current_x: 0.0,
            current_w: BASE_W,
            dir: 1.0,
        }
    }

    fn top(&self) -> Block {
        self.placed[self.len - 1]
    }

    fn speed(&self) -> f32 {
        (BASE_SPEED + SPEED_PER_LEVEL * self.top().level as f32).min(MAX_SPEED)
    }

    fn push(&mut self, block: Block) {
        if self.len == KEPT {
            self.placed.copy_within(1.., 0);
            self.len -= 1;
        }
        self.placed[self.len] = block;
        self.len += 1;
    }

    /// Vertical scroll that keeps the top block at or below the view line.
    fn camera(&self) -> i32 {
        (VIEW_TOP - self.level_y(self.top().level, 0)).max(0)
    }

    fn level_y(&self, level: u32, camera: i32) -> i32 {
        BASE_Y - level as i32 * BLOCK_H + camera
    }

    fn drop_block(&mut self, ctx: &mut EngineContext) -> GameStatus {
        let top = self.top();
        let x = self.current_x as i32;
        let overlap = span_overlap(x, self.current_w, top.x, top.w);
        if overlap <= 0 {
            return GameStatus::Over;
        }
        self.push(Block {
            x: x.max(top.x),
            w: overlap,
            level: top.level + 1,
        });
        self.current_w = overlap;
        self.current_x = 0.0;
        self.dir = 1.0;
        ctx.add_score(1);
        ctx.sound.cue(SoundCue::Score);
        GameStatus::Running
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Stack {
    fn init(&mut self, _ctx: &mut EngineContext) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_just_pressed(Button::Select) {
            return self.drop_block(ctx);
        }

        self.current_x += self.dir * self.speed();
        let max_x = (SCREEN_WIDTH - self.current_w) as f32;
        if self.current_x <= 0.0 {
            self.current_x = 0.0;
            self.dir = 1.0;
        } else if self.current_x >= max_x {
            self.current_x = max_x;
            self.dir = -1.0;
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        let camera = self.camera();
        for block in &self.placed[..self.len] {
            let y = self.level_y(block.level, camera);
            frame.fill_rect(block.x, y, block.w, BLOCK_H - 1);
        }
        let y = self.level_y(self.top().level + 1, camera);
        frame.draw_rect(self.current_x as i32, y, self.current_w, BLOCK_H - 1);
    }
}
