use arcade_engine::*;
use glam::Vec2;

const COL_W: i32 = 4;
const COLS: usize = 33;
const SCROLL_SPEED: f32 = 1.0;

const CEILING_MAX: i32 = 24;
const CEILING_STEP: i32 = 2;
const START_CEILING: i32 = 10;
const START_GAP: i32 = 44;
const MIN_GAP: i32 = 26;
const NARROW_EVERY: u32 = 20;

const BLOCK_EVERY: u32 = 24;
const BLOCK_W: f32 = 4.0;
const BLOCK_H: f32 = 10.0;
const BLOCK_MARGIN: i32 = 2;
const MAX_BLOCKS: usize = 2;

const HELI_X: f32 = 20.0;
const HELI_W: f32 = 8.0;
const HELI_H: f32 = 4.0;
const THRUST: f32 = 0.3;
const GRAVITY: f32 = 0.2;
const MAX_VY: f32 = 2.0;

/// One cave column: open space is `ceiling..floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Column {
    ceiling: i32,
    floor: i32,
}

/// Cave flyer. Holding thrust climbs, releasing falls.
pub struct Heli {
    cols: [Column; COLS],
    scroll: f32,
    ceiling: i32,
    gap: i32,
    generated: u32,
    blocks: [Option<Vec2>; MAX_BLOCKS],
    y: f32,
    vy: f32,
}

impl Heli {
    pub fn new() -> Self {
        let start = Column {
            ceiling: START_CEILING,
            floor: START_CEILING + START_GAP,
        };
        Self {
            cols: [start; COLS],
            scroll: 0.0,
            ceiling: START_CEILING,
            gap: START_GAP,
            generated: 0,
            blocks: [None; MAX_BLOCKS],
            y: 0.0,
            vy: 0.0,
        }
    }

    fn next_column(&mut self, rng: &mut Rng) -> Column {
        self.generated += 1;
        if self.generated % NARROW_EVERY == 0 {
            self.gap = (self.gap - 1).max(MIN_GAP);
        }
        self.ceiling = (self.ceiling + rng.range(-CEILING_STEP, CEILING_STEP + 1)).clamp(0, CEILING_MAX);
        Column {
            ceiling: self.ceiling,
            floor: (self.ceiling + self.gap).min(SCREEN_HEIGHT),
        }
    }

    fn advance(&mut self, ctx: &mut EngineContext) {
        self.scroll += SCROLL_SPEED;
        for block in &mut self.blocks {
            *block = block
                .map(|p| Vec2::new(p.x - SCROLL_SPEED, p.y))
                .filter(|p| p.x + BLOCK_W >= 0.0);
        }
        if self.scroll < COL_W as f32 {
            return;
        }
        self.scroll -= COL_W as f32;
        self.cols.copy_within(1.., 0);
        let col = self.next_column(&mut ctx.rng);
        self.cols[COLS - 1] = col;
        ctx.add_score(1);

        if self.generated % BLOCK_EVERY == 0 {
            if let Some(slot) = self.blocks.iter_mut().find(|b| b.is_none()) {
                let x = ((COLS - 1) as i32 * COL_W) as f32 - self.scroll;
                let y = ctx.rng.range(
                    col.ceiling + BLOCK_MARGIN,
                    col.floor - BLOCK_H as i32 - BLOCK_MARGIN + 1,
                );
                *slot = Some(Vec2::new(x, y as f32));
            }
        }
    }

    fn heli(&self) -> Aabb {
        Aabb::new(HELI_X, self.y, HELI_W, HELI_H)
    }

    fn hits_wall(&self) -> bool {
        let heli = self.heli();
        let first = (HELI_X + self.scroll) as i32 / COL_W;
        let last = (HELI_X + HELI_W - 1.0 + self.scroll) as i32 / COL_W;
        self.cols[first as usize..=(last as usize).min(COLS - 1)]
            .iter()
            .any(|c| heli.top() < c.ceiling as f32 || heli.bottom() > c.floor as f32)
    }
}

impl Default for Heli {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Heli {
    fn init(&mut self, _ctx: &mut EngineContext) {
        *self = Self::new();
        self.y = (START_CEILING + START_GAP / 2) as f32 - HELI_H / 2.0;
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_pressed(Button::Select) || input.is_pressed(Button::Up) {
            self.vy -= THRUST;
        } else {
            self.vy += GRAVITY;
        }
        self.vy = self.vy.clamp(-MAX_VY, MAX_VY);
        self.y += self.vy;

        self.advance(ctx);

        if self.hits_wall() {
            return GameStatus::Over;
        }
        let heli = self.heli();
        let hit_block = self
            .blocks
            .iter()
            .flatten()
            .any(|pos| Aabb::from_pos(*pos, Vec2::new(BLOCK_W, BLOCK_H)).overlaps(&heli));
        if hit_block {
            return GameStatus::Over;
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for (i, col) in self.cols.iter().enumerate() {
            let x = i as i32 * COL_W - self.scroll as i32;
            frame.fill_rect(x, 0, COL_W, col.ceiling);
            frame.fill_rect(x, col.floor, COL_W, SCREEN_HEIGHT - col.floor);
        }
        for pos in self.blocks.iter().flatten() {
            frame.fill_rect(pos.x as i32, pos.y as i32, BLOCK_W as i32, BLOCK_H as i32);
        }
        let (x, y) = (HELI_X as i32, self.y as i32);
        frame.fill_rect(x, y, HELI_W as i32, HELI_H as i32);
        // Rotor
        frame.line(x - 1, y - 1, x + HELI_W as i32, y - 1);
    }
}
