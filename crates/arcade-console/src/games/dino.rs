use arcade_engine::*;

const GROUND_Y: f32 = 56.0;
const DINO_X: f32 = 12.0;
const DINO_W: f32 = 6.0;
const DINO_H: f32 = 8.0;
const GRAVITY: f32 = 0.35;
const JUMP_VEL: f32 = -3.8;

const MAX_CACTI: usize = 3;
/// (width, height) of the two cactus shapes.
const CACTUS_SHAPES: [(f32, f32); 2] = [(4.0, 8.0), (6.0, 10.0)];
const SPAWN_GAP: u32 = 50;
const SPAWN_JITTER: u32 = 50;
const FIRST_SPAWN: f32 = 60.0;

const BASE_SPEED: f32 = 2.0;
const SPEED_PER_POINT: f32 = 0.05;
const MAX_SPEED: f32 = 4.0;

#[derive(Debug, Clone, Copy)]
struct Cactus {
    x: f32,
    w: f32,
    h: f32,
    passed: bool,
}

impl Cactus {
    fn rect(&self) -> Aabb {
        Aabb::new(self.x, GROUND_Y - self.h, self.w, self.h)
    }
}

/// Endless runner: jump the cacti, which speed up with the score.
pub struct Dino {
    y: f32,
    vy: f32,
    grounded: bool,
    cacti: [Option<Cactus>; MAX_CACTI],
    /// Distance left to scroll before the next cactus appears.
    next_spawn: f32,
}

impl Dino {
    pub fn new() -> Self {
        Self {
            y: GROUND_Y - DINO_H,
            vy: 0.0,
            grounded: true,
            cacti: [None; MAX_CACTI],
            next_spawn: FIRST_SPAWN,
        }
    }

    fn speed(score: u32) -> f32 {
        (BASE_SPEED + SPEED_PER_POINT * score as f32).min(MAX_SPEED)
    }

    /// Place a cactus at the right edge if a slot is free. A fresh gap is
    /// drawn either way, so a full field skips one spawn instead of
    /// deferring it.
    fn spawn(&mut self, rng: &mut Rng) {
        self.next_spawn = (SPAWN_GAP + rng.next_int(SPAWN_JITTER)) as f32;
        let Some(slot) = self.cacti.iter_mut().find(|c| c.is_none()) else {
            return;
        };
        let (w, h) = CACTUS_SHAPES[rng.next_int(CACTUS_SHAPES.len() as u32) as usize];
        *slot = Some(Cactus {
            x: SCREEN_WIDTH as f32,
            w,
            h,
            passed: false,
        });
    }

    fn dino(&self) -> Aabb {
        Aabb::new(DINO_X, self.y, DINO_W, DINO_H)
    }
}

impl Default for Dino {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Dino {
    fn init(&mut self, _ctx: &mut EngineContext) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        let jump = input.is_just_pressed(Button::Select) || input.is_just_pressed(Button::Up);
        if jump && self.grounded {
            self.vy = JUMP_VEL;
            self.grounded = false;
        }
        self.vy += GRAVITY;
        self.y += self.vy;
        if self.y + DINO_H >= GROUND_Y {
            self.y = GROUND_Y - DINO_H;
            self.vy = 0.0;
            self.grounded = true;
        }

        let speed = Self::speed(ctx.score());
        self.next_spawn -= speed;
        if self.next_spawn <= 0.0 {
            self.spawn(&mut ctx.rng);
        }

        for slot in &mut self.cacti {
            let Some(mut cactus) = *slot else {
                continue;
            };
            cactus.x -= speed;
            if !cactus.passed && cactus.x + cactus.w < DINO_X {
                cactus.passed = true;
                ctx.add_score(1);
                ctx.sound.cue(SoundCue::Score);
            }
            *slot = (cactus.x + cactus.w >= 0.0).then_some(cactus);
        }

        let dino = self.dino();
        if self.cacti.iter().flatten().any(|c| c.rect().overlaps(&dino)) {
            return GameStatus::Over;
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        frame.line(0, GROUND_Y as i32, SCREEN_WIDTH - 1, GROUND_Y as i32);
        for c in self.cacti.iter().flatten() {
            let r = c.rect();
            frame.fill_rect(r.left() as i32, r.top() as i32, c.w as i32, c.h as i32);
        }
        frame.fill_rect(DINO_X as i32, self.y as i32, DINO_W as i32, DINO_H as i32);
    }
}
