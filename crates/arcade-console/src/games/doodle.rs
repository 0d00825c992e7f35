use arcade_engine::*;
use glam::Vec2;

const PLAYER_SIZE: f32 = 6.0;
const GRAVITY: f32 = 0.15;
const BOUNCE_VEL: f32 = -3.6;
const MOVE_SPEED: f32 = 1.5;

const PLATFORMS: usize = 7;
const PLATFORM_W: f32 = 16.0;
const PLATFORM_H: f32 = 2.0;
const GAP_MIN: i32 = 10;
const GAP_MAX: i32 = 18;
const BASE_Y: f32 = 58.0;

/// The player never rises above this line; the world moves down instead.
const SCROLL_LINE: f32 = 24.0;

const FIELD_W: f32 = SCREEN_WIDTH as f32;
const FIELD_H: f32 = SCREEN_HEIGHT as f32;

/// Endless jumper. Landing on a platform while falling bounces the player;
/// platforms that scroll off the bottom are recycled above the top one.
pub struct Doodle {
    player: Vec2,
    vy: f32,
    platforms: [Vec2; PLATFORMS],
}

impl Doodle {
    pub fn new() -> Self {
        Self {
            player: Vec2::ZERO,
            vy: 0.0,
            platforms: [Vec2::ZERO; PLATFORMS],
        }
    }

    fn highest_platform(&self) -> f32 {
        self.platforms.iter().map(|p| p.y).fold(FIELD_H, f32::min)
    }

    fn place_above(top: f32, rng: &mut Rng) -> Vec2 {
        let x = rng.range(0, (FIELD_W - PLATFORM_W) as i32 + 1) as f32;
        let gap = rng.range(GAP_MIN, GAP_MAX + 1) as f32;
        Vec2::new(x, top - gap)
    }

    fn landing_on(&self, prev_bottom: f32) -> Option<f32> {
        let bottom = self.player.y + PLAYER_SIZE;
        self.platforms
            .iter()
            .find(|p| {
                prev_bottom <= p.y
                    && bottom >= p.y
                    && self.player.x + PLAYER_SIZE > p.x
                    && self.player.x < p.x + PLATFORM_W
            })
            .map(|p| p.y)
    }
}

impl Default for Doodle {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Doodle {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.platforms[0] = Vec2::new((FIELD_W - PLATFORM_W) / 2.0, BASE_Y);
        for i in 1..PLATFORMS {
            self.platforms[i] = Self::place_above(self.platforms[i - 1].y, &mut ctx.rng);
        }
        self.player = Vec2::new((FIELD_W - PLAYER_SIZE) / 2.0, BASE_Y - PLAYER_SIZE);
        self.vy = 0.0;
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_pressed(Button::Left) {
            self.player.x -= MOVE_SPEED;
        }
        if input.is_pressed(Button::Right) {
            self.player.x += MOVE_SPEED;
        }
        self.player.x = self.player.x.rem_euclid(FIELD_W);

        let prev_bottom = self.player.y + PLAYER_SIZE;
        self.vy += GRAVITY;
        self.player.y += self.vy;

        if self.vy > 0.0 {
            if let Some(top) = self.landing_on(prev_bottom) {
                self.player.y = top - PLAYER_SIZE;
                self.vy = BOUNCE_VEL;
                ctx.sound.cue(SoundCue::Click);
            }
        }

        if self.player.y < SCROLL_LINE {
            let shift = SCROLL_LINE - self.player.y;
            self.player.y = SCROLL_LINE;
            for p in &mut self.platforms {
                p.y += shift;
            }
        }

        for i in 0..PLATFORMS {
            if self.platforms[i].y > FIELD_H {
                let top = self.highest_platform();
                self.platforms[i] = Self::place_above(top, &mut ctx.rng);
                ctx.add_score(1);
            }
        }

        if self.player.y > FIELD_H {
            return GameStatus::Over;
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for p in &self.platforms {
            frame.fill_rect(p.x as i32, p.y as i32, PLATFORM_W as i32, PLATFORM_H as i32);
        }
        let size = PLAYER_SIZE as i32;
        let (x, y) = (self.player.x as i32, self.player.y as i32);
        frame.draw_rect(x, y, size, size);
        // Wrapped copy while crossing the right edge
        if x + size > SCREEN_WIDTH {
            frame.draw_rect(x - SCREEN_WIDTH, y, size, size);
        }
    }
}
