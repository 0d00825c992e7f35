use arcade_engine::*;
use glam::Vec2;

const COLS: i32 = 16;
const ROWS: usize = 8;
const BRICK_W: i32 = 8;
const BRICK_H: i32 = 4;
const BRICKS_TOP: i32 = 10;
const INITIAL_ROWS: usize = 3;
const BRICK_CHANCE: u32 = 70;

const PADDLE_W: f32 = 20.0;
const PADDLE_H: f32 = 2.0;
const PADDLE_Y: f32 = 60.0;
const PADDLE_SPEED: f32 = 2.0;

const BALL: f32 = 2.0;
const LAUNCH_VEL: Vec2 = Vec2::new(1.0, -1.2);
const MAX_VX: f32 = 2.0;

// Row injection timer (ms)
const INJECT_START_MS: u64 = 5000;
const INJECT_SPEEDUP_MS: u64 = 50;
const INJECT_MIN_MS: u64 = 1000;

const FIELD_W: f32 = SCREEN_WIDTH as f32;
const FIELD_H: f32 = SCREEN_HEIGHT as f32;

/// Brick breaker with a wall that grows downward on a timer.
/// Each brick row is a 16-bit mask; row 0 is the top row.
pub struct Breakout {
    rows: [u16; ROWS],
    paddle_x: f32,
    ball: Vec2,
    vel: Vec2,
    inject: Interval,
}

impl Breakout {
    pub fn new() -> Self {
        Self {
            rows: [0; ROWS],
            paddle_x: 0.0,
            ball: Vec2::ZERO,
            vel: Vec2::ZERO,
            inject: Interval::default(),
        }
    }

    fn random_row(rng: &mut Rng) -> u16 {
        (0..COLS).fold(0u16, |row, col| {
            if rng.chance(BRICK_CHANCE) {
                row | (1 << col)
            } else {
                row
            }
        })
    }

    /// Push every row down and add a fresh one on top.
    /// Fails if the bottom row still has bricks.
    fn inject_row(&mut self, rng: &mut Rng) -> GameStatus {
        if self.rows[ROWS - 1] != 0 {
            return GameStatus::Over;
        }
        self.rows.copy_within(0..ROWS - 1, 1);
        self.rows[0] = Self::random_row(rng);
        self.inject.shorten(INJECT_SPEEDUP_MS, INJECT_MIN_MS);
        log::debug!("breakout: row injected, next in {} ms", self.inject.period_ms());
        GameStatus::Running
    }

    /// Brick cell under a point, if that cell currently holds a brick.
    fn brick_at(&self, p: Vec2) -> Option<(usize, i32)> {
        if p.x < 0.0 || p.y < BRICKS_TOP as f32 {
            return None;
        }
        let col = p.x as i32 / BRICK_W;
        let row = (p.y as i32 - BRICKS_TOP) / BRICK_H;
        if col >= COLS || row as usize >= ROWS {
            return None;
        }
        let row = row as usize;
        (self.rows[row] & (1 << col) != 0).then_some((row, col))
    }
}

impl Default for Breakout {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Breakout {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.rows = [0; ROWS];
        for row in &mut self.rows[..INITIAL_ROWS] {
            *row = Self::random_row(&mut ctx.rng);
        }
        self.paddle_x = (FIELD_W - PADDLE_W) / 2.0;
        self.ball = Vec2::new((FIELD_W - BALL) / 2.0, PADDLE_Y - BALL - 1.0);
        let dir_x = if ctx.rng.flip() { 1.0 } else { -1.0 };
        self.vel = Vec2::new(LAUNCH_VEL.x * dir_x, LAUNCH_VEL.y);
        self.inject = Interval::new(INJECT_START_MS, ctx.now_ms());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_pressed(Button::Left) {
            self.paddle_x -= PADDLE_SPEED;
        }
        if input.is_pressed(Button::Right) {
            self.paddle_x += PADDLE_SPEED;
        }
        self.paddle_x = self.paddle_x.clamp(0.0, FIELD_W - PADDLE_W);

        self.ball += self.vel;

        if self.ball.x <= 0.0 {
            self.ball.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.ball.x + BALL >= FIELD_W {
            self.ball.x = FIELD_W - BALL;
            self.vel.x = -self.vel.x.abs();
        }
        if self.ball.y <= 0.0 {
            self.ball.y = 0.0;
            self.vel.y = self.vel.y.abs();
        }

        let paddle = Aabb::new(self.paddle_x, PADDLE_Y, PADDLE_W, PADDLE_H);
        let ball = Aabb::from_pos(self.ball, Vec2::splat(BALL));
        if self.vel.y > 0.0 && ball.overlaps(&paddle) {
            self.ball.y = PADDLE_Y - BALL;
            self.vel.y = -self.vel.y.abs();
            // Steer by where the ball lands on the paddle
            let offset = (ball.center().x - paddle.center().x) / (PADDLE_W / 2.0);
            self.vel.x = (self.vel.x + offset * 0.5).clamp(-MAX_VX, MAX_VX);
            ctx.sound.cue(SoundCue::Click);
        }

        if let Some((row, col)) = self.brick_at(ball.center()) {
            self.rows[row] &= !(1 << col);
            self.vel.y = -self.vel.y;
            ctx.add_score(1);
            ctx.sound.cue(SoundCue::Score);
        }

        if self.ball.y > FIELD_H {
            return GameStatus::Over;
        }

        if self.inject.fire(ctx.now_ms()) {
            return self.inject_row(&mut ctx.rng);
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for (r, row) in self.rows.iter().enumerate() {
            for col in (0..COLS).filter(|c| row & (1 << c) != 0) {
                frame.fill_rect(
                    col * BRICK_W,
                    BRICKS_TOP + r as i32 * BRICK_H,
                    BRICK_W - 1,
                    BRICK_H - 1,
                );
            }
        }
        frame.fill_rect(self.paddle_x as i32, PADDLE_Y as i32, PADDLE_W as i32, PADDLE_H as i32);
        frame.fill_rect(self.ball.x as i32, self.ball.y as i32, BALL as i32, BALL as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::*;

    fn started() -> (Breakout, EngineContext) {
        let mut ctx = context_at(0);
        let mut game = Breakout::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    /// Park the ball in empty space below the bricks, moving up-right.
    fn park_ball(game: &mut Breakout) {
        game.ball = Vec2::new(64.0, 50.0);
        game.vel = Vec2::new(1.0, -1.2);
    }

    #[test]
    fn initial_rows_only_on_top() {
        let (game, _) = started();
        assert!(game.rows[INITIAL_ROWS..].iter().all(|r| *r == 0));
    }

    #[test]
    fn injection_shifts_rows_and_speeds_up() {
        let (mut game, mut ctx) = started();
        game.rows = [0; ROWS];
        game.rows[0] = 0b1010;
        park_ball(&mut game);
        ctx.set_now(5001);
        assert_eq!(game.update(&mut ctx, &idle()), GameStatus::Running);
        assert_eq!(game.rows[1], 0b1010);
        assert_eq!(game.inject.period_ms(), 4950);
    }

    #[test]
    fn occupied_bottom_row_ends_session_on_injection() {
        let (mut game, mut ctx) = started();
        game.rows = [0; ROWS];
        game.rows[ROWS - 1] = 0b1;
        park_ball(&mut game);
        ctx.set_now(4000);
        assert_eq!(game.update(&mut ctx, &idle()), GameStatus::Running);
        ctx.set_now(5001);
        assert_eq!(game.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn injection_interval_floor() {
        let (mut game, mut ctx) = started();
        game.rows = [0; ROWS];
        for _ in 0..200 {
            game.rows[ROWS - 1] = 0;
            let _ = game.inject_row(&mut ctx.rng);
        }
        assert_eq!(game.inject.period_ms(), INJECT_MIN_MS);
    }

    #[test]
    fn brick_hit_scores_and_reflects() {
        let (mut game, mut ctx) = started();
        game.rows = [0; ROWS];
        // Column 8 of row 2 spans x 64..72, y 18..22
        game.rows[2] = 1 << 8;
        game.ball = Vec2::new(66.0, 21.0);
        game.vel = Vec2::new(0.0, -1.0);
        game.update(&mut ctx, &idle());
        assert_eq!(ctx.score(), 1);
        assert_eq!(game.rows[2], 0);
        assert!(game.vel.y > 0.0);
    }

    #[test]
    fn paddle_bounce() {
        let (mut game, mut ctx) = started();
        game.rows = [0; ROWS];
        game.paddle_x = 54.0;
        game.ball = Vec2::new(63.0, PADDLE_Y - BALL - 0.5);
        game.vel = Vec2::new(0.0, 1.0);
        game.update(&mut ctx, &idle());
        assert!(game.vel.y < 0.0);
        assert_eq!(game.ball.y, PADDLE_Y - BALL);
    }

    #[test]
    fn lost_ball_ends_session() {
        let (mut game, mut ctx) = started();
        game.paddle_x = 0.0;
        game.ball = Vec2::new(100.0, 63.5);
        game.vel = Vec2::new(0.0, 1.0);
        assert_eq!(game.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn init_then_draw() {
        let (game, _) = started();
        let mut frame = FrameBuffer::new();
        game.draw(&mut frame);
        assert!(frame.pixel(game.paddle_x as i32, PADDLE_Y as i32));
    }
}
