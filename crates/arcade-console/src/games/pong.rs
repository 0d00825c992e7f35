use arcade_engine::*;
use glam::Vec2;

const PADDLE_W: f32 = 3.0;
const PADDLE_H: f32 = 14.0;
const PLAYER_X: f32 = 2.0;
const AI_X: f32 = 123.0;
const PLAYER_SPEED: f32 = 2.0;
const AI_STEP: f32 = 1.5;

const BALL: f32 = 3.0;
const SERVE_VEL: Vec2 = Vec2::new(1.5, 1.0);
const PLAYER_HIT_SPEEDUP: f32 = 1.1;

const FIELD_W: f32 = SCREEN_WIDTH as f32;
const FIELD_H: f32 = SCREEN_HEIGHT as f32;

/// Player on the left, AI on the right. Points come only from AI misses.
pub struct Pong {
    player_y: f32,
    ai_y: f32,
    ball: Vec2,
    vel: Vec2,
}

impl Pong {
    pub fn new() -> Self {
        Self {
            player_y: 0.0,
            ai_y: 0.0,
            ball: Vec2::ZERO,
            vel: Vec2::ZERO,
        }
    }

    fn center_ball(&mut self) {
        self.ball = Vec2::new((FIELD_W - BALL) / 2.0, (FIELD_H - BALL) / 2.0);
    }

    fn player_rect(&self) -> Aabb {
        Aabb::new(PLAYER_X, self.player_y, PADDLE_W, PADDLE_H)
    }

    fn ai_rect(&self) -> Aabb {
        Aabb::new(AI_X, self.ai_y, PADDLE_W, PADDLE_H)
    }

    fn spans_paddle(&self, paddle: &Aabb) -> bool {
        self.ball.y + BALL > paddle.top() && self.ball.y < paddle.bottom()
    }

    fn track_ball(&mut self) {
        let paddle_center = self.ai_y + PADDLE_H / 2.0;
        let ball_center = self.ball.y + BALL / 2.0;
        if paddle_center < ball_center {
            self.ai_y += AI_STEP;
        } else if paddle_center > ball_center {
            self.ai_y -= AI_STEP;
        }
        self.ai_y = self.ai_y.clamp(0.0, FIELD_H - PADDLE_H);
    }
}

impl Default for Pong {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Pong {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.player_y = (FIELD_H - PADDLE_H) / 2.0;
        self.ai_y = self.player_y;
        self.center_ball();
        let dir_y = if ctx.rng.flip() { 1.0 } else { -1.0 };
        self.vel = Vec2::new(SERVE_VEL.x, SERVE_VEL.y * dir_y);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_pressed(Button::Up) {
            self.player_y -= PLAYER_SPEED;
        }
        if input.is_pressed(Button::Down) {
            self.player_y += PLAYER_SPEED;
        }
        self.player_y = self.player_y.clamp(0.0, FIELD_H - PADDLE_H);
        self.track_ball();

        let prev = self.ball;
        self.ball += self.vel;

        if self.ball.y <= 0.0 {
            self.ball.y = 0.0;
            self.vel.y = self.vel.y.abs();
        } else if self.ball.y + BALL >= FIELD_H {
            self.ball.y = FIELD_H - BALL;
            self.vel.y = -self.vel.y.abs();
        }

        // Face crossings, so fast balls cannot tunnel through a paddle
        let player = self.player_rect();
        if self.vel.x < 0.0
            && prev.x >= player.right()
            && self.ball.x < player.right()
            && self.spans_paddle(&player)
        {
            self.ball.x = player.right();
            self.vel = Vec2::new(-self.vel.x, self.vel.y) * PLAYER_HIT_SPEEDUP;
            ctx.sound.cue(SoundCue::Click);
        }

        let ai = self.ai_rect();
        if self.vel.x > 0.0
            && prev.x + BALL <= ai.left()
            && self.ball.x + BALL > ai.left()
            && self.spans_paddle(&ai)
        {
            self.ball.x = ai.left() - BALL;
            self.vel.x = -self.vel.x;
            ctx.sound.cue(SoundCue::Click);
        }

        if self.ball.x + BALL < 0.0 {
            return GameStatus::Over;
        }
        if self.ball.x > FIELD_W {
            ctx.add_score(1);
            ctx.sound.cue(SoundCue::Score);
            self.center_ball();
            self.vel.x = -self.vel.x.abs();
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        let mid = SCREEN_WIDTH / 2;
        for y in (0..SCREEN_HEIGHT).step_by(4) {
            frame.set_pixel(mid, y, true);
        }
        for paddle in [self.player_rect(), self.ai_rect()] {
            frame.fill_rect(
                paddle.left() as i32,
                paddle.top() as i32,
                PADDLE_W as i32,
                PADDLE_H as i32,
            );
        }
        frame.fill_rect(self.ball.x as i32, self.ball.y as i32, BALL as i32, BALL as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::*;

    fn started() -> (Pong, EngineContext) {
        let mut ctx = context_at(0);
        let mut pong = Pong::new();
        pong.init(&mut ctx);
        (pong, ctx)
    }

    #[test]
    fn ai_hit_reflects_exactly() {
        let (mut pong, mut ctx) = started();
        pong.ai_y = 24.0;
        pong.ball = Vec2::new(AI_X - BALL - 1.0, 29.0);
        pong.vel = Vec2::new(2.0, 0.0);
        pong.update(&mut ctx, &idle());
        assert_eq!(pong.vel, Vec2::new(-2.0, 0.0));
        assert_eq!(pong.ball.x, AI_X - BALL);
        assert_eq!(ctx.score(), 0);
    }

    #[test]
    fn player_hit_speeds_up() {
        let (mut pong, mut ctx) = started();
        pong.player_y = 24.0;
        pong.ball = Vec2::new(PLAYER_X + PADDLE_W + 1.0, 29.0);
        pong.vel = Vec2::new(-2.0, 0.5);
        pong.update(&mut ctx, &idle());
        assert!((pong.vel.x - 2.2).abs() < 1e-5);
        assert!((pong.vel.y - 0.55).abs() < 1e-5);
    }

    #[test]
    fn ai_miss_scores_and_reserves() {
        let (mut pong, mut ctx) = started();
        pong.ai_y = 0.0;
        pong.ball = Vec2::new(FIELD_W - 1.0, 58.0);
        pong.vel = Vec2::new(2.0, 0.0);
        assert_eq!(pong.update(&mut ctx, &idle()), GameStatus::Running);
        assert_eq!(ctx.score(), 1);
        assert_eq!(pong.ball.x, (FIELD_W - BALL) / 2.0);
        assert!(pong.vel.x < 0.0);
    }

    #[test]
    fn player_miss_ends_session() {
        let (mut pong, mut ctx) = started();
        pong.player_y = 0.0;
        pong.ball = Vec2::new(0.0, 58.0);
        pong.vel = Vec2::new(-4.0, 0.0);
        assert_eq!(pong.update(&mut ctx, &idle()), GameStatus::Over);
        assert_eq!(ctx.score(), 0);
    }

    #[test]
    fn ai_steps_towards_ball() {
        let (mut pong, mut ctx) = started();
        pong.ai_y = 0.0;
        pong.ball = Vec2::new(60.0, 50.0);
        pong.vel = Vec2::new(1.0, 0.0);
        pong.update(&mut ctx, &idle());
        assert_eq!(pong.ai_y, AI_STEP);
    }

    #[test]
    fn paddle_clamped_to_field() {
        let (mut pong, mut ctx) = started();
        for _ in 0..100 {
            pong.update(&mut ctx, &hold(&[Button::Up]));
        }
        assert_eq!(pong.player_y, 0.0);
    }

    #[test]
    fn init_then_draw() {
        let (pong, _) = started();
        let mut frame = FrameBuffer::new();
        pong.draw(&mut frame);
        assert!(frame.pixel(PLAYER_X as i32, 30));
    }
}
