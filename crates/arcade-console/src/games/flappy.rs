use arcade_engine::*;

const BIRD_X: f32 = 24.0;
const BIRD_SIZE: f32 = 4.0;
const GRAVITY: f32 = 0.25;
const JUMP_VEL: f32 = -2.5;

const PIPE_W: f32 = 10.0;
const PIPE_GAP: f32 = 26.0;
const PIPE_SPEED: f32 = 1.0;
const PIPE_SPACING: f32 = 70.0;
const GAP_MARGIN: i32 = 10;

const FIELD_W: f32 = SCREEN_WIDTH as f32;
const FIELD_H: f32 = SCREEN_HEIGHT as f32;

#[derive(Debug, Clone, Copy, Default)]
struct Pipe {
    x: f32,
    /// Top edge of the gap.
    gap_y: f32,
    scored: bool,
}

impl Pipe {
    fn respawn(&mut self, x: f32, rng: &mut Rng) {
        self.x = x;
        self.gap_y = rng.range(GAP_MARGIN, SCREEN_HEIGHT - GAP_MARGIN - PIPE_GAP as i32 + 1) as f32;
        self.scored = false;
    }

    fn rects(&self) -> [Aabb; 2] {
        let bottom = self.gap_y + PIPE_GAP;
        [
            Aabb::new(self.x, 0.0, PIPE_W, self.gap_y),
            Aabb::new(self.x, bottom, PIPE_W, FIELD_H - bottom),
        ]
    }
}

pub struct Flappy {
    bird_y: f32,
    vy: f32,
    pipes: [Pipe; 2],
}

impl Flappy {
    pub fn new() -> Self {
        Self {
            bird_y: 0.0,
            vy: 0.0,
            pipes: [Pipe::default(); 2],
        }
    }

    fn bird(&self) -> Aabb {
        Aabb::new(BIRD_X, self.bird_y, BIRD_SIZE, BIRD_SIZE)
    }
}

impl Default for Flappy {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Flappy {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.bird_y = (FIELD_H - BIRD_SIZE) / 2.0;
        self.vy = 0.0;
        for (i, pipe) in self.pipes.iter_mut().enumerate() {
            pipe.respawn(FIELD_W + i as f32 * PIPE_SPACING, &mut ctx.rng);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        if input.is_just_pressed(Button::Select) || input.is_just_pressed(Button::Up) {
            self.vy = JUMP_VEL;
        }
        self.vy += GRAVITY;
        self.bird_y += self.vy;

        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SPEED;
            if pipe.x + PIPE_W < 0.0 {
                pipe.respawn(FIELD_W, &mut ctx.rng);
            }
            if !pipe.scored && pipe.x + PIPE_W < BIRD_X {
                pipe.scored = true;
                ctx.add_score(1);
                ctx.sound.cue(SoundCue::Score);
            }
        }

        let bird = self.bird();
        if bird.top() < 0.0 || bird.bottom() > FIELD_H {
            return GameStatus::Over;
        }
        if self
            .pipes
            .iter()
            .flat_map(|p| p.rects())
            .any(|r| r.overlaps(&bird))
        {
            return GameStatus::Over;
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for pipe in &self.pipes {
            for r in pipe.rects() {
                frame.draw_rect(r.left() as i32, r.top() as i32, r.size.x as i32, r.size.y as i32);
            }
        }
        let bird = self.bird();
        frame.fill_rect(bird.left() as i32, bird.top() as i32, BIRD_SIZE as i32, BIRD_SIZE as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::*;

    fn started() -> (Flappy, EngineContext) {
        let mut ctx = context_at(0);
        let mut flappy = Flappy::new();
        flappy.init(&mut ctx);
        (flappy, ctx)
    }

    #[test]
    fn gaps_within_bounds() {
        let mut rng = Rng::new(99);
        let mut pipe = Pipe::default();
        for _ in 0..500 {
            pipe.respawn(FIELD_W, &mut rng);
            assert!(pipe.gap_y >= 10.0);
            assert!(pipe.gap_y <= FIELD_H - 10.0 - PIPE_GAP);
        }
    }

    #[test]
    fn jump_then_gravity() {
        let (mut flappy, mut ctx) = started();
        let y0 = flappy.bird_y;
        flappy.update(&mut ctx, &press(&[Button::Select]));
        assert_eq!(flappy.vy, JUMP_VEL + GRAVITY);
        assert_eq!(flappy.bird_y, y0 + JUMP_VEL + GRAVITY);
    }

    #[test]
    fn idle_bird_hits_ground() {
        let (mut flappy, mut ctx) = started();
        let over_at = run_idle(&mut flappy, &mut ctx, 200);
        assert!(over_at.is_some());
        assert_eq!(ctx.score(), 0);
    }

    #[test]
    fn pipe_respawns_off_left_edge() {
        let (mut flappy, mut ctx) = started();
        flappy.pipes[0].x = -PIPE_W + 0.5;
        flappy.pipes[0].scored = true;
        flappy.update(&mut ctx, &idle());
        assert_eq!(flappy.pipes[0].x, FIELD_W);
        assert!(!flappy.pipes[0].scored);
    }

    #[test]
    fn passing_pipe_scores_once() {
        let (mut flappy, mut ctx) = started();
        flappy.pipes[0] = Pipe { x: BIRD_X - PIPE_W + 0.5, gap_y: 10.0, scored: false };
        flappy.pipes[1].x = 200.0;
        flappy.bird_y = 20.0;
        flappy.update(&mut ctx, &idle());
        assert_eq!(ctx.score(), 1);
        flappy.update(&mut ctx, &idle());
        assert_eq!(ctx.score(), 1);
    }

    #[test]
    fn pipe_contact_ends_session() {
        let (mut flappy, mut ctx) = started();
        flappy.pipes[0] = Pipe { x: BIRD_X, gap_y: 40.0, scored: false };
        flappy.bird_y = 20.0;
        assert_eq!(flappy.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn init_then_draw() {
        let (flappy, _) = started();
        let mut frame = FrameBuffer::new();
        flappy.draw(&mut frame);
        assert!(frame.pixel(BIRD_X as i32, flappy.bird_y as i32));
    }
}
