use arcade_engine::*;

const CELL: i32 = 4;
const GRID_W: i32 = SCREEN_WIDTH / CELL;
const GRID_H: i32 = SCREEN_HEIGHT / CELL;
const MAX_LEN: usize = 128;
const START_LEN: usize = 3;

// Move timer (ms): shortened per food eaten
const START_STEP_MS: u64 = 150;
const STEP_SPEEDUP_MS: u64 = 2;
const MIN_STEP_MS: u64 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_W && self.y >= 0 && self.y < GRID_H
    }
}

/// Grid snake. Moves one cell each time the move timer fires.
pub struct Snake {
    /// `body[0]` is the head.
    body: [Cell; MAX_LEN],
    len: usize,
    /// Direction of the next move.
    dir: (i32, i32),
    /// Direction of the last move actually made.
    heading: (i32, i32),
    food: Cell,
    step: Interval,
}

impl Snake {
    pub fn new() -> Self {
        Self {
            body: [Cell::default(); MAX_LEN],
            len: 0,
            dir: (1, 0),
            heading: (1, 0),
            food: Cell::default(),
            step: Interval::default(),
        }
    }

    fn occupied(&self, cell: Cell) -> bool {
        self.body[..self.len].contains(&cell)
    }

    fn spawn_food(&mut self, rng: &mut Rng) {
        loop {
            let cell = Cell::new(
                rng.next_int(GRID_W as u32) as i32,
                rng.next_int(GRID_H as u32) as i32,
            );
            if !self.occupied(cell) {
                self.food = cell;
                return;
            }
        }
    }

    /// Only turns across the axis of the last move are accepted, so a
    /// reversal is ignored however many turns arrive between moves.
    fn steer(&mut self, input: &InputState) {
        if input.is_pressed(Button::Up) && self.heading.1 == 0 {
            self.dir = (0, -1);
        } else if input.is_pressed(Button::Down) && self.heading.1 == 0 {
            self.dir = (0, 1);
        } else if input.is_pressed(Button::Left) && self.heading.0 == 0 {
            self.dir = (-1, 0);
        } else if input.is_pressed(Button::Right) && self.heading.0 == 0 {
            self.dir = (1, 0);
        }
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Snake {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.len = START_LEN;
        for i in 0..START_LEN {
            self.body[i] = Cell::new(8 - i as i32, 8);
        }
        self.dir = (1, 0);
        self.heading = self.dir;
        self.step = Interval::new(START_STEP_MS, ctx.now_ms());
        self.spawn_food(&mut ctx.rng);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        self.steer(input);
        if !self.step.fire(ctx.now_ms()) {
            return GameStatus::Running;
        }

        self.heading = self.dir;
        let head = self.body[0];
        let next = Cell::new(head.x + self.dir.0, head.y + self.dir.1);
        if !next.in_bounds() {
            return GameStatus::Over;
        }

        let eating = next == self.food;
        let grows = eating && self.len < MAX_LEN;
        // The tail cell frees up this step unless the snake grows
        let solid = if grows { self.len } else { self.len - 1 };
        if self.body[..solid].contains(&next) {
            return GameStatus::Over;
        }

        if grows {
            self.len += 1;
        }
        self.body.copy_within(0..self.len - 1, 1);
        self.body[0] = next;

        if eating {
            ctx.add_score(1);
            ctx.sound.cue(SoundCue::Score);
            self.step.shorten(STEP_SPEEDUP_MS, MIN_STEP_MS);
            self.spawn_food(&mut ctx.rng);
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for cell in &self.body[..self.len] {
            frame.fill_rect(cell.x * CELL, cell.y * CELL, CELL - 1, CELL - 1);
        }
        frame.draw_rect(self.food.x * CELL, self.food.y * CELL, CELL - 1, CELL - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::*;

    fn started() -> (Snake, EngineContext) {
        let mut ctx = context_at(0);
        let mut snake = Snake::new();
        snake.init(&mut ctx);
        // Keep food out of the way
        snake.food = Cell::new(0, 15);
        (snake, ctx)
    }

    #[test]
    fn waits_for_move_timer() {
        let (mut snake, mut ctx) = started();
        ctx.set_now(150);
        snake.update(&mut ctx, &idle());
        assert_eq!(snake.body[0], Cell::new(8, 8));
        ctx.set_now(151);
        snake.update(&mut ctx, &idle());
        assert_eq!(snake.body[0], Cell::new(9, 8));
        assert_eq!(snake.body[2], Cell::new(7, 8));
    }

    #[test]
    fn reverse_is_ignored() {
        let (mut snake, mut ctx) = started();
        ctx.set_now(200);
        snake.update(&mut ctx, &hold(&[Button::Left]));
        assert_eq!(snake.dir, (1, 0));
        assert_eq!(snake.body[0], Cell::new(9, 8));
    }

    #[test]
    fn perpendicular_turn_is_accepted() {
        let (mut snake, mut ctx) = started();
        ctx.set_now(200);
        snake.update(&mut ctx, &hold(&[Button::Up]));
        assert_eq!(snake.dir, (0, -1));
        assert_eq!(snake.body[0], Cell::new(8, 7));
    }

    #[test]
    fn two_turns_between_moves_cannot_reverse() {
        let (mut snake, mut ctx) = started();
        ctx.set_now(20);
        snake.update(&mut ctx, &hold(&[Button::Up]));
        ctx.set_now(40);
        snake.update(&mut ctx, &hold(&[Button::Left]));
        // Still heading right, so LEFT is a reversal
        assert_eq!(snake.dir, (0, -1));

        ctx.set_now(200);
        assert_eq!(snake.update(&mut ctx, &idle()), GameStatus::Running);
        assert_eq!(snake.body[0], Cell::new(8, 7));

        // After moving up, LEFT is a real turn
        ctx.set_now(220);
        snake.update(&mut ctx, &hold(&[Button::Left]));
        assert_eq!(snake.dir, (-1, 0));
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let (mut snake, mut ctx) = started();
        snake.food = Cell::new(9, 8);
        ctx.set_now(200);
        assert_eq!(snake.update(&mut ctx, &idle()), GameStatus::Running);
        assert_eq!(snake.len, 4);
        assert_eq!(ctx.score(), 1);
        assert_eq!(snake.step.period_ms(), 148);
        assert!(!snake.occupied(snake.food));
    }

    #[test]
    fn move_timer_has_a_floor() {
        let (mut snake, _) = started();
        for _ in 0..100 {
            snake.step.shorten(STEP_SPEEDUP_MS, MIN_STEP_MS);
        }
        assert_eq!(snake.step.period_ms(), 50);
    }

    #[test]
    fn wall_ends_session() {
        let (mut snake, mut ctx) = started();
        assert!(run_idle(&mut snake, &mut ctx, 10_000).is_some());
        assert!(snake.body[0].x == GRID_W - 1);
    }

    #[test]
    fn self_collision_ends_session() {
        let (mut snake, mut ctx) = started();
        // Coil: head at (5,5) moving down into its own body
        snake.len = 5;
        snake.body[..5].copy_from_slice(&[
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
            Cell::new(4, 6),
        ]);
        snake.dir = (0, 1);
        snake.heading = (0, 1);
        ctx.set_now(200);
        assert_eq!(snake.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn init_then_draw() {
        let (snake, _) = started();
        let mut frame = FrameBuffer::new();
        snake.draw(&mut frame);
        assert!(frame.pixel(32, 32));
    }
}
