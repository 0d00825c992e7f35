use arcade_engine::*;
use glam::Vec2;

const COL_W: i32 = 8;
const COLS: usize = 17;
const SCROLL_SPEED: f32 = 1.0;

const GROUND_MIN: i32 = 40;
const GROUND_MAX: i32 = 56;
const GROUND_STEP: i32 = 8;
const START_GROUND: i32 = 48;
const PIT_CHANCE: u32 = 12;
const MIN_SOLID_RUN: u32 = 4;
const MAX_PIT_W: i32 = 2;

const PLAYER_X: f32 = 20.0;
const PLAYER_W: f32 = 6.0;
const PLAYER_H: f32 = 8.0;
const GRAVITY: f32 = 0.3;
const JUMP_VEL: f32 = -4.0;
/// Sinking deeper than this into the ground is a wall hit, not a landing.
const STEP_TOLERANCE: f32 = 1.0;

const MAX_ENEMIES: usize = 5;
const ENEMY_SIZE: f32 = 6.0;
const ENEMY_SPEED: f32 = 1.5;
const ENEMY_CHANCE: u32 = 15;
const STOMP_BONUS: u32 = 2;
const STOMP_BOUNCE: f32 = -2.5;

const FIELD_H: f32 = SCREEN_HEIGHT as f32;

/// Produces terrain columns: a bounded random walk of the ground height
/// with occasional short pits separated by solid runs.
#[derive(Debug, Clone, Copy)]
struct TerrainGen {
    ground: i32,
    solid_run: u32,
    pit_left: u32,
}

impl TerrainGen {
    fn new() -> Self {
        Self {
            ground: START_GROUND,
            solid_run: 0,
            pit_left: 0,
        }
    }

    /// Ground top of the next column, `None` for a pit.
    fn next_column(&mut self, rng: &mut Rng) -> Option<i32> {
        if self.pit_left > 0 {
            self.pit_left -= 1;
            return None;
        }
        if self.solid_run >= MIN_SOLID_RUN && rng.chance(PIT_CHANCE) {
            self.pit_left = rng.range(1, MAX_PIT_W + 1) as u32 - 1;
            self.solid_run = 0;
            return None;
        }
        self.solid_run += 1;
        self.ground = (self.ground + rng.range(-1, 2) * GROUND_STEP).clamp(GROUND_MIN, GROUND_MAX);
        Some(self.ground)
    }
}

/// Side-scrolling runner over generated terrain with walking enemies.
/// Enemy positions are in screen space.
pub struct Mario {
    cols: [Option<i32>; COLS],
    /// Pixels the first column has scrolled out of view (0..COL_W).
    scroll: f32,
    terrain: TerrainGen,
    player_y: f32,
    vy: f32,
    grounded: bool,
    enemies: [Option<Vec2>; MAX_ENEMIES],
}

impl Mario {
    pub fn new() -> Self {
        Self {
            cols: [Some(START_GROUND); COLS],
            scroll: 0.0,
            terrain: TerrainGen::new(),
            player_y: 0.0,
            vy: 0.0,
            grounded: false,
            enemies: [None; MAX_ENEMIES],
        }
    }

    fn player(&self) -> Aabb {
        Aabb::new(PLAYER_X, self.player_y, PLAYER_W, PLAYER_H)
    }

    /// Highest ground top under the screen span `[x, x + w)`, `None` over a pit.
    fn ground_under(&self, x: f32, w: f32) -> Option<i32> {
        let first = ((x + self.scroll) as i32).div_euclid(COL_W);
        let last = ((x + w - 1.0 + self.scroll) as i32).div_euclid(COL_W);
        (first..=last)
            .filter(|c| (0..COLS as i32).contains(c))
            .filter_map(|c| self.cols[c as usize])
            .min()
    }

    fn advance_terrain(&mut self, ctx: &mut EngineContext) {
        self.scroll += SCROLL_SPEED;
        if self.scroll < COL_W as f32 {
            return;
        }
        self.scroll -= COL_W as f32;
        self.cols.copy_within(1.., 0);
        let col = self.terrain.next_column(&mut ctx.rng);
        self.cols[COLS - 1] = col;
        ctx.add_score(1);

        if let Some(top) = col {
            if ctx.rng.chance(ENEMY_CHANCE) {
                if let Some(slot) = self.enemies.iter_mut().find(|e| e.is_none()) {
                    let x = ((COLS - 1) as i32 * COL_W) as f32 - self.scroll + 1.0;
                    *slot = Some(Vec2::new(x, top as f32 - ENEMY_SIZE));
                }
            }
        }
    }

    fn move_enemies(&mut self) {
        for i in 0..MAX_ENEMIES {
            let Some(mut pos) = self.enemies[i] else {
                continue;
            };
            pos.x -= ENEMY_SPEED;
            self.enemies[i] = if pos.x + ENEMY_SIZE < 0.0 {
                None
            } else {
                // Enemies walk along the ground and drop out over pits
                self.ground_under(pos.x + ENEMY_SIZE / 2.0, 1.0)
                    .map(|top| Vec2::new(pos.x, top as f32 - ENEMY_SIZE))
            };
        }
    }
}

impl Default for Mario {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Mario {
    fn init(&mut self, _ctx: &mut EngineContext) {
        *self = Self::new();
        self.player_y = START_GROUND as f32 - PLAYER_H;
        self.grounded = true;
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        let jump = input.is_just_pressed(Button::Select) || input.is_just_pressed(Button::Up);
        if jump && self.grounded {
            self.vy = JUMP_VEL;
            self.grounded = false;
        }

        let prev_bottom = self.player_y + PLAYER_H;
        self.vy += GRAVITY;
        self.player_y += self.vy;
        let falling = self.vy > 0.0;

        self.advance_terrain(ctx);
        self.move_enemies();

        self.grounded = false;
        if let Some(top) = self.ground_under(PLAYER_X, PLAYER_W) {
            let top = top as f32;
            if falling && self.player_y + PLAYER_H > top {
                if prev_bottom > top + STEP_TOLERANCE {
                    // Ran into the side of a higher column
                    return GameStatus::Over;
                }
                self.player_y = top - PLAYER_H;
                self.vy = 0.0;
                self.grounded = true;
            }
        }
        if self.player_y > FIELD_H {
            return GameStatus::Over;
        }

        let player = self.player();
        for slot in &mut self.enemies {
            let Some(pos) = *slot else {
                continue;
            };
            let enemy = Aabb::from_pos(pos, Vec2::splat(ENEMY_SIZE));
            if !enemy.overlaps(&player) {
                continue;
            }
            if falling && prev_bottom <= enemy.center().y {
                *slot = None;
                self.vy = STOMP_BOUNCE;
                self.grounded = false;
                ctx.add_score(STOMP_BONUS);
                ctx.sound.cue(SoundCue::Score);
            } else {
                return GameStatus::Over;
            }
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        for (i, col) in self.cols.iter().enumerate() {
            if let Some(top) = col {
                let x = i as i32 * COL_W - self.scroll as i32;
                frame.fill_rect(x, *top, COL_W, SCREEN_HEIGHT - top);
            }
        }
        for pos in self.enemies.iter().flatten() {
            frame.draw_rect(pos.x as i32, pos.y as i32, ENEMY_SIZE as i32, ENEMY_SIZE as i32);
        }
        frame.fill_rect(PLAYER_X as i32, self.player_y as i32, PLAYER_W as i32, PLAYER_H as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::*;

    fn started() -> (Mario, EngineContext) {
        let mut ctx = context_at(0);
        let mut mario = Mario::new();
        mario.init(&mut ctx);
        (mario, ctx)
    }

    #[test]
    fn terrain_bounds_and_pit_spacing() {
        let mut rng = Rng::new(3);
        let mut terrain = TerrainGen::new();
        let mut solid_run = MIN_SOLID_RUN;
        let mut pit_w = 0;
        for _ in 0..5000 {
            match terrain.next_column(&mut rng) {
                Some(top) => {
                    assert!((GROUND_MIN..=GROUND_MAX).contains(&top));
                    solid_run += 1;
                    pit_w = 0;
                }
                None => {
                    if pit_w == 0 {
                        assert!(solid_run >= MIN_SOLID_RUN);
                    }
                    pit_w += 1;
                    assert!(pit_w <= MAX_PIT_W);
                    solid_run = 0;
                }
            }
        }
    }

    #[test]
    fn jump_only_when_grounded() {
        let (mut mario, mut ctx) = started();
        mario.update(&mut ctx, &press(&[Button::Select]));
        assert_eq!(mario.vy, JUMP_VEL + GRAVITY);
        let vy = mario.vy;
        mario.update(&mut ctx, &press(&[Button::Select]));
        assert_eq!(mario.vy, vy + GRAVITY);
    }

    #[test]
    fn stands_on_flat_ground() {
        let (mut mario, mut ctx) = started();
        for _ in 0..4 {
            assert_eq!(mario.update(&mut ctx, &idle()), GameStatus::Running);
        }
        assert!(mario.grounded);
        assert_eq!(mario.player_y, START_GROUND as f32 - PLAYER_H);
    }

    #[test]
    fn rising_step_is_a_wall() {
        let (mut mario, mut ctx) = started();
        mario.cols[2] = Some(START_GROUND - GROUND_STEP);
        mario.cols[3] = Some(START_GROUND - GROUND_STEP);
        assert_eq!(mario.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn falling_into_pit_ends_session() {
        let (mut mario, mut ctx) = started();
        mario.cols = [None; COLS];
        assert!(run_idle(&mut mario, &mut ctx, 60).is_some());
    }

    #[test]
    fn stomp_scores_and_bounces() {
        let (mut mario, mut ctx) = started();
        mario.cols = [Some(56); COLS];
        mario.player_y = 40.0;
        mario.vy = 2.0;
        mario.grounded = false;
        mario.enemies[0] = Some(Vec2::new(PLAYER_X, 50.0));
        assert_eq!(mario.update(&mut ctx, &idle()), GameStatus::Running);
        assert_eq!(ctx.score(), STOMP_BONUS);
        assert_eq!(mario.vy, STOMP_BOUNCE);
        assert!(mario.enemies[0].is_none());
    }

    #[test]
    fn side_contact_ends_session() {
        let (mut mario, mut ctx) = started();
        mario.cols = [Some(56); COLS];
        mario.player_y = 48.0;
        mario.enemies[0] = Some(Vec2::new(PLAYER_X + 4.0, 50.0));
        assert_eq!(mario.update(&mut ctx, &idle()), GameStatus::Over);
    }

    #[test]
    fn each_new_column_scores() {
        let (mut mario, mut ctx) = started();
        for _ in 0..COL_W {
            mario.update(&mut ctx, &idle());
        }
        assert_eq!(ctx.score(), 1);
        assert_eq!(mario.scroll, 0.0);
    }

    #[test]
    fn init_then_draw() {
        let (mario, _) = started();
        let mut frame = FrameBuffer::new();
        mario.draw(&mut frame);
        assert!(frame.pixel(PLAYER_X as i32, mario.player_y as i32));
        assert!(frame.pixel(0, SCREEN_HEIGHT - 1));
    }
}
