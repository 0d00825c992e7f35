use std::f32::consts::FRAC_PI_2;

use arcade_engine::*;
use glam::Vec2;

const CENTER: Vec2 = Vec2::new(64.0, 26.0);
const RADIUS: f32 = 12.0;
const KNIFE_LEN: f32 = 8.0;
const LAUNCH_Y: f32 = 58.0;
const KNIFE_SPEED: f32 = 4.0;

/// Two knives closer than this (radians) collide.
const HIT_ANGLE: f32 = 0.2;

const MAX_STUCK: usize = 20;
const START_REQUIRED: usize = 5;
const MAX_REQUIRED: usize = 15;
const BASE_SPIN: f32 = 0.04;
const SPIN_PER_LEVEL: f32 = 0.01;
const LEVEL_BONUS: u32 = 5;

/// Rotating target; knives are thrown upward into its bottom edge.
///
/// Stuck knives are stored in the target's frame: the impact angle is the
/// target rotation plus a quarter turn, and a knife at stored angle `a` is
/// drawn at `a - rotation`, which puts a fresh knife straight below the hub.
pub struct Knife {
    rotation: f32,
    spin: f32,
    stuck: [f32; MAX_STUCK],
    stuck_count: usize,
    required: usize,
    level: u32,
    /// Tip position of the knife in flight.
    flying: Option<f32>,
}

impl Knife {
    pub fn new() -> Self {
        Self {
            rotation: 0.0,
            spin: BASE_SPIN,
            stuck: [0.0; MAX_STUCK],
            stuck_count: 0,
            required: START_REQUIRED,
            level: 1,
            flying: None,
        }
    }

    fn impact_angle(&self) -> f32 {
        normalize_angle(self.rotation + FRAC_PI_2)
    }

    /// Proximity is checked without wrapping at the 0/2π seam.
    fn hits_stuck_knife(&self, angle: f32) -> bool {
        self.stuck[..self.stuck_count]
            .iter()
            .any(|a| angles_within(*a, angle, HIT_ANGLE))
    }

    fn level_up(&mut self, ctx: &mut EngineContext) {
        self.level += 1;
        self.spin += SPIN_PER_LEVEL;
        self.required = (self.required + 1).min(MAX_REQUIRED);
        self.stuck_count = 0;
        ctx.add_score(LEVEL_BONUS);
        ctx.sound.cue(SoundCue::Select);
        log::debug!("knife: level {} needs {} knives", self.level, self.required);
    }
}

impl Default for Knife {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Knife {
    fn init(&mut self, _ctx: &mut EngineContext) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> GameStatus {
        self.rotation = normalize_angle(self.rotation + self.spin);

        if self.flying.is_none() && input.is_just_pressed(Button::Select) {
            self.flying = Some(LAUNCH_Y);
        }

        let Some(tip) = self.flying else {
            return GameStatus::Running;
        };
        let tip = tip - KNIFE_SPEED;
        if tip > CENTER.y + RADIUS {
            self.flying = Some(tip);
            return GameStatus::Running;
        }

        self.flying = None;
        let angle = self.impact_angle();
        if self.hits_stuck_knife(angle) {
            return GameStatus::Over;
        }
        if self.stuck_count < MAX_STUCK {
            self.stuck[self.stuck_count] = angle;
            self.stuck_count += 1;
        }
        ctx.add_score(1);
        ctx.sound.cue(SoundCue::Score);

        if self.stuck_count >= self.required {
            self.level_up(ctx);
        }
        GameStatus::Running
    }

    fn draw(&self, frame: &mut FrameBuffer) {
        let (cx, cy) = (CENTER.x as i32, CENTER.y as i32);
        frame.circle(cx, cy, RADIUS as i32);
        frame.circle(cx, cy, 2);

        // Spoke showing the current rotation
        let spoke = Vec2::from_angle(-self.rotation) * (RADIUS - 3.0);
        frame.line(cx, cy, cx + spoke.x as i32, cy + spoke.y as i32);

        for a in &self.stuck[..self.stuck_count] {
            let dir = Vec2::from_angle(a - self.rotation);
            let inner = CENTER + dir * RADIUS;
            let outer = CENTER + dir * (RADIUS + KNIFE_LEN);
            frame.line(inner.x as i32, inner.y as i32, outer.x as i32, outer.y as i32);
        }

        if let Some(tip) = self.flying {
            frame.line(cx, tip as i32, cx, (tip + KNIFE_LEN) as i32);
        } else {
            frame.line(cx, LAUNCH_Y as i32, cx, (LAUNCH_Y + KNIFE_LEN) as i32 - 2);
        }

        let left = self.required.saturating_sub(self.stuck_count);
        frame.text(2, SCREEN_HEIGHT - CHAR_HEIGHT, &format!("x{left}"));
        frame.text(SCREEN_WIDTH - 16, 0, &format!("L{}", self.level));
    }
}
