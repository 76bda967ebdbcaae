//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]; there is no
//! ambient global state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Which side of the table a flipper sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipperSide {
    Left,
    Right,
}

impl FlipperSide {
    /// +1 for the left flipper (angles grow toward max), -1 for the right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            FlipperSide::Left => 1.0,
            FlipperSide::Right => -1.0,
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    pub friction: f32,
    /// Set once the player has launched this ball
    pub launched: bool,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            gravity: tuning.gravity,
            friction: tuning.friction,
            launched: false,
        }
    }

    /// Put the ball back at the origin, at rest and unlaunched
    pub fn reset(&mut self) {
        self.pos = Vec2::new(BALL_START_X, BALL_START_Y);
        self.vel = Vec2::ZERO;
        self.launched = false;
    }
}

/// A flipper: a thick line segment rotating about its pivot
#[derive(Debug, Clone, PartialEq)]
pub struct Flipper {
    pub side: FlipperSide,
    pub pivot: Vec2,
    pub length: f32,
    pub width: f32,
    /// Current angle (radians, 0 = rest)
    pub angle: f32,
    /// Signed maximum deflection (positive left, negative right)
    pub max_angle: f32,
    /// Angle change per frame while held (magnitude)
    pub flip_step: f32,
    /// Signed angle change subtracted per frame while falling back
    pub return_speed: f32,
    /// Held by the player
    pub active: bool,
}

impl Flipper {
    pub fn new(side: FlipperSide, tuning: &Tuning) -> Self {
        let pivot_x = match side {
            FlipperSide::Left => LEFT_FLIPPER_X,
            FlipperSide::Right => RIGHT_FLIPPER_X,
        };
        Self {
            side,
            pivot: Vec2::new(pivot_x, FLIPPER_PIVOT_Y),
            length: FLIPPER_LENGTH,
            width: FLIPPER_WIDTH,
            angle: 0.0,
            max_angle: tuning.flipper_max_angle * side.sign(),
            flip_step: tuning.flipper_flip_step,
            return_speed: tuning.flipper_return_speed * side.sign(),
            active: false,
        }
    }

    /// Tip of the flipper at its current angle
    pub fn tip(&self) -> Vec2 {
        self.pivot + Vec2::new(self.angle.cos(), self.angle.sin()) * self.length
    }

    /// Legal angle range as (min, max)
    pub fn angle_range(&self) -> (f32, f32) {
        if self.max_angle >= 0.0 {
            (0.0, self.max_angle)
        } else {
            (self.max_angle, 0.0)
        }
    }

    pub fn clamp_angle(&mut self) {
        let (min, max) = self.angle_range();
        self.angle = self.angle.clamp(min, max);
    }
}

/// A round scoring bumper
#[derive(Debug, Clone, PartialEq)]
pub struct Bumper {
    pub pos: Vec2,
    pub radius: f32,
    pub points: u64,
    /// Lit after being struck (render only)
    pub hit: bool,
    /// Frame-clock time (ms) at which the light goes out
    pub hit_expires_ms: Option<f64>,
}

impl Bumper {
    pub fn new(x: f32, y: f32, points: u64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius: BUMPER_RADIUS,
            points,
            hit: false,
            hit_expires_ms: None,
        }
    }

    /// Light the bumper until `now_ms + flash_ms`
    pub fn strike(&mut self, now_ms: f64, flash_ms: f64) {
        self.hit = true;
        self.hit_expires_ms = Some(now_ms + flash_ms);
    }

    /// Turn the light off once its expiry has passed
    pub fn expire(&mut self, now_ms: f64) {
        if let Some(expires) = self.hit_expires_ms {
            if now_ms >= expires {
                self.clear_hit();
            }
        }
    }

    pub fn clear_hit(&mut self) {
        self.hit = false;
        self.hit_expires_ms = None;
    }
}

/// A static line segment of the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
}

impl Wall {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }
}

/// The fixed bumper layout
pub fn table_bumpers() -> Vec<Bumper> {
    vec![
        Bumper::new(100.0, 150.0, 100),
        Bumper::new(200.0, 150.0, 100),
        Bumper::new(300.0, 150.0, 100),
        Bumper::new(80.0, 280.0, 150),
        Bumper::new(320.0, 280.0, 150),
        Bumper::new(150.0, 380.0, 150),
        Bumper::new(250.0, 380.0, 150),
    ]
}

/// The fixed wall layout: left, right, top, center barrier
pub const TABLE_WALLS: [Wall; 4] = [
    Wall::new(LEFT_WALL_X, TOP_WALL_Y, LEFT_WALL_X, DRAIN_Y),
    Wall::new(RIGHT_WALL_X, TOP_WALL_Y, RIGHT_WALL_X, DRAIN_Y),
    Wall::new(LEFT_WALL_X, TOP_WALL_Y, RIGHT_WALL_X, TOP_WALL_Y),
    Wall::new(BARRIER_X_MIN, BARRIER_Y, BARRIER_X_MAX, BARRIER_Y),
];

/// Things that happened during a tick, for HUD/audio/logging consumers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Reset,
    Launched { vel: Vec2 },
    BumperHit { index: usize, points: u64 },
    BarrierHit { points: u64 },
    FlipperHit { side: FlipperSide, points: u64 },
    BallLost { lives_left: u32 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub ball: Ball,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    pub bumpers: Vec<Bumper>,
    pub walls: Vec<Wall>,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    /// Physics only advances while running
    pub running: bool,
    /// Frame clock (ms) of the most recent tick
    pub now_ms: f64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            ball: Ball::new(&tuning),
            left_flipper: Flipper::new(FlipperSide::Left, &tuning),
            right_flipper: Flipper::new(FlipperSide::Right, &tuning),
            bumpers: table_bumpers(),
            walls: TABLE_WALLS.to_vec(),
            score: 0,
            level: 1,
            lives: tuning.starting_lives,
            running: false,
            now_ms: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tuning,
        }
    }

    /// Whether the ball is in play (as opposed to waiting in the launch zone)
    #[inline]
    pub fn launched(&self) -> bool {
        self.ball.launched
    }

    /// Lives exhausted and the run has stopped
    pub fn is_game_over(&self) -> bool {
        !self.running && self.lives == 0
    }

    pub fn flipper(&self, side: FlipperSide) -> &Flipper {
        match side {
            FlipperSide::Left => &self.left_flipper,
            FlipperSide::Right => &self.right_flipper,
        }
    }

    pub fn flipper_mut(&mut self, side: FlipperSide) -> &mut Flipper {
        match side {
            FlipperSide::Left => &mut self.left_flipper,
            FlipperSide::Right => &mut self.right_flipper,
        }
    }

    /// Begin a run if one isn't already going
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.ball.reset();
        self.events.push(GameEvent::Started);
        log::info!("Game started (seed {}, lives {})", self.seed, self.lives);
    }

    /// Back to a fresh table: score, level and lives restored, run stopped
    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lives = self.tuning.starting_lives;
        self.running = false;
        self.ball.reset();
        for bumper in &mut self.bumpers {
            bumper.clear_hit();
        }
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");
    }

    /// Fire the ball out of the launch zone.
    ///
    /// Ignored unless the game is running and the ball is still unlaunched.
    /// Returns whether a launch happened.
    pub fn launch(&mut self) -> bool {
        if !self.running || self.ball.launched {
            return false;
        }
        let spread = self.tuning.launch_spread;
        let vx = if spread > 0.0 {
            self.rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        let vy = -self.tuning.launch_speed - self.level as f32 * self.tuning.launch_speed_per_level;
        self.ball.vel = Vec2::new(vx, vy);
        self.ball.launched = true;
        self.events.push(GameEvent::Launched { vel: self.ball.vel });
        log::debug!("Ball launched with velocity ({:.2}, {:.2})", vx, vy);
        true
    }

    /// The ball drained: take a life, then either end the run or re-serve
    pub fn lose_ball(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::BallLost {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.running = false;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over with score {}", self.score);
        } else {
            log::debug!("Ball lost, {} lives left", self.lives);
            self.ball.reset();
        }
    }

    /// Turn off any bumper light whose flash has run out
    pub fn expire_bumper_hits(&mut self) {
        let now = self.now_ms;
        for bumper in &mut self.bumpers {
            bumper.expire(now);
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert!(!state.running);
        assert!(!state.launched());
        assert_eq!(state.bumpers.len(), 7);
        assert_eq!(state.walls.len(), 4);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_flipper_ranges_are_signed_per_side() {
        let state = GameState::new(1);
        assert_eq!(state.left_flipper.angle_range(), (0.0, 0.4));
        assert_eq!(state.right_flipper.angle_range(), (-0.4, 0.0));
        assert!(state.right_flipper.return_speed < 0.0);
    }

    #[test]
    fn test_flipper_tip_at_rest() {
        let state = GameState::new(1);
        let tip = state.left_flipper.tip();
        assert!((tip - Vec2::new(180.0, 520.0)).length() < 1e-4);
    }

    #[test]
    fn test_launch_requires_running_and_unlaunched() {
        let mut state = GameState::new(7);
        assert!(!state.launch());

        state.start();
        assert!(state.launch());
        assert!(state.launched());
        // Second press is ignored
        let vel = state.ball.vel;
        assert!(!state.launch());
        assert_eq!(state.ball.vel, vel);
    }

    #[test]
    fn test_launch_velocity() {
        let mut state = GameState::new(42);
        state.level = 3;
        state.start();
        state.launch();
        assert_eq!(state.ball.vel.y, -8.0 - 3.0 * 0.5);
        assert!((-2.0..=2.0).contains(&state.ball.vel.x));
    }

    #[test]
    fn test_start_is_idempotent_while_running() {
        let mut state = GameState::new(1);
        state.start();
        state.ball.pos = Vec2::new(50.0, 60.0);
        state.start();
        assert_eq!(state.ball.pos, Vec2::new(50.0, 60.0));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Started],
            "only the first start emits"
        );
    }

    #[test]
    fn test_reset_restores_fresh_table() {
        let mut state = GameState::new(1);
        state.start();
        state.lives = 1;
        state.score = 500;
        state.level = 4;
        state.bumpers[2].strike(0.0, 200.0);
        state.bumpers[5].strike(0.0, 200.0);

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert!(state.bumpers.iter().all(|b| !b.hit && b.hit_expires_ms.is_none()));
        assert!(!state.running);
        assert!(!state.launched());
    }

    #[test]
    fn test_lose_ball_then_game_over() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 1234;

        state.lose_ball();
        assert_eq!(state.lives, 2);
        assert!(state.running);

        state.lose_ball();
        state.lose_ball();
        assert_eq!(state.lives, 0);
        assert!(!state.running);
        assert!(state.is_game_over());
        assert!(state
            .drain_events()
            .contains(&GameEvent::GameOver { score: 1234 }));

        // Never goes negative
        state.lose_ball();
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_bumper_expiry() {
        let mut bumper = Bumper::new(0.0, 0.0, 100);
        bumper.strike(1000.0, 200.0);
        bumper.expire(1199.0);
        assert!(bumper.hit);
        bumper.expire(1200.0);
        assert!(!bumper.hit);
        assert!(bumper.hit_expires_ms.is_none());
    }
}
