//! Game session state and core simulation types
//!
//! Everything that was scattered scene-global in a typical engine build
//! (score, lives, power-up flags, spawn frontier) is collected into one
//! explicit [`GameState`] so each component works on plain data.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::wind::WindController;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (ground contact or out of lives)
    GameOver,
}

/// The player-controlled glider
#[derive(Debug, Clone)]
pub struct Glider {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual tilt in degrees, lerped toward the flight path
    pub angle: f32,
    /// Degrees per frame, nudged by strong gusts
    pub angular_vel: f32,
    pub lives: u32,
    /// Invulnerability window end, in session milliseconds
    pub invuln_until_ms: f32,
}

impl Glider {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(GLIDER_START_X, GLIDER_START_Y),
            vel: Vec2::new(GLIDER_START_SPEED, 0.0),
            angle: 0.0,
            angular_vel: 0.0,
            lives: START_LIVES,
            invuln_until_ms: 0.0,
        }
    }

    /// True while the post-hit grace window is open
    pub fn is_invulnerable(&self, now_ms: f32) -> bool {
        now_ms < self.invuln_until_ms
    }

    pub fn half_extents() -> Vec2 {
        Vec2::new(GLIDER_HALF_W, GLIDER_HALF_H)
    }
}

impl Default for Glider {
    fn default() -> Self {
        Self::new()
    }
}

/// One pillar of an obstacle pair, occupying
/// `[x, x + PILLAR_WIDTH] x [top, bottom]` in world space. Immovable.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Obstacle {
    pub fn right(&self) -> f32 {
        self.x + PILLAR_WIDTH
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x + PILLAR_WIDTH / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(PILLAR_WIDTH / 2.0, (self.bottom - self.top) / 2.0)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Invincible + pinned high forward speed (7 s)
    Boost,
    /// Smash pillars without losing a life (6 s)
    Strength,
    /// Double star points (8 s)
    Coin,
}

/// What a collectible carries: point value or power-up, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// A star worth the given points (1, 10 or 50)
    Star { points: u32 },
    PowerUp(PowerUpKind),
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub kind: CollectibleKind,
}

/// Per-variant hazard motion state
#[derive(Debug, Clone)]
pub enum HazardKind {
    /// Spins in place, bounces vertically off top/bottom bounds
    Spikey { spin: f32, vy: f32, angle: f32 },
    /// Duty-cycled beam: 1.5 s on, 1 s off
    Laser { timer_ms: f32, active: bool },
    /// Drifts left with a sinusoidal bob
    Bird { vx: f32, flap_ms: f32 },
}

#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub kind: HazardKind,
}

/// Rare pickup granting +1 life
#[derive(Debug, Clone)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
}

/// A region exerting a constant vertical force while overlapped
#[derive(Debug, Clone)]
pub struct WindZone {
    pub id: u32,
    pub pos: Vec2,
    pub force_y: f32,
}

/// Time-boxed power-up flags, stored as expiry deadlines on the session
/// clock. Re-collecting a type resets its deadline to the full duration
/// rather than extending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveEffects {
    pub boost_until_ms: f32,
    pub strength_until_ms: f32,
    pub coin_until_ms: f32,
}

impl ActiveEffects {
    pub fn boost_active(&self, now_ms: f32) -> bool {
        now_ms < self.boost_until_ms
    }

    pub fn strength_active(&self, now_ms: f32) -> bool {
        now_ms < self.strength_until_ms
    }

    pub fn coin_active(&self, now_ms: f32) -> bool {
        now_ms < self.coin_until_ms
    }

    /// Activate (or refresh) a power-up at the given session time
    pub fn activate(&mut self, kind: PowerUpKind, now_ms: f32) {
        match kind {
            PowerUpKind::Boost => self.boost_until_ms = now_ms + BOOST_MS,
            PowerUpKind::Strength => self.strength_until_ms = now_ms + STRENGTH_MS,
            PowerUpKind::Coin => self.coin_until_ms = now_ms + COIN_MS,
        }
    }
}

/// Output events for the HUD / game-over layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u32),
    DistanceChanged(f32),
    /// Gesture released; strength normalized to 0..1
    WindChanged(f32),
    PowerUpActivated(PowerUpKind),
    /// An obstacle or hazard was destroyed by an active power-up
    Smashed,
    GameOver { score: u64, distance: f32 },
}

/// Boost tint palette, cycled while boosting (cosmetic only)
pub const BOOST_TINTS: [u32; 6] = [0xff4444, 0xffe100, 0x44ff44, 0x44e1ff, 0x4444ff, 0xe144ff];

/// Complete game session state (deterministic given the seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every procedural choice draws from here
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub glider: Glider,
    pub wind: WindController,
    pub score: u64,
    /// World x scaled for the HUD
    pub distance: f32,
    /// Monotonic difficulty level, +1 per second of play
    pub difficulty: u32,
    /// Session clock in milliseconds
    pub time_ms: f32,
    /// Spawn frontier: world x of the last emitted content slice
    pub last_spawn_x: f32,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub hazards: Vec<Hazard>,
    pub hearts: Vec<Heart>,
    pub wind_zones: Vec<WindZone>,
    pub effects: ActiveEffects,
    /// Events produced this frame, drained by the frontend
    pub events: Vec<GameEvent>,
    /// Current boost tint (cosmetic, cycled while boosting)
    pub boost_tint: u32,
    pub(super) boost_flash_ms: f32,
    pub(super) difficulty_accum_ms: f32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed and the first content
    /// slice already generated ahead of the glider.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            glider: Glider::new(),
            wind: WindController::new(),
            score: 0,
            distance: GLIDER_START_X * DISTANCE_SCALE,
            difficulty: 1,
            time_ms: 0.0,
            last_spawn_x: 0.0,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            hearts: Vec::new(),
            wind_zones: Vec::new(),
            effects: ActiveEffects::default(),
            events: Vec::new(),
            boost_tint: BOOST_TINTS[0],
            boost_flash_ms: 0.0,
            difficulty_accum_ms: 0.0,
            next_id: 1,
        };

        super::level::generate(&mut state);

        state
    }

    /// Discard the session and start over (also drops any pending
    /// power-up / invulnerability deadlines)
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Left edge of the camera; the glider rides a quarter-width in
    pub fn camera_left(&self) -> f32 {
        (self.glider.pos.x - VIEW_WIDTH / 4.0).max(0.0)
    }

    /// Right edge of the camera
    pub fn camera_right(&self) -> f32 {
        self.camera_left() + VIEW_WIDTH
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pointer pressed at world coordinates `(x, y)` at timestamp `t_ms`
    pub fn pointer_down(&mut self, x: f32, y: f32, t_ms: f64) {
        if self.phase != GamePhase::Playing || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.wind.on_pointer_down(Vec2::new(x, y), t_ms, self.glider.pos);
    }

    /// Pointer moved while pressed
    pub fn pointer_move(&mut self, x: f32, y: f32, _t_ms: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.wind.on_pointer_move(Vec2::new(x, y), self.glider.pos);
    }

    /// Pointer released; finalizes the gesture into a decaying gust
    pub fn pointer_up(&mut self, x: f32, y: f32, t_ms: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        if let Some(normalized) = self.wind.on_pointer_up(Vec2::new(x, y), t_ms) {
            self.push_event(GameEvent::WindChanged(normalized));
        }
    }
}
