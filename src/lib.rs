//! Windy Glider - an endless glider arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight physics, wind, level generation, collisions)
//! - `highscores`: Top-10 leaderboard persisted to LocalStorage
//! - `settings`: Player preferences persisted to LocalStorage

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
///
/// Per-frame constants are tuned for one frame at 60 fps (16.67 ms);
/// the simulation scales them by `dt / FRAME_MS` each tick.
pub mod consts {
    /// Reference frame duration in milliseconds (60 fps)
    pub const FRAME_MS: f32 = 16.67;
    /// Upper bound on a single tick's delta (tab-switch guard)
    pub const MAX_TICK_MS: f32 = 100.0;

    /// World layout
    pub const VIEW_WIDTH: f32 = 1280.0;
    pub const VIEW_HEIGHT: f32 = 720.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = VIEW_HEIGHT - GROUND_HEIGHT;

    /// Glider spawn and hitbox
    pub const GLIDER_START_X: f32 = 200.0;
    pub const GLIDER_START_Y: f32 = VIEW_HEIGHT / 2.0;
    pub const GLIDER_START_SPEED: f32 = 100.0;
    pub const GLIDER_HALF_W: f32 = 30.0;
    pub const GLIDER_HALF_H: f32 = 15.0;
    pub const START_LIVES: u32 = 3;

    /// Flight model - the glider can never fully stall horizontally
    pub const MIN_FORWARD_SPEED: f32 = 90.0;
    pub const MAX_FORWARD_SPEED: f32 = 400.0;
    /// Constant downward pull per frame
    pub const GRAVITY_PER_FRAME: f32 = 0.42;
    /// Lift engages above this forward speed...
    pub const LIFT_THRESHOLD: f32 = 120.0;
    /// ...grows linearly with this gain...
    pub const LIFT_GAIN: f32 = 0.0008;
    /// ...and saturates here. At ~200 px/s you fly roughly level.
    pub const LIFT_CAP: f32 = 0.10;
    /// Small bias so the net force is always a touch downward
    pub const SINK_BIAS: f32 = 0.04;
    /// Quadratic drag: factor = max(MIN_DRAG, 1 - (|v|/DRAG_NORM)^2 * DRAG_SCALE)
    pub const DRAG_NORM: f32 = 300.0;
    pub const DRAG_SCALE: f32 = 0.92;
    pub const MIN_DRAG: f32 = 0.985;
    /// Climb/dive rate bounds
    pub const MIN_VERTICAL_SPEED: f32 = -250.0;
    pub const MAX_VERTICAL_SPEED: f32 = 350.0;
    /// Visual tilt interpolation factor per frame
    pub const TILT_LERP: f32 = 0.08;

    /// Wind gestures
    pub const WIND_BASELINE_STRENGTH: f32 = 120.0;
    pub const WIND_MAX_STRENGTH: f32 = 450.0;
    /// Strength = speed (px/s) * WIND_SPEED_GAIN + distance * WIND_DIST_GAIN
    pub const WIND_SPEED_GAIN: f32 = 10.0;
    pub const WIND_DIST_GAIN: f32 = 0.5;
    /// Acceleration applied per unit strength per frame
    pub const WIND_ACCEL: f32 = 0.12;
    /// Exponential decay base per frame
    pub const WIND_DECAY: f32 = 0.92;
    /// Residual strengths below this snap to zero
    pub const WIND_EPSILON: f32 = 1.0;
    /// Torque nudge only above this noise floor
    pub const WIND_TORQUE_FLOOR: f32 = 20.0;

    /// Level generation
    pub const MIN_VERTICAL_GAP: f32 = 160.0;
    pub const MIN_HORIZONTAL_GAP: f32 = 400.0;
    pub const BASE_GAP: f32 = 200.0;
    pub const GAP_PER_LEVEL: f32 = 10.0;
    pub const PILLAR_WIDTH: f32 = 60.0;
    /// New content spawns this far past the camera's right edge
    pub const SPAWN_LOOKAHEAD: f32 = 300.0;
    /// Keep spawned content this far off the ground
    pub const GROUND_SAFETY: f32 = 10.0;
    /// Entities this far behind the camera's left edge are destroyed
    pub const CLEANUP_MARGIN: f32 = 100.0;

    /// Entity hitbox half-extents
    pub const STAR_HALF: f32 = 12.0;
    pub const SPIKEY_RADIUS: f32 = 24.0;
    pub const LASER_HALF_W: f32 = 50.0;
    pub const LASER_HALF_H: f32 = 6.0;
    pub const BIRD_HALF_W: f32 = 20.0;
    pub const BIRD_HALF_H: f32 = 15.0;
    pub const HEART_HALF: f32 = 16.0;
    pub const WIND_ZONE_HALF_W: f32 = 40.0;
    pub const WIND_ZONE_HALF_H: f32 = 50.0;

    /// Hazard behavior
    pub const LASER_ON_MS: f32 = 1500.0;
    pub const LASER_CYCLE_MS: f32 = 2500.0;
    pub const SPIKEY_TOP_BOUND: f32 = 60.0;
    /// Vertical wind-zone force is scaled by this on every overlapping tick
    pub const WIND_ZONE_SCALE: f32 = 0.1;

    /// Collision outcomes
    pub const KNOCKBACK_MIN_SPEED: f32 = 50.0;
    pub const KNOCKBACK_VX_FACTOR: f32 = 0.3;
    pub const KNOCKBACK_VY_FACTOR: f32 = 0.7;
    pub const KNOCKBACK_PUSHBACK: f32 = 15.0;
    pub const INVULN_MS: f32 = 1000.0;

    /// Power-up durations (re-collection resets to the full duration)
    pub const BOOST_MS: f32 = 7000.0;
    pub const STRENGTH_MS: f32 = 6000.0;
    pub const COIN_MS: f32 = 8000.0;
    /// Boost pins the glider to this forward speed
    pub const BOOST_SPEED: f32 = 1600.0;
    /// Boost tint cycles at this interval (cosmetic)
    pub const BOOST_FLASH_MS: f32 = 60.0;

    /// Difficulty ramps once per second of play
    pub const DIFFICULTY_STEP_MS: f32 = 1000.0;

    /// Distance HUD shows world x scaled down
    pub const DISTANCE_SCALE: f32 = 0.05;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Shortest signed difference between two angles in degrees, in [-180, 180)
#[inline]
pub fn shortest_angle_deg(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % 360.0;
    if delta >= 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    delta
}
