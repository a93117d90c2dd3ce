//! Wind gesture controller
//!
//! Translates pointer gestures into a directional gust applied to the
//! glider over subsequent ticks with exponential decay. While a swipe is
//! in progress the gust direction tracks the pointer-to-glider vector
//! live; on release the whole drag becomes a single strength + direction
//! pair. A plain click (zero-length drag) still delivers the baseline
//! impulse seeded on pointer-down.

use glam::Vec2;

use crate::consts::*;
use crate::shortest_angle_deg;

use super::state::Glider;

#[derive(Debug, Clone)]
pub struct WindController {
    /// Remaining gust strength, decays exponentially each tick
    strength: f32,
    /// Gust direction in radians
    direction: f32,
    swiping: bool,
    start_pos: Vec2,
    start_time_ms: f64,
}

impl WindController {
    pub fn new() -> Self {
        Self {
            strength: 0.0,
            direction: 0.0,
            swiping: false,
            start_pos: Vec2::ZERO,
            start_time_ms: 0.0,
        }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn is_swiping(&self) -> bool {
        self.swiping
    }

    /// Current strength normalized to 0..1 for the HUD
    pub fn normalized_strength(&self) -> f32 {
        (self.strength / WIND_MAX_STRENGTH).clamp(0.0, 1.0)
    }

    /// Gesture start: seed the baseline impulse, aimed at the glider
    pub fn on_pointer_down(&mut self, pointer: Vec2, t_ms: f64, glider_pos: Vec2) {
        self.swiping = true;
        self.start_pos = pointer;
        self.start_time_ms = t_ms;
        self.strength = WIND_BASELINE_STRENGTH;
        self.direction = (glider_pos.y - pointer.y).atan2(glider_pos.x - pointer.x);
    }

    /// Gesture move: retarget direction only, strength is untouched
    pub fn on_pointer_move(&mut self, pointer: Vec2, glider_pos: Vec2) {
        if !self.swiping {
            return;
        }
        self.direction = (glider_pos.y - pointer.y).atan2(glider_pos.x - pointer.x);
    }

    /// Gesture end: the full drag becomes the gust. Returns the strength
    /// normalized to 0..1, or None if no swipe was in progress.
    pub fn on_pointer_up(&mut self, pointer: Vec2, t_ms: f64) -> Option<f32> {
        if !self.swiping {
            return None;
        }
        self.swiping = false;

        let delta = pointer - self.start_pos;
        let dist = delta.length();
        if dist > 0.0 {
            let elapsed_s = ((t_ms - self.start_time_ms) / 1000.0).max(0.001) as f32;
            let speed = dist / elapsed_s;
            self.direction = delta.y.atan2(delta.x);
            self.strength =
                (speed * WIND_SPEED_GAIN + dist * WIND_DIST_GAIN).min(WIND_MAX_STRENGTH);
        }
        // Zero-length click: keep the baseline impulse from pointer-down.

        Some(self.normalized_strength())
    }

    /// Apply the decaying gust to the glider for `dt_frames` 60 fps
    /// frames. Runs regardless of gesture state; a gust released frames
    /// ago keeps pushing until it decays below the epsilon.
    pub fn apply(&mut self, glider: &mut Glider, dt_frames: f32) {
        if self.strength <= 0.0 {
            return;
        }

        let accel = WIND_ACCEL * dt_frames;
        glider.vel.x += self.direction.cos() * self.strength * accel;
        glider.vel.y += self.direction.sin() * self.strength * accel;

        // Slight torque so the nose turns into the gust, skipped for
        // faint residual wind
        if self.strength > WIND_TORQUE_FLOOR {
            let diff = shortest_angle_deg(glider.angle, self.direction.to_degrees());
            glider.angular_vel += (diff / 180.0) * (self.strength / 250.0);
        }

        self.strength *= WIND_DECAY.powf(dt_frames);
        if self.strength < WIND_EPSILON {
            self.strength = 0.0;
        }
    }
}

impl Default for WindController {
    fn default() -> Self {
        Self::new()
    }
}
