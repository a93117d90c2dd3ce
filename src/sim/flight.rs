//! Glider flight model
//!
//! Pure numeric transform: given the current velocity and elapsed frame
//! time, produce the updated velocity and visual tilt. Forward speed is
//! coupled to lift, so the glider flies roughly level at ~200 px/s,
//! sinks when slower and climbs a bit when faster. Deterministic; no RNG.

use crate::consts::*;
use crate::shortest_angle_deg;

use super::state::Glider;

/// Angular damping applied to the wind-induced tilt nudge
const ANGULAR_DRAG: f32 = 0.8;

/// Advance the glider's velocity and tilt by `dt_frames` 60 fps frames.
///
/// Does not move the glider; position integration happens in the tick
/// once all forces (wind, zones) have been applied.
pub fn integrate(glider: &mut Glider, dt_frames: f32) {
    let v = &mut glider.vel;

    // 1. Never let airflow stall completely
    v.x = v.x.clamp(MIN_FORWARD_SPEED, MAX_FORWARD_SPEED);

    // 2. Gravity vs. a touch of lift. Lift engages above the threshold
    //    forward speed and saturates, and the sink bias keeps the net
    //    force always slightly downward.
    let lift = ((v.x - LIFT_THRESHOLD) * LIFT_GAIN).clamp(0.0, LIFT_CAP);
    v.y += (GRAVITY_PER_FRAME - lift + SINK_BIAS) * dt_frames;

    // 3. Quadratic drag, floored so the glider keeps coasting
    let drag_factor = (1.0 - (v.length() / DRAG_NORM).powi(2) * DRAG_SCALE).max(MIN_DRAG);
    *v *= drag_factor.powf(dt_frames);

    // 4. Re-assert the stall floor (drag can nibble below it) and keep
    //    vertical speed reasonable so it never becomes a rocket
    v.x = v.x.clamp(MIN_FORWARD_SPEED, MAX_FORWARD_SPEED);
    v.y = v.y.clamp(MIN_VERTICAL_SPEED, MAX_VERTICAL_SPEED);

    // 5. Tilt the glider toward its real flight path (purely visual).
    //    The lerp factor is per-frame, so convert it for variable dt.
    let target = v.y.atan2(v.x).to_degrees();
    let t = 1.0 - (1.0 - TILT_LERP).powf(dt_frames);
    glider.angle += shortest_angle_deg(glider.angle, target) * t;

    // Wind torque from gusts, damped each frame
    glider.angle += glider.angular_vel * dt_frames;
    glider.angular_vel *= ANGULAR_DRAG.powf(dt_frames);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn glider_with_vel(vx: f32, vy: f32) -> Glider {
        let mut g = Glider::new();
        g.vel = Vec2::new(vx, vy);
        g
    }

    #[test]
    fn test_floor_speed_enforced() {
        let mut g = glider_with_vel(10.0, 0.0);
        integrate(&mut g, 1.0);
        assert!(g.vel.x >= MIN_FORWARD_SPEED);

        // Even a hard knockback can't stall the glider next frame
        let mut g = glider_with_vel(-300.0, 0.0);
        integrate(&mut g, 1.0);
        assert!(g.vel.x >= MIN_FORWARD_SPEED);
    }

    #[test]
    fn test_slow_glider_sinks() {
        // Below the lift threshold there is no lift at all: pure sink
        let mut g = glider_with_vel(100.0, 0.0);
        integrate(&mut g, 1.0);
        assert!(g.vel.y > 0.0);
    }

    #[test]
    fn test_lift_saturates() {
        // At the cap, net per-frame dv is gravity - LIFT_CAP + bias
        let mut fast = glider_with_vel(MAX_FORWARD_SPEED, 0.0);
        let mut faster = glider_with_vel(MAX_FORWARD_SPEED + 500.0, 0.0);
        integrate(&mut fast, 1.0);
        integrate(&mut faster, 1.0);
        // Forward speed is clamped, so both see identical lift
        assert!((fast.vel.y - faster.vel.y).abs() < 1e-4);
        // Net force stays downward even at full lift
        assert!(fast.vel.y > 0.0);
    }

    #[test]
    fn test_vertical_speed_clamped() {
        let mut g = glider_with_vel(200.0, 1000.0);
        integrate(&mut g, 1.0);
        assert!(g.vel.y <= MAX_VERTICAL_SPEED);

        let mut g = glider_with_vel(200.0, -1000.0);
        integrate(&mut g, 1.0);
        assert!(g.vel.y >= MIN_VERTICAL_SPEED);
    }

    #[test]
    fn test_tilt_tracks_flight_path() {
        let mut g = glider_with_vel(200.0, 200.0);
        let before = g.angle;
        integrate(&mut g, 1.0);
        // Diving right-and-down, so the tilt moves toward +45 degrees
        assert!(g.angle > before);
        assert!(g.angle < 45.0);
    }

    #[test]
    fn test_deterministic() {
        let mut a = glider_with_vel(180.0, -30.0);
        let mut b = glider_with_vel(180.0, -30.0);
        for _ in 0..100 {
            integrate(&mut a, 1.0);
            integrate(&mut b, 1.0);
        }
        assert_eq!(a.vel, b.vel);
        assert_eq!(a.angle, b.angle);
    }

    proptest! {
        #[test]
        fn prop_forward_speed_never_below_floor(
            vx in -500.0f32..500.0,
            vy in -400.0f32..400.0,
            dt in 0.1f32..6.0,
        ) {
            let mut g = glider_with_vel(vx, vy);
            integrate(&mut g, dt);
            prop_assert!(g.vel.x >= MIN_FORWARD_SPEED);
            prop_assert!(g.vel.x <= MAX_FORWARD_SPEED);
            prop_assert!(g.vel.y >= MIN_VERTICAL_SPEED && g.vel.y <= MAX_VERTICAL_SPEED);
        }
    }
}
