//! Per-frame simulation tick
//!
//! The host calls [`tick`] once per rendered frame at a variable rate.
//! One tick runs the whole pipeline: difficulty accrual, wind force,
//! flight integration, hazard motion, the contact sweep, generation
//! ahead of the glider, cleanup behind the camera, and the terminal
//! ground check.

use crate::consts::*;

use super::state::{
    BOOST_TINTS, GameEvent, GamePhase, GameState, Glider, HazardKind,
};
use super::{collision, flight, level};

/// Advance the session by `dt_ms` milliseconds of frame time.
///
/// Non-finite or non-positive deltas are ignored; oversized deltas (tab
/// switches) are clamped so one frame can never teleport the glider.
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        return;
    }
    let dt_ms = dt_ms.min(MAX_TICK_MS);
    let dt_frames = dt_ms / FRAME_MS;
    let dt_s = dt_ms / 1000.0;

    state.time_ms += dt_ms;

    // Difficulty ramps once per second of play, uncapped; the gap
    // formula floors at MIN_VERTICAL_GAP regardless
    state.difficulty_accum_ms += dt_ms;
    while state.difficulty_accum_ms >= DIFFICULTY_STEP_MS {
        state.difficulty_accum_ms -= DIFFICULTY_STEP_MS;
        state.difficulty += 1;
    }

    // Gust force, then the flight model
    state.wind.apply(&mut state.glider, dt_frames);
    flight::integrate(&mut state.glider, dt_frames);

    // Boost pins forward speed and cycles the tint (cosmetic)
    let now = state.time_ms;
    if state.effects.boost_active(now) {
        state.glider.vel.x = BOOST_SPEED;
        state.boost_flash_ms += dt_ms;
        if state.boost_flash_ms > BOOST_FLASH_MS {
            state.boost_flash_ms = 0.0;
            let idx = BOOST_TINTS
                .iter()
                .position(|&t| t == state.boost_tint)
                .unwrap_or(0);
            state.boost_tint = BOOST_TINTS[(idx + 1) % BOOST_TINTS.len()];
        }
    }

    state.glider.pos += state.glider.vel * dt_s;

    state.distance = state.glider.pos.x * DISTANCE_SCALE;
    let distance = state.distance;
    state.push_event(GameEvent::DistanceChanged(distance));

    update_hazards(state, dt_ms, dt_frames, dt_s);

    sweep_contacts(state);
    if state.phase == GamePhase::GameOver {
        return;
    }

    // Wind zones push every tick of overlap, not one-shot
    apply_wind_zones(state, dt_frames);

    // Spawn ahead once the glider crosses the frontier threshold
    if state.glider.pos.x > state.last_spawn_x - MIN_HORIZONTAL_GAP {
        level::generate(state);
    }

    cleanup(state);

    // Grass is lava
    if state.glider.pos.y + GLIDER_HALF_H >= GROUND_Y {
        collision::handle_ground(state);
    }
}

/// Hazard motion: spikeys spin and bounce, lasers duty-cycle, birds
/// drift left with a sinusoidal bob.
fn update_hazards(state: &mut GameState, dt_ms: f32, dt_frames: f32, dt_s: f32) {
    for hazard in &mut state.hazards {
        match &mut hazard.kind {
            HazardKind::Spikey { spin, vy, angle } => {
                *angle += *spin * dt_frames;
                hazard.pos.y += *vy * dt_s;
                if hazard.pos.y < SPIKEY_TOP_BOUND {
                    *vy = vy.abs();
                }
                if hazard.pos.y > GROUND_Y - SPIKEY_RADIUS {
                    *vy = -vy.abs();
                }
            }
            HazardKind::Laser { timer_ms, active } => {
                *timer_ms += dt_ms;
                // 1.5 s on, 1 s off
                *active = *timer_ms % LASER_CYCLE_MS < LASER_ON_MS;
            }
            HazardKind::Bird { vx, flap_ms } => {
                *flap_ms += dt_ms;
                hazard.pos.x += *vx * dt_s;
                hazard.pos.y += (*flap_ms / 200.0).sin() * 0.7 * dt_frames;
            }
        }
    }
}

/// Narrow-phase sweep: collect this frame's contacts by entity ID, then
/// hand each to the collision policy. Stops early if the run ends.
fn sweep_contacts(state: &mut GameState) {
    let gp = state.glider.pos;
    let gh = Glider::half_extents();

    let hit_obstacles: Vec<u32> = state
        .obstacles
        .iter()
        .filter(|o| collision::aabb_overlap(gp, gh, o.center(), o.half_extents()))
        .map(|o| o.id)
        .collect();
    for id in hit_obstacles {
        collision::handle_obstacle_hit(state, id);
        if state.phase == GamePhase::GameOver {
            return;
        }
    }

    let hit_hazards: Vec<u32> = state
        .hazards
        .iter()
        .filter(|h| match h.kind {
            HazardKind::Spikey { .. } => {
                collision::circle_aabb_overlap(h.pos, SPIKEY_RADIUS, gp, gh)
            }
            HazardKind::Laser { active, .. } => {
                // A dark laser is harmless
                active
                    && collision::aabb_overlap(
                        gp,
                        gh,
                        h.pos,
                        glam::Vec2::new(LASER_HALF_W, LASER_HALF_H),
                    )
            }
            HazardKind::Bird { .. } => collision::aabb_overlap(
                gp,
                gh,
                h.pos,
                glam::Vec2::new(BIRD_HALF_W, BIRD_HALF_H),
            ),
        })
        .map(|h| h.id)
        .collect();
    for id in hit_hazards {
        collision::handle_hazard_hit(state, id);
        if state.phase == GamePhase::GameOver {
            return;
        }
    }

    let star_half = glam::Vec2::splat(STAR_HALF);
    let hit_collectibles: Vec<u32> = state
        .collectibles
        .iter()
        .filter(|c| collision::aabb_overlap(gp, gh, c.pos, star_half))
        .map(|c| c.id)
        .collect();
    for id in hit_collectibles {
        collision::handle_collectible(state, id);
    }

    let heart_half = glam::Vec2::splat(HEART_HALF);
    let hit_hearts: Vec<u32> = state
        .hearts
        .iter()
        .filter(|h| collision::aabb_overlap(gp, gh, h.pos, heart_half))
        .map(|h| h.id)
        .collect();
    for id in hit_hearts {
        collision::handle_heart(state, id);
    }
}

/// Continuous vertical push while overlapping a wind zone
fn apply_wind_zones(state: &mut GameState, dt_frames: f32) {
    let gp = state.glider.pos;
    let gh = Glider::half_extents();
    let zone_half = glam::Vec2::new(WIND_ZONE_HALF_W, WIND_ZONE_HALF_H);

    let mut dv = 0.0;
    for zone in &state.wind_zones {
        if collision::aabb_overlap(gp, gh, zone.pos, zone_half) {
            dv += zone.force_y * WIND_ZONE_SCALE * dt_frames;
        }
    }
    state.glider.vel.y += dv;
}

/// Destroy anything whose right edge fell behind the camera. The world
/// is infinite; without this the entity vectors grow without bound.
fn cleanup(state: &mut GameState) {
    let cutoff = state.camera_left() - CLEANUP_MARGIN;

    state.obstacles.retain(|o| o.right() >= cutoff);
    state
        .collectibles
        .retain(|c| c.pos.x + STAR_HALF >= cutoff);
    state.hazards.retain(|h| {
        let half_w = match h.kind {
            HazardKind::Spikey { .. } => SPIKEY_RADIUS,
            HazardKind::Laser { .. } => LASER_HALF_W,
            HazardKind::Bird { .. } => BIRD_HALF_W,
        };
        h.pos.x + half_w >= cutoff
    });
    state.hearts.retain(|h| h.pos.x + HEART_HALF >= cutoff);
    state
        .wind_zones
        .retain(|w| w.pos.x + WIND_ZONE_HALF_W >= cutoff);
}
