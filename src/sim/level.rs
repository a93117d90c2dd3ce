//! Procedural endless-level generation
//!
//! Emits one content slice at the spawn frontier: a pillar pair bounding
//! a difficulty-sized gap, a guaranteed star in the gap, and a grab bag
//! of optional extras (wind zone, bonus star, hazards, heart, power-up).
//! Every choice draws from the session RNG, so a seed reproduces the
//! whole level layout exactly.

use rand::Rng;

use glam::Vec2;

use crate::consts::*;

use super::state::{
    Collectible, CollectibleKind, GameState, Hazard, HazardKind, Heart, Obstacle, PowerUpKind,
    WindZone,
};

/// Gap between the pillar pair for a given difficulty level, floored at
/// the minimum traversable size.
pub fn gap_for_difficulty(difficulty: u32) -> f32 {
    (BASE_GAP - difficulty as f32 * GAP_PER_LEVEL).max(MIN_VERTICAL_GAP)
}

/// Generate one content slice ahead of the glider and advance the spawn
/// frontier. Called whenever the glider crosses the frontier threshold.
pub fn generate(state: &mut GameState) {
    let spawn_x = (state.camera_right() + SPAWN_LOOKAHEAD)
        .max(state.last_spawn_x + MIN_HORIZONTAL_GAP);
    let ground_top = GROUND_Y;

    // Pillar pair bounding the gap
    let gap = gap_for_difficulty(state.difficulty);
    let center_y = state
        .rng
        .random_range(100.0..=(ground_top - GROUND_SAFETY - gap / 2.0));

    let top_id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id: top_id,
        x: spawn_x,
        top: 0.0,
        bottom: center_y - gap / 2.0,
    });
    let bottom_id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id: bottom_id,
        x: spawn_x,
        top: center_y + gap / 2.0,
        bottom: ground_top,
    });

    // Guaranteed star centered in the gap
    let star_id = state.next_entity_id();
    state.collectibles.push(Collectible {
        id: star_id,
        pos: Vec2::new(spawn_x + PILLAR_WIDTH / 2.0, center_y),
        kind: CollectibleKind::Star { points: 1 },
    });

    // Wind zone (optional)
    if state.rng.random_range(0..2) == 1 {
        let wz_y = state
            .rng
            .random_range(50.0..=(ground_top - GROUND_SAFETY - 100.0));
        let force_y = if state.rng.random_range(0..2) == 1 {
            -2.0
        } else {
            2.0
        };
        let id = state.next_entity_id();
        state.wind_zones.push(WindZone {
            id,
            pos: Vec2::new(spawn_x + 100.0, wz_y),
            force_y,
        });
    }

    // Bonus star, avoiding pillars: reject-and-resample up to 5 times,
    // give up silently after that
    if state.rng.random_range(0..2) == 1 {
        for _ in 0..5 {
            let sx = spawn_x + state.rng.random_range(0.0..=200.0);
            let sy = state
                .rng
                .random_range(50.0..=(ground_top - GROUND_SAFETY - 25.0));
            let overlaps = state.obstacles.iter().any(|ob| {
                sx > ob.x - 30.0 && sx < ob.right() + 30.0 && sy > ob.top && sy < ob.bottom
            });
            if !overlaps {
                // Weighted tier: 10% rare (50), 20% uncommon (10), 70% common (1)
                let points = match state.rng.random_range(0..10) {
                    0 => 50,
                    1..=2 => 10,
                    _ => 1,
                };
                let id = state.next_entity_id();
                state.collectibles.push(Collectible {
                    id,
                    pos: Vec2::new(sx, sy),
                    kind: CollectibleKind::Star { points },
                });
                break;
            }
        }
    }

    // Spikey ball: spins and bounces up/down
    if state.rng.random_range(0..3) == 0 {
        let y = state.rng.random_range(100.0..=(ground_top - 60.0));
        let x = spawn_x + state.rng.random_range(100.0..=250.0);
        let spin = match state.rng.random_range(-4i32..=4) {
            0 => 2.0,
            s => s as f32,
        };
        let vy = match state.rng.random_range(-60i32..=60) {
            0 => 40.0,
            v => v as f32,
        };
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: Vec2::new(x, y),
            kind: HazardKind::Spikey {
                spin,
                vy,
                angle: 0.0,
            },
        });
    }

    // Laser: duty-cycled beam, starts on
    if state.rng.random_range(0..3) == 0 {
        let y = state.rng.random_range(120.0..=(ground_top - 40.0));
        let x = spawn_x + state.rng.random_range(150.0..=300.0);
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: Vec2::new(x, y),
            kind: HazardKind::Laser {
                timer_ms: 0.0,
                active: true,
            },
        });
    }

    // Bird: flies left at any height
    if state.rng.random_range(0..3) == 0 {
        let y = state.rng.random_range(80.0..=(ground_top - 40.0));
        let x = spawn_x + state.rng.random_range(200.0..=400.0);
        let vx = -state.rng.random_range(120.0..=200.0);
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: Vec2::new(x, y),
            kind: HazardKind::Bird { vx, flap_ms: 0.0 },
        });
    }

    // Heart (extra life), rare
    if state.rng.random_range(0..15) == 0 {
        let y = state.rng.random_range(80.0..=(ground_top - 40.0));
        let x = spawn_x + state.rng.random_range(100.0..=300.0);
        let id = state.next_entity_id();
        state.hearts.push(Heart {
            id,
            pos: Vec2::new(x, y),
        });
    }

    // Power-up collectible
    if state.rng.random_range(0..5) == 0 {
        let y = state.rng.random_range(80.0..=(ground_top - 40.0));
        let x = spawn_x + state.rng.random_range(120.0..=320.0);
        let kind = match state.rng.random_range(0..3) {
            0 => PowerUpKind::Boost,
            1 => PowerUpKind::Strength,
            _ => PowerUpKind::Coin,
        };
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            pos: Vec2::new(x, y),
            kind: CollectibleKind::PowerUp(kind),
        });
    }

    state.last_spawn_x = spawn_x;
}
