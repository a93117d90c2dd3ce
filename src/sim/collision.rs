//! Collision policy
//!
//! Overlap predicates plus the outcome state machine: given "glider
//! touched X" and the current power-up state, decide destruction, life
//! loss, score change, knockback and invulnerability. The broad sweep
//! that produces the contacts lives in the tick.

use glam::Vec2;

use crate::consts::*;

use super::state::{CollectibleKind, GameEvent, GamePhase, GameState, HazardKind};

/// Axis-aligned box overlap, centers + half extents
#[inline]
pub fn aabb_overlap(ca: Vec2, ha: Vec2, cb: Vec2, hb: Vec2) -> bool {
    (ca.x - cb.x).abs() < ha.x + hb.x && (ca.y - cb.y).abs() < ha.y + hb.y
}

/// Circle vs axis-aligned box overlap
#[inline]
pub fn circle_aabb_overlap(center: Vec2, radius: f32, cb: Vec2, hb: Vec2) -> bool {
    let closest = center.clamp(cb - hb, cb + hb);
    center.distance_squared(closest) < radius * radius
}

/// Glider ran into a pillar. Boost/strength smash it even inside the
/// post-hit grace window; otherwise the window ignores the contact.
pub(super) fn handle_obstacle_hit(state: &mut GameState, obstacle_id: u32) {
    let now = state.time_ms;
    if state.effects.boost_active(now) || state.effects.strength_active(now) {
        state.obstacles.retain(|o| o.id != obstacle_id);
        state.push_event(GameEvent::Smashed);
        return;
    }
    if state.glider.is_invulnerable(now) {
        return;
    }

    state.obstacles.retain(|o| o.id != obstacle_id);
    apply_damage(state);
}

/// Glider ran into a spikey/laser/bird. Boost smashes hazards; strength
/// only covers pillars. Lasers survive a damaging contact (the beam
/// stays, the invulnerability window covers the escape).
pub(super) fn handle_hazard_hit(state: &mut GameState, hazard_id: u32) {
    let now = state.time_ms;
    if state.effects.boost_active(now) {
        state.hazards.retain(|h| h.id != hazard_id);
        state.push_event(GameEvent::Smashed);
        return;
    }
    if state.glider.is_invulnerable(now) {
        return;
    }

    let is_laser = state
        .hazards
        .iter()
        .any(|h| h.id == hazard_id && matches!(h.kind, HazardKind::Laser { .. }));
    if !is_laser {
        state.hazards.retain(|h| h.id != hazard_id);
    }

    apply_damage(state);
}

/// Glider picked up a star or power-up
pub(super) fn handle_collectible(state: &mut GameState, collectible_id: u32) {
    let Some(idx) = state
        .collectibles
        .iter()
        .position(|c| c.id == collectible_id)
    else {
        return;
    };
    let collectible = state.collectibles.remove(idx);
    let now = state.time_ms;

    match collectible.kind {
        CollectibleKind::PowerUp(kind) => {
            state.effects.activate(kind, now);
            state.push_event(GameEvent::PowerUpActivated(kind));
        }
        CollectibleKind::Star { points } => {
            let multiplier = if state.effects.coin_active(now) { 2 } else { 1 };
            state.score += u64::from(points) * multiplier;
            let score = state.score;
            state.push_event(GameEvent::ScoreChanged(score));
        }
    }
}

/// Glider picked up a heart: +1 life
pub(super) fn handle_heart(state: &mut GameState, heart_id: u32) {
    state.hearts.retain(|h| h.id != heart_id);
    state.glider.lives += 1;
    let lives = state.glider.lives;
    state.push_event(GameEvent::LivesChanged(lives));
}

/// Ground contact ends the run unconditionally
pub(super) fn handle_ground(state: &mut GameState) {
    game_over(state);
}

/// Shared damage path: lose a life, then either end the run or bounce
/// back with a short invulnerability window.
fn apply_damage(state: &mut GameState) {
    state.glider.lives = state.glider.lives.saturating_sub(1);
    let lives = state.glider.lives;
    state.push_event(GameEvent::LivesChanged(lives));

    if state.glider.lives == 0 {
        game_over(state);
        return;
    }

    let glider = &mut state.glider;
    glider.vel.x = (glider.vel.x * KNOCKBACK_VX_FACTOR).max(KNOCKBACK_MIN_SPEED);
    glider.vel.y = -glider.vel.y.abs() * KNOCKBACK_VY_FACTOR;
    glider.pos.x -= KNOCKBACK_PUSHBACK;
    glider.invuln_until_ms = state.time_ms + INVULN_MS;
}

/// Transition to the terminal phase, emitting the final payload exactly
/// once per session.
pub(super) fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    let (score, distance) = (state.score, state.distance);
    log::info!("game over: score={} distance={:.0}", score, distance);
    state.push_event(GameEvent::GameOver { score, distance });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, Hazard, Heart, Obstacle, PowerUpKind};

    fn test_state() -> GameState {
        let mut state = GameState::new(1);
        // Clear the bootstrap slice so tests control the world
        state.obstacles.clear();
        state.collectibles.clear();
        state.hazards.clear();
        state.hearts.clear();
        state.wind_zones.clear();
        state.events.clear();
        state
    }

    fn push_obstacle(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: 500.0,
            top: 0.0,
            bottom: 200.0,
        });
        id
    }

    #[test]
    fn test_aabb_overlap() {
        let half = Vec2::new(10.0, 10.0);
        assert!(aabb_overlap(Vec2::ZERO, half, Vec2::new(15.0, 0.0), half));
        assert!(!aabb_overlap(Vec2::ZERO, half, Vec2::new(25.0, 0.0), half));
        // Touching edges do not overlap
        assert!(!aabb_overlap(Vec2::ZERO, half, Vec2::new(20.0, 0.0), half));
    }

    #[test]
    fn test_circle_aabb_overlap() {
        let hb = Vec2::new(30.0, 100.0);
        assert!(circle_aabb_overlap(Vec2::new(40.0, 0.0), 15.0, Vec2::ZERO, hb));
        assert!(!circle_aabb_overlap(Vec2::new(50.0, 0.0), 15.0, Vec2::ZERO, hb));
        // Corner case: diagonal distance matters
        assert!(!circle_aabb_overlap(
            Vec2::new(40.0, 110.0),
            10.0,
            Vec2::ZERO,
            hb
        ));
    }

    #[test]
    fn test_obstacle_hit_costs_a_life_and_knocks_back() {
        let mut state = test_state();
        let id = push_obstacle(&mut state);
        state.glider.vel = Vec2::new(300.0, 120.0);
        let x_before = state.glider.pos.x;

        handle_obstacle_hit(&mut state, id);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.glider.lives, START_LIVES - 1);
        assert_eq!(state.glider.vel.x, 300.0 * KNOCKBACK_VX_FACTOR);
        assert_eq!(state.glider.vel.y, -120.0 * KNOCKBACK_VY_FACTOR);
        assert_eq!(state.glider.pos.x, x_before - KNOCKBACK_PUSHBACK);
        assert!(state.glider.is_invulnerable(state.time_ms + 1.0));
        assert!(!state.glider.is_invulnerable(state.time_ms + INVULN_MS));
        assert!(state.events.contains(&GameEvent::LivesChanged(START_LIVES - 1)));
    }

    #[test]
    fn test_knockback_floors_forward_speed() {
        let mut state = test_state();
        let id = push_obstacle(&mut state);
        state.glider.vel = Vec2::new(100.0, 0.0);
        handle_obstacle_hit(&mut state, id);
        // 100 * 0.3 = 30 would stall; floored at the knockback minimum
        assert_eq!(state.glider.vel.x, KNOCKBACK_MIN_SPEED);
    }

    #[test]
    fn test_last_life_emits_game_over_once() {
        // Scenario: lives=1, no power-up, obstacle hit
        let mut state = test_state();
        state.glider.lives = 1;
        state.score = 7;
        let id = push_obstacle(&mut state);

        handle_obstacle_hit(&mut state, id);
        assert_eq!(state.glider.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
        assert!(state.events.contains(&GameEvent::GameOver {
            score: 7,
            distance: state.distance
        }));

        // A second terminal contact must not fire again
        handle_ground(&mut state);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
        assert_eq!(state.glider.lives, 0);
    }

    #[test]
    fn test_strength_smashes_obstacle_without_life_loss() {
        // Scenario: obstacle collision while strength is active
        let mut state = test_state();
        state.effects.activate(PowerUpKind::Strength, state.time_ms);
        let id = push_obstacle(&mut state);

        handle_obstacle_hit(&mut state, id);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.glider.lives, START_LIVES);
        assert!(state.events.contains(&GameEvent::Smashed));
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::LivesChanged(_)))
        );
    }

    #[test]
    fn test_strength_does_not_cover_hazards() {
        let mut state = test_state();
        state.effects.activate(PowerUpKind::Strength, state.time_ms);
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: Vec2::new(400.0, 300.0),
            kind: HazardKind::Spikey {
                spin: 2.0,
                vy: 40.0,
                angle: 0.0,
            },
        });

        handle_hazard_hit(&mut state, id);
        assert_eq!(state.glider.lives, START_LIVES - 1);
    }

    #[test]
    fn test_boost_smashes_hazards() {
        let mut state = test_state();
        state.effects.activate(PowerUpKind::Boost, state.time_ms);
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: Vec2::new(400.0, 300.0),
            kind: HazardKind::Bird {
                vx: -150.0,
                flap_ms: 0.0,
            },
        });

        handle_hazard_hit(&mut state, id);
        assert!(state.hazards.is_empty());
        assert_eq!(state.glider.lives, START_LIVES);
        assert!(state.events.contains(&GameEvent::Smashed));
    }

    #[test]
    fn test_laser_survives_damaging_contact() {
        let mut state = test_state();
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            pos: Vec2::new(400.0, 300.0),
            kind: HazardKind::Laser {
                timer_ms: 0.0,
                active: true,
            },
        });

        handle_hazard_hit(&mut state, id);
        assert_eq!(state.glider.lives, START_LIVES - 1);
        assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn test_boost_smashes_during_grace_window() {
        // Boost picked up right after a hit: the grace window must not
        // make the glider phase through things it would smash
        let mut state = test_state();
        state.glider.invuln_until_ms = state.time_ms + INVULN_MS;
        state.effects.activate(PowerUpKind::Boost, state.time_ms);
        let obstacle_id = push_obstacle(&mut state);
        let hazard_id = state.next_entity_id();
        state.hazards.push(Hazard {
            id: hazard_id,
            pos: Vec2::new(400.0, 300.0),
            kind: HazardKind::Bird {
                vx: -150.0,
                flap_ms: 0.0,
            },
        });

        handle_obstacle_hit(&mut state, obstacle_id);
        handle_hazard_hit(&mut state, hazard_id);

        assert!(state.obstacles.is_empty());
        assert!(state.hazards.is_empty());
        assert_eq!(state.glider.lives, START_LIVES);
        let smashes = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Smashed))
            .count();
        assert_eq!(smashes, 2);
    }

    #[test]
    fn test_strength_smashes_obstacle_during_grace_window() {
        let mut state = test_state();
        state.glider.invuln_until_ms = state.time_ms + INVULN_MS;
        state.effects.activate(PowerUpKind::Strength, state.time_ms);
        let id = push_obstacle(&mut state);

        handle_obstacle_hit(&mut state, id);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.glider.lives, START_LIVES);
        assert!(state.events.contains(&GameEvent::Smashed));
    }

    #[test]
    fn test_invulnerability_ignores_contacts() {
        let mut state = test_state();
        state.glider.invuln_until_ms = state.time_ms + INVULN_MS;
        let id = push_obstacle(&mut state);

        handle_obstacle_hit(&mut state, id);
        assert_eq!(state.glider.lives, START_LIVES);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_star_scores_double_with_coin() {
        // Scenario: 10-point star collected while coin is active
        let mut state = test_state();
        state.effects.activate(PowerUpKind::Coin, state.time_ms);
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            pos: Vec2::new(300.0, 300.0),
            kind: CollectibleKind::Star { points: 10 },
        });

        handle_collectible(&mut state, id);
        assert_eq!(state.score, 20);
        assert!(state.events.contains(&GameEvent::ScoreChanged(20)));
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_powerup_pickup_activates_without_score() {
        let mut state = test_state();
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            pos: Vec2::new(300.0, 300.0),
            kind: CollectibleKind::PowerUp(PowerUpKind::Boost),
        });

        handle_collectible(&mut state, id);
        assert_eq!(state.score, 0);
        assert!(state.effects.boost_active(state.time_ms));
        assert!(
            state
                .events
                .contains(&GameEvent::PowerUpActivated(PowerUpKind::Boost))
        );
    }

    #[test]
    fn test_heart_grants_life() {
        let mut state = test_state();
        let id = state.next_entity_id();
        state.hearts.push(Heart {
            id,
            pos: Vec2::new(300.0, 300.0),
        });

        handle_heart(&mut state, id);
        assert_eq!(state.glider.lives, START_LIVES + 1);
        assert!(state.events.contains(&GameEvent::LivesChanged(START_LIVES + 1)));
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_ground_is_unconditional() {
        let mut state = test_state();
        state.effects.activate(PowerUpKind::Boost, state.time_ms);
        state.glider.invuln_until_ms = state.time_ms + INVULN_MS;

        handle_ground(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
