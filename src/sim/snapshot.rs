//! Renderable view of the world handed to the presentation harness
//!
//! The core never draws. After each frame the harness receives a
//! `RenderSnapshot` with world-space geometry and HUD values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSize;
use super::state::{GameEvent, GamePhase, GameState, Owner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    /// Facing in degrees
    pub angle: f32,
    /// Harness should blink the hull while true
    pub invulnerable: bool,
    /// Tail points, oldest first
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub size: AsteroidSize,
    /// Closed polygon in world coordinates
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbView {
    pub pos: Vec2,
    pub radius: f32,
    pub pulse: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaucerView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub level: u32,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub projectiles: Vec<ProjectileView>,
    pub orbs: Vec<OrbView>,
    pub saucers: Vec<SaucerView>,
    pub events: Vec<GameEvent>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let world = &state.world;
        let ship = &world.ship;
        Self {
            phase: state.phase,
            score: ship.score,
            high_score: state.high_score,
            lives: ship.lives,
            level: world.level,
            ship: ShipView {
                pos: ship.pos,
                angle: ship.angle,
                invulnerable: ship.is_invulnerable(),
                trail: ship.trail.clone(),
            },
            asteroids: world
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    size: a.size,
                    outline: a.world_outline(),
                })
                .collect(),
            projectiles: world
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    owner: p.owner,
                })
                .collect(),
            orbs: world
                .orbs
                .iter()
                .map(|o| OrbView {
                    pos: o.pos,
                    radius: o.radius,
                    pulse: o.pulse,
                })
                .collect(),
            saucers: world
                .saucers
                .iter()
                .map(|s| SaucerView {
                    pos: s.pos,
                    radius: s.radius(),
                })
                .collect(),
            events: state.events.clone(),
        }
    }
}

/// Implemented by the presentation harness
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_mirrors_world() {
        let state = GameState::new(11, Tuning::default());
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Menu);
        assert_eq!(snap.asteroids.len(), state.world.asteroids.len());
        assert_eq!(snap.orbs.len(), state.world.orbs.len());
        assert_eq!(snap.lives, state.tuning.ship.starting_lives);
        assert_eq!(snap.level, 1);
        let rock = &state.world.asteroids[0];
        assert_eq!(snap.asteroids[0].outline.len(), rock.outline.len());
        assert_eq!(snap.asteroids[0].outline[0], rock.pos + rock.outline[0]);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let state = GameState::new(12, Tuning::default());
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
        let back: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.asteroids.len(), state.world.asteroids.len());
    }
}
