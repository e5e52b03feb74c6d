//! The player's ship and its growing tail
//!
//! The tail is a sparse history of past positions: one sample every
//! `trail_spacing` ticks, oldest first. Orbs raise its capacity; flying into
//! it costs a life.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Owner, Projectile};
use crate::consts::{PLAYER_PROJECTILE_RADIUS, SHIP_RADIUS, SHIP_SIZE};
use crate::tuning::ShipTuning;
use crate::{direction_vector, distance, world_center, wrap_degrees, wrap_position};

/// Held controls relevant to flying the ship
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipControls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
}

/// What a hit did to the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Hit ignored (invulnerable)
    Ignored,
    /// Lost a life and respawned at the center
    Respawned { lives_left: u32 },
    /// Out of lives - the run is over
    Destroyed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing in degrees, [0, 360)
    pub angle: f32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    /// Ticks of remaining invulnerability
    pub invulnerable: u32,
    pub lives: u32,
    pub score: u64,
    /// Past positions, oldest first
    pub trail: Vec<Vec2>,
    pub trail_capacity: usize,
    /// Ticks since spawn, drives trail sampling
    frame_counter: u32,
}

impl Ship {
    pub fn new(tuning: &ShipTuning) -> Self {
        Self {
            pos: world_center(),
            vel: Vec2::ZERO,
            angle: 0.0,
            fire_cooldown: 0,
            invulnerable: tuning.invulnerable_ticks,
            lives: tuning.starting_lives,
            score: 0,
            trail: Vec::new(),
            trail_capacity: 0,
            frame_counter: 0,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        SHIP_RADIUS
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    /// Trail length the ship may currently hold
    #[inline]
    pub fn trail_limit(&self, tuning: &ShipTuning) -> usize {
        self.trail_capacity.min(tuning.trail_hard_cap)
    }

    /// Advance one tick: steer, thrust, damp, move, sample the tail, run timers
    pub fn update(&mut self, controls: ShipControls, tuning: &ShipTuning) {
        if controls.rotate_left {
            self.angle = wrap_degrees(self.angle + tuning.rotation_speed);
        }
        if controls.rotate_right {
            self.angle = wrap_degrees(self.angle - tuning.rotation_speed);
        }

        if controls.thrust {
            self.vel += direction_vector(self.angle) * tuning.thrust;
            self.vel = self.vel.clamp_length_max(tuning.max_speed);
        }

        self.vel *= tuning.damping;
        self.pos = wrap_position(self.pos + self.vel);

        self.frame_counter = self.frame_counter.wrapping_add(1);
        if self.frame_counter % tuning.trail_spacing == 0 {
            self.record_trail(tuning);
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.invulnerable = self.invulnerable.saturating_sub(1);
    }

    fn record_trail(&mut self, tuning: &ShipTuning) {
        self.trail.push(self.pos);
        let limit = self.trail_limit(tuning);
        if self.trail.len() > limit {
            let excess = self.trail.len() - limit;
            self.trail.drain(..excess);
        }
    }

    /// Fire from the nose if the gun is ready; a no-op while cooling down
    pub fn shoot(&mut self, id: u32, tuning: &ShipTuning) -> Option<Projectile> {
        if self.fire_cooldown != 0 {
            return None;
        }
        let dir = direction_vector(self.angle);
        self.fire_cooldown = tuning.fire_cooldown_ticks;
        Some(Projectile {
            id,
            pos: wrap_position(self.pos + dir * SHIP_SIZE),
            vel: self.vel + dir * tuning.muzzle_speed,
            lifetime: tuning.projectile_lifetime,
            owner: Owner::Player,
            radius: PLAYER_PROJECTILE_RADIUS,
        })
    }

    /// Raise tail capacity; existing points are kept
    pub fn grow_trail(&mut self, tuning: &ShipTuning) {
        self.trail_capacity += tuning.trail_growth;
    }

    /// Orb pickup: longer tail and points
    pub fn collect_orb(&mut self, ship_tuning: &ShipTuning, points: u64) {
        self.grow_trail(ship_tuning);
        self.score += points;
    }

    /// Has the ship flown into its own tail?
    ///
    /// The newest points sit under the hull and are skipped.
    pub fn check_self_collision(&self, tuning: &ShipTuning) -> bool {
        if self.is_invulnerable() || self.trail.len() < tuning.trail_min_len {
            return false;
        }
        let checked = self.trail.len().saturating_sub(tuning.trail_skip_recent);
        self.trail[..checked]
            .iter()
            .any(|&pt| distance(self.pos, pt) < tuning.trail_hit_radius)
    }

    /// Take a hit. Ignored while invulnerable.
    pub fn on_hit(&mut self, tuning: &ShipTuning) -> HitOutcome {
        if self.is_invulnerable() {
            return HitOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return HitOutcome::Destroyed;
        }
        self.pos = world_center();
        self.vel = Vec2::ZERO;
        self.trail.clear();
        self.invulnerable = tuning.invulnerable_ticks;
        HitOutcome::Respawned {
            lives_left: self.lives,
        }
    }
}
