//! Asteroids: drifting rocks that split when shot
//!
//! The jagged outline is cosmetic. Collisions use the nominal radius of the
//! size class.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::AsteroidTuning;
use crate::wrap_with_margin;

/// Size class; each step down halves the radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 20.0,
            AsteroidSize::Small => 10.0,
        }
    }

    /// Drift speed of a freshly spawned rock of this size
    pub fn speed(self) -> f32 {
        match self {
            AsteroidSize::Large => 2.0,
            AsteroidSize::Medium => 3.0,
            AsteroidSize::Small => 4.0,
        }
    }

    /// Size of the fragments, `None` for rocks that shatter completely
    pub fn child(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    /// Outline vertices relative to `pos`
    pub outline: Vec<Vec2>,
}

/// Random closed polygon with radii jittered around `radius`
fn jagged_outline<R: Rng>(radius: f32, rng: &mut R) -> Vec<Vec2> {
    let count = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            let r = radius * rng.random_range(ASTEROID_JITTER_MIN..=ASTEROID_JITTER_MAX);
            Vec2::from_angle(angle) * r
        })
        .collect()
}

/// Random point on one of the four screen edges
pub fn random_edge_position<R: Rng>(rng: &mut R) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(0.0..WORLD_WIDTH), 0.0),
        1 => Vec2::new(WORLD_WIDTH, rng.random_range(0.0..WORLD_HEIGHT)),
        2 => Vec2::new(rng.random_range(0.0..WORLD_WIDTH), WORLD_HEIGHT),
        _ => Vec2::new(0.0, rng.random_range(0.0..WORLD_HEIGHT)),
    }
}

impl Asteroid {
    /// Build an asteroid with the given motion and a fresh random outline
    pub fn new<R: Rng>(id: u32, pos: Vec2, vel: Vec2, size: AsteroidSize, rng: &mut R) -> Self {
        Self {
            id,
            pos,
            vel,
            size,
            outline: jagged_outline(size.radius(), rng),
        }
    }

    /// New rock drifting in from a screen edge
    pub fn spawn_at_edge<R: Rng>(id: u32, size: AsteroidSize, rng: &mut R) -> Self {
        let pos = random_edge_position(rng);
        Self::with_random_heading(id, pos, size, rng)
    }

    /// New rock anywhere on the field
    pub fn spawn_anywhere<R: Rng>(id: u32, size: AsteroidSize, rng: &mut R) -> Self {
        let pos = Vec2::new(
            rng.random_range(0.0..WORLD_WIDTH),
            rng.random_range(0.0..WORLD_HEIGHT),
        );
        Self::with_random_heading(id, pos, size, rng)
    }

    fn with_random_heading<R: Rng>(id: u32, pos: Vec2, size: AsteroidSize, rng: &mut R) -> Self {
        let heading = rng.random_range(0.0..TAU);
        let vel = Vec2::from_angle(heading) * size.speed();
        Self::new(id, pos, vel, size, rng)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    /// Drift; the rock fully leaves one side before appearing on the other
    pub fn update(&mut self) {
        self.pos = wrap_with_margin(self.pos + self.vel, self.radius());
    }

    /// Break into two slower fragments that fan out around the parent heading.
    ///
    /// `next_id` hands out ids for the children. Small rocks leave nothing.
    pub fn split<R: Rng>(
        &self,
        tuning: &AsteroidTuning,
        rng: &mut R,
        mut next_id: impl FnMut() -> u32,
    ) -> Vec<Asteroid> {
        let Some(child_size) = self.size.child() else {
            return Vec::new();
        };

        let speed = self.vel.length();
        let heading = self.vel.y.atan2(self.vel.x);
        (0..2)
            .map(|_| {
                let offset = rng.random_range(-tuning.split_spread..=tuning.split_spread);
                let multiplier =
                    rng.random_range(tuning.split_speed_min..=tuning.split_speed_max);
                let vel = Vec2::from_angle(heading + offset) * speed * multiplier;
                Asteroid::new(next_id(), self.pos, vel, child_size, rng)
            })
            .collect()
    }

    /// Outline in world coordinates, for drawing
    pub fn world_outline(&self) -> Vec<Vec2> {
        self.outline.iter().map(|&v| self.pos + v).collect()
    }
}
