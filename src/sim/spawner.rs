//! Spawn policy: countdown timers, population caps and floors
//!
//! Timers only fire while the population is under its cap; an expired timer
//! waits at zero until there is room. Floors top the field up regardless of
//! timers so it never runs dry.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::saucer::Saucer;
use super::state::{Orb, World};
use crate::tuning::{HostileTuning, SpawnTuning, Tuning};

/// Ticks remaining until each kind may spawn again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    pub asteroid_timer: u32,
    pub orb_timer: u32,
    pub saucer_timer: u32,
}

impl Spawner {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            asteroid_timer: tuning.asteroid_timer_start,
            orb_timer: tuning.orb_timer_start,
            saucer_timer: tuning.saucer_timer_start,
        }
    }
}

/// Asteroid respawn interval, shorter at higher levels
pub fn asteroid_interval(tuning: &SpawnTuning, level: u32) -> u32 {
    tuning
        .asteroid_interval
        .saturating_sub(tuning.asteroid_interval_per_level.saturating_mul(level))
        .max(tuning.asteroid_interval_floor)
}

pub fn asteroid_cap(tuning: &SpawnTuning, level: u32) -> usize {
    tuning.asteroid_cap_base + level as usize
}

/// Saucer respawn interval, shorter at higher levels
pub fn saucer_interval(tuning: &SpawnTuning, level: u32) -> u32 {
    tuning
        .saucer_interval
        .saturating_sub(tuning.saucer_interval_per_level.saturating_mul(level))
        .max(tuning.saucer_interval_floor)
}

pub fn saucer_cap(tuning: &SpawnTuning, level: u32) -> usize {
    tuning.saucer_cap_base + (level / tuning.saucer_cap_level_divisor) as usize
}

/// Saucers aim better as levels go up
pub fn saucer_difficulty(tuning: &HostileTuning, level: u32) -> u32 {
    (1 + level / 2).min(tuning.max_difficulty)
}

/// Count a timer down; true when it has expired and the population has room
fn ready(timer: &mut u32, population: usize, cap: usize) -> bool {
    *timer = timer.saturating_sub(1);
    *timer == 0 && population < cap
}

/// Run one tick of spawn policy against the world
pub fn update_spawns<R: Rng>(world: &mut World, tuning: &Tuning, rng: &mut R) {
    let spawn = &tuning.spawn;
    let level = world.level;

    if ready(
        &mut world.spawner.asteroid_timer,
        world.asteroids.len(),
        asteroid_cap(spawn, level),
    ) {
        let id = world.next_entity_id();
        world
            .asteroids
            .push(Asteroid::spawn_at_edge(id, AsteroidSize::Large, rng));
        world.spawner.asteroid_timer = asteroid_interval(spawn, level);
        log::debug!("Spawned asteroid {id} ({} on field)", world.asteroids.len());
    }

    if ready(&mut world.spawner.orb_timer, world.orbs.len(), spawn.orb_cap) {
        let id = world.next_entity_id();
        world.orbs.push(Orb::spawn(id, rng));
        world.spawner.orb_timer = spawn.orb_interval;
    }

    if ready(
        &mut world.spawner.saucer_timer,
        world.saucers.len(),
        saucer_cap(spawn, level),
    ) {
        let id = world.next_entity_id();
        let difficulty = saucer_difficulty(&tuning.hostile, level);
        world
            .saucers
            .push(Saucer::spawn(id, difficulty, &tuning.hostile, rng));
        world.spawner.saucer_timer = saucer_interval(spawn, level);
        log::debug!("Spawned saucer {id} at difficulty {difficulty}");
    }

    // Floors
    while world.orbs.len() < spawn.min_orbs {
        let id = world.next_entity_id();
        world.orbs.push(Orb::spawn(id, rng));
    }
    while world.asteroids.len() < spawn.min_asteroids {
        let id = world.next_entity_id();
        let size = if rng.random_bool(0.5) {
            AsteroidSize::Large
        } else {
            AsteroidSize::Medium
        };
        world.asteroids.push(Asteroid::spawn_anywhere(id, size, rng));
    }
}
