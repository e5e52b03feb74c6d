//! Collision detection and response
//!
//! Everything collides as circles. Resolution is two-phase: the scan only
//! records what died and what should be created, then the changes are
//! applied in one go. An entity takes part in at most one destructive
//! collision per tick and the first match in collection order wins; there
//! is no nearest-hit tie-break.

use glam::Vec2;
use rand::Rng;

use super::asteroid::Asteroid;
use super::ship::HitOutcome;
use super::state::{GameEvent, Orb, Owner, World};
use crate::distance;
use crate::tuning::Tuning;

/// Do two circles overlap?
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Per-collection kill flags gathered during the scan
struct Removals {
    projectiles: Vec<bool>,
    asteroids: Vec<bool>,
    saucers: Vec<bool>,
    orbs: Vec<bool>,
}

impl Removals {
    fn for_world(world: &World) -> Self {
        Self {
            projectiles: vec![false; world.projectiles.len()],
            asteroids: vec![false; world.asteroids.len()],
            saucers: vec![false; world.saucers.len()],
            orbs: vec![false; world.orbs.len()],
        }
    }
}

/// Drop every element whose flag is set, keeping order
fn retain_unflagged<T>(items: &mut Vec<T>, flags: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !flags[index];
        index += 1;
        keep
    });
}

/// Check the ship against everything that can kill it.
///
/// Only the first hazard found counts; a hit makes the ship invulnerable
/// (or ends the run) so the rest would be ignored anyway.
fn ship_hazards(world: &mut World, tuning: &Tuning, removals: &mut Removals) -> Option<HitOutcome> {
    let ship = &world.ship;
    if ship.is_invulnerable() {
        return None;
    }
    let (pos, radius) = (ship.pos, ship.radius());

    let rammed_asteroid = world
        .asteroids
        .iter()
        .any(|a| circles_overlap(pos, radius, a.pos, a.radius()));

    let hit = if rammed_asteroid {
        true
    } else if let Some(i) = world
        .saucers
        .iter()
        .position(|s| circles_overlap(pos, radius, s.pos, s.radius()))
    {
        removals.saucers[i] = true;
        true
    } else if let Some(i) = world
        .projectiles
        .iter()
        .position(|p| p.owner == Owner::Hostile && circles_overlap(pos, radius, p.pos, p.radius))
    {
        removals.projectiles[i] = true;
        true
    } else {
        ship.check_self_collision(&tuning.ship)
    };

    hit.then(|| world.ship.on_hit(&tuning.ship))
}

/// Resolve all collisions for this tick.
///
/// Returns the outcome of the ship being hit, if it was.
pub fn resolve_collisions<R: Rng>(
    world: &mut World,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<HitOutcome> {
    let mut removals = Removals::for_world(world);

    // --- Ship vs hazards ---
    let ship_hit = ship_hazards(world, tuning, &mut removals);
    match ship_hit {
        Some(HitOutcome::Respawned { lives_left }) => {
            log::debug!("Ship hit, {lives_left} lives left");
            events.push(GameEvent::ShipHit { lives_left });
        }
        Some(HitOutcome::Destroyed) => {
            events.push(GameEvent::ShipHit { lives_left: 0 });
        }
        Some(HitOutcome::Ignored) | None => {}
    }
    let ship_alive = ship_hit != Some(HitOutcome::Destroyed);

    // --- Ship vs orbs ---
    let mut orbs_collected = 0;
    if ship_alive {
        let (pos, radius) = (world.ship.pos, world.ship.radius());
        for (i, orb) in world.orbs.iter().enumerate() {
            if circles_overlap(pos, radius, orb.pos, orb.radius) {
                removals.orbs[i] = true;
                orbs_collected += 1;
            }
        }
        for _ in 0..orbs_collected {
            world.ship.collect_orb(&tuning.ship, tuning.score.orb);
            events.push(GameEvent::OrbCollected);
        }
    }

    // --- Player projectiles vs asteroids, saucers, saucer bullets ---
    let mut shattered = Vec::new();
    let mut saucers_downed = 0;
    for (pi, shot) in world.projectiles.iter().enumerate() {
        if shot.owner != Owner::Player || removals.projectiles[pi] {
            continue;
        }

        let rock = world.asteroids.iter().enumerate().position(|(ai, a)| {
            !removals.asteroids[ai] && circles_overlap(shot.pos, shot.radius, a.pos, a.radius())
        });
        if let Some(ai) = rock {
            removals.projectiles[pi] = true;
            removals.asteroids[ai] = true;
            shattered.push(ai);
            continue;
        }

        let saucer = world.saucers.iter().enumerate().position(|(si, s)| {
            !removals.saucers[si] && circles_overlap(shot.pos, shot.radius, s.pos, s.radius())
        });
        if let Some(si) = saucer {
            removals.projectiles[pi] = true;
            removals.saucers[si] = true;
            saucers_downed += 1;
            continue;
        }

        let bullet = world.projectiles.iter().enumerate().position(|(hi, h)| {
            h.owner == Owner::Hostile
                && !removals.projectiles[hi]
                && circles_overlap(shot.pos, shot.radius, h.pos, h.radius)
        });
        if let Some(hi) = bullet {
            removals.projectiles[pi] = true;
            removals.projectiles[hi] = true;
            events.push(GameEvent::ProjectilesCancelled);
        }
    }

    // --- Apply ---
    let mut fragments: Vec<Asteroid> = Vec::new();
    for ai in shattered {
        let rock = &world.asteroids[ai];
        world.ship.score += tuning.score.asteroid_points(rock.size);
        events.push(GameEvent::AsteroidDestroyed { size: rock.size });
        let next_id = &mut world.next_id;
        fragments.extend(rock.split(&tuning.asteroid, rng, || {
            let id = *next_id;
            *next_id += 1;
            id
        }));
    }
    for _ in 0..saucers_downed {
        world.ship.score += tuning.score.saucer;
        events.push(GameEvent::SaucerDestroyed);
    }

    retain_unflagged(&mut world.projectiles, &removals.projectiles);
    retain_unflagged(&mut world.asteroids, &removals.asteroids);
    retain_unflagged(&mut world.saucers, &removals.saucers);
    retain_unflagged(&mut world.orbs, &removals.orbs);

    world.asteroids.extend(fragments);
    // Every collected orb is replaced straight away
    for _ in 0..orbs_collected {
        let id = world.next_entity_id();
        world.orbs.push(Orb::spawn(id, rng));
    }

    ship_hit
}
