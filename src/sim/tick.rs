//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. All motion is
//! expressed in units per tick; the harness is responsible for calling
//! `tick` at `TICKS_PER_SECOND`.

use super::collision::resolve_collisions;
use super::ship::{HitOutcome, ShipControls};
use super::spawner::update_spawns;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: turn counter-clockwise
    pub rotate_left: bool,
    /// Held: turn clockwise
    pub rotate_right: bool,
    /// Held: accelerate along the facing
    pub thrust: bool,
    /// Held: fire whenever the gun is ready
    pub shoot: bool,
    /// Edge-triggered: start / restart
    pub confirm: bool,
    /// Edge-triggered: abandon the run and go back to the menu
    pub cancel: bool,
}

impl TickInput {
    fn ship_controls(&self) -> ShipControls {
        ShipControls {
            rotate_left: self.rotate_left,
            rotate_right: self.rotate_right,
            thrust: self.thrust,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Phase transitions come from discrete events
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if input.confirm {
                state.reset();
                state.events.push(GameEvent::GameStarted);
            }
            return;
        }
        GamePhase::Playing => {
            if input.cancel {
                state.phase = GamePhase::Menu;
                state.events.push(GameEvent::ReturnedToMenu);
                log::info!("Run abandoned at score {}", state.score());
                return;
            }
        }
    }

    step_playing(state, input);
}

/// One tick of gameplay: move, collide, spawn, then score bookkeeping
fn step_playing(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let world = &mut state.world;
    let rng = &mut state.rng;
    let events = &mut state.events;

    world.time_ticks += 1;

    // Player
    world.ship.update(input.ship_controls(), &tuning.ship);
    if input.shoot {
        let id = world.next_id;
        if let Some(shot) = world.ship.shoot(id, &tuning.ship) {
            world.next_id += 1;
            world.projectiles.push(shot);
            events.push(GameEvent::ShotFired);
        }
    }

    // Everything else moves
    for projectile in &mut world.projectiles {
        projectile.update();
    }
    world.projectiles.retain(|p| p.is_alive());

    for asteroid in &mut world.asteroids {
        asteroid.update();
    }

    for orb in &mut world.orbs {
        orb.update();
    }

    let player_pos = world.ship.pos;
    for saucer in &mut world.saucers {
        let id = world.next_id;
        if let Some(shot) = saucer.update(player_pos, id, &tuning.hostile, rng) {
            world.next_id += 1;
            world.projectiles.push(shot);
        }
    }

    // Collisions
    if resolve_collisions(world, tuning, rng, events) == Some(HitOutcome::Destroyed) {
        let score = world.ship.score;
        state.high_score = state.high_score.max(score);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score });
        log::info!("Game over: score {score}, level {}", world.level);
        return;
    }

    update_spawns(world, tuning, rng);

    // Level progression
    let score = world.ship.score;
    if score >= u64::from(world.level) * tuning.score.level_step {
        world.level += 1;
        events.push(GameEvent::LevelUp { level: world.level });
        log::info!("Level {} reached at score {score}", world.level);
    }

    if score > state.high_score {
        state.high_score = score;
        if world.best_at_start > 0 && !world.announced_new_best {
            world.announced_new_best = true;
            events.push(GameEvent::NewHighScore { score });
        }
    }

    // Ensure deterministic ordering
    world.normalize_order();
}
