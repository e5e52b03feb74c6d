//! Game state and core simulation types
//!
//! `World` holds everything that belongs to one run and is rebuilt on
//! restart. `GameState` wraps it with what survives restarts: phase, high
//! score, RNG and tuning.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize};
use super::saucer::Saucer;
use super::ship::Ship;
use super::snapshot::RenderSnapshot;
use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_position;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for confirm to restart
    GameOver,
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Hostile,
}

/// A bullet, from the ship or a saucer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before it fizzles
    pub lifetime: u32,
    pub owner: Owner,
    pub radius: f32,
}

impl Projectile {
    pub fn update(&mut self) {
        self.pos = wrap_position(self.pos + self.vel);
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }
}

/// Energy orb: grows the tail when collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Animation phase for the glow (visual only)
    pub pulse: f32,
}

impl Orb {
    /// Place an orb somewhere away from the screen edges
    pub fn spawn<R: Rng>(id: u32, rng: &mut R) -> Self {
        Self::at(
            id,
            Vec2::new(
                rng.random_range(ORB_EDGE_MARGIN..=WORLD_WIDTH - ORB_EDGE_MARGIN),
                rng.random_range(ORB_EDGE_MARGIN..=WORLD_HEIGHT - ORB_EDGE_MARGIN),
            ),
        )
    }

    pub fn at(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: ORB_RADIUS,
            pulse: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.pulse = (self.pulse + 0.1) % std::f32::consts::TAU;
    }
}

/// Something the harness may want to react to (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    ReturnedToMenu,
    ShotFired,
    AsteroidDestroyed { size: AsteroidSize },
    SaucerDestroyed,
    /// A player bullet and a saucer bullet annihilated each other
    ProjectilesCancelled,
    OrbCollected,
    ShipHit { lives_left: u32 },
    LevelUp { level: u32 },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// Everything that belongs to a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub ship: Ship,
    /// Player and saucer bullets, told apart by `owner`
    pub projectiles: Vec<Projectile>,
    pub asteroids: Vec<Asteroid>,
    pub orbs: Vec<Orb>,
    pub saucers: Vec<Saucer>,
    pub spawner: Spawner,
    /// Difficulty level, starts at 1
    pub level: u32,
    /// Simulation ticks elapsed in this run
    pub time_ticks: u64,
    /// High score when the run began (for the new-best announcement)
    pub best_at_start: u64,
    pub announced_new_best: bool,
    pub(crate) next_id: u32,
}

impl World {
    /// An empty field with a fresh ship and no other entities
    pub fn empty(tuning: &Tuning) -> Self {
        Self {
            ship: Ship::new(&tuning.ship),
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            orbs: Vec::new(),
            saucers: Vec::new(),
            spawner: Spawner::new(&tuning.spawn),
            level: 1,
            time_ticks: 0,
            best_at_start: 0,
            announced_new_best: false,
            next_id: 1,
        }
    }

    /// A populated field ready for a new run
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut world = Self::empty(tuning);
        for _ in 0..tuning.spawn.initial_asteroids {
            let id = world.next_entity_id();
            world
                .asteroids
                .push(Asteroid::spawn_at_edge(id, AsteroidSize::Large, rng));
        }
        for _ in 0..tuning.spawn.min_orbs {
            let id = world.next_entity_id();
            world.orbs.push(Orb::spawn(id, rng));
        }
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn player_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.owner == Owner::Player)
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.projectiles.sort_by_key(|p| p.id);
        self.asteroids.sort_by_key(|a| a.id);
        self.orbs.sort_by_key(|o| o.id);
        self.saucers.sort_by_key(|s| s.id);
    }
}

/// Complete game state, owned by the simulation loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Best score seen since the process started
    pub high_score: u64,
    pub world: World,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session sitting on the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&tuning, &mut rng);
        Self {
            seed,
            rng,
            tuning,
            phase: GamePhase::Menu,
            high_score: 0,
            world,
            events: Vec::new(),
        }
    }

    /// Throw the old run away and start a fresh one
    pub fn reset(&mut self) {
        self.world = World::new(&self.tuning, &mut self.rng);
        self.world.best_at_start = self.high_score;
        self.phase = GamePhase::Playing;
        log::info!(
            "New run started (seed {}, high score {})",
            self.seed,
            self.high_score
        );
    }

    pub fn score(&self) -> u64 {
        self.world.ship.score
    }

    /// Renderable view of the current state
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
