//! Data-driven game balance
//!
//! Every gameplay number lives here so a harness can load a balance file
//! (JSON) instead of recompiling. Missing fields fall back to the defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::AsteroidSize;

/// Player ship handling and tail behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Degrees turned per tick while a rotate input is held
    pub rotation_speed: f32,
    /// Velocity added per tick of thrust
    pub thrust: f32,
    /// Speed clamp applied after thrust
    pub max_speed: f32,
    /// Multiplicative velocity damping applied every tick
    pub damping: f32,
    pub fire_cooldown_ticks: u32,
    pub muzzle_speed: f32,
    pub projectile_lifetime: u32,
    /// Grace period at run start and after each hit
    pub invulnerable_ticks: u32,
    pub starting_lives: u32,
    /// Record a trail point every N ticks
    pub trail_spacing: u32,
    /// Capacity gained per orb
    pub trail_growth: usize,
    /// Absolute trail length ceiling, whatever the capacity
    pub trail_hard_cap: usize,
    /// Self-collision is ignored until the trail is at least this long
    pub trail_min_len: usize,
    /// Most recent points excluded from self-collision (they sit under the hull)
    pub trail_skip_recent: usize,
    pub trail_hit_radius: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            rotation_speed: 4.0,
            thrust: 0.1,
            max_speed: 5.0,
            damping: 0.98,
            fire_cooldown_ticks: 15,
            muzzle_speed: 10.0,
            projectile_lifetime: 60,
            invulnerable_ticks: 180,
            starting_lives: 3,
            trail_spacing: 5,
            trail_growth: 20,
            trail_hard_cap: 500,
            trail_min_len: 20,
            trail_skip_recent: 15,
            // Hull half-size plus trail dot radius
            trail_hit_radius: crate::consts::SHIP_RADIUS + 3.0,
        }
    }
}

/// Asteroid fragmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    /// Children deviate from the parent heading by up to this many radians
    pub split_spread: f32,
    pub split_speed_min: f32,
    pub split_speed_max: f32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            split_spread: std::f32::consts::FRAC_PI_4,
            split_speed_min: 0.7,
            split_speed_max: 0.95,
        }
    }
}

/// Saucer behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileTuning {
    pub bullet_speed: f32,
    pub bullet_lifetime: u32,
    /// Range for the delay before a new saucer's first shot
    pub first_shot_ticks: (u32, u32),
    pub shot_interval_ticks: (u32, u32),
    /// Range for the delay between heading changes
    pub turn_interval_ticks: (u32, u32),
    /// Aim error in radians at difficulty 1, divided by difficulty
    pub aim_jitter: f32,
    pub max_difficulty: u32,
}

impl Default for HostileTuning {
    fn default() -> Self {
        Self {
            bullet_speed: 5.0,
            bullet_lifetime: 90,
            first_shot_ticks: (30, 90),
            shot_interval_ticks: (60, 120),
            turn_interval_ticks: (60, 180),
            aim_jitter: 0.2,
            max_difficulty: 5,
        }
    }
}

/// Spawn timers, caps and floors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub initial_asteroids: usize,
    /// Population floors enforced every tick
    pub min_asteroids: usize,
    pub min_orbs: usize,

    pub asteroid_timer_start: u32,
    pub asteroid_interval: u32,
    pub asteroid_interval_per_level: u32,
    pub asteroid_interval_floor: u32,
    /// Cap is this plus the current level
    pub asteroid_cap_base: usize,

    pub orb_timer_start: u32,
    pub orb_interval: u32,
    pub orb_cap: usize,

    pub saucer_timer_start: u32,
    pub saucer_interval: u32,
    pub saucer_interval_per_level: u32,
    pub saucer_interval_floor: u32,
    /// Cap is this plus level / saucer_cap_level_divisor
    pub saucer_cap_base: usize,
    pub saucer_cap_level_divisor: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_asteroids: 4,
            min_asteroids: 3,
            min_orbs: 1,
            asteroid_timer_start: 180,
            asteroid_interval: 300,
            asteroid_interval_per_level: 10,
            asteroid_interval_floor: 60,
            asteroid_cap_base: 10,
            orb_timer_start: 300,
            orb_interval: 300,
            orb_cap: 5,
            saucer_timer_start: 1200,
            saucer_interval: 1200,
            saucer_interval_per_level: 50,
            saucer_interval_floor: 300,
            saucer_cap_base: 1,
            saucer_cap_level_divisor: 3,
        }
    }
}

/// Point values and level pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub large_asteroid: u64,
    pub medium_asteroid: u64,
    pub small_asteroid: u64,
    pub saucer: u64,
    pub orb: u64,
    /// Level N ends once score reaches N * level_step
    pub level_step: u64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            large_asteroid: 20,
            medium_asteroid: 50,
            small_asteroid: 100,
            saucer: 150,
            orb: 50,
            level_step: 1000,
        }
    }
}

impl ScoreTuning {
    /// Smaller rocks are harder to hit and worth more
    pub fn asteroid_points(&self, size: AsteroidSize) -> u64 {
        match size {
            AsteroidSize::Large => self.large_asteroid,
            AsteroidSize::Medium => self.medium_asteroid,
            AsteroidSize::Small => self.small_asteroid,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship: ShipTuning,
    pub asteroid: AsteroidTuning,
    pub hostile: HostileTuning,
    pub spawn: SpawnTuning,
    pub score: ScoreTuning,
}

/// Failure to load a balance file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}

fn check_range(range: (u32, u32), field: &'static str) -> Result<(), TuningError> {
    check(
        range.0 >= 1 && range.0 <= range.1,
        field,
        "range must be non-empty and start at 1 or more",
    )
}

impl Tuning {
    /// Parse a balance sheet and reject values the simulation cannot run with
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a balance file from disk
    pub fn from_file(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let ship = &self.ship;
        check(
            ship.damping > 0.0 && ship.damping < 1.0,
            "ship.damping",
            "must be in (0, 1)",
        )?;
        check(ship.max_speed > 0.0, "ship.max_speed", "must be positive")?;
        check(ship.trail_spacing >= 1, "ship.trail_spacing", "must be at least 1")?;
        check(ship.starting_lives >= 1, "ship.starting_lives", "must be at least 1")?;
        check(
            ship.projectile_lifetime >= 1,
            "ship.projectile_lifetime",
            "must be at least 1",
        )?;
        check(
            ship.trail_skip_recent < ship.trail_hard_cap,
            "ship.trail_skip_recent",
            "must be below trail_hard_cap",
        )?;

        let asteroid = &self.asteroid;
        check(
            asteroid.split_spread >= 0.0,
            "asteroid.split_spread",
            "must be non-negative",
        )?;
        check(
            asteroid.split_speed_min > 0.0
                && asteroid.split_speed_min <= asteroid.split_speed_max
                && asteroid.split_speed_max < 1.0,
            "asteroid.split_speed",
            "must satisfy 0 < min <= max < 1",
        )?;

        let hostile = &self.hostile;
        check(hostile.max_difficulty >= 1, "hostile.max_difficulty", "must be at least 1")?;
        check(hostile.bullet_lifetime >= 1, "hostile.bullet_lifetime", "must be at least 1")?;
        check_range(hostile.first_shot_ticks, "hostile.first_shot_ticks")?;
        check_range(hostile.shot_interval_ticks, "hostile.shot_interval_ticks")?;
        check_range(hostile.turn_interval_ticks, "hostile.turn_interval_ticks")?;

        let spawn = &self.spawn;
        check(spawn.min_orbs >= 1, "spawn.min_orbs", "the field must always hold an orb")?;
        check(
            spawn.asteroid_interval_floor >= 1,
            "spawn.asteroid_interval_floor",
            "must be at least 1",
        )?;
        check(
            spawn.saucer_interval_floor >= 1,
            "spawn.saucer_interval_floor",
            "must be at least 1",
        )?;
        check(
            spawn.orb_interval >= 1,
            "spawn.orb_interval",
            "must be at least 1",
        )?;
        check(
            spawn.saucer_cap_level_divisor >= 1,
            "spawn.saucer_cap_level_divisor",
            "must be at least 1",
        )?;

        check(self.score.level_step >= 1, "score.level_step", "must be at least 1")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        let parsed = Tuning::from_json(&json).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = Tuning::from_json(r#"{ "ship": { "starting_lives": 5 } }"#).unwrap();
        assert_eq!(parsed.ship.starting_lives, 5);
        assert_eq!(parsed.ship.fire_cooldown_ticks, 15);
        assert_eq!(parsed.spawn, SpawnTuning::default());
    }

    #[test]
    fn test_rejects_non_damping() {
        let err = Tuning::from_json(r#"{ "ship": { "damping": 1.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "ship.damping",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_split_spread() {
        let err = Tuning::from_json(r#"{ "asteroid": { "split_spread": -0.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "asteroid.split_spread",
                ..
            }
        ));

        // Zero spread splits straight along the parent heading
        let tuning = Tuning::from_json(r#"{ "asteroid": { "split_spread": 0.0 } }"#).unwrap();
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        let rock = crate::sim::Asteroid::new(
            1,
            glam::Vec2::new(100.0, 100.0),
            glam::Vec2::new(2.0, 0.0),
            AsteroidSize::Large,
            &mut rng,
        );
        let mut next = 10;
        let children = rock.split(&tuning.asteroid, &mut rng, || {
            next += 1;
            next
        });
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.vel.y.abs() < 1e-4 && c.vel.x > 0.0));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("malformed tuning JSON"));
    }

    #[test]
    fn test_asteroid_points_favor_small() {
        let score = ScoreTuning::default();
        assert!(score.asteroid_points(AsteroidSize::Small) > score.asteroid_points(AsteroidSize::Medium));
        assert!(score.asteroid_points(AsteroidSize::Medium) > score.asteroid_points(AsteroidSize::Large));
    }
}
