//! Hostile saucers: wander the field and take potshots at the ship

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::asteroid::random_edge_position;
use super::state::{Owner, Projectile};
use crate::consts::{HOSTILE_PROJECTILE_RADIUS, SAUCER_RADIUS, SAUCER_SPEED};
use crate::tuning::HostileTuning;
use crate::wrap_position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks until the next shot
    pub shoot_cooldown: u32,
    /// Ticks until the next heading change
    pub turn_timer: u32,
    /// 1 = sloppy aim, higher = tighter
    pub difficulty: u32,
}

fn random_ticks<R: Rng>(range: (u32, u32), rng: &mut R) -> u32 {
    rng.random_range(range.0..=range.1)
}

fn random_heading<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..TAU)) * SAUCER_SPEED
}

impl Saucer {
    /// Enter from a random edge on a random heading
    pub fn spawn<R: Rng>(id: u32, difficulty: u32, tuning: &HostileTuning, rng: &mut R) -> Self {
        let pos = wrap_position(random_edge_position(rng));
        Self {
            id,
            pos,
            vel: random_heading(rng),
            shoot_cooldown: random_ticks(tuning.first_shot_ticks, rng),
            turn_timer: random_ticks(tuning.turn_interval_ticks, rng),
            difficulty: difficulty.max(1),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        SAUCER_RADIUS
    }

    /// Move, occasionally change course, and fire when the gun is ready
    pub fn update<R: Rng>(
        &mut self,
        player_pos: Vec2,
        projectile_id: u32,
        tuning: &HostileTuning,
        rng: &mut R,
    ) -> Option<Projectile> {
        self.pos = wrap_position(self.pos + self.vel);

        self.turn_timer = self.turn_timer.saturating_sub(1);
        if self.turn_timer == 0 {
            self.vel = random_heading(rng);
            self.turn_timer = random_ticks(tuning.turn_interval_ticks, rng);
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if self.shoot_cooldown > 0 {
            return None;
        }

        // Aim error shrinks as difficulty rises
        let spread = tuning.aim_jitter / self.difficulty as f32;
        let jitter = if spread > 0.0 {
            rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        let mut shot = self.shoot(player_pos, projectile_id, tuning);
        shot.vel = Vec2::from_angle(jitter).rotate(shot.vel);
        self.shoot_cooldown = random_ticks(tuning.shot_interval_ticks, rng);
        Some(shot)
    }

    /// Straight shot at `target`
    pub fn shoot(&mut self, target: Vec2, projectile_id: u32, tuning: &HostileTuning) -> Projectile {
        let delta = target - self.pos;
        let mut dist = delta.length();
        if dist == 0.0 {
            dist = 1.0;
        }
        self.shoot_cooldown = tuning.shot_interval_ticks.0;
        Projectile {
            id: projectile_id,
            pos: self.pos,
            vel: delta / dist * tuning.bullet_speed,
            lifetime: tuning.bullet_lifetime,
            owner: Owner::Hostile,
            radius: HOSTILE_PROJECTILE_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn parked_saucer(pos: Vec2) -> Saucer {
        Saucer {
            id: 1,
            pos,
            vel: Vec2::ZERO,
            shoot_cooldown: 100,
            turn_timer: 1000,
            difficulty: 1,
        }
    }

    #[test]
    fn test_shoot_aims_at_target() {
        let tuning = HostileTuning::default();
        let mut saucer = parked_saucer(Vec2::new(100.0, 100.0));
        let shot = saucer.shoot(Vec2::new(100.0, 300.0), 9, &tuning);
        assert_eq!(shot.owner, Owner::Hostile);
        assert!((shot.vel - Vec2::new(0.0, tuning.bullet_speed)).length() < 1e-5);
        assert_eq!(shot.lifetime, tuning.bullet_lifetime);
    }

    #[test]
    fn test_shoot_at_own_position_is_finite() {
        let tuning = HostileTuning::default();
        let mut saucer = parked_saucer(Vec2::new(50.0, 50.0));
        let shot = saucer.shoot(saucer.pos, 2, &tuning);
        assert!(shot.vel.is_finite());
    }

    #[test]
    fn test_update_fires_when_cooldown_expires() {
        let tuning = HostileTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut saucer = parked_saucer(Vec2::new(100.0, 100.0));
        saucer.shoot_cooldown = 3;

        assert!(saucer.update(Vec2::ZERO, 1, &tuning, &mut rng).is_none());
        assert!(saucer.update(Vec2::ZERO, 2, &tuning, &mut rng).is_none());
        let shot = saucer.update(Vec2::new(400.0, 100.0), 3, &tuning, &mut rng).unwrap();

        // Roughly toward the target, within the aim jitter
        let angle = shot.vel.angle_to(Vec2::X);
        assert!(angle.abs() <= tuning.aim_jitter + 1e-4);
        assert!((shot.vel.length() - tuning.bullet_speed).abs() < 1e-4);
        let (lo, hi) = tuning.shot_interval_ticks;
        assert!((lo..=hi).contains(&saucer.shoot_cooldown));
    }

    #[test]
    fn test_higher_difficulty_tightens_aim() {
        let tuning = HostileTuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..50 {
            let mut saucer = parked_saucer(Vec2::new(100.0, 100.0));
            saucer.difficulty = 5;
            saucer.shoot_cooldown = 1;
            let shot = saucer.update(Vec2::new(400.0, 100.0), 1, &tuning, &mut rng).unwrap();
            assert!(shot.vel.angle_to(Vec2::X).abs() <= tuning.aim_jitter / 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_changes_heading_on_timer() {
        let tuning = HostileTuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut saucer = parked_saucer(Vec2::new(100.0, 100.0));
        saucer.turn_timer = 1;
        saucer.update(Vec2::ZERO, 1, &tuning, &mut rng);
        assert!((saucer.vel.length() - SAUCER_SPEED).abs() < 1e-4);
        let (lo, hi) = tuning.turn_interval_ticks;
        assert!((lo..=hi).contains(&saucer.turn_timer));
    }

    #[test]
    fn test_spawn_on_edge() {
        let tuning = HostileTuning::default();
        let mut rng = Pcg32::seed_from_u64(10);
        let saucer = Saucer::spawn(4, 3, &tuning, &mut rng);
        assert_eq!(saucer.difficulty, 3);
        assert!((saucer.vel.length() - SAUCER_SPEED).abs() < 1e-4);
        let (lo, hi) = tuning.first_shot_ticks;
        assert!((lo..=hi).contains(&saucer.shoot_cooldown));
    }

    proptest! {
        #[test]
        fn prop_saucer_stays_on_torus(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            cooldown in 0u32..3,
            turn in 0u32..3,
            seed in any::<u64>(),
        ) {
            let tuning = HostileTuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut saucer = Saucer {
                id: 1,
                pos: Vec2::new(x, y),
                vel: Vec2::new(vx, vy),
                shoot_cooldown: cooldown,
                turn_timer: turn,
                difficulty: 2,
            };
            let shot = saucer.update(Vec2::new(400.0, 300.0), 2, &tuning, &mut rng);
            let on_field = |p: Vec2| p.x >= 0.0 && p.x < WORLD_WIDTH && p.y >= 0.0 && p.y < WORLD_HEIGHT;
            prop_assert!(on_field(saucer.pos));
            if let Some(shot) = shot {
                prop_assert!(on_field(shot.pos));
            }
        }
    }
}
