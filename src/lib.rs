//! Astersnake - Asteroids with a snake's tail
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game state)
//! - `session`: Fixed-timestep driver the presentation harness talks to
//! - `tuning`: Data-driven game balance

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real-time gap fed into the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.25;

    /// Playfield dimensions (toroidal)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Ship nominal size; collision radius is half of it
    pub const SHIP_SIZE: f32 = 15.0;
    pub const SHIP_RADIUS: f32 = SHIP_SIZE / 2.0;

    /// Projectile collision radii
    pub const PLAYER_PROJECTILE_RADIUS: f32 = 3.0;
    pub const HOSTILE_PROJECTILE_RADIUS: f32 = 2.0;

    /// Orbs are static pickups
    pub const ORB_RADIUS: f32 = 8.0;
    /// Orbs never spawn closer than this to the edge
    pub const ORB_EDGE_MARGIN: f32 = 50.0;

    pub const SAUCER_RADIUS: f32 = 15.0;
    pub const SAUCER_SPEED: f32 = 2.0;

    /// Outline vertex count range for asteroid polygons (inclusive)
    pub const ASTEROID_MIN_VERTICES: usize = 8;
    pub const ASTEROID_MAX_VERTICES: usize = 12;
    /// Per-vertex radius jitter around the nominal radius
    pub const ASTEROID_JITTER_MIN: f32 = 0.8;
    pub const ASTEROID_JITTER_MAX: f32 = 1.2;
}

use consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Center of the playfield (ship spawn point)
#[inline]
pub fn world_center() -> Vec2 {
    Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0)
}

/// Wrap a coordinate into [0, size)
#[inline]
fn wrap_axis(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size { 0.0 } else { wrapped }
}

/// Wrap a position onto the torus, always in [0, W) x [0, H)
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, WORLD_WIDTH), wrap_axis(pos.y, WORLD_HEIGHT))
}

/// Wrap onto an enlarged torus so a body of radius `margin` fully leaves
/// the screen before reappearing on the other side.
///
/// Result lies in [-margin, W + margin) x [-margin, H + margin).
#[inline]
pub fn wrap_with_margin(pos: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x + margin, WORLD_WIDTH + 2.0 * margin) - margin,
        wrap_axis(pos.y + margin, WORLD_HEIGHT + 2.0 * margin) - margin,
    )
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    wrap_axis(angle, 360.0)
}

/// Unit vector for a facing angle in degrees.
///
/// Screen Y grows downward, so positive angles turn counter-clockwise on screen.
#[inline]
pub fn direction_vector(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_position_negative_and_overflow() {
        let p = wrap_position(Vec2::new(-10.0, 610.0));
        assert!((p.x - 790.0).abs() < 0.001);
        assert!((p.y - 10.0).abs() < 0.001);

        let p = wrap_position(Vec2::new(800.0, 600.0));
        assert_eq!(p, Vec2::ZERO);
    }

    #[test]
    fn test_wrap_position_tiny_negative_stays_in_range() {
        let p = wrap_position(Vec2::new(-1e-9, -1e-9));
        assert!(p.x >= 0.0 && p.x < WORLD_WIDTH);
        assert!(p.y >= 0.0 && p.y < WORLD_HEIGHT);
    }

    #[test]
    fn test_wrap_with_margin() {
        // Still visible on the right edge, no wrap yet
        let p = wrap_with_margin(Vec2::new(820.0, 300.0), 40.0);
        assert!((p.x - 820.0).abs() < 0.001);

        // Fully off-screen: reappears just beyond the left edge
        let p = wrap_with_margin(Vec2::new(841.0, 300.0), 40.0);
        assert!((p.x - (-39.0)).abs() < 0.001);
    }

    #[test]
    fn test_direction_vector_screen_convention() {
        let right = direction_vector(0.0);
        assert!((right - Vec2::new(1.0, 0.0)).length() < 1e-5);

        // 90 degrees points up the screen (negative y)
        let up = direction_vector(90.0);
        assert!((up - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(364.0) - 4.0).abs() < 1e-4);
        assert!((wrap_degrees(-4.0) - 356.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}
