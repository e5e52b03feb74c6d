//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod saucer;
pub mod ship;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize};
pub use collision::{circles_overlap, resolve_collisions};
pub use saucer::Saucer;
pub use ship::{HitOutcome, Ship, ShipControls};
pub use snapshot::{RenderSnapshot, Renderer};
pub use spawner::{Spawner, update_spawns};
pub use state::{GameEvent, GamePhase, GameState, Orb, Owner, Projectile, World};
pub use tick::{TickInput, tick};
