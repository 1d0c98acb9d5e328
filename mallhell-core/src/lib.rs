//! Mall Hell gameplay core - the weapon/projectile/aim-assist pipeline
//!
//! Everything here is frame-driven and single-threaded: the host game loop
//! calls `Arsenal::update` and `ProjectileSet::update` once per tick and all
//! time-based behavior derives from "elapsed since stored timestamp", so
//! pausing the loop pauses the whole core. No entry point panics on invalid
//! input; not-ready and not-possible both come back as neutral values.

pub mod aim;
pub mod projectile;
pub mod view;
pub mod weapons;

pub use aim::{AimAssist, AimCandidate, AimProfile, ScoreTable};
pub use projectile::{Projectile, ProjectileSet};
pub use view::CameraView;
pub use weapons::arsenal::Arsenal;
pub use weapons::state::WeaponState;
pub use weapons::{
    AmmoCapacity, ChargeSpec, FireMode, FireResult, ProjectileKind, SplashSpec, WeaponKind,
    WeaponSpec,
};
