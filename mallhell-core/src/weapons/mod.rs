//! Weapon system - kinds, specs, and the firing contract
//!
//! A kid-in-a-shopping-cart arsenal: slingshot plus novelty weapons.

pub mod arsenal;
pub mod damage;
pub mod state;

use serde::{Deserialize, Serialize};

/// Available weapon kinds
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Starter weapon: hold to draw, release to fling a pebble
    #[default]
    Slingshot,
    /// Full-auto foam dart gun
    DartBlaster,
    /// One-shot burst of bouncing gumballs
    GumballScatter,
    /// Skill shot: plungers punch through whole cart columns
    PlungerBow,
    /// Lobbed water balloons that soak everything nearby
    BalloonBomber,
}

/// How a weapon turns trigger input into shots
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FireMode {
    /// Hold to charge, release to fire at the built-up tension
    Charge,
    /// One shot per trigger press, gated by cooldown
    SingleShot,
    /// Fires continuously while the trigger is held
    Auto,
}

/// Magazine capacity for a weapon
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AmmoCapacity {
    Limited(u32),
    Unbounded,
}

/// Charge behavior for `FireMode::Charge` weapons.
/// Tension builds from `min_tension` toward 1.0 while the trigger is held.
#[derive(Clone, Copy, Debug)]
pub struct ChargeSpec {
    /// Tension gained per second of holding
    pub rate_per_sec: f32,
    /// Tension the charge starts at; releases below this are cancelled shots
    pub min_tension: f32,
}

/// Area damage dealt around an impact point
#[derive(Clone, Copy, Debug)]
pub struct SplashSpec {
    pub radius: f32,
    pub damage: f32,
}

/// Projectile categories fired by the arsenal
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ProjectileKind {
    Pebble,
    FoamDart,
    Gumball,
    Plunger,
    WaterBalloon,
}

/// Per-kind physical parameters shared by every projectile of that kind
#[derive(Clone, Copy, Debug)]
pub struct ProjectileSpec {
    /// Collision radius in world units
    pub radius: f32,
    /// Seconds before the projectile despawns on its own
    pub lifetime: f32,
}

impl ProjectileKind {
    pub fn spec(&self) -> ProjectileSpec {
        match self {
            ProjectileKind::Pebble => ProjectileSpec {
                radius: 0.12,
                lifetime: 4.0,
            },
            ProjectileKind::FoamDart => ProjectileSpec {
                radius: 0.10,
                lifetime: 3.0,
            },
            ProjectileKind::Gumball => ProjectileSpec {
                radius: 0.15,
                lifetime: 3.0,
            },
            ProjectileKind::Plunger => ProjectileSpec {
                radius: 0.20,
                lifetime: 5.0,
            },
            ProjectileKind::WaterBalloon => ProjectileSpec {
                radius: 0.30,
                lifetime: 6.0,
            },
        }
    }
}

/// Complete stats for a weapon kind
#[derive(Clone, Debug)]
pub struct WeaponSpec {
    pub display_name: &'static str,
    pub fire_mode: FireMode,
    /// Minimum seconds between fire events
    pub cooldown: f32,
    pub ammo: AmmoCapacity,
    /// Rounds consumed per fire event
    pub consume_per_shot: u32,
    pub projectile: ProjectileKind,
    /// Launch speed range; charge tension interpolates between the two,
    /// other fire modes always launch at `speed_max`
    pub speed_min: f32,
    pub speed_max: f32,
    /// Direct-hit damage per projectile
    pub damage: f32,
    /// Projectiles spawned per fire event (pellets)
    pub count: u32,
    /// Downward acceleration applied to this weapon's projectiles
    pub gravity: f32,
    /// Scatter cone (radians) applied per projectile
    pub spread: f32,
    pub splash: Option<SplashSpec>,
    /// Piercing projectiles survive hits and keep flying
    pub piercing: bool,
    /// Present iff `fire_mode == Charge`
    pub charge: Option<ChargeSpec>,
    /// Whether aim assist may steer the crosshair for this weapon
    pub aim_assist_eligible: bool,
    /// Cosmetic fire-animation decay rate (fraction per second)
    pub anim_decay_per_sec: f32,
}

impl WeaponKind {
    /// Get the stats for this weapon kind
    pub fn spec(&self) -> WeaponSpec {
        match self {
            WeaponKind::Slingshot => WeaponSpec {
                display_name: "Slingshot",
                fire_mode: FireMode::Charge,
                cooldown: 0.3,
                ammo: AmmoCapacity::Unbounded,
                consume_per_shot: 0,
                projectile: ProjectileKind::Pebble,
                speed_min: 60.0,
                speed_max: 180.0,
                damage: 20.0,
                count: 1,
                gravity: 9.8,
                spread: 0.0,
                splash: None,
                piercing: false,
                charge: Some(ChargeSpec {
                    rate_per_sec: 1.2,
                    min_tension: 0.2,
                }),
                aim_assist_eligible: true,
                anim_decay_per_sec: 4.0,
            },
            WeaponKind::DartBlaster => WeaponSpec {
                display_name: "Dart Blaster",
                fire_mode: FireMode::Auto,
                cooldown: 0.05,
                ammo: AmmoCapacity::Limited(60),
                consume_per_shot: 1,
                projectile: ProjectileKind::FoamDart,
                speed_min: 90.0,
                speed_max: 90.0,
                damage: 6.0,
                count: 1,
                gravity: 2.0, // foam darts float more than they drop
                spread: 0.02,
                splash: None,
                piercing: false,
                charge: None,
                aim_assist_eligible: true,
                anim_decay_per_sec: 8.0,
            },
            WeaponKind::GumballScatter => WeaponSpec {
                display_name: "Gumball Scatter",
                fire_mode: FireMode::SingleShot,
                cooldown: 0.8,
                ammo: AmmoCapacity::Limited(16),
                consume_per_shot: 1,
                projectile: ProjectileKind::Gumball,
                speed_min: 70.0,
                speed_max: 70.0,
                damage: 8.0, // per gumball
                count: 6,
                gravity: 9.8,
                spread: 0.12,
                splash: None,
                piercing: false,
                charge: None,
                aim_assist_eligible: true,
                anim_decay_per_sec: 3.0,
            },
            WeaponKind::PlungerBow => WeaponSpec {
                display_name: "Plunger Bow",
                fire_mode: FireMode::SingleShot,
                cooldown: 0.6,
                ammo: AmmoCapacity::Limited(10),
                consume_per_shot: 1,
                projectile: ProjectileKind::Plunger,
                speed_min: 120.0,
                speed_max: 120.0,
                damage: 40.0,
                count: 1,
                gravity: 4.0,
                spread: 0.0,
                splash: None,
                piercing: true,
                charge: None,
                aim_assist_eligible: false, // skill shot, no hand-holding
                anim_decay_per_sec: 2.5,
            },
            WeaponKind::BalloonBomber => WeaponSpec {
                display_name: "Balloon Bomber",
                fire_mode: FireMode::Charge,
                cooldown: 0.5,
                ammo: AmmoCapacity::Limited(8),
                consume_per_shot: 1,
                projectile: ProjectileKind::WaterBalloon,
                speed_min: 20.0,
                speed_max: 55.0,
                damage: 15.0,
                count: 1,
                gravity: 18.0,
                spread: 0.0,
                splash: Some(SplashSpec {
                    radius: 4.0,
                    damage: 30.0,
                }),
                piercing: false,
                charge: Some(ChargeSpec {
                    rate_per_sec: 0.8,
                    min_tension: 0.25,
                }),
                aim_assist_eligible: true,
                anim_decay_per_sec: 2.0,
            },
        }
    }

    /// Every weapon kind, in pickup/progression order
    pub fn all() -> [WeaponKind; 5] {
        [
            WeaponKind::Slingshot,
            WeaponKind::DartBlaster,
            WeaponKind::GumballScatter,
            WeaponKind::PlungerBow,
            WeaponKind::BalloonBomber,
        ]
    }
}

/// Everything the projectile spawner needs to turn one fire event into
/// in-flight projectiles.
#[derive(Clone, Debug)]
pub struct FireResult {
    pub kind: ProjectileKind,
    /// Launch speed (already tension-scaled for charge weapons)
    pub speed: f32,
    /// Normalized shot strength; 1.0 for non-charge weapons
    pub power: f32,
    pub damage: f32,
    pub count: u32,
    pub spread: f32,
    pub gravity: f32,
    pub splash: Option<SplashSpec>,
    pub piercing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_specs_only_on_charge_weapons() {
        for kind in WeaponKind::all() {
            let spec = kind.spec();
            assert_eq!(
                spec.charge.is_some(),
                spec.fire_mode == FireMode::Charge,
                "{:?} charge spec mismatch",
                kind
            );
        }
    }

    #[test]
    fn test_spec_sanity() {
        for kind in WeaponKind::all() {
            let spec = kind.spec();
            assert!(spec.cooldown >= 0.0);
            assert!(spec.count >= 1);
            assert!(spec.speed_min <= spec.speed_max);
            assert!(spec.spread >= 0.0);
            assert!(spec.gravity >= 0.0);
            if let Some(charge) = spec.charge {
                assert!(charge.min_tension > 0.0 && charge.min_tension <= 1.0);
                assert!(charge.rate_per_sec > 0.0);
            }
        }
    }
}
