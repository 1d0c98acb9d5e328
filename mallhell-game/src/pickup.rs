//! Pickup system - weapon crates and ammo drops
//!
//! Pickups sit on the floor, drift toward the player once they're close
//! enough (arcade magnet), and on collection call exactly two arsenal entry
//! points: `equip` for weapon crates, `add_ammo` for ammo boxes.

use bevy::prelude::*;
use mallhell_core::{Arsenal, WeaponKind};

use crate::world::WorldPos;
use crate::PlayerRig;

/// Distance within which a pickup is collected
const PICKUP_RANGE: f32 = 3.0;

/// Distance within which a pickup starts drifting toward the player
const MAGNET_RANGE: f32 = 30.0;

/// Drift speed toward the player
const MAGNET_SPEED: f32 = 12.0;

#[derive(Clone, Copy, Debug)]
pub enum PickupKind {
    /// Collecting a weapon crate puts that weapon in the player's hands
    Weapon(WeaponKind),
    /// Ammo boxes top up a specific weapon's pool, equipped or not
    Ammo(WeaponKind, u32),
}

/// A collectible sitting on the mall floor
#[derive(Component, Clone, Copy, Debug)]
pub struct GroundPickup {
    pub kind: PickupKind,
}

impl GroundPickup {
    pub fn new(kind: PickupKind) -> Self {
        Self { kind }
    }
}

/// Timed "care package" deliveries that hand the player the weapon roster
/// over the course of a run.
#[derive(Resource)]
pub struct CarePackages {
    deliveries: Vec<(f32, PickupKind)>,
    next: usize,
}

impl Default for CarePackages {
    fn default() -> Self {
        Self {
            deliveries: vec![
                (2.5, PickupKind::Weapon(WeaponKind::DartBlaster)),
                (5.5, PickupKind::Weapon(WeaponKind::GumballScatter)),
                (7.5, PickupKind::Weapon(WeaponKind::BalloonBomber)),
                (10.0, PickupKind::Weapon(WeaponKind::PlungerBow)),
                // Back to the trusty slingshot for the long haul
                (12.0, PickupKind::Weapon(WeaponKind::Slingshot)),
                (15.0, PickupKind::Ammo(WeaponKind::BalloonBomber, 6)),
            ],
            next: 0,
        }
    }
}

/// Drop due care packages a couple of units ahead of the cart
pub fn deliver_care_packages(
    mut commands: Commands,
    mut packages: ResMut<CarePackages>,
    rig: Res<PlayerRig>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    while packages.next < packages.deliveries.len() {
        let (due, kind) = packages.deliveries[packages.next];
        if now < due {
            break;
        }
        packages.next += 1;
        commands.spawn((
            GroundPickup::new(kind),
            WorldPos(rig.position + Vec3::new(0.0, 0.0, -2.0)),
        ));
        info!("Care package dropped: {}", pickup_name(kind));
    }
}

/// Drift nearby pickups toward the player
pub fn magnetize_pickups(
    mut pickups: Query<&mut WorldPos, With<GroundPickup>>,
    rig: Res<PlayerRig>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for mut pos in pickups.iter_mut() {
        let to_player = rig.position - pos.0;
        let distance = to_player.length();
        if distance > PICKUP_RANGE && distance < MAGNET_RANGE {
            pos.0 += to_player / distance * MAGNET_SPEED * dt;
        }
    }
}

/// Collect anything in range: weapon crates equip, ammo boxes refill
pub fn collect_pickups(
    mut commands: Commands,
    mut arsenal: ResMut<Arsenal>,
    pickups: Query<(Entity, &GroundPickup, &WorldPos)>,
    rig: Res<PlayerRig>,
) {
    for (entity, pickup, pos) in pickups.iter() {
        if rig.position.distance(pos.0) > PICKUP_RANGE {
            continue;
        }

        match pickup.kind {
            PickupKind::Weapon(kind) => {
                if arsenal.equip(kind) {
                    info!("Picked up {}", kind.spec().display_name);
                } else {
                    warn!("Picked up {:?} but it isn't in the roster", kind);
                }
            }
            PickupKind::Ammo(kind, amount) => {
                let added = arsenal.add_ammo(kind, amount);
                info!(
                    "Ammo box: +{} for {} ({} fit)",
                    amount,
                    kind.spec().display_name,
                    added
                );
            }
        }

        commands.entity(entity).despawn();
    }
}

fn pickup_name(kind: PickupKind) -> String {
    match kind {
        PickupKind::Weapon(w) => w.spec().display_name.to_string(),
        PickupKind::Ammo(w, n) => format!("{} ammo x{}", w.spec().display_name, n),
    }
}
