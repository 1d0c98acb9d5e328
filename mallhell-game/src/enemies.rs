//! Enemy carts - skeleton drivers and their toy/dino variants
//!
//! Carts spawn in waves down the aisle, roll straight at the player, and ram
//! for contact damage. No pathfinding; mall aisles are straight.

use bevy::prelude::*;
use mallhell_core::WeaponKind;

use crate::pickup::{GroundPickup, PickupKind};
use crate::score::Score;
use crate::world::{Health, WorldPos};
use crate::PlayerRig;

/// Seconds between waves
const WAVE_INTERVAL: f32 = 6.0;

/// How close a cart must get to ram the player
const CONTACT_RANGE: f32 = 2.0;

/// Minimum seconds between rams from the same cart
const CONTACT_COOLDOWN: f32 = 1.0;

/// Chance a destroyed cart drops an ammo pickup
const AMMO_DROP_CHANCE: f32 = 0.4;

/// Cart enemy variants
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CartKind {
    /// Baseline skeleton-driven cart
    SkeletonCart,
    /// Fast, fragile wind-up toy cart
    ToyCart,
    /// Slow, armored inflatable dino cart
    DinoCart,
}

/// Stats for one cart variant
#[derive(Clone, Copy, Debug)]
pub struct CartStats {
    pub health: f32,
    /// Forward speed in units/sec
    pub speed: f32,
    pub contact_damage: f32,
    pub score: u32,
    /// Aim-point height for the assist
    pub aim_height: f32,
    /// Collision radius
    pub radius: f32,
}

impl CartKind {
    pub fn stats(&self) -> CartStats {
        match self {
            CartKind::SkeletonCart => CartStats {
                health: 40.0,
                speed: 4.0,
                contact_damage: 10.0,
                score: 100,
                aim_height: 1.4,
                radius: 0.9,
            },
            CartKind::ToyCart => CartStats {
                health: 15.0,
                speed: 7.0,
                contact_damage: 5.0,
                score: 150,
                aim_height: 0.9,
                radius: 0.7,
            },
            CartKind::DinoCart => CartStats {
                health: 90.0,
                speed: 2.5,
                contact_damage: 20.0,
                score: 250,
                aim_height: 2.2,
                radius: 1.3,
            },
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CartKind::SkeletonCart => "Skeleton Cart",
            CartKind::ToyCart => "Toy Cart",
            CartKind::DinoCart => "Dino Cart",
        }
    }
}

/// An enemy cart on the floor
#[derive(Component, Clone, Debug)]
pub struct Cart {
    pub kind: CartKind,
    /// Last time this cart rammed the player
    last_contact_time: f32,
}

/// Wave spawner bookkeeping
#[derive(Resource)]
pub struct WaveState {
    pub wave: u32,
    next_wave_at: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave: 0,
            next_wave_at: 1.0,
        }
    }
}

/// Spawn the next wave when its timer comes up. Waves grow by one cart each
/// time and mix in tougher variants as they go.
pub fn spawn_waves(
    mut commands: Commands,
    mut wave_state: ResMut<WaveState>,
    rig: Res<PlayerRig>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    if now < wave_state.next_wave_at {
        return;
    }
    wave_state.wave += 1;
    wave_state.next_wave_at = now + WAVE_INTERVAL;

    let count = 2 + wave_state.wave;
    for i in 0..count {
        let kind = match (wave_state.wave + i) % 4 {
            0 | 1 => CartKind::SkeletonCart,
            2 => CartKind::ToyCart,
            _ => CartKind::DinoCart,
        };
        let lane_x = rand::random::<f32>() * 16.0 - 8.0;
        let depth = 35.0 + rand::random::<f32>() * 20.0;
        let position = rig.position + Vec3::new(lane_x, 0.0, -depth);

        commands.spawn((
            Cart {
                kind,
                last_contact_time: -CONTACT_COOLDOWN,
            },
            WorldPos(position),
            Health::new(kind.stats().health),
        ));
    }

    info!("Wave {} incoming: {} carts", wave_state.wave, count);
}

/// Roll every cart straight at the player and ram when close enough
pub fn advance_carts(
    mut carts: Query<(&mut Cart, &mut WorldPos)>,
    mut rig: ResMut<PlayerRig>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (mut cart, mut pos) in carts.iter_mut() {
        let stats = cart.kind.stats();
        let to_player = rig.position - pos.0;
        let flat = Vec3::new(to_player.x, 0.0, to_player.z);
        let distance = flat.length();

        if distance > CONTACT_RANGE {
            pos.0 += flat / distance * stats.speed * dt;
        } else if now - cart.last_contact_time >= CONTACT_COOLDOWN {
            cart.last_contact_time = now;
            let killed = rig.health.take_damage(stats.contact_damage);
            info!(
                "{} rams you for {:.0} ({:.0} HP left)",
                cart.kind.display_name(),
                stats.contact_damage,
                rig.health.current
            );
            if killed {
                info!("Run over! The cart got you.");
            }
        }
    }
}

/// Remove destroyed carts, award points, and sometimes drop ammo
pub fn cull_dead_carts(
    mut commands: Commands,
    mut score: ResMut<Score>,
    carts: Query<(Entity, &Cart, &WorldPos, &Health)>,
) {
    for (entity, cart, pos, health) in carts.iter() {
        if !health.is_dead() {
            continue;
        }
        let stats = cart.kind.stats();
        score.points += stats.score;
        score.kills += 1;
        info!("{} destroyed (+{} pts)", cart.kind.display_name(), stats.score);

        if rand::random::<f32>() < AMMO_DROP_CHANCE {
            let (kind, amount) = match cart.kind {
                CartKind::SkeletonCart => (WeaponKind::DartBlaster, 15),
                CartKind::ToyCart => (WeaponKind::GumballScatter, 4),
                CartKind::DinoCart => (WeaponKind::PlungerBow, 3),
            };
            commands.spawn((GroundPickup::new(PickupKind::Ammo(kind, amount)), WorldPos(pos.0)));
        }

        commands.entity(entity).despawn();
    }
}
