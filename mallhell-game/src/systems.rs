//! The per-frame weapon pipeline: aim, fire, simulate, resolve
//!
//! Order matters and is enforced by the schedule chain in `main`: aim assist
//! settles the crosshair before any shot derives its direction from it, fire
//! results spawn their projectiles in the same tick, and the projectile set
//! culls itself before hits are resolved against what's left.

use bevy::prelude::*;
use mallhell_core::weapons::damage;
use mallhell_core::{projectile, AimAssist, AimCandidate, Arsenal, CameraView, ProjectileSet, SplashSpec};
use mallhell_core::view::DEFAULT_FOV_Y;

use crate::enemies::Cart;
use crate::input::InputState;
use crate::score::Score;
use crate::world::{Health, MallObstacle, WorldPos};
use crate::PlayerRig;

/// Logical viewport the crosshair lives in
pub const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Camera height above the cart floor
const EYE_HEIGHT: f32 = 1.5;

/// Build this frame's camera snapshot from the player rig
pub fn camera_view(rig: &PlayerRig) -> CameraView {
    let forward = Vec3::new(-rig.yaw.sin(), 0.0, -rig.yaw.cos());
    CameraView::new(
        rig.position + Vec3::Y * EYE_HEIGHT,
        forward,
        VIEWPORT,
        DEFAULT_FOV_Y,
    )
}

/// Run aim assist over this frame's carts and clutter
pub fn update_aim(
    rig: Res<PlayerRig>,
    arsenal: Res<Arsenal>,
    input: Res<InputState>,
    mut aim: ResMut<AimAssist>,
    carts: Query<(Entity, &WorldPos, &Cart, &Health)>,
    obstacles: Query<(Entity, &WorldPos, &MallObstacle, &Health)>,
) {
    let view = camera_view(&rig);

    let enemies: Vec<AimCandidate> = carts
        .iter()
        .map(|(entity, pos, cart, health)| AimCandidate {
            entity,
            position: pos.0,
            height: Some(cart.kind.stats().aim_height),
            alive: !health.is_dead(),
        })
        .collect();

    let clutter: Vec<AimCandidate> = obstacles
        .iter()
        .map(|(entity, pos, obstacle, health)| AimCandidate {
            entity,
            position: pos.0,
            height: Some(obstacle.height),
            alive: !health.is_dead(),
        })
        .collect();

    aim.update(
        &view,
        rig.position,
        input.raw_crosshair,
        arsenal.aim_assist_ready(),
        &enemies,
        &clutter,
        None,
    );
}

/// Turn trigger edges into weapon calls and fire results into projectiles
pub fn update_weapons(
    mut arsenal: ResMut<Arsenal>,
    mut projectiles: ResMut<ProjectileSet>,
    mut score: ResMut<Score>,
    aim: Res<AimAssist>,
    input: Res<InputState>,
    rig: Res<PlayerRig>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    if input.cancel_requested {
        arsenal.cancel_action();
    }

    let mut results = Vec::new();
    if input.fire_pressed {
        results.extend(arsenal.fire_start(now));
    }
    if input.fire_released {
        results.extend(arsenal.fire_release(now));
    }
    results.extend(arsenal.update(dt, now));

    if results.is_empty() {
        return;
    }

    let view = camera_view(&rig);
    let muzzle = projectile::muzzle_position(&view);
    for result in results {
        let direction = projectile::fire_direction(&view, aim.crosshair, muzzle);
        score.shots += result.count;
        debug!(
            "Fired {:?} x{} at {:.0} u/s (power {:.2})",
            result.kind, result.count, result.speed, result.power
        );
        projectiles.spawn_volley(&result, muzzle, direction, now);
    }
}

/// Advance and cull the projectile set
pub fn simulate_projectiles(
    mut projectiles: ResMut<ProjectileSet>,
    rig: Res<PlayerRig>,
    time: Res<Time>,
) {
    let camera_pos = rig.position + Vec3::Y * EYE_HEIGHT;
    projectiles.update(time.delta_secs(), time.elapsed_secs(), camera_pos);
}

/// Test surviving projectiles against carts and clutter, apply damage and
/// splash, and retire non-piercing projectiles on their first hit.
pub fn resolve_hits(
    mut projectiles: ResMut<ProjectileSet>,
    mut score: ResMut<Score>,
    mut carts: Query<(Entity, &WorldPos, &Cart, &mut Health), Without<MallObstacle>>,
    mut obstacles: Query<(Entity, &WorldPos, &MallObstacle, &mut Health), Without<Cart>>,
) {
    struct HitRecord {
        index: usize,
        entity: Entity,
        impact: Vec3,
        damage: f32,
        splash: Option<SplashSpec>,
    }

    // Detect first, apply after: one direct hit per projectile per tick.
    let mut hits: Vec<HitRecord> = Vec::new();
    for index in 0..projectiles.len() {
        let Some(p) = projectiles.get(index) else {
            continue;
        };
        if !p.active {
            continue;
        }

        let mut recorded = false;
        for (entity, pos, cart, health) in carts.iter() {
            if health.is_dead() {
                continue;
            }
            let stats = cart.kind.stats();
            let center = pos.0 + Vec3::Y * (stats.aim_height * 0.5);
            if projectile::check_collision(p, center, stats.radius) {
                hits.push(HitRecord {
                    index,
                    entity,
                    impact: p.position,
                    damage: p.damage,
                    splash: p.splash,
                });
                recorded = true;
                break;
            }
        }
        if recorded {
            continue;
        }
        for (entity, pos, obstacle, health) in obstacles.iter() {
            if health.is_dead() {
                continue;
            }
            let center = pos.0 + Vec3::Y * (obstacle.height * 0.5);
            if projectile::check_collision(p, center, obstacle.radius) {
                hits.push(HitRecord {
                    index,
                    entity,
                    impact: p.position,
                    damage: p.damage,
                    splash: p.splash,
                });
                break;
            }
        }
    }

    for hit in hits {
        projectiles.register_hit(hit.index);
        score.hits += 1;

        if let Ok((_, _, _, mut health)) = carts.get_mut(hit.entity) {
            health.take_damage(hit.damage);
        } else if let Ok((_, _, _, mut health)) = obstacles.get_mut(hit.entity) {
            health.take_damage(hit.damage);
        }

        // Splash soaks everything in the radius, direct target included
        if let Some(splash) = hit.splash {
            for (_, pos, _, mut health) in carts.iter_mut() {
                let soak = damage::splash_damage(&splash, pos.0.distance(hit.impact));
                if soak > 0.0 {
                    health.take_damage(soak);
                }
            }
            for (_, pos, _, mut health) in obstacles.iter_mut() {
                let soak = damage::splash_damage(&splash, pos.0.distance(hit.impact));
                if soak > 0.0 {
                    health.take_damage(soak);
                }
            }
        }
    }
}
