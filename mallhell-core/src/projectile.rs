//! In-flight projectile simulation
//!
//! Owns every live projectile from spawn to despawn. The live set is a
//! bounded deque: saturating it evicts the oldest projectile rather than
//! rejecting the new one. Despawn checks run inside `update`, before the
//! host resolves collisions against the surviving set, so a projectile that
//! crosses its range limit and a target in the same tick despawns unhit.

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::view::CameraView;
use crate::weapons::{FireResult, ProjectileKind, SplashSpec};

/// Hard cap on simultaneously live projectiles
pub const MAX_LIVE_PROJECTILES: usize = 64;

/// Projectiles further than this from the camera are culled
pub const DESPAWN_DISTANCE: f32 = 150.0;

/// Vertical band projectiles are allowed to occupy
pub const MIN_Y: f32 = -10.0;
pub const MAX_Y: f32 = 60.0;

/// Muzzle sits slightly ahead of and below the eye
const MUZZLE_FORWARD_OFFSET: f32 = 0.8;
const MUZZLE_DROP: f32 = 0.35;

/// How far out the crosshair ray is extended when deriving shot direction
const AIM_FAR_DISTANCE: f32 = 500.0;

/// One live projectile
#[derive(Clone, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Downward acceleration inherited from the firing weapon
    pub gravity: f32,
    pub damage: f32,
    pub splash: Option<SplashSpec>,
    pub piercing: bool,
    pub spawn_time: f32,
    pub active: bool,
}

/// The set of all live projectiles, owned exclusively here
#[derive(Resource)]
pub struct ProjectileSet {
    live: VecDeque<Projectile>,
    max_live: usize,
}

impl Default for ProjectileSet {
    fn default() -> Self {
        Self::new(MAX_LIVE_PROJECTILES)
    }
}

impl ProjectileSet {
    pub fn new(max_live: usize) -> Self {
        Self {
            live: VecDeque::with_capacity(max_live),
            max_live,
        }
    }

    /// Spawn every projectile of one fire event: `count` shots from `origin`
    /// along `direction`, each scattered inside the spread cone.
    pub fn spawn_volley(
        &mut self,
        result: &FireResult,
        origin: Vec3,
        direction: Vec3,
        now: f32,
    ) {
        for _ in 0..result.count {
            let dir = scatter(direction, result.spread);
            self.push(Projectile {
                kind: result.kind,
                position: origin,
                velocity: dir * result.speed,
                gravity: result.gravity,
                damage: result.damage,
                splash: result.splash,
                piercing: result.piercing,
                spawn_time: now,
                active: true,
            });
        }
    }

    fn push(&mut self, projectile: Projectile) {
        // FIFO eviction: the mall only has room for so many gumballs.
        while self.live.len() >= self.max_live && self.live.pop_front().is_some() {}
        self.live.push_back(projectile);
    }

    /// Integrate every live projectile and cull the ones that are done.
    /// Runs before the host reads the set for collision resolution.
    pub fn update(&mut self, dt: f32, now: f32, camera_pos: Vec3) {
        for p in self.live.iter_mut() {
            p.position += p.velocity * dt;
            if p.gravity > 0.0 {
                p.velocity.y -= p.gravity * dt;
            }
        }
        self.live
            .retain(|p| p.active && !should_despawn(p, now, camera_pos));
    }

    /// A projectile landed on something. Non-piercing projectiles retire on
    /// the spot (removed at the next update); piercing ones keep flying.
    /// Returns whether the projectile was consumed by the hit.
    pub fn register_hit(&mut self, index: usize) -> bool {
        match self.live.get_mut(index) {
            Some(p) if !p.piercing => {
                p.active = false;
                true
            }
            Some(_) => false,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.live.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live.iter()
    }
}

fn should_despawn(p: &Projectile, now: f32, camera_pos: Vec3) -> bool {
    p.position.distance(camera_pos) > DESPAWN_DISTANCE
        || p.position.y < MIN_Y
        || p.position.y > MAX_Y
        || now - p.spawn_time > p.kind.spec().lifetime
}

/// Muzzle point: slightly in front of and below the eye
pub fn muzzle_position(view: &CameraView) -> Vec3 {
    view.position + view.forward * MUZZLE_FORWARD_OFFSET - Vec3::Y * MUZZLE_DROP
}

/// Shot direction from muzzle through the crosshair.
///
/// The crosshair ray is extended far out and the shot aims at that distant
/// point, which keeps crosshair and impact aligned even though the muzzle
/// sits below the eye.
pub fn fire_direction(view: &CameraView, crosshair: Vec2, muzzle: Vec3) -> Vec3 {
    let far_point = view.position + view.screen_ray(crosshair) * AIM_FAR_DISTANCE;
    (far_point - muzzle).normalize()
}

/// Sphere test between a projectile and a target
pub fn check_collision(p: &Projectile, target_pos: Vec3, target_radius: f32) -> bool {
    p.position.distance(target_pos) < target_radius + p.kind.spec().radius
}

/// Apply random scatter within a spread cone, keeping the result normalized
pub fn scatter(direction: Vec3, spread_radians: f32) -> Vec3 {
    if spread_radians <= 0.0 {
        return direction.normalize();
    }

    let random_angle = rand::random::<f32>() * std::f32::consts::TAU;
    let random_radius = rand::random::<f32>().sqrt() * spread_radians;

    let up = if direction.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let right = direction.cross(up).normalize();
    let actual_up = right.cross(direction).normalize();

    let offset = right * (random_radius * random_angle.cos())
        + actual_up * (random_radius * random_angle.sin());

    (direction + offset).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DEFAULT_FOV_Y;

    fn plain_shot(kind: ProjectileKind, speed: f32) -> FireResult {
        FireResult {
            kind,
            speed,
            power: 1.0,
            damage: 10.0,
            count: 1,
            spread: 0.0,
            gravity: 0.0,
            splash: None,
            piercing: false,
        }
    }

    #[test]
    fn test_despawns_past_range() {
        let mut set = ProjectileSet::default();
        let shot = plain_shot(ProjectileKind::Pebble, 100.0);
        set.spawn_volley(&shot, Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 0.0);

        let camera = Vec3::ZERO;
        let mut now = 0.0;
        while now < 1.0 - 1e-6 {
            set.update(0.05, now, camera);
            now += 0.05;
        }
        // ~100 units out: inside the 150 unit envelope
        assert_eq!(set.len(), 1);

        while now < 1.6 - 1e-6 {
            set.update(0.05, now, camera);
            now += 0.05;
        }
        // ~160 units out: culled
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut set = ProjectileSet::default();
        // Stationary projectile so only the clock can kill it
        let shot = plain_shot(ProjectileKind::FoamDart, 0.0);
        set.spawn_volley(&shot, Vec3::new(0.0, 1.0, -5.0), Vec3::NEG_Z, 0.0);

        let lifetime = ProjectileKind::FoamDart.spec().lifetime;
        set.update(0.016, lifetime - 0.01, Vec3::ZERO);
        assert_eq!(set.len(), 1);
        set.update(0.016, lifetime + 0.01, Vec3::ZERO);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_floor_and_ceiling_cull() {
        let mut set = ProjectileSet::default();
        let mut sinker = plain_shot(ProjectileKind::WaterBalloon, 30.0);
        sinker.gravity = 18.0;
        set.spawn_volley(&sinker, Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 0.0);

        let mut now = 0.0;
        for _ in 0..300 {
            set.update(0.016, now, Vec3::ZERO);
            now += 0.016;
            if set.is_empty() {
                break;
            }
        }
        assert!(set.is_empty(), "balloon should fall out of bounds");
    }

    #[test]
    fn test_fifo_eviction_when_saturated() {
        let mut set = ProjectileSet::new(3);
        let shot = plain_shot(ProjectileKind::Pebble, 0.0);
        for i in 0..4 {
            set.spawn_volley(&shot, Vec3::new(i as f32, 1.0, 0.0), Vec3::NEG_Z, i as f32);
        }
        assert_eq!(set.len(), 3);
        // The t=0 spawn was evicted; survivors are 1..=3
        let oldest = set.get(0).unwrap();
        assert_eq!(oldest.spawn_time, 1.0);
    }

    #[test]
    fn test_volley_spawns_count_projectiles() {
        let mut set = ProjectileSet::default();
        let mut burst = plain_shot(ProjectileKind::Gumball, 70.0);
        burst.count = 6;
        burst.spread = 0.12;
        set.spawn_volley(&burst, Vec3::ZERO, Vec3::NEG_Z, 0.0);
        assert_eq!(set.len(), 6);
        for p in set.iter() {
            // Scatter keeps launch speed intact
            assert!((p.velocity.length() - 70.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_non_piercing_hit_consumes() {
        let mut set = ProjectileSet::default();
        let shot = plain_shot(ProjectileKind::Pebble, 0.0);
        set.spawn_volley(&shot, Vec3::new(0.0, 1.0, -5.0), Vec3::NEG_Z, 0.0);

        assert!(set.register_hit(0));
        assert!(!set.get(0).unwrap().active);
        set.update(0.016, 0.016, Vec3::ZERO);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_piercing_hit_flies_on() {
        let mut set = ProjectileSet::default();
        let mut shot = plain_shot(ProjectileKind::Plunger, 0.0);
        shot.piercing = true;
        set.spawn_volley(&shot, Vec3::new(0.0, 1.0, -5.0), Vec3::NEG_Z, 0.0);

        assert!(!set.register_hit(0));
        assert!(set.get(0).unwrap().active);
        set.update(0.016, 0.016, Vec3::ZERO);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_register_hit_out_of_range_is_harmless() {
        let mut set = ProjectileSet::default();
        assert!(!set.register_hit(5));
    }

    #[test]
    fn test_fire_direction_tracks_crosshair() {
        let view = CameraView::new(
            Vec3::new(0.0, 1.5, 0.0),
            Vec3::NEG_Z,
            Vec2::new(1280.0, 720.0),
            DEFAULT_FOV_Y,
        );
        let muzzle = muzzle_position(&view);
        assert!(muzzle.y < view.position.y);
        assert!(muzzle.z < view.position.z);

        // Crosshair dead center: the shot converges on the forward axis
        let dir = fire_direction(&view, Vec2::new(640.0, 360.0), muzzle);
        assert!(dir.dot(Vec3::NEG_Z) > 0.99);

        // Crosshair nudged right: the shot bends right
        let dir = fire_direction(&view, Vec2::new(900.0, 360.0), muzzle);
        assert!(dir.x > 0.0);
    }

    #[test]
    fn test_collision_uses_combined_radius() {
        let shot = plain_shot(ProjectileKind::Pebble, 0.0);
        let mut set = ProjectileSet::default();
        set.spawn_volley(&shot, Vec3::ZERO, Vec3::NEG_Z, 0.0);
        let p = set.get(0).unwrap();

        // Pebble radius 0.12 + target radius 1.0
        assert!(check_collision(p, Vec3::new(1.0, 0.0, 0.0), 1.0));
        assert!(!check_collision(p, Vec3::new(1.5, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_scatter_zero_spread_is_exact() {
        let dir = scatter(Vec3::NEG_Z, 0.0);
        assert_eq!(dir, Vec3::NEG_Z);
    }

    #[test]
    fn test_scatter_stays_inside_cone() {
        for _ in 0..100 {
            let dir = scatter(Vec3::NEG_Z, 0.12);
            assert!((dir.length() - 1.0).abs() < 1e-5);
            let angle = dir.dot(Vec3::NEG_Z).clamp(-1.0, 1.0).acos();
            // Small-angle construction: stay comfortably inside ~2x spread
            assert!(angle < 0.25, "angle {}", angle);
        }
    }
}
