//! Shared world-space components and the mall floor itself
//!
//! The shell has no renderer, so "the mall" is just positions: aisle clutter
//! the player can shoot (and aim assist can lock) plus the components every
//! placed thing shares.

use bevy::prelude::*;

/// World position for anything placed on the mall floor
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct WorldPos(pub Vec3);

/// Health for damageable entities
#[derive(Component, Clone, Debug)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage; returns true if this was the killing blow
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = !self.is_dead();
        self.current = (self.current - amount).max(0.0);
        was_alive && self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Destructible mall clutter: display stands, pallet stacks, bargain bins
#[derive(Component, Clone, Copy, Debug)]
pub struct MallObstacle {
    /// Collision + aim radius
    pub radius: f32,
    /// Aim-point height for the assist
    pub height: f32,
    /// Points for smashing it
    pub score: u32,
}

/// Place the aisle clutter for the run. Two loose rows flanking the player's
/// lane, plus a couple of center-aisle bins to shoot around.
pub fn setup_mall(mut commands: Commands) {
    let stands = [
        Vec3::new(-6.0, 0.0, -18.0),
        Vec3::new(6.5, 0.0, -26.0),
        Vec3::new(-7.0, 0.0, -38.0),
        Vec3::new(5.5, 0.0, -47.0),
    ];
    for pos in stands {
        commands.spawn((
            MallObstacle {
                radius: 1.2,
                height: 2.0,
                score: 10,
            },
            WorldPos(pos),
            Health::new(30.0),
        ));
    }

    let bins = [Vec3::new(1.5, 0.0, -30.0), Vec3::new(-2.0, 0.0, -52.0)];
    for pos in bins {
        commands.spawn((
            MallObstacle {
                radius: 0.9,
                height: 1.0,
                score: 5,
            },
            WorldPos(pos),
            Health::new(15.0),
        ));
    }

    info!("Mall floor set: {} obstacles placed", stands.len() + bins.len());
}

/// Sweep up smashed clutter and award its points
pub fn cull_dead_obstacles(
    mut commands: Commands,
    mut score: ResMut<crate::score::Score>,
    obstacles: Query<(Entity, &MallObstacle, &Health)>,
) {
    for (entity, obstacle, health) in obstacles.iter() {
        if health.is_dead() {
            score.points += obstacle.score;
            info!("Obstacle smashed (+{} pts)", obstacle.score);
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_kill_reported_once() {
        let mut health = Health::new(20.0);
        assert!(!health.take_damage(10.0));
        assert!(health.take_damage(15.0));
        // Already dead; not a second kill
        assert!(!health.take_damage(5.0));
        assert_eq!(health.current, 0.0);
    }
}
