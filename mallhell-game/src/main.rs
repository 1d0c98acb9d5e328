//! Mall Hell - headless demo run of the weapon/projectile pipeline
//!
//! A kid in a shopping cart holds the atrium against waves of skeleton-driven
//! carts. No renderer: the fixed-tick loop drives the full gameplay core
//! (input -> aim assist -> weapons -> projectiles -> hits -> pickups) and
//! narrates the run through the log.

mod config;
mod enemies;
mod input;
mod persistence;
mod pickup;
mod score;
mod systems;
mod world;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use world::Health;

pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / FIXED_TIMESTEP_HZ)
}

/// The kid in the cart: camera anchor plus hit points.
/// The cart is parked at the aisle mouth; the mall comes to you.
#[derive(Resource)]
pub struct PlayerRig {
    pub position: Vec3,
    pub yaw: f32,
    pub health: Health,
}

impl Default for PlayerRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            health: Health::new(100.0),
        }
    }
}

fn main() {
    let mut app = App::new();

    // Headless: run the main loop at the fixed tick rate, no rendering
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick_duration())));
    app.add_plugins(bevy::log::LogPlugin::default());

    app.insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ));

    app.init_resource::<PlayerRig>();
    app.init_resource::<mallhell_core::Arsenal>();
    app.init_resource::<mallhell_core::ProjectileSet>();
    app.init_resource::<mallhell_core::AimAssist>();
    app.init_resource::<input::InputState>();
    app.init_resource::<input::ScriptedSession>();
    app.init_resource::<pickup::CarePackages>();
    app.init_resource::<enemies::WaveState>();
    app.init_resource::<score::Score>();
    app.init_resource::<score::RunState>();

    app.add_systems(
        Startup,
        (
            config::apply_tuning,
            persistence::report_best_run,
            world::setup_mall,
        ),
    );

    // One frame of the pipeline, in contract order: input first, weapon
    // update before projectile spawn, projectile update before hit
    // resolution, aim settled before any fire direction is derived.
    app.add_systems(
        FixedUpdate,
        (
            input::drive_scripted_input,
            enemies::spawn_waves,
            enemies::advance_carts,
            systems::update_aim,
            systems::update_weapons,
            systems::simulate_projectiles,
            systems::resolve_hits,
            pickup::deliver_care_packages,
            pickup::magnetize_pickups,
            pickup::collect_pickups,
            enemies::cull_dead_carts,
            world::cull_dead_obstacles,
            score::end_run,
        )
            .chain(),
    );

    info!("Mall Hell: rolling into the atrium");
    app.run();
}
