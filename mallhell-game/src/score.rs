//! Run scoring and the end-of-run summary

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::enemies::WaveState;
use crate::input::ScriptedSession;
use crate::persistence;
use crate::PlayerRig;

#[derive(Resource, Default)]
pub struct Score {
    pub points: u32,
    pub kills: u32,
    pub hits: u32,
    pub shots: u32,
}

impl Score {
    pub fn accuracy(&self) -> f32 {
        if self.shots == 0 {
            0.0
        } else {
            self.hits as f32 / self.shots as f32
        }
    }
}

#[derive(Resource, Default)]
pub struct RunState {
    pub over: bool,
}

/// Wrap up when the player dies or the session script runs out: print the
/// summary, persist a new best run, and quit the app.
pub fn end_run(
    mut run: ResMut<RunState>,
    mut exit: MessageWriter<AppExit>,
    rig: Res<PlayerRig>,
    script: Res<ScriptedSession>,
    score: Res<Score>,
    waves: Res<WaveState>,
) {
    if run.over {
        return;
    }
    let died = rig.health.is_dead();
    if !died && !script.finished {
        return;
    }
    run.over = true;

    let ending = if died { "flattened" } else { "rolled to safety" };
    info!(
        "Run over ({}): {} pts, {} kills, {}/{} shots on target ({:.0}% accuracy), reached wave {}",
        ending,
        score.points,
        score.kills,
        score.hits,
        score.shots,
        score.accuracy() * 100.0,
        waves.wave
    );

    match persistence::record_run(&score, waves.wave) {
        Ok(Some(points)) => info!("New best run saved: {} pts", points),
        Ok(None) => {}
        Err(e) => warn!("Couldn't save best run: {}", e),
    }

    exit.write(AppExit::Success);
}
