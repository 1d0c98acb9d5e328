//! Fire-trigger input state and the scripted session that drives it
//!
//! The shell is headless, so instead of key events a deterministic timeline
//! plays the part of the input layer: press/release/cancel at fixed times.
//! Everything downstream only sees `InputState`, exactly as it would with a
//! real mouse behind it.

use bevy::prelude::*;

use crate::systems::VIEWPORT;

/// Per-tick trigger state with edge flags
#[derive(Resource)]
pub struct InputState {
    pub fire_held: bool,
    /// Trigger went down this tick
    pub fire_pressed: bool,
    /// Trigger came up this tick
    pub fire_released: bool,
    /// Abort the current action without firing (weapon stow, pause)
    pub cancel_requested: bool,
    /// Where the player is pointing before aim assist has its say
    pub raw_crosshair: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            fire_held: false,
            fire_pressed: false,
            fire_released: false,
            cancel_requested: false,
            raw_crosshair: VIEWPORT * 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ScriptAction {
    FireDown,
    FireUp,
    CancelFire,
    End,
}

/// The demo timeline: timestamps paired with trigger actions
#[derive(Resource)]
pub struct ScriptedSession {
    events: Vec<(f32, ScriptAction)>,
    cursor: usize,
    pub finished: bool,
}

impl Default for ScriptedSession {
    fn default() -> Self {
        let mut events = vec![
            // Slingshot: one full draw, then a draw that gets cancelled
            (0.5, ScriptAction::FireDown),
            (1.4, ScriptAction::FireUp),
            (1.8, ScriptAction::FireDown),
            (2.1, ScriptAction::CancelFire),
            // Dart blaster arrives ~2.5; hold the trigger through a wave
            (3.0, ScriptAction::FireDown),
            (4.5, ScriptAction::FireUp),
            // Gumball scatter: two quick bursts
            (5.8, ScriptAction::FireDown),
            (5.9, ScriptAction::FireUp),
            (6.8, ScriptAction::FireDown),
            (6.9, ScriptAction::FireUp),
            // Balloon bomber: one long lob
            (8.0, ScriptAction::FireDown),
            (9.2, ScriptAction::FireUp),
            // Plunger bow: two skill shots
            (10.5, ScriptAction::FireDown),
            (10.6, ScriptAction::FireUp),
            (11.3, ScriptAction::FireDown),
            (11.4, ScriptAction::FireUp),
        ];
        // Back on the slingshot: steady charge shots for the rest of the run
        let mut t = 12.5;
        while t < 28.0 {
            events.push((t, ScriptAction::FireDown));
            events.push((t + 1.0, ScriptAction::FireUp));
            t += 2.0;
        }
        events.push((30.0, ScriptAction::End));

        Self {
            events,
            cursor: 0,
            finished: false,
        }
    }
}

/// Feed due script events into the input state. Edge flags last one tick.
pub fn drive_scripted_input(
    mut input: ResMut<InputState>,
    mut script: ResMut<ScriptedSession>,
    time: Res<Time>,
) {
    input.fire_pressed = false;
    input.fire_released = false;
    input.cancel_requested = false;

    let now = time.elapsed_secs();
    while script.cursor < script.events.len() && script.events[script.cursor].0 <= now {
        let (_, action) = script.events[script.cursor];
        script.cursor += 1;
        match action {
            ScriptAction::FireDown => {
                if !input.fire_held {
                    input.fire_pressed = true;
                }
                input.fire_held = true;
            }
            ScriptAction::FireUp => {
                if input.fire_held {
                    input.fire_released = true;
                }
                input.fire_held = false;
            }
            ScriptAction::CancelFire => {
                input.cancel_requested = true;
                input.fire_held = false;
            }
            ScriptAction::End => script.finished = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_events_are_ordered() {
        let script = ScriptedSession::default();
        for pair in script.events.windows(2) {
            assert!(pair[0].0 <= pair[1].0, "{:?} after {:?}", pair[0], pair[1]);
        }
    }
}
