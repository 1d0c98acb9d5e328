//! Optional run-time tuning overrides
//!
//! Reads `assets/tuning.ron` at startup so aim feel can be iterated without
//! a rebuild. Missing or unparsable files fall back to the compiled-in
//! defaults; a bad file never stops the run.

use bevy::prelude::*;
use mallhell_core::{AimAssist, AimProfile};
use serde::Deserialize;

/// Checked relative to both the crate dir and the workspace root
const TUNING_PATHS: &[&str] = &["assets/tuning.ron", "mallhell-game/assets/tuning.ron"];

#[derive(Deserialize, Debug)]
pub struct TuningFile {
    pub version: u32,
    pub aim: AimProfile,
}

pub fn load_tuning() -> Result<AimProfile, String> {
    for path in TUNING_PATHS {
        let Ok(text) = std::fs::read_to_string(path) else {
            continue;
        };
        let file: TuningFile =
            ron::from_str(&text).map_err(|e| format!("failed to parse {}: {}", path, e))?;
        if file.version != 1 {
            return Err(format!(
                "unsupported tuning version {} in {} (expected 1)",
                file.version, path
            ));
        }
        return Ok(file.aim);
    }
    Err("no tuning.ron found".to_string())
}

/// Startup: swap the built-in aim profile for the tuned one if present
pub fn apply_tuning(mut aim: ResMut<AimAssist>) {
    match load_tuning() {
        Ok(profile) => {
            info!("Aim tuning loaded from tuning.ron");
            aim.profile = Some(profile);
        }
        Err(reason) => info!("Using built-in aim tuning ({})", reason),
    }
}
