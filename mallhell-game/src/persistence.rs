//! Best-run persistence - disk I/O for the local high score
//!
//! Bincode on disk with an atomic write (temp file + rename) so a crash
//! mid-save can't corrupt the record.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::score::Score;

pub const RECORD_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BestRun {
    pub version: u32,
    pub points: u32,
    pub kills: u32,
    pub wave: u32,
}

fn record_path() -> PathBuf {
    PathBuf::from("saves/highscore.bin")
}

pub fn load_best_run() -> Result<BestRun, String> {
    let path = record_path();
    if !path.exists() {
        return Err(format!("no record at {}", path.display()));
    }

    let bytes = std::fs::read(&path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let record: BestRun = bincode::deserialize(&bytes)
        .map_err(|e| format!("failed to deserialize {}: {}", path.display(), e))?;

    if record.version != RECORD_VERSION {
        return Err(format!(
            "record version mismatch: found v{}, expected v{}",
            record.version, RECORD_VERSION
        ));
    }

    Ok(record)
}

pub fn save_best_run(record: &BestRun) -> Result<(), String> {
    let path = record_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| format!("failed to create {}: {}", dir.display(), e))?;
    }

    let bytes = bincode::serialize(record).map_err(|e| format!("serialize error: {}", e))?;

    // Atomic write: temp file then rename
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &bytes)
        .map_err(|e| format!("failed to write {}: {}", temp_path.display(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| format!("failed to rename {}: {}", temp_path.display(), e))?;

    Ok(())
}

/// Persist the finished run if it beats the saved record.
/// Returns the new record's points when one was written.
pub fn record_run(score: &Score, wave: u32) -> Result<Option<u32>, String> {
    let best_points = load_best_run().map(|r| r.points).unwrap_or(0);
    if score.points <= best_points {
        return Ok(None);
    }
    save_best_run(&BestRun {
        version: RECORD_VERSION,
        points: score.points,
        kills: score.kills,
        wave,
    })?;
    Ok(Some(score.points))
}

/// Startup: tell the player what they're up against
pub fn report_best_run() {
    match load_best_run() {
        Ok(record) => info!(
            "Best run so far: {} pts, {} kills (wave {})",
            record.points, record.kills, record.wave
        ),
        Err(reason) => info!("No best run yet ({})", reason),
    }
}
