//! Aim assist - crosshair placement and sticky target locks
//!
//! Each frame the host hands over the camera, the raw crosshair input, and
//! the candidate enemy/obstacle lists; the assist either keeps tracking its
//! locked target or rescans for the best-scoring one and parks the crosshair
//! on it. The lock is a plain `Entity` id - the target itself is owned
//! elsewhere and may die at any time, in which case the lock silently clears.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::view::CameraView;

/// Crosshair margin used when no profile supplies one
const DEFAULT_MARGIN_PX: f32 = 24.0;

/// How far behind the camera a target may sit before the lock drops
/// (fast carts that just blew past the player)
const BEHIND_TOLERANCE: f32 = 10.0;

/// Scoring constants for one candidate class.
///
/// Targets ahead and inside the path corridor get the bonus branch; targets
/// ahead but off to the side get the much steeper off-path branch; anything
/// else falls back (enemies) or is ruled out entirely (obstacles).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScoreTable {
    pub max_range: f32,
    pub in_path_threshold: f32,
    pub in_path_bonus: f32,
    pub distance_penalty: f32,
    pub lateral_penalty: f32,
    pub off_path_base: f32,
    pub off_path_distance_penalty: f32,
    pub off_path_lateral_penalty: f32,
    /// Last-resort score for targets neither ahead nor in range;
    /// `None` means such targets are never locked.
    pub fallback: Option<f32>,
}

impl ScoreTable {
    pub fn enemies() -> Self {
        Self {
            max_range: 60.0,
            in_path_threshold: 4.0,
            in_path_bonus: 100.0,
            distance_penalty: 1.0,
            lateral_penalty: 2.0,
            off_path_base: 50.0,
            off_path_distance_penalty: 2.0,
            off_path_lateral_penalty: 5.0,
            fallback: Some(-500.0),
        }
    }

    pub fn obstacles() -> Self {
        Self {
            max_range: 40.0,
            in_path_threshold: 3.0,
            in_path_bonus: 60.0,
            distance_penalty: 1.5,
            lateral_penalty: 3.0,
            off_path_base: 20.0,
            off_path_distance_penalty: 2.0,
            off_path_lateral_penalty: 5.0,
            fallback: None,
        }
    }
}

/// Tuning knobs for one aim-assist behavior profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AimProfile {
    /// Keep tracking a locked target while it stays valid instead of
    /// rescanning every frame
    pub sticky: bool,
    /// Crosshair keep-out margin from the viewport edges, in pixels
    pub margin_px: f32,
    /// Vertical aim offset when a target doesn't report its own height
    pub lock_height: f32,
    pub enemy: ScoreTable,
    pub obstacle: ScoreTable,
}

impl Default for AimProfile {
    fn default() -> Self {
        Self {
            sticky: true,
            margin_px: DEFAULT_MARGIN_PX,
            lock_height: 1.5,
            enemy: ScoreTable::enemies(),
            obstacle: ScoreTable::obstacles(),
        }
    }
}

/// One scorable target, snapshotted by the host for this frame
#[derive(Clone, Copy, Debug)]
pub struct AimCandidate {
    pub entity: Entity,
    pub position: Vec3,
    /// Aim-point height above the base position; `None` uses the profile default
    pub height: Option<f32>,
    pub alive: bool,
}

/// Line-of-sight query supplied by the host: true when nothing solid sits
/// between the two points.
pub type LineOfSight<'a> = &'a dyn Fn(Vec3, Vec3) -> bool;

/// Crosshair state plus the current target lock
#[derive(Resource)]
pub struct AimAssist {
    pub crosshair: Vec2,
    pub locked: Option<Entity>,
    /// Active behavior profile; `None` disables assist entirely
    pub profile: Option<AimProfile>,
}

impl Default for AimAssist {
    fn default() -> Self {
        Self {
            crosshair: Vec2::ZERO,
            locked: None,
            profile: Some(AimProfile::default()),
        }
    }
}

impl AimAssist {
    /// Run one frame of aim assist. `eligible` is whether the equipped
    /// weapon accepts assistance at all; with assist inactive the crosshair
    /// just follows raw input. The crosshair is clamped into the viewport
    /// margin every frame no matter what.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        view: &CameraView,
        player_pos: Vec3,
        raw_crosshair: Vec2,
        eligible: bool,
        enemies: &[AimCandidate],
        obstacles: &[AimCandidate],
        line_of_sight: Option<LineOfSight<'_>>,
    ) {
        self.crosshair = raw_crosshair;
        let margin = self
            .profile
            .as_ref()
            .map_or(DEFAULT_MARGIN_PX, |p| p.margin_px);

        match self.profile.clone() {
            Some(profile) if eligible => {
                self.run_assist(&profile, view, player_pos, enemies, obstacles, line_of_sight);
            }
            _ => self.locked = None,
        }

        self.crosshair = clamp_crosshair(self.crosshair, view.viewport, margin);
    }

    fn run_assist(
        &mut self,
        profile: &AimProfile,
        view: &CameraView,
        player_pos: Vec3,
        enemies: &[AimCandidate],
        obstacles: &[AimCandidate],
        line_of_sight: Option<LineOfSight<'_>>,
    ) {
        // Sticky: ride the existing lock while it holds up.
        if profile.sticky {
            if let Some(locked) = self.locked {
                let still_there = enemies
                    .iter()
                    .chain(obstacles.iter())
                    .find(|c| c.entity == locked);
                if let Some(c) = still_there {
                    if is_target_valid(view, c, profile.lock_height, line_of_sight) {
                        self.crosshair = aim_screen_point(view, c, profile.lock_height);
                        return;
                    }
                }
            }
        }

        self.locked = None;

        // Rescan. Ties go to the first candidate seen; enemies are scanned
        // before obstacles.
        let mut best: Option<(f32, AimCandidate)> = None;
        for c in enemies {
            if !is_target_valid(view, c, profile.lock_height, line_of_sight) {
                continue;
            }
            let score = score_candidate(&profile.enemy, view, player_pos, c.position);
            if score == f32::NEG_INFINITY {
                continue;
            }
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, *c));
            }
        }
        for c in obstacles {
            if !is_target_valid(view, c, profile.lock_height, line_of_sight) {
                continue;
            }
            let score = score_candidate(&profile.obstacle, view, player_pos, c.position);
            if score == f32::NEG_INFINITY {
                continue;
            }
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, *c));
            }
        }

        if let Some((_, target)) = best {
            self.locked = Some(target.entity);
            self.crosshair = aim_screen_point(view, &target, profile.lock_height);
        }
    }
}

/// Score one candidate against a table. Pure: same inputs, same score.
pub fn score_candidate(
    table: &ScoreTable,
    view: &CameraView,
    player_pos: Vec3,
    target_pos: Vec3,
) -> f32 {
    let z = view.forward_distance(target_pos);
    let rel = target_pos - player_pos;
    let lateral = (rel - view.forward * rel.dot(view.forward)).length();

    let ahead = z > 0.0 && z < table.max_range;
    if ahead && lateral < table.in_path_threshold {
        // Directly ahead and centered: the jackpot branch
        table.in_path_bonus - z * table.distance_penalty - lateral * table.lateral_penalty
    } else if ahead {
        table.off_path_base
            - z * table.off_path_distance_penalty
            - lateral * table.off_path_lateral_penalty
    } else {
        match table.fallback {
            Some(base) => base - target_pos.distance(view.position),
            None => f32::NEG_INFINITY,
        }
    }
}

/// Whether a candidate may be locked this frame
pub fn is_target_valid(
    view: &CameraView,
    candidate: &AimCandidate,
    default_height: f32,
    line_of_sight: Option<LineOfSight<'_>>,
) -> bool {
    if !candidate.alive {
        return false;
    }
    let aim_point = aim_point(candidate, default_height);
    let (_, depth) = view.world_to_screen(aim_point);
    if !(depth > 0.0 && depth < 1.0) {
        return false;
    }
    if view.forward_distance(candidate.position) < -BEHIND_TOLERANCE {
        return false;
    }
    if let Some(los) = line_of_sight {
        if !los(view.position, aim_point) {
            return false;
        }
    }
    true
}

fn aim_point(candidate: &AimCandidate, default_height: f32) -> Vec3 {
    candidate.position + Vec3::Y * candidate.height.unwrap_or(default_height)
}

fn aim_screen_point(view: &CameraView, candidate: &AimCandidate, default_height: f32) -> Vec2 {
    view.world_to_screen(aim_point(candidate, default_height)).0
}

fn clamp_crosshair(p: Vec2, viewport: Vec2, margin: f32) -> Vec2 {
    p.clamp(Vec2::splat(margin), viewport - margin)
}
