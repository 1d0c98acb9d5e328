//! Per-weapon firing state machine
//!
//! One `WeaponState` lives per weapon in the arsenal. Dormant weapons keep
//! their state so re-equipping resumes where the player left off.

use super::{AmmoCapacity, FireMode, FireResult, WeaponKind};

/// Sentinel start time so a freshly built weapon can fire immediately
const FIRST_SHOT_READY: f32 = -10.0;

/// What the weapon is doing with the trigger right now
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Action {
    #[default]
    Idle,
    /// Charge weapon drawing back; tension builds toward 1.0
    Charging { tension: f32 },
    /// Auto weapon with the trigger held
    TriggerHeld,
}

/// Ammo pool for one weapon instance
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AmmoPool {
    Limited { remaining: u32 },
    Unbounded,
}

impl AmmoPool {
    pub fn is_empty(&self) -> bool {
        matches!(self, AmmoPool::Limited { remaining: 0 })
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            AmmoPool::Limited { remaining } => Some(*remaining),
            AmmoPool::Unbounded => None,
        }
    }
}

/// Mutable firing state for one weapon
#[derive(Clone, Debug)]
pub struct WeaponState {
    pub kind: WeaponKind,
    pub ammo: AmmoPool,
    pub action: Action,
    /// Time of last fire event (game time in seconds)
    pub last_fire_time: f32,
    /// Cosmetic recoil/kick animation progress, 1.0 right after a shot.
    /// Decays every update; never feeds back into firing logic.
    pub fire_anim: f32,
}

impl WeaponState {
    pub fn new(kind: WeaponKind) -> Self {
        let ammo = match kind.spec().ammo {
            AmmoCapacity::Limited(max) => AmmoPool::Limited { remaining: max },
            AmmoCapacity::Unbounded => AmmoPool::Unbounded,
        };
        Self {
            kind,
            ammo,
            action: Action::Idle,
            last_fire_time: FIRST_SHOT_READY,
            fire_anim: 0.0,
        }
    }

    /// Check if the weapon can fire (has ammo and cooldown passed)
    pub fn can_fire(&self, now: f32) -> bool {
        !self.ammo.is_empty() && (now - self.last_fire_time) >= self.kind.spec().cooldown
    }

    /// Out of ammo entirely; `can_fire` stays false until `add_ammo`
    pub fn is_reloading(&self) -> bool {
        self.ammo.is_empty()
    }

    /// Reset transient action state when this weapon becomes current.
    /// Ammo and cooldown carry over from the weapon's last outing.
    pub fn on_equip(&mut self) {
        self.action = Action::Idle;
        self.fire_anim = 0.0;
    }

    /// Force-drop any in-progress charge or held trigger so no input
    /// carries across a weapon switch.
    pub fn on_unequip(&mut self) {
        self.cancel_action();
        self.fire_anim = 0.0;
    }

    /// Trigger pressed. Charge weapons start drawing, single-shots fire
    /// immediately, autos arm and fire from `update`.
    pub fn fire_start(&mut self, now: f32) -> Option<FireResult> {
        let spec = self.kind.spec();
        match spec.fire_mode {
            FireMode::Charge => {
                // Re-pressing mid-charge keeps the built-up tension.
                if !matches!(self.action, Action::Charging { .. }) && self.can_fire(now) {
                    let min_tension = spec.charge.map(|c| c.min_tension).unwrap_or(0.0);
                    self.action = Action::Charging {
                        tension: min_tension,
                    };
                }
                None
            }
            FireMode::SingleShot => self.fire(now),
            FireMode::Auto => {
                if !self.ammo.is_empty() {
                    self.action = Action::TriggerHeld;
                }
                None
            }
        }
    }

    /// Trigger released. Only charge weapons fire here; the charge state is
    /// always cleared, and a release below minimum tension discards the
    /// draw without consuming ammo or starting the cooldown.
    pub fn fire_release(&mut self, now: f32) -> Option<FireResult> {
        match self.action {
            Action::Charging { tension } => {
                self.action = Action::Idle;
                let min_tension = self
                    .kind
                    .spec()
                    .charge
                    .map(|c| c.min_tension)
                    .unwrap_or(0.0);
                if tension >= min_tension {
                    self.fire_with_power(now, tension)
                } else {
                    None
                }
            }
            Action::TriggerHeld => {
                self.action = Action::Idle;
                None
            }
            Action::Idle => None,
        }
    }

    /// Advance per-frame state. Charge weapons build tension (and never fire
    /// here); autos produce at most one shot per tick once the cooldown
    /// allows and drop the trigger the instant ammo runs out.
    pub fn update(&mut self, dt: f32, now: f32) -> Option<FireResult> {
        let spec = self.kind.spec();
        self.fire_anim = (self.fire_anim - spec.anim_decay_per_sec * dt).max(0.0);

        match spec.fire_mode {
            FireMode::Charge => {
                if let Action::Charging { ref mut tension } = self.action {
                    let rate = spec.charge.map(|c| c.rate_per_sec).unwrap_or(0.0);
                    *tension = (*tension + rate * dt).min(1.0);
                }
                None
            }
            FireMode::Auto => {
                if self.action != Action::TriggerHeld {
                    return None;
                }
                if self.ammo.is_empty() {
                    self.action = Action::Idle;
                    return None;
                }
                if self.can_fire(now) {
                    self.fire(now)
                } else {
                    None
                }
            }
            FireMode::SingleShot => None,
        }
    }

    /// Immediately abort any charge or held trigger. Produces nothing and is
    /// a no-op on an idle weapon.
    pub fn cancel_action(&mut self) {
        self.action = Action::Idle;
    }

    /// Fire at full power if ready. Consumes ammo and starts the cooldown.
    pub fn fire(&mut self, now: f32) -> Option<FireResult> {
        self.fire_with_power(now, 1.0)
    }

    /// Fire at the given normalized power. Charge releases pass their
    /// tension here; everything else fires at 1.0.
    fn fire_with_power(&mut self, now: f32, power: f32) -> Option<FireResult> {
        if !self.can_fire(now) {
            return None;
        }
        let spec = self.kind.spec();

        if let AmmoPool::Limited { ref mut remaining } = self.ammo {
            *remaining = remaining.saturating_sub(spec.consume_per_shot);
        }
        // Running dry mid-action drops the trigger/draw on the spot.
        if self.ammo.is_empty() {
            self.action = Action::Idle;
        }

        // Keep rapid fire on the cooldown grid instead of snapping to tick
        // times (a 50ms cooldown at 16ms ticks must still land 20 rounds per
        // second). After a long idle stretch the clock re-bases to `now` so
        // the weapon doesn't burst-fire to catch up.
        self.last_fire_time = if spec.cooldown > 0.0 && now - self.last_fire_time < 2.0 * spec.cooldown
        {
            self.last_fire_time + spec.cooldown
        } else {
            now
        };
        self.fire_anim = 1.0;

        Some(FireResult {
            kind: spec.projectile,
            speed: spec.speed_min + (spec.speed_max - spec.speed_min) * power,
            power,
            damage: spec.damage,
            count: spec.count,
            spread: spec.spread,
            gravity: spec.gravity,
            splash: spec.splash,
            piercing: spec.piercing,
        })
    }

    /// Top up a limited pool, clamped at capacity. Returns the amount
    /// actually added (0 for unbounded weapons).
    pub fn add_ammo(&mut self, amount: u32) -> u32 {
        let max = match self.kind.spec().ammo {
            AmmoCapacity::Limited(max) => max,
            AmmoCapacity::Unbounded => return 0,
        };
        if let AmmoPool::Limited { ref mut remaining } = self.ammo {
            let added = amount.min(max - *remaining);
            *remaining += added;
            added
        } else {
            0
        }
    }

    /// HUD gauge: charge tension for charge weapons, ammo fraction for the
    /// rest (1.0 for unbounded pools).
    pub fn gauge(&self) -> f32 {
        let spec = self.kind.spec();
        if spec.fire_mode == FireMode::Charge {
            if let Action::Charging { tension } = self.action {
                return tension;
            }
            return 0.0;
        }
        match (self.ammo, spec.ammo) {
            (AmmoPool::Limited { remaining }, AmmoCapacity::Limited(max)) if max > 0 => {
                remaining as f32 / max as f32
            }
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::WeaponKind;

    const DT: f32 = 0.016;

    #[test]
    fn test_cooldown_blocks_second_shot() {
        let mut w = WeaponState::new(WeaponKind::PlungerBow);
        assert!(w.fire(0.0).is_some());
        // Inside the 0.6s cooldown
        assert!(w.fire(0.3).is_none());
        // Past it
        assert!(w.fire(0.61).is_some());
    }

    #[test]
    fn test_ammo_conservation() {
        let mut w = WeaponState::new(WeaponKind::GumballScatter);
        let mut now = 0.0;
        for _ in 0..5 {
            assert!(w.fire(now).is_some());
            now += 1.0;
        }
        assert_eq!(w.ammo.remaining(), Some(16 - 5));
    }

    #[test]
    fn test_empty_weapon_never_fires() {
        let mut w = WeaponState::new(WeaponKind::PlungerBow);
        let mut now = 0.0;
        for _ in 0..10 {
            w.fire(now);
            now += 1.0;
        }
        assert_eq!(w.ammo.remaining(), Some(0));
        assert!(w.is_reloading());
        // Cooldown long expired, but ammo gates the shot
        assert!(!w.can_fire(now + 100.0));
        assert!(w.fire_start(now + 100.0).is_none());

        w.add_ammo(4);
        assert_eq!(w.ammo.remaining(), Some(4));
        assert!(w.fire_start(now + 100.0).is_some());
    }

    #[test]
    fn test_add_ammo_clamps_at_capacity() {
        let mut w = WeaponState::new(WeaponKind::DartBlaster);
        assert_eq!(w.add_ammo(99), 0); // already full
        w.fire(0.0);
        w.fire(1.0);
        assert_eq!(w.add_ammo(99), 2);
        assert_eq!(w.ammo.remaining(), Some(60));
    }

    #[test]
    fn test_add_ammo_noop_for_unbounded() {
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        assert_eq!(w.add_ammo(10), 0);
        assert_eq!(w.ammo, AmmoPool::Unbounded);
    }

    #[test]
    fn test_charge_release_scales_speed() {
        // cooldown 0.3, min_tension 0.2, rate 1.2/s, speeds 60..180
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        w.fire_start(0.0);
        // 0.5s of charging in small steps
        let mut now = 0.0;
        while now < 0.5 - 1e-6 {
            w.update(0.01, now);
            now += 0.01;
        }
        let result = w.fire_release(now).expect("charged release fires");
        // tension = 0.2 + 1.2 * 0.5 = 0.8 -> speed = 60 + 120 * 0.8 = 156
        assert!((result.power - 0.8).abs() < 0.02, "power {}", result.power);
        assert!((result.speed - 156.0).abs() < 2.0, "speed {}", result.speed);
    }

    #[test]
    fn test_charge_clamps_at_full_tension() {
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        w.fire_start(0.0);
        // Hold way past full draw
        let mut now = 0.0;
        for _ in 0..1000 {
            w.update(DT, now);
            now += DT;
        }
        if let Action::Charging { tension } = w.action {
            assert!((tension - 1.0).abs() < 1e-6);
        } else {
            panic!("still charging");
        }
        let result = w.fire_release(now).unwrap();
        assert!((result.speed - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_release_at_exact_min_tension_fires() {
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        w.fire_start(0.0);
        // Release immediately: tension is exactly min_tension
        let result = w.fire_release(0.0);
        assert!(result.is_some());
        let result = result.unwrap();
        assert!((result.power - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_restart_while_charging_keeps_tension() {
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        w.fire_start(0.0);
        w.update(0.5, 0.5);
        let before = match w.action {
            Action::Charging { tension } => tension,
            _ => panic!("not charging"),
        };
        w.fire_start(0.5);
        let after = match w.action {
            Action::Charging { tension } => tension,
            _ => panic!("not charging"),
        };
        assert_eq!(before, after);
    }

    #[test]
    fn test_cancel_discards_charge() {
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        w.fire_start(0.0);
        w.update(0.5, 0.5);
        w.cancel_action();
        assert_eq!(w.action, Action::Idle);
        // Release after cancel produces nothing
        assert!(w.fire_release(0.6).is_none());
    }

    #[test]
    fn test_cancel_idempotent_on_idle() {
        let mut w = WeaponState::new(WeaponKind::Slingshot);
        let before = w.clone();
        w.cancel_action();
        w.cancel_action();
        assert_eq!(w.action, before.action);
        assert_eq!(w.last_fire_time, before.last_fire_time);
    }

    #[test]
    fn test_auto_fire_rate() {
        // 60 rounds, 50ms cooldown: one second of held trigger at 16ms
        // ticks lands exactly 20 shots.
        let mut w = WeaponState::new(WeaponKind::DartBlaster);
        w.fire_start(0.0);
        let mut shots = 0;
        let mut now = 0.0;
        while now < 1.0 - 1e-6 {
            if w.update(DT, now).is_some() {
                shots += 1;
            }
            now += DT;
        }
        assert_eq!(shots, 20);
        assert_eq!(w.ammo.remaining(), Some(40));
    }

    #[test]
    fn test_auto_stops_when_dry() {
        let mut w = WeaponState::new(WeaponKind::DartBlaster);
        // Burn down to 1 round
        if let AmmoPool::Limited { ref mut remaining } = w.ammo {
            *remaining = 1;
        }
        w.fire_start(0.0);
        assert_eq!(w.action, Action::TriggerHeld);
        let result = w.update(DT, 1.0);
        assert!(result.is_some());
        // Trigger dropped the instant the pool hit zero
        assert_eq!(w.action, Action::Idle);
        assert!(w.update(DT, 2.0).is_none());
    }

    #[test]
    fn test_fire_anim_decays_independently() {
        let mut w = WeaponState::new(WeaponKind::PlungerBow);
        w.fire(0.0);
        assert_eq!(w.fire_anim, 1.0);
        w.update(0.2, 0.2);
        assert!(w.fire_anim < 1.0);
        w.update(10.0, 10.2);
        assert_eq!(w.fire_anim, 0.0);
    }

    #[test]
    fn test_gauge_reports_tension_then_ammo_fraction() {
        let mut charge = WeaponState::new(WeaponKind::Slingshot);
        assert_eq!(charge.gauge(), 0.0);
        charge.fire_start(0.0);
        charge.update(0.25, 0.25);
        assert!((charge.gauge() - 0.5).abs() < 0.01);

        let mut gun = WeaponState::new(WeaponKind::DartBlaster);
        gun.fire(0.0);
        assert!((gun.gauge() - 59.0 / 60.0).abs() < 1e-6);
    }
}
