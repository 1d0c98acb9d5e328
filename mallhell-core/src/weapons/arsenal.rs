//! The player's weapon roster and the single point of control over
//! "the weapon currently in hand".
//!
//! Every instance is built once at session start and keeps its own ammo for
//! the whole run; equipping only resets transient action state. All trigger
//! and frame calls forward to the equipped instance, and every entry point
//! degrades to a neutral result when nothing is equipped.

use bevy::prelude::*;
use std::collections::HashMap;

use super::state::WeaponState;
use super::{FireResult, WeaponKind};

#[derive(Resource)]
pub struct Arsenal {
    weapons: HashMap<WeaponKind, WeaponState>,
    equipped: Option<WeaponKind>,
}

impl Arsenal {
    /// Build an arsenal from a fixed roster, equipping the first entry.
    pub fn new(roster: &[WeaponKind]) -> Self {
        let weapons = roster
            .iter()
            .map(|&kind| (kind, WeaponState::new(kind)))
            .collect();
        let mut arsenal = Self {
            weapons,
            equipped: None,
        };
        if let Some(&first) = roster.first() {
            arsenal.equip(first);
        }
        arsenal
    }

    /// Full roster with the slingshot in hand
    pub fn standard() -> Self {
        Self::new(&WeaponKind::all())
    }

    /// Switch weapons. Fails (keeping the current weapon) if the kind is not
    /// in the roster. The outgoing weapon drops any in-progress charge or
    /// held trigger; the incoming one starts idle with its ammo untouched.
    pub fn equip(&mut self, kind: WeaponKind) -> bool {
        if !self.weapons.contains_key(&kind) {
            return false;
        }
        if let Some(prev) = self.equipped {
            if let Some(weapon) = self.weapons.get_mut(&prev) {
                weapon.on_unequip();
            }
        }
        self.equipped = Some(kind);
        if let Some(weapon) = self.weapons.get_mut(&kind) {
            weapon.on_equip();
        }
        true
    }

    pub fn equipped_kind(&self) -> Option<WeaponKind> {
        self.equipped
    }

    pub fn equipped(&self) -> Option<&WeaponState> {
        self.equipped.and_then(|kind| self.weapons.get(&kind))
    }

    fn equipped_mut(&mut self) -> Option<&mut WeaponState> {
        let kind = self.equipped?;
        self.weapons.get_mut(&kind)
    }

    /// Whether aim assist should steer the crosshair this frame
    pub fn aim_assist_ready(&self) -> bool {
        self.equipped()
            .map(|w| w.kind.spec().aim_assist_eligible)
            .unwrap_or(false)
    }

    // --- Trigger/frame delegation ---

    pub fn fire_start(&mut self, now: f32) -> Option<FireResult> {
        self.equipped_mut().and_then(|w| w.fire_start(now))
    }

    pub fn fire_release(&mut self, now: f32) -> Option<FireResult> {
        self.equipped_mut().and_then(|w| w.fire_release(now))
    }

    pub fn update(&mut self, dt: f32, now: f32) -> Option<FireResult> {
        self.equipped_mut().and_then(|w| w.update(dt, now))
    }

    pub fn cancel_action(&mut self) {
        if let Some(weapon) = self.equipped_mut() {
            weapon.cancel_action();
        }
    }

    pub fn can_fire(&self, now: f32) -> bool {
        self.equipped().map(|w| w.can_fire(now)).unwrap_or(false)
    }

    pub fn fire(&mut self, now: f32) -> Option<FireResult> {
        self.equipped_mut().and_then(|w| w.fire(now))
    }

    pub fn gauge(&self) -> f32 {
        self.equipped().map(|w| w.gauge()).unwrap_or(0.0)
    }

    pub fn is_reloading(&self) -> bool {
        self.equipped().map(|w| w.is_reloading()).unwrap_or(false)
    }

    /// Top up a specific weapon's pool (it does not have to be in hand);
    /// pickups call this. Returns the rounds actually added.
    pub fn add_ammo(&mut self, kind: WeaponKind, amount: u32) -> u32 {
        self.weapons
            .get_mut(&kind)
            .map(|w| w.add_ammo(amount))
            .unwrap_or(0)
    }

    /// Inspect any roster weapon (HUD / tests)
    pub fn weapon(&self, kind: WeaponKind) -> Option<&WeaponState> {
        self.weapons.get(&kind)
    }
}

impl Default for Arsenal {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::state::Action;

    #[test]
    fn test_equip_unknown_kind_keeps_current() {
        let mut arsenal = Arsenal::new(&[WeaponKind::Slingshot]);
        assert_eq!(arsenal.equipped_kind(), Some(WeaponKind::Slingshot));
        assert!(!arsenal.equip(WeaponKind::PlungerBow));
        assert_eq!(arsenal.equipped_kind(), Some(WeaponKind::Slingshot));
    }

    #[test]
    fn test_ammo_persists_across_equips() {
        let mut arsenal = Arsenal::standard();
        arsenal.equip(WeaponKind::PlungerBow);
        arsenal.fire(0.0);
        arsenal.fire(1.0);
        assert_eq!(
            arsenal.equipped().unwrap().ammo.remaining(),
            Some(8)
        );

        arsenal.equip(WeaponKind::DartBlaster);
        arsenal.equip(WeaponKind::PlungerBow);
        // Back where we left it, not refilled
        let bow = arsenal.equipped().unwrap();
        assert_eq!(bow.ammo.remaining(), Some(8));
        assert_eq!(bow.action, Action::Idle);
    }

    #[test]
    fn test_switch_discards_pending_charge() {
        let mut arsenal = Arsenal::standard();
        arsenal.fire_start(0.0);
        arsenal.update(0.5, 0.5); // slingshot drawn to ~0.8 tension

        arsenal.equip(WeaponKind::DartBlaster);
        assert_eq!(arsenal.equipped().unwrap().action, Action::Idle);

        // The old charge never fires, even after switching back
        arsenal.equip(WeaponKind::Slingshot);
        assert!(arsenal.fire_release(0.6).is_none());
    }

    #[test]
    fn test_same_kind_equip_resets_action_only() {
        let mut arsenal = Arsenal::standard();
        arsenal.equip(WeaponKind::DartBlaster);
        arsenal.fire_start(0.0);
        arsenal.update(0.016, 0.0);
        let spent = arsenal.equipped().unwrap().ammo.remaining().unwrap();
        assert!(spent < 60);

        arsenal.equip(WeaponKind::DartBlaster);
        let gun = arsenal.equipped().unwrap();
        assert_eq!(gun.action, Action::Idle);
        assert_eq!(gun.ammo.remaining(), Some(spent));
    }

    #[test]
    fn test_no_equipped_weapon_is_neutral() {
        let mut arsenal = Arsenal::new(&[]);
        assert_eq!(arsenal.equipped_kind(), None);
        assert!(arsenal.fire_start(0.0).is_none());
        assert!(arsenal.fire_release(0.0).is_none());
        assert!(arsenal.update(0.016, 0.0).is_none());
        assert!(!arsenal.can_fire(0.0));
        assert_eq!(arsenal.gauge(), 0.0);
        arsenal.cancel_action(); // must not panic
    }

    #[test]
    fn test_add_ammo_reaches_dormant_weapons() {
        let mut arsenal = Arsenal::standard();
        arsenal.equip(WeaponKind::GumballScatter);
        arsenal.fire(0.0);
        arsenal.equip(WeaponKind::Slingshot);

        assert_eq!(arsenal.add_ammo(WeaponKind::GumballScatter, 5), 1);
        assert_eq!(
            arsenal
                .weapon(WeaponKind::GumballScatter)
                .unwrap()
                .ammo
                .remaining(),
            Some(16)
        );
    }

    #[test]
    fn test_aim_assist_gating_follows_equipped_weapon() {
        let mut arsenal = Arsenal::standard();
        assert!(arsenal.aim_assist_ready());
        arsenal.equip(WeaponKind::PlungerBow);
        assert!(!arsenal.aim_assist_ready());
    }
}
