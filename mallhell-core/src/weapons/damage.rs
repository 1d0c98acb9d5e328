//! Splash damage math
//!
//! Direct-hit damage rides on the `FireResult`; the only calculation that
//! lives here is the area falloff for splash-carrying shots (water balloons).

use super::SplashSpec;

/// Linear falloff multiplier: 1.0 at the impact point, 0.0 at the rim.
fn splash_falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

/// Damage dealt to a target `distance` away from a splash impact.
/// Targets outside the radius take nothing.
pub fn splash_damage(splash: &SplashSpec, distance: f32) -> f32 {
    splash.damage * splash_falloff(distance, splash.radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLASH: SplashSpec = SplashSpec {
        radius: 4.0,
        damage: 30.0,
    };

    #[test]
    fn test_full_damage_at_center() {
        assert!((splash_damage(&SPLASH, 0.0) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_at_rim_and_beyond() {
        assert_eq!(splash_damage(&SPLASH, 4.0), 0.0);
        assert_eq!(splash_damage(&SPLASH, 10.0), 0.0);
    }

    #[test]
    fn test_linear_between() {
        let half = splash_damage(&SPLASH, 2.0);
        assert!((half - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_radius() {
        let spike = SplashSpec {
            radius: 0.0,
            damage: 30.0,
        };
        assert_eq!(splash_damage(&spike, 0.0), 0.0);
    }
}
