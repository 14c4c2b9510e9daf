//! Gameplay tuning
//!
//! Every value defaults to its compile-time constant in `crate::consts`.
//! A JSON document can override any subset; missing keys keep the default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Thrust acceleration along the facing direction (pixels/s²)
    pub ship_acceleration: f32,
    /// Rotation applied per key press, scaled by dt (radians/s)
    pub ship_rotation_speed: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    /// Unsigned so a hit can never heal
    pub bullet_damage: u32,
    /// Minimum seconds between shots; 0 leaves the fire rate unbounded
    pub fire_cooldown: f32,

    // === Asteroids ===
    pub health_per_radius: i32,
    /// Asteroids with a radius above this split when destroyed
    pub split_threshold: f32,
    pub split_offset: f32,
    pub asteroid_spin: f32,

    // === Scoring ===
    pub destroy_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_acceleration: SHIP_ACCELERATION,
            ship_rotation_speed: SHIP_ROTATION_SPEED,

            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            fire_cooldown: FIRE_COOLDOWN,

            health_per_radius: HEALTH_PER_RADIUS,
            split_threshold: SPLIT_THRESHOLD,
            split_offset: SPLIT_OFFSET,
            asteroid_spin: ASTEROID_SPIN,

            destroy_bonus: DESTROY_BONUS,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::debug!("Loaded tuning overrides: {:?}", tuning);
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Whether a shot may be fired with `cooldown` seconds still pending
    pub fn can_fire(&self, cooldown: f32) -> bool {
        self.fire_cooldown <= 0.0 || cooldown <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bullet_speed": 120.0, "split_threshold": 8 }"#)
            .expect("valid json");
        assert_eq!(tuning.bullet_speed, 120.0);
        assert_eq!(tuning.split_threshold, 8.0);
        assert_eq!(tuning.bullet_damage, BULLET_DAMAGE);
        assert_eq!(tuning.destroy_bonus, DESTROY_BONUS);
    }

    #[test]
    fn test_negative_damage_is_rejected() {
        assert!(Tuning::from_json(r#"{ "bullet_damage": -50 }"#).is_err());
        let tuning = Tuning::from_json(r#"{ "bullet_damage": 0 }"#).expect("valid json");
        assert_eq!(tuning.bullet_damage, 0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ bullet_speed: }").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            fire_cooldown: 0.25,
            ..Default::default()
        };
        let json = tuning.to_json().expect("serializable");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_fire_rate_unbounded_by_default() {
        let tuning = Tuning::default();
        assert!(tuning.can_fire(10.0));

        let limited = Tuning {
            fire_cooldown: 0.2,
            ..Default::default()
        };
        assert!(!limited.can_fire(0.1));
        assert!(limited.can_fire(0.0));
    }
}
