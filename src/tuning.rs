//! Game balance tuning
//!
//! Every gameplay constant lives here so a level can ship its own tuning
//! file. Missing fields fall back to the defaults below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Player movement and hitbox
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Spawn position (sprite top-left)
    pub spawn: Vec2,
    /// Sprite size (square)
    pub size: f32,
    /// Hitbox offset inside the sprite
    pub hitbox_offset: Vec2,
    /// Hitbox size
    pub hitbox_size: Vec2,
    /// Horizontal speed at full input deflection (units/s)
    pub run_speed: f32,
    /// Upward velocity granted by a jump
    pub jump_power: f32,
    /// Upward velocity granted by stomping an enemy
    pub bounce_power: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(100.0, 100.0),
            size: 32.0,
            hitbox_offset: Vec2::new(4.0, 9.0),
            hitbox_size: Vec2::new(20.0, 23.0),
            run_speed: 200.0,
            jump_power: 250.0,
            bounce_power: 200.0,
            gravity: 700.0,
        }
    }
}

/// Ground patroller (walks, falls, turns at walls)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPatrolTuning {
    pub size: Vec2,
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
    /// Initial horizontal velocity (negative = walking left)
    pub velocity: f32,
    pub gravity: f32,
    /// Distance walked on the ground before turning around
    pub turning_distance: f32,
}

impl Default for GroundPatrolTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(36.0, 28.0),
            hitbox_offset: Vec2::new(0.0, 9.0),
            hitbox_size: Vec2::new(30.0, 19.0),
            velocity: -20.0,
            gravity: 580.0,
            turning_distance: 100.0,
        }
    }
}

/// Flying patroller (straight horizontal flight, no collision)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyingPatrolTuning {
    pub size: Vec2,
    /// Initial horizontal velocity (negative = flying left)
    pub velocity: f32,
    pub turning_distance: f32,
}

impl Default for FlyingPatrolTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(40.0, 41.0),
            velocity: -50.0,
            turning_distance: 100.0,
        }
    }
}

/// Thrown dynamite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: Vec2,
    /// Launch velocity when thrown facing right (x is mirrored for left)
    pub throw_velocity: Vec2,
    pub gravity: f32,
    /// Seconds from landing to detonation
    pub fuse: f32,
    /// Seconds after the throw during which contact cannot detonate it
    pub grace_period: f32,
    /// Side of the square blast area centered on the projectile
    pub blast_size: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: Vec2::splat(16.0),
            throw_velocity: Vec2::new(150.0, -200.0),
            gravity: 600.0,
            fuse: 2.0,
            grace_period: 0.2,
            blast_size: 64.0,
        }
    }
}

/// Camera deadzone, in screen pixels before zoom
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Screen viewport size in pixels
    pub viewport: Vec2,
    /// World-to-screen scale
    pub zoom: f32,
    pub scroll_right: f32,
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub scroll_bottom: f32,
    /// Extra world units added to the bottom band
    pub vertical_bias: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1024.0, 576.0),
            zoom: 2.5,
            scroll_right: 300.0,
            scroll_left: 200.0,
            scroll_top: 120.0,
            scroll_bottom: 100.0,
            vertical_bias: 20.0,
        }
    }
}

/// Interaction rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesTuning {
    /// How far below an enemy's top the player's feet may be and still stomp
    pub stomp_tolerance: f32,
    /// Invincibility window after losing a heart (seconds)
    pub damage_invincibility: f32,
    /// Hearts at level start
    pub hearts: usize,
}

impl Default for RulesTuning {
    fn default() -> Self {
        Self {
            stomp_tolerance: 10.0,
            damage_invincibility: 1.5,
            hearts: 3,
        }
    }
}

/// Complete tuning set for one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub ground_patroller: GroundPatrolTuning,
    pub flying_patroller: FlyingPatrolTuning,
    pub projectile: ProjectileTuning,
    pub camera: CameraTuning,
    pub rules: RulesTuning,
}

impl Tuning {
    /// Parse tuning overrides from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning (player speed {}, fuse {}s, {} hearts)",
            tuning.player.run_speed,
            tuning.projectile.fuse,
            tuning.rules.hearts
        );
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy for dumping the defaults)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let t = Tuning::default();
        assert_eq!(t.player.run_speed, 200.0);
        assert_eq!(t.player.jump_power, 250.0);
        assert_eq!(t.player.bounce_power, 200.0);
        assert_eq!(t.player.gravity, 700.0);
        assert_eq!(t.ground_patroller.gravity, 580.0);
        assert_eq!(t.flying_patroller.velocity, -50.0);
        assert_eq!(t.projectile.fuse, 2.0);
        assert_eq!(t.projectile.grace_period, 0.2);
        assert_eq!(t.rules.hearts, 3);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let t = Tuning::from_json(r#"{ "player": { "run_speed": 120.0 }, "rules": { "hearts": 5 } }"#)
            .expect("valid tuning");
        assert_eq!(t.player.run_speed, 120.0);
        assert_eq!(t.player.jump_power, 250.0);
        assert_eq!(t.rules.hearts, 5);
        assert_eq!(t.rules.stomp_tolerance, 10.0);
        assert_eq!(t.camera.zoom, 2.5);
    }

    #[test]
    fn test_json_round_trip_keeps_defaults() {
        let json = Tuning::default().to_json().expect("serializable");
        let back = Tuning::from_json(&json).expect("parsable");
        assert_eq!(back.projectile.blast_size, 64.0);
        assert_eq!(back.player.hitbox_size, Vec2::new(20.0, 23.0));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
