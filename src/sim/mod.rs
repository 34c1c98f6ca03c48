//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (spawn order, entity IDs ascending)
//! - No rendering or platform dependencies

pub mod animation;
pub mod body;
pub mod camera;
pub mod clock;
pub mod effects;
pub mod enemy;
pub mod geom;
pub mod health;
pub mod obstacle;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod resolver;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use animation::{AnimationClip, FrameTimer};
pub use body::{Contacts, HitboxShape, KinematicBody};
pub use camera::Camera;
pub use clock::FrameClock;
pub use effects::{EffectKind, SpriteEffect};
pub use enemy::{Enemy, EnemyKind, FlyingPatroller, GroundPatroller, Patroller};
pub use geom::Rect;
pub use health::{HealthTrack, HeartState};
pub use obstacle::{ObstacleSet, StaticObstacle};
pub use pickup::Gem;
pub use player::{Facing, Player, PlayerAnim};
pub use projectile::{Projectile, ProjectileState};
pub use snapshot::{RenderSnapshot, SpriteView};
pub use state::{GameEvent, GamePhase, KillCause, World};
pub use tick::{TickInput, tick};
