//! Gem Dash - A side-scrolling gem-collecting platformer
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (physics, entities, interactions, camera)
//! - `level`: Level file loading and obstacle/spawn construction
//! - `assets`: Write-once sprite slots shared with the renderer
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod level;
pub mod sim;
pub mod tuning;

pub use assets::{AssetId, AssetRegistry, AssetSlot};
pub use level::{EnemySpawn, Level, LevelData, LevelError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Level grid granularity (world units per tile)
    pub const TILE_SIZE: f32 = 16.0;
    /// Tile IDs in the collision layer that produce solid obstacles
    pub const SOLID_TILE_IDS: [i32; 2] = [1, 2];
    /// Tile ID in the gem layer that spawns a gem
    pub const GEM_TILE_ID: i32 = 18;

    /// Leftmost x coordinate the player may occupy
    pub const PLAYER_MIN_X: f32 = 2.0;

    /// Overlap slack used by physics resolution (touching is not overlapping)
    pub const COLLISION_EPSILON: f32 = 1e-3;
}
