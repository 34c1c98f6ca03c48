//! Read-only view of the world for a renderer

use glam::Vec2;
use serde::Serialize;

use super::geom::Rect;
use super::health::HeartState;
use super::state::GamePhase;
use crate::assets::AssetId;

/// One sprite to draw: where, which sheet, which cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub asset: AssetId,
    /// Destination top-left in world units
    pub pos: Vec2,
    /// Destination size in world units
    pub size: Vec2,
    /// Source cell in the sprite sheet, in pixels
    pub source: Rect,
    /// Mirror horizontally
    pub flip_x: bool,
    /// Draw at half alpha (invincible player)
    pub translucent: bool,
}

impl SpriteView {
    /// Destination rectangle in world units
    pub fn dest(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Color to fill `dest` with while the sheet is not loaded
    pub fn placeholder_color(&self) -> u32 {
        self.asset.placeholder_color()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub player: SpriteView,
    pub player_invincible: bool,
    pub enemies: Vec<SpriteView>,
    pub gems: Vec<SpriteView>,
    pub projectiles: Vec<SpriteView>,
    pub effects: Vec<SpriteView>,
    /// Camera offset in world units
    pub camera_offset: Vec2,
    /// Camera offset in screen pixels
    pub screen_offset: Vec2,
    pub zoom: f32,
    pub hearts: Vec<HeartState>,
    pub score: u32,
    pub gems_remaining: usize,
}

impl RenderSnapshot {
    /// Every world sprite in draw order: gems, enemies, projectiles, player, effects
    pub fn world_sprites(&self) -> impl Iterator<Item = &SpriteView> {
        self.gems
            .iter()
            .chain(self.enemies.iter())
            .chain(self.projectiles.iter())
            .chain(std::iter::once(&self.player))
            .chain(self.effects.iter())
    }
}
