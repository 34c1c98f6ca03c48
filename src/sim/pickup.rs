//! Collectible gems

use glam::Vec2;

use super::animation::{FrameTimer, clips};
use super::geom::Rect;
use super::snapshot::SpriteView;
use crate::assets::AssetId;

/// Gem sprite size in world units
pub const GEM_SIZE: Vec2 = Vec2::new(15.0, 13.0);

#[derive(Debug, Clone)]
pub struct Gem {
    pub id: u32,
    pos: Vec2,
    hitbox: Rect,
    frames: FrameTimer,
}

impl Gem {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            hitbox: Rect::from_pos_size(pos, GEM_SIZE),
            frames: FrameTimer::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn hitbox(&self) -> &Rect {
        &self.hitbox
    }

    /// Gems only animate; they never move
    pub fn update(&mut self, dt: f32) {
        self.frames.advance(dt, &clips::GEM);
    }

    pub fn sprite(&self) -> SpriteView {
        SpriteView {
            asset: AssetId::Gem,
            pos: self.pos,
            size: GEM_SIZE,
            source: clips::GEM.source_rect(self.frames.frame),
            flip_x: false,
            translucent: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_matches_sprite() {
        let gem = Gem::new(1, Vec2::new(32.0, 48.0));
        assert_eq!(*gem.hitbox(), Rect::new(32.0, 48.0, 47.0, 61.0));
    }

    #[test]
    fn test_animation_loops() {
        let mut gem = Gem::new(1, Vec2::ZERO);
        // Five frames at 0.1s; step just over half a second
        for _ in 0..11 {
            gem.update(0.05);
        }
        assert_eq!(gem.frames.iterations, 1);
        assert_eq!(gem.sprite().source.left, 0.0);
    }
}
