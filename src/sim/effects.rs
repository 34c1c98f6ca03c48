//! One-shot visual effects
//!
//! Effects do not take part in collision. Each plays its clip once and is
//! dropped by the world after the interaction pass of the tick it finishes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationClip, FrameTimer, clips};
use super::snapshot::SpriteView;
use crate::assets::AssetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    GemCollection,
    EnemyDeath,
    Explosion,
}

impl EffectKind {
    pub fn clip(self) -> &'static AnimationClip {
        match self {
            EffectKind::GemCollection => &clips::GEM_COLLECTION,
            EffectKind::EnemyDeath => &clips::ENEMY_DEATH,
            EffectKind::Explosion => &clips::EXPLOSION,
        }
    }

    pub fn asset(self) -> AssetId {
        match self {
            EffectKind::GemCollection => AssetId::ItemFeedback,
            EffectKind::EnemyDeath => AssetId::EnemyDeath,
            EffectKind::Explosion => AssetId::Explosion,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpriteEffect {
    kind: EffectKind,
    /// Top-left of the effect sprite
    pos: Vec2,
    frames: FrameTimer,
}

impl SpriteEffect {
    /// Spawn centered on the 16x16 cell whose top-left is `at`
    pub fn spawn(kind: EffectKind, at: Vec2) -> Self {
        let clip = kind.clip();
        let size = Vec2::new(clip.width as f32, clip.height as f32);
        Self {
            kind,
            pos: at - size / 2.0 + Vec2::splat(8.0),
            frames: FrameTimer::new(),
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn update(&mut self, dt: f32) {
        self.frames.advance(dt, self.kind.clip());
    }

    pub fn finished(&self) -> bool {
        self.frames.finished()
    }

    pub fn sprite(&self) -> SpriteView {
        let clip = self.kind.clip();
        SpriteView {
            asset: self.kind.asset(),
            pos: self.pos,
            size: Vec2::new(clip.width as f32, clip.height as f32),
            source: clip.source_rect(self.frames.frame),
            flip_x: false,
            translucent: false,
        }
    }
}
