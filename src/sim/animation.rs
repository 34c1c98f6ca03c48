//! Sprite-sheet animation clips and frame timers
//!
//! A clip is a horizontal strip of equally sized frames on a sprite sheet.
//! Every animated entity owns a `FrameTimer` that advances through the
//! frames of its current clip at the clip's fixed frame duration.

use serde::{Deserialize, Serialize};

use super::geom::Rect;

/// A strip of frames on a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Left edge of frame 0 on the sheet (pixels)
    pub x: u32,
    /// Top edge of the strip on the sheet (pixels)
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub seconds_per_frame: f32,
}

impl AnimationClip {
    pub const fn new(x: u32, y: u32, width: u32, height: u32, frames: u32, seconds_per_frame: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            frames,
            seconds_per_frame,
        }
    }

    /// Source rectangle of `frame` on the sprite sheet
    pub fn source_rect(&self, frame: u32) -> Rect {
        let frame_x = (self.x + self.width * frame) as f32;
        Rect::new(
            frame_x,
            self.y as f32,
            frame_x + self.width as f32,
            (self.y + self.height) as f32,
        )
    }

    /// Total duration of one pass through the clip (seconds)
    pub fn cycle_duration(&self) -> f32 {
        self.frames as f32 * self.seconds_per_frame
    }
}

/// Clip tables, one entry per entity animation
pub mod clips {
    use super::AnimationClip;

    /// Player frames are 33x32 cells, 0.1s per frame
    pub const PLAYER_IDLE: AnimationClip = AnimationClip::new(0, 0, 33, 32, 4, 0.1);
    pub const PLAYER_RUN: AnimationClip = AnimationClip::new(0, 32, 33, 32, 6, 0.1);
    pub const PLAYER_JUMP: AnimationClip = AnimationClip::new(0, 32 * 5, 33, 32, 1, 0.1);
    pub const PLAYER_FALL: AnimationClip = AnimationClip::new(33, 32 * 5, 33, 32, 1, 0.1);
    pub const PLAYER_ROLL: AnimationClip = AnimationClip::new(0, 32 * 9, 33, 32, 4, 0.1);

    pub const GROUND_PATROLLER_RUN: AnimationClip = AnimationClip::new(0, 0, 36, 28, 6, 0.1);
    pub const FLYING_PATROLLER_FLY: AnimationClip = AnimationClip::new(0, 0, 40, 41, 4, 0.1);

    pub const GEM: AnimationClip = AnimationClip::new(0, 0, 15, 13, 5, 0.1);
    /// Single still frame; the dynamite sheet cell is 32x32, drawn at 16x16
    pub const DYNAMITE: AnimationClip = AnimationClip::new(0, 0, 32, 32, 1, 0.1);

    pub const GEM_COLLECTION: AnimationClip = AnimationClip::new(0, 0, 32, 32, 5, 0.08);
    pub const ENEMY_DEATH: AnimationClip = AnimationClip::new(0, 0, 40, 41, 6, 0.08);
    pub const EXPLOSION: AnimationClip = AnimationClip::new(0, 0, 64, 64, 6, 0.08);
}

/// Advances a frame index at a fixed per-frame duration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTimer {
    /// Current frame index into the active clip
    pub frame: u32,
    /// Time accumulated toward the next frame
    elapsed: f32,
    /// Number of completed passes through the clip
    pub iterations: u32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Returns true if the clip wrapped back to frame 0.
    ///
    /// At most one frame is advanced per call, matching a per-tick frame step.
    pub fn advance(&mut self, dt: f32, clip: &AnimationClip) -> bool {
        if clip.frames <= 1 {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed < clip.seconds_per_frame {
            return false;
        }

        self.elapsed -= clip.seconds_per_frame;
        self.frame += 1;
        if self.frame >= clip.frames {
            self.frame = 0;
            self.iterations += 1;
            return true;
        }
        false
    }

    /// Restart from frame 0 (used when switching clips)
    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = 0.0;
    }

    /// True once the clip has played through at least once
    #[inline]
    pub fn finished(&self) -> bool {
        self.iterations > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_timer_advances_at_clip_rate() {
        let clip = AnimationClip::new(0, 0, 10, 10, 3, 0.1);
        let mut timer = FrameTimer::new();

        assert!(!timer.advance(0.05, &clip));
        assert_eq!(timer.frame, 0);
        assert!(!timer.advance(0.05, &clip));
        assert_eq!(timer.frame, 1);
        assert!(!timer.advance(0.1, &clip));
        assert_eq!(timer.frame, 2);
    }

    #[test]
    fn test_frame_timer_reports_cycle_completion() {
        let clip = AnimationClip::new(0, 0, 10, 10, 2, 0.1);
        let mut timer = FrameTimer::new();

        assert!(!timer.advance(0.1, &clip));
        assert!(!timer.finished());
        assert!(timer.advance(0.1, &clip));
        assert_eq!(timer.frame, 0);
        assert!(timer.finished());
    }

    #[test]
    fn test_single_frame_clip_never_advances() {
        let mut timer = FrameTimer::new();
        for _ in 0..100 {
            assert!(!timer.advance(0.5, &clips::PLAYER_JUMP));
        }
        assert_eq!(timer.frame, 0);
        assert_eq!(timer.iterations, 0);
    }

    #[test]
    fn test_source_rect_steps_along_strip() {
        let r = clips::PLAYER_RUN.source_rect(2);
        assert_eq!(r, Rect::new(66.0, 32.0, 99.0, 64.0));
    }

    #[test]
    fn test_explosion_cycle_duration() {
        assert!((clips::EXPLOSION.cycle_duration() - 0.48).abs() < 1e-5);
    }
}
