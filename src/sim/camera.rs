//! Deadzone camera
//!
//! The camera only scrolls once the player leaves a band inside the view,
//! then places the player exactly on the band edge. All state is kept in
//! world units; `screen_offset` converts to pixels for the renderer.

use glam::Vec2;

use super::geom::Rect;
use crate::consts::PLAYER_MIN_X;
use crate::tuning::CameraTuning;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left of the view in world units
    offset: Vec2,
    level_size: Vec2,
    /// View size in world units
    view: Vec2,
    zoom: f32,
    // Band widths in world units
    right: f32,
    left: f32,
    top: f32,
    bottom: f32,
}

impl Camera {
    pub fn new(tuning: &CameraTuning) -> Self {
        let zoom = tuning.zoom;
        Self {
            offset: Vec2::ZERO,
            level_size: Vec2::ZERO,
            view: tuning.viewport / zoom,
            zoom,
            right: tuning.scroll_right / zoom,
            left: tuning.scroll_left / zoom,
            top: tuning.scroll_top / zoom,
            bottom: tuning.scroll_bottom / zoom + tuning.vertical_bias,
        }
    }

    /// Set once per level
    pub fn set_level_bounds(&mut self, size: Vec2) {
        self.level_size = size;
        log::debug!("Camera level bounds {}x{}", size.x, size.y);
        self.offset = self.clamp(self.offset);
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Offset in screen pixels
    #[inline]
    pub fn screen_offset(&self) -> Vec2 {
        self.offset * self.zoom
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// View size in world units
    #[inline]
    pub fn view_size(&self) -> Vec2 {
        self.view
    }

    /// Largest offset that keeps the view inside the level
    pub fn max_offset(&self) -> Vec2 {
        (self.level_size - self.view).max(Vec2::ZERO)
    }

    /// World-space rectangle currently in view
    pub fn visible_rect(&self) -> Rect {
        Rect::from_pos_size(self.offset, self.view)
    }

    /// Scroll to keep `target` (player sprite origin) inside the deadzone
    pub fn follow(&mut self, target: Vec2) {
        let px = target.x.max(PLAYER_MIN_X);
        let py = target.y;
        let mut next = self.offset;

        if px > self.offset.x + self.view.x - self.right {
            next.x = px - self.view.x + self.right;
        } else if px < self.offset.x + self.left {
            next.x = px - self.left;
        }

        if py < self.offset.y + self.top {
            next.y = py - self.top;
        } else if py > self.offset.y + self.view.y - self.bottom {
            next.y = py - self.view.y + self.bottom;
        }

        self.offset = self.clamp(next);
    }

    fn clamp(&self, offset: Vec2) -> Vec2 {
        offset.clamp(Vec2::ZERO, self.max_offset())
    }
}
