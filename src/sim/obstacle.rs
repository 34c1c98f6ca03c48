//! Static collision geometry
//!
//! Obstacles are built once when a level loads and never change afterward.
//! Bodies and the interaction pass only ever borrow them.

use glam::Vec2;

use super::geom::Rect;
use crate::consts::COLLISION_EPSILON;

/// An immutable solid rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticObstacle {
    bounds: Rect,
}

impl StaticObstacle {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// A square tile-sized obstacle at the given grid cell
    pub fn tile(col: usize, row: usize, tile_size: f32) -> Self {
        let pos = Vec2::new(col as f32 * tile_size, row as f32 * tile_size);
        Self::new(Rect::from_pos_size(pos, Vec2::splat(tile_size)))
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }
}

/// The level's obstacles, in level order
///
/// Resolution always takes the first overlapping obstacle in this order,
/// never the closest one.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<StaticObstacle>,
}

impl ObstacleSet {
    pub fn new(obstacles: Vec<StaticObstacle>) -> Self {
        Self { obstacles }
    }

    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        Self::new(rects.into_iter().map(StaticObstacle::new).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaticObstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// First obstacle (in level order) that `rect` penetrates
    pub fn first_penetrating(&self, rect: &Rect) -> Option<&StaticObstacle> {
        self.obstacles
            .iter()
            .find(|o| rect.penetrates(&o.bounds, COLLISION_EPSILON))
    }

    /// First obstacle (in level order) that `rect` strictly intersects
    pub fn first_intersecting(&self, rect: &Rect) -> Option<&StaticObstacle> {
        self.obstacles.iter().find(|o| rect.intersects(&o.bounds))
    }

    /// True if some obstacle's top edge is touching the bottom of `rect`
    pub fn supports(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| {
            let b = &o.bounds;
            (rect.bottom - b.top).abs() <= COLLISION_EPSILON
                && rect.left < b.right
                && rect.right > b.left
        })
    }
}
