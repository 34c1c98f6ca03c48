//! Kinematic bodies and axis-separated collision resolution
//!
//! Every moving body that collides with the level integrates and resolves
//! one axis at a time: horizontal first, then vertical. Within an axis the
//! first penetrating obstacle in level order wins and the body is pushed
//! flush against the obstacle edge it was moving toward.

use glam::Vec2;

use super::geom::Rect;
use super::obstacle::ObstacleSet;

/// Hitbox placement relative to a body's sprite origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxShape {
    pub offset: Vec2,
    pub size: Vec2,
}

impl HitboxShape {
    /// Hitbox covering the whole sprite
    pub fn full(size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn at(&self, pos: Vec2) -> Rect {
        Rect::from_pos_size(pos + self.offset, self.size)
    }
}

/// Obstacle contacts produced by one `step`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contacts {
    /// Obstacle the body was pushed out of horizontally
    pub horizontal: Option<Rect>,
    /// Obstacle the body was pushed out of vertically
    pub vertical: Option<Rect>,
}

/// Position, velocity and hitbox of a moving body
#[derive(Debug, Clone)]
pub struct KinematicBody {
    /// Sprite top-left corner
    pos: Vec2,
    pub vel: Vec2,
    /// Sprite size
    size: Vec2,
    shape: HitboxShape,
    /// Always `shape.at(pos)`
    hitbox: Rect,
    grounded: bool,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2, shape: HitboxShape) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            shape,
            hitbox: shape.at(pos),
            grounded: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn hitbox(&self) -> &Rect {
        &self.hitbox
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Teleport; the hitbox follows
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.hitbox = self.shape.at(pos);
    }

    /// Drop ground contact (jumps, bounces)
    pub fn leave_ground(&mut self) {
        self.grounded = false;
    }

    /// Full update: horizontal pass, gravity, vertical pass
    pub fn step(&mut self, dt: f32, gravity: f32, obstacles: &ObstacleSet) -> Contacts {
        self.integrate_x(dt);
        let horizontal = self.resolve_x(obstacles);
        self.apply_gravity(dt, gravity);
        self.integrate_y(dt);
        let vertical = self.resolve_y(obstacles);
        Contacts {
            horizontal,
            vertical,
        }
    }

    pub fn integrate_x(&mut self, dt: f32) {
        self.set_pos(Vec2::new(self.pos.x + self.vel.x * dt, self.pos.y));
    }

    pub fn integrate_y(&mut self, dt: f32) {
        self.set_pos(Vec2::new(self.pos.x, self.pos.y + self.vel.y * dt));
    }

    /// Gravity only acts on airborne bodies
    pub fn apply_gravity(&mut self, dt: f32, gravity: f32) {
        if !self.grounded {
            self.vel.y += gravity * dt;
        }
    }

    /// Keep the sprite origin at or right of `min_x`, stopping leftward motion
    pub fn clamp_min_x(&mut self, min_x: f32) {
        if self.pos.x < min_x {
            self.set_pos(Vec2::new(min_x, self.pos.y));
            self.vel.x = 0.0;
        }
    }

    /// Push out of the first penetrated obstacle along x
    pub fn resolve_x(&mut self, obstacles: &ObstacleSet) -> Option<Rect> {
        if self.vel.x == 0.0 {
            return None;
        }

        let hit = *obstacles.first_penetrating(&self.hitbox)?.bounds();
        let x = if self.vel.x < 0.0 {
            hit.right - self.shape.offset.x
        } else {
            hit.left - self.shape.size.x - self.shape.offset.x
        };
        self.set_pos(Vec2::new(x, self.pos.y));
        self.vel.x = 0.0;
        Some(hit)
    }

    /// Push out of the first penetrated obstacle along y and update ground contact
    pub fn resolve_y(&mut self, obstacles: &ObstacleSet) -> Option<Rect> {
        let was_grounded = self.grounded;
        self.grounded = false;

        if self.vel.y == 0.0 {
            // Resting bodies receive no gravity, so ground contact is re-probed
            // instead of re-collided.
            self.grounded = was_grounded && obstacles.supports(&self.hitbox);
            return None;
        }

        let hit = *obstacles.first_penetrating(&self.hitbox)?.bounds();
        let y = if self.vel.y > 0.0 {
            self.grounded = true;
            hit.top - self.shape.size.y - self.shape.offset.y
        } else {
            hit.bottom - self.shape.offset.y
        };
        self.set_pos(Vec2::new(self.pos.x, y));
        self.vel.y = 0.0;
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::obstacle::StaticObstacle;

    const GRAVITY: f32 = 700.0;

    fn floor_and_wall() -> ObstacleSet {
        let mut tiles: Vec<StaticObstacle> =
            (0..20).map(|c| StaticObstacle::tile(c, 10, 16.0)).collect();
        // Wall two tiles tall at column 10, standing on the floor
        tiles.push(StaticObstacle::tile(10, 9, 16.0));
        tiles.push(StaticObstacle::tile(10, 8, 16.0));
        ObstacleSet::new(tiles)
    }

    fn player_like(pos: Vec2) -> KinematicBody {
        KinematicBody::new(
            pos,
            Vec2::splat(32.0),
            HitboxShape {
                offset: Vec2::new(4.0, 9.0),
                size: Vec2::new(20.0, 23.0),
            },
        )
    }

    #[test]
    fn test_hitbox_follows_position() {
        let mut body = player_like(Vec2::new(10.0, 20.0));
        assert_eq!(*body.hitbox(), Rect::new(14.0, 29.0, 34.0, 52.0));
        body.set_pos(Vec2::new(0.0, 0.0));
        assert_eq!(*body.hitbox(), Rect::new(4.0, 9.0, 24.0, 32.0));
    }

    #[test]
    fn test_falling_body_lands_on_floor() {
        let obstacles = floor_and_wall();
        let mut body = player_like(Vec2::new(20.0, 100.0));

        for _ in 0..240 {
            body.step(SIM_DT, GRAVITY, &obstacles);
        }

        assert!(body.grounded());
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.hitbox().bottom, 160.0);
        assert_eq!(body.pos().y, 128.0);
    }

    #[test]
    fn test_resting_body_is_stable() {
        let obstacles = floor_and_wall();
        let mut body = player_like(Vec2::new(20.0, 100.0));
        for _ in 0..240 {
            body.step(SIM_DT, GRAVITY, &obstacles);
        }
        let rest = body.pos();

        for _ in 0..600 {
            body.step(SIM_DT, GRAVITY, &obstacles);
            assert!(body.grounded());
            assert_eq!(body.pos(), rest);
        }
    }

    #[test]
    fn test_walking_off_ledge_drops_ground_contact() {
        let obstacles = ObstacleSet::new(vec![StaticObstacle::tile(0, 10, 16.0)]);
        let mut body = player_like(Vec2::new(-4.0, 100.0));
        for _ in 0..240 {
            body.step(SIM_DT, GRAVITY, &obstacles);
        }
        assert!(body.grounded());

        body.vel.x = 200.0;
        let mut fell = false;
        for _ in 0..60 {
            body.step(SIM_DT, GRAVITY, &obstacles);
            if body.pos().y > 128.0 {
                fell = true;
                break;
            }
        }
        assert!(fell, "body should fall once past the ledge");
    }

    #[test]
    fn test_horizontal_push_against_wall() {
        let obstacles = floor_and_wall();
        // Standing on the floor just left of the wall at x=160
        let mut body = player_like(Vec2::new(130.0, 128.0));
        body.vel.x = 200.0;
        let contacts = body.step(SIM_DT * 4.0, GRAVITY, &obstacles);

        assert_eq!(contacts.horizontal, Some(Rect::new(160.0, 144.0, 176.0, 160.0)));
        assert_eq!(body.hitbox().right, 160.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_moving_left_pushes_to_right_edge() {
        let obstacles = floor_and_wall();
        let mut body = player_like(Vec2::new(175.0, 128.0));
        body.vel.x = -200.0;
        body.step(SIM_DT * 4.0, GRAVITY, &obstacles);
        assert_eq!(body.hitbox().left, 176.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_rising_body_bonks_ceiling() {
        let obstacles = ObstacleSet::new(vec![StaticObstacle::tile(0, 0, 16.0)]);
        let mut body = player_like(Vec2::new(0.0, 10.0));
        body.vel.y = -300.0;
        let contacts = body.step(SIM_DT * 4.0, GRAVITY, &obstacles);

        assert!(contacts.vertical.is_some());
        assert_eq!(body.hitbox().top, 16.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.grounded());
    }

    #[test]
    fn test_horizontal_resolves_before_vertical_at_corner() {
        let obstacles = floor_and_wall();
        // Beside the wall, feet 2 units below its top edge, moving right and down
        let mut body = player_like(Vec2::new(130.0, 128.0 + 2.0 - 32.0));
        assert!(body.hitbox().bottom > 128.0);
        body.vel = Vec2::new(240.0, 30.0);
        let contacts = body.step(SIM_DT * 4.0, GRAVITY, &obstacles);

        // Caught by the wall's side, not lifted onto its top
        assert!(contacts.horizontal.is_some());
        assert_eq!(body.hitbox().right, 160.0);
        assert!(body.hitbox().bottom > 128.0);
        assert!(!body.grounded());
    }

    #[test]
    fn test_diagonal_approach_lands_on_ledge_top() {
        let obstacles = floor_and_wall();
        // Above the wall top, drifting right over it while falling
        let mut body = player_like(Vec2::new(140.0, 128.0 - 32.0 - 1.0 - 16.0));
        body.vel = Vec2::new(120.0, 200.0);
        for _ in 0..24 {
            body.step(SIM_DT, GRAVITY, &obstacles);
        }
        // Hitbox must never end up inside the wall
        for o in obstacles.iter() {
            assert!(!body.hitbox().penetrates(o.bounds(), 1e-3));
        }
        assert!(body.grounded());
    }

    #[test]
    fn test_clamp_min_x() {
        let mut body = player_like(Vec2::new(5.0, 0.0));
        body.vel.x = -200.0;
        body.integrate_x(0.1);
        body.clamp_min_x(2.0);
        assert_eq!(body.pos().x, 2.0);
        assert_eq!(body.vel.x, 0.0);
    }
}
