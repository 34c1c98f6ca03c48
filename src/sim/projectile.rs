//! Thrown dynamite
//!
//! A projectile flies on a ballistic arc until it touches the level, then
//! sits on the ground with a burning fuse. Contact with anything after the
//! short grace period, or the fuse running out, detonates it. The blast
//! itself is applied by the interaction pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::clips;
use super::body::HitboxShape;
use super::geom::Rect;
use super::obstacle::ObstacleSet;
use super::player::Facing;
use super::snapshot::SpriteView;
use crate::assets::AssetId;
use crate::tuning::ProjectileTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    /// Airborne, under gravity
    Flying,
    /// Resting on an obstacle, fuse burning
    Ticking,
    /// Blast pending; removed by the interaction pass
    Detonated,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    state: ProjectileState,
    pos: Vec2,
    vel: Vec2,
    size: Vec2,
    hitbox: Rect,
    gravity: f32,
    /// Seconds left on the fuse once landed
    fuse: f32,
    /// Seconds left before contact may detonate it
    grace: f32,
    blast_size: f32,
}

impl Projectile {
    /// Launch from `origin` toward `facing`
    pub fn thrown(id: u32, origin: Vec2, facing: Facing, tuning: &ProjectileTuning) -> Self {
        let vel = Vec2::new(tuning.throw_velocity.x * facing.sign(), tuning.throw_velocity.y);
        Self {
            id,
            state: ProjectileState::Flying,
            pos: origin,
            vel,
            size: tuning.size,
            hitbox: HitboxShape::full(tuning.size).at(origin),
            gravity: tuning.gravity,
            fuse: tuning.fuse,
            grace: tuning.grace_period,
            blast_size: tuning.blast_size,
        }
    }

    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn hitbox(&self) -> &Rect {
        &self.hitbox
    }

    /// True until the grace timer first reaches zero; never re-armed
    #[inline]
    pub fn in_grace(&self) -> bool {
        self.grace > 0.0
    }

    pub fn fuse_remaining(&self) -> f32 {
        self.fuse
    }

    /// Square blast area centered on the hitbox
    pub fn blast_area(&self) -> Rect {
        Rect::centered_square(self.hitbox.center(), self.blast_size)
    }

    /// Force detonation (contact)
    pub fn detonate(&mut self) {
        self.state = ProjectileState::Detonated;
        self.vel = Vec2::ZERO;
    }

    /// Advance one tick; returns the state entered this tick, if it changed
    pub fn update(&mut self, dt: f32, obstacles: &ObstacleSet) -> Option<ProjectileState> {
        if self.grace > 0.0 {
            self.grace -= dt;
        }

        match self.state {
            ProjectileState::Flying => {
                self.vel.y += self.gravity * dt;
                self.set_pos(self.pos + self.vel * dt);

                let top = obstacles.first_intersecting(&self.hitbox)?.bounds().top;
                // Rising into something after the grace period: left for the
                // interaction pass to contact-detonate.
                if self.vel.y < 0.0 && !self.in_grace() {
                    return None;
                }
                self.vel = Vec2::ZERO;
                self.set_pos(Vec2::new(self.pos.x, top - self.size.y));
                self.state = ProjectileState::Ticking;
                Some(ProjectileState::Ticking)
            }
            ProjectileState::Ticking => {
                self.fuse -= dt;
                if self.fuse <= 0.0 {
                    self.state = ProjectileState::Detonated;
                    Some(ProjectileState::Detonated)
                } else {
                    None
                }
            }
            ProjectileState::Detonated => None,
        }
    }

    pub fn sprite(&self) -> SpriteView {
        SpriteView {
            asset: AssetId::Dynamite,
            pos: self.pos,
            size: self.size,
            source: clips::DYNAMITE.source_rect(0),
            flip_x: false,
            translucent: false,
        }
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.hitbox = HitboxShape::full(self.size).at(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::obstacle::StaticObstacle;

    fn floor() -> ObstacleSet {
        ObstacleSet::new((0..40).map(|c| StaticObstacle::tile(c, 10, 16.0)).collect())
    }

    fn run_until_landed(p: &mut Projectile, obstacles: &ObstacleSet) {
        for _ in 0..600 {
            if p.update(SIM_DT, obstacles) == Some(ProjectileState::Ticking) {
                return;
            }
        }
        panic!("projectile never landed");
    }

    #[test]
    fn test_throw_mirrors_velocity_by_facing() {
        let t = ProjectileTuning::default();
        let right = Projectile::thrown(1, Vec2::ZERO, Facing::Right, &t);
        let left = Projectile::thrown(2, Vec2::ZERO, Facing::Left, &t);
        assert_eq!(right.vel(), Vec2::new(150.0, -200.0));
        assert_eq!(left.vel(), Vec2::new(-150.0, -200.0));
        assert_eq!(right.state(), ProjectileState::Flying);
        assert!(right.in_grace());
    }

    #[test]
    fn test_lands_on_ground_and_rests_on_top() {
        let obstacles = floor();
        let mut p = Projectile::thrown(1, Vec2::new(100.0, 120.0), Facing::Right, &ProjectileTuning::default());
        run_until_landed(&mut p, &obstacles);
        assert_eq!(p.state(), ProjectileState::Ticking);
        assert_eq!(p.vel(), Vec2::ZERO);
        assert_eq!(p.hitbox().bottom, 160.0);
    }

    #[test]
    fn test_fuse_detonates_after_landing() {
        let obstacles = floor();
        let mut p = Projectile::thrown(1, Vec2::new(100.0, 120.0), Facing::Right, &ProjectileTuning::default());
        run_until_landed(&mut p, &obstacles);
        let rest = p.pos();

        // Just under two seconds: still ticking, not moving
        for _ in 0..238 {
            assert_eq!(p.update(SIM_DT, &obstacles), None);
        }
        assert_eq!(p.state(), ProjectileState::Ticking);
        assert_eq!(p.pos(), rest);

        let mut detonated = false;
        for _ in 0..4 {
            if p.update(SIM_DT, &obstacles) == Some(ProjectileState::Detonated) {
                detonated = true;
                break;
            }
        }
        assert!(detonated);
    }

    #[test]
    fn test_no_obstacles_never_lands() {
        let obstacles = ObstacleSet::default();
        let mut p = Projectile::thrown(1, Vec2::ZERO, Facing::Left, &ProjectileTuning::default());
        for _ in 0..240 {
            assert_eq!(p.update(SIM_DT, &obstacles), None);
        }
        assert_eq!(p.state(), ProjectileState::Flying);
        assert!(p.pos().y > 0.0);
    }

    #[test]
    fn test_rising_contact_after_grace_stays_flying() {
        // Ceiling tile directly above, reached only after the grace period
        let obstacles = ObstacleSet::new(vec![StaticObstacle::tile(0, 0, 16.0)]);
        let mut p = Projectile::thrown(1, Vec2::new(0.0, 45.0), Facing::Right, &ProjectileTuning::default());
        p.vel.x = 0.0;
        let mut hit = false;
        for _ in 0..40 {
            p.update(SIM_DT, &obstacles);
            if obstacles.first_intersecting(p.hitbox()).is_some() {
                hit = true;
                break;
            }
        }
        assert!(hit);
        assert!(!p.in_grace());
        assert!(p.vel().y < 0.0);
        assert_eq!(p.state(), ProjectileState::Flying);
    }

    #[test]
    fn test_grace_expires_once_and_stays_expired() {
        let obstacles = floor();
        let mut p = Projectile::thrown(1, Vec2::new(100.0, 120.0), Facing::Right, &ProjectileTuning::default());
        let mut expired_at = None;
        for i in 0..600 {
            p.update(SIM_DT, &obstacles);
            if expired_at.is_none() && !p.in_grace() {
                expired_at = Some(i);
            }
            if expired_at.is_some() {
                assert!(!p.in_grace());
            }
        }
        // 0.2s at 120Hz
        let tick = expired_at.expect("grace expires");
        assert!((23..=24).contains(&tick));
    }

    #[test]
    fn test_detonate_and_blast_area() {
        let mut p = Projectile::thrown(1, Vec2::new(100.0, 100.0), Facing::Right, &ProjectileTuning::default());
        p.detonate();
        assert_eq!(p.state(), ProjectileState::Detonated);
        assert_eq!(p.blast_area(), Rect::new(76.0, 76.0, 140.0, 140.0));
        assert_eq!(p.update(SIM_DT, &ObstacleSet::default()), None);
    }
}
