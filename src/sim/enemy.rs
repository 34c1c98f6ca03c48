//! Patrolling enemies
//!
//! Two behaviors share one capability: walk (or fly) back and forth over a
//! fixed distance. The ground patroller is a full kinematic body and also
//! turns at walls; the flying patroller ignores gravity and the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationClip, FrameTimer, clips};
use super::body::{HitboxShape, KinematicBody};
use super::geom::Rect;
use super::obstacle::ObstacleSet;
use super::player::Facing;
use super::snapshot::SpriteView;
use crate::assets::AssetId;
use crate::tuning::{FlyingPatrolTuning, GroundPatrolTuning};

/// Enemy behaviors a level can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    GroundPatroller,
    FlyingPatroller,
}

impl EnemyKind {
    /// Map a level-file type tag to a behavior
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Oposum" => Some(EnemyKind::GroundPatroller),
            "Eagle" => Some(EnemyKind::FlyingPatroller),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            EnemyKind::GroundPatroller => "Oposum",
            EnemyKind::FlyingPatroller => "Eagle",
        }
    }
}

/// What every enemy can do once per tick and report to the renderer
pub trait Patroller {
    fn update(&mut self, dt: f32, obstacles: &ObstacleSet);
    fn hitbox(&self) -> &Rect;
    fn sprite(&self) -> SpriteView;
}

/// Turn around once `distance` reaches the patrol length
fn patrol_turn(vel_x: &mut f32, facing: &mut Facing, distance: &mut f32, turning_distance: f32) {
    if distance.abs() >= turning_distance {
        *vel_x = -*vel_x;
        if let Some(f) = Facing::from_velocity(*vel_x) {
            *facing = f;
        }
        *distance = 0.0;
    }
}

/// Sheets for both enemies are drawn facing left
fn enemy_sprite(asset: AssetId, clip: &AnimationClip, pos: Vec2, size: Vec2, facing: Facing, frame: u32) -> SpriteView {
    SpriteView {
        asset,
        pos,
        size,
        source: clip.source_rect(frame),
        flip_x: facing == Facing::Right,
        translucent: false,
    }
}

/// Walks along the ground, falls under gravity, turns at walls
#[derive(Debug, Clone)]
pub struct GroundPatroller {
    pub id: u32,
    body: KinematicBody,
    gravity: f32,
    turning_distance: f32,
    facing: Facing,
    /// Signed distance walked since the last turn
    distance: f32,
    frames: FrameTimer,
}

impl GroundPatroller {
    pub fn new(id: u32, pos: Vec2, tuning: &GroundPatrolTuning, turning_distance: Option<f32>) -> Self {
        let shape = HitboxShape {
            offset: tuning.hitbox_offset,
            size: tuning.hitbox_size,
        };
        let mut body = KinematicBody::new(pos, tuning.size, shape);
        body.vel.x = tuning.velocity;
        Self {
            id,
            body,
            gravity: tuning.gravity,
            turning_distance: turning_distance.unwrap_or(tuning.turning_distance),
            facing: Facing::from_velocity(tuning.velocity).unwrap_or(Facing::Left),
            distance: 0.0,
            frames: FrameTimer::new(),
        }
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }
}

impl Patroller for GroundPatroller {
    fn update(&mut self, dt: f32, obstacles: &ObstacleSet) {
        // Only turn on patrol distance while standing on something
        if self.body.grounded() {
            patrol_turn(&mut self.body.vel.x, &mut self.facing, &mut self.distance, self.turning_distance);
        }
        self.distance += self.body.vel.x * dt;

        self.frames.advance(dt, &clips::GROUND_PATROLLER_RUN);

        let vel_x = self.body.vel.x;
        let contacts = self.body.step(dt, self.gravity, obstacles);
        if contacts.horizontal.is_some() {
            self.body.vel.x = -vel_x;
            if let Some(f) = Facing::from_velocity(self.body.vel.x) {
                self.facing = f;
            }
        }
    }

    fn hitbox(&self) -> &Rect {
        self.body.hitbox()
    }

    fn sprite(&self) -> SpriteView {
        enemy_sprite(
            AssetId::GroundPatroller,
            &clips::GROUND_PATROLLER_RUN,
            self.body.pos(),
            self.body.size(),
            self.facing,
            self.frames.frame,
        )
    }
}

/// Flies a straight horizontal line, ignoring gravity and the level
#[derive(Debug, Clone)]
pub struct FlyingPatroller {
    pub id: u32,
    pos: Vec2,
    size: Vec2,
    vel_x: f32,
    turning_distance: f32,
    facing: Facing,
    distance: f32,
    hitbox: Rect,
    frames: FrameTimer,
}

impl FlyingPatroller {
    pub fn new(id: u32, pos: Vec2, tuning: &FlyingPatrolTuning, turning_distance: Option<f32>) -> Self {
        Self {
            id,
            pos,
            size: tuning.size,
            vel_x: tuning.velocity,
            turning_distance: turning_distance.unwrap_or(tuning.turning_distance),
            facing: Facing::from_velocity(tuning.velocity).unwrap_or(Facing::Left),
            distance: 0.0,
            hitbox: HitboxShape::full(tuning.size).at(pos),
            frames: FrameTimer::new(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }
}

impl Patroller for FlyingPatroller {
    fn update(&mut self, dt: f32, _obstacles: &ObstacleSet) {
        patrol_turn(&mut self.vel_x, &mut self.facing, &mut self.distance, self.turning_distance);
        self.pos.x += self.vel_x * dt;
        self.distance += self.vel_x * dt;

        self.frames.advance(dt, &clips::FLYING_PATROLLER_FLY);
        self.hitbox = HitboxShape::full(self.size).at(self.pos);
    }

    fn hitbox(&self) -> &Rect {
        &self.hitbox
    }

    fn sprite(&self) -> SpriteView {
        enemy_sprite(
            AssetId::FlyingPatroller,
            &clips::FLYING_PATROLLER_FLY,
            self.pos,
            self.size,
            self.facing,
            self.frames.frame,
        )
    }
}

/// A live enemy of either behavior
#[derive(Debug, Clone)]
pub enum Enemy {
    Ground(GroundPatroller),
    Flying(FlyingPatroller),
}

impl Enemy {
    pub fn spawn(
        id: u32,
        kind: EnemyKind,
        pos: Vec2,
        ground: &GroundPatrolTuning,
        flying: &FlyingPatrolTuning,
        turning_distance: Option<f32>,
    ) -> Self {
        match kind {
            EnemyKind::GroundPatroller => Enemy::Ground(GroundPatroller::new(id, pos, ground, turning_distance)),
            EnemyKind::FlyingPatroller => Enemy::Flying(FlyingPatroller::new(id, pos, flying, turning_distance)),
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Enemy::Ground(e) => e.id,
            Enemy::Flying(e) => e.id,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Enemy::Ground(_) => EnemyKind::GroundPatroller,
            Enemy::Flying(_) => EnemyKind::FlyingPatroller,
        }
    }

    /// Sprite top-left corner (death effects spawn here)
    pub fn pos(&self) -> Vec2 {
        match self {
            Enemy::Ground(e) => e.body.pos(),
            Enemy::Flying(e) => e.pos,
        }
    }
}

impl Patroller for Enemy {
    fn update(&mut self, dt: f32, obstacles: &ObstacleSet) {
        match self {
            Enemy::Ground(e) => e.update(dt, obstacles),
            Enemy::Flying(e) => e.update(dt, obstacles),
        }
    }

    fn hitbox(&self) -> &Rect {
        match self {
            Enemy::Ground(e) => e.hitbox(),
            Enemy::Flying(e) => e.hitbox(),
        }
    }

    fn sprite(&self) -> SpriteView {
        match self {
            Enemy::Ground(e) => e.sprite(),
            Enemy::Flying(e) => e.sprite(),
        }
    }
}
