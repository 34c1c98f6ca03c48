//! Player controller
//!
//! Horizontal velocity comes straight from the input axis; vertical motion
//! is gravity plus jump/bounce impulses. The animation state is recomputed
//! every tick from the body's physical state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{AnimationClip, FrameTimer, clips};
use super::body::{HitboxShape, KinematicBody};
use super::geom::Rect;
use super::obstacle::ObstacleSet;
use super::snapshot::SpriteView;
use crate::assets::AssetId;
use crate::consts::PLAYER_MIN_X;
use crate::tuning::PlayerTuning;

/// Which way a sprite is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal velocity, if it is nonzero
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Facing::Right)
        } else if vx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Player animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAnim {
    Idle,
    Run,
    Jump,
    Fall,
    /// Present on the sheet; locomotion never selects it
    Roll,
}

const PLAYER_CLIPS: [AnimationClip; 5] = [
    clips::PLAYER_IDLE,
    clips::PLAYER_RUN,
    clips::PLAYER_JUMP,
    clips::PLAYER_FALL,
    clips::PLAYER_ROLL,
];

impl PlayerAnim {
    #[inline]
    pub fn clip(self) -> &'static AnimationClip {
        &PLAYER_CLIPS[self as usize]
    }

    /// Pick the animation for the given physical state.
    ///
    /// Airborne with no vertical velocity (apex, ceiling bonk) keeps `current`.
    pub fn select(grounded: bool, vel: Vec2, current: PlayerAnim) -> PlayerAnim {
        if !grounded && vel.y < 0.0 {
            PlayerAnim::Jump
        } else if !grounded && vel.y > 0.0 {
            PlayerAnim::Fall
        } else if grounded && vel.x != 0.0 {
            PlayerAnim::Run
        } else if grounded {
            PlayerAnim::Idle
        } else {
            current
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    body: KinematicBody,
    tuning: PlayerTuning,
    facing: Facing,
    /// Seconds of invincibility left (invincible while > 0)
    invincibility: f32,
    anim: PlayerAnim,
    frames: FrameTimer,
    /// Set by input, consumed by the world within the same tick
    pub wants_throw: bool,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        let shape = HitboxShape {
            offset: tuning.hitbox_offset,
            size: tuning.hitbox_size,
        };
        Self {
            body: KinematicBody::new(tuning.spawn, Vec2::splat(tuning.size), shape),
            tuning: tuning.clone(),
            facing: Facing::Right,
            invincibility: 0.0,
            anim: PlayerAnim::Fall,
            frames: FrameTimer::new(),
            wants_throw: false,
        }
    }

    #[inline]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos()
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    #[inline]
    pub fn hitbox(&self) -> &Rect {
        self.body.hitbox()
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn anim(&self) -> PlayerAnim {
        self.anim
    }

    #[inline]
    pub fn frame(&self) -> u32 {
        self.frames.frame
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    #[inline]
    pub fn invincibility_remaining(&self) -> f32 {
        self.invincibility
    }

    /// Set horizontal velocity from an input axis in [-1, 1]
    pub fn handle_horizontal_input(&mut self, axis: f32) {
        self.body.vel.x = axis.clamp(-1.0, 1.0) * self.tuning.run_speed;
    }

    /// Upward impulse; allowed in the air as well as on the ground
    pub fn jump(&mut self) {
        self.body.vel.y = -self.tuning.jump_power;
        self.body.leave_ground();
    }

    /// Weaker upward impulse after stomping an enemy
    pub fn bounce(&mut self) {
        self.body.vel.y = -self.tuning.bounce_power;
        self.body.leave_ground();
    }

    /// Start an invincibility window unless one is already running.
    ///
    /// Returns true if the hit registered.
    pub fn take_damage(&mut self, duration: f32) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincibility = duration;
        true
    }

    /// Read and clear the throw request
    pub fn take_throw_request(&mut self) -> bool {
        std::mem::take(&mut self.wants_throw)
    }

    /// Spawn point for a projectile of the given width, in front of the player
    pub fn throw_origin(&self, projectile_width: f32) -> Vec2 {
        let hitbox = self.body.hitbox();
        let x = match self.facing {
            Facing::Right => hitbox.right + 1.0,
            Facing::Left => hitbox.left - projectile_width - 1.0,
        };
        Vec2::new(x, self.body.pos().y + self.body.size().y / 4.0)
    }

    /// Sheet faces right; drawn translucent while invincible
    pub fn sprite(&self) -> SpriteView {
        SpriteView {
            asset: AssetId::Player,
            pos: self.body.pos(),
            size: self.body.size(),
            source: self.anim.clip().source_rect(self.frames.frame),
            flip_x: self.facing == Facing::Left,
            translucent: self.is_invincible(),
        }
    }

    /// Advance one tick
    pub fn update(&mut self, dt: f32, obstacles: &ObstacleSet) {
        if self.invincibility > 0.0 {
            self.invincibility = (self.invincibility - dt).max(0.0);
        }

        self.frames.advance(dt, self.anim.clip());

        self.body.integrate_x(dt);
        self.body.clamp_min_x(PLAYER_MIN_X);
        self.body.resolve_x(obstacles);

        self.body.apply_gravity(dt, self.tuning.gravity);
        self.body.integrate_y(dt);
        self.body.resolve_y(obstacles);

        if let Some(facing) = Facing::from_velocity(self.body.vel.x) {
            self.facing = facing;
        }

        let next = PlayerAnim::select(self.body.grounded(), self.body.vel, self.anim);
        if next != self.anim {
            self.anim = next;
            self.frames.reset();
        }
    }

    /// Teleport (level setup and tests)
    pub fn set_pos(&mut self, pos: Vec2) {
        self.body.set_pos(pos);
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

    fn landed_player(obstacles: &ObstacleSet) -> Player {
        let mut player = Player::new(&PlayerTuning::default());
        for _ in 0..240 {
            player.update(SIM_DT, obstacles);
        }
        assert!(player.body().grounded());
        player
    }

    #[test]
    fn test_anim_selection_priority() {
        use PlayerAnim::*;
        assert_eq!(PlayerAnim::select(false, Vec2::new(100.0, -10.0), Idle), Jump);
        assert_eq!(PlayerAnim::select(false, Vec2::new(0.0, 10.0), Idle), Fall);
        assert_eq!(PlayerAnim::select(true, Vec2::new(-5.0, 0.0), Idle), Run);
        assert_eq!(PlayerAnim::select(true, Vec2::ZERO, Run), Idle);
        assert_eq!(PlayerAnim::select(false, Vec2::ZERO, Jump), Jump);
    }

    #[test]
    fn test_player_lands_idle() {
        let obstacles = floor();
        let player = landed_player(&obstacles);
        assert_eq!(player.anim(), PlayerAnim::Idle);
        assert_eq!(player.hitbox().bottom, 160.0);
    }

    #[test]
    fn test_run_input_sets_velocity_and_facing() {
        let obstacles = floor();
        let mut player = landed_player(&obstacles);

        player.handle_horizontal_input(-1.0);
        player.update(SIM_DT, &obstacles);
        assert_eq!(player.vel().x, -200.0);
        assert_eq!(player.facing(), Facing::Left);
        assert_eq!(player.anim(), PlayerAnim::Run);

        player.handle_horizontal_input(0.0);
        player.update(SIM_DT, &obstacles);
        assert_eq!(player.facing(), Facing::Left);
        assert_eq!(player.anim(), PlayerAnim::Idle);
    }

    #[test]
    fn test_input_axis_is_clamped() {
        let mut player = Player::new(&PlayerTuning::default());
        player.handle_horizontal_input(3.0);
        assert_eq!(player.vel().x, 200.0);
    }

    #[test]
    fn test_jump_goes_airborne() {
        let obstacles = floor();
        let mut player = landed_player(&obstacles);

        player.jump();
        player.update(SIM_DT, &obstacles);
        assert!(!player.body().grounded());
        assert!(player.vel().y < 0.0);
        assert_eq!(player.anim(), PlayerAnim::Jump);
    }

    #[test]
    fn test_jump_is_not_gated_on_ground() {
        let mut player = Player::new(&PlayerTuning::default());
        assert!(!player.body().grounded());
        player.jump();
        assert_eq!(player.vel().y, -250.0);
    }

    #[test]
    fn test_bounce_is_weaker_than_jump() {
        let mut player = Player::new(&PlayerTuning::default());
        player.bounce();
        assert_eq!(player.vel().y, -200.0);
    }

    #[test]
    fn test_left_edge_clamp() {
        let obstacles = floor();
        let mut player = landed_player(&obstacles);
        player.set_pos(Vec2::new(3.0, player.pos().y));
        player.handle_horizontal_input(-1.0);
        for _ in 0..10 {
            player.update(SIM_DT, &obstacles);
        }
        assert_eq!(player.pos().x, PLAYER_MIN_X);
    }

    #[test]
    fn test_take_damage_ignored_while_invincible() {
        let mut player = Player::new(&PlayerTuning::default());
        assert!(player.take_damage(1.5));
        assert!(player.is_invincible());
        assert!(!player.take_damage(1.5));
        assert!(!player.take_damage(10.0));
        assert_eq!(player.invincibility_remaining(), 1.5);
    }

    #[test]
    fn test_invincibility_expires() {
        let obstacles = floor();
        let mut player = Player::new(&PlayerTuning::default());
        player.take_damage(0.5);
        for _ in 0..59 {
            player.update(SIM_DT, &obstacles);
        }
        assert!(player.is_invincible());
        for _ in 0..2 {
            player.update(SIM_DT, &obstacles);
        }
        assert!(!player.is_invincible());
        assert!(player.take_damage(0.5));
    }

    #[test]
    fn test_throw_request_is_one_shot() {
        let mut player = Player::new(&PlayerTuning::default());
        player.wants_throw = true;
        assert!(player.take_throw_request());
        assert!(!player.take_throw_request());
    }

    #[test]
    fn test_throw_origin_depends_on_facing() {
        let mut player = Player::new(&PlayerTuning::default());
        // Spawn (100, 100): hitbox x 104..124
        assert_eq!(player.throw_origin(16.0), Vec2::new(125.0, 108.0));

        player.handle_horizontal_input(-1.0);
        player.update(SIM_DT, &ObstacleSet::default());
        let hitbox_left = player.hitbox().left;
        let origin = player.throw_origin(16.0);
        assert!((origin.x - (hitbox_left - 17.0)).abs() < 1e-4);
    }

    #[test]
    fn test_switching_anim_resets_frame() {
        let obstacles = floor();
        let mut player = landed_player(&obstacles);
        player.handle_horizontal_input(1.0);
        for _ in 0..30 {
            player.update(SIM_DT, &obstacles);
        }
        assert_eq!(player.anim(), PlayerAnim::Run);
        assert!(player.frame() > 0);

        player.jump();
        player.update(SIM_DT, &obstacles);
        assert_eq!(player.anim(), PlayerAnim::Jump);
        assert_eq!(player.frame(), 0);
    }
}
