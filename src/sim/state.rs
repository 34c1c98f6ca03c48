//! World state
//!
//! One `World` per running level. It owns every entity plus the static
//! geometry, and is rebuilt from the `Level` on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::effects::SpriteEffect;
use super::enemy::{Enemy, EnemyKind, Patroller};
use super::health::HealthTrack;
use super::obstacle::ObstacleSet;
use super::pickup::Gem;
use super::player::Player;
use super::projectile::{Projectile, ProjectileState};
use super::snapshot::RenderSnapshot;
use crate::level::Level;
use crate::tuning::Tuning;

/// Game phase state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; only a pause toggle is processed
    Paused,
    /// Every gem collected
    Won,
    /// Every heart depleted
    GameOver,
}

impl GamePhase {
    /// Won and GameOver end the level; nothing ticks afterward
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver)
    }
}

/// Why an enemy died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Stomp,
    Explosion,
}

/// Discrete things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GemCollected { id: u32, score: u32 },
    EnemyKilled { id: u32, kind: EnemyKind, cause: KillCause },
    PlayerDamaged { hearts_left: usize },
    ProjectileThrown { id: u32 },
    ProjectileLanded { id: u32 },
    ProjectileDetonated { id: u32 },
    Won,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Remaining gems, in level order
    pub gems: Vec<Gem>,
    /// Projectiles in flight or ticking, in throw order
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<SpriteEffect>,
    pub hearts: HealthTrack,
    pub camera: Camera,
    /// Gems collected
    pub score: u32,
    /// Simulation ticks run while playing
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    obstacles: ObstacleSet,
    level_size: Vec2,
    tuning: Tuning,
    next_id: u32,
}

impl World {
    pub fn new(level: &Level, tuning: Tuning) -> Self {
        let mut world = Self {
            phase: GamePhase::Playing,
            player: Player::new(&tuning.player),
            enemies: Vec::with_capacity(level.enemy_spawns.len()),
            gems: Vec::with_capacity(level.gem_spawns.len()),
            projectiles: Vec::new(),
            effects: Vec::new(),
            hearts: HealthTrack::new(tuning.rules.hearts),
            camera: Camera::new(&tuning.camera),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            obstacles: level.obstacles.clone(),
            level_size: level.size,
            tuning,
            next_id: 1,
        };

        for &pos in &level.gem_spawns {
            let id = world.next_entity_id();
            world.gems.push(Gem::new(id, pos));
        }
        for spawn in &level.enemy_spawns {
            let id = world.next_entity_id();
            let enemy = Enemy::spawn(
                id,
                spawn.kind,
                spawn.pos,
                &world.tuning.ground_patroller,
                &world.tuning.flying_patroller,
                spawn.turning_distance,
            );
            world.enemies.push(enemy);
        }

        world.camera.set_level_bounds(level.size);
        world.camera.follow(world.player.pos());

        log::info!(
            "World ready: {} gems, {} enemies, {} hearts",
            world.gems.len(),
            world.enemies.len(),
            world.hearts.total()
        );
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn level_size(&self) -> Vec2 {
        self.level_size
    }

    /// Launch a projectile from the player's hand
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        let origin = self.player.throw_origin(self.tuning.projectile.size.x);
        let projectile = Projectile::thrown(id, origin, self.player.facing(), &self.tuning.projectile);
        log::debug!("Projectile {} thrown from ({:.1}, {:.1})", id, origin.x, origin.y);
        self.projectiles.push(projectile);
        self.events.push(GameEvent::ProjectileThrown { id });
        id
    }

    /// Move every entity one step; no interactions yet
    pub fn advance_entities(&mut self, dt: f32) {
        let obstacles = &self.obstacles;
        self.player.update(dt, obstacles);
        for enemy in &mut self.enemies {
            enemy.update(dt, obstacles);
        }
        for gem in &mut self.gems {
            gem.update(dt);
        }
        for effect in &mut self.effects {
            effect.update(dt);
        }
        for projectile in &mut self.projectiles {
            if projectile.update(dt, obstacles) == Some(ProjectileState::Ticking) {
                log::debug!("Projectile {} landed", projectile.id);
                self.events.push(GameEvent::ProjectileLanded { id: projectile.id });
            }
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            player: self.player.sprite(),
            player_invincible: self.player.is_invincible(),
            enemies: self.enemies.iter().map(Patroller::sprite).collect(),
            gems: self.gems.iter().map(Gem::sprite).collect(),
            projectiles: self.projectiles.iter().map(Projectile::sprite).collect(),
            effects: self.effects.iter().map(SpriteEffect::sprite).collect(),
            camera_offset: self.camera.offset(),
            screen_offset: self.camera.screen_offset(),
            zoom: self.camera.zoom(),
            hearts: self.hearts.states(),
            score: self.score,
            gems_remaining: self.gems.len(),
        }
    }
}
