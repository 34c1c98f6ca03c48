//! Interaction pass
//!
//! Runs once per tick after every entity has moved, turning overlaps into
//! gameplay consequences. Stages run in a fixed order: gems, enemies,
//! projectiles. A stage that ends the level breaks out of the whole pass.

use std::ops::ControlFlow;

use super::effects::{EffectKind, SpriteEffect};
use super::enemy::Patroller;
use super::projectile::ProjectileState;
use super::state::{GameEvent, GamePhase, KillCause, World};

/// Resolve every player/enemy/gem/projectile interaction for this tick
pub fn resolve(world: &mut World) -> ControlFlow<()> {
    collect_gems(world)?;
    resolve_enemy_contacts(world)?;
    resolve_projectiles(world)
}

/// Deplete a heart and start invincibility, unless already invincible
pub fn damage_player(world: &mut World) -> ControlFlow<()> {
    if world.player.is_invincible() || !world.hearts.deplete_last_full() {
        return ControlFlow::Continue(());
    }
    let window = world.tuning().rules.damage_invincibility;
    world.player.take_damage(window);

    let hearts_left = world.hearts.full_count();
    log::debug!("Player hit, {} hearts left", hearts_left);
    world.events.push(GameEvent::PlayerDamaged { hearts_left });

    if world.hearts.is_empty() {
        log::info!("Game over after {} ticks", world.time_ticks);
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

fn collect_gems(world: &mut World) -> ControlFlow<()> {
    let player = *world.player.hitbox();
    let mut i = 0;
    while i < world.gems.len() {
        if !world.gems[i].hitbox().intersects(&player) {
            i += 1;
            continue;
        }

        let gem = world.gems.remove(i);
        world.effects.push(SpriteEffect::spawn(EffectKind::GemCollection, gem.pos()));
        world.score += 1;
        world.events.push(GameEvent::GemCollected {
            id: gem.id,
            score: world.score,
        });

        if world.gems.is_empty() {
            log::info!("All gems collected (score {})", world.score);
            world.phase = GamePhase::Won;
            world.events.push(GameEvent::Won);
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

fn resolve_enemy_contacts(world: &mut World) -> ControlFlow<()> {
    let stomp_tolerance = world.tuning().rules.stomp_tolerance;
    let mut i = 0;
    while i < world.enemies.len() {
        let player = *world.player.hitbox();
        let enemy_box = *world.enemies[i].hitbox();
        if !player.intersects(&enemy_box) {
            i += 1;
            continue;
        }

        let stomp = world.player.vel().y > 0.0 && player.bottom <= enemy_box.top + stomp_tolerance;
        if stomp {
            world.player.bounce();
            let enemy = world.enemies.remove(i);
            world.effects.push(SpriteEffect::spawn(EffectKind::EnemyDeath, enemy.pos()));
            log::debug!("Enemy {} stomped", enemy.id());
            world.events.push(GameEvent::EnemyKilled {
                id: enemy.id(),
                kind: enemy.kind(),
                cause: KillCause::Stomp,
            });
        } else {
            damage_player(world)?;
            i += 1;
        }
    }
    ControlFlow::Continue(())
}

fn resolve_projectiles(world: &mut World) -> ControlFlow<()> {
    let mut i = 0;
    while i < world.projectiles.len() {
        let projectile = &world.projectiles[i];
        if projectile.state() == ProjectileState::Flying && !projectile.in_grace() {
            let hitbox = *projectile.hitbox();
            let contact = hitbox.intersects(world.player.hitbox())
                || world.enemies.iter().any(|e| hitbox.intersects(e.hitbox()))
                || world.obstacles().first_intersecting(&hitbox).is_some();
            if contact {
                world.projectiles[i].detonate();
            }
        }

        if world.projectiles[i].state() != ProjectileState::Detonated {
            i += 1;
            continue;
        }

        let projectile = world.projectiles.remove(i);
        world.effects.push(SpriteEffect::spawn(EffectKind::Explosion, projectile.pos()));
        log::debug!("Projectile {} detonated", projectile.id);
        world.events.push(GameEvent::ProjectileDetonated { id: projectile.id });

        let blast = projectile.blast_area();
        let mut j = 0;
        while j < world.enemies.len() {
            if !blast.intersects(world.enemies[j].hitbox()) {
                j += 1;
                continue;
            }
            let enemy = world.enemies.remove(j);
            world.effects.push(SpriteEffect::spawn(EffectKind::EnemyDeath, enemy.pos()));
            world.events.push(GameEvent::EnemyKilled {
                id: enemy.id(),
                kind: enemy.kind(),
                cause: KillCause::Explosion,
            });
        }

        if blast.intersects(world.player.hitbox()) {
            damage_player(world)?;
        }
    }
    ControlFlow::Continue(())
}
