//! Fixed timestep simulation tick
//!
//! Per tick: input, throw, entity updates, interaction pass, effect
//! cleanup, camera.

use super::resolver;
use super::state::{GamePhase, World};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]
    pub move_axis: f32,
    /// Jump pressed (one-shot)
    pub jump: bool,
    /// Throw pressed (one-shot)
    pub throw: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

impl TickInput {
    /// Clear the one-shot presses after they were consumed
    pub fn clear_one_shots(&mut self) {
        self.jump = false;
        self.throw = false;
        self.pause = false;
    }
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    world.events.clear();

    // Handle pause toggle
    if input.pause {
        match world.phase {
            GamePhase::Playing => {
                log::info!("Paused");
                world.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                world.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }

    if world.phase != GamePhase::Playing {
        return;
    }
    world.time_ticks += 1;

    world.player.handle_horizontal_input(input.move_axis);
    if input.jump {
        world.player.jump();
    }
    if input.throw {
        world.player.wants_throw = true;
    }
    // Thrown from where the player stood at the start of the tick
    if world.player.take_throw_request() {
        world.spawn_projectile();
    }

    world.advance_entities(dt);

    // Won/GameOver freeze the world as it is this tick
    if resolver::resolve(world).is_break() {
        return;
    }

    world.effects.retain(|e| !e.finished());
    world.camera.follow(world.player.pos());
}
