//! Frame-time to fixed-tick adapter
//!
//! A host calls `advance` once per rendered frame with the real elapsed
//! time; the clock runs as many fixed `SIM_DT` ticks as that time covers.

use super::state::{GamePhase, World};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    /// Input applied to the next tick; one-shots clear once consumed
    pub input: TickInput,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconsumed time, always below one tick after `advance` returns
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Run the ticks covered by `frame_dt`; returns how many ran
    ///
    /// Afterward `world.events` holds the events of every tick run this
    /// frame, in order. It is empty when no tick ran.
    pub fn advance(&mut self, world: &mut World, frame_dt: f32) -> u32 {
        let mut frame_events = Vec::new();

        // Paused or finished: time does not build up
        if world.phase != GamePhase::Playing {
            self.accumulator = 0.0;
            let toggled = self.input.pause;
            if toggled {
                tick(world, &self.input, SIM_DT);
                frame_events.append(&mut world.events);
            }
            self.input.clear_one_shots();
            world.events = frame_events;
            return u32::from(toggled);
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(world, &self.input, SIM_DT);
            frame_events.append(&mut world.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();

            if world.phase != GamePhase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }

        // Too far behind: drop the backlog rather than spiral
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        world.events = frame_events;
        substeps
    }
}
