//! Frame driver shared by the terminal front end and the simulator.

use super::session::{Session, TickResult};
use super::sinks::{dispatch, AudioSink, DisplaySink, FrameInput, InputSource};
use crate::core::clock::Clock;
use crate::core::config::SessionConfig;
use crate::core::error::Result;
use rand::Rng;

/// Drives a [`Session`] one frame at a time from a clock, an input source
/// and a random number generator, and forwards events to the sinks.
pub struct GameRunner<C: Clock, R: Rng> {
    session: Session,
    clock: C,
    rng: R,
    frames: u64,
}

impl<C: Clock, R: Rng> GameRunner<C, R> {
    pub fn new(config: SessionConfig, clock: C, rng: R) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?,
            clock,
            rng,
            frames: 0,
        })
    }

    /// Tick the clock, poll input once, run the session and dispatch events.
    pub fn frame(
        &mut self,
        input: &mut dyn InputSource,
        display: &mut dyn DisplaySink,
        audio: &mut dyn AudioSink,
    ) -> TickResult {
        let dt = self.clock.tick();
        let input = FrameInput {
            flap: input.flap_requested_this_frame(),
            restart: input.restart_requested_this_frame(),
        };
        let result = self.session.update(dt, input, &mut self.rng);
        dispatch(&result.events, display, audio);
        self.frames += 1;
        result
    }

    /// Restart a dead session immediately, outside the frame loop. Returns
    /// false (and does nothing) while the session is still running.
    pub fn restart_session(
        &mut self,
        display: &mut dyn DisplaySink,
        audio: &mut dyn AudioSink,
    ) -> bool {
        let restarted = self.session.reset();
        dispatch(&self.session.take_events(), display, audio);
        restarted
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
