//! Fixed-timestep driver
//!
//! The harness feeds real frame times and raw input into a `Session`; the
//! session converts them into whole simulation ticks. Confirm and cancel are
//! latched until the next tick consumes them.

use crate::consts::*;
use crate::sim::{GameEvent, GameState, RenderSnapshot, Renderer, TickInput, tick};
use crate::tuning::Tuning;

/// Held controls as read from the keyboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub shoot: bool,
}

/// Owns the game state and the real-time accumulator
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    quit: bool,
    /// Events from every tick run during the last `advance`
    frame_events: Vec<GameEvent>,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Session created with seed {seed}");
        Self {
            state: GameState::new(seed, tuning),
            accumulator: 0.0,
            input: TickInput::default(),
            quit: false,
            frame_events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Replace the held controls; they persist until changed
    pub fn set_held(&mut self, held: HeldControls) {
        self.input.rotate_left = held.rotate_left;
        self.input.rotate_right = held.rotate_right;
        self.input.thrust = held.thrust;
        self.input.shoot = held.shoot;
    }

    /// Latch a confirm press for the next tick
    pub fn press_confirm(&mut self) {
        self.input.confirm = true;
    }

    /// Latch a cancel press for the next tick
    pub fn press_cancel(&mut self) {
        self.input.cancel = true;
    }

    pub fn request_quit(&mut self) {
        if !self.quit {
            log::info!("Quit requested");
        }
        self.quit = true;
    }

    pub fn is_running(&self) -> bool {
        !self.quit
    }

    /// Run as many ticks as `frame_time` seconds allow. Returns the count.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.frame_events.clear();
        if self.quit {
            return 0;
        }

        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.frame_events.extend_from_slice(&self.state.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.confirm = false;
            self.input.cancel = false;
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one tick regardless of the accumulator
    pub fn step(&mut self) {
        self.frame_events.clear();
        if self.quit {
            return;
        }
        tick(&mut self.state, &self.input);
        self.frame_events.extend_from_slice(&self.state.events);
        self.input.confirm = false;
        self.input.cancel = false;
    }

    /// Events raised since the last `advance` or `step` began
    pub fn frame_events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    /// Snapshot carrying every event of the last frame
    pub fn snapshot(&self) -> RenderSnapshot {
        let mut snapshot = self.state.snapshot();
        snapshot.events = self.frame_events.clone();
        snapshot
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        renderer.render(&self.snapshot());
    }
}
