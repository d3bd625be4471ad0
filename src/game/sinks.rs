//! Collaborator contracts for input, display and audio.
//!
//! The session never calls these directly. It reports [`SessionEvent`]s and
//! [`dispatch`] maps them onto whatever sinks the front end supplies.

use super::session::SessionEvent;
use super::types::Cue;

/// Per-frame input, polled once per frame.
pub trait InputSource {
    fn flap_requested_this_frame(&mut self) -> bool;
    fn restart_requested_this_frame(&mut self) -> bool;
}

/// Score and game-over presentation.
pub trait DisplaySink {
    fn show_score(&mut self, value: u32);
    fn show_game_over(&mut self, visible: bool);
}

/// Fire-and-forget audio. Implementations must treat a missing cue asset
/// as a silent no-op.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Input for a single frame, already sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub flap: bool,
    pub restart: bool,
}

impl FrameInput {
    pub const NONE: FrameInput = FrameInput {
        flap: false,
        restart: false,
    };
    pub const FLAP: FrameInput = FrameInput {
        flap: true,
        restart: false,
    };
    pub const RESTART: FrameInput = FrameInput {
        flap: false,
        restart: true,
    };
}

impl InputSource for FrameInput {
    fn flap_requested_this_frame(&mut self) -> bool {
        self.flap
    }

    fn restart_requested_this_frame(&mut self) -> bool {
        self.restart
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn show_score(&mut self, _value: u32) {}
    fn show_game_over(&mut self, _visible: bool) {}
}

impl AudioSink for NullSink {
    fn play(&mut self, _cue: Cue) {}
}

/// Display sink that remembers what it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct DisplayLog {
    pub scores: Vec<u32>,
    pub game_over_visible: bool,
    pub game_over_toggles: Vec<bool>,
}

impl DisplaySink for DisplayLog {
    fn show_score(&mut self, value: u32) {
        self.scores.push(value);
    }

    fn show_game_over(&mut self, visible: bool) {
        self.game_over_visible = visible;
        self.game_over_toggles.push(visible);
    }
}

/// Audio sink that remembers every cue played.
#[derive(Debug, Clone, Default)]
pub struct AudioLog {
    pub cues: Vec<Cue>,
}

impl AudioLog {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for AudioLog {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Forward session events to the display and audio sinks.
pub fn dispatch(events: &[SessionEvent], display: &mut dyn DisplaySink, audio: &mut dyn AudioSink) {
    for event in events {
        match event {
            SessionEvent::Flapped => audio.play(Cue::Flap),
            SessionEvent::Scored { score, .. } => {
                display.show_score(*score);
                audio.play(Cue::Score);
            }
            SessionEvent::Died { .. } => {
                display.show_game_over(true);
                audio.play(Cue::Death);
            }
            SessionEvent::Restarted => {
                display.show_game_over(false);
                display.show_score(0);
            }
            SessionEvent::PairSpawned(_) | SessionEvent::PairExpired(_) => {}
        }
    }
}
