//! Rotating promise suggestions.
//!
//! A fixed catalog cycles under the promise input. The schedule is pure
//! arithmetic over elapsed time; the caller owns the clock and any
//! actual fading.

pub const SUGGESTIONS: [&str; 12] = [
    "Drink more water",
    "Stop scrolling by 8pm",
    "Go for a walk",
    "Hit the gym",
    "Call granny",
    "Move for 2 minutes every hour",
    "Stretch for 5 minutes",
    "Clear my email inbox",
    "Tidy my desk",
    "Compliment a stranger",
    "Read 2 chapters of my book",
    "No snacks today",
];

/// How long each suggestion stays readable.
pub const DISPLAY_MS: u64 = 3000;
/// Fade-out window at the end of each display cycle.
pub const FADE_OUT_MS: u64 = 500;
/// Fade-in window at the start of every cycle after the first.
pub const FADE_IN_MS: u64 = 500;

const CYCLE_MS: u64 = DISPLAY_MS + FADE_OUT_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FadingIn,
    Steady,
    FadingOut,
}

/// Snapshot of the rotation at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub phase: Phase,
}

impl Frame {
    pub fn text(&self) -> &'static str {
        SUGGESTIONS[self.index]
    }

    pub fn visible(&self) -> bool {
        self.phase != Phase::FadingOut
    }
}

/// Rotation state after `elapsed_ms` milliseconds.
///
/// The first suggestion appears without a fade-in; every later cycle
/// fades in over [`FADE_IN_MS`] before holding steady.
pub fn frame_at(elapsed_ms: u64) -> Frame {
    let cycle = elapsed_ms / CYCLE_MS;
    let offset = elapsed_ms % CYCLE_MS;
    let index = (cycle % SUGGESTIONS.len() as u64) as usize;

    let phase = if offset >= DISPLAY_MS {
        Phase::FadingOut
    } else if cycle > 0 && offset < FADE_IN_MS {
        Phase::FadingIn
    } else {
        Phase::Steady
    };

    Frame { index, phase }
}

pub fn suggestion_at(elapsed_ms: u64) -> &'static str {
    frame_at(elapsed_ms).text()
}
