use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;

/// Semantic signal that accompanies a phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Cue {
    Contract,
    Rest,
    SetRest,
    Finish,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Contract => "contract",
            Cue::Rest => "rest",
            Cue::SetRest => "set-rest",
            Cue::Finish => "finish",
        }
    }

    /// Tone pitch in Hz for emitters that can synthesize one.
    pub fn frequency_hz(&self) -> u32 {
        match self {
            Cue::Contract => 800,
            Cue::Rest => 400,
            Cue::SetRest | Cue::Finish => 600,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Cue::Contract | Cue::Rest => Duration::from_millis(200),
            Cue::SetRest | Cue::Finish => Duration::from_millis(500),
        }
    }

    /// Long cues mark the end of a set or of the whole session.
    pub fn is_long(&self) -> bool {
        self.duration() >= Duration::from_millis(500)
    }
}

/// Consumer of cues. Playing is best-effort and never fails the caller.
pub trait CueEmitter {
    fn play(&mut self, cue: Cue);

    fn set_enabled(&mut self, _enabled: bool) {}

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Rings the terminal bell: once for short cues, twice for long ones.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    fn ring(&mut self, cue: Cue) -> io::Result<()> {
        let bells: &[u8] = if cue.is_long() { b"\x07\x07" } else { b"\x07" };
        self.out.write_all(bells)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CueEmitter for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if !self.enabled {
            tracing::debug!(cue = cue.name(), "cue muted");
            return;
        }
        match self.ring(cue) {
            Ok(()) => tracing::debug!(
                cue = cue.name(),
                hz = cue.frequency_hz(),
                ms = cue.duration().as_millis() as u64,
                "cue played"
            ),
            Err(e) => tracing::warn!(cue = cue.name(), error = %e, "failed to play cue"),
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Records cues in order; for headless sessions and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingCues {
    pub played: Vec<Cue>,
    muted: bool,
}

impl RecordingCues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.played.iter().map(Cue::name).collect()
    }
}

impl CueEmitter for RecordingCues {
    fn play(&mut self, cue: Cue) {
        if !self.muted {
            self.played.push(cue);
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.muted = !enabled;
    }

    fn is_enabled(&self) -> bool {
        !self.muted
    }
}
