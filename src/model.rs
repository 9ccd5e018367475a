//! # Performance Model
//!
//! Input types for a conversion run: notes grouped into chords, positioned in
//! symbolic (tick) time.
//!
//! ```text
//! Performance
//!   ├── TempoMap
//!   └── Vec<Chord>            (non-decreasing by start)
//!         ├── start, length   (ticks)
//!         └── Vec<Note>       (insertion order)
//!               ├── pitch: PitchClass (C, CSharp, ... B)
//!               ├── octave: i32 (middle C = C4)
//!               ├── start, length (ticks)
//!               └── velocity: i32
//! ```
//!
//! Times stay symbolic here. They only become microseconds when a
//! [`TimeResolver`](crate::tempo::TimeResolver) is applied during formatting.

use crate::error::ConvertError;
use crate::tempo::TempoMap;

/// Tick at which a span starting at `start` and lasting `length` ends.
fn span_end(start: u64, length: u64) -> Result<u64, ConvertError> {
    start
        .checked_add(length)
        .ok_or_else(|| ConvertError::Resolver(format!("tick {} + {} overflows", start, length)))
}

/// The twelve pitch classes, sharps spelled out the long way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Long-form name, e.g. `"CSharp"`.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "CSharp",
            PitchClass::D => "D",
            PitchClass::DSharp => "DSharp",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "FSharp",
            PitchClass::G => "G",
            PitchClass::GSharp => "GSharp",
            PitchClass::A => "A",
            PitchClass::ASharp => "ASharp",
            PitchClass::B => "B",
        }
    }

    /// Split a MIDI key number into pitch class and octave (60 = C4).
    pub fn from_midi_key(key: u8) -> (PitchClass, i32) {
        let pitch = Self::ALL[(key % 12) as usize];
        let octave = (key / 12) as i32 - 1;
        (pitch, octave)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub pitch: PitchClass,
    pub octave: i32,
    pub start: u64,
    pub length: u64,
    pub velocity: i32,
}

impl Note {
    pub fn end(&self) -> Result<u64, ConvertError> {
        span_end(self.start, self.length)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub start: u64,
    pub length: u64,
    pub notes: Vec<Note>,
}

impl Chord {
    /// Build a chord spanning its notes: it starts with the earliest note and
    /// ends with the latest one.
    ///
    /// Returns `None` for an empty note list or a note whose end does not
    /// fit in a tick count.
    pub fn from_notes(notes: Vec<Note>) -> Option<Chord> {
        let start = notes.iter().map(|n| n.start).min()?;
        let end = notes
            .iter()
            .map(|n| n.end().ok())
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .max()?;
        Some(Chord {
            start,
            length: end - start,
            notes,
        })
    }

    pub fn end(&self) -> Result<u64, ConvertError> {
        span_end(self.start, self.length)
    }
}

/// A fully read performance: chords in onset order plus the tempo map that
/// gives their ticks a real duration.
#[derive(Debug, Clone)]
pub struct Performance {
    pub chords: Vec<Chord>,
    pub tempo_map: TempoMap,
}
