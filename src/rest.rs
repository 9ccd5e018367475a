//! # Rest Synthesizer
//!
//! Resolves a track's chords to microseconds and fills every gap in its
//! timeline with a rest, so playback of the track can simply run its chords
//! back to back from time zero.

use log::trace;

use crate::error::ConvertError;
use crate::model::Chord;
use crate::partition::Track;
use crate::tempo::TimeResolver;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotKind<'a> {
    Rest,
    Chord(&'a Chord),
}

/// One entry of a padded track, positioned in absolute time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot<'a> {
    pub start_micros: u64,
    pub duration_micros: u64,
    pub kind: SlotKind<'a>,
}

impl Slot<'_> {
    pub fn end_micros(&self) -> u64 {
        self.start_micros + self.duration_micros
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, SlotKind::Rest)
    }
}

/// Lay out a track in absolute time, inserting a rest before every chord that
/// starts after the previous one ended (or after zero, for the first chord).
pub fn pad_with_rests<'a, R: TimeResolver + ?Sized>(
    track: &'a Track,
    resolver: &R,
) -> Result<Vec<Slot<'a>>, ConvertError> {
    let mut slots = Vec::with_capacity(track.chords.len() * 2);
    let mut last_end = 0u64;

    for chord in &track.chords {
        let start_micros = resolver.time_to_micros(chord.start)?;
        let duration_micros = resolver.length_to_micros(chord.length, chord.start)?;

        if last_end < start_micros {
            trace!("rest of {} µs at {} µs", start_micros - last_end, last_end);
            slots.push(Slot {
                start_micros: last_end,
                duration_micros: start_micros - last_end,
                kind: SlotKind::Rest,
            });
        }

        slots.push(Slot {
            start_micros,
            duration_micros,
            kind: SlotKind::Chord(chord),
        });
        last_end = start_micros.checked_add(duration_micros).ok_or_else(|| {
            ConvertError::Resolver(format!("{} µs + {} µs overflows", start_micros, duration_micros))
        })?;
    }

    Ok(slots)
}
