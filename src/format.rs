//! # Note, Chord and Track Formatters
//!
//! Turn partitioned tracks into output records: times are resolved to
//! seconds, note names are rewritten for the synth, and each note gets its
//! velocity-derived dynamics.

use log::debug;

use crate::envelope::{dynamics_for_velocity, Dynamics};
use crate::error::ConvertError;
use crate::model::{Chord, Note};
use crate::output::{OutputChord, OutputNote, OutputSong, OutputTrack, PlaybackType};
use crate::partition::Track;
use crate::rest::{pad_with_rests, SlotKind};
use crate::tempo::TimeResolver;

pub const MICROSECONDS_TO_SECONDS: f64 = 0.000001;

/// Note name the synth uses for silence.
pub const REST_NOTE_NAME: &str = "S";

pub fn micros_to_seconds(micros: u64) -> f64 {
    micros as f64 * MICROSECONDS_TO_SECONDS
}

/// Rewrite a pitch name for the synth: sharps become first letter + `s`
/// (`"CSharp"` -> `"Cs"`), everything else passes through.
pub fn synth_note_name(name: &str) -> String {
    if name.contains("Sharp") {
        if let Some(first) = name.chars().next() {
            return format!("{}s", first);
        }
    }
    name.to_string()
}

fn output_note(note: String, octave: i32, duration: f64, dynamics: Dynamics) -> OutputNote {
    OutputNote {
        note,
        octave,
        duration,
        peak_intensity: dynamics.peak_intensity,
        sustain_intensity: dynamics.sustain_intensity,
        adsr_envelope: dynamics.envelope.as_array(),
    }
}

pub fn format_note<R: TimeResolver + ?Sized>(
    note: &Note,
    resolver: &R,
) -> Result<OutputNote, ConvertError> {
    let micros = resolver.length_to_micros(note.length, note.start)?;
    Ok(output_note(
        synth_note_name(note.pitch.name()),
        note.octave,
        micros_to_seconds(micros),
        dynamics_for_velocity(note.velocity),
    ))
}

pub fn format_chord<R: TimeResolver + ?Sized>(
    chord: &Chord,
    resolver: &R,
) -> Result<OutputChord, ConvertError> {
    let music_notes = chord
        .notes
        .iter()
        .map(|note| format_note(note, resolver))
        .collect::<Result<Vec<_>, _>>()?;
    let micros = resolver.length_to_micros(chord.length, chord.start)?;

    Ok(OutputChord {
        music_notes,
        duration: micros_to_seconds(micros),
    })
}

/// A silent chord filling `micros` of a track.
pub fn format_rest(micros: u64) -> OutputChord {
    let seconds = micros_to_seconds(micros);
    OutputChord {
        music_notes: vec![output_note(
            REST_NOTE_NAME.to_string(),
            0,
            seconds,
            Dynamics::SILENT,
        )],
        duration: seconds,
    }
}

pub fn format_track<R: TimeResolver + ?Sized>(
    track: &Track,
    resolver: &R,
) -> Result<OutputTrack, ConvertError> {
    let music_chords = pad_with_rests(track, resolver)?
        .into_iter()
        .map(|slot| match slot.kind {
            SlotKind::Rest => Ok(format_rest(slot.duration_micros)),
            SlotKind::Chord(chord) => format_chord(chord, resolver),
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "track of {} chords padded to {}",
        track.chords.len(),
        music_chords.len()
    );

    Ok(OutputTrack {
        music_chords,
        playback_type: PlaybackType::Mono,
    })
}

pub fn format_song<R: TimeResolver + ?Sized>(
    tracks: &[Track],
    resolver: &R,
) -> Result<OutputSong, ConvertError> {
    let music_tracks = tracks
        .iter()
        .map(|track| format_track(track, resolver))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OutputSong { music_tracks })
}
