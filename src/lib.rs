//! # midisynth
//!
//! Converts a MIDI performance into a C literal of monophonic tracks for a
//! small embedded synth.
//!
//! ## Pipeline
//! 1. Read the MIDI file into onset-ordered chords and a tempo map (`midi`)
//! 2. Split overlapping chords into monophonic tracks, first fit (`partition`)
//! 3. Resolve ticks to microseconds and fill timeline gaps with rests (`rest`)
//! 4. Derive each note's dynamics from its velocity (`envelope`)
//! 5. Build the output records (`format`) and render them (`literal`)
//!
//! Steps 2 through 5 only need a [`TimeResolver`], so chords from any source
//! can be converted with [`convert_chords`].

pub mod config;
pub mod envelope;
pub mod error;
pub mod format;
pub mod literal;
pub mod midi;
pub mod model;
pub mod output;
pub mod partition;
pub mod rest;
pub mod summary;
pub mod tempo;

pub use config::{Adjacency, ConvertConfig};
pub use error::*;
pub use literal::to_literal;
pub use midi::read_performance;
pub use model::{Chord, Note, Performance, PitchClass};
pub use output::{OutputChord, OutputNote, OutputSong, OutputTrack, PlaybackType};
pub use tempo::{TempoMap, TimeResolver};

use log::debug;

/// Convert MIDI file bytes to the synth literal.
/// This is the main entry point for the library.
///
/// # Example
/// ```rust
/// use midisynth::{convert, ConvertConfig};
///
/// // A format 0 file with one empty track
/// let bytes = [
///     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
///     b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0, 0xFF, 0x2F, 0,
/// ];
/// let literal = convert(&bytes, &ConvertConfig::default())?;
/// assert!(literal.ends_with(".num_tracks = 0}"));
/// # Ok::<(), midisynth::ConvertError>(())
/// ```
pub fn convert(bytes: &[u8], config: &ConvertConfig) -> Result<String, ConvertError> {
    let performance = read_performance(bytes, config)?;
    let song = convert_chords(performance.chords, &performance.tempo_map, config.adjacency)?;
    Ok(to_literal(&song))
}

/// Partition chords into tracks and build the output records.
///
/// `chords` must be in non-decreasing start order; the first out-of-order
/// chord fails with [`ConvertError::UnsortedChords`].
pub fn convert_chords<R: TimeResolver + ?Sized>(
    chords: Vec<Chord>,
    resolver: &R,
    adjacency: Adjacency,
) -> Result<OutputSong, ConvertError> {
    let tracks = partition::partition_chords(chords, adjacency)?;
    let song = format::format_song(&tracks, resolver)?;
    debug!("converted into {} tracks", song.num_tracks());
    Ok(song)
}

/// Per-track chord timing listing for MIDI file bytes, in place of the
/// literal.
pub fn summarize(bytes: &[u8], config: &ConvertConfig) -> Result<String, ConvertError> {
    let performance = read_performance(bytes, config)?;
    let tracks = partition::partition_chords(performance.chords, config.adjacency)?;
    summary::render_summary(&tracks, &performance.tempo_map)
}
