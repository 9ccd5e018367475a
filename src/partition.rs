//! # Track Partitioner
//!
//! Splits a chord stream into monophonic tracks with first-fit greedy
//! assignment.
//!
//! Each chord goes to the first existing track (in creation order) whose last
//! chord has finished by the chord's start; otherwise a new track is opened.
//! With input sorted by start time this is greedy interval-graph coloring and
//! opens exactly as many tracks as the largest number of chords sounding at
//! once. The lowest qualifying index always wins, so the packing is
//! reproducible rather than load-balanced.
//!
//! ## Preconditions
//! - Chords are in non-decreasing start order ([`ConvertError::UnsortedChords`])
//! - Every chord has at least one note ([`ConvertError::EmptyChord`])
//! - Every chord ends at a representable tick ([`ConvertError::Resolver`])
//!
//! All are checked as chords arrive; the first violation aborts the run.

use log::{debug, trace};

use crate::config::Adjacency;
use crate::error::ConvertError;
use crate::model::Chord;

/// A monophonic run of chords, none overlapping the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub chords: Vec<Chord>,
}

impl Track {
    /// Tick at which the last chord ends, `None` for an empty track.
    pub fn end(&self) -> Result<Option<u64>, ConvertError> {
        self.chords.last().map(Chord::end).transpose()
    }

    fn accepts(&self, chord: &Chord, adjacency: Adjacency) -> Result<bool, ConvertError> {
        Ok(self
            .end()?
            .map_or(true, |end| adjacency.accepts(end, chord.start)))
    }
}

/// Assign every chord to a track.
///
/// # Example
/// ```
/// use midisynth::config::Adjacency;
/// use midisynth::model::{Chord, Note, PitchClass};
/// use midisynth::partition::partition_chords;
///
/// let chord = |start, length| Chord {
///     start,
///     length,
///     notes: vec![Note { pitch: PitchClass::C, octave: 4, start, length, velocity: 64 }],
/// };
///
/// // The second chord overlaps the first, the third follows it directly
/// let tracks = partition_chords(
///     vec![chord(0, 10), chord(5, 10), chord(10, 10)],
///     Adjacency::Touching,
/// )?;
/// assert_eq!(tracks.len(), 2);
/// assert_eq!(tracks[0].chords.len(), 2);
/// # Ok::<(), midisynth::ConvertError>(())
/// ```
pub fn partition_chords(
    chords: Vec<Chord>,
    adjacency: Adjacency,
) -> Result<Vec<Track>, ConvertError> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut previous_start: Option<u64> = None;
    let chord_count = chords.len();

    for (index, chord) in chords.into_iter().enumerate() {
        if chord.notes.is_empty() {
            return Err(ConvertError::EmptyChord { index });
        }
        if let Some(previous_start) = previous_start {
            if chord.start < previous_start {
                return Err(ConvertError::UnsortedChords {
                    index,
                    start: chord.start,
                    previous_start,
                });
            }
        }
        previous_start = Some(chord.start);
        chord.end()?;

        let mut slot = None;
        for (track_index, track) in tracks.iter().enumerate() {
            if track.accepts(&chord, adjacency)? {
                slot = Some(track_index);
                break;
            }
        }

        match slot {
            Some(track_index) => {
                trace!("chord {} at tick {} -> track {}", index, chord.start, track_index);
                tracks[track_index].chords.push(chord);
            }
            None => {
                trace!("chord {} at tick {} opens track {}", index, chord.start, tracks.len());
                tracks.push(Track {
                    chords: vec![chord],
                });
            }
        }
    }

    debug!("partitioned {} chords into {} tracks", chord_count, tracks.len());
    Ok(tracks)
}
