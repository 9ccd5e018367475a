//! # MIDI Reader
//!
//! Reads a Standard MIDI File into a [`Performance`]: chords in onset order
//! plus the tempo map needed to resolve their ticks.
//!
//! ## Notes
//! Note-on/note-off pairs are matched per (channel, key) in first-in
//! first-out order; a note-on with velocity 0 counts as a note-off. A note's
//! velocity is its note-on velocity. Unmatched events are logged and dropped.
//!
//! ## Chords
//! Notes from all tracks are merged in onset order. A note joins the current
//! chord while its onset is within `notes-tolerance` ticks of the chord's
//! first note. The chord spans from its earliest onset to its latest release.
//!
//! ## Tempo
//! Tempo events from every track feed one [`TempoMap`]; format 1 files
//! normally keep them in the first track.

use std::collections::{HashMap, VecDeque};

use log::{debug, warn};
use midly::{Fps, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::model::{Chord, Note, PitchClass, Performance};
use crate::tempo::TempoMap;

/// Frame rate in hundredths of a frame per second.
fn centi_fps(fps: Fps) -> u32 {
    match fps {
        Fps::Fps24 => 2400,
        Fps::Fps25 => 2500,
        Fps::Fps29 => 2997,
        Fps::Fps30 => 3000,
    }
}

/// Parse MIDI bytes into a performance.
pub fn read_performance(bytes: &[u8], config: &ConvertConfig) -> Result<Performance, ConvertError> {
    let smf = Smf::parse(bytes).map_err(|e| ConvertError::Midi(e.to_string()))?;

    let mut tempo_map = match smf.header.timing {
        Timing::Metrical(ticks_per_quarter) => TempoMap::metrical(ticks_per_quarter.as_int()),
        Timing::Timecode(fps, subframes) => TempoMap::timecode(centi_fps(fps), subframes),
    };

    let mut notes = Vec::new();
    for (track_index, track) in smf.tracks.iter().enumerate() {
        read_track(track_index, track, config, &mut tempo_map, &mut notes);
    }

    // Stable: simultaneous notes keep track order, then event order
    notes.sort_by_key(|note| note.start);

    let chords = group_chords(notes, config.notes_tolerance);
    debug!(
        "read {} tracks, {} chords, {} tempo changes",
        smf.tracks.len(),
        chords.len(),
        tempo_map.changes().len()
    );

    Ok(Performance { chords, tempo_map })
}

fn read_track(
    track_index: usize,
    track: &[TrackEvent],
    config: &ConvertConfig,
    tempo_map: &mut TempoMap,
    notes: &mut Vec<Note>,
) {
    // (channel, key) -> queue of (onset tick, velocity)
    let mut sounding: HashMap<(u8, u8), VecDeque<(u64, u8)>> = HashMap::new();
    let mut tick = 0u64;

    for event in track {
        tick += event.delta.as_int() as u64;

        match event.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(micros_per_quarter)) => {
                tempo_map.set_tempo(tick, micros_per_quarter.as_int());
            }
            TrackEventKind::Midi { channel, message } => {
                let channel = channel.as_int();
                if config.skips_channel(channel) {
                    continue;
                }
                match message {
                    MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                        sounding
                            .entry((channel, key.as_int()))
                            .or_default()
                            .push_back((tick, vel.as_int()));
                    }
                    MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                        let key = key.as_int();
                        match sounding.get_mut(&(channel, key)).and_then(VecDeque::pop_front) {
                            Some((start, velocity)) => {
                                let (pitch, octave) = PitchClass::from_midi_key(key);
                                notes.push(Note {
                                    pitch,
                                    octave,
                                    start,
                                    length: tick - start,
                                    velocity: velocity as i32,
                                });
                            }
                            None => warn!(
                                "track {}: note-off for key {} on channel {} at tick {} without note-on",
                                track_index, key, channel, tick
                            ),
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    let unterminated: usize = sounding.values().map(VecDeque::len).sum();
    if unterminated > 0 {
        warn!(
            "track {}: dropping {} notes still sounding at end of track",
            track_index, unterminated
        );
    }
}

/// Group onset-sorted notes into chords.
fn group_chords(notes: Vec<Note>, tolerance: u64) -> Vec<Chord> {
    let mut chords = Vec::new();
    let mut group: Vec<Note> = Vec::new();

    for note in notes {
        if let Some(first) = group.first() {
            if note.start - first.start > tolerance {
                chords.extend(Chord::from_notes(std::mem::take(&mut group)));
            }
        }
        group.push(note);
    }
    chords.extend(Chord::from_notes(group));

    chords
}
