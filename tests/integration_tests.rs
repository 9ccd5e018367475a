//! Integration tests for midisynth
//!
//! Tests the full pipeline from chords or MIDI bytes to the synth literal.

use midisynth::envelope::dynamics_for_velocity;
use midisynth::{
    convert, convert_chords, summarize, Adjacency, Chord, ConvertConfig, ConvertError, Note,
    OutputSong, PitchClass, TempoMap, TimeResolver,
};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use pretty_assertions::assert_eq;

/// One tick is one millisecond.
struct Millis;

impl TimeResolver for Millis {
    fn time_to_micros(&self, time: u64) -> Result<u64, ConvertError> {
        Ok(time * 1000)
    }
}

fn chord(start: u64, length: u64, velocity: i32) -> Chord {
    Chord {
        start,
        length,
        notes: vec![Note {
            pitch: PitchClass::C,
            octave: 4,
            start,
            length,
            velocity,
        }],
    }
}

/// (note name of first note, chord duration) per chord, per track.
fn layout(song: &OutputSong) -> Vec<Vec<(String, f64)>> {
    song.music_tracks
        .iter()
        .map(|track| {
            track
                .music_chords
                .iter()
                .map(|c| (c.music_notes[0].note.clone(), c.duration))
                .collect()
        })
        .collect()
}

fn note_on(channel: u8, key: u8, vel: u8) -> TrackEventKind<'static> {
    TrackEventKind::Midi {
        channel: channel.into(),
        message: MidiMessage::NoteOn {
            key: key.into(),
            vel: vel.into(),
        },
    }
}

fn note_off(channel: u8, key: u8) -> TrackEventKind<'static> {
    TrackEventKind::Midi {
        channel: channel.into(),
        message: MidiMessage::NoteOff {
            key: key.into(),
            vel: 0.into(),
        },
    }
}

/// Single-track file from (delta, event) pairs.
fn midi_file(ticks_per_quarter: u16, events: Vec<(u32, TrackEventKind<'static>)>) -> Vec<u8> {
    let mut track: Vec<TrackEvent<'static>> = events
        .into_iter()
        .map(|(delta, kind)| TrackEvent {
            delta: delta.into(),
            kind,
        })
        .collect();
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    let smf = Smf {
        header: Header {
            format: Format::SingleTrack,
            timing: Timing::Metrical(ticks_per_quarter.into()),
        },
        tracks: vec![track],
    };
    let mut out = Vec::new();
    smf.write(&mut out).unwrap();
    out
}

#[test]
fn test_overlapping_chords_split_with_rests() {
    // (0,1) (0.5,1) (2,1) seconds
    let chords = vec![chord(0, 1000, 64), chord(500, 1000, 64), chord(2000, 1000, 64)];
    let song = convert_chords(chords, &Millis, Adjacency::Touching).unwrap();

    assert_eq!(song.num_tracks(), 2);
    assert_eq!(
        layout(&song),
        vec![
            vec![
                ("C".to_string(), 1.0),
                ("S".to_string(), 1.0),
                ("C".to_string(), 1.0),
            ],
            vec![("S".to_string(), 0.5), ("C".to_string(), 1.0)],
        ]
    );
    assert_eq!(song.music_tracks[0].length(), 3);
    assert_eq!(song.music_tracks[1].length(), 2);
}

#[test]
fn test_padded_tracks_are_contiguous_and_complete() {
    let input = vec![
        chord(0, 300, 10),
        chord(0, 100, 20),
        chord(50, 500, 30),
        chord(100, 100, 40),
        chord(150, 20, 50),
        chord(400, 100, 60),
        chord(400, 600, 70),
        chord(900, 50, 80),
        chord(1000, 10, 90),
    ];
    let song = convert_chords(input.clone(), &Millis, Adjacency::Touching).unwrap();

    let mut real_notes = 0;
    for track in &song.music_tracks {
        // Rests only ever precede a real chord
        let mut previous_was_rest = false;
        for c in &track.music_chords {
            let is_rest = c.music_notes[0].note == "S";
            assert!(!(is_rest && previous_was_rest));
            previous_was_rest = is_rest;
            if !is_rest {
                real_notes += 1;
            }
        }
        assert!(track.music_chords.iter().all(|c| c.num_notes() >= 1));
    }
    assert_eq!(real_notes, input.len());

    // Peak polyphony is 4, at 150 ms
    assert_eq!(song.num_tracks(), 4);

    let peaks: Vec<f64> = song
        .music_tracks
        .iter()
        .flat_map(|t| t.music_chords.iter())
        .filter(|c| c.music_notes[0].note != "S")
        .map(|c| c.music_notes[0].peak_intensity)
        .collect();
    assert_eq!(peaks.len(), input.len());
}

#[test]
fn test_unsorted_chords_abort_conversion() {
    let chords = vec![chord(100, 10, 64), chord(0, 10, 64)];
    let err = convert_chords(chords, &Millis, Adjacency::Touching).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Chord 1 starts at tick 0, before the previous chord at tick 100"
    );
}

/// Milliseconds up to a cutoff tick, an error from there on.
struct MillisUntil(u64);

impl TimeResolver for MillisUntil {
    fn time_to_micros(&self, time: u64) -> Result<u64, ConvertError> {
        if time >= self.0 {
            return Err(ConvertError::Resolver(format!("no tempo at tick {}", time)));
        }
        Ok(time * 1000)
    }
}

#[test]
fn test_late_resolver_failure_aborts_conversion() {
    let chords = vec![chord(0, 1000, 64), chord(500, 1000, 64), chord(2000, 1000, 64)];

    // Every chord but the last resolves
    let err = convert_chords(chords.clone(), &MillisUntil(2000), Adjacency::Touching).unwrap_err();
    assert_eq!(err.to_string(), "Time resolution failed: no tempo at tick 2000");

    // Only the last chord's end fails
    let err = convert_chords(chords.clone(), &MillisUntil(3000), Adjacency::Touching).unwrap_err();
    assert!(matches!(err, ConvertError::Resolver(_)));

    assert!(convert_chords(chords, &MillisUntil(3001), Adjacency::Touching).is_ok());
}

#[test]
fn test_chords_ending_past_last_tick_abort_conversion() {
    let chords = vec![chord(u64::MAX - 1, 10, 64), chord(u64::MAX, 1, 64)];
    let err = convert_chords(chords, &TempoMap::metrical(480), Adjacency::Touching).unwrap_err();
    assert!(matches!(err, ConvertError::Resolver(_)));
}

#[test]
fn test_velocity_extremes() {
    let song = convert_chords(
        vec![chord(0, 1000, 0), chord(1000, 1000, 127)],
        &Millis,
        Adjacency::Touching,
    )
    .unwrap();
    let chords = &song.music_tracks[0].music_chords;
    assert_eq!(chords.len(), 2);

    let soft = &chords[0].music_notes[0];
    assert_eq!(soft.peak_intensity, 1.0);
    let [a, d, s, r] = soft.adsr_envelope;
    assert!((a - 0.12).abs() < 1e-9);
    assert!((d - 0.48).abs() < 1e-9);
    assert!(s.abs() < 1e-9);
    assert!((r - 0.4).abs() < 1e-9);

    let hard = &chords[1].music_notes[0];
    let [a, d, s, r] = hard.adsr_envelope;
    assert!((a + d - 0.1).abs() < 1e-9);
    assert!((r - 0.05).abs() < 1e-9);
    assert!((s - 0.85).abs() < 1e-9);
}

#[test]
fn test_midi_to_literal() {
    // F#4 at full velocity for a quarter (half a second), after a quarter rest
    let bytes = midi_file(
        480,
        vec![(480, note_on(0, 66, 127)), (480, note_off(0, 66))],
    );
    let literal = convert(&bytes, &ConvertConfig::default()).unwrap();

    let d = dynamics_for_velocity(127);
    let [a, de, s, r] = d.envelope.as_array();
    let expected = format!(
        concat!(
            "{{.music_tracks = (struct MusicTrack[]) {{\n",
            "\t{{.music_chords = (struct MusicChord[]) {{\n",
            "\t\t{{.music_notes = (struct MusicNote[]) {{\n",
            "\t\t\t{{.note = \"S\", .octave = 0, .duration = {half}, .peak_intensity = 0, .sustain_intensity = 0, .adsr_envelope = (double[]) {{0, 0, 0, 0}}}}\n",
            "\t\t}}, .duration = {half}, .num_notes = 1}},\n",
            "\t\t{{.music_notes = (struct MusicNote[]) {{\n",
            "\t\t\t{{.note = \"Fs\", .octave = 4, .duration = {half}, .peak_intensity = {p}, .sustain_intensity = {si}, .adsr_envelope = (double[]) {{{a}, {d}, {s}, {r}}}}}\n",
            "\t\t}}, .duration = {half}, .num_notes = 1}}\n",
            "\t}}, .playback_type = PLAYBACK_MONO, .length = 2}}\n",
            "}}, .num_tracks = 1}}",
        ),
        half = 0.5,
        p = d.peak_intensity,
        si = d.sustain_intensity,
        a = a,
        d = de,
        s = s,
        r = r,
    );
    assert_eq!(literal, expected);
}

#[test]
fn test_midi_chord_keeps_all_notes() {
    let bytes = midi_file(
        96,
        vec![
            (0, note_on(0, 60, 100)),
            (0, note_on(0, 64, 100)),
            (0, note_on(0, 67, 100)),
            (96, note_off(0, 60)),
            (0, note_off(0, 64)),
            (0, note_off(0, 67)),
        ],
    );
    let literal = convert(&bytes, &ConvertConfig::default()).unwrap();
    assert!(literal.contains(".num_notes = 3}"));
    assert!(literal.contains(".length = 1}"));
    assert!(literal.contains(".num_tracks = 1}"));
    assert!(!literal.contains("\"S\""));
}

#[test]
fn test_strict_adjacency_from_config() {
    let bytes = midi_file(
        96,
        vec![
            (0, note_on(0, 60, 80)),
            (96, note_off(0, 60)),
            (0, note_on(0, 62, 80)),
            (96, note_off(0, 62)),
        ],
    );

    let touching = convert(&bytes, &ConvertConfig::default()).unwrap();
    assert!(touching.ends_with(".num_tracks = 1}"));

    let config = ConvertConfig::from_yaml("adjacency: strict").unwrap();
    let strict = convert(&bytes, &config).unwrap();
    assert!(strict.ends_with(".num_tracks = 2}"));
    // Second track waits a quarter before its note
    assert!(strict.contains("{.note = \"S\""));
}

#[test]
fn test_summary_output() {
    let bytes = midi_file(
        480,
        vec![(0, note_on(0, 60, 80)), (960, note_off(0, 60))],
    );
    let summary = summarize(&bytes, &ConvertConfig::default()).unwrap();
    assert_eq!(
        summary,
        "--TRACK START--\nstart: 0 end: 1\n--TRACK END--\nTIME ELAPSED: 1\n\n\n"
    );
}

#[test]
fn test_invalid_midi() {
    let err = convert(b"MThd", &ConvertConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Midi(_)));
}
