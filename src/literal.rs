//! # Literal Writer
//!
//! Renders an [`OutputSong`] as a C designated-initializer literal that the
//! synth compiles in directly:
//!
//! ```text
//! {.music_tracks = (struct MusicTrack[]) {
//!     {.music_chords = (struct MusicChord[]) {
//!         {.music_notes = (struct MusicNote[]) {
//!             {.note = "C", .octave = 4, .duration = 0.5, ...}
//!         }, .duration = 0.5, .num_notes = 1}
//!     }, .playback_type = PLAYBACK_MONO, .length = 1}
//! }, .num_tracks = 1}
//! ```
//!
//! Nesting is indented with one tab per level and list elements are joined
//! by `",\n"` with no trailing comma. Floats use Rust's shortest round-trip
//! form, so `1.0` prints as `1` and every value parses back to the same double.

use crate::output::{OutputChord, OutputNote, OutputSong, OutputTrack};

/// Render a song as a synth literal.
pub fn to_literal(song: &OutputSong) -> String {
    let mut out = String::new();

    out.push_str("{.music_tracks = (struct MusicTrack[]) {\n");
    let tracks: Vec<String> = song.music_tracks.iter().map(track_to_literal).collect();
    out.push_str(&tracks.join(",\n"));
    out.push_str(&format!("\n}}, .num_tracks = {}}}", song.num_tracks()));

    out
}

fn track_to_literal(track: &OutputTrack) -> String {
    let mut out = String::new();

    out.push_str("\t{.music_chords = (struct MusicChord[]) {\n");
    let chords: Vec<String> = track.music_chords.iter().map(chord_to_literal).collect();
    out.push_str(&chords.join(",\n"));
    out.push_str(&format!(
        "\n\t}}, .playback_type = {}, .length = {}}}",
        track.playback_type.literal(),
        track.length()
    ));

    out
}

fn chord_to_literal(chord: &OutputChord) -> String {
    let mut out = String::new();

    out.push_str("\t\t{.music_notes = (struct MusicNote[]) {\n");
    let notes: Vec<String> = chord.music_notes.iter().map(note_to_literal).collect();
    out.push_str(&notes.join(",\n"));
    out.push_str(&format!(
        "\n\t\t}}, .duration = {}, .num_notes = {}}}",
        chord.duration,
        chord.num_notes()
    ));

    out
}

fn note_to_literal(note: &OutputNote) -> String {
    let [attack, decay, sustain, release] = note.adsr_envelope;
    format!(
        "\t\t\t{{.note = \"{}\", .octave = {}, .duration = {}, .peak_intensity = {}, .sustain_intensity = {}, .adsr_envelope = (double[]) {{{}, {}, {}, {}}}}}",
        note.note,
        note.octave,
        note.duration,
        note.peak_intensity,
        note.sustain_intensity,
        attack,
        decay,
        sustain,
        release
    )
}
