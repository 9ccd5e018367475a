//! Output record definitions
//!
//! One record per level of the synth's data layout. Field names match the
//! struct members the synth declares, so the literal writer can print them
//! as they are.

/// Playback mode of a track. The synth only plays monophonic tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackType {
    #[default]
    Mono,
}

impl PlaybackType {
    /// Enum constant name on the synth side.
    pub fn literal(self) -> &'static str {
        match self {
            PlaybackType::Mono => "PLAYBACK_MONO",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputNote {
    pub note: String,
    pub octave: i32,
    /// Seconds.
    pub duration: f64,
    pub peak_intensity: f64,
    pub sustain_intensity: f64,
    /// Attack, decay, sustain, release.
    pub adsr_envelope: [f64; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputChord {
    pub music_notes: Vec<OutputNote>,
    /// Seconds.
    pub duration: f64,
}

impl OutputChord {
    pub fn num_notes(&self) -> usize {
        self.music_notes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputTrack {
    pub music_chords: Vec<OutputChord>,
    pub playback_type: PlaybackType,
}

impl OutputTrack {
    pub fn length(&self) -> usize {
        self.music_chords.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputSong {
    pub music_tracks: Vec<OutputTrack>,
}

impl OutputSong {
    pub fn num_tracks(&self) -> usize {
        self.music_tracks.len()
    }
}
