//! # Error Types
//!
//! This module defines the single error type for a conversion run.
//!
//! Every failure is fatal to the run: there are no retries and no partial
//! output. A caller either gets the complete literal or one of these errors.
//!
//! ## Error Types
//! - `UnsortedChords` - Input chords are not in non-decreasing start order
//! - `Resolver` - A symbolic time could not be converted to microseconds
//! - `EmptyChord` - A chord without notes reached the formatter
//! - `Midi` - The input bytes are not a readable Standard MIDI File
//! - `Config` - The YAML configuration is invalid
//! - `Io` - Reading the input or writing the output failed
//!
//! ## Usage
//! ```rust
//! use midisynth::{convert, ConvertConfig, ConvertError};
//!
//! match convert(b"not a midi file", &ConvertConfig::default()) {
//!     Ok(literal) => println!("{}", literal),
//!     Err(ConvertError::Midi(message)) => eprintln!("Bad input: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// The chord stream violated the non-decreasing start time precondition.
    ///
    /// # Example
    /// ```
    /// # use midisynth::ConvertError;
    /// let err = ConvertError::UnsortedChords {
    ///     index: 3,
    ///     start: 120,
    ///     previous_start: 480,
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Chord 3 starts at tick 120, before the previous chord at tick 480"
    /// );
    /// ```
    #[error("Chord {index} starts at tick {start}, before the previous chord at tick {previous_start}")]
    UnsortedChords {
        index: usize,
        start: u64,
        previous_start: u64,
    },

    /// Time resolution failed under the given tempo map.
    ///
    /// # Example
    /// ```
    /// # use midisynth::ConvertError;
    /// let err = ConvertError::Resolver("ticks per quarter note is zero".to_string());
    /// assert_eq!(err.to_string(), "Time resolution failed: ticks per quarter note is zero");
    /// ```
    #[error("Time resolution failed: {0}")]
    Resolver(String),

    /// A non-rest chord had no notes.
    ///
    /// # Example
    /// ```
    /// # use midisynth::ConvertError;
    /// let err = ConvertError::EmptyChord { index: 7 };
    /// assert_eq!(err.to_string(), "Chord 7 has no notes");
    /// ```
    #[error("Chord {index} has no notes")]
    EmptyChord { index: usize },

    /// The input could not be parsed as a Standard MIDI File.
    #[error("Invalid MIDI file: {0}")]
    Midi(String),

    /// The configuration file is malformed or holds an unsupported value.
    ///
    /// # Example
    /// ```
    /// # use midisynth::ConvertError;
    /// let err = ConvertError::Config("unknown adjacency 'loose'".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: unknown adjacency 'loose'");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
