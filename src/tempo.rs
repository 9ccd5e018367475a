//! # Time Resolution
//!
//! Converts symbolic (tick) positions into absolute microseconds.
//!
//! The converter core only sees the [`TimeResolver`] trait. [`TempoMap`] is
//! the implementation built from a MIDI file's header timing and tempo events;
//! tests and embedders can supply their own resolver instead.
//!
//! ## Metrical timing
//! Each tempo segment contributes `ticks * micros_per_quarter`; the sum is
//! divided by ticks-per-quarter once at the end, so long files do not
//! accumulate rounding drift. Before the first tempo event the tempo is
//! 120 BPM (500 000 µs per quarter note).
//!
//! ## Timecode timing
//! Ticks are subdivisions of SMPTE frames, so tempo events are ignored:
//! `micros = ticks * 1e6 / (fps * subframes)`.

use crate::error::ConvertError;

/// MIDI default tempo, 120 BPM.
pub const DEFAULT_MICROS_PER_QUARTER: u32 = 500_000;

/// Resolves symbolic times and lengths to whole microseconds.
pub trait TimeResolver {
    /// Absolute time of `time` (ticks from the start of the performance).
    fn time_to_micros(&self, time: u64) -> Result<u64, ConvertError>;

    /// Real duration of `length` ticks beginning at `start`.
    fn length_to_micros(&self, length: u64, start: u64) -> Result<u64, ConvertError> {
        let end = start
            .checked_add(length)
            .ok_or_else(|| ConvertError::Resolver(format!("tick {} + {} overflows", start, length)))?;
        let end_micros = self.time_to_micros(end)?;
        let start_micros = self.time_to_micros(start)?;
        end_micros.checked_sub(start_micros).ok_or_else(|| {
            ConvertError::Resolver(format!("tick {} resolves before tick {}", end, start))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timing {
    /// Ticks per quarter note; tempo events apply.
    Metrical { ticks_per_quarter: u16 },
    /// SMPTE timing. Frame rate is stored in hundredths so 29.97 stays exact.
    Timecode {
        centi_frames_per_second: u32,
        subframes: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoChange {
    pub tick: u64,
    pub micros_per_quarter: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    timing: Timing,
    /// Sorted by tick, at most one entry per tick.
    changes: Vec<TempoChange>,
}

impl TempoMap {
    pub fn metrical(ticks_per_quarter: u16) -> Self {
        TempoMap {
            timing: Timing::Metrical { ticks_per_quarter },
            changes: Vec::new(),
        }
    }

    pub fn timecode(centi_frames_per_second: u32, subframes: u8) -> Self {
        TempoMap {
            timing: Timing::Timecode {
                centi_frames_per_second,
                subframes,
            },
            changes: Vec::new(),
        }
    }

    /// Record a tempo change. A later change at the same tick replaces the
    /// earlier one, matching how sequencers apply stacked tempo events.
    pub fn set_tempo(&mut self, tick: u64, micros_per_quarter: u32) {
        let change = TempoChange {
            tick,
            micros_per_quarter,
        };
        match self.changes.binary_search_by_key(&tick, |c| c.tick) {
            Ok(i) => self.changes[i] = change,
            Err(i) => self.changes.insert(i, change),
        }
    }

    pub fn with_tempo(mut self, tick: u64, micros_per_quarter: u32) -> Self {
        self.set_tempo(tick, micros_per_quarter);
        self
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn changes(&self) -> &[TempoChange] {
        &self.changes
    }

    fn metrical_micros(&self, ticks_per_quarter: u16, time: u64) -> Result<u64, ConvertError> {
        if ticks_per_quarter == 0 {
            return Err(ConvertError::Resolver(
                "ticks per quarter note is zero".to_string(),
            ));
        }

        let mut scaled: u128 = 0;
        let mut cursor = 0u64;
        let mut tempo = DEFAULT_MICROS_PER_QUARTER;

        for change in &self.changes {
            if change.tick >= time {
                break;
            }
            scaled += (change.tick - cursor) as u128 * tempo as u128;
            cursor = change.tick;
            tempo = change.micros_per_quarter;
            if tempo == 0 {
                return Err(ConvertError::Resolver(format!(
                    "zero tempo at tick {}",
                    change.tick
                )));
            }
        }
        scaled += (time - cursor) as u128 * tempo as u128;

        u64::try_from(scaled / ticks_per_quarter as u128)
            .map_err(|_| ConvertError::Resolver(format!("tick {} overflows microseconds", time)))
    }

    fn timecode_micros(
        &self,
        centi_frames_per_second: u32,
        subframes: u8,
        time: u64,
    ) -> Result<u64, ConvertError> {
        let hundred_ticks_per_second = centi_frames_per_second as u128 * subframes as u128;
        if hundred_ticks_per_second == 0 {
            return Err(ConvertError::Resolver(
                "timecode frame rate or subframe count is zero".to_string(),
            ));
        }
        let micros = time as u128 * 100_000_000 / hundred_ticks_per_second;
        u64::try_from(micros)
            .map_err(|_| ConvertError::Resolver(format!("tick {} overflows microseconds", time)))
    }
}

impl TimeResolver for TempoMap {
    fn time_to_micros(&self, time: u64) -> Result<u64, ConvertError> {
        match self.timing {
            Timing::Metrical { ticks_per_quarter } => self.metrical_micros(ticks_per_quarter, time),
            Timing::Timecode {
                centi_frames_per_second,
                subframes,
            } => self.timecode_micros(centi_frames_per_second, subframes, time),
        }
    }
}
