//! Track timing summary
//!
//! A human-readable listing of where each chord of each track starts and
//! ends, for checking a partition by eye before feeding it to the synth.
//! Rests are not listed and do not count toward a track's elapsed time.

use crate::error::ConvertError;
use crate::format::micros_to_seconds;
use crate::partition::Track;
use crate::tempo::TimeResolver;

pub fn render_summary<R: TimeResolver + ?Sized>(
    tracks: &[Track],
    resolver: &R,
) -> Result<String, ConvertError> {
    let mut out = String::new();

    for track in tracks {
        out.push_str("--TRACK START--\n");

        let mut elapsed = 0u64;
        for chord in &track.chords {
            let start = resolver.time_to_micros(chord.start)?;
            let duration = resolver.length_to_micros(chord.length, chord.start)?;
            let end = start
                .checked_add(duration)
                .ok_or_else(|| ConvertError::Resolver(format!("{} µs + {} µs overflows", start, duration)))?;
            out.push_str(&format!(
                "start: {} end: {}\n",
                micros_to_seconds(start),
                micros_to_seconds(end)
            ));
            elapsed = elapsed.checked_add(duration).ok_or_else(|| {
                ConvertError::Resolver(format!("elapsed {} µs + {} µs overflows", elapsed, duration))
            })?;
        }

        out.push_str("--TRACK END--\n");
        out.push_str(&format!("TIME ELAPSED: {}\n\n\n", micros_to_seconds(elapsed)));
    }

    Ok(out)
}
