//! # Envelope Engine
//!
//! Derives a note's loudness and ADSR contour from its MIDI velocity.
//!
//! - Peak intensity follows an exponential curve, `1.018152 ^ velocity`, so
//!   hard hits are super-linearly louder. Velocity 0 gives exactly 1.0.
//! - Sustain intensity is a fixed 40% of the peak.
//! - The attack+decay share and the release share fall linearly with
//!   velocity: soft notes swell and fade slowly, hard notes are mostly sustain.
//!
//! | velocity | attack+decay | release | sustain |
//! |----------|--------------|---------|---------|
//! | 0        | 0.60         | 0.40    | 0.00    |
//! | 127      | 0.10         | 0.05    | 0.85    |
//!
//! Sustain is whatever remains, so the four fractions sum to 1.0 without any
//! renormalization step.

pub const INTENSITY_SENSITIVITY: f64 = 1.018152;
pub const SUSTAIN_RATIO: f64 = 0.4;

pub const MAX_AD_PERCENT: f64 = 0.6;
pub const MIN_AD_PERCENT: f64 = 0.1;
pub const AD_SLOPE: f64 = (MAX_AD_PERCENT - MIN_AD_PERCENT) / (0.0 - 127.0);
/// Fraction of the attack+decay span spent in attack.
pub const AD_PROPORTION: f64 = 0.2;

pub const MAX_R_PERCENT: f64 = 0.4;
pub const MIN_R_PERCENT: f64 = 0.05;
pub const R_SLOPE: f64 = (MAX_R_PERCENT - MIN_R_PERCENT) / (0.0 - 127.0);

/// ADSR fractions of a note's duration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Envelope {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Envelope {
    /// All-zero envelope used by rests.
    pub const SILENT: Envelope = Envelope {
        attack: 0.0,
        decay: 0.0,
        sustain: 0.0,
        release: 0.0,
    };

    /// Fractions in synth order: attack, decay, sustain, release.
    pub fn as_array(&self) -> [f64; 4] {
        [self.attack, self.decay, self.sustain, self.release]
    }
}

/// Loudness and envelope for one note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    pub peak_intensity: f64,
    pub sustain_intensity: f64,
    pub envelope: Envelope,
}

impl Dynamics {
    pub const SILENT: Dynamics = Dynamics {
        peak_intensity: 0.0,
        sustain_intensity: 0.0,
        envelope: Envelope::SILENT,
    };
}

/// Compute dynamics from a velocity.
///
/// Velocities outside 0..=127 are accepted; the slopes use `|velocity|`, the
/// peak curve uses the signed value.
///
/// # Examples
/// ```
/// use midisynth::envelope::dynamics_for_velocity;
///
/// let soft = dynamics_for_velocity(0);
/// assert_eq!(soft.peak_intensity, 1.0);
/// assert!((soft.envelope.release - 0.4).abs() < 1e-12);
/// ```
pub fn dynamics_for_velocity(velocity: i32) -> Dynamics {
    let peak_intensity = INTENSITY_SENSITIVITY.powf(velocity as f64);
    let sustain_intensity = peak_intensity * SUSTAIN_RATIO;

    let offset = (velocity.unsigned_abs() as f64) - 127.0;

    let ad_percent = AD_SLOPE * offset + MIN_AD_PERCENT;
    let attack = ad_percent * AD_PROPORTION;
    let decay = ad_percent - attack;
    let release = R_SLOPE * offset + MIN_R_PERCENT;
    let sustain = 1.0 - attack - decay - release;

    Dynamics {
        peak_intensity,
        sustain_intensity,
        envelope: Envelope {
            attack,
            decay,
            sustain,
            release,
        },
    }
}
