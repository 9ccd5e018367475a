//! # Conversion Configuration
//!
//! Optional YAML settings for a conversion run. Every key may be omitted.
//!
//! ```yaml
//! adjacency: touching      # touching | strict
//! notes-tolerance: 0       # ticks between onsets still counted as one chord
//! skip-channels: [9]       # 0-based MIDI channels to ignore (9 = GM drums)
//! ```

use serde::Deserialize;

use crate::error::ConvertError;

/// When a track whose last chord ends exactly where a new chord starts may
/// take that chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjacency {
    /// Back-to-back chords share a track (`end <= start`).
    #[default]
    Touching,
    /// Only chords separated by a real gap share a track (`end < start`).
    Strict,
}

impl Adjacency {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "touching" => Some(Adjacency::Touching),
            "strict" => Some(Adjacency::Strict),
            _ => None,
        }
    }

    /// Whether a track ending at `track_end` can accept a chord at `start`.
    pub fn accepts(self, track_end: u64, start: u64) -> bool {
        match self {
            Adjacency::Touching => track_end <= start,
            Adjacency::Strict => track_end < start,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub adjacency: Option<String>,
    pub notes_tolerance: Option<u64>,
    pub skip_channels: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvertConfig {
    pub adjacency: Adjacency,
    pub notes_tolerance: u64,
    pub skip_channels: Vec<u8>,
}

impl ConvertConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml(content: &str) -> Result<Self, ConvertError> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(ConvertConfig::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))?;

        let adjacency = match &raw.adjacency {
            Some(s) => Adjacency::from_str(s)
                .ok_or_else(|| ConvertError::Config(format!("unknown adjacency '{}'", s)))?,
            None => Adjacency::default(),
        };

        let skip_channels = raw.skip_channels.unwrap_or_default();
        if let Some(channel) = skip_channels.iter().find(|&&c| c > 15) {
            return Err(ConvertError::Config(format!(
                "channel {} is out of range 0-15",
                channel
            )));
        }

        Ok(ConvertConfig {
            adjacency,
            notes_tolerance: raw.notes_tolerance.unwrap_or(0),
            skip_channels,
        })
    }

    pub fn skips_channel(&self, channel: u8) -> bool {
        self.skip_channels.contains(&channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConvertConfig::from_yaml("").unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert_eq!(config.adjacency, Adjacency::Touching);
    }

    #[test]
    fn test_full_config() {
        let source = r#"
adjacency: strict
notes-tolerance: 12
skip-channels: [9, 10]
"#;
        let config = ConvertConfig::from_yaml(source).unwrap();
        assert_eq!(config.adjacency, Adjacency::Strict);
        assert_eq!(config.notes_tolerance, 12);
        assert!(config.skips_channel(9));
        assert!(!config.skips_channel(0));
    }

    #[test]
    fn test_unknown_adjacency() {
        let err = ConvertConfig::from_yaml("adjacency: loose").unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: unknown adjacency 'loose'");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            ConvertConfig::from_yaml("tempo: 120"),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn test_channel_out_of_range() {
        assert!(ConvertConfig::from_yaml("skip-channels: [16]").is_err());
    }

    #[test]
    fn test_adjacency_comparison() {
        assert!(Adjacency::Touching.accepts(100, 100));
        assert!(!Adjacency::Strict.accepts(100, 100));
        assert!(Adjacency::Strict.accepts(99, 100));
        assert!(!Adjacency::Touching.accepts(101, 100));
    }
}
