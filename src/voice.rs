//! Voice catalogue for speech synthesis
//!
//! The synthesis service accepts one of a fixed set of voice identifiers.

use crate::error::BlogcastError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A speech synthesis voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    /// Balanced, natural tone
    #[default]
    Alloy,
    /// Clear, professional sound
    Echo,
    /// Warm, storytelling voice
    Fable,
    /// Deep, authoritative tone
    Onyx,
    /// Energetic, modern sound
    Nova,
    /// Bright, engaging voice
    Shimmer,
}

impl Voice {
    /// Every voice, in catalogue order
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];

    /// Identifier sent to the synthesis API
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }

    /// Short human-readable description of the voice
    pub fn description(&self) -> &'static str {
        match self {
            Voice::Alloy => "Balanced, natural tone",
            Voice::Echo => "Clear, professional sound",
            Voice::Fable => "Warm, storytelling voice",
            Voice::Onyx => "Deep, authoritative tone",
            Voice::Nova => "Energetic, modern sound",
            Voice::Shimmer => "Bright, engaging voice",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = BlogcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Voice::ALL
            .into_iter()
            .find(|voice| voice.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Voice::ALL.iter().map(|v| v.as_str()).collect();
                BlogcastError::Config(format!(
                    "Unknown voice: {}. Must be one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error_contains;

    #[test]
    fn test_default_voice_is_alloy() {
        assert_eq!(Voice::default(), Voice::Alloy);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Shimmer".parse::<Voice>().unwrap(), Voice::Shimmer);
        assert_eq!(" onyx ".parse::<Voice>().unwrap(), Voice::Onyx);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_error_contains("robot".parse::<Voice>(), "Unknown voice: robot");
        assert_error_contains("".parse::<Voice>(), "Must be one of: alloy, echo");
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for voice in Voice::ALL {
            assert_eq!(voice.to_string().parse::<Voice>().unwrap(), voice);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let yaml = serde_yaml::to_string(&Voice::Fable).unwrap();
        assert!(yaml.contains("fable"));
        let voice: Voice = serde_yaml::from_str("echo").unwrap();
        assert_eq!(voice, Voice::Echo);
    }
}
