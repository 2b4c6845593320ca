//! Ambient background tracks.
//!
//! Playback is left to the view layer; the engine only remembers the
//! current selection and tags each completed session with it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbientTrack {
    #[default]
    Rain,
    Ocean,
    Cafe,
    Forest,
}

impl AmbientTrack {
    pub const ALL: [AmbientTrack; 4] = [
        AmbientTrack::Rain,
        AmbientTrack::Ocean,
        AmbientTrack::Cafe,
        AmbientTrack::Forest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmbientTrack::Rain => "rain",
            AmbientTrack::Ocean => "ocean",
            AmbientTrack::Cafe => "cafe",
            AmbientTrack::Forest => "forest",
        }
    }
}

impl fmt::Display for AmbientTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmbientTrack {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AmbientTrack::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "ambientTrack",
                    format!("unknown track '{s}' (expected rain, ocean, cafe or forest)"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Forest".parse::<AmbientTrack>().unwrap(), AmbientTrack::Forest);
        assert!("traffic".parse::<AmbientTrack>().is_err());
    }
}
