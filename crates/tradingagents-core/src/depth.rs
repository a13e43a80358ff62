//! Research depth presets

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much debate the engine runs before deciding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchDepth {
    #[default]
    Shallow,
    Medium,
    Deep,
}

impl ResearchDepth {
    /// Menu order
    pub const ALL: [ResearchDepth; 3] = [Self::Shallow, Self::Medium, Self::Deep];

    /// Debate and risk-discussion rounds for this depth
    pub fn rounds(self) -> u32 {
        match self {
            Self::Shallow => 1,
            Self::Medium => 3,
            Self::Deep => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Medium => "medium",
            Self::Deep => "deep",
        }
    }

    /// Menu text
    pub fn description(self) -> &'static str {
        match self {
            Self::Shallow => "Shallow - Quick research, few debate and strategy discussion rounds",
            Self::Medium => {
                "Medium - Middle ground, moderate debate rounds and strategy discussion"
            }
            Self::Deep => "Deep - Comprehensive research, in depth debate and strategy discussion",
        }
    }
}

impl fmt::Display for ResearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the name or the round count.
impl FromStr for ResearchDepth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|depth| depth.as_str() == needle || depth.rounds().to_string() == needle)
            .ok_or_else(|| Error::UnknownDepth(s.trim().to_string()))
    }
}
