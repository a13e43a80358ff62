//! The fixed analyst roster

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analyst roles the graph engine can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalystKind {
    Market,
    Social,
    News,
    Fundamentals,
}

impl AnalystKind {
    /// Menu order
    pub const ALL: [AnalystKind; 4] = [
        AnalystKind::Market,
        AnalystKind::Social,
        AnalystKind::News,
        AnalystKind::Fundamentals,
    ];

    /// Identifier passed to the graph engine
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Social => "social",
            Self::News => "news",
            Self::Fundamentals => "fundamentals",
        }
    }

    /// Label shown in the analyst checklist
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Market => "Market Analyst",
            Self::Social => "Social Media Analyst",
            Self::News => "News Analyst",
            Self::Fundamentals => "Fundamentals Analyst",
        }
    }
}

impl fmt::Display for AnalystKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalystKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| Error::UnknownAnalyst(s.trim().to_string()))
    }
}

/// Deduplicate a selection and put it back into menu order.
///
/// An empty selection is an error; the engine needs at least one analyst.
pub fn normalize_analysts(
    selected: impl IntoIterator<Item = AnalystKind>,
) -> Result<Vec<AnalystKind>> {
    let selected: Vec<AnalystKind> = selected.into_iter().collect();
    let analysts: Vec<AnalystKind> = AnalystKind::ALL
        .into_iter()
        .filter(|kind| selected.contains(kind))
        .collect();

    if analysts.is_empty() {
        return Err(Error::EmptySelection("analysts"));
    }
    Ok(analysts)
}
