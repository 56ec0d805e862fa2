//! Initial node placement for the presentation layer.
//!
//! Seeding is a one-off starting position, not a physics simulation. The
//! result is a separate [`Layout`] view; the graph itself is left untouched.

mod seeder;
mod style;

pub use seeder::{seed_layout, Layout, Position, SeededNode};
pub use style::{node_color, node_size, DEFAULT_NODE_COLOR};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EographError;

/// How initial coordinates are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Circle ordered by degree; well-connected documents sit closer to the centre.
    #[default]
    Centrality,
    /// No seeded coordinates; the renderer's simulation places nodes.
    Date,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Centrality => "centrality",
            LayoutMode::Date => "date",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = EographError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centrality" => Ok(LayoutMode::Centrality),
            "date" => Ok(LayoutMode::Date),
            other => Err(EographError::InvalidInput(format!("Unknown layout mode: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mode_parse() {
        assert_eq!("centrality".parse::<LayoutMode>().unwrap(), LayoutMode::Centrality);
        assert_eq!(" Date ".parse::<LayoutMode>().unwrap(), LayoutMode::Date);
        assert!("force".parse::<LayoutMode>().is_err());
        assert_eq!(LayoutMode::default(), LayoutMode::Centrality);
    }
}
