//! The closed set of expense categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classifies an expense. The same identifiers serve as form choices,
/// table labels and chart legend keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Entertain,
    Travel,
    Utility,
}

impl Category {
    /// Canonical display order used by the statistics table.
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Entertain,
        Category::Travel,
        Category::Utility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Entertain => "Entertain",
            Category::Travel => "Travel",
            Category::Utility => "Utility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| UnknownCategory(normalized.to_string()))
    }
}
