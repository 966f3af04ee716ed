//! Item relation kinds

use std::fmt;
use std::str::FromStr;

/// Kind of relation between two items, as used in the candidates endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// The candidate would become a parent of the item
    Parent,
    /// The candidate would become a sub-item of the item
    Sub,
    /// The candidate would become a related item
    Related,
}

impl RelationType {
    /// Path segment used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Sub => "sub",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "sub" => Ok(Self::Sub),
            "related" => Ok(Self::Related),
            other => Err(format!(
                "unknown relation type '{}' (expected parent, sub or related)",
                other
            )),
        }
    }
}
