use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// A phase of the PLDF workflow. Hints are namespaced by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Concept,
    Design,
    Tech,
    Architecture,
    Plan,
    Implement,
    Review,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Concept,
            Stage::Design,
            Stage::Tech,
            Stage::Architecture,
            Stage::Plan,
            Stage::Implement,
            Stage::Review,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Concept => "concept",
            Stage::Design => "design",
            Stage::Tech => "tech",
            Stage::Architecture => "architecture",
            Stage::Plan => "plan",
            Stage::Implement => "implement",
            Stage::Review => "review",
        }
    }

    pub fn is_valid(s: &str) -> bool {
        s.parse::<Stage>().is_ok()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = crate::error::HintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concept" => Ok(Stage::Concept),
            "design" => Ok(Stage::Design),
            "tech" => Ok(Stage::Tech),
            "architecture" => Ok(Stage::Architecture),
            "plan" => Ok(Stage::Plan),
            "implement" => Ok(Stage::Implement),
            "review" => Ok(Stage::Review),
            _ => Err(crate::error::HintError::InvalidStage(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// HintType
// ---------------------------------------------------------------------------

/// Which bucket of the hint store satisfied a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintType {
    Validation,
    General,
}

impl HintType {
    pub fn as_str(self) -> &'static str {
        match self {
            HintType::Validation => "validation",
            HintType::General => "general",
        }
    }
}

impl fmt::Display for HintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
