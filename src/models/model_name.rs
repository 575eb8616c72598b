use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of the contacts shown in an evaluation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelName {
    Original,    // ground truth
    Llama4Scout, // llama4_scout
    Gemini,      // gemini
}

impl ModelName {
    /// Emission order inside one image.
    pub const ALL: [ModelName; 3] = [
        ModelName::Original,
        ModelName::Llama4Scout,
        ModelName::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Original => "original",
            ModelName::Llama4Scout => "llama4_scout",
            ModelName::Gemini => "gemini",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "original" => Some(ModelName::Original),
            "llama4_scout" => Some(ModelName::Llama4Scout),
            "gemini" => Some(ModelName::Gemini),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (any case, dashes allowed)
    pub fn from_code(code: &str) -> Option<Self> {
        ModelName::from_db_str(&code.trim().to_lowercase().replace('-', "_"))
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
