//! Model value object representing a provider model id

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chat models offered by the upstream provider (Value Object)
///
/// Unknown ids are carried through as [`Model::Custom`] so new provider
/// models can be used without a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    #[default]
    Llama3_8b,
    Llama3_70b,
    Llama31_8bInstant,
    Llama33_70bVersatile,
    Mixtral8x7b,
    Gemma2_9b,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Llama3_8b => "llama3-8b-8192",
            Model::Llama3_70b => "llama3-70b-8192",
            Model::Llama31_8bInstant => "llama-3.1-8b-instant",
            Model::Llama33_70bVersatile => "llama-3.3-70b-versatile",
            Model::Mixtral8x7b => "mixtral-8x7b-32768",
            Model::Gemma2_9b => "gemma2-9b-it",
            Model::Custom(s) => s,
        }
    }

    /// Models known to this build
    pub fn known_models() -> Vec<Model> {
        vec![
            Model::Llama3_8b,
            Model::Llama3_70b,
            Model::Llama31_8bInstant,
            Model::Llama33_70bVersatile,
            Model::Mixtral8x7b,
            Model::Gemma2_9b,
        ]
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Model::Custom(_))
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s {
            "llama3-8b-8192" => Model::Llama3_8b,
            "llama3-70b-8192" => Model::Llama3_70b,
            "llama-3.1-8b-instant" => Model::Llama31_8bInstant,
            "llama-3.3-70b-versatile" => Model::Llama33_70bVersatile,
            "mixtral-8x7b-32768" => Model::Mixtral8x7b,
            "gemma2-9b-it" => Model::Gemma2_9b,
            other => Model::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
