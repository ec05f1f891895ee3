use std::fmt;
use std::str::FromStr;

use crate::error::ParseModelError;

/// The three risk classifiers, in prediction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Model {
    Heart,
    Sleep,
    Metabolism,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Heart, Model::Sleep, Model::Metabolism];

    pub fn name(self) -> &'static str {
        match self {
            Self::Heart => "Heart",
            Self::Sleep => "Sleep",
            Self::Metabolism => "Metabolism",
        }
    }

    /// Key used in the JSON response body.
    pub fn key(self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Sleep => "sleep",
            Self::Metabolism => "metabolism",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModelError(s.to_string()))
    }
}
