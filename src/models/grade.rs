//! Symbolic grades offered after a review and their SM-2 quality.
use crate::error::ParseGradeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Easy,
    Medium,
    Hard,
}

impl Grade {
    pub fn quality(self) -> i32 {
        match self {
            Grade::Hard => 3,
            Grade::Medium => 4,
            Grade::Easy => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Easy => "easy",
            Grade::Medium => "medium",
            Grade::Hard => "hard",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Grade::Easy),
            "medium" => Ok(Grade::Medium),
            "hard" => Ok(Grade::Hard),
            _ => Err(ParseGradeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_mapping() {
        assert_eq!(Grade::Hard.quality(), 3);
        assert_eq!(Grade::Medium.quality(), 4);
        assert_eq!(Grade::Easy.quality(), 5);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Easy".parse::<Grade>(), Ok(Grade::Easy));
        assert_eq!(" HARD ".parse::<Grade>(), Ok(Grade::Hard));
        assert_eq!("medium".parse::<Grade>(), Ok(Grade::Medium));
    }

    #[test]
    fn test_parse_unknown_grade() {
        assert_eq!(
            "again".parse::<Grade>(),
            Err(ParseGradeError("again".to_string()))
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Grade::Medium).unwrap(), "\"medium\"");
    }
}
