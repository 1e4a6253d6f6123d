use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// User reported dandruff severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DandruffLevel {
    #[default]
    Low,
    Mid,
    High,
}

impl DandruffLevel {
    pub const ALL: [DandruffLevel; 3] = [Self::Low, Self::Mid, Self::High];

    /// Wire literal, as shown in the selection list
    pub fn as_str(&self) -> &'static str {
        match self {
            DandruffLevel::Low => "Low",
            DandruffLevel::Mid => "Mid",
            DandruffLevel::High => "High",
        }
    }
}

/// User reported hair loss progression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum HairLossStage {
    #[default]
    #[serde(rename = "Stage 1")]
    Stage1,
    #[serde(rename = "Stage 2")]
    Stage2,
    #[serde(rename = "Stage 3")]
    Stage3,
    #[serde(rename = "Stage 4")]
    Stage4,
}

impl HairLossStage {
    pub const ALL: [HairLossStage; 4] = [Self::Stage1, Self::Stage2, Self::Stage3, Self::Stage4];

    pub fn as_str(&self) -> &'static str {
        match self {
            HairLossStage::Stage1 => "Stage 1",
            HairLossStage::Stage2 => "Stage 2",
            HairLossStage::Stage3 => "Stage 3",
            HairLossStage::Stage4 => "Stage 4",
        }
    }
}

impl Display for DandruffLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for HairLossStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Parsing is lenient on case so form posts like "high" or "stage 2" are
// accepted. The engine only ever sees the canonical literal from as_str().
impl FromStr for DandruffLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown dandruff level: {}", s)))
    }
}

impl FromStr for HairLossStage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown hair loss stage: {}", s)))
    }
}

// JSON bodies go through the same lenient parse as form fields
impl TryFrom<String> for DandruffLevel {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for HairLossStage {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inputs the user supplies alongside the photo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelections {
    #[serde(default)]
    pub dandruff_level: DandruffLevel,
    #[serde(default)]
    pub hair_loss_stage: HairLossStage,
}

impl UserSelections {
    pub fn new(dandruff_level: DandruffLevel, hair_loss_stage: HairLossStage) -> Self {
        Self {
            dandruff_level,
            hair_loss_stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selections() {
        let selections = UserSelections::default();
        assert_eq!(selections.dandruff_level, DandruffLevel::Low);
        assert_eq!(selections.hair_loss_stage, HairLossStage::Stage1);
    }

    #[test]
    fn test_stage_serde_uses_display_literal() {
        let json = serde_json::to_string(&HairLossStage::Stage3).unwrap();
        assert_eq!(json, r#""Stage 3""#);

        let stage: HairLossStage = serde_json::from_str(r#""Stage 4""#).unwrap();
        assert_eq!(stage, HairLossStage::Stage4);
    }

    #[test]
    fn test_selections_missing_fields_default() {
        let selections: UserSelections = serde_json::from_str(r#"{"dandruff_level":"High"}"#).unwrap();
        assert_eq!(selections.dandruff_level, DandruffLevel::High);
        assert_eq!(selections.hair_loss_stage, HairLossStage::Stage1);
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        let selections: UserSelections =
            serde_json::from_str(r#"{"dandruff_level":"high","hair_loss_stage":"stage 2"}"#)
                .unwrap();
        assert_eq!(selections.dandruff_level, DandruffLevel::High);
        assert_eq!(selections.hair_loss_stage, HairLossStage::Stage2);

        // Serialization stays on the canonical literal
        let json = serde_json::to_value(selections).unwrap();
        assert_eq!(json["dandruff_level"], "High");
        assert_eq!(json["hair_loss_stage"], "Stage 2");
    }

    #[test]
    fn test_deserialize_rejects_unknown_values() {
        assert!(serde_json::from_str::<DandruffLevel>(r#""severe""#).is_err());
        assert!(serde_json::from_str::<HairLossStage>(r#""Stage 5""#).is_err());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("high".parse::<DandruffLevel>().unwrap(), DandruffLevel::High);
        assert_eq!(" MID ".parse::<DandruffLevel>().unwrap(), DandruffLevel::Mid);
        assert_eq!("stage 2".parse::<HairLossStage>().unwrap(), HairLossStage::Stage2);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!(matches!(
            "severe".parse::<DandruffLevel>(),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            "Stage 5".parse::<HairLossStage>(),
            Err(AppError::InvalidInput(_))
        ));
    }
}
