//! Project category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of categories a proposal can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    /// Robots and manipulators.
    Robotics,
    /// Connected devices and sensor networks.
    Iot,
    /// Machine learning and AI.
    AiMl,
    /// Cameras, depth sensing, and vision pipelines.
    ComputerVision,
    /// Microcontroller and firmware work.
    EmbeddedSystems,
    /// Aerial platforms.
    Drones,
    /// Industrial and home automation.
    Automation,
    /// Anything else.
    Other,
}

impl ProjectCategory {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Robotics => "robotics",
            Self::Iot => "iot",
            Self::AiMl => "ai_ml",
            Self::ComputerVision => "computer_vision",
            Self::EmbeddedSystems => "embedded_systems",
            Self::Drones => "drones",
            Self::Automation => "automation",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = labhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-', '/'], "_").as_str() {
            "robotics" => Ok(Self::Robotics),
            "iot" => Ok(Self::Iot),
            "ai_ml" => Ok(Self::AiMl),
            "computer_vision" => Ok(Self::ComputerVision),
            "embedded_systems" => Ok(Self::EmbeddedSystems),
            "drones" => Ok(Self::Drones),
            "automation" => Ok(Self::Automation),
            "other" => Ok(Self::Other),
            _ => Err(labhub_core::AppError::invalid_field(
                "category",
                format!("Unknown project category: '{s}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_display_forms() {
        assert_eq!(
            "AI/ML".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::AiMl
        );
        assert_eq!(
            "Embedded Systems".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::EmbeddedSystems
        );
        assert!("gardening".parse::<ProjectCategory>().is_err());
    }
}
