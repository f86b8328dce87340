use serde::{Deserialize, Serialize};

/// How active a user is day to day. Feeds the server's calorie estimate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityLevel::Low => write!(fmt, "low"),
            ActivityLevel::Medium => write!(fmt, "medium"),
            ActivityLevel::High => write!(fmt, "high"),
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "medium" => Ok(ActivityLevel::Medium),
            "high" => Ok(ActivityLevel::High),
            other => Err(format!("unknown activity level: {other}")),
        }
    }
}
