use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl std::fmt::Display for Goal {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Goal::Lose => write!(fmt, "lose"),
            Goal::Maintain => write!(fmt, "maintain"),
            Goal::Gain => write!(fmt, "gain"),
        }
    }
}

impl std::str::FromStr for Goal {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(format!("unknown goal: {other}")),
        }
    }
}
