//! Weight-tuning algorithm selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Search strategy used by the weight tuner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Independent uniform draws from the weight simplex.
    #[default]
    Random,
    /// Simulated annealing from the base weights.
    Annealing,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Annealing => write!(f, "annealing"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "random_search" => Ok(Self::Random),
            "annealing" | "simulated_annealing" => Ok(Self::Annealing),
            other => Err(format!(
                "unknown algorithm '{other}' (expected 'random' or 'annealing')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("random".parse::<Algorithm>(), Ok(Algorithm::Random));
        assert_eq!("Annealing".parse::<Algorithm>(), Ok(Algorithm::Annealing));
        assert!("genetic".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Algorithm::Annealing).unwrap(), "\"annealing\"");
    }
}
