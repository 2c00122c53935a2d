//! Trail difficulty scale used for the route ceiling.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rank of every label on the scale. `blue-black` sits between blue and black.
static RANKS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("green", 1.0),
        ("blue", 2.0),
        ("blue-black", 2.5),
        ("black", 3.0),
        ("double_black", 4.0),
    ])
});

/// Rank of a trail difficulty label. Labels off the scale (such as
/// `terrain-park`) rank `0` and therefore pass every ceiling.
pub fn difficulty_rank(label: &str) -> f64 {
    RANKS.get(label).copied().unwrap_or(0.0)
}

/// Ordered difficulty scale a route ceiling is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "green")]
    Green,
    #[serde(rename = "blue")]
    Blue,
    #[serde(rename = "blue-black")]
    BlueBlack,
    #[serde(rename = "black")]
    Black,
    #[default]
    #[serde(rename = "double_black")]
    DoubleBlack,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Green,
        Difficulty::Blue,
        Difficulty::BlueBlack,
        Difficulty::Black,
        Difficulty::DoubleBlack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Green => "green",
            Difficulty::Blue => "blue",
            Difficulty::BlueBlack => "blue-black",
            Difficulty::Black => "black",
            Difficulty::DoubleBlack => "double_black",
        }
    }

    pub fn rank(self) -> f64 {
        difficulty_rank(self.as_str())
    }

    /// Whether a trail labelled `label` is within this ceiling.
    pub fn admits(self, label: &str) -> bool {
        difficulty_rank(label) <= self.rank()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == normalized)
            .ok_or_else(|| Error::InvalidDifficulty {
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_the_scale_not_the_alphabet() {
        let ranks: Vec<f64> = Difficulty::ALL.iter().map(|d| d.rank()).collect();
        assert_eq!(ranks, vec![1.0, 2.0, 2.5, 3.0, 4.0]);
    }

    #[test]
    fn unlisted_labels_rank_zero() {
        assert_eq!(difficulty_rank("terrain-park"), 0.0);
        assert_eq!(difficulty_rank(""), 0.0);
        assert!(Difficulty::Green.admits("terrain-park"));
    }

    #[test]
    fn ceiling_is_inclusive() {
        assert!(Difficulty::Blue.admits("blue"));
        assert!(!Difficulty::Blue.admits("blue-black"));
        assert!(Difficulty::BlueBlack.admits("blue-black"));
    }

    #[test]
    fn parses_known_labels_only() {
        assert_eq!("Blue-Black".parse::<Difficulty>().unwrap(), Difficulty::BlueBlack);
        assert_eq!(
            " double_black ".parse::<Difficulty>().unwrap(),
            Difficulty::DoubleBlack
        );
        assert!(matches!(
            "terrain-park".parse::<Difficulty>(),
            Err(Error::InvalidDifficulty { .. })
        ));
    }
}
