use crate::pitch_types::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// How a runner got from one base to the next.
///
/// Renderers partition these three ways: `Hit` (solid), `Advance`/`Error`
/// (non-hit progress) and `Award` (dashed).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SegmentKind {
    Hit,
    Advance,
    Error,
    Award,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Free pass that puts the batter on first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AwardType {
    #[strum(serialize = "walk", serialize = "bb")]
    Walk,
    #[serde(rename = "HBP")]
    #[strum(serialize = "hbp", serialize = "hit_by_pitch")]
    Hbp,
}

impl AwardType {
    pub fn outcome(self) -> Outcome {
        match self {
            AwardType::Walk => Outcome::Walk,
            AwardType::Hbp => Outcome::Hbp,
        }
    }
}

impl fmt::Display for AwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            AwardType::Walk => "Walk",
            AwardType::Hbp => "HBP",
        };
        write!(f, "{}", display_name)
    }
}
