use crate::run_types::AwardType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// One mark in a plate appearance's pitch sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PitchMark {
    #[strum(serialize = "ball", serialize = "b")]
    Ball,
    #[strum(serialize = "called_strike", serialize = "called", serialize = "c")]
    CalledStrike,
    #[strum(serialize = "swinging_strike", serialize = "swinging", serialize = "s")]
    SwingingStrike,
    #[strum(serialize = "foul", serialize = "f")]
    Foul,
    #[strum(serialize = "dead", serialize = "dead_ball", serialize = "d")]
    Dead,
}

impl PitchMark {
    /// Scorecard shorthand used when printing a pitch sequence.
    pub fn symbol(self) -> char {
        match self {
            PitchMark::Ball => 'B',
            PitchMark::CalledStrike => 'C',
            PitchMark::SwingingStrike => 'S',
            PitchMark::Foul => 'F',
            PitchMark::Dead => 'D',
        }
    }
}

impl fmt::Display for PitchMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            PitchMark::Ball => "Ball",
            PitchMark::CalledStrike => "Called Strike",
            PitchMark::SwingingStrike => "Swinging Strike",
            PitchMark::Foul => "Foul",
            PitchMark::Dead => "Dead Ball",
        };
        write!(f, "{}", display_name)
    }
}

/// The official result of a plate appearance. Exactly one per cell.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Outcome {
    #[default]
    None,
    InPlay,
    #[strum(serialize = "walk", serialize = "bb")]
    Walk,
    #[serde(rename = "HBP")]
    #[strum(serialize = "hbp", serialize = "hit_by_pitch")]
    Hbp,
    #[strum(serialize = "strikeout", serialize = "k")]
    Strikeout,
    #[strum(serialize = "single", serialize = "1b")]
    Single,
    #[strum(serialize = "double", serialize = "2b")]
    Double,
    #[strum(serialize = "triple", serialize = "3b")]
    Triple,
    #[strum(serialize = "home_run", serialize = "homerun", serialize = "hr")]
    HomeRun,
    Out,
}

impl Outcome {
    /// Bases the batter takes on a clean hit, `None` for every non-hit outcome.
    pub fn hit_bases(self) -> Option<u8> {
        match self {
            Outcome::Single => Some(1),
            Outcome::Double => Some(2),
            Outcome::Triple => Some(3),
            Outcome::HomeRun => Some(4),
            _ => None,
        }
    }

    /// Inverse of [`Outcome::hit_bases`]: 1 → Single … 4 → HomeRun.
    pub fn from_hit_bases(bases: u8) -> Option<Outcome> {
        match bases {
            1 => Some(Outcome::Single),
            2 => Some(Outcome::Double),
            3 => Some(Outcome::Triple),
            4 => Some(Outcome::HomeRun),
            _ => None,
        }
    }

    pub fn is_hit(self) -> bool {
        self.hit_bases().is_some()
    }

    pub fn award_type(self) -> Option<AwardType> {
        match self {
            Outcome::Walk => Some(AwardType::Walk),
            Outcome::Hbp => Some(AwardType::Hbp),
            _ => None,
        }
    }

    /// Whether the plate appearance is charged as an official at-bat.
    pub fn is_at_bat(self) -> bool {
        !matches!(self, Outcome::None | Outcome::Walk | Outcome::Hbp)
    }

    /// Scorecard abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Outcome::None => "",
            Outcome::InPlay => "IP",
            Outcome::Walk => "BB",
            Outcome::Hbp => "HBP",
            Outcome::Strikeout => "K",
            Outcome::Single => "1B",
            Outcome::Double => "2B",
            Outcome::Triple => "3B",
            Outcome::HomeRun => "HR",
            Outcome::Out => "OUT",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Outcome::None => "None",
            Outcome::InPlay => "In Play",
            Outcome::Walk => "Walk",
            Outcome::Hbp => "Hit By Pitch",
            Outcome::Strikeout => "Strikeout",
            Outcome::Single => "Single",
            Outcome::Double => "Double",
            Outcome::Triple => "Triple",
            Outcome::HomeRun => "Home Run",
            Outcome::Out => "Out",
        };
        write!(f, "{}", display_name)
    }
}
