//! Ball/strike counting over a pitch sequence.

use schema::{Outcome, PitchMark};
use std::fmt;

pub const STRIKES_FOR_OUT: u8 = 3;
pub const BALLS_FOR_WALK: usize = 4;

/// Strikes in the sequence, saturating at three.
///
/// A foul only counts while the batter has fewer than two strikes.
pub fn strike_count(sequence: &[PitchMark]) -> u8 {
    let mut strikes = 0u8;
    for mark in sequence {
        match mark {
            PitchMark::CalledStrike | PitchMark::SwingingStrike => strikes += 1,
            PitchMark::Foul if strikes < 2 => strikes += 1,
            _ => {}
        }
        if strikes >= STRIKES_FOR_OUT {
            return STRIKES_FOR_OUT;
        }
    }
    strikes
}

/// Balls in the sequence. Fouls and dead balls never count.
pub fn ball_count(sequence: &[PitchMark]) -> usize {
    sequence
        .iter()
        .filter(|mark| **mark == PitchMark::Ball)
        .count()
}

pub fn has_dead_ball(sequence: &[PitchMark]) -> bool {
    sequence.contains(&PitchMark::Dead)
}

/// Outcome the pitch sequence forces on its own, if any.
///
/// Precedence is fixed: strikeout, then hit-by-pitch, then walk.
pub fn auto_outcome(sequence: &[PitchMark]) -> Option<Outcome> {
    if strike_count(sequence) >= STRIKES_FOR_OUT {
        Some(Outcome::Strikeout)
    } else if has_dead_ball(sequence) {
        Some(Outcome::Hbp)
    } else if ball_count(sequence) >= BALLS_FOR_WALK {
        Some(Outcome::Walk)
    } else {
        None
    }
}

/// Current count, displayed the usual way as `balls-strikes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count {
    pub balls: usize,
    pub strikes: u8,
}

impl Count {
    pub fn of(sequence: &[PitchMark]) -> Self {
        Self {
            balls: ball_count(sequence),
            strikes: strike_count(sequence),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}
