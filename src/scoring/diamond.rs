//! Turning raw diamond clicks into [`PathStep`]s.

use crate::scoring::arming::{Arming, Millis};
use crate::scoring::commands::PathStep;
use schema::SegmentKind;

/// Modifier held while clicking the diamond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClickModifier {
    #[default]
    None,
    /// Ball put in play for extra bases.
    Hit,
    /// Advance on a fielding error.
    Error,
}

impl std::str::FromStr for ClickModifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "advance" => Ok(ClickModifier::None),
            "hit" | "shift" => Ok(ClickModifier::Hit),
            "error" | "e" | "alt" => Ok(ClickModifier::Error),
            other => Err(format!("unknown click modifier '{}'", other)),
        }
    }
}

/// Where and when a diamond click happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiamondClick {
    pub row: usize,
    pub inning: usize,
    pub modifier: ClickModifier,
    pub at: Millis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastClick {
    row: usize,
    inning: usize,
    kind: SegmentKind,
    at: Millis,
}

/// Interaction memory shared by every cell of the active scorecard.
#[derive(Debug, Clone, Default)]
pub struct DiamondInput {
    pub arming: Arming,
    last_click: Option<LastClick>,
}

impl DiamondInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a click into a path step, consuming any armed tags.
    ///
    /// A repeat click of the same kind on the same cell inside `merge_window`
    /// stretches the last segment when the path already has one.
    pub fn resolve(&mut self, click: DiamondClick, path_is_empty: bool, merge_window: Millis) -> PathStep {
        let tags = self.arming.take(click.at);
        let mut step = match (tags.award, click.modifier) {
            (Some(award), _) => PathStep::award(award),
            (None, ClickModifier::Hit) => PathStep::of_kind(SegmentKind::Hit),
            (None, ClickModifier::Error) => PathStep::of_kind(SegmentKind::Error),
            (None, ClickModifier::None) => PathStep::advance(),
        }
        .caused_by(tags.batter);

        let is_repeat = self.last_click.is_some_and(|last| {
            last.row == click.row
                && last.inning == click.inning
                && last.kind == step.kind
                && click.at.saturating_sub(last.at) <= merge_window
        });
        if is_repeat && !path_is_empty {
            step = step.extending();
        }

        self.last_click = Some(LastClick {
            row: click.row,
            inning: click.inning,
            kind: step.kind,
            at: click.at,
        });
        step
    }

    /// Forget click history, e.g. after the active team changes.
    pub fn clear(&mut self) {
        self.arming.cancel();
        self.last_click = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::AwardType;

    const WINDOW: Millis = 350;

    fn click(at: Millis, modifier: ClickModifier) -> DiamondClick {
        DiamondClick {
            row: 0,
            inning: 0,
            modifier,
            at,
        }
    }

    #[test]
    fn test_quick_repeat_extends() {
        let mut input = DiamondInput::new();
        let first = input.resolve(click(1_000, ClickModifier::None), true, WINDOW);
        let second = input.resolve(click(1_200, ClickModifier::None), false, WINDOW);

        assert!(!first.extend_last);
        assert!(second.extend_last);
    }

    #[test]
    fn test_slow_repeat_appends() {
        let mut input = DiamondInput::new();
        input.resolve(click(1_000, ClickModifier::None), true, WINDOW);
        let second = input.resolve(click(1_400, ClickModifier::None), false, WINDOW);

        assert!(!second.extend_last);
    }

    #[test]
    fn test_kind_change_appends() {
        let mut input = DiamondInput::new();
        input.resolve(click(1_000, ClickModifier::Hit), true, WINDOW);
        let second = input.resolve(click(1_100, ClickModifier::Error), false, WINDOW);

        assert_eq!(second.kind, SegmentKind::Error);
        assert!(!second.extend_last);
    }

    #[test]
    fn test_other_cell_does_not_merge() {
        let mut input = DiamondInput::new();
        input.resolve(click(1_000, ClickModifier::None), true, WINDOW);
        let elsewhere = input.resolve(
            DiamondClick {
                row: 1,
                ..click(1_100, ClickModifier::None)
            },
            false,
            WINDOW,
        );

        assert!(!elsewhere.extend_last);
    }

    #[test]
    fn test_armed_award_overrides_modifier_and_is_consumed() {
        let mut input = DiamondInput::new();
        input.arming.arm_award(AwardType::Hbp, 0, 3_000);
        input.arming.arm_batter(6, 0, 3_000);

        let step = input.resolve(click(500, ClickModifier::Hit), true, WINDOW);
        assert_eq!(step.kind, SegmentKind::Award);
        assert_eq!(step.award_type, Some(AwardType::Hbp));
        assert_eq!(step.caused_by, Some(6));

        let next = input.resolve(click(5_000, ClickModifier::None), false, WINDOW);
        assert_eq!(next.kind, SegmentKind::Advance);
        assert_eq!(next.caused_by, None);
    }

    #[test]
    fn test_modifier_parsing() {
        assert_eq!("shift".parse::<ClickModifier>(), Ok(ClickModifier::Hit));
        assert_eq!("Error".parse::<ClickModifier>(), Ok(ClickModifier::Error));
        assert_eq!("".parse::<ClickModifier>(), Ok(ClickModifier::None));
        assert!("ctrl".parse::<ClickModifier>().is_err());
    }
}
