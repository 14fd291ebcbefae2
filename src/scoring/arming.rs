//! Short-lived tags the scorer arms before a diamond click.
//!
//! Arming is plain data with an expiry timestamp. Hosts call
//! [`Arming::poll`] on a fixed interval to drop stale tags; every read also
//! checks expiry against the caller's clock, so a late poll never lets a
//! stale tag through.

use crate::cell::BattingOrder;
use schema::AwardType;

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armed<T> {
    pub value: T,
    pub expires_at: Millis,
}

impl<T: Copy> Armed<T> {
    pub fn new(value: T, now: Millis, ttl: Millis) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl),
        }
    }

    pub fn is_armed_at(&self, now: Millis) -> bool {
        now < self.expires_at
    }

    fn live_value(&self, now: Millis) -> Option<T> {
        self.is_armed_at(now).then_some(self.value)
    }
}

/// Tags consumed by one interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmedTags {
    pub batter: Option<BattingOrder>,
    pub award: Option<AwardType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arming {
    batter: Option<Armed<BattingOrder>>,
    award: Option<Armed<AwardType>>,
}

impl Arming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit the next segment to `batter`.
    pub fn arm_batter(&mut self, batter: BattingOrder, now: Millis, ttl: Millis) {
        log::debug!("armed batter #{} until {}", batter, now.saturating_add(ttl));
        self.batter = Some(Armed::new(batter, now, ttl));
    }

    /// Mark the next segment as a walk/HBP award.
    pub fn arm_award(&mut self, award: AwardType, now: Millis, ttl: Millis) {
        log::debug!("armed award {} until {}", award, now.saturating_add(ttl));
        self.award = Some(Armed::new(award, now, ttl));
    }

    pub fn cancel(&mut self) {
        self.batter = None;
        self.award = None;
    }

    /// Drop expired tags. Returns true when anything was cleared.
    pub fn poll(&mut self, now: Millis) -> bool {
        let mut expired = false;
        if self.batter.is_some_and(|armed| !armed.is_armed_at(now)) {
            self.batter = None;
            expired = true;
        }
        if self.award.is_some_and(|armed| !armed.is_armed_at(now)) {
            self.award = None;
            expired = true;
        }
        expired
    }

    pub fn armed_batter(&self, now: Millis) -> Option<BattingOrder> {
        self.batter.and_then(|armed| armed.live_value(now))
    }

    pub fn armed_award(&self, now: Millis) -> Option<AwardType> {
        self.award.and_then(|armed| armed.live_value(now))
    }

    pub fn is_idle(&self, now: Millis) -> bool {
        self.armed_batter(now).is_none() && self.armed_award(now).is_none()
    }

    /// Consume whatever is still armed at `now`, leaving nothing armed.
    pub fn take(&mut self, now: Millis) -> ArmedTags {
        let tags = ArmedTags {
            batter: self.armed_batter(now),
            award: self.armed_award(now),
        };
        self.cancel();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TTL: Millis = 3_000;

    #[test]
    fn test_armed_tags_expire_after_ttl() {
        let mut arming = Arming::new();
        arming.arm_batter(4, 1_000, TTL);

        assert_eq!(arming.armed_batter(3_999), Some(4));
        assert_eq!(arming.armed_batter(4_000), None);
    }

    #[test]
    fn test_take_consumes_both_tags() {
        let mut arming = Arming::new();
        arming.arm_batter(2, 0, TTL);
        arming.arm_award(AwardType::Hbp, 100, TTL);

        let tags = arming.take(500);
        assert_eq!(
            tags,
            ArmedTags {
                batter: Some(2),
                award: Some(AwardType::Hbp),
            }
        );
        assert!(arming.is_idle(600));
        assert_eq!(arming.take(700), ArmedTags::default());
    }

    #[test]
    fn test_take_ignores_stale_tags() {
        let mut arming = Arming::new();
        arming.arm_award(AwardType::Walk, 0, TTL);

        assert_eq!(arming.take(TTL + 1).award, None);
    }

    #[test]
    fn test_poll_clears_only_expired() {
        let mut arming = Arming::new();
        arming.arm_batter(7, 0, TTL);
        arming.arm_award(AwardType::Walk, 2_000, TTL);

        assert!(arming.poll(3_500));
        assert_eq!(arming.armed_batter(3_500), None);
        assert_eq!(arming.armed_award(3_500), Some(AwardType::Walk));
        assert!(!arming.poll(3_600));
    }

    #[test]
    fn test_cancel_clears_immediately() {
        let mut arming = Arming::new();
        arming.arm_batter(1, 0, TTL);
        arming.arm_award(AwardType::Walk, 0, TTL);
        arming.cancel();

        assert!(arming.is_idle(1));
    }
}
