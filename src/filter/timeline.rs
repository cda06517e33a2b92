use std::collections::BTreeMap;
use tokio::time::Instant;

use crate::view::CardId;

/// Deferred second phase of a card transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Restore full opacity and resting position.
    Reveal,
    /// Remove the card from layout.
    Collapse,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Instant,
    step: Step,
}

/// Pending transitions, at most one per card.
///
/// Scheduling for a card that already has pending work replaces it, so a
/// transition from an earlier click can never land after a later one.
#[derive(Debug, Default)]
pub struct Timeline {
    pending: BTreeMap<CardId, Pending>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `step` for `card`, returning the step it displaced.
    pub fn schedule(&mut self, card: CardId, due: Instant, step: Step) -> Option<Step> {
        self.pending
            .insert(card, Pending { due, step })
            .map(|p| p.step)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every transition due at or before `now`, ordered by
    /// deadline then card.
    pub fn drain_due(&mut self, now: Instant) -> Vec<(CardId, Step)> {
        let mut due: Vec<(Instant, CardId, Step)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(card, p)| (p.due, *card, p.step))
            .collect();
        due.sort_by_key(|(at, card, _)| (*at, *card));

        for (_, card, _) in &due {
            self.pending.remove(card);
        }
        due.into_iter().map(|(_, card, step)| (card, step)).collect()
    }

    /// Removes and returns everything, regardless of deadline.
    pub fn drain_all(&mut self) -> Vec<(CardId, Step)> {
        let mut all: Vec<(Instant, CardId, Step)> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(card, p)| (p.due, card, p.step))
            .collect();
        all.sort_by_key(|(at, card, _)| (*at, *card));
        all.into_iter().map(|(_, card, step)| (card, step)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_schedule_replaces_pending_step() {
        let now = Instant::now();
        let mut timeline = Timeline::new();

        assert_eq!(
            timeline.schedule(CardId(0), now + Duration::from_millis(300), Step::Collapse),
            None
        );
        assert_eq!(
            timeline.schedule(CardId(0), now + Duration::from_millis(10), Step::Reveal),
            Some(Step::Collapse)
        );
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.next_due(), Some(now + Duration::from_millis(10)));

        // The displaced collapse never fires.
        let fired = timeline.drain_due(now + Duration::from_secs(1));
        assert_eq!(fired, vec![(CardId(0), Step::Reveal)]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_drain_due_respects_deadlines() {
        let now = Instant::now();
        let mut timeline = Timeline::new();
        timeline.schedule(CardId(2), now + Duration::from_millis(300), Step::Collapse);
        timeline.schedule(CardId(1), now + Duration::from_millis(10), Step::Reveal);

        assert_eq!(timeline.next_due(), Some(now + Duration::from_millis(10)));
        assert!(timeline.drain_due(now).is_empty());

        let fired = timeline.drain_due(now + Duration::from_millis(10));
        assert_eq!(fired, vec![(CardId(1), Step::Reveal)]);
        assert_eq!(timeline.next_due(), Some(now + Duration::from_millis(300)));

        let fired = timeline.drain_due(now + Duration::from_millis(300));
        assert_eq!(fired, vec![(CardId(2), Step::Collapse)]);
        assert_eq!(timeline.next_due(), None);
    }

    #[test]
    fn test_drain_all_orders_by_deadline() {
        let now = Instant::now();
        let mut timeline = Timeline::new();
        timeline.schedule(CardId(0), now + Duration::from_millis(300), Step::Collapse);
        timeline.schedule(CardId(1), now + Duration::from_millis(10), Step::Reveal);
        timeline.schedule(CardId(2), now + Duration::from_millis(10), Step::Reveal);

        assert_eq!(
            timeline.drain_all(),
            vec![
                (CardId(1), Step::Reveal),
                (CardId(2), Step::Reveal),
                (CardId(0), Step::Collapse),
            ]
        );
        assert!(timeline.is_empty());
    }
}
