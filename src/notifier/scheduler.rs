use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, trace};

use super::policy::{self, TimingPolicy};
use super::queue::NotificationQueue;
use crate::types::{Action, NotificationId, NotificationRequest, Severity};

/// Where the scheduler stands on its timeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Slot closed, nothing pending.
    Idle,
    /// Slot open.
    Showing,
    /// Slot closed, waiting out the settle delay before the next promotion.
    Settling,
}

/// The single visible slot, as seen by the presentation layer.
///
/// Message and severity survive a close so the slot can animate out; actions
/// are cleared.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct VisibleState {
    pub is_open: bool,
    pub id: Option<NotificationId>,
    pub message: String,
    pub severity: Severity,
    pub actions: Vec<Action>,
}

impl VisibleState {
    #[must_use]
    pub const fn is_closable(&self) -> bool {
        policy::is_closable(&self.severity)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Timer {
    Dismiss {
        id: NotificationId,
        deadline: Instant,
    },
    Settle {
        deadline: Instant,
    },
}

impl Timer {
    const fn deadline(self) -> Instant {
        match self {
            Self::Dismiss { deadline, .. } | Self::Settle { deadline } => deadline,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum DismissCause {
    Manual,
    Timeout,
}

/// Serializes notifications into the visible slot.
///
/// Purely synchronous: every operation takes the current instant, and
/// [`Scheduler::next_deadline`] tells the caller when to come back. Only one
/// timer exists at a time and every transition out of `Showing` replaces or
/// clears it, so a dismiss timer cannot outlive the notification it was armed
/// for.
#[derive(Debug)]
pub struct Scheduler {
    policy: TimingPolicy,
    queue: NotificationQueue,
    visible: VisibleState,
    timer: Option<Timer>,
    last_id: u64,
}

impl Scheduler {
    pub fn new(policy: TimingPolicy) -> Self {
        Self {
            policy,
            queue: NotificationQueue::new(),
            visible: VisibleState::default(),
            timer: None,
            last_id: 0,
        }
    }

    pub const fn visible(&self) -> &VisibleState {
        &self.visible
    }

    pub const fn is_closable(&self) -> bool {
        self.visible.is_closable()
    }

    /// Requests waiting behind the visible one.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn phase(&self) -> Phase {
        if self.visible.is_open {
            Phase::Showing
        } else if matches!(self.timer, Some(Timer::Settle { .. })) {
            Phase::Settling
        } else {
            Phase::Idle
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.map(Timer::deadline)
    }

    /// Append a request. Shown right away when the scheduler is idle,
    /// otherwise it waits its turn.
    pub fn enqueue(&mut self, request: NotificationRequest, now: Instant) {
        debug!(
            severity = %request.severity,
            pending = self.queue.len() + 1,
            "notification queued"
        );
        self.queue.push(request);
        if self.phase() == Phase::Idle {
            self.promote_next(now);
        }
    }

    /// Manual close. Returns `false` when nothing was open.
    pub fn close(&mut self, now: Instant) -> bool {
        if !self.visible.is_open {
            trace!("close requested while nothing is visible");
            return false;
        }
        self.dismiss(now, DismissCause::Manual);
        true
    }

    /// Fire every timer due at `now`. Returns whether anything changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Some(timer) = self.timer.filter(|t| t.deadline() <= now) {
            match timer {
                Timer::Dismiss { id, deadline } => {
                    if self.visible.id == Some(id) && self.visible.is_open {
                        self.dismiss(deadline, DismissCause::Timeout);
                    } else {
                        self.timer = None;
                    }
                }
                Timer::Settle { deadline } => {
                    self.timer = None;
                    self.promote_next(deadline);
                }
            }
            changed = true;
        }
        changed
    }

    /// Cancel any live timer, drop pending requests and close the slot.
    /// Returns how many queued requests were discarded.
    pub fn teardown(&mut self) -> usize {
        self.timer = None;
        self.visible.is_open = false;
        self.visible.actions.clear();
        self.queue.clear()
    }

    fn promote_next(&mut self, now: Instant) {
        let Some(next) = self.queue.pop_front() else {
            return;
        };
        self.last_id += 1;
        let id = NotificationId(self.last_id);
        let timeout = self.policy.effective_timeout(&next);

        let NotificationRequest {
            message,
            severity,
            actions,
            ..
        } = next;
        self.visible = VisibleState {
            is_open: true,
            id: Some(id),
            message,
            severity,
            actions,
        };
        self.timer = timeout.map(|timeout| Timer::Dismiss {
            id,
            deadline: now + timeout,
        });

        debug!(
            %id,
            severity = %self.visible.severity,
            ?timeout,
            pending = self.queue.len(),
            "notification shown"
        );
    }

    fn dismiss(&mut self, now: Instant, cause: DismissCause) {
        // The dismiss timer goes first, before the slot changes hands.
        self.timer = None;
        self.visible.is_open = false;
        self.visible.actions.clear();

        if !self.queue.is_empty() {
            self.timer = Some(Timer::Settle {
                deadline: now + self.policy.settle_delay,
            });
        }

        debug!(
            id = ?self.visible.id,
            ?cause,
            pending = self.queue.len(),
            "notification dismissed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, Scheduler};
    use crate::notifier::policy::TimingPolicy;
    use crate::types::{Action, NotificationId, NotificationRequest, Severity};
    use std::time::Duration;
    use tokio::time::Instant;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn scheduler() -> Scheduler {
        Scheduler::new(TimingPolicy::default())
    }

    #[test]
    fn idle_enqueue_promotes_immediately() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert_eq!(s.phase(), Phase::Idle);

        s.enqueue(NotificationRequest::new("input changed", "info"), t0);
        assert_eq!(s.phase(), Phase::Showing);
        assert!(s.visible().is_open);
        assert_eq!(s.visible().message, "input changed");
        assert_eq!(s.visible().id, Some(NotificationId(1)));
        assert_eq!(s.pending(), 0);
        assert_eq!(s.next_deadline(), Some(t0 + ms(2_000)));
    }

    #[test]
    fn second_request_waits_while_showing() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("first", "error"), t0);
        s.enqueue(NotificationRequest::new("second", "success"), t0 + ms(10));

        assert_eq!(s.visible().message, "first");
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn default_timeouts_by_severity() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("x", "success"), t0);
        assert!(!s.advance(t0 + ms(1_999)));
        assert!(s.visible().is_open);
        assert!(s.advance(t0 + ms(2_000)));
        assert!(!s.visible().is_open);
        assert_eq!(s.phase(), Phase::Idle);

        let t1 = t0 + ms(5_000);
        s.enqueue(NotificationRequest::new("x", "error"), t1);
        s.advance(t1 + ms(9_999));
        assert!(s.visible().is_open);
        s.advance(t1 + ms(10_000));
        assert!(!s.visible().is_open);
    }

    #[test]
    fn zero_duration_is_sticky() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("x", "error").sticky(), t0);
        assert_eq!(s.next_deadline(), None);
        assert!(!s.advance(t0 + Duration::from_secs(3_600)));
        assert!(s.visible().is_open);
        assert!(s.close(t0 + Duration::from_secs(3_600)));
        assert!(!s.visible().is_open);
    }

    #[test]
    fn close_is_idempotent() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(
            NotificationRequest::new("mute failed", "error")
                .with_actions([Action::new("Retry")]),
            t0,
        );
        assert!(s.close(t0 + ms(100)));
        let after_first = s.visible().clone();
        assert!(!s.close(t0 + ms(101)));
        assert_eq!(s.visible(), &after_first);
        assert!(after_first.actions.is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn close_on_fresh_scheduler_is_noop() {
        let mut s = scheduler();
        assert!(!s.close(Instant::now()));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn settle_delay_separates_notifications() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("m1", "error"), t0);
        s.enqueue(NotificationRequest::new("m2", "error"), t0);

        s.close(t0 + ms(1_000));
        assert_eq!(s.phase(), Phase::Settling);
        assert_eq!(s.next_deadline(), Some(t0 + ms(1_500)));

        s.advance(t0 + ms(1_499));
        assert!(!s.visible().is_open);

        s.advance(t0 + ms(1_500));
        assert_eq!(s.visible().message, "m2");
        assert_eq!(s.visible().id, Some(NotificationId(2)));
    }

    #[test]
    fn enqueue_while_settling_waits_for_the_delay() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("m1", "error"), t0);
        s.enqueue(NotificationRequest::new("m2", "error"), t0);
        s.close(t0 + ms(100));

        s.enqueue(NotificationRequest::new("m3", "error"), t0 + ms(200));
        assert_eq!(s.phase(), Phase::Settling);
        assert_eq!(s.pending(), 2);

        s.advance(t0 + ms(600));
        assert_eq!(s.visible().message, "m2");
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn stale_dismiss_timer_never_hits_the_next_notification() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("m1", "error"), t0);
        s.enqueue(NotificationRequest::new("m2", "error"), t0);

        // m1 would have expired at 10s.
        s.close(t0 + ms(1_000));
        s.advance(t0 + ms(1_500));
        assert_eq!(s.visible().message, "m2");

        s.advance(t0 + ms(10_000));
        assert!(s.visible().is_open);
        assert_eq!(s.visible().message, "m2");
        assert_eq!(s.next_deadline(), Some(t0 + ms(11_500)));
    }

    #[test]
    fn large_clock_jump_drains_in_order() {
        let t0 = Instant::now();
        let mut s = scheduler();
        for message in ["m1", "m2", "m3"] {
            s.enqueue(NotificationRequest::new(message, "success"), t0);
        }

        // m1 2000, settle 500, m2 2000, settle 500 -> m3 shown at 5000.
        s.advance(t0 + ms(5_000));
        assert_eq!(s.visible().message, "m3");
        assert_eq!(s.visible().id, Some(NotificationId(3)));

        s.advance(t0 + ms(7_000));
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn closability_tracks_visible_severity() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("ok", "Success"), t0);
        assert!(!s.is_closable());
        s.close(t0);
        s.enqueue(NotificationRequest::new("bad", Severity::Warning), t0 + ms(10));
        assert!(s.is_closable());
    }

    #[test]
    fn teardown_cancels_timer_and_drops_queue() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.enqueue(NotificationRequest::new("m1", "error"), t0);
        s.enqueue(NotificationRequest::new("m2", "error"), t0);

        assert_eq!(s.teardown(), 1);
        assert_eq!(s.next_deadline(), None);
        assert!(!s.visible().is_open);
        assert_eq!(s.phase(), Phase::Idle);
    }
}
