use std::collections::VecDeque;

use crate::types::NotificationRequest;

/// Pending requests in arrival order. Unbounded, no deduplication.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<NotificationRequest>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: NotificationRequest) {
        self.pending.push_back(request);
    }

    /// The only way a request leaves the queue: promotion to the visible slot.
    pub(crate) fn pop_front(&mut self) -> Option<NotificationRequest> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationQueue;
    use crate::types::NotificationRequest;

    #[test]
    fn pops_in_insertion_order() {
        let mut queue = NotificationQueue::new();
        queue.push(NotificationRequest::new("m1", "error"));
        queue.push(NotificationRequest::new("m2", "success"));
        queue.push(NotificationRequest::new("m3", "info"));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_front())
            .map(|r| r.message)
            .collect();
        assert_eq!(order, ["m1", "m2", "m3"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn keeps_duplicates() {
        let mut queue = NotificationQueue::new();
        queue.push(NotificationRequest::new("same", "info"));
        queue.push(NotificationRequest::new("same", "info"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
    }
}
