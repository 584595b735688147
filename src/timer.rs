use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Scheduled<E> {
    due: Instant,
    seq: u64,
    event: E,
}

/// Deferred events for the UI event loop.
///
/// The loop calls [`TimerQueue::drain_due`] on every tick and dispatches the
/// returned events in order. Events due at the same instant come out in the
/// order they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    pending: Vec<Scheduled<E>>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due, seq, event });
    }

    pub fn schedule_after(&mut self, now: Instant, delay: Duration, event: E) {
        self.schedule(now + delay, event);
    }

    /// Remove and return every event due at or before `now`
    pub fn drain_due(&mut self, now: Instant) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = rest;
        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.event).collect()
    }

    /// Drop every pending event
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_due_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule_after(start, Duration::from_millis(650), "second");
        queue.schedule_after(start, Duration::from_millis(300), "first");
        queue.schedule_after(start, Duration::from_millis(1000), "third");

        assert!(queue.drain_due(start).is_empty());
        assert_eq!(queue.next_due(), Some(start + Duration::from_millis(300)));
        assert_eq!(queue.drain_due(start + Duration::from_millis(700)), vec!["first", "second"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_due(start + Duration::from_secs(5)), vec!["third"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        for n in 0..5 {
            queue.schedule(start, n);
        }
        assert_eq!(queue.drain_due(start), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cancel_all_drops_pending_events() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule_after(start, Duration::from_millis(10), 1);
        queue.schedule_after(start, Duration::from_millis(20), 2);
        assert_eq!(queue.cancel_all(), 2);
        assert!(queue.drain_due(start + Duration::from_secs(1)).is_empty());
        assert_eq!(queue.next_due(), None);
    }
}
