//! One-shot delayed actions on the session clock
//!
//! Delayed work (ball activation after warm-up) is queued here instead of
//! running on a real timer. The session drains due entries at the start of
//! each tick, earliest first, ties in scheduling order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Slack for comparing accumulated clock values
const TIME_EPSILON: f64 = 1e-9;

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// End a ball's warm-up and launch it toward the player
    ActivateBall { id: u32 },
}

#[derive(Debug, Clone)]
struct Entry {
    at: f64,
    seq: u64,
    action: TimerAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest entry
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .total_cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of scheduled actions
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire once the clock reaches `at` seconds
    pub fn schedule(&mut self, at: f64, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { at, seq, action });
    }

    /// Remove and return the earliest action due at `now`
    pub fn pop_due(&mut self, now: f64) -> Option<TimerAction> {
        if self.heap.peek()?.at <= now + TIME_EPSILON {
            self.heap.pop().map(|entry| entry.action)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
