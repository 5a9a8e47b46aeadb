// One-shot task keyed to a match generation; stale ones never fire.

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    due_ms: f64,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct DeferredTask {
    pending: Option<Pending>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) the task `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, generation: u64) {
        self.pending = Some(Pending {
            due_ms: now_ms + delay_ms,
            generation,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline,
    /// provided `generation` still matches the one it was scheduled for.
    pub fn poll(&mut self, now_ms: f64, generation: u64) -> bool {
        match self.pending {
            Some(p) if p.generation != generation => {
                self.pending = None;
                false
            }
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
