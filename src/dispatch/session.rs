use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Orders in-flight searches so only the newest result is applied.
///
/// `begin` hands out a monotonically increasing ticket per dispatched search;
/// `apply_if_latest` runs an action only while its ticket is still the newest
/// one issued, holding a lock across the check and the action so a stale
/// result can never render after a fresher one. Superseded requests are never
/// cancelled, they just lose the apply-time comparison.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
    apply_lock: Mutex<()>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Runs `action` and returns its result if `ticket` is still the newest
    /// issued, or `None` when the ticket went stale.
    pub fn apply_if_latest<R>(&self, ticket: u64, action: impl FnOnce() -> R) -> Option<R> {
        let _guard = self
            .apply_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.latest.load(Ordering::SeqCst) != ticket {
            return None;
        }

        Some(action())
    }
}
