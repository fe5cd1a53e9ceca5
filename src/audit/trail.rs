//! In-memory stamp event recorder.

use super::StampEvent;
use std::sync::{Mutex, MutexGuard};

/// In-memory recorder for stamp events.
///
/// Shared between threads; each call takes the lock briefly. Useful for
/// tests and for inspecting what the stamper decided in a batch.
///
/// # Example
///
/// ```
/// use traceable_core::audit::{LifecyclePhase, StampEvent, StampOutcome, StampTrail};
///
/// let trail = StampTrail::new();
/// trail.record(StampEvent::new(
///     LifecyclePhase::Create,
///     Some("req-123"),
///     None,
///     StampOutcome::Skipped,
/// ));
///
/// assert_eq!(trail.events().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StampTrail {
    events: Mutex<Vec<StampEvent>>,
}

impl StampTrail {
    /// Creates a new empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    // Events are appended whole, so a poisoned lock still holds a valid list.
    fn lock(&self) -> MutexGuard<'_, Vec<StampEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a stamp event.
    ///
    /// Events are stored in the order they are recorded.
    pub fn record(&self, event: StampEvent) {
        self.lock().push(event);
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<StampEvent> {
        self.lock().clone()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }
}
