//! Stamp events for audit-field decisions.
//!
//! This module provides:
//! - `StampEvent`: what one lifecycle callback decided
//! - `StampTrail`: in-memory recorder for stamp events
//!
//! Every stamp is also emitted as a structured `tracing` event on the
//! `traceable_audit` target.

mod event;
mod trail;

pub use event::{LifecyclePhase, StampEvent, StampOutcome};
pub use trail::StampTrail;

/// Emits a stamp event through tracing.
pub(crate) fn emit(event: &StampEvent) {
    tracing::info!(
        target: "traceable_audit",
        phase = %event.phase(),
        request_id = ?event.request_id(),
        principal = ?event.principal(),
        source = ?event.source(),
        outcome = %event.outcome(),
        "stamp event"
    );
}
