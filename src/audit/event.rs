//! Stamp event schema and types.
//!
//! A stamp event describes what one lifecycle callback decided: which phase
//! ran, who the actor was and where that identity came from, and whether the
//! record was stamped at all.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::resolver::{PrincipalSource, ResolvedPrincipal};

/// Lifecycle moment at which the stamper ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Before the record's first durable write
    Create,
    /// Before a subsequent durable write
    Update,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::Create => write!(f, "create"),
            LifecyclePhase::Update => write!(f, "update"),
        }
    }
}

/// What a lifecycle callback did to the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    /// The record is under manual traceability control and was not touched
    Skipped,
    /// Audit fields were written
    Stamped {
        /// Actor written to the user fields, if one was resolved
        principal: Option<String>,
        /// Instant written to the date fields
        at: DateTime<Utc>,
    },
}

impl StampOutcome {
    /// Returns true if the record was left untouched.
    pub fn is_skipped(&self) -> bool {
        matches!(self, StampOutcome::Skipped)
    }
}

impl fmt::Display for StampOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampOutcome::Skipped => write!(f, "skipped"),
            StampOutcome::Stamped { .. } => write!(f, "stamped"),
        }
    }
}

/// A structured record of one stamper invocation.
///
/// # Example
///
/// ```
/// use traceable_core::audit::{LifecyclePhase, StampEvent, StampOutcome};
///
/// let event = StampEvent::new(LifecyclePhase::Update, Some("req-9"), None, StampOutcome::Skipped);
///
/// assert_eq!(event.phase(), LifecyclePhase::Update);
/// assert_eq!(event.request_id(), Some("req-9"));
/// assert!(event.outcome().is_skipped());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampEvent {
    phase: LifecyclePhase,
    /// Unit-of-work identifier, when the caller supplied one
    request_id: Option<String>,
    principal: Option<ResolvedPrincipal>,
    outcome: StampOutcome,
}

impl StampEvent {
    /// Creates a new stamp event.
    pub fn new(
        phase: LifecyclePhase,
        request_id: Option<impl Into<String>>,
        principal: Option<ResolvedPrincipal>,
        outcome: StampOutcome,
    ) -> Self {
        Self {
            phase,
            request_id: request_id.map(Into::into),
            principal,
            outcome,
        }
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Returns the unit-of-work identifier, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the resolved principal name, if any.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_ref().map(|p| p.name.as_str())
    }

    /// Returns where the principal came from, if one was resolved.
    pub fn source(&self) -> Option<PrincipalSource> {
        self.principal.as_ref().map(|p| p.source)
    }

    /// Returns what the callback did.
    pub fn outcome(&self) -> &StampOutcome {
        &self.outcome
    }
}

impl fmt::Display for StampEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StampEvent[phase={}, outcome={}, request_id={}, principal={}",
            self.phase,
            self.outcome,
            self.request_id.as_deref().unwrap_or("<none>"),
            self.principal().unwrap_or("<none>"),
        )?;

        if let Some(source) = self.source() {
            write!(f, ", source={}", source)?;
        }
        if let StampOutcome::Stamped { at, .. } = &self.outcome {
            write!(f, ", at={}", at.to_rfc3339())?;
        }

        write!(f, "]")
    }
}
