//! Automatic audit-trail stamping for persisted records.
//!
//! A persistence layer calls the [`AuditStamper`] right before a record is
//! first written and right before every later write. The stamper fills in who
//! made the change and when, unless the record has opted into manual
//! traceability control.
//!
//! # Core Types
//!
//! - [`Traceable`]: Capability of a record that carries audit fields
//! - [`AuditFields`]: Embeddable implementation of the audit fields
//! - [`UnitOfWork`]: Explicit per-request context carrying the acting principal
//! - [`PrincipalProvider`]: Injected fallback source of the current principal
//! - [`PrincipalResolver`]: Chain that picks the actor from the sources above
//! - [`AuditStamper`]: The lifecycle callbacks themselves
//!
//! # Examples
//!
//! ```
//! use traceable_core::{AuditFields, AuditStamper, Traceable, UnitOfWork};
//!
//! let stamper = AuditStamper::default();
//! let uow = UnitOfWork::new("req-123").with_principal("alice");
//!
//! let mut record = AuditFields::new();
//! stamper.on_before_create(Some(&uow), &mut record);
//!
//! assert_eq!(record.creation_user(), Some("alice"));
//! assert_eq!(record.modification_user(), Some("alice"));
//! assert_eq!(record.creation_date(), record.modification_date());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod clock;
mod context;
mod error;
mod principal;
mod resolver;
mod stamper;
mod traceable;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::UnitOfWork;
pub use error::{LookupError, LookupErrorKind};
pub use principal::{
    NamedPrincipal, NoPrincipalProvider, PrincipalHandle, PrincipalProvider, PrincipalRegistry,
    Resolution, SecurityPrincipal,
};
pub use resolver::{PrincipalResolver, PrincipalSource, ResolvedPrincipal};
pub use stamper::{AuditStamper, AuditStamperBuilder};
pub use traceable::{AuditFields, HasAuditFields, Traceable};
