//! Records that carry audit metadata.

use chrono::{DateTime, Utc};

/// A persistable record with creation and modification audit fields.
///
/// Record types either implement this trait directly or embed
/// [`AuditFields`] and implement [`HasAuditFields`].
pub trait Traceable {
    /// Identity of the actor that created the record.
    fn creation_user(&self) -> Option<&str>;
    /// Sets the creation actor.
    fn set_creation_user(&mut self, user: String);
    /// Instant the record was created.
    fn creation_date(&self) -> Option<DateTime<Utc>>;
    /// Sets the creation instant.
    fn set_creation_date(&mut self, date: DateTime<Utc>);
    /// Identity of the actor that last modified the record.
    fn modification_user(&self) -> Option<&str>;
    /// Sets the last modifying actor.
    fn set_modification_user(&mut self, user: String);
    /// Instant of the last modification.
    fn modification_date(&self) -> Option<DateTime<Utc>>;
    /// Sets the last modification instant.
    fn set_modification_date(&mut self, date: DateTime<Utc>);
    /// When true the record manages its own audit fields and automatic
    /// stamping leaves it alone.
    fn is_manual_traceability_control(&self) -> bool;
}

/// The four audit fields plus the manual-control flag, ready to embed in a
/// record type.
///
/// # Example
///
/// ```
/// use traceable_core::{AuditFields, Traceable};
///
/// let fields = AuditFields::new();
/// assert!(fields.creation_user().is_none());
/// assert!(!fields.is_manual_traceability_control());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFields {
    creation_user: Option<String>,
    creation_date: Option<DateTime<Utc>>,
    modification_user: Option<String>,
    modification_date: Option<DateTime<Utc>>,
    manual_traceability_control: bool,
}

impl AuditFields {
    /// Creates empty fields under automatic stamping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty fields under manual control.
    pub fn manual() -> Self {
        Self {
            manual_traceability_control: true,
            ..Self::default()
        }
    }

    /// Switches manual traceability control on or off.
    pub fn set_manual_traceability_control(&mut self, manual: bool) {
        self.manual_traceability_control = manual;
    }
}

impl Traceable for AuditFields {
    fn creation_user(&self) -> Option<&str> {
        self.creation_user.as_deref()
    }

    fn set_creation_user(&mut self, user: String) {
        self.creation_user = Some(user);
    }

    fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.creation_date = Some(date);
    }

    fn modification_user(&self) -> Option<&str> {
        self.modification_user.as_deref()
    }

    fn set_modification_user(&mut self, user: String) {
        self.modification_user = Some(user);
    }

    fn modification_date(&self) -> Option<DateTime<Utc>> {
        self.modification_date
    }

    fn set_modification_date(&mut self, date: DateTime<Utc>) {
        self.modification_date = Some(date);
    }

    fn is_manual_traceability_control(&self) -> bool {
        self.manual_traceability_control
    }
}

/// Access to an embedded [`AuditFields`].
///
/// Implementing this gives the record a forwarding [`Traceable`] impl.
///
/// # Example
///
/// ```
/// use traceable_core::{AuditFields, HasAuditFields, Traceable};
///
/// struct Invoice {
///     number: String,
///     audit: AuditFields,
/// }
///
/// impl HasAuditFields for Invoice {
///     fn audit_fields(&self) -> &AuditFields {
///         &self.audit
///     }
///
///     fn audit_fields_mut(&mut self) -> &mut AuditFields {
///         &mut self.audit
///     }
/// }
///
/// let invoice = Invoice { number: "INV-1".into(), audit: AuditFields::new() };
/// assert!(invoice.creation_date().is_none());
/// ```
pub trait HasAuditFields {
    /// Returns the embedded audit fields.
    fn audit_fields(&self) -> &AuditFields;
    /// Returns the embedded audit fields mutably.
    fn audit_fields_mut(&mut self) -> &mut AuditFields;
}

impl<T: HasAuditFields> Traceable for T {
    fn creation_user(&self) -> Option<&str> {
        self.audit_fields().creation_user()
    }

    fn set_creation_user(&mut self, user: String) {
        self.audit_fields_mut().set_creation_user(user);
    }

    fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.audit_fields().creation_date()
    }

    fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.audit_fields_mut().set_creation_date(date);
    }

    fn modification_user(&self) -> Option<&str> {
        self.audit_fields().modification_user()
    }

    fn set_modification_user(&mut self, user: String) {
        self.audit_fields_mut().set_modification_user(user);
    }

    fn modification_date(&self) -> Option<DateTime<Utc>> {
        self.audit_fields().modification_date()
    }

    fn set_modification_date(&mut self, date: DateTime<Utc>) {
        self.audit_fields_mut().set_modification_date(date);
    }

    fn is_manual_traceability_control(&self) -> bool {
        self.audit_fields().is_manual_traceability_control()
    }
}
