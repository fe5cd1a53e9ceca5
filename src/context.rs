/// The unit of work a write belongs to.
///
/// A `UnitOfWork` is scoped to a single request or job and carries the
/// principal that unit of work runs as, if one is known. It is passed
/// explicitly into the stamper's lifecycle callbacks; nothing in this crate
/// reads it from global or thread-local state.
///
/// # Examples
///
/// ```
/// use traceable_core::UnitOfWork;
///
/// let uow = UnitOfWork::new("req-123").with_principal("alice");
///
/// assert_eq!(uow.request_id(), "req-123");
/// assert_eq!(uow.principal(), Some("alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOfWork {
    request_id: String,
    principal: Option<String>,
}

impl UnitOfWork {
    /// Creates a unit of work with no principal attached.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            principal: None,
        }
    }

    /// Attaches the principal this unit of work runs as.
    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    /// Returns the request or job identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the principal, if this unit of work carries one.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }
}
