use std::fmt;
use std::sync::Arc;

use crate::{
    audit::{self, LifecyclePhase, StampEvent, StampOutcome, StampTrail},
    clock::{Clock, SystemClock},
    context::UnitOfWork,
    principal::{NoPrincipalProvider, PrincipalProvider},
    resolver::{PrincipalResolver, ResolvedPrincipal},
    traceable::Traceable,
};

/// Writes audit metadata onto records at their two lifecycle moments.
///
/// The persistence layer calls [`on_before_create`](Self::on_before_create)
/// once before a record's first durable write and
/// [`on_before_update`](Self::on_before_update) before every later one.
/// Records under manual traceability control are never touched.
///
/// The stamper holds no per-record state and can be shared between threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use traceable_core::{AuditFields, AuditStamper, NamedPrincipal, PrincipalRegistry, Traceable, UnitOfWork};
///
/// let registry = Arc::new(PrincipalRegistry::new());
/// registry.bind(NamedPrincipal::new("carol"));
///
/// let stamper = AuditStamper::builder().provider(registry).build();
///
/// let mut record = AuditFields::new();
/// let uow = UnitOfWork::new("req-1").with_principal("alice");
/// stamper.on_before_create(Some(&uow), &mut record);
///
/// assert_eq!(record.creation_user(), Some("alice"));
/// assert_eq!(record.creation_date(), record.modification_date());
///
/// stamper.on_before_update(None, &mut record);
/// assert_eq!(record.creation_user(), Some("alice"));
/// assert_eq!(record.modification_user(), Some("carol"));
/// ```
#[derive(Clone)]
pub struct AuditStamper {
    resolver: PrincipalResolver,
    clock: Arc<dyn Clock>,
    trail: Option<Arc<StampTrail>>,
}

impl AuditStamper {
    /// Returns a builder with default settings.
    pub fn builder() -> AuditStamperBuilder {
        AuditStamperBuilder::new()
    }

    /// Returns the resolver this stamper consults.
    pub fn resolver(&self) -> &PrincipalResolver {
        &self.resolver
    }

    /// Marks a record as created.
    ///
    /// Under automatic control, sets both user fields to the resolved actor
    /// (if any) and both date fields to the same instant.
    pub fn on_before_create<R>(&self, uow: Option<&UnitOfWork>, record: &mut R) -> StampOutcome
    where
        R: Traceable + ?Sized,
    {
        if record.is_manual_traceability_control() {
            return self.skip(LifecyclePhase::Create, uow);
        }

        let principal = self.resolver.resolve(uow);
        if let Some(resolved) = &principal {
            record.set_creation_user(resolved.name.clone());
            record.set_modification_user(resolved.name.clone());
        }

        let now = self.clock.now();
        record.set_creation_date(now);
        record.set_modification_date(now);

        self.finish(LifecyclePhase::Create, uow, principal, now)
    }

    /// Marks a record as changed.
    ///
    /// Under automatic control, sets the modification user to the resolved
    /// actor (if any) and always advances the modification date. Creation
    /// fields are left alone.
    pub fn on_before_update<R>(&self, uow: Option<&UnitOfWork>, record: &mut R) -> StampOutcome
    where
        R: Traceable + ?Sized,
    {
        if record.is_manual_traceability_control() {
            return self.skip(LifecyclePhase::Update, uow);
        }

        let principal = self.resolver.resolve(uow);
        if let Some(resolved) = &principal {
            record.set_modification_user(resolved.name.clone());
        }

        let now = self.clock.now();
        record.set_modification_date(now);

        self.finish(LifecyclePhase::Update, uow, principal, now)
    }

    fn skip(&self, phase: LifecyclePhase, uow: Option<&UnitOfWork>) -> StampOutcome {
        tracing::debug!(%phase, "manual traceability control, record left untouched");
        self.publish(StampEvent::new(
            phase,
            uow.map(UnitOfWork::request_id),
            None,
            StampOutcome::Skipped,
        ));
        StampOutcome::Skipped
    }

    fn finish(
        &self,
        phase: LifecyclePhase,
        uow: Option<&UnitOfWork>,
        principal: Option<ResolvedPrincipal>,
        at: chrono::DateTime<chrono::Utc>,
    ) -> StampOutcome {
        let outcome = StampOutcome::Stamped {
            principal: principal.as_ref().map(|p| p.name.clone()),
            at,
        };
        self.publish(StampEvent::new(
            phase,
            uow.map(UnitOfWork::request_id),
            principal,
            outcome.clone(),
        ));
        outcome
    }

    fn publish(&self, event: StampEvent) {
        audit::emit(&event);
        if let Some(trail) = &self.trail {
            trail.record(event);
        }
    }
}

impl Default for AuditStamper {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for AuditStamper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditStamper")
            .field("resolver", &self.resolver)
            .field("clock", &self.clock)
            .field("trail", &self.trail.is_some())
            .finish()
    }
}

/// Builder for [`AuditStamper`].
///
/// Defaults: no principal provider, the system clock, no trail.
pub struct AuditStamperBuilder {
    provider: Arc<dyn PrincipalProvider>,
    clock: Arc<dyn Clock>,
    trail: Option<Arc<StampTrail>>,
}

impl AuditStamperBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            provider: Arc::new(NoPrincipalProvider),
            clock: Arc::new(SystemClock),
            trail: None,
        }
    }

    /// Sets the fallback principal provider.
    pub fn provider(mut self, provider: Arc<dyn PrincipalProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Sets the clock used for audit timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Records every stamp event into `trail` as well as emitting it.
    pub fn trail(mut self, trail: Arc<StampTrail>) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Builds the stamper.
    pub fn build(self) -> AuditStamper {
        AuditStamper {
            resolver: PrincipalResolver::new(self.provider),
            clock: self.clock,
            trail: self.trail,
        }
    }
}

impl Default for AuditStamperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
