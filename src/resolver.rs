//! Principal resolution chain.
//!
//! The resolver asks each identity source in priority order and stops at the
//! first one that answers:
//!
//! ```text
//! UnitOfWork::principal --none--> PrincipalProvider::resolve --none--> None
//! ```
//!
//! Provider failures and ambiguous bindings are absorbed here and surface
//! only as "no principal".

use std::fmt;
use std::sync::Arc;

use crate::context::UnitOfWork;
use crate::principal::{NoPrincipalProvider, PrincipalProvider, Resolution};

/// Where a resolved principal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalSource {
    /// The unit of work supplied by the caller
    UnitOfWork,
    /// The injected principal provider
    Provider,
}

impl fmt::Display for PrincipalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrincipalSource::UnitOfWork => write!(f, "unit_of_work"),
            PrincipalSource::Provider => write!(f, "provider"),
        }
    }
}

/// A principal name together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrincipal {
    /// Principal name
    pub name: String,
    /// Source that supplied the name
    pub source: PrincipalSource,
}

/// Determines the current actor for a write.
#[derive(Clone)]
pub struct PrincipalResolver {
    provider: Arc<dyn PrincipalProvider>,
}

impl PrincipalResolver {
    /// Creates a resolver that falls back to `provider` when the unit of
    /// work has no principal.
    pub fn new(provider: Arc<dyn PrincipalProvider>) -> Self {
        Self { provider }
    }

    /// Resolves the current principal.
    ///
    /// Never fails. Returns `None` if neither source can name an actor.
    pub fn resolve(&self, uow: Option<&UnitOfWork>) -> Option<ResolvedPrincipal> {
        if let Some(name) = uow.and_then(UnitOfWork::principal) {
            tracing::debug!(principal = %name, source = %PrincipalSource::UnitOfWork, "principal resolved");
            return Some(ResolvedPrincipal {
                name: name.to_owned(),
                source: PrincipalSource::UnitOfWork,
            });
        }

        match self.provider.resolve() {
            Ok(Resolution::Resolved(principal)) => {
                tracing::debug!(principal = %principal.name(), source = %PrincipalSource::Provider, "principal resolved");
                Some(ResolvedPrincipal {
                    name: principal.name().to_owned(),
                    source: PrincipalSource::Provider,
                })
            }
            Ok(Resolution::Unbound) => None,
            Ok(Resolution::Ambiguous { candidates }) => {
                tracing::debug!(candidates, "principal provider ambiguous, skipping");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "principal provider failed, treating as absent");
                None
            }
        }
    }

    /// Resolves the current principal's name only.
    pub fn resolve_name(&self, uow: Option<&UnitOfWork>) -> Option<String> {
        self.resolve(uow).map(|resolved| resolved.name)
    }
}

impl Default for PrincipalResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoPrincipalProvider))
    }
}

impl fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::principal::{NamedPrincipal, PrincipalHandle, PrincipalRegistry};

    struct FailingProvider;

    impl PrincipalProvider for FailingProvider {
        fn resolve(&self) -> Result<Resolution<PrincipalHandle>, LookupError> {
            Err(LookupError::failed("security context not active"))
        }
    }

    fn registry_with(names: &[&str]) -> Arc<PrincipalRegistry> {
        let registry = Arc::new(PrincipalRegistry::new());
        for name in names {
            registry.bind(NamedPrincipal::new(*name));
        }
        registry
    }

    #[test]
    fn unit_of_work_principal_wins_over_provider() {
        let resolver = PrincipalResolver::new(registry_with(&["carol"]));
        let uow = UnitOfWork::new("req-1").with_principal("alice");

        let resolved = resolver.resolve(Some(&uow)).unwrap();
        assert_eq!(resolved.name, "alice");
        assert_eq!(resolved.source, PrincipalSource::UnitOfWork);
    }

    #[test]
    fn falls_back_to_provider_without_unit_of_work() {
        let resolver = PrincipalResolver::new(registry_with(&["carol"]));

        let resolved = resolver.resolve(None).unwrap();
        assert_eq!(resolved.name, "carol");
        assert_eq!(resolved.source, PrincipalSource::Provider);
    }

    #[test]
    fn falls_back_to_provider_when_unit_of_work_has_no_principal() {
        let resolver = PrincipalResolver::new(registry_with(&["carol"]));
        let uow = UnitOfWork::new("job-1");

        assert_eq!(resolver.resolve_name(Some(&uow)).as_deref(), Some("carol"));
    }

    #[test]
    fn ambiguous_provider_is_absent() {
        let resolver = PrincipalResolver::new(registry_with(&["carol", "dave"]));
        assert!(resolver.resolve(None).is_none());
    }

    #[test]
    fn unbound_provider_is_absent() {
        let resolver = PrincipalResolver::new(registry_with(&[]));
        assert!(resolver.resolve(None).is_none());
    }

    #[test]
    fn failing_provider_is_absent() {
        let resolver = PrincipalResolver::new(Arc::new(FailingProvider));
        assert!(resolver.resolve(None).is_none());
    }

    #[test]
    fn failing_provider_not_consulted_when_unit_of_work_has_principal() {
        let resolver = PrincipalResolver::new(Arc::new(FailingProvider));
        let uow = UnitOfWork::new("req-2").with_principal("alice");

        assert_eq!(resolver.resolve_name(Some(&uow)).as_deref(), Some("alice"));
    }

    #[test]
    fn default_resolver_has_no_fallback() {
        assert!(PrincipalResolver::default().resolve(None).is_none());
    }

    #[test]
    fn principal_source_display() {
        assert_eq!(PrincipalSource::UnitOfWork.to_string(), "unit_of_work");
        assert_eq!(PrincipalSource::Provider.to_string(), "provider");
    }
}
