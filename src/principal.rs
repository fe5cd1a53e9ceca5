//! Security principal capability and its providers.
//!
//! A [`PrincipalProvider`] is the injected fallback the resolver consults when
//! the unit of work carries no principal. Providers report how many
//! candidates they could resolve through [`Resolution`]; only a single
//! candidate counts as an identity.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::LookupError;

/// The identity of whoever is performing the current action.
pub trait SecurityPrincipal: Send + Sync {
    /// Returns the principal's name (typically a username).
    fn name(&self) -> &str;
}

/// A principal backed by a plain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPrincipal {
    name: String,
}

impl NamedPrincipal {
    /// Creates a principal with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SecurityPrincipal for NamedPrincipal {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Result of looking up a capability that may have zero, one or many
/// bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Exactly one candidate was bound
    Resolved(T),
    /// Nothing was bound
    Unbound,
    /// More than one candidate was bound
    Ambiguous {
        /// How many candidates were found
        candidates: usize,
    },
}

impl<T> Resolution<T> {
    /// Returns the resolved value, discarding `Unbound` and `Ambiguous`.
    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unbound | Resolution::Ambiguous { .. } => None,
        }
    }

    /// Returns true if exactly one candidate was found.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Shared handle to a resolved principal.
pub type PrincipalHandle = Arc<dyn SecurityPrincipal>;

/// Supplies the current security principal from outside the unit of work.
///
/// Implementations must not block on the calling thread and must report
/// failures as [`LookupError`] rather than panicking.
pub trait PrincipalProvider: Send + Sync {
    /// Looks up the current security principal.
    ///
    /// # Errors
    ///
    /// Returns `Err(LookupError)` if the provider's backing source cannot be
    /// consulted. Finding zero or several principals is not an error.
    fn resolve(&self) -> Result<Resolution<PrincipalHandle>, LookupError>;
}

impl<P: PrincipalProvider + ?Sized> PrincipalProvider for Arc<P> {
    fn resolve(&self) -> Result<Resolution<PrincipalHandle>, LookupError> {
        (**self).resolve()
    }
}

/// A provider that never has a principal.
///
/// Suitable for deployments without a security context, such as batch jobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrincipalProvider;

impl PrincipalProvider for NoPrincipalProvider {
    fn resolve(&self) -> Result<Resolution<PrincipalHandle>, LookupError> {
        Ok(Resolution::Unbound)
    }
}

/// In-process registry of principal bindings.
///
/// Resolves to the bound principal when exactly one is registered, to
/// [`Resolution::Unbound`] when none is, and to [`Resolution::Ambiguous`]
/// otherwise.
///
/// # Example
///
/// ```
/// use traceable_core::{NamedPrincipal, PrincipalProvider, PrincipalRegistry};
///
/// let registry = PrincipalRegistry::new();
/// registry.bind(NamedPrincipal::new("carol"));
///
/// let principal = registry.resolve().unwrap().resolved().unwrap();
/// assert_eq!(principal.name(), "carol");
/// ```
#[derive(Default)]
pub struct PrincipalRegistry {
    bindings: RwLock<Vec<PrincipalHandle>>,
}

impl PrincipalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a principal binding.
    ///
    /// A poisoned lock is recovered; binding is a plain push that cannot
    /// leave the list half-written.
    pub fn bind(&self, principal: impl SecurityPrincipal + 'static) {
        let mut bindings = self
            .bindings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        bindings.push(Arc::new(principal));
    }

    /// Removes every binding.
    pub fn clear(&self) {
        self.bindings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings
            .read()
            .map(|bindings| bindings.len())
            .unwrap_or(0)
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PrincipalProvider for PrincipalRegistry {
    fn resolve(&self) -> Result<Resolution<PrincipalHandle>, LookupError> {
        let bindings = self
            .bindings
            .read()
            .map_err(|_| LookupError::unavailable("principal registry lock poisoned"))?;

        Ok(match bindings.as_slice() {
            [] => Resolution::Unbound,
            [only] => Resolution::Resolved(Arc::clone(only)),
            many => Resolution::Ambiguous {
                candidates: many.len(),
            },
        })
    }
}

impl fmt::Debug for PrincipalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalRegistry")
            .field("bindings", &self.len())
            .finish()
    }
}
