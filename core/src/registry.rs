//! Per-engine table of trusted callables.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::stdlib;
use crate::values::{Callable, FunctionId};

/// The set of callable identities an engine's expressions may invoke.
///
/// Identities are partitioned into built-ins (seeded from the standard
/// library) and host registrations. Trust is append-only: there is no
/// removal, and rebinding a name leaves the previously bound identity
/// trusted.
#[derive(Debug, Clone, Default)]
pub struct TrustedRegistry {
    builtins: HashSet<FunctionId>,
    registered: HashSet<FunctionId>,
    bindings: HashMap<String, Callable>,
}

impl TrustedRegistry {
    /// An empty registry. Nothing is callable, not even the math library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with every standard library function.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for callable in stdlib::builtins() {
            registry.builtins.insert(callable.id());
            registry
                .bindings
                .insert(callable.name().to_string(), callable.clone());
        }
        registry
    }

    /// Trust `callable` and bind it under `name`.
    ///
    /// Returns the callable previously bound to `name`, which stays trusted.
    pub fn register(&mut self, name: impl Into<String>, callable: Callable) -> Option<Callable> {
        let name = name.into();
        debug!(name = %name, id = %callable.id(), "registering function");
        self.registered.insert(callable.id());
        self.bindings.insert(name, callable)
    }

    /// Whether the identity may be invoked.
    pub fn contains(&self, id: FunctionId) -> bool {
        self.builtins.contains(&id) || self.registered.contains(&id)
    }

    pub fn is_builtin(&self, id: FunctionId) -> bool {
        self.builtins.contains(&id)
    }

    /// Resolve a bound name.
    pub fn lookup(&self, name: &str) -> Option<&Callable> {
        self.bindings.get(name)
    }

    /// Number of trusted identities.
    pub fn len(&self) -> usize {
        self.builtins.union(&self.registered).count()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty() && self.registered.is_empty()
    }
}
