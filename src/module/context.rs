//! Isolated context and observation handle
//!
//! A context is a disposable loading scope created fresh for one invocation.
//! The loaded module, every type derived from it, and the context-local
//! boundary codec are all rooted in the context's single owning reference.
//! Dropping that reference is the teardown; the `ObservationHandle` is a weak
//! probe that can tell whether teardown actually reclaimed everything without
//! ever extending the context's lifetime.

use crate::harness::error::{HarnessError, HarnessResult};
use crate::module::codec::BoundaryCodec;
use crate::module::image::MethodDecl;
use crate::module::value::TypeIdentity;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

// Host side is 0; contexts start at 1
static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct ContextInner {
    id: u64,
    module: OnceLock<LoadedModule>,
    codec: OnceLock<BoundaryCodec>,
}

/// A module instantiated inside one context
pub(crate) struct LoadedModule {
    pub name: String,
    pub types: Vec<LoadedType>,
}

/// A type instantiated inside one context; its identity carries the context id
#[derive(Debug)]
pub(crate) struct LoadedType {
    pub identity: TypeIdentity,
    pub methods: Vec<MethodDecl>,
}

/// Disposable loading scope owning one loaded module for one invocation
pub struct IsolatedContext {
    inner: Arc<ContextInner>,
}

impl IsolatedContext {
    pub fn new() -> Self {
        let id = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: Arc::new(ContextInner {
                id,
                module: OnceLock::new(),
                codec: OnceLock::new(),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Create the weak probe used to verify reclamation after teardown
    pub fn observe(&self) -> ObservationHandle {
        ObservationHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Install the instantiated module. A context loads exactly one module;
    /// a second install keeps the first and is reported to the log.
    pub(crate) fn install_module(&self, module: LoadedModule) {
        if self.inner.module.set(module).is_err() {
            log::warn!("context {} already has a module installed", self.inner.id);
        }
    }

    pub(crate) fn module_name(&self) -> Option<&str> {
        self.inner.module.get().map(|m| m.name.as_str())
    }

    /// Look up a loaded type by qualified name
    pub(crate) fn find_type(&self, qualified_name: &str) -> HarnessResult<&LoadedType> {
        self.inner
            .module
            .get()
            .and_then(|module| {
                module
                    .types
                    .iter()
                    .find(|ty| ty.identity.qualified_name == qualified_name)
            })
            .ok_or_else(|| HarnessError::TypeNotFound {
                type_name: qualified_name.to_string(),
            })
    }

    /// The serialization facility instantiated inside this context. Created on
    /// first use and owned by the context: a marshaled invocation always runs
    /// with two codec instances, one per loading context, with distinct
    /// identity stamps. Sharing the host codec here would defeat the check.
    pub(crate) fn boundary_codec(&self) -> &BoundaryCodec {
        self.inner
            .codec
            .get_or_init(|| BoundaryCodec::new(self.inner.id))
    }

    /// Scope view handed to target method bodies during invocation
    pub(crate) fn scope(&self) -> InvocationScope<'_> {
        InvocationScope { inner: &self.inner }
    }

    /// Explicit teardown point: releases the owning reference.
    pub fn destroy(self) {
        drop(self);
    }
}

impl Default for IsolatedContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IsolatedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsolatedContext")
            .field("id", &self.inner.id)
            .field("module", &self.module_name())
            .finish()
    }
}

/// Weak, non-owning probe of a context's reachability
pub struct ObservationHandle {
    inner: Weak<ContextInner>,
}

impl ObservationHandle {
    /// True while anything still holds a strong reference to the context
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Enumerate what is still reachable from the context. Upgrades the weak
    /// reference, so only call this after the reclamation verdict is in.
    pub fn snapshot(&self) -> Option<ContextSnapshot> {
        let inner = self.inner.upgrade()?;
        let (module, types) = match inner.module.get() {
            Some(module) => (
                Some(module.name.clone()),
                module
                    .types
                    .iter()
                    .map(|ty| ty.identity.qualified_name.clone())
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        Some(ContextSnapshot {
            context_id: inner.id,
            module,
            types,
        })
    }
}

impl fmt::Debug for ObservationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// What remained loaded in a context, for the post-failure diagnostic dump
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    pub context_id: u64,
    pub module: Option<String>,
    pub types: Vec<String>,
}

/// View of the owning context handed to target method bodies
pub struct InvocationScope<'a> {
    inner: &'a Arc<ContextInner>,
}

impl InvocationScope<'_> {
    pub fn context_id(&self) -> u64 {
        self.inner.id
    }

    /// Take a strong reference to the context. A body stashing the retainer
    /// beyond the invocation keeps the context reachable and will make
    /// reclamation verification fail - which is exactly what real plugins do
    /// when they park context-rooted state in a global.
    pub fn retain(&self) -> ContextRetainer {
        ContextRetainer {
            inner: Arc::clone(self.inner),
        }
    }
}

impl fmt::Debug for InvocationScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationScope")
            .field("context_id", &self.inner.id)
            .finish()
    }
}

/// Strong reference to a context taken by a target method body
pub struct ContextRetainer {
    inner: Arc<ContextInner>,
}

impl ContextRetainer {
    pub fn context_id(&self) -> u64 {
        self.inner.id
    }
}

impl fmt::Debug for ContextRetainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRetainer")
            .field("context_id", &self.inner.id)
            .finish()
    }
}
