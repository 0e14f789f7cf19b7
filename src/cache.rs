//! Opt-in accessor cache.
//!
//! The facade itself keeps no state; every call compiles afresh. A caller
//! that asks for the same accessor repeatedly can own an [`AccessorCache`]
//! and go through the `*_cached` calls instead. Only compiled accessors
//! are stored: absent members and errors are recomputed on every call.

use std::any::{Any, TypeId};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use reflector_compiler::ConversionPolicy;
use reflector_core::{MemberKind, MemberScope, Reflect, ReflectError};
use crate::{FieldAccessor, PropertyAccessor, Reflector};

/// Everything but the member name that identifies a compiled accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot {
    registry: u64,
    policy: ConversionPolicy,
    owner: TypeId,
    value: TypeId,
    kind: MemberKind,
    scope: MemberScope,
}

impl Slot {
    fn of<O: 'static, V: 'static>(reflector: &Reflector<'_>, kind: MemberKind, scope: MemberScope) -> Self {
        Self {
            registry: reflector.registry().id(),
            policy: reflector.options().policy,
            owner: TypeId::of::<O>(),
            value: TypeId::of::<V>(),
            kind,
            scope,
        }
    }
}

type Entries = FxHashMap<Slot, FxHashMap<Box<str>, Arc<dyn Any + Send + Sync>>>;

/// Compiled accessors keyed by owner, value type, kind, name and scope.
///
/// Safe to share between threads; lookups take a read lock.
#[derive(Default)]
pub struct AccessorCache {
    entries: RwLock<Entries>,
}

impl AccessorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached accessors.
    pub fn len(&self) -> usize {
        self.entries.read().values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn lookup<T: Any + Clone>(&self, slot: &Slot, name: &str) -> Option<T> {
        self.entries.read().get(slot)?.get(name)?.downcast_ref::<T>().cloned()
    }

    fn get_or_compile<T, F>(&self, slot: Slot, name: &str, compile: F) -> Result<Option<T>, ReflectError>
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce() -> Result<Option<T>, ReflectError>,
    {
        if let Some(hit) = self.lookup::<T>(&slot, name) {
            trace!(name, kind = %slot.kind, "accessor cache hit");
            return Ok(Some(hit));
        }

        let Some(compiled) = compile()? else {
            return Ok(None);
        };

        trace!(name, kind = %slot.kind, "accessor cache miss");
        let mut entries = self.entries.write();
        // A concurrent miss may have inserted first; keep the first one.
        let stored = entries
            .entry(slot)
            .or_default()
            .entry(Box::from(name))
            .or_insert_with(|| Arc::new(compiled.clone()));
        Ok(Some(stored.downcast_ref::<T>().cloned().unwrap_or(compiled)))
    }
}

impl std::fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessorCache").field("len", &self.len()).finish()
    }
}

impl Reflector<'_> {
    /// [`get_field_accessor`](Reflector::get_field_accessor) through `cache`.
    pub fn get_field_accessor_cached<O: Reflect, V: Reflect>(
        &self,
        cache: &AccessorCache,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<FieldAccessor<O, V>>, ReflectError> {
        let slot = Slot::of::<O, V>(self, MemberKind::Field, scope);
        cache.get_or_compile(slot, name, || self.get_field_accessor::<O, V>(name, scope))
    }

    /// [`get_property_accessor`](Reflector::get_property_accessor) through `cache`.
    pub fn get_property_accessor_cached<O: Reflect, V: Reflect>(
        &self,
        cache: &AccessorCache,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<PropertyAccessor<O, V>>, ReflectError> {
        let slot = Slot::of::<O, V>(self, MemberKind::Property, scope);
        cache.get_or_compile(slot, name, || self.get_property_accessor::<O, V>(name, scope))
    }
}
