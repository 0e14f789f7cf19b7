//! TypeRegistry - the store of described types.
//!
//! The registry is filled once through [`ClassBuilder`] and then only read.
//! Lookups by hash are a single map lookup; lookups by Rust type go through
//! a `TypeId` index.

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use tracing::debug;

use reflector_core::{Getter, MemberKind, MemberScope, Reflect, ReflectError, RegistrationError, TypeHash};

use crate::entries::{TypeEntry, ValueThunks};
use crate::locator::{self, MemberDescriptor};
use crate::{ClassBuilder, Describe};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// All registered types, keyed by [`TypeHash`].
#[derive(Debug)]
pub struct TypeRegistry {
    id: u64,
    types: FxHashMap<TypeHash, TypeEntry>,
    by_type_id: FxHashMap<TypeId, TypeHash>,
    /// Static member thunks by member hash, shared by every type that
    /// declares or inherits the member.
    statics: FxHashMap<TypeHash, ValueThunks>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            types: FxHashMap::default(),
            by_type_id: FxHashMap::default(),
            statics: FxHashMap::default(),
        }
    }

    /// Identity of this registry, unique for the life of the process.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Start describing `T` by hand.
    pub fn register_type<T: Reflect>(&mut self) -> ClassBuilder<'_, T, T> {
        ClassBuilder::new(self)
    }

    /// Register `T` from its own description.
    pub fn register<T: Describe>(&mut self) -> Result<TypeHash, RegistrationError> {
        T::describe(self.register_type::<T>())?.build()
    }

    pub(crate) fn insert(&mut self, entry: TypeEntry) -> Result<TypeHash, RegistrationError> {
        if self.types.contains_key(&entry.type_hash) || self.by_type_id.contains_key(&entry.type_id) {
            return Err(RegistrationError::DuplicateType(entry.name.to_string()));
        }

        debug!(
            type_name = entry.name,
            fields = entry.fields.len(),
            properties = entry.properties.len(),
            methods = entry.methods.len(),
            bases = entry.bases.len(),
            "registered type"
        );

        let hash = entry.type_hash;
        self.by_type_id.insert(entry.type_id, hash);
        self.types.insert(hash, entry);
        Ok(hash)
    }

    /// The thunks of the static member `hash`, built by `make` the first
    /// time the member is described and reused after that.
    pub(crate) fn static_thunks<D: 'static>(
        &mut self,
        hash: TypeHash,
        make: impl FnOnce() -> ValueThunks,
    ) -> ValueThunks {
        match self.statics.get(&hash) {
            Some(thunks) if thunks.getter.holds::<Getter<(), D>>() => thunks.clone(),
            _ => {
                let thunks = make();
                self.statics.insert(hash, thunks.clone());
                thunks
            }
        }
    }

    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TypeEntry> {
        self.get(TypeHash::from_name(name))
    }

    /// The entry registered for the Rust type `T`.
    pub fn entry_of<T: 'static>(&self) -> Option<&TypeEntry> {
        self.by_type_id
            .get(&TypeId::of::<T>())
            .and_then(|hash| self.types.get(hash))
    }

    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// Names of the base types of `hash`, in registration order.
    pub fn base_class_chain(&self, hash: TypeHash) -> Vec<&'static str> {
        self.get(hash)
            .map(|entry| entry.bases.iter().map(|b| b.name).collect())
            .unwrap_or_default()
    }

    /// Resolve a member by name. See [`locator::locate`].
    pub fn locate(
        &self,
        owner: TypeHash,
        kind: MemberKind,
        name: &str,
        scope: MemberScope,
    ) -> Result<MemberDescriptor<'_>, ReflectError> {
        locator::locate(self, owner, kind, name, scope)
    }
}
