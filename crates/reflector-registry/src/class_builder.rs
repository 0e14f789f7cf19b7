//! ClassBuilder for describing a type's members to the registry.
//!
//! ClassBuilder provides a fluent API for registering fields, properties,
//! methods and static members, and for flattening a base type into a
//! derived one.
//!
//! # Example
//!
//! ```ignore
//! registry.register_type::<Player>()
//!     .field("health", Visibility::Private, |p: &Player| &p.health, |p: &mut Player| &mut p.health)?
//!     .property("name", Visibility::Public, |p: &Player| p.name.clone(), |p: &mut Player, v| p.name = v)?
//!     .readonly_property("alive", Visibility::Public, |p: &Player| p.health > 0)?
//!     .method("heal", Visibility::Public, Player::heal)?
//!     .method_mut("damage", Visibility::Public, Player::damage)?
//!     .static_method("max_health", Visibility::Public, || 100_i32)?
//!     .inherit::<Entity>(|p: &Player| &p.entity, |p: &mut Player| &mut p.entity)?
//!     .build()?;
//! ```

use std::sync::Arc;

use reflector_core::{
    DataType, Getter, MemberKind, ReceiverKind, Reflect, RegistrationError, Setter, Shared,
    TypeHash, Visibility,
};

use crate::entries::{BaseEntry, FieldEntry, MemberInfo, MethodEntry, PropertyEntry, TypeEntry, ValueThunks};
use crate::method::{IntoMethod, IntoMethodMut, IntoStaticMethod, MethodThunks};
use crate::{Describe, Lens, TypeRegistry};

/// Builder for registering a type's members.
///
/// # Type Parameters
///
/// - `'r`: Lifetime of the mutable borrow of the registry
/// - `O`: The type being registered (the owner every thunk is typed on)
/// - `S`: The type whose members are currently being described; `O` itself
///   at the top level, a base type inside [`inherit`](Self::inherit)
pub struct ClassBuilder<'r, O, S = O> {
    registry: &'r mut TypeRegistry,
    entry: TypeEntry,
    lens: Lens<O, S>,
    depth: u32,
}

impl<'r, O: Reflect> ClassBuilder<'r, O, O> {
    pub(crate) fn new(registry: &'r mut TypeRegistry) -> Self {
        ClassBuilder {
            registry,
            entry: TypeEntry::new::<O>(),
            lens: Lens::identity(),
            depth: 0,
        }
    }

    /// Finish registration and add the type to the registry.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(self) -> Result<TypeHash, RegistrationError> {
        self.registry.insert(self.entry)
    }
}

impl<'r, O: Reflect, S: Reflect> ClassBuilder<'r, O, S> {
    /// The inheritance depth members are currently registered at.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Register a field through shared and exclusive borrow paths.
    pub fn field<D, G, M>(mut self, name: &str, visibility: Visibility, get: G, get_mut: M) -> Result<Self, RegistrationError>
    where
        D: Reflect + Clone + Send + Sync,
        G: for<'a> Fn(&'a S) -> &'a D + Send + Sync + 'static,
        M: for<'a> Fn(&'a mut S) -> &'a mut D + Send + Sync + 'static,
    {
        let lens = self.lens.then(get, get_mut);
        let getter: Getter<O, D> = {
            let lens = lens.clone();
            Arc::new(move |owner: &O| lens.get(owner).clone())
        };
        let setter: Setter<O, D> = Arc::new(move |owner: &mut O, value: D| *lens.get_mut(owner) = value);

        let info = self.info(name, MemberKind::Field, visibility, false)?;
        self.entry.fields.push(FieldEntry {
            info,
            data_type: DataType::of::<D>(),
            thunks: ValueThunks::new(getter, Some(setter)),
        });
        Ok(self)
    }

    /// Register a static field stored in a shared cell.
    ///
    /// The first cell described for a declaring type and name is kept by
    /// the registry. Describing the member again, as every type inheriting
    /// the declaring type does, reuses that cell and drops `cell`.
    pub fn static_field<D>(mut self, name: &str, visibility: Visibility, cell: Shared<D>) -> Result<Self, RegistrationError>
    where
        D: Reflect + Clone + Send + Sync,
    {
        let info = self.info(name, MemberKind::Field, visibility, true)?;
        let thunks = self.registry.static_thunks::<D>(info.hash, || {
            let getter: Getter<(), D> = {
                let cell = Arc::clone(&cell);
                Arc::new(move |_: &()| cell.read().clone())
            };
            let setter: Setter<(), D> = Arc::new(move |_: &mut (), value: D| *cell.write() = value);
            ValueThunks::new(getter, Some(setter))
        });

        self.entry.fields.push(FieldEntry {
            info,
            data_type: DataType::of::<D>(),
            thunks,
        });
        Ok(self)
    }

    /// Register a read/write property.
    pub fn property<D, G, W>(self, name: &str, visibility: Visibility, get: G, set: W) -> Result<Self, RegistrationError>
    where
        D: Reflect,
        G: Fn(&S) -> D + Send + Sync + 'static,
        W: Fn(&mut S, D) + Send + Sync + 'static,
    {
        let setter: Setter<O, D> = {
            let lens = self.lens.clone();
            Arc::new(move |owner: &mut O, value: D| set(lens.get_mut(owner), value))
        };
        self.instance_property(name, visibility, get, Some(setter))
    }

    /// Register a property without a setter.
    pub fn readonly_property<D, G>(self, name: &str, visibility: Visibility, get: G) -> Result<Self, RegistrationError>
    where
        D: Reflect,
        G: Fn(&S) -> D + Send + Sync + 'static,
    {
        self.instance_property(name, visibility, get, None)
    }

    /// Register a read/write static property.
    pub fn static_property<D, G, W>(self, name: &str, visibility: Visibility, get: G, set: W) -> Result<Self, RegistrationError>
    where
        D: Reflect,
        G: Fn() -> D + Send + Sync + 'static,
        W: Fn(D) + Send + Sync + 'static,
    {
        let setter: Setter<(), D> = Arc::new(move |_: &mut (), value: D| set(value));
        self.static_property_inner(name, visibility, get, Some(setter))
    }

    /// Register a static property without a setter.
    pub fn readonly_static_property<D, G>(self, name: &str, visibility: Visibility, get: G) -> Result<Self, RegistrationError>
    where
        D: Reflect,
        G: Fn() -> D + Send + Sync + 'static,
    {
        self.static_property_inner(name, visibility, get, None)
    }

    /// Register a method taking `&self`.
    pub fn method<F, Args>(self, name: &str, visibility: Visibility, f: F) -> Result<Self, RegistrationError>
    where
        F: IntoMethod<S, Args>,
    {
        let thunks = f.into_method(&self.lens);
        self.push_method(name, visibility, ReceiverKind::Shared, thunks)
    }

    /// Register a method taking `&mut self`.
    pub fn method_mut<F, Args>(self, name: &str, visibility: Visibility, f: F) -> Result<Self, RegistrationError>
    where
        F: IntoMethodMut<S, Args>,
    {
        let thunks = f.into_method_mut(&self.lens);
        self.push_method(name, visibility, ReceiverKind::Exclusive, thunks)
    }

    /// Register a method without a receiver.
    pub fn static_method<F, Args>(self, name: &str, visibility: Visibility, f: F) -> Result<Self, RegistrationError>
    where
        F: IntoStaticMethod<Args>,
    {
        let thunks = f.into_static_method();
        self.push_method(name, visibility, ReceiverKind::Static, thunks)
    }

    /// Flatten every member of `B` into this type, one level deeper.
    ///
    /// `get`/`get_mut` reach the `B` value stored inside `S`.
    pub fn inherit<B: Describe>(
        self,
        get: impl for<'a> Fn(&'a S) -> &'a B + Send + Sync + 'static,
        get_mut: impl for<'a> Fn(&'a mut S) -> &'a mut B + Send + Sync + 'static,
    ) -> Result<Self, RegistrationError> {
        let ClassBuilder {
            registry,
            mut entry,
            lens,
            depth,
        } = self;

        entry.bases.push(BaseEntry {
            type_hash: B::type_hash(),
            name: B::type_name(),
            depth: depth + 1,
        });

        let base = ClassBuilder {
            registry,
            entry,
            lens: lens.then(get, get_mut),
            depth: depth + 1,
        };
        let ClassBuilder { registry, entry, .. } = B::describe(base)?;

        Ok(ClassBuilder {
            registry,
            entry,
            lens,
            depth,
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn instance_property<D, G>(
        mut self,
        name: &str,
        visibility: Visibility,
        get: G,
        setter: Option<Setter<O, D>>,
    ) -> Result<Self, RegistrationError>
    where
        D: Reflect,
        G: Fn(&S) -> D + Send + Sync + 'static,
    {
        let getter: Getter<O, D> = {
            let lens = self.lens.clone();
            Arc::new(move |owner: &O| get(lens.get(owner)))
        };

        let info = self.info(name, MemberKind::Property, visibility, false)?;
        self.entry.properties.push(PropertyEntry {
            info,
            data_type: DataType::of::<D>(),
            thunks: ValueThunks::new(getter, setter),
        });
        Ok(self)
    }

    fn static_property_inner<D, G>(
        mut self,
        name: &str,
        visibility: Visibility,
        get: G,
        setter: Option<Setter<(), D>>,
    ) -> Result<Self, RegistrationError>
    where
        D: Reflect,
        G: Fn() -> D + Send + Sync + 'static,
    {
        let info = self.info(name, MemberKind::Property, visibility, true)?;
        let thunks = self.registry.static_thunks::<D>(info.hash, || {
            let getter: Getter<(), D> = Arc::new(move |_: &()| get());
            ValueThunks::new(getter, setter)
        });

        self.entry.properties.push(PropertyEntry {
            info,
            data_type: DataType::of::<D>(),
            thunks,
        });
        Ok(self)
    }

    fn push_method(
        mut self,
        name: &str,
        visibility: Visibility,
        receiver: ReceiverKind,
        thunks: MethodThunks,
    ) -> Result<Self, RegistrationError> {
        if name.is_empty() {
            return Err(self.empty_name(MemberKind::Method));
        }

        let param_hashes: Vec<TypeHash> = thunks.params.iter().map(|p| p.type_hash).collect();
        let hash = TypeHash::from_method(S::type_hash(), name, &param_hashes);
        // Same-name methods are overloads; only an identical signature at
        // the same depth is a duplicate.
        if self
            .entry
            .methods
            .iter()
            .any(|m| m.info.hash == hash && m.info.depth == self.depth)
        {
            return Err(self.duplicate(MemberKind::Method, name));
        }

        self.entry.methods.push(MethodEntry {
            info: MemberInfo {
                name: name.to_string(),
                hash,
                visibility,
                is_static: receiver.is_static(),
                declaring_type: S::type_hash(),
                declaring_type_name: S::type_name(),
                depth: self.depth,
            },
            params: thunks.params,
            return_type: thunks.return_type,
            receiver,
            exact: thunks.exact,
            primitive: thunks.primitive,
        });
        Ok(self)
    }

    /// Validate a field or property name and build its metadata.
    fn info(&self, name: &str, kind: MemberKind, visibility: Visibility, is_static: bool) -> Result<MemberInfo, RegistrationError> {
        if name.is_empty() {
            return Err(self.empty_name(kind));
        }
        if self
            .entry
            .members_named(kind, name)
            .any(|existing| existing.depth == self.depth)
        {
            return Err(self.duplicate(kind, name));
        }

        let hash = match kind {
            MemberKind::Property => TypeHash::from_property(S::type_hash(), name),
            _ => TypeHash::from_field(S::type_hash(), name),
        };
        Ok(MemberInfo {
            name: name.to_string(),
            hash,
            visibility,
            is_static,
            declaring_type: S::type_hash(),
            declaring_type_name: S::type_name(),
            depth: self.depth,
        })
    }

    fn empty_name(&self, kind: MemberKind) -> RegistrationError {
        RegistrationError::EmptyName {
            type_name: self.entry.name.to_string(),
            kind,
        }
    }

    fn duplicate(&self, kind: MemberKind, name: &str) -> RegistrationError {
        RegistrationError::DuplicateMember {
            type_name: self.entry.name.to_string(),
            kind,
            member: name.to_string(),
        }
    }
}
