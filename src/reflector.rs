//! The reflector facade.
//!
//! Each call locates a member by name once, compiles it for the requested
//! types and binding, and hands back an accessor or delegate. An absent
//! member is `Ok(None)`; a member that exists but cannot serve the request
//! is an error.

use std::sync::Arc;

use tracing::trace;

use reflector_compiler::{
    CompileOptions, Signature, bind_getter, bind_setter, bind_static_getter, bind_static_setter, compile_getter,
    compile_invoker, compile_setter,
};
use reflector_core::{
    Binding, BindingMode, BoundGetter, BoundSetter, MemberKind, MemberScope, Reflect, ReflectError,
};
use reflector_registry::{MemberDescriptor, TypeRegistry};

use crate::accessor::{
    BoundFieldAccessor, BoundPropertyAccessor, FieldAccessor, Instance, PropertyAccessor, erase,
};

/// Name-based access to the members of registered types.
///
/// ```
/// use reflector::prelude::*;
///
/// #[derive(Reflect)]
/// struct Account {
///     balance: i32,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Account>().unwrap();
///
/// let reflector = Reflector::new(&registry);
/// let balance = reflector
///     .get_field_accessor::<Account, i64>("balance", MemberScope::DEFAULT)
///     .unwrap()
///     .unwrap();
///
/// let mut account = Account { balance: 10 };
/// balance.set(&mut account, 25);
/// assert_eq!(balance.get(&account), 25);
/// assert_eq!(account.balance, 25);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reflector<'r> {
    registry: &'r TypeRegistry,
    options: CompileOptions,
}

impl<'r> Reflector<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_options(registry, CompileOptions::default())
    }

    pub fn with_options(registry: &'r TypeRegistry, options: CompileOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Locate a member of `O`, reporting `NotFound` as `None`.
    pub fn locate<O: Reflect>(
        &self,
        kind: MemberKind,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<MemberDescriptor<'r>>, ReflectError> {
        // By `TypeId`: a type that only shares a registered name is absent.
        let Some(entry) = self.registry.entry_of::<O>() else {
            trace!(owner = O::type_name(), %kind, name, "owner not registered");
            return Ok(None);
        };
        match self.registry.locate(entry.type_hash, kind, name, scope) {
            Ok(descriptor) => Ok(Some(descriptor)),
            Err(err) if err.is_not_found() => {
                trace!(owner = O::type_name(), %kind, name, "member absent");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// An accessor taking the instance on every call.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get_field_accessor<O: Reflect, V: Reflect>(
        &self,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<FieldAccessor<O, V>>, ReflectError> {
        let Some(descriptor) = self.locate::<O>(MemberKind::Field, name, scope)? else {
            return Ok(None);
        };

        let get = compile_getter::<O, V>(&descriptor, BindingMode::Unbound, &self.options)?;
        let set = compile_setter::<O, V>(&descriptor, BindingMode::Unbound, &self.options)?
            .ok_or_else(|| read_only(&descriptor))?;
        Ok(Some(FieldAccessor::new(descriptor.name(), get, set)))
    }

    /// An accessor over a captured instance (`Binding::Bound`) or a static
    /// field (`Binding::Static`).
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get_bound_field_accessor<O, V>(
        &self,
        binding: &Binding<O>,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<BoundFieldAccessor<V>>, ReflectError>
    where
        O: Reflect + Send + Sync,
        V: Reflect,
    {
        let Some(descriptor) = self.locate::<O>(MemberKind::Field, name, scope)? else {
            return Ok(None);
        };

        let (get, set, instance) = self.compile_bound::<O, V>(&descriptor, binding)?;
        let set = set.ok_or_else(|| read_only(&descriptor))?;
        Ok(Some(BoundFieldAccessor::new(descriptor.name(), get, set, instance)))
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// A property accessor taking the instance on every call.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get_property_accessor<O: Reflect, V: Reflect>(
        &self,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<PropertyAccessor<O, V>>, ReflectError> {
        let Some(descriptor) = self.locate::<O>(MemberKind::Property, name, scope)? else {
            return Ok(None);
        };

        let get = compile_getter::<O, V>(&descriptor, BindingMode::Unbound, &self.options)?;
        let set = compile_setter::<O, V>(&descriptor, BindingMode::Unbound, &self.options)?;
        Ok(Some(PropertyAccessor::new(descriptor.name(), get, set)))
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get_bound_property_accessor<O, V>(
        &self,
        binding: &Binding<O>,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<BoundPropertyAccessor<V>>, ReflectError>
    where
        O: Reflect + Send + Sync,
        V: Reflect,
    {
        let Some(descriptor) = self.locate::<O>(MemberKind::Property, name, scope)? else {
            return Ok(None);
        };

        let (get, set, instance) = self.compile_bound::<O, V>(&descriptor, binding)?;
        Ok(Some(BoundPropertyAccessor::new(descriptor.name(), get, set, instance)))
    }

    // ========================================================================
    // Methods
    // ========================================================================

    /// A delegate of signature `S` for a method of `O`.
    ///
    /// Instance methods need `Binding::Bound`; static methods accept
    /// `Binding::Static` or `Binding::Unbound`.
    ///
    /// ```
    /// use reflector::prelude::*;
    ///
    /// struct Adder;
    ///
    /// impl Reflect for Adder {}
    ///
    /// impl Describe for Adder {
    ///     fn describe<'r, O: Reflect>(
    ///         class: ClassBuilder<'r, O, Self>,
    ///     ) -> Result<ClassBuilder<'r, O, Self>, RegistrationError> {
    ///         class.method("sum", Visibility::Public, |_: &Adder, a: i32, b: i32| a + b)
    ///     }
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register::<Adder>().unwrap();
    ///
    /// type Sum = dyn Fn(i32, i32) -> i32 + Send + Sync;
    /// let sum = Reflector::new(&registry)
    ///     .get_method_delegate::<Sum, Adder>(&Binding::bind(Adder), "sum", MemberScope::DEFAULT)
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(sum(-2, 7), 5);
    /// ```
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn get_method_delegate<S, O>(
        &self,
        binding: &Binding<O>,
        name: &str,
        scope: MemberScope,
    ) -> Result<Option<Arc<S>>, ReflectError>
    where
        S: Signature + ?Sized,
        O: Reflect + Send + Sync,
    {
        let Some(descriptor) = self.locate::<O>(MemberKind::Method, name, scope)? else {
            return Ok(None);
        };

        compile_invoker::<S, O>(&descriptor, binding, &self.options).map(Some)
    }

    /// Static bindings compile against the unit owner; bound ones capture
    /// the instance.
    #[allow(clippy::type_complexity)]
    fn compile_bound<O, V>(
        &self,
        descriptor: &MemberDescriptor<'_>,
        binding: &Binding<O>,
    ) -> Result<(BoundGetter<V>, Option<BoundSetter<V>>, Instance), ReflectError>
    where
        O: Reflect + Send + Sync,
        V: Reflect,
    {
        match binding {
            Binding::Bound(instance) => {
                let get = compile_getter::<O, V>(descriptor, BindingMode::Bound, &self.options)?;
                let set = compile_setter::<O, V>(descriptor, BindingMode::Bound, &self.options)?;
                Ok((
                    bind_getter(get, Arc::clone(instance)),
                    set.map(|set| bind_setter(set, Arc::clone(instance))),
                    Some(erase(instance)),
                ))
            }
            Binding::Static => {
                let get = compile_getter::<(), V>(descriptor, BindingMode::Static, &self.options)?;
                let set = compile_setter::<(), V>(descriptor, BindingMode::Static, &self.options)?;
                Ok((bind_static_getter(get), set.map(bind_static_setter), None))
            }
            Binding::Unbound => Err(ReflectError::InvalidBinding {
                member: descriptor.qualified_name(),
                reason: "bound accessor requires an instance or a static member",
            }),
        }
    }
}

fn read_only(descriptor: &MemberDescriptor<'_>) -> ReflectError {
    ReflectError::ReadOnly {
        member: descriptor.qualified_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_core::{RegistrationError, Visibility, shared};
    use reflector_registry::{ClassBuilder, Describe};

    struct Meter {
        reading: u16,
        label: String,
    }

    impl Reflect for Meter {
        fn type_name() -> &'static str {
            "Meter"
        }
    }

    impl Describe for Meter {
        fn describe<'r, O: Reflect>(class: ClassBuilder<'r, O, Self>) -> Result<ClassBuilder<'r, O, Self>, RegistrationError> {
            class
                .field("reading", Visibility::Private, |m: &Meter| &m.reading, |m: &mut Meter| &mut m.reading)?
                .readonly_property("label", Visibility::Public, |m: &Meter| m.label.clone())?
                .method("doubled", Visibility::Public, |m: &Meter| u32::from(m.reading) * 2)
        }
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Meter>().unwrap();
        registry
    }

    fn meter() -> Meter {
        Meter {
            reading: 40,
            label: "north".to_string(),
        }
    }

    #[test]
    fn absent_members_are_none() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let scope = MemberScope::DEFAULT;

        assert!(reflector.get_field_accessor::<Meter, u16>("missing", scope).unwrap().is_none());
        assert!(reflector.get_property_accessor::<Meter, u16>("missing", scope).unwrap().is_none());
        type Nullary = dyn Fn() -> u32 + Send + Sync;
        let delegate = reflector.get_method_delegate::<Nullary, Meter>(&Binding::bind(meter()), "missing", scope);
        assert!(delegate.unwrap().is_none());
    }

    struct OtherMeter {
        reading: u16,
    }

    impl Reflect for OtherMeter {
        fn type_name() -> &'static str {
            "Meter"
        }
    }

    #[test]
    fn unregistered_owner_sharing_a_name_is_none() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let scope = MemberScope::DEFAULT;

        assert_eq!(OtherMeter::type_hash(), Meter::type_hash());
        assert!(reflector.get_field_accessor::<OtherMeter, u16>("reading", scope).unwrap().is_none());
        type Doubled = dyn Fn() -> u32 + Send + Sync;
        let other = Binding::bind(OtherMeter { reading: 1 });
        assert_eq!(other.instance().map(|m| m.read().reading), Some(1));
        let delegate = reflector.get_method_delegate::<Doubled, OtherMeter>(&other, "doubled", scope);
        assert!(delegate.unwrap().is_none());
    }

    #[test]
    fn unregistered_owner_is_none() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let accessor = reflector.get_field_accessor::<String, u16>("reading", MemberScope::DEFAULT);
        assert!(accessor.unwrap().is_none());
    }

    #[test]
    fn private_field_round_trip_widened() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let reading = reflector
            .get_field_accessor::<Meter, u32>("reading", MemberScope::DEFAULT)
            .unwrap()
            .unwrap();

        let mut m = meter();
        assert_eq!(reading.get(&m), 40);
        reading.set(&mut m, 65_535);
        assert_eq!(m.reading, u16::MAX);
    }

    #[test]
    fn public_scope_hides_private_field() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let scope = MemberScope::INSTANCE | MemberScope::PUBLIC;
        assert!(reflector.get_field_accessor::<Meter, u16>("reading", scope).unwrap().is_none());
    }

    #[test]
    fn bound_field_writes_through_to_instance() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let instance = shared(meter());
        let reading = reflector
            .get_bound_field_accessor::<Meter, u16>(&Binding::Bound(Arc::clone(&instance)), "reading", MemberScope::DEFAULT)
            .unwrap()
            .unwrap();

        reading.set(7);
        assert_eq!(instance.read().reading, 7);
        assert!(Arc::ptr_eq(&reading.instance::<Meter>().unwrap(), &instance));
    }

    #[test]
    fn unbound_binding_rejected_for_bound_accessor() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let err = reflector
            .get_bound_field_accessor::<Meter, u16>(&Binding::Unbound, "reading", MemberScope::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, ReflectError::InvalidBinding { .. }));
    }

    #[test]
    fn static_binding_rejected_for_instance_field() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let err = reflector
            .get_bound_field_accessor::<Meter, u16>(&Binding::Static, "reading", MemberScope::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, ReflectError::InvalidBinding { .. }));
    }

    #[test]
    fn read_only_property_yields_no_setter() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let label = reflector
            .get_property_accessor::<Meter, String>("label", MemberScope::DEFAULT)
            .unwrap()
            .unwrap();
        assert!(label.is_read_only());
        assert_eq!(label.get(&meter()), "north");
    }

    #[test]
    fn property_type_mismatch_is_an_error() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        let err = reflector
            .get_property_accessor::<Meter, i32>("label", MemberScope::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    }

    #[test]
    fn lossless_policy_rejects_narrowing_field() {
        let registry = registry();
        let options = CompileOptions::default().with_policy(reflector_compiler::ConversionPolicy::Lossless);
        let reflector = Reflector::with_options(&registry, options);
        let err = reflector
            .get_field_accessor::<Meter, u32>("reading", MemberScope::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, ReflectError::TypeMismatch { .. }));
    }

    #[test]
    fn delegate_over_bound_instance() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        type Doubled = dyn Fn() -> u32 + Send + Sync;
        let doubled = reflector
            .get_method_delegate::<Doubled, Meter>(&Binding::bind(meter()), "doubled", MemberScope::DEFAULT)
            .unwrap()
            .unwrap();
        assert_eq!(doubled(), 80);
    }

    #[test]
    fn wrong_arity_is_an_error() {
        let registry = registry();
        let reflector = Reflector::new(&registry);
        type Unary = dyn Fn(u32) -> u32 + Send + Sync;
        let err = reflector
            .get_method_delegate::<Unary, Meter>(&Binding::bind(meter()), "doubled", MemberScope::DEFAULT)
            .err().unwrap();
        assert!(matches!(err, ReflectError::ArityMismatch { expected: 0, found: 1, .. }));
    }
}
