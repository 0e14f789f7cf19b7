//! Getter and setter compilation for fields and properties.
//!
//! Compiling resolves everything once: binding mode, owner type, the
//! conversion between declared and requested type and the exact thunk to
//! call. The returned closures only run the prebuilt path.

use std::any::{TypeId, type_name};
use std::sync::Arc;

use tracing::debug;

use reflector_core::{
    BindingMode, BoundGetter, BoundSetter, DataType, Getter, MemberKind, Primitive, Reflect, ReflectError,
    Setter, Shared,
};
use reflector_registry::{Member, MemberDescriptor, ValueThunks};

use crate::conversion::find_conversion;
use crate::CompileOptions;

/// Compile a getter for a field or property.
///
/// `O` is the owner type for instance members and `()` for static ones.
/// `mode` is checked against the member's static/instance modifier.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_getter<O: 'static, V: Reflect>(
    descriptor: &MemberDescriptor<'_>,
    mode: BindingMode,
    options: &CompileOptions,
) -> Result<Getter<O, V>, ReflectError> {
    let (declared, thunks) = value_member(descriptor)?;
    check_binding(descriptor, mode)?;
    check_owner::<O>(descriptor)?;

    let requested = DataType::of::<V>();
    let conversion = find_conversion(declared, &requested, options.policy)
        .ok_or_else(|| mismatch(descriptor, declared, &requested))?;

    let getter = if conversion.is_identity() {
        thunks.getter.downcast::<Getter<O, V>>()
    } else {
        read_converted::<O, V>(thunks)
    }
    .ok_or_else(|| mismatch(descriptor, declared, &requested))?;

    debug!(
        member = %descriptor.qualified_name(),
        declared = declared.name,
        requested = requested.name,
        conversion = ?conversion.kind,
        "compiled getter"
    );
    Ok(getter)
}

/// Compile a setter for a field or property.
///
/// Returns `Ok(None)` for a property without a setter.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_setter<O: 'static, V: Reflect>(
    descriptor: &MemberDescriptor<'_>,
    mode: BindingMode,
    options: &CompileOptions,
) -> Result<Option<Setter<O, V>>, ReflectError> {
    let (declared, thunks) = value_member(descriptor)?;
    check_binding(descriptor, mode)?;
    check_owner::<O>(descriptor)?;

    let Some(exact) = &thunks.setter else {
        return Ok(None);
    };

    let requested = DataType::of::<V>();
    let conversion = find_conversion(&requested, declared, options.policy)
        .ok_or_else(|| mismatch(descriptor, declared, &requested))?;

    let setter = if conversion.is_identity() {
        exact.downcast::<Setter<O, V>>()
    } else {
        write_converted::<O, V>(thunks)
    }
    .ok_or_else(|| mismatch(descriptor, declared, &requested))?;

    debug!(
        member = %descriptor.qualified_name(),
        declared = declared.name,
        requested = requested.name,
        conversion = ?conversion.kind,
        "compiled setter"
    );
    Ok(Some(setter))
}

/// Capture an instance into a getter.
pub fn bind_getter<O, V>(getter: Getter<O, V>, instance: Shared<O>) -> BoundGetter<V>
where
    O: Send + Sync + 'static,
    V: 'static,
{
    Arc::new(move || getter(&*instance.read()))
}

/// Capture an instance into a setter.
pub fn bind_setter<O, V>(setter: Setter<O, V>, instance: Shared<O>) -> BoundSetter<V>
where
    O: Send + Sync + 'static,
    V: 'static,
{
    Arc::new(move |value: V| setter(&mut *instance.write(), value))
}

/// Close a static getter over the unit owner.
pub fn bind_static_getter<V: 'static>(getter: Getter<(), V>) -> BoundGetter<V> {
    Arc::new(move || getter(&()))
}

/// Close a static setter over the unit owner.
pub fn bind_static_setter<V: 'static>(setter: Setter<(), V>) -> BoundSetter<V> {
    Arc::new(move |value: V| setter(&mut (), value))
}

/// Reject binding modes the member's static/instance modifier cannot honour.
pub fn check_binding(descriptor: &MemberDescriptor<'_>, mode: BindingMode) -> Result<(), ReflectError> {
    let is_static = descriptor.is_static();
    let is_method = descriptor.kind() == MemberKind::Method;

    let reason = match mode {
        BindingMode::Static if !is_static => "instance member requires an instance",
        BindingMode::Bound if is_static => "static member cannot be bound to an instance",
        BindingMode::Unbound if is_method && !is_static => "instance method requires an instance",
        BindingMode::Unbound if !is_method && is_static => "static member has no instance parameter",
        _ => return Ok(()),
    };

    Err(ReflectError::InvalidBinding {
        member: descriptor.qualified_name(),
        reason,
    })
}

/// The requested owner `O` must be the located type (or `()` for statics).
pub(crate) fn check_owner<O: 'static>(descriptor: &MemberDescriptor<'_>) -> Result<(), ReflectError> {
    let (expected, expected_name) = if descriptor.is_static() {
        (TypeId::of::<()>(), "()")
    } else {
        (descriptor.owner.type_id, descriptor.owner.name)
    };

    if TypeId::of::<O>() == expected {
        Ok(())
    } else {
        Err(ReflectError::TypeMismatch {
            member: descriptor.qualified_name(),
            declared: expected_name.to_string(),
            requested: type_name::<O>().to_string(),
        })
    }
}

fn value_member<'r>(descriptor: &MemberDescriptor<'r>) -> Result<(&'r DataType, &'r ValueThunks), ReflectError> {
    match descriptor.member {
        Member::Field(field) => Ok((&field.data_type, &field.thunks)),
        Member::Property(property) => Ok((&property.data_type, &property.thunks)),
        Member::Method(_) => Err(ReflectError::WrongKind {
            member: descriptor.qualified_name(),
            expected: MemberKind::Field,
            found: MemberKind::Method,
        }),
    }
}

fn read_converted<O: 'static, V: Reflect>(thunks: &ValueThunks) -> Option<Getter<O, V>> {
    let read = thunks.primitive_getter.as_ref()?.downcast::<Getter<O, Primitive>>()?;
    let codec = V::primitive_codec()?;
    Some(Arc::new(move |owner: &O| (codec.decode)(read(owner))))
}

fn write_converted<O: 'static, V: Reflect>(thunks: &ValueThunks) -> Option<Setter<O, V>> {
    let write = thunks.primitive_setter.as_ref()?.downcast::<Setter<O, Primitive>>()?;
    let codec = V::primitive_codec()?;
    Some(Arc::new(move |owner: &mut O, value: V| write(owner, (codec.encode)(&value))))
}

fn mismatch(descriptor: &MemberDescriptor<'_>, declared: &DataType, requested: &DataType) -> ReflectError {
    ReflectError::TypeMismatch {
        member: descriptor.qualified_name(),
        declared: declared.name.to_string(),
        requested: requested.name.to_string(),
    }
}
