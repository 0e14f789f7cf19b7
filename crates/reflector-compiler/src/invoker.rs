//! Method delegate compilation.
//!
//! A caller asks for a method as a `dyn Fn(A1, .., An) -> R + Send + Sync`
//! of its choosing. [`Signature`] describes such a type and knows how to
//! build one from a registered method thunk; [`compile_invoker`] checks
//! arity, binding and conversions before anything is built.

use std::sync::Arc;

use tracing::debug;

use reflector_core::{
    Binding, DataType, ErasedThunk, MemberKind, PrimitiveMethod, PrimitiveMethodMut, ReceiverKind, Reflect,
    ReflectError, Shared,
};
use reflector_registry::{Member, MemberDescriptor, MethodEntry};

use crate::CompileOptions;
use crate::accessor::{check_binding, check_owner};
use crate::conversion::find_conversion;

/// How a compiled delegate reaches its receiver.
pub enum Receiver<O> {
    Static,
    Shared(Shared<O>),
    Exclusive(Shared<O>),
}

/// A delegate type a method can be compiled into.
///
/// Implemented for `dyn Fn(A1, .., An) -> R + Send + Sync` with up to
/// eight parameters, where every `Ai` and `R` implement `Reflect`.
pub trait Signature: Send + Sync + 'static {
    const ARITY: usize;

    fn params() -> Vec<DataType>;

    fn output() -> DataType;

    /// Build from a thunk with exactly this signature.
    fn from_exact<O: Send + Sync + 'static>(thunk: &ErasedThunk, receiver: &Receiver<O>) -> Option<Arc<Self>>;

    /// Build from a primitive thunk, converting every argument and the result.
    fn from_primitive<O: Send + Sync + 'static>(thunk: &ErasedThunk, receiver: &Receiver<O>) -> Option<Arc<Self>>;
}

macro_rules! impl_signature {
    ($n:literal; $($arg:ident $val:ident $codec:ident),*) => {
        impl<R: Reflect, $($arg: Reflect,)*> Signature for dyn Fn($($arg),*) -> R + Send + Sync {
            const ARITY: usize = $n;

            fn params() -> Vec<DataType> {
                vec![$(DataType::of::<$arg>()),*]
            }

            fn output() -> DataType {
                DataType::of::<R>()
            }

            fn from_exact<O: Send + Sync + 'static>(thunk: &ErasedThunk, receiver: &Receiver<O>) -> Option<Arc<Self>> {
                let delegate = match receiver {
                    Receiver::Static => {
                        let f = thunk.downcast::<Arc<dyn Fn(&(), $($arg),*) -> R + Send + Sync>>()?;
                        Arc::new(move |$($val: $arg),*| f(&(), $($val),*)) as Arc<Self>
                    }
                    Receiver::Shared(instance) => {
                        let f = thunk.downcast::<Arc<dyn Fn(&O, $($arg),*) -> R + Send + Sync>>()?;
                        let instance = Arc::clone(instance);
                        Arc::new(move |$($val: $arg),*| f(&*instance.read(), $($val),*)) as Arc<Self>
                    }
                    Receiver::Exclusive(instance) => {
                        let f = thunk.downcast::<Arc<dyn Fn(&mut O, $($arg),*) -> R + Send + Sync>>()?;
                        let instance = Arc::clone(instance);
                        Arc::new(move |$($val: $arg),*| f(&mut *instance.write(), $($val),*)) as Arc<Self>
                    }
                };
                Some(delegate)
            }

            fn from_primitive<O: Send + Sync + 'static>(thunk: &ErasedThunk, receiver: &Receiver<O>) -> Option<Arc<Self>> {
                let ret = R::primitive_codec()?;
                $(let $codec = <$arg as Reflect>::primitive_codec()?;)*

                let delegate = match receiver {
                    Receiver::Static => {
                        let f = thunk.downcast::<PrimitiveMethod<(), $n>>()?;
                        Arc::new(move |$($val: $arg),*| {
                            (ret.decode)(f(&(), [$(($codec.encode)(&$val)),*]))
                        }) as Arc<Self>
                    }
                    Receiver::Shared(instance) => {
                        let f = thunk.downcast::<PrimitiveMethod<O, $n>>()?;
                        let instance = Arc::clone(instance);
                        Arc::new(move |$($val: $arg),*| {
                            (ret.decode)(f(&*instance.read(), [$(($codec.encode)(&$val)),*]))
                        }) as Arc<Self>
                    }
                    Receiver::Exclusive(instance) => {
                        let f = thunk.downcast::<PrimitiveMethodMut<O, $n>>()?;
                        let instance = Arc::clone(instance);
                        Arc::new(move |$($val: $arg),*| {
                            (ret.decode)(f(&mut *instance.write(), [$(($codec.encode)(&$val)),*]))
                        }) as Arc<Self>
                    }
                };
                Some(delegate)
            }
        }
    };
}

impl_signature!(0;);
impl_signature!(1; A1 a1 c1);
impl_signature!(2; A1 a1 c1, A2 a2 c2);
impl_signature!(3; A1 a1 c1, A2 a2 c2, A3 a3 c3);
impl_signature!(4; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4);
impl_signature!(5; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5);
impl_signature!(6; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5, A6 a6 c6);
impl_signature!(7; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5, A6 a6 c6, A7 a7 c7);
impl_signature!(8; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5, A6 a6 c6, A7 a7 c7, A8 a8 c8);

/// Compile a located method into the delegate type `S`.
///
/// Checks, in order: the descriptor is a method, the parameter counts
/// match, the binding fits the method's receiver, and every parameter and
/// the return value convert under `options.policy`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_invoker<S, O>(
    descriptor: &MemberDescriptor<'_>,
    binding: &Binding<O>,
    options: &CompileOptions,
) -> Result<Arc<S>, ReflectError>
where
    S: Signature + ?Sized,
    O: Send + Sync + 'static,
{
    let Member::Method(method) = descriptor.member else {
        return Err(ReflectError::WrongKind {
            member: descriptor.qualified_name(),
            expected: MemberKind::Method,
            found: descriptor.kind(),
        });
    };

    if method.arity() != S::ARITY {
        return Err(ReflectError::ArityMismatch {
            member: descriptor.qualified_name(),
            expected: method.arity(),
            found: S::ARITY,
        });
    }

    check_binding(descriptor, binding.mode())?;

    let receiver = match (binding, method.receiver) {
        (Binding::Bound(instance), ReceiverKind::Shared) => {
            check_owner::<O>(descriptor)?;
            Receiver::Shared(Arc::clone(instance))
        }
        (Binding::Bound(instance), ReceiverKind::Exclusive) => {
            check_owner::<O>(descriptor)?;
            Receiver::Exclusive(Arc::clone(instance))
        }
        _ => Receiver::Static,
    };

    let params = S::params();
    let output = S::output();
    let exact = params.iter().zip(&method.params).all(|(requested, declared)| requested.is_same(declared))
        && output.is_same(&method.return_type);

    let delegate = if exact {
        S::from_exact(&method.exact, &receiver)
    } else {
        let convertible = params
            .iter()
            .zip(&method.params)
            .all(|(requested, declared)| find_conversion(requested, declared, options.policy).is_some())
            && find_conversion(&method.return_type, &output, options.policy).is_some();
        if convertible {
            method
                .primitive
                .as_ref()
                .and_then(|thunk| S::from_primitive(thunk, &receiver))
        } else {
            None
        }
    };

    let delegate = delegate.ok_or_else(|| ReflectError::TypeMismatch {
        member: descriptor.qualified_name(),
        declared: signature_name(&method.params, &method.return_type),
        requested: signature_name(&params, &output),
    })?;

    debug!(
        member = %descriptor.qualified_name(),
        arity = S::ARITY,
        exact,
        receiver = ?method.receiver,
        "compiled invoker"
    );
    Ok(delegate)
}

/// `fn(int, int) -> int`
pub fn signature_name(params: &[DataType], output: &DataType) -> String {
    let params: Vec<&str> = params.iter().map(|p| p.name).collect();
    format!("fn({}) -> {}", params.join(", "), output.name)
}

/// The declared signature of a method, for diagnostics.
pub fn method_signature(method: &MethodEntry) -> String {
    signature_name(&method.params, &method.return_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflector_core::{MemberScope, RegistrationError, TypeHash, Visibility, shared};
    use reflector_registry::{ClassBuilder, Describe, TypeRegistry};

    type Sum = dyn Fn(i32, i32) -> i32 + Send + Sync;

    struct Counter {
        total: i64,
    }

    impl Reflect for Counter {
        fn type_name() -> &'static str {
            "Counter"
        }
    }

    impl Counter {
        fn sum(&self, a: i32, b: i32) -> i32 {
            a + b
        }

        fn add(&mut self, by: i64) -> i64 {
            self.total += by;
            self.total
        }

        fn describe_total(&self, prefix: String) -> String {
            format!("{prefix}{}", self.total)
        }
    }

    impl Describe for Counter {
        fn describe<'r, O: Reflect>(class: ClassBuilder<'r, O, Self>) -> Result<ClassBuilder<'r, O, Self>, RegistrationError> {
            class
                .method("sum", Visibility::Public, Counter::sum)?
                .method_mut("add", Visibility::Public, Counter::add)?
                .method("describe_total", Visibility::Public, Counter::describe_total)?
                .static_method("twice", Visibility::Public, |v: u8| v as u16 * 2)
        }
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Counter>().unwrap();
        registry
    }

    fn find<'r>(registry: &'r TypeRegistry, name: &str) -> MemberDescriptor<'r> {
        registry
            .locate(TypeHash::from_name("Counter"), MemberKind::Method, name, MemberScope::DEFAULT)
            .unwrap()
    }

    #[test]
    fn exact_instance_delegate() {
        let registry = registry();
        let binding = Binding::bind(Counter { total: 0 });
        let sum = compile_invoker::<Sum, _>(&find(&registry, "sum"), &binding, &CompileOptions::default()).unwrap();

        for (a, b) in [(0, 0), (-5, 3), (i32::MIN + 1, -1), (40, 2)] {
            assert_eq!(sum(a, b), a + b);
        }
    }

    #[test]
    fn converting_delegate() {
        let registry = registry();
        let binding = Binding::bind(Counter { total: 0 });
        let sum = compile_invoker::<dyn Fn(i8, i64) -> f64 + Send + Sync, _>(
            &find(&registry, "sum"),
            &binding,
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(sum(-3, 10), 7.0);
    }

    #[test]
    fn exclusive_receiver_mutates_instance() {
        let registry = registry();
        let instance = shared(Counter { total: 1 });
        let add = compile_invoker::<dyn Fn(i64) -> i64 + Send + Sync, _>(
            &find(&registry, "add"),
            &Binding::Bound(Arc::clone(&instance)),
            &CompileOptions::default(),
        )
        .unwrap();

        assert_eq!(add(4), 5);
        assert_eq!(add(-10), -5);
        assert_eq!(instance.read().total, -5);
    }

    #[test]
    fn object_parameters_need_exact_signature() {
        let registry = registry();
        let binding = Binding::bind(Counter { total: 3 });
        let describe = find(&registry, "describe_total");

        let exact = compile_invoker::<dyn Fn(String) -> String + Send + Sync, _>(&describe, &binding, &CompileOptions::default())
            .unwrap();
        assert_eq!(exact("total=".to_string()), "total=3");

        let err = compile_invoker::<dyn Fn(i32) -> String + Send + Sync, _>(&describe, &binding, &CompileOptions::default());
        assert!(matches!(err, Err(ReflectError::TypeMismatch { .. })));
    }

    #[test]
    fn static_delegate_with_static_or_unbound_binding() {
        let registry = registry();
        let twice = find(&registry, "twice");
        let options = CompileOptions::default();

        let a = compile_invoker::<dyn Fn(u8) -> u16 + Send + Sync, Counter>(&twice, &Binding::Static, &options).unwrap();
        let b = compile_invoker::<dyn Fn(u8) -> u16 + Send + Sync, Counter>(&twice, &Binding::Unbound, &options).unwrap();
        assert_eq!(a(21), 42);
        assert_eq!(b(0), 0);
    }

    #[test]
    fn arity_mismatch() {
        let registry = registry();
        let binding = Binding::bind(Counter { total: 0 });
        let err = compile_invoker::<dyn Fn(i32) -> i32 + Send + Sync, _>(&find(&registry, "sum"), &binding, &CompileOptions::default());
        assert!(matches!(
            err,
            Err(ReflectError::ArityMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn invalid_bindings() {
        let registry = registry();
        let options = CompileOptions::default();

        let err = compile_invoker::<Sum, Counter>(&find(&registry, "sum"), &Binding::Unbound, &options);
        assert!(matches!(err, Err(ReflectError::InvalidBinding { .. })));

        let err = compile_invoker::<Sum, Counter>(&find(&registry, "sum"), &Binding::Static, &options);
        assert!(matches!(err, Err(ReflectError::InvalidBinding { .. })));

        let err = compile_invoker::<dyn Fn(u8) -> u16 + Send + Sync, _>(
            &find(&registry, "twice"),
            &Binding::bind(Counter { total: 0 }),
            &options,
        );
        assert!(matches!(err, Err(ReflectError::InvalidBinding { .. })));
    }

    #[test]
    fn signature_names() {
        assert_eq!(
            signature_name(&<Sum as Signature>::params(), &<Sum as Signature>::output()),
            "fn(int, int) -> int"
        );
        assert_eq!(<dyn Fn() + Send + Sync as Signature>::ARITY, 0);
    }
}
