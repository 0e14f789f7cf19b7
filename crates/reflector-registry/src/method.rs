//! Conversion of Rust closures and functions into registered methods.
//!
//! A method is stored twice: once in its exact typed shape and, when every
//! parameter and the return type are primitive, once in a shape that
//! exchanges [`Primitive`] values so callers can request a different
//! numeric signature.

use std::sync::Arc;

use reflector_core::{DataType, ErasedThunk, Primitive, PrimitiveMethod, PrimitiveMethodMut, Reflect};

use crate::Lens;

/// The thunks and signature of one method.
#[derive(Debug, Clone)]
pub struct MethodThunks {
    pub params: Vec<DataType>,
    pub return_type: DataType,
    pub exact: ErasedThunk,
    pub primitive: Option<ErasedThunk>,
}

/// A callable taking `&S` plus arguments.
pub trait IntoMethod<S, Args>: Send + Sync + 'static {
    fn into_method<O: 'static>(self, lens: &Lens<O, S>) -> MethodThunks;
}

/// A callable taking `&mut S` plus arguments.
pub trait IntoMethodMut<S, Args>: Send + Sync + 'static {
    fn into_method_mut<O: 'static>(self, lens: &Lens<O, S>) -> MethodThunks;
}

/// A callable without a receiver.
pub trait IntoStaticMethod<Args>: Send + Sync + 'static {
    fn into_static_method(self) -> MethodThunks;
}

macro_rules! impl_into_method {
    ($n:literal; $($arg:ident $val:ident $codec:ident),*) => {
        impl<S, F, R, $($arg,)*> IntoMethod<S, ($($arg,)*)> for F
        where
            S: 'static,
            F: Fn(&S, $($arg),*) -> R + Send + Sync + 'static,
            R: Reflect,
            $($arg: Reflect,)*
        {
            #[allow(unused_variables)]
            fn into_method<O: 'static>(self, lens: &Lens<O, S>) -> MethodThunks {
                let f = Arc::new(self);

                let exact: Arc<dyn Fn(&O, $($arg),*) -> R + Send + Sync> = {
                    let f = Arc::clone(&f);
                    let lens = lens.clone();
                    Arc::new(move |owner: &O, $($val: $arg),*| f(lens.get(owner), $($val),*))
                };

                let primitive = (|| {
                    let ret = R::primitive_codec()?;
                    $(let $codec = <$arg as Reflect>::primitive_codec()?;)*
                    let f = Arc::clone(&f);
                    let lens = lens.clone();
                    let thunk: PrimitiveMethod<O, $n> =
                        Arc::new(move |owner: &O, [$($val),*]: [Primitive; $n]| {
                            (ret.encode)(&f(lens.get(owner), $(($codec.decode)($val)),*))
                        });
                    Some(ErasedThunk::new(thunk))
                })();

                MethodThunks {
                    params: vec![$(DataType::of::<$arg>()),*],
                    return_type: DataType::of::<R>(),
                    exact: ErasedThunk::new(exact),
                    primitive,
                }
            }
        }

        impl<S, F, R, $($arg,)*> IntoMethodMut<S, ($($arg,)*)> for F
        where
            S: 'static,
            F: Fn(&mut S, $($arg),*) -> R + Send + Sync + 'static,
            R: Reflect,
            $($arg: Reflect,)*
        {
            #[allow(unused_variables)]
            fn into_method_mut<O: 'static>(self, lens: &Lens<O, S>) -> MethodThunks {
                let f = Arc::new(self);

                let exact: Arc<dyn Fn(&mut O, $($arg),*) -> R + Send + Sync> = {
                    let f = Arc::clone(&f);
                    let lens = lens.clone();
                    Arc::new(move |owner: &mut O, $($val: $arg),*| f(lens.get_mut(owner), $($val),*))
                };

                let primitive = (|| {
                    let ret = R::primitive_codec()?;
                    $(let $codec = <$arg as Reflect>::primitive_codec()?;)*
                    let f = Arc::clone(&f);
                    let lens = lens.clone();
                    let thunk: PrimitiveMethodMut<O, $n> =
                        Arc::new(move |owner: &mut O, [$($val),*]: [Primitive; $n]| {
                            (ret.encode)(&f(lens.get_mut(owner), $(($codec.decode)($val)),*))
                        });
                    Some(ErasedThunk::new(thunk))
                })();

                MethodThunks {
                    params: vec![$(DataType::of::<$arg>()),*],
                    return_type: DataType::of::<R>(),
                    exact: ErasedThunk::new(exact),
                    primitive,
                }
            }
        }

        impl<F, R, $($arg,)*> IntoStaticMethod<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: Reflect,
            $($arg: Reflect,)*
        {
            #[allow(unused_variables)]
            fn into_static_method(self) -> MethodThunks {
                let f = Arc::new(self);

                let exact: Arc<dyn Fn(&(), $($arg),*) -> R + Send + Sync> = {
                    let f = Arc::clone(&f);
                    Arc::new(move |_: &(), $($val: $arg),*| f($($val),*))
                };

                let primitive = (|| {
                    let ret = R::primitive_codec()?;
                    $(let $codec = <$arg as Reflect>::primitive_codec()?;)*
                    let f = Arc::clone(&f);
                    let thunk: PrimitiveMethod<(), $n> =
                        Arc::new(move |_: &(), [$($val),*]: [Primitive; $n]| {
                            (ret.encode)(&f($(($codec.decode)($val)),*))
                        });
                    Some(ErasedThunk::new(thunk))
                })();

                MethodThunks {
                    params: vec![$(DataType::of::<$arg>()),*],
                    return_type: DataType::of::<R>(),
                    exact: ErasedThunk::new(exact),
                    primitive,
                }
            }
        }
    };
}

impl_into_method!(0;);
impl_into_method!(1; A1 a1 c1);
impl_into_method!(2; A1 a1 c1, A2 a2 c2);
impl_into_method!(3; A1 a1 c1, A2 a2 c2, A3 a3 c3);
impl_into_method!(4; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4);
impl_into_method!(5; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5);
impl_into_method!(6; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5, A6 a6 c6);
impl_into_method!(7; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5, A6 a6 c6, A7 a7 c7);
impl_into_method!(8; A1 a1 c1, A2 a2 c2, A3 a3 c3, A4 a4 c4, A5 a5 c5, A6 a6 c6, A7 a7 c7, A8 a8 c8);
