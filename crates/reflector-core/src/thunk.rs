//! Typed and erased call shapes stored in the registry.
//!
//! The registry stores every member access as an `Arc` of a concrete
//! `dyn Fn` shape, erased behind [`ErasedThunk`]. The compiler recovers the
//! exact shape with a single downcast at compile time; calls never downcast.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::Primitive;

/// Read a value from an owner.
pub type Getter<O, V> = Arc<dyn Fn(&O) -> V + Send + Sync>;

/// Write a value into an owner.
pub type Setter<O, V> = Arc<dyn Fn(&mut O, V) + Send + Sync>;

/// Read a value from a captured instance (or from static storage).
pub type BoundGetter<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Write a value into a captured instance (or into static storage).
pub type BoundSetter<V> = Arc<dyn Fn(V) + Send + Sync>;

/// Primitive method call through a shared receiver.
pub type PrimitiveMethod<O, const N: usize> = Arc<dyn Fn(&O, [Primitive; N]) -> Primitive + Send + Sync>;

/// Primitive method call through an exclusive receiver.
pub type PrimitiveMethodMut<O, const N: usize> =
    Arc<dyn Fn(&mut O, [Primitive; N]) -> Primitive + Send + Sync>;

/// A type-erased thunk.
#[derive(Clone)]
pub struct ErasedThunk(Arc<dyn Any + Send + Sync>);

impl ErasedThunk {
    pub fn new<T: Any + Send + Sync>(thunk: T) -> Self {
        ErasedThunk(Arc::new(thunk))
    }

    /// Recover the concrete shape, `None` if `T` is not what was stored.
    pub fn downcast<T: Any + Clone>(&self) -> Option<T> {
        self.0.downcast_ref::<T>().cloned()
    }

    pub fn holds<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for ErasedThunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErasedThunk(..)")
    }
}
