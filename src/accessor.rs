//! Accessor value objects.
//!
//! Each accessor packages closures compiled by the facade. Nothing is
//! validated at call time; a read-only property simply has no setter to
//! hand out, so writing through it does not type-check:
//!
//! ```compile_fail
//! # use reflector::PropertyAccessor;
//! fn write(accessor: &PropertyAccessor<String, usize>, owner: &mut String) {
//!     accessor.set(owner, 3);
//! }
//! ```
//!
//! ```compile_fail
//! # use reflector::BoundPropertyAccessor;
//! fn write(accessor: &BoundPropertyAccessor<i32>) {
//!     accessor.set(3);
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use reflector_core::{BoundGetter, BoundSetter, Getter, Setter, Shared};

/// A bound accessor's captured instance, erased over its owner type.
pub(crate) type Instance = Option<Arc<dyn Any + Send + Sync>>;

pub(crate) fn erase<O: Send + Sync + 'static>(instance: &Shared<O>) -> Arc<dyn Any + Send + Sync> {
    Arc::clone(instance) as Arc<dyn Any + Send + Sync>
}

fn recover<O: Send + Sync + 'static>(instance: &Instance) -> Option<Shared<O>> {
    Arc::clone(instance.as_ref()?).downcast::<RwLock<O>>().ok()
}

// ============================================================================
// Fields
// ============================================================================

/// Reads and writes a field of any `O` passed in per call.
pub struct FieldAccessor<O, V> {
    name: Arc<str>,
    get: Getter<O, V>,
    set: Setter<O, V>,
}

impl<O, V> FieldAccessor<O, V> {
    pub(crate) fn new(name: &str, get: Getter<O, V>, set: Setter<O, V>) -> Self {
        Self {
            name: Arc::from(name),
            get,
            set,
        }
    }

    #[inline]
    pub fn get(&self, owner: &O) -> V {
        (self.get)(owner)
    }

    #[inline]
    pub fn set(&self, owner: &mut O, value: V) {
        (self.set)(owner, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<O, V> Clone for FieldAccessor<O, V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<O, V> fmt::Debug for FieldAccessor<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Reads and writes a field of a captured instance, or a static field.
pub struct BoundFieldAccessor<V> {
    name: Arc<str>,
    get: BoundGetter<V>,
    set: BoundSetter<V>,
    instance: Instance,
}

impl<V> BoundFieldAccessor<V> {
    pub(crate) fn new(name: &str, get: BoundGetter<V>, set: BoundSetter<V>, instance: Instance) -> Self {
        Self {
            name: Arc::from(name),
            get,
            set,
            instance,
        }
    }

    #[inline]
    pub fn get(&self) -> V {
        (self.get)()
    }

    #[inline]
    pub fn set(&self, value: V) {
        (self.set)(value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The captured instance, if it is an `O`. `None` for static fields.
    pub fn instance<O: Send + Sync + 'static>(&self) -> Option<Shared<O>> {
        recover(&self.instance)
    }

    pub fn is_static(&self) -> bool {
        self.instance.is_none()
    }
}

impl<V> Clone for BoundFieldAccessor<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
            instance: self.instance.clone(),
        }
    }
}

impl<V> fmt::Debug for BoundFieldAccessor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundFieldAccessor")
            .field("name", &self.name)
            .field("is_static", &self.is_static())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Properties
// ============================================================================

/// Reads a property of any `O` passed in per call.
///
/// Writing goes through [`setter`](Self::setter), which is `None` for
/// read-only properties.
pub struct PropertyAccessor<O, V> {
    name: Arc<str>,
    get: Getter<O, V>,
    set: Option<Setter<O, V>>,
}

impl<O, V> PropertyAccessor<O, V> {
    pub(crate) fn new(name: &str, get: Getter<O, V>, set: Option<Setter<O, V>>) -> Self {
        Self {
            name: Arc::from(name),
            get,
            set,
        }
    }

    #[inline]
    pub fn get(&self, owner: &O) -> V {
        (self.get)(owner)
    }

    pub fn setter(&self) -> Option<PropertySetter<O, V>> {
        self.set.as_ref().map(|set| PropertySetter(Arc::clone(set)))
    }

    pub fn is_read_only(&self) -> bool {
        self.set.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<O, V> Clone for PropertyAccessor<O, V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            get: Arc::clone(&self.get),
            set: self.set.clone(),
        }
    }
}

impl<O, V> fmt::Debug for PropertyAccessor<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAccessor")
            .field("name", &self.name)
            .field("read_only", &self.is_read_only())
            .finish_non_exhaustive()
    }
}

/// The write half of a writable [`PropertyAccessor`].
pub struct PropertySetter<O, V>(Setter<O, V>);

impl<O, V> PropertySetter<O, V> {
    #[inline]
    pub fn set(&self, owner: &mut O, value: V) {
        (self.0)(owner, value)
    }
}

impl<O, V> Clone for PropertySetter<O, V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// Reads a property of a captured instance, or a static property.
pub struct BoundPropertyAccessor<V> {
    name: Arc<str>,
    get: BoundGetter<V>,
    set: Option<BoundSetter<V>>,
    instance: Instance,
}

impl<V> BoundPropertyAccessor<V> {
    pub(crate) fn new(name: &str, get: BoundGetter<V>, set: Option<BoundSetter<V>>, instance: Instance) -> Self {
        Self {
            name: Arc::from(name),
            get,
            set,
            instance,
        }
    }

    #[inline]
    pub fn get(&self) -> V {
        (self.get)()
    }

    pub fn setter(&self) -> Option<BoundPropertySetter<V>> {
        self.set.as_ref().map(|set| BoundPropertySetter(Arc::clone(set)))
    }

    pub fn is_read_only(&self) -> bool {
        self.set.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance<O: Send + Sync + 'static>(&self) -> Option<Shared<O>> {
        recover(&self.instance)
    }

    pub fn is_static(&self) -> bool {
        self.instance.is_none()
    }
}

impl<V> Clone for BoundPropertyAccessor<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            get: Arc::clone(&self.get),
            set: self.set.clone(),
            instance: self.instance.clone(),
        }
    }
}

impl<V> fmt::Debug for BoundPropertyAccessor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundPropertyAccessor")
            .field("name", &self.name)
            .field("read_only", &self.is_read_only())
            .field("is_static", &self.is_static())
            .finish_non_exhaustive()
    }
}

/// The write half of a writable [`BoundPropertyAccessor`].
pub struct BoundPropertySetter<V>(BoundSetter<V>);

impl<V> BoundPropertySetter<V> {
    #[inline]
    pub fn set(&self, value: V) {
        (self.0)(value)
    }
}

impl<V> Clone for BoundPropertySetter<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}
