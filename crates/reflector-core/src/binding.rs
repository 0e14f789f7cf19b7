//! Binding modes for accessors and delegates.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// An instance shared between the caller and bound accessors.
///
/// Bound accessors hold a clone of the `Arc`; they never own the
/// instance's lifetime beyond keeping it reachable.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap a value so it can be bound.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// What an accessor or delegate is tied to.
///
/// ```
/// use reflector_core::{Binding, BindingMode};
///
/// let bound = Binding::bind(5_i32);
/// assert_eq!(bound.mode(), BindingMode::Bound);
/// assert_eq!(Binding::<i32>::Static.mode(), BindingMode::Static);
/// ```
pub enum Binding<O> {
    /// No instance; the member must be static.
    Static,
    /// A specific instance captured at compile time.
    Bound(Shared<O>),
    /// The instance is passed on every call.
    Unbound,
}

/// The discriminant of a [`Binding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingMode {
    Static,
    Bound,
    Unbound,
}

impl<O> Binding<O> {
    /// Bind a freshly shared instance.
    pub fn bind(value: O) -> Self {
        Binding::Bound(shared(value))
    }

    pub fn mode(&self) -> BindingMode {
        match self {
            Binding::Static => BindingMode::Static,
            Binding::Bound(_) => BindingMode::Bound,
            Binding::Unbound => BindingMode::Unbound,
        }
    }

    pub fn instance(&self) -> Option<&Shared<O>> {
        match self {
            Binding::Bound(instance) => Some(instance),
            _ => None,
        }
    }
}

impl<O> Clone for Binding<O> {
    fn clone(&self) -> Self {
        match self {
            Binding::Static => Binding::Static,
            Binding::Bound(instance) => Binding::Bound(Arc::clone(instance)),
            Binding::Unbound => Binding::Unbound,
        }
    }
}

impl<O> fmt::Debug for Binding<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Binding::Static => "Static",
            Binding::Bound(_) => "Bound(..)",
            Binding::Unbound => "Unbound",
        })
    }
}

impl<O> From<Shared<O>> for Binding<O> {
    fn from(instance: Shared<O>) -> Self {
        Binding::Bound(instance)
    }
}

impl fmt::Display for BindingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingMode::Static => write!(f, "static"),
            BindingMode::Bound => write!(f, "bound"),
            BindingMode::Unbound => write!(f, "unbound"),
        }
    }
}
