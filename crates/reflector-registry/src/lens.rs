//! Composable borrow paths from an owner type to a nested value.

use std::sync::Arc;

type LensGet<O, S> = Arc<dyn for<'a> Fn(&'a O) -> &'a S + Send + Sync>;
type LensGetMut<O, S> = Arc<dyn for<'a> Fn(&'a mut O) -> &'a mut S + Send + Sync>;

/// A shared and exclusive path from `O` to an `S` stored inside it.
///
/// Inheritance is modelled by composition: a derived type reaches its base
/// through a lens, and every member registered through the base is
/// composed with it.
///
/// ```
/// use reflector_registry::Lens;
///
/// struct Inner { value: i32 }
/// struct Outer { inner: Inner }
///
/// let lens = Lens::<Outer, Outer>::identity()
///     .then(|o: &Outer| &o.inner, |o: &mut Outer| &mut o.inner)
///     .then(|i: &Inner| &i.value, |i: &mut Inner| &mut i.value);
///
/// let mut outer = Outer { inner: Inner { value: 1 } };
/// *lens.get_mut(&mut outer) += 41;
/// assert_eq!(*lens.get(&outer), 42);
/// ```
pub struct Lens<O, S> {
    get: LensGet<O, S>,
    get_mut: LensGetMut<O, S>,
}

impl<O: 'static, S: 'static> Lens<O, S> {
    pub fn new<G, M>(get: G, get_mut: M) -> Self
    where
        G: for<'a> Fn(&'a O) -> &'a S + Send + Sync + 'static,
        M: for<'a> Fn(&'a mut O) -> &'a mut S + Send + Sync + 'static,
    {
        Lens {
            get: Arc::new(get),
            get_mut: Arc::new(get_mut),
        }
    }

    #[inline]
    pub fn get<'a>(&self, owner: &'a O) -> &'a S {
        (self.get)(owner)
    }

    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut O) -> &'a mut S {
        (self.get_mut)(owner)
    }

    /// Extend the path one level further.
    pub fn then<D, G, M>(&self, get: G, get_mut: M) -> Lens<O, D>
    where
        D: 'static,
        G: for<'a> Fn(&'a S) -> &'a D + Send + Sync + 'static,
        M: for<'a> Fn(&'a mut S) -> &'a mut D + Send + Sync + 'static,
    {
        let outer = Arc::clone(&self.get);
        let outer_mut = Arc::clone(&self.get_mut);
        Lens::new(move |owner: &O| get(outer(owner)), move |owner: &mut O| get_mut(outer_mut(owner)))
    }
}

impl<O: 'static> Lens<O, O> {
    pub fn identity() -> Self {
        Lens::new(|owner: &O| owner, |owner: &mut O| owner)
    }
}

impl<O, S> Clone for Lens<O, S> {
    fn clone(&self) -> Self {
        Lens {
            get: Arc::clone(&self.get),
            get_mut: Arc::clone(&self.get_mut),
        }
    }
}
