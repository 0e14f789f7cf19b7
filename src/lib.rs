//! Reflector
//!
//! Fast dynamic member access. A member is looked up by name once, compiled
//! into typed closures once, and then read, written or called directly.
//!
//! ```text
//! name ──► locate ──► MemberDescriptor ──► compile ──► accessor / delegate
//!          (registry)                      (compiler)    (called many times)
//! ```
//!
//! Types take part by implementing [`Reflect`] and [`Describe`], usually
//! through `#[derive(Reflect)]`, and registering with a [`TypeRegistry`].
//!
//! ```
//! use reflector::prelude::*;
//!
//! #[derive(Reflect)]
//! struct Player {
//!     pub score: i32,
//!     lives: u8,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Player>().unwrap();
//! let reflector = Reflector::new(&registry);
//!
//! let player = shared(Player { score: 10, lives: 3 });
//! let lives = reflector
//!     .get_bound_field_accessor::<Player, u32>(&Binding::Bound(player.clone()), "lives", MemberScope::DEFAULT)
//!     .unwrap()
//!     .unwrap();
//!
//! lives.set(2);
//! assert_eq!(player.read().lives, 2);
//! assert_eq!(player.read().score, 10);
//! ```
//!
//! ## Crates
//!
//! - `reflector-core`: type identity, primitives, scopes, bindings, errors
//! - `reflector-registry`: type registration and the member locator
//! - `reflector-compiler`: getter, setter and delegate compilation
//! - `reflector-macros`: `#[derive(Reflect)]`

mod accessor;
mod cache;
mod reflector;

pub use accessor::{
    BoundFieldAccessor, BoundPropertyAccessor, BoundPropertySetter, FieldAccessor, PropertyAccessor, PropertySetter,
};
pub use cache::AccessorCache;
pub use reflector::Reflector;

pub use reflector_compiler::{CompileOptions, ConversionPolicy, Signature};
pub use reflector_core::{
    Binding, BindingMode, MemberKind, MemberScope, Reflect, ReflectError, RegistrationError, Shared, Visibility,
    shared,
};
pub use reflector_macros::Reflect;
pub use reflector_registry::{ClassBuilder, Describe, MemberDescriptor, TypeRegistry};

pub mod prelude {
    pub use crate::{
        AccessorCache, Binding, BoundFieldAccessor, BoundPropertyAccessor, ClassBuilder, CompileOptions,
        ConversionPolicy, Describe, FieldAccessor, MemberScope, PropertyAccessor, Reflect, ReflectError, Reflector,
        RegistrationError, Shared, TypeRegistry, Visibility, shared,
    };
}
