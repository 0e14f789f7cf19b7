//! Reflector Registry
//!
//! The type-introspection facility the accessor compiler works against.
//! Rust has no runtime member reflection, so types describe themselves once
//! through a [`ClassBuilder`]; the registry then answers name-based member
//! queries through the [`locator`].
//!
//! ## Modules
//!
//! - [`registry`]: `TypeRegistry`, the store of described types
//! - [`class_builder`]: Fluent registration of fields, properties, methods and bases
//! - [`describe`]: The `Describe` trait implemented by reflected types
//! - [`entries`]: Type and member entries with their erased thunks
//! - [`lens`]: Borrow paths used to flatten base types
//! - [`method`]: Conversion of closures into method thunks
//! - [`locator`]: Member resolution by kind, name and scope

pub mod class_builder;
pub mod describe;
pub mod entries;
pub mod lens;
pub mod locator;
pub mod method;
pub mod registry;

pub use class_builder::ClassBuilder;
pub use describe::Describe;
pub use entries::{BaseEntry, FieldEntry, MemberInfo, MethodEntry, PropertyEntry, TypeEntry, ValueThunks};
pub use lens::Lens;
pub use locator::{Member, MemberDescriptor, locate};
pub use method::{IntoMethod, IntoMethodMut, IntoStaticMethod, MethodThunks};
pub use registry::TypeRegistry;
