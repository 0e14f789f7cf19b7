//! The `Describe` trait: a type's own member list.

use reflector_core::{Reflect, RegistrationError};

use crate::ClassBuilder;

/// A type that can describe its members to a [`ClassBuilder`].
///
/// `describe` is generic over the owner `O` so the same description serves
/// both the type's own registration (`O = Self`) and every derived type
/// that inherits it (`O` = the derived type, reached through a lens).
///
/// Usually generated by `#[derive(Reflect)]`.
pub trait Describe: Reflect + Sized {
    fn describe<'r, O: Reflect>(class: ClassBuilder<'r, O, Self>) -> Result<ClassBuilder<'r, O, Self>, RegistrationError>;
}
