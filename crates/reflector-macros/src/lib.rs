//! Reflector Proc Macros
//!
//! `#[derive(Reflect)]` implements `Reflect` and `Describe` so a struct can
//! be registered with a `TypeRegistry` in one call.
//!
//! # Example
//!
//! ```ignore
//! use reflector_macros::Reflect;
//!
//! #[derive(Reflect)]
//! #[reflect(name = "Player")]
//! pub struct Player {
//!     pub health: i32,
//!
//!     #[reflect(name = "id", visibility = "public")]
//!     player_id: u64,
//!
//!     #[reflect(skip)]
//!     cache: Vec<u8>,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_reflect;

/// Derive `Reflect` and `Describe` for a type.
///
/// Named fields are registered as fields, in declaration order. Unit
/// structs, tuple structs and enums get `Reflect` and an empty description.
/// Generic types are rejected.
///
/// # Type Attributes
///
/// - `#[reflect(name = "...")]` - Override the registered type name
///
/// # Field Attributes
///
/// - `#[reflect(skip)]` - Do not register the field
/// - `#[reflect(name = "...")]` - Override the member name
/// - `#[reflect(base)]` - Inherit the members of the field's type
/// - `#[reflect(visibility = "public" | "protected" | "private")]` - Override
///   the visibility taken from the Rust declaration (`pub` is public,
///   `pub(..)` protected, no modifier private)
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// pub struct Entity {
///     pub id: u32,
/// }
///
/// #[derive(Reflect)]
/// pub struct Monster {
///     #[reflect(base)]
///     entity: Entity,
///     pub(crate) rage: f32,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    derive_reflect::derive_reflect_impl(input)
}
