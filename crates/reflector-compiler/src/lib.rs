//! Reflector Compiler
//!
//! Turns a located member into typed closures, once. Nothing here looks a
//! member up by name; callers hand in a
//! [`MemberDescriptor`](reflector_registry::MemberDescriptor).
//!
//! ## Modules
//!
//! - [`conversion`]: Conversion rules between declared and requested types
//! - [`accessor`]: Getter and setter compilation for fields and properties
//! - [`invoker`]: Delegate compilation for methods
//! - [`options`]: Compilation options and the conversion policy

pub mod accessor;
pub mod conversion;
pub mod invoker;
pub mod options;

pub use accessor::{
    bind_getter, bind_setter, bind_static_getter, bind_static_setter, check_binding, compile_getter,
    compile_setter,
};
pub use conversion::{Conversion, ConversionKind, find_conversion, find_primitive_conversion};
pub use invoker::{Receiver, Signature, compile_invoker, method_signature, signature_name};
pub use options::{CompileOptions, ConversionPolicy};
