//! Registry entries for types and their members.
//!
//! Entries are immutable once a type is built. Inherited members are
//! flattened into the derived type's entry with `depth > 0`; the thunks of
//! an inherited member already reach through the base field, so a lookup
//! never walks the inheritance chain at call time.

use std::any::TypeId;
use std::sync::Arc;

use reflector_core::{
    DataType, ErasedThunk, Getter, MemberKind, Primitive, ReceiverKind, Reflect, Setter, TypeHash,
    Visibility,
};

/// Metadata common to every member.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    pub name: String,
    pub hash: TypeHash,
    pub visibility: Visibility,
    pub is_static: bool,
    /// The type that declared the member (a base type for inherited members).
    pub declaring_type: TypeHash,
    pub declaring_type_name: &'static str,
    /// 0 for members declared on the type itself, +1 per inheritance level.
    pub depth: u32,
}

/// Typed and primitive access paths for a field or property.
///
/// For an instance member of owner `O` declared as `D`:
///
/// | slot | shape |
/// |------|-------|
/// | `getter` | `Getter<O, D>` |
/// | `setter` | `Setter<O, D>` |
/// | `primitive_getter` | `Getter<O, Primitive>` |
/// | `primitive_setter` | `Setter<O, Primitive>` |
///
/// Static members use `()` for `O`. The primitive slots are present only
/// when `D` is a primitive type.
#[derive(Debug, Clone)]
pub struct ValueThunks {
    pub getter: ErasedThunk,
    pub setter: Option<ErasedThunk>,
    pub primitive_getter: Option<ErasedThunk>,
    pub primitive_setter: Option<ErasedThunk>,
}

impl ValueThunks {
    pub fn new<X: 'static, D: Reflect>(getter: Getter<X, D>, setter: Option<Setter<X, D>>) -> Self {
        let codec = D::primitive_codec();

        let primitive_getter = codec.map(|codec| {
            let getter = Arc::clone(&getter);
            let thunk: Getter<X, Primitive> = Arc::new(move |owner: &X| (codec.encode)(&getter(owner)));
            ErasedThunk::new(thunk)
        });

        let primitive_setter = codec.zip(setter.clone()).map(|(codec, setter)| {
            let thunk: Setter<X, Primitive> =
                Arc::new(move |owner: &mut X, value: Primitive| setter(owner, (codec.decode)(value)));
            ErasedThunk::new(thunk)
        });

        ValueThunks {
            getter: ErasedThunk::new(getter),
            setter: setter.map(ErasedThunk::new),
            primitive_getter,
            primitive_setter,
        }
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}

/// A field: plain storage, always readable and writable.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    pub info: MemberInfo,
    pub data_type: DataType,
    pub thunks: ValueThunks,
}

/// A property: a getter and an optional setter.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    pub info: MemberInfo,
    pub data_type: DataType,
    pub thunks: ValueThunks,
}

impl PropertyEntry {
    #[inline]
    pub fn is_read_only(&self) -> bool {
        !self.thunks.is_writable()
    }
}

/// A method with a fixed parameter list.
///
/// `exact` holds `Arc<dyn Fn(&O, A1, .., An) -> R + Send + Sync>` (or
/// `&mut O` for exclusive receivers, `&()` for statics). `primitive`
/// holds the matching `PrimitiveMethod`/`PrimitiveMethodMut` shape when
/// every parameter and the return type are primitive.
#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub info: MemberInfo,
    pub params: Vec<DataType>,
    pub return_type: DataType,
    pub receiver: ReceiverKind,
    pub exact: ErasedThunk,
    pub primitive: Option<ErasedThunk>,
}

impl MethodEntry {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A base type flattened into a derived type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEntry {
    pub type_hash: TypeHash,
    pub name: &'static str,
    pub depth: u32,
}

/// A registered type and every member visible on it.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub name: &'static str,
    pub type_hash: TypeHash,
    pub type_id: TypeId,
    /// Base types in registration order.
    pub bases: Vec<BaseEntry>,
    pub fields: Vec<FieldEntry>,
    pub properties: Vec<PropertyEntry>,
    pub methods: Vec<MethodEntry>,
}

impl TypeEntry {
    pub fn new<T: Reflect>() -> Self {
        TypeEntry {
            name: T::type_name(),
            type_hash: T::type_hash(),
            type_id: TypeId::of::<T>(),
            bases: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Whether `B` appears anywhere in this type's base chain.
    pub fn derives_from(&self, base: TypeHash) -> bool {
        self.bases.iter().any(|b| b.type_hash == base)
    }

    /// Members of one kind declared with `name`, any depth.
    pub fn members_named<'a>(&'a self, kind: MemberKind, name: &'a str) -> impl Iterator<Item = &'a MemberInfo> + 'a {
        let fields = self.fields.iter().map(|f| &f.info);
        let properties = self.properties.iter().map(|p| &p.info);
        let methods = self.methods.iter().map(|m| &m.info);
        let all: Box<dyn Iterator<Item = &'a MemberInfo> + 'a> = match kind {
            MemberKind::Field => Box::new(fields),
            MemberKind::Property => Box::new(properties),
            MemberKind::Method => Box::new(methods),
        };
        all.filter(move |info| info.name == name)
    }

    pub fn member_count(&self) -> usize {
        self.fields.len() + self.properties.len() + self.methods.len()
    }
}
