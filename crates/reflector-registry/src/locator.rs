//! Member Locator: name-based resolution of fields, properties and methods.
//!
//! This is the only place a member is found by its name. Everything that
//! follows works on the returned [`MemberDescriptor`].
//!
//! Resolution rules:
//!
//! - Only members of the requested kind are searched.
//! - A member must be admitted by the [`MemberScope`] (see
//!   [`MemberScope::admits`]).
//! - Among admitted members, the smallest inheritance depth wins, so a
//!   member declared on the type hides inherited members with its name.
//! - Several admitted members at the winning depth is an ambiguous match.

use tracing::trace;

use reflector_core::{DataType, MemberKind, MemberScope, ReflectError, TypeHash};

use crate::TypeRegistry;
use crate::entries::{FieldEntry, MemberInfo, MethodEntry, PropertyEntry, TypeEntry};

/// A located member and the type it was located on.
#[derive(Debug, Clone, Copy)]
pub struct MemberDescriptor<'r> {
    pub owner: &'r TypeEntry,
    pub member: Member<'r>,
}

/// The located member, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub enum Member<'r> {
    Field(&'r FieldEntry),
    Property(&'r PropertyEntry),
    Method(&'r MethodEntry),
}

impl<'r> MemberDescriptor<'r> {
    pub fn info(&self) -> &'r MemberInfo {
        match self.member {
            Member::Field(f) => &f.info,
            Member::Property(p) => &p.info,
            Member::Method(m) => &m.info,
        }
    }

    pub fn name(&self) -> &'r str {
        &self.info().name
    }

    pub fn kind(&self) -> MemberKind {
        match self.member {
            Member::Field(_) => MemberKind::Field,
            Member::Property(_) => MemberKind::Property,
            Member::Method(_) => MemberKind::Method,
        }
    }

    pub fn is_static(&self) -> bool {
        self.info().is_static
    }

    /// Declared type of a field or property, return type of a method.
    pub fn value_type(&self) -> &'r DataType {
        match self.member {
            Member::Field(f) => &f.data_type,
            Member::Property(p) => &p.data_type,
            Member::Method(m) => &m.return_type,
        }
    }

    /// `Owner::member`, for diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.owner.name, self.name())
    }
}

/// Resolve `name` on the type `owner`.
///
/// Returns [`ReflectError::NotFound`] when the type is not registered or no
/// admitted member matches, and [`ReflectError::AmbiguousMatch`] when more
/// than one does.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn locate<'r>(
    registry: &'r TypeRegistry,
    owner: TypeHash,
    kind: MemberKind,
    name: &str,
    scope: MemberScope,
) -> Result<MemberDescriptor<'r>, ReflectError> {
    let Some(entry) = registry.get(owner) else {
        trace!(owner = %owner, %kind, member = name, "locate on unregistered type");
        return Err(ReflectError::NotFound {
            type_name: owner.to_string(),
            kind,
            member: name.to_string(),
        });
    };

    let selected = match kind {
        MemberKind::Field => select(&entry.fields, |f| &f.info, name, scope).map(|f| f.map(Member::Field)),
        MemberKind::Property => {
            select(&entry.properties, |p| &p.info, name, scope).map(|p| p.map(Member::Property))
        }
        MemberKind::Method => select(&entry.methods, |m| &m.info, name, scope).map(|m| m.map(Member::Method)),
    };

    match selected {
        Ok(Some(member)) => {
            trace!(owner = entry.name, %kind, member = name, "member located");
            Ok(MemberDescriptor { owner: entry, member })
        }
        Ok(None) => {
            trace!(owner = entry.name, %kind, member = name, "member not found");
            Err(ReflectError::NotFound {
                type_name: entry.name.to_string(),
                kind,
                member: name.to_string(),
            })
        }
        Err(candidates) => Err(ReflectError::AmbiguousMatch {
            type_name: entry.name.to_string(),
            kind,
            member: name.to_string(),
            candidates,
        }),
    }
}

/// Pick the single admitted candidate at the smallest depth.
///
/// `Err(n)` reports `n` equally good candidates.
fn select<'r, T>(
    candidates: &'r [T],
    info: impl Fn(&T) -> &MemberInfo,
    name: &str,
    scope: MemberScope,
) -> Result<Option<&'r T>, usize> {
    let mut best: Option<(u32, &'r T)> = None;
    let mut ties = 0;

    for candidate in candidates {
        let member = info(candidate);
        if name.is_empty() || member.name != name || !scope.admits(member.visibility, member.is_static, member.depth) {
            continue;
        }
        match best {
            Some((depth, _)) if depth < member.depth => {}
            Some((depth, _)) if depth == member.depth => ties += 1,
            _ => {
                best = Some((member.depth, candidate));
                ties = 0;
            }
        }
    }

    match best {
        Some(_) if ties > 0 => Err(ties + 1),
        Some((_, found)) => Ok(Some(found)),
        None => Ok(None),
    }
}
