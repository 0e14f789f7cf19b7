//! Static, bound and unbound access; inherited members and scope flags.

use std::sync::{Arc, LazyLock};

use reflector::prelude::*;

static SPAWNED: LazyLock<Shared<u32>> = LazyLock::new(|| shared(0));
static LIMIT: LazyLock<Shared<i64>> = LazyLock::new(|| shared(64));

#[derive(Reflect)]
struct Entity {
    pub id: u32,
    secret: u64,
}

struct Monster {
    entity: Entity,
    rage: f32,
}

impl Reflect for Monster {
    fn type_name() -> &'static str {
        "Monster"
    }
}

impl Describe for Monster {
    fn describe<'r, O: Reflect>(class: ClassBuilder<'r, O, Self>) -> Result<ClassBuilder<'r, O, Self>, RegistrationError> {
        class
            .inherit::<Entity>(|m: &Monster| &m.entity, |m: &mut Monster| &mut m.entity)?
            .field("rage", Visibility::Protected, |m: &Monster| &m.rage, |m: &mut Monster| &mut m.rage)?
            .static_field("spawned", Visibility::Public, Arc::clone(&SPAWNED))?
            .static_property(
                "limit",
                Visibility::Public,
                || *LIMIT.read(),
                |v: i64| *LIMIT.write() = v,
            )?
            .readonly_static_property("kind", Visibility::Public, || "monster".to_string())?
            .static_method("clamp_rage", Visibility::Public, |v: f32| v.clamp(0.0, 100.0))?
            .method("id_plus", Visibility::Public, |m: &Monster, n: u32| m.entity.id + n)
    }
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Entity>().unwrap();
    registry.register::<Monster>().unwrap();
    registry
}

fn monster() -> Monster {
    Monster {
        entity: Entity { id: 7, secret: 99 },
        rage: 12.5,
    }
}

// ============================================================================
// Static members
// ============================================================================

#[test]
fn static_field_reads_and_writes_the_shared_cell() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let spawned = reflector
        .get_bound_field_accessor::<Monster, u32>(&Binding::Static, "spawned", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    assert!(spawned.is_static());
    assert!(spawned.instance::<Monster>().is_none());
    spawned.set(3);
    assert_eq!(spawned.get(), 3);
    assert_eq!(*SPAWNED.read(), 3);
}

#[test]
fn static_property_round_trip() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let limit = reflector
        .get_bound_property_accessor::<Monster, i64>(&Binding::Static, "limit", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    let setter = limit.setter().unwrap();
    for x in [0, -1, i64::MAX] {
        setter.set(x);
        assert_eq!(limit.get(), x);
    }
}

#[test]
fn readonly_static_property() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let kind = reflector
        .get_bound_property_accessor::<Monster, String>(&Binding::Static, "kind", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();
    assert!(kind.is_read_only());
    assert_eq!(kind.get(), "monster");
}

#[test]
fn static_method_with_static_or_unbound_binding() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    type Clamp = dyn Fn(f32) -> f32 + Send + Sync;

    for binding in [Binding::<Monster>::Static, Binding::Unbound] {
        let clamp = reflector
            .get_method_delegate::<Clamp, Monster>(&binding, "clamp_rage", MemberScope::DEFAULT)
            .unwrap()
            .unwrap();
        assert_eq!(clamp(150.0), 100.0);
        assert_eq!(clamp(-3.0), 0.0);
        assert_eq!(clamp(42.0), 42.0);
    }
}

// ============================================================================
// Invalid bindings
// ============================================================================

fn assert_invalid_binding<T: std::fmt::Debug>(result: Result<T, ReflectError>) {
    match result {
        Err(ReflectError::InvalidBinding { .. }) => {}
        other => panic!("expected InvalidBinding, got {other:?}"),
    }
}

#[test]
fn static_method_cannot_be_bound() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    type Clamp = dyn Fn(f32) -> f32 + Send + Sync;
    let result = reflector.get_method_delegate::<Clamp, Monster>(&Binding::bind(monster()), "clamp_rage", MemberScope::DEFAULT);
    assert_invalid_binding(result.map(|d| d.is_some()));
}

#[test]
fn instance_method_needs_an_instance() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    type IdPlus = dyn Fn(u32) -> u32 + Send + Sync;

    for binding in [Binding::<Monster>::Static, Binding::Unbound] {
        let result = reflector.get_method_delegate::<IdPlus, Monster>(&binding, "id_plus", MemberScope::DEFAULT);
        assert_invalid_binding(result.map(|d| d.is_some()));
    }
}

#[test]
fn unbound_accessor_rejects_static_field() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    assert_invalid_binding(reflector.get_field_accessor::<Monster, u32>("spawned", MemberScope::DEFAULT));
}

#[test]
fn bound_instance_rejects_static_field() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    assert_invalid_binding(reflector.get_bound_field_accessor::<Monster, u32>(
        &Binding::bind(monster()),
        "spawned",
        MemberScope::DEFAULT,
    ));
}

#[test]
fn static_binding_rejects_instance_property() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    assert_invalid_binding(reflector.get_bound_field_accessor::<Monster, f32>(
        &Binding::Static,
        "rage",
        MemberScope::DEFAULT,
    ));
}

// ============================================================================
// Inheritance and scope
// ============================================================================

#[test]
fn inherited_field_reaches_through_the_base() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let id = reflector
        .get_field_accessor::<Monster, u32>("id", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    let mut m = monster();
    id.set(&mut m, 11);
    assert_eq!(m.entity.id, 11);
    assert_eq!(id.get(&m), 11);
}

#[test]
fn inherited_private_field_is_hidden() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    assert!(
        reflector
            .get_field_accessor::<Monster, u64>("secret", MemberScope::DEFAULT)
            .unwrap()
            .is_none()
    );
    assert!(
        reflector
            .get_field_accessor::<Entity, u64>("secret", MemberScope::DEFAULT)
            .unwrap()
            .is_some()
    );
}

#[test]
fn declared_only_hides_inherited_members() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let scope = MemberScope::DEFAULT | MemberScope::DECLARED_ONLY;
    assert!(
        reflector
            .get_field_accessor::<Monster, u32>("id", scope)
            .unwrap()
            .is_none()
    );
    assert!(
        reflector
            .get_field_accessor::<Monster, f32>("rage", scope)
            .unwrap()
            .is_some()
    );
}

#[test]
fn scope_without_non_public_hides_protected_field() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let scope = MemberScope::INSTANCE | MemberScope::PUBLIC;
    assert!(
        reflector
            .get_field_accessor::<Monster, f32>("rage", scope)
            .unwrap()
            .is_none()
    );
    assert!(
        reflector
            .get_field_accessor::<Monster, u32>("id", scope)
            .unwrap()
            .is_some()
    );
}

#[test]
fn instance_only_scope_hides_statics() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let scope = MemberScope::INSTANCE | MemberScope::PUBLIC | MemberScope::NON_PUBLIC;
    assert!(
        reflector
            .get_bound_field_accessor::<Monster, u32>(&Binding::Static, "spawned", scope)
            .unwrap()
            .is_none()
    );
}

struct Shape {
    sides: u8,
}

impl Reflect for Shape {
    fn type_name() -> &'static str {
        "Shape"
    }
}

impl Describe for Shape {
    fn describe<'r, O: Reflect>(class: ClassBuilder<'r, O, Self>) -> Result<ClassBuilder<'r, O, Self>, RegistrationError> {
        let scale = shared(1.0_f64);
        let read = Arc::clone(&scale);
        class
            .field("sides", Visibility::Public, |s: &Shape| &s.sides, |s: &mut Shape| &mut s.sides)?
            .static_field("count", Visibility::Public, shared(0_u32))?
            .static_property("scale", Visibility::Public, move || *read.read(), move |v: f64| *scale.write() = v)
    }
}

struct Circle {
    shape: Shape,
}

impl Reflect for Circle {
    fn type_name() -> &'static str {
        "Circle"
    }
}

impl Describe for Circle {
    fn describe<'r, O: Reflect>(class: ClassBuilder<'r, O, Self>) -> Result<ClassBuilder<'r, O, Self>, RegistrationError> {
        class.inherit::<Shape>(|c: &Circle| &c.shape, |c: &mut Circle| &mut c.shape)
    }
}

#[test]
fn inherited_static_field_is_the_declaring_types_field() {
    let mut registry = TypeRegistry::new();
    registry.register::<Shape>().unwrap();
    registry.register::<Circle>().unwrap();
    let reflector = Reflector::new(&registry);
    let flat = MemberScope::DEFAULT | MemberScope::FLATTEN_HIERARCHY;

    let derived = reflector
        .get_bound_field_accessor::<Circle, u32>(&Binding::Static, "count", flat)
        .unwrap()
        .unwrap();
    let base = reflector
        .get_bound_field_accessor::<Shape, u32>(&Binding::Static, "count", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    derived.set(7);
    assert_eq!(base.get(), 7);
    base.set(9);
    assert_eq!(derived.get(), 9);

    // Without flattening the inherited static is not visible.
    assert!(
        reflector
            .get_bound_field_accessor::<Circle, u32>(&Binding::Static, "count", MemberScope::DEFAULT)
            .unwrap()
            .is_none()
    );
}

#[test]
fn inherited_static_property_shares_storage_in_either_registration_order() {
    let mut registry = TypeRegistry::new();
    registry.register::<Circle>().unwrap();
    registry.register::<Shape>().unwrap();
    let reflector = Reflector::new(&registry);
    let flat = MemberScope::DEFAULT | MemberScope::FLATTEN_HIERARCHY;

    let base = reflector
        .get_bound_property_accessor::<Shape, f64>(&Binding::Static, "scale", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();
    let derived = reflector
        .get_bound_property_accessor::<Circle, f64>(&Binding::Static, "scale", flat)
        .unwrap()
        .unwrap();

    base.setter().unwrap().set(2.5);
    assert_eq!(derived.get(), 2.5);

    let sides = reflector
        .get_field_accessor::<Circle, u8>("sides", flat)
        .unwrap()
        .unwrap();
    let mut circle = Circle { shape: Shape { sides: 0 } };
    sides.set(&mut circle, 1);
    assert_eq!(circle.shape.sides, 1);
}

#[test]
fn bound_delegate_sees_later_writes() {
    let registry = registry();
    let reflector = Reflector::new(&registry);
    let instance = shared(monster());
    type IdPlus = dyn Fn(u32) -> u32 + Send + Sync;
    let id_plus = reflector
        .get_method_delegate::<IdPlus, Monster>(&Binding::Bound(instance.clone()), "id_plus", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    assert_eq!(id_plus(1), 8);
    instance.write().entity.id = 100;
    assert_eq!(id_plus(0), 100);
}
