use reflector::prelude::*;

#[derive(Reflect)]
#[reflect(name = "Crate")]
pub struct Cargo {
    pub weight: f32,
    #[reflect(name = "label")]
    tag: String,
    #[reflect(skip)]
    _scratch: Vec<u8>,
}

fn main() {
    let mut registry = TypeRegistry::new();
    registry.register::<Cargo>().unwrap();

    let reflector = Reflector::new(&registry);
    let label = reflector
        .get_field_accessor::<Cargo, String>("label", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    let cargo = Cargo {
        weight: 1.5,
        tag: "fragile".to_string(),
        _scratch: Vec::new(),
    };
    assert_eq!(label.get(&cargo), "fragile");
    assert_eq!(cargo.weight, 1.5);
}
