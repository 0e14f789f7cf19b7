use reflector::prelude::*;

#[derive(Reflect)]
struct Node {
    pub id: u32,
}

#[derive(Reflect)]
struct Leaf {
    #[reflect(base)]
    node: Node,
    #[reflect(visibility = "protected")]
    pub weight: i16,
}

#[derive(Reflect)]
struct Root {
    #[reflect(base)]
    leaf: Leaf,
}

fn main() {
    let mut registry = TypeRegistry::new();
    registry.register::<Root>().unwrap();

    let reflector = Reflector::new(&registry);
    let id = reflector
        .get_field_accessor::<Root, u64>("id", MemberScope::DEFAULT)
        .unwrap()
        .unwrap();

    let mut root = Root {
        leaf: Leaf {
            node: Node { id: 4 },
            weight: -2,
        },
    };
    id.set(&mut root, 9);
    assert_eq!(root.leaf.node.id, 9);
    assert_eq!(root.leaf.weight, -2);
}
