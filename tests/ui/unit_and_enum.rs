use reflector::Reflect;

#[derive(Reflect)]
struct Unit;

#[derive(Reflect)]
struct Pair(i32, i32);

#[derive(Reflect)]
enum Signal {
    Red,
    Green,
}

fn main() {
    let _ = (Unit, Pair(1, 2), Signal::Red, Signal::Green);
    assert_eq!(<Unit as reflector::Reflect>::type_name(), "Unit");
    assert_eq!(<Pair as reflector::Reflect>::type_name(), "Pair");
    assert_eq!(<Signal as reflector::Reflect>::type_name(), "Signal");
}
