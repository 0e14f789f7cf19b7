//! Conversion rules between declared and requested types.
//!
//! - Any type converts to itself (same `TypeId`).
//! - Numeric primitives convert to every other numeric primitive. The
//!   conversion is classified and costed so callers can tell a widening
//!   from a truncating cast.
//! - `bool`, `void` and object types convert by identity only.
//!
//! The [`ConversionPolicy`] then filters which classified conversions are
//! allowed.

use reflector_core::{DataType, PrimitiveKind};

use crate::ConversionPolicy;

/// A permitted conversion and its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub kind: ConversionKind,
    pub cost: u32,
    /// Every source value survives the conversion unchanged.
    pub is_lossless: bool,
}

/// How a value is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    Identity,
    /// Integer to a wider integer that holds every source value.
    Widening,
    /// Integer to a narrower or differently signed integer (truncating).
    Narrowing,
    /// Same width, different signedness.
    SignChange,
    IntToFloat,
    FloatToInt,
    FloatWidening,
    FloatNarrowing,
}

impl Conversion {
    pub const COST_IDENTITY: u32 = 0;
    pub const COST_PRIMITIVE_WIDENING: u32 = 4;
    pub const COST_PRIMITIVE_NARROWING: u32 = 5;
    pub const COST_SIGNED_TO_UNSIGNED: u32 = 6;
    pub const COST_UNSIGNED_TO_SIGNED: u32 = 7;
    pub const COST_INT_TO_FLOAT: u32 = 8;
    pub const COST_FLOAT_TO_INT: u32 = 9;

    const fn new(kind: ConversionKind, cost: u32, is_lossless: bool) -> Self {
        Conversion {
            kind,
            cost,
            is_lossless,
        }
    }

    pub const fn identity() -> Self {
        Conversion::new(ConversionKind::Identity, Conversion::COST_IDENTITY, true)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.kind == ConversionKind::Identity
    }
}

impl ConversionPolicy {
    pub fn permits(self, conversion: &Conversion) -> bool {
        match self {
            ConversionPolicy::Numeric => true,
            ConversionPolicy::Lossless => conversion.is_lossless,
            ConversionPolicy::Exact => conversion.is_identity(),
        }
    }
}

/// Find the conversion from `source` to `target` allowed by `policy`.
pub fn find_conversion(source: &DataType, target: &DataType, policy: ConversionPolicy) -> Option<Conversion> {
    if source.is_same(target) {
        return Some(Conversion::identity());
    }

    let (Some(from), Some(to)) = (source.primitive, target.primitive) else {
        return None;
    };

    find_primitive_conversion(from, to).filter(|conversion| policy.permits(conversion))
}

/// Find primitive type conversion.
pub fn find_primitive_conversion(from: PrimitiveKind, to: PrimitiveKind) -> Option<Conversion> {
    if from == to {
        return Some(Conversion::identity());
    }

    // bool and void only convert to themselves
    if !from.is_numeric() || !to.is_numeric() {
        return None;
    }

    if is_integer_widening(from, to) {
        return Some(Conversion::new(
            ConversionKind::Widening,
            Conversion::COST_PRIMITIVE_WIDENING,
            true,
        ));
    }

    if from.is_integer() && to.is_integer() && from.bits() == to.bits() {
        let cost = if from.is_signed() {
            Conversion::COST_SIGNED_TO_UNSIGNED
        } else {
            Conversion::COST_UNSIGNED_TO_SIGNED
        };
        return Some(Conversion::new(ConversionKind::SignChange, cost, false));
    }

    if from.is_integer() && to.is_integer() {
        // Narrower target, or signed into a wider unsigned
        return Some(Conversion::new(
            ConversionKind::Narrowing,
            Conversion::COST_PRIMITIVE_NARROWING,
            false,
        ));
    }

    if from.is_integer() && to.is_float() {
        return Some(Conversion::new(
            ConversionKind::IntToFloat,
            Conversion::COST_INT_TO_FLOAT,
            is_exact_in_float(from, to),
        ));
    }

    if from.is_float() && to.is_integer() {
        return Some(Conversion::new(
            ConversionKind::FloatToInt,
            Conversion::COST_FLOAT_TO_INT,
            false,
        ));
    }

    match (from, to) {
        (PrimitiveKind::Float, PrimitiveKind::Double) => Some(Conversion::new(
            ConversionKind::FloatWidening,
            Conversion::COST_PRIMITIVE_WIDENING,
            true,
        )),
        (PrimitiveKind::Double, PrimitiveKind::Float) => Some(Conversion::new(
            ConversionKind::FloatNarrowing,
            Conversion::COST_PRIMITIVE_NARROWING,
            false,
        )),
        _ => None,
    }
}

/// Same signedness into more bits, or unsigned into a strictly wider signed.
fn is_integer_widening(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    if !from.is_integer() || !to.is_integer() || to.bits() <= from.bits() {
        return false;
    }
    from.is_signed() == to.is_signed() || (from.is_unsigned() && to.is_signed())
}

/// Integers whose whole range fits the float's mantissa.
fn is_exact_in_float(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    let mantissa = match to {
        PrimitiveKind::Float => 24,
        _ => 53,
    };
    let magnitude_bits = if from.is_signed() { from.bits() - 1 } else { from.bits() };
    magnitude_bits <= mantissa
}

#[cfg(test)]
mod tests {
    use super::*;
    use PrimitiveKind::*;

    #[test]
    fn identity_for_any_type() {
        let string = DataType::of::<String>();
        let conversion = find_conversion(&string, &string, ConversionPolicy::Exact).unwrap();
        assert!(conversion.is_identity());
        assert_eq!(conversion.cost, Conversion::COST_IDENTITY);
    }

    #[test]
    fn objects_do_not_convert() {
        assert!(find_conversion(&DataType::of::<String>(), &DataType::of::<Vec<u8>>(), ConversionPolicy::Numeric).is_none());
        assert!(find_conversion(&DataType::of::<String>(), &DataType::of::<i32>(), ConversionPolicy::Numeric).is_none());
        assert!(find_conversion(&DataType::of::<i32>(), &DataType::of::<String>(), ConversionPolicy::Numeric).is_none());
    }

    #[test]
    fn integer_widening() {
        for (from, to) in [(Int8, Int64), (Int32, Int64), (Uint8, Uint16), (Uint32, Int64), (Uint16, Int32)] {
            let c = find_primitive_conversion(from, to).unwrap();
            assert_eq!(c.kind, ConversionKind::Widening, "{from} -> {to}");
            assert!(c.is_lossless);
        }
    }

    #[test]
    fn integer_narrowing_and_cross_sign() {
        for (from, to) in [(Int64, Int32), (Uint16, Uint8), (Int8, Uint32), (Uint64, Int32)] {
            let c = find_primitive_conversion(from, to).unwrap();
            assert_eq!(c.kind, ConversionKind::Narrowing, "{from} -> {to}");
            assert!(!c.is_lossless);
        }
    }

    #[test]
    fn sign_change_costs() {
        let to_unsigned = find_primitive_conversion(Int32, Uint32).unwrap();
        let to_signed = find_primitive_conversion(Uint32, Int32).unwrap();
        assert_eq!(to_unsigned.kind, ConversionKind::SignChange);
        assert_eq!(to_unsigned.cost, Conversion::COST_SIGNED_TO_UNSIGNED);
        assert_eq!(to_signed.cost, Conversion::COST_UNSIGNED_TO_SIGNED);
    }

    #[test]
    fn int_float_conversions() {
        assert!(find_primitive_conversion(Int32, Double).unwrap().is_lossless);
        assert!(find_primitive_conversion(Int16, Float).unwrap().is_lossless);
        assert!(!find_primitive_conversion(Int32, Float).unwrap().is_lossless);
        assert!(!find_primitive_conversion(Int64, Double).unwrap().is_lossless);
        assert_eq!(find_primitive_conversion(Double, Int8).unwrap().kind, ConversionKind::FloatToInt);
        assert_eq!(find_primitive_conversion(Float, Double).unwrap().kind, ConversionKind::FloatWidening);
        assert_eq!(find_primitive_conversion(Double, Float).unwrap().kind, ConversionKind::FloatNarrowing);
    }

    #[test]
    fn bool_and_void_are_identity_only() {
        assert!(find_primitive_conversion(Bool, Int32).is_none());
        assert!(find_primitive_conversion(Int32, Bool).is_none());
        assert!(find_primitive_conversion(Void, Int32).is_none());
        assert!(find_primitive_conversion(Bool, Bool).unwrap().is_identity());
    }

    #[test]
    fn policies_filter() {
        let int = DataType::of::<i32>();
        let long = DataType::of::<i64>();

        assert!(find_conversion(&long, &int, ConversionPolicy::Numeric).is_some());
        assert!(find_conversion(&long, &int, ConversionPolicy::Lossless).is_none());
        assert!(find_conversion(&int, &long, ConversionPolicy::Lossless).is_some());
        assert!(find_conversion(&int, &long, ConversionPolicy::Exact).is_none());
    }
}
