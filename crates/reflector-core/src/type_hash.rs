//! Deterministic hash-based identity for types and members.
//!
//! [`TypeHash`] is a 64-bit hash computed from a type name, or from an owner
//! hash plus a member name. Hashes are stable across runs, so a registry can
//! be keyed by them and a lookup never needs a secondary name index.
//!
//! # Examples
//!
//! ```
//! use reflector_core::TypeHash;
//!
//! let player = TypeHash::from_name("Player");
//! assert_eq!(player, TypeHash::from_name("Player"));
//!
//! // Members of different kinds never collide, even with the same name.
//! let field = TypeHash::from_field(player, "health");
//! let property = TypeHash::from_property(player, "health");
//! assert_ne!(field, property);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain mixing constants.
///
/// Each kind of entity hashes into its own domain so a type and a member
/// that share a name still get distinct hashes.
pub mod hash_constants {
    /// Separator constant used when folding parameters into a hash.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for field hashes.
    pub const FIELD: u64 = 0x63d1a7c2e94b0f18;

    /// Domain marker for property hashes.
    pub const PROPERTY: u64 = 0x1b7e4f90c3a25d66;

    /// Domain marker for method hashes.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Per-position mixing constants so parameter order matters.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];
}

/// A deterministic 64-bit hash identifying a type or one of its members.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create the hash of a field declared on `owner`.
    #[inline]
    pub fn from_field(owner: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::FIELD ^ owner.0.rotate_left(17) ^ xxh64(name.as_bytes(), 0))
    }

    /// Create the hash of a property declared on `owner`.
    #[inline]
    pub fn from_property(owner: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::PROPERTY ^ owner.0.rotate_left(17) ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from its owner, name and parameter type hashes.
    ///
    /// Parameter order matters: `(int, float)` and `(float, int)` hash
    /// differently, so overloads get distinct identities.
    ///
    /// ```
    /// use reflector_core::TypeHash;
    ///
    /// let owner = TypeHash::from_name("Calculator");
    /// let int = TypeHash::from_name("int");
    /// let float = TypeHash::from_name("float");
    ///
    /// let a = TypeHash::from_method(owner, "sum", &[int, float]);
    /// let b = TypeHash::from_method(owner, "sum", &[float, int]);
    /// assert_ne!(a, b);
    /// ```
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let mut hash = hash_constants::METHOD ^ owner.0.rotate_left(17) ^ xxh64(name.as_bytes(), 0);
        for (i, param) in param_hashes.iter().enumerate() {
            let marker = hash_constants::PARAM_MARKERS
                .get(i)
                .copied()
                .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
            // wrapping_mul keeps the fold order-sensitive
            hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ param.0);
        }
        TypeHash(hash)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
