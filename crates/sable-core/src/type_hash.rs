//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash identifying a host type, a member signature or a
//! generic instantiation. Hashes are computed from names and signatures, so a type
//! can be referenced before it is registered and the same name always yields the
//! same identity, whether the type came from the host or was synthesized mid-pass.
//!
//! # Examples
//!
//! ```
//! use sable_core::TypeHash;
//!
//! let a = TypeHash::from_name("System.IDisposable");
//! let b = TypeHash::from_name("System.IDisposable");
//! assert_eq!(a, b);
//!
//! let int_hash = TypeHash::from_name("int");
//! let long_hash = TypeHash::from_name("long");
//! assert_ne!(
//!     TypeHash::from_signature("invoke", &[int_hash]),
//!     TypeHash::from_signature("invoke", &[long_hash]),
//! );
//! ```

use std::fmt;

use xxhash_rust::const_xxh64;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant for path components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for owner-independent member signatures.
    pub const SIGNATURE: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for member hashes bound to a declaring type.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Parameter position mixing constants.
    /// Each parameter position gets a unique constant so parameter order matters.
    pub const PARAM_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x123456789abcdef0,
    ];
}

/// A deterministic 64-bit hash identifying a type or member signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a fully qualified type name.
    ///
    /// This is a `const fn` so well-known host types can be named as constants.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ const_xxh64::xxh64(name.as_bytes(), 0))
    }

    /// Create an owner-independent signature hash from a member name and
    /// parameter types.
    ///
    /// Two members with the same name and parameter types share a signature hash
    /// regardless of which type declares them; this is what override and
    /// implementation matching keys on.
    #[inline]
    pub fn from_signature(name: &str, param_hashes: &[TypeHash]) -> Self {
        mix_params(
            hash_constants::SIGNATURE ^ xxh64(name.as_bytes(), 0),
            param_hashes,
        )
    }

    /// Create a member hash bound to its declaring type.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        mix_params(
            hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0),
            param_hashes,
        )
    }

    /// Create a generic instance hash from a template hash and its type arguments.
    ///
    /// Argument order matters: `Invoker<int, long>` differs from `Invoker<long, int>`.
    #[inline]
    pub fn from_template_instance(template: TypeHash, args: &[TypeHash]) -> Self {
        mix_params(template.0, args)
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

fn mix_params(seed: u64, params: &[TypeHash]) -> TypeHash {
    let mut hash = seed;
    for (i, param) in params.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps the mix order-sensitive (XOR alone would commute)
        hash = hash
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(marker ^ param.0);
    }
    TypeHash(hash)
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

/// Well-known hashes for the host platform's built-in types.
pub mod primitives {
    use super::TypeHash;

    /// `void`
    pub const VOID: TypeHash = TypeHash::from_name("void");
    /// `bool`
    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    /// `byte` (unsigned 8-bit)
    pub const BYTE: TypeHash = TypeHash::from_name("byte");
    /// `sbyte` (signed 8-bit)
    pub const SBYTE: TypeHash = TypeHash::from_name("sbyte");
    /// `short`
    pub const INT16: TypeHash = TypeHash::from_name("short");
    /// `ushort`
    pub const UINT16: TypeHash = TypeHash::from_name("ushort");
    /// `int`
    pub const INT32: TypeHash = TypeHash::from_name("int");
    /// `uint`
    pub const UINT32: TypeHash = TypeHash::from_name("uint");
    /// `long`
    pub const INT64: TypeHash = TypeHash::from_name("long");
    /// `ulong`
    pub const UINT64: TypeHash = TypeHash::from_name("ulong");
    /// `char` (16-bit code unit)
    pub const CHAR: TypeHash = TypeHash::from_name("char");
    /// `float`
    pub const FLOAT: TypeHash = TypeHash::from_name("float");
    /// `double`
    pub const DOUBLE: TypeHash = TypeHash::from_name("double");
    /// `nint` (pointer-sized signed integer)
    pub const INTPTR: TypeHash = TypeHash::from_name("nint");
    /// `nuint` (pointer-sized unsigned integer)
    pub const UINTPTR: TypeHash = TypeHash::from_name("nuint");

    /// The platform root object type. Untyped values are typed as this.
    pub const OBJECT: TypeHash = TypeHash::from_name("object");
    /// `string`
    pub const STRING: TypeHash = TypeHash::from_name("string");
}
