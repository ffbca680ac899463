//! Ethsign is a self-contained implementation of the ECDSA signature
//! scheme over the secp256k1 elliptic curve, together with the Ethereum
//! conventions built on top of it (Keccak-256 hashing, personal-message
//! prefixing, recoverable 65-byte signatures, and address derivation).
//!
//! The field and scalar arithmetic, curve operations, deterministic
//! nonce generation (RFC 6979), signature verification and public-key
//! recovery are all implemented here; no external elliptic curve
//! library is involved. The implementation aims at being secure
//! (constant-time) but portable: no inline assembly is used. On x86-64
//! architectures, the `_addcarry_u64()` and `_subborrow_u64()`
//! intrinsics are used (from `core::arch::x86_64`); plain
//! implementations with no intrinsics are available for other targets.
//!
//! The base field (integers modulo the curve prime p) and the scalar
//! ring (integers modulo the curve order n) are implemented in the
//! `backend` module and re-exported by `field`. The curve itself, key
//! pairs and the ECDSA operations are in `secp256k1`. The Ethereum
//! conventions (digests, addresses, hex interfacing, message-level
//! signing) are in `eth`.
//!
//! # Usage
//!
//! The library is "mostly `no_std`". By default, it compiles against
//! the standard library. It can be compiled in `no_std` mode, in which
//! case all core functionality is still available; production of
//! hex strings and rendering of the demo transaction object require
//! the `alloc` feature.
//!
//! # Conventions
//!
//! All implemented functions are strictly constant-time, unless
//! explicitly documented otherwise (non-constant-time functions
//! normally have "vartime" in their name, and are used only on public
//! data such as signature verification inputs). In order to avoid
//! unwanted side-channel leaks, Booleans are avoided in secret-dependent
//! paths (compilers tend to "optimize" things a bit too eagerly when
//! handling `bool` values). All functions that return or use a
//! potentially secret Boolean value use the `u32` type; the convention
//! is that 0xFFFFFFFF means "true", and 0x00000000 means "false". No
//! other value shall be used, for they would lead to unpredictable
//! results. Similarly, the `Eq` or `PartialEq` traits are not
//! implemented on field elements, scalars or points.
//!
//! Algebraic operations on field elements, scalars and curve points are
//! performed with the usual operators (e.g. `+`); appropriate traits
//! are defined so that structure types and pointers to structure types
//! can be used more or less interchangeably. Throughout the code,
//! functions that modify the object on which they are called tend to
//! have a name in `set_*()` (e.g. for a curve point `P`, if we want to
//! compute the double of that point, then `P.set_double()` modifies the
//! point structure in place, while `P.double()` leaves `P` unmodified
//! and returns the double as a new structure instance).
//!
//! Operations that can fail on invalid inputs return typed errors (see
//! [`Error`]); the one deliberate exception is signature verification,
//! which is a total predicate: any malformed input yields `false`,
//! never an error or a panic.
//!
//! Randomness is never obtained from a hidden global source. Private
//! key generation takes a caller-provided generator implementing the
//! `CryptoRng + RngCore` traits (re-exported at the crate root), so
//! that tests can inject deterministic generators and applications can
//! choose their entropy source.

#![no_std]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
pub(crate) use alloc::string::String;

#[cfg(feature = "std")]
pub(crate) use std::string::String;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod backend;
pub mod field;
pub mod secp256k1;
pub mod eth;

mod error;
pub use error::Error;
