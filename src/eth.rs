//! Ethereum conventions on top of the secp256k1 ECDSA core.
//!
//! This module implements the message and key formats used by the
//! Ethereum ecosystem:
//!
//!  - Keccak-256 hashing (the original Keccak padding, as used by
//!    Ethereum, NOT the later-standardized SHA-3 padding);
//!  - the "personal message" scheme, which prefixes free text with
//!    `"\x19Ethereum Signed Message:\n"` and the decimal message
//!    length before hashing, so that arbitrary user-supplied text can
//!    never collide with a well-formed structured payload on the
//!    signing path;
//!  - address derivation (the last 20 bytes of the Keccak-256 hash of
//!    the 64 coordinate bytes of the uncompressed public key);
//!  - `0x`-prefixed lowercase hexadecimal interfacing for private
//!    keys, public keys, signatures and addresses (input parsing is
//!    case-insensitive and accepts a missing prefix);
//!  - a demonstration transaction object, rendered as a key/value text
//!    blob and signed as a personal message. Nothing in this module
//!    ever encodes a real transaction, persists data, or talks to a
//!    network.
//!
//! Message-level signing is deterministic (RFC 6979 under the hood):
//! signing the same text with the same key always yields the same
//! 65-byte signature. Verification is a total predicate and never
//! fails with an error; recovery operations return typed errors.

use core::fmt;

use sha3::{Digest, Keccak256};

use crate::secp256k1::{PrivateKey, PublicKey, Signature};
use crate::Error;

#[cfg(feature = "alloc")]
use crate::String;

/// Computes the Keccak-256 hash of the provided bytes.
///
/// This is the Ethereum variant of Keccak (original padding), not the
/// NIST SHA-3 variant.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut sh = Keccak256::new();
    sh.update(data);
    sh.finalize().into()
}

/// Computes the digest of a "personal message".
///
/// The fixed prefix `"\x19Ethereum Signed Message:\n"`, followed by
/// the decimal byte length of the message, is prepended to the message
/// bytes before Keccak-256 hashing. The leading 0x19 byte makes the
/// hashed string an invalid RLP payload, so a signature obtained
/// through this scheme can never be replayed as a transaction
/// signature.
pub fn personal_message_digest(msg: &[u8]) -> [u8; 32] {
    let mut sh = Keccak256::new();
    sh.update(b"\x19Ethereum Signed Message:\n");

    // Decimal rendering of the message length.
    let mut buf = [0u8; 20];
    let mut k = buf.len();
    let mut n = msg.len();
    loop {
        k -= 1;
        buf[k] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    sh.update(&buf[k..]);
    sh.update(msg);
    sh.finalize().into()
}

/// An Ethereum address (20 bytes).
///
/// The address of a public key is derived deterministically: the
/// public key is serialized in uncompressed form, the leading 0x04
/// prefix byte is dropped, the remaining 64 bytes are hashed with
/// Keccak-256, and the last 20 bytes of the digest are the address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Address([u8; 20]);

impl Address {

    /// Derives the address of the provided public key.
    pub fn from_public_key(pk: &PublicKey) -> Self {
        let eu = pk.encode_uncompressed();
        let hv = keccak256(&eu[1..65]);
        let mut a = [0u8; 20];
        a.copy_from_slice(&hv[12..32]);
        Self(a)
    }

    /// Builds an address from its raw 20-byte value.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() != 20 {
            return Err(Error::InvalidAddress);
        }
        let mut a = [0u8; 20];
        a.copy_from_slice(buf);
        Ok(Self(a))
    }

    /// Returns the raw 20-byte value.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    /// Formats the address as `0x` followed by 40 lowercase
    /// hexadecimal digits (checksum casing is out of scope).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("0x")?;
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Signs free text as a personal message.
///
/// The message digest is computed with `personal_message_digest()`,
/// then signed deterministically. Identical (message, key) inputs
/// always produce the identical signature.
pub fn sign_message(msg: &[u8], sk: &PrivateKey) -> Signature {
    sk.sign_hash(&personal_message_digest(msg), &[])
}

/// Verifies a personal-message signature against a public key.
///
/// Total predicate: any malformed input yields `false`, never an
/// error.
pub fn verify_message(msg: &[u8], sig: &Signature, pk: &PublicKey) -> bool {
    pk.verify_hash(sig, &personal_message_digest(msg))
}

/// Recovers the public key that signed a personal message.
pub fn recover_signer(msg: &[u8], sig: &Signature)
    -> Result<PublicKey, Error>
{
    sig.recover_public_key(&personal_message_digest(msg))
}

/// Recovers the address that signed a personal message.
pub fn recover_address(msg: &[u8], sig: &Signature)
    -> Result<Address, Error>
{
    Ok(Address::from_public_key(&recover_signer(msg, sig)?))
}

// ========================================================================
// Hexadecimal interfacing. All producers emit `0x`-prefixed lowercase
// hex; all parsers accept upper or lower case, with or without the
// prefix, but enforce the exact expected length.

fn strip_hex_prefix(s: &str) -> &str {
    if s.len() >= 2 && (s.starts_with("0x") || s.starts_with("0X")) {
        &s[2..]
    } else {
        s
    }
}

/// Parses a private key from hexadecimal (64 digits).
pub fn private_key_from_hex(s: &str) -> Result<PrivateKey, Error> {
    let s = strip_hex_prefix(s);
    if s.len() != 64 {
        return Err(Error::InvalidPrivateKey);
    }
    let mut buf = [0u8; 32];
    hex::decode_to_slice(s, &mut buf)
        .map_err(|_| Error::InvalidPrivateKey)?;
    PrivateKey::decode(&buf).ok_or(Error::InvalidPrivateKey)
}

/// Parses a public key from hexadecimal: 66 digits for the compressed
/// form, 130 digits for the uncompressed form.
pub fn public_key_from_hex(s: &str) -> Result<PublicKey, Error> {
    let s = strip_hex_prefix(s);
    match s.len() {
        66 => {
            let mut buf = [0u8; 33];
            hex::decode_to_slice(s, &mut buf)
                .map_err(|_| Error::InvalidPublicKey)?;
            PublicKey::decode(&buf).ok_or(Error::InvalidPublicKey)
        }
        130 => {
            let mut buf = [0u8; 65];
            hex::decode_to_slice(s, &mut buf)
                .map_err(|_| Error::InvalidPublicKey)?;
            PublicKey::decode(&buf).ok_or(Error::InvalidPublicKey)
        }
        _ => Err(Error::InvalidPublicKey),
    }
}

/// Parses a 65-byte signature (`r || s || v`) from hexadecimal
/// (130 digits).
pub fn signature_from_hex(s: &str) -> Result<Signature, Error> {
    let s = strip_hex_prefix(s);
    if s.len() != 130 {
        return Err(Error::InvalidSignature);
    }
    let mut buf = [0u8; 65];
    hex::decode_to_slice(s, &mut buf)
        .map_err(|_| Error::InvalidSignature)?;
    Signature::decode(&buf).ok_or(Error::InvalidSignature)
}

/// Parses an address from hexadecimal (40 digits, case-insensitive).
pub fn address_from_hex(s: &str) -> Result<Address, Error> {
    let s = strip_hex_prefix(s);
    if s.len() != 40 {
        return Err(Error::InvalidAddress);
    }
    let mut buf = [0u8; 20];
    hex::decode_to_slice(s, &mut buf)
        .map_err(|_| Error::InvalidAddress)?;
    Address::from_bytes(&buf)
}

/// Formats a private key as `0x` + 64 lowercase hex digits.
#[cfg(feature = "alloc")]
pub fn private_key_to_hex(sk: &PrivateKey) -> String {
    let mut s = String::from("0x");
    s.push_str(&hex::encode(sk.encode()));
    s
}

/// Formats a public key as `0x` + 66 (compressed) or 130
/// (uncompressed) lowercase hex digits.
#[cfg(feature = "alloc")]
pub fn public_key_to_hex(pk: &PublicKey, compressed: bool) -> String {
    let mut s = String::from("0x");
    if compressed {
        s.push_str(&hex::encode(pk.encode_compressed()));
    } else {
        s.push_str(&hex::encode(pk.encode_uncompressed()));
    }
    s
}

/// Formats a signature as `0x` + 130 lowercase hex digits.
#[cfg(feature = "alloc")]
pub fn signature_to_hex(sig: &Signature) -> String {
    let mut s = String::from("0x");
    s.push_str(&hex::encode(sig.encode()));
    s
}

/// Formats an address as `0x` + 40 lowercase hex digits.
#[cfg(feature = "alloc")]
pub fn address_to_hex(addr: &Address) -> String {
    let mut s = String::from("0x");
    s.push_str(&hex::encode(addr.as_bytes()));
    s
}

// ========================================================================

/// A demonstration transaction object.
///
/// This is a display payload with the five classic fields, rendered as
/// a pretty-printed key/value blob and signed as a personal message.
/// It is NOT a real Ethereum transaction: there is no RLP encoding, no
/// chain id, and nothing is ever broadcast or persisted.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug)]
pub struct DemoTransaction {
    pub to: String,
    pub value: String,
    pub nonce: u64,
    pub gas_limit: String,
    pub gas_price: String,
}

#[cfg(feature = "alloc")]
impl DemoTransaction {

    /// Renders this transaction as a key/value text blob. The `value`
    /// field is suffixed with " ETH" and the `gasPrice` field with
    /// " Gwei", matching the usual demonstration display.
    pub fn render(&self) -> String {
        fn esc(s: &str) -> String {
            let mut r = String::new();
            for c in s.chars() {
                match c {
                    '"' => r.push_str("\\\""),
                    '\\' => r.push_str("\\\\"),
                    '\n' => r.push_str("\\n"),
                    _ => r.push(c),
                }
            }
            r
        }
        format!(
            "{{\n  \"to\": \"{}\",\n  \"value\": \"{} ETH\",\n  \
             \"nonce\": {},\n  \"gasLimit\": \"{}\",\n  \
             \"gasPrice\": \"{} Gwei\"\n}}",
            esc(&self.to), esc(&self.value), self.nonce,
            esc(&self.gas_limit), esc(&self.gas_price))
    }

    /// Signs the rendered transaction blob as a personal message.
    pub fn sign(&self, sk: &PrivateKey) -> Signature {
        sign_message(self.render().as_bytes(), sk)
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn keccak_vectors() {
        assert!(hex::encode(keccak256(b"")) ==
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
        assert!(hex::encode(keccak256(b"abc")) ==
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45");
    }

    #[test]
    fn personal_digest() {
        // The prefixed scheme is Keccak-256 over the prefix, the
        // decimal length, and the message bytes.
        assert!(personal_message_digest(b"Hello")
            == keccak256(b"\x19Ethereum Signed Message:\n5Hello"));

        // Multi-digit lengths.
        let msg = [0x61u8; 123];
        let mut full = std::vec::Vec::new();
        full.extend_from_slice(b"\x19Ethereum Signed Message:\n123");
        full.extend_from_slice(&msg);
        assert!(personal_message_digest(&msg) == keccak256(&full));

        // Empty message.
        assert!(personal_message_digest(b"")
            == keccak256(b"\x19Ethereum Signed Message:\n0"));
    }

    #[test]
    fn known_addresses() {
        let sk = private_key_from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000001")
            .unwrap();
        let addr = Address::from_public_key(&sk.to_public_key());
        assert!(format!("{}", addr)
            == "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert!(address_to_hex(&addr)
            == "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");

        let sk = private_key_from_hex(
            "0000000000000000000000000000000000000000000000000000000000000002")
            .unwrap();
        let addr = Address::from_public_key(&sk.to_public_key());
        assert!(format!("{}", addr)
            == "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf");
    }

    #[test]
    fn hex_codecs() {
        let sk = private_key_from_hex(
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
            .unwrap();
        assert!(private_key_to_hex(&sk)
            == "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318");

        // Prefix-less and uppercase inputs are accepted.
        let sk2 = private_key_from_hex(
            "4C0883A69102937D6231471B5DBB6204FE5129617082792AE468D01A3F362318")
            .unwrap();
        assert!(sk2.encode() == sk.encode());

        // Public key round-trips, both forms.
        let pk = sk.to_public_key();
        let pu = public_key_to_hex(&pk, false);
        assert!(pu.len() == 132 && pu.starts_with("0x04"));
        let pk2 = public_key_from_hex(&pu).unwrap();
        assert!(pk2.point.equals(pk.point) == 0xFFFFFFFF);
        let pc = public_key_to_hex(&pk, true);
        assert!(pc.len() == 68);
        let pk3 = public_key_from_hex(&pc).unwrap();
        assert!(pk3.point.equals(pk.point) == 0xFFFFFFFF);
        assert!(public_key_to_hex(&pk3, false) == pu);

        // Signature round-trip.
        let sig = sign_message(b"roundtrip", &sk);
        let sh = signature_to_hex(&sig);
        assert!(sh.len() == 132);
        let sig2 = signature_from_hex(&sh).unwrap();
        assert!(sig2.encode() == sig.encode());

        // Address round-trip.
        let addr = Address::from_public_key(&pk);
        let ah = address_to_hex(&addr);
        let addr2 = address_from_hex(&ah).unwrap();
        assert!(addr2 == addr);

        // Parse failures carry the entity-specific error kind.
        assert!(private_key_from_hex("0x12").unwrap_err()
            == Error::InvalidPrivateKey);
        assert!(private_key_from_hex(
            "0x00000000000000000000000000000000000000000000000000000000000000zz")
            .unwrap_err() == Error::InvalidPrivateKey);
        assert!(private_key_from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000000")
            .unwrap_err() == Error::InvalidPrivateKey);
        assert!(public_key_from_hex("0xabcd").unwrap_err()
            == Error::InvalidPublicKey);
        assert!(signature_from_hex("0x00").unwrap_err()
            == Error::InvalidSignature);
        assert!(address_from_hex("0x123").unwrap_err()
            == Error::InvalidAddress);
    }

    #[test]
    fn message_roundtrip() {
        let sk = private_key_from_hex(
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
            .unwrap();
        let pk = sk.to_public_key();
        let msg = b"ethsign test message";

        let sig = sign_message(msg, &sk);
        assert!(verify_message(msg, &sig, &pk));

        // Determinism at the message level.
        assert!(sign_message(msg, &sk).encode() == sig.encode());

        // Any change to the message breaks verification.
        assert!(!verify_message(b"ethsign test message.", &sig, &pk));
        assert!(!verify_message(b"", &sig, &pk));

        // Recovery returns the signer.
        let rk = recover_signer(msg, &sig).unwrap();
        assert!(rk.point.equals(pk.point) == 0xFFFFFFFF);
        assert!(recover_address(msg, &sig).unwrap()
            == Address::from_public_key(&pk));
    }

    #[test]
    fn empty_digest_signature() {
        // Signing the Keccak-256 digest of the empty byte string with
        // private key 1 verifies against its own public key; flipping
        // any single bit of the serialized signature makes it fail.
        let sk = private_key_from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000001")
            .unwrap();
        let pk = sk.to_public_key();
        let hv = keccak256(b"");
        let sig = sk.sign_hash(&hv, &[]);
        assert!(pk.verify_hash(&sig, &hv));
        let addr = Address::from_public_key(&pk);

        let eb = sig.encode();
        for i in 0..65 {
            for j in 0..8 {
                let mut bad = eb;
                bad[i] ^= 1u8 << j;
                match Signature::decode(&bad) {
                    None => { }
                    Some(s2) => {
                        if i < 64 {
                            assert!(!pk.verify_hash(&s2, &hv));
                        } else {
                            // A corrupted recovery byte must not
                            // recover the original signer.
                            match s2.recover_public_key(&hv) {
                                Ok(rk) => {
                                    let a2 = Address::from_public_key(&rk);
                                    assert!(a2 != addr);
                                }
                                Err(_) => { }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn demo_transaction() {
        let tx = DemoTransaction {
            to: String::from("0x2b5ad5c4795c026514f8317c7a215e218dccd6cf"),
            value: String::from("1.5"),
            nonce: 7,
            gas_limit: String::from("21000"),
            gas_price: String::from("30"),
        };
        let blob = tx.render();
        assert!(blob ==
            "{\n  \"to\": \"0x2b5ad5c4795c026514f8317c7a215e218dccd6cf\",\n  \
             \"value\": \"1.5 ETH\",\n  \"nonce\": 7,\n  \
             \"gasLimit\": \"21000\",\n  \"gasPrice\": \"30 Gwei\"\n}");

        let sk = private_key_from_hex(
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")
            .unwrap();
        let sig = tx.sign(&sk);
        assert!(verify_message(blob.as_bytes(), &sig,
            &sk.to_public_key()));
    }
}
