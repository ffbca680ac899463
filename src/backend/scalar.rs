//! Integers modulo the secp256k1 curve order
//! n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141.
//!
//! Same conventions as the base field: four 64-bit limbs in
//! little-endian order, partially reduced representation (any 256-bit
//! value), full reduction upon encoding. Since n = 2^256 - c for a
//! 129-bit constant c, products are reduced by folding the upper half:
//! 2^256 = c mod n.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::convert::TryFrom;

use super::{addcarry_u64, subborrow_u64, umull, umull_add, umull_add2, sgnw};
use crate::Error;

#[derive(Clone, Copy, Debug)]
pub struct Scalar([u64; 4]);

impl Scalar {

    // The curve order n in base 2^64 (low-to-high order).
    pub const MODULUS: [u64; 4] = [
        0xBFD25E8CD0364141,
        0xBAAEDCE6AF48A03B,
        0xFFFFFFFFFFFFFFFE,
        0xFFFFFFFFFFFFFFFF,
    ];

    // c = 2^256 - n = 0x14551231950B75FC4402DA1732FC9BEBF (129 bits);
    // its third limb is 1, its fourth is 0.
    const C0: u64 = 0x402DA1732FC9BEBF;
    const C1: u64 = 0x4551231950B75FC4;

    // (n-1)/2, used for the low-S policy check.
    const HALF_N: [u64; 4] = [
        0xDFE92F46681B20A0,
        0x5D576E7357A4501D,
        0xFFFFFFFFFFFFFFFF,
        0x7FFFFFFFFFFFFFFF,
    ];

    pub const ZERO: Scalar = Scalar([ 0, 0, 0, 0 ]);
    pub const ONE: Scalar = Scalar([ 1, 0, 0, 0 ]);

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the curve order) provided as four 64-bit limbs (in low-to-high order).
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the curve order) provided as four 64-bit limbs (in high-to-low order).
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    // Create an element by converting the provided integer.
    #[inline(always)]
    pub fn from_u32(x: u32) -> Self {
        Self([ x as u64, 0, 0, 0 ])
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        // 1. Addition with carry
        let (d0, cc) = addcarry_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = addcarry_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = addcarry_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = addcarry_u64(self.0[3], rhs.0[3], cc);

        // 2. In case of an output carry, subtract n (i.e. add c).
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & Self::C0, 0);
        let (d1, cc) = addcarry_u64(d1, w & Self::C1, cc);
        let (d2, cc) = addcarry_u64(d2, w & 1, cc);
        let (d3, cc) = addcarry_u64(d3, 0, cc);

        // 3. An extra carry triggers one more folding round; the value
        // is then small and a third round cannot happen.
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = addcarry_u64(d0, w & Self::C0, 0);
        let (d1, cc) = addcarry_u64(d1, w & Self::C1, cc);
        let (d2, cc) = addcarry_u64(d2, w & 1, cc);
        let (d3, _)  = addcarry_u64(d3, 0, cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        // 1. Subtraction with borrow
        let (d0, cc) = subborrow_u64(self.0[0], rhs.0[0], 0);
        let (d1, cc) = subborrow_u64(self.0[1], rhs.0[1], cc);
        let (d2, cc) = subborrow_u64(self.0[2], rhs.0[2], cc);
        let (d3, cc) = subborrow_u64(self.0[3], rhs.0[3], cc);

        // 2. In case of an output borrow, add n (i.e. subtract c).
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = subborrow_u64(d0, w & Self::C0, 0);
        let (d1, cc) = subborrow_u64(d1, w & Self::C1, cc);
        let (d2, cc) = subborrow_u64(d2, w & 1, cc);
        let (d3, cc) = subborrow_u64(d3, 0, cc);

        // 3. A second borrow triggers one more round; a third cannot
        // happen.
        let w = (cc as u64).wrapping_neg();
        let (d0, cc) = subborrow_u64(d0, w & Self::C0, 0);
        let (d1, cc) = subborrow_u64(d1, w & Self::C1, cc);
        let (d2, cc) = subborrow_u64(d2, w & 1, cc);
        let (d3, _)  = subborrow_u64(d3, 0, cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        // 1. Compute n - self over 256 bits.
        let (d0, cc) = subborrow_u64(Self::MODULUS[0], self.0[0], 0);
        let (d1, cc) = subborrow_u64(Self::MODULUS[1], self.0[1], cc);
        let (d2, cc) = subborrow_u64(Self::MODULUS[2], self.0[2], cc);
        let (d3, cc) = subborrow_u64(Self::MODULUS[3], self.0[3], cc);

        // 2. If the result is negative, add back n (i.e. subtract c).
        let e = (cc as u64).wrapping_neg();
        let (d0, cc) = subborrow_u64(d0, e & Self::C0, 0);
        let (d1, cc) = subborrow_u64(d1, e & Self::C1, cc);
        let (d2, cc) = subborrow_u64(d2, e & 1, cc);
        let (d3, _)  = subborrow_u64(d3, 0, cc);

        self.0 = [ d0, d1, d2, d3 ];
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        self.0[0] ^= cw & (self.0[0] ^ a.0[0]);
        self.0[1] ^= cw & (self.0[1] ^ a.0[1]);
        self.0[2] ^= cw & (self.0[2] ^ a.0[2]);
        self.0[3] ^= cw & (self.0[3] ^ a.0[3]);
    }

    // Return a value equal to either a0 (if ctl == 0) or a1 (if
    // ctl == 0xFFFFFFFF). Value ctl MUST be either 0 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    // One folding round: interpret e as an up-to-512-bit value (8 limbs,
    // little-endian) and replace the upper half with its contribution
    // modulo n (2^256 = c mod n, c = C0 + C1*2^64 + 2^128). The output
    // occupies at most seven limbs.
    fn fold512(e: [u64; 8]) -> [u64; 8] {
        let [e0, e1, e2, e3, e4, e5, e6, e7] = e;

        // a = lo + hi*C0
        let (a0, t) = umull_add(e4, Self::C0, e0);
        let (a1, t) = umull_add2(e5, Self::C0, e1, t);
        let (a2, t) = umull_add2(e6, Self::C0, e2, t);
        let (a3, t) = umull_add2(e7, Self::C0, e3, t);
        let a4 = t;

        // a += hi*C1, shifted by one limb
        let (a1, t) = umull_add(e4, Self::C1, a1);
        let (a2, t) = umull_add2(e5, Self::C1, a2, t);
        let (a3, t) = umull_add2(e6, Self::C1, a3, t);
        let (a4, a5) = umull_add2(e7, Self::C1, a4, t);

        // a += hi, shifted by two limbs (the 2^128 term of c)
        let (a2, cc) = addcarry_u64(a2, e4, 0);
        let (a3, cc) = addcarry_u64(a3, e5, cc);
        let (a4, cc) = addcarry_u64(a4, e6, cc);
        let (a5, cc) = addcarry_u64(a5, e7, cc);
        let a6 = cc as u64;

        [ a0, a1, a2, a3, a4, a5, a6, 0 ]
    }

    // Reduce a 512-bit intermediate value (8 limbs, little-endian
    // order) into a (partially reduced) element. Three folding rounds
    // bring the value below 2^256 + 2^133; a final conditional fold
    // absorbs the remaining carry.
    fn reduce512(e: [u64; 8]) -> [u64; 4] {
        let e = Self::fold512(e);
        let e = Self::fold512(e);
        let e = Self::fold512(e);
        let [e0, e1, e2, e3, e4, _, _, _] = e;

        // e4 is 0 or 1 at this point.
        let w = e4.wrapping_neg();
        let (d0, cc) = addcarry_u64(e0, w & Self::C0, 0);
        let (d1, cc) = addcarry_u64(e1, w & Self::C1, cc);
        let (d2, cc) = addcarry_u64(e2, w & 1, cc);
        let (d3, _)  = addcarry_u64(e3, 0, cc);

        [ d0, d1, d2, d3 ]
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        let (a0, a1, a2, a3) = (self.0[0], self.0[1], self.0[2], self.0[3]);
        let (b0, b1, b2, b3) = (rhs.0[0], rhs.0[1], rhs.0[2], rhs.0[3]);

        // Product -> 512 bits (schoolbook, row by row).
        let (e0, t) = umull(a0, b0);
        let (e1, t) = umull_add(a0, b1, t);
        let (e2, t) = umull_add(a0, b2, t);
        let (e3, e4) = umull_add(a0, b3, t);

        let (e1, t) = umull_add(a1, b0, e1);
        let (e2, t) = umull_add2(a1, b1, e2, t);
        let (e3, t) = umull_add2(a1, b2, e3, t);
        let (e4, e5) = umull_add2(a1, b3, e4, t);

        let (e2, t) = umull_add(a2, b0, e2);
        let (e3, t) = umull_add2(a2, b1, e3, t);
        let (e4, t) = umull_add2(a2, b2, e4, t);
        let (e5, e6) = umull_add2(a2, b3, e5, t);

        let (e3, t) = umull_add(a3, b0, e3);
        let (e4, t) = umull_add2(a3, b1, e4, t);
        let (e5, t) = umull_add2(a3, b2, e5, t);
        let (e6, e7) = umull_add2(a3, b3, e6, t);

        self.0 = Self::reduce512([ e0, e1, e2, e3, e4, e5, e6, e7 ]);
    }

    // Square this value (in place).
    #[inline(always)]
    pub fn set_square(&mut self) {
        let (a0, a1, a2, a3) = (self.0[0], self.0[1], self.0[2], self.0[3]);

        // 1. Non-square products; the intermediate value fits on e1..e6.
        let (e1, e2) = umull(a0, a1);
        let (e3, e4) = umull(a0, a3);
        let (e5, e6) = umull(a2, a3);
        let (lo, hi) = umull(a0, a2);
        let (e2, cc) = addcarry_u64(e2, lo, 0);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a1, a3);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (e6, _)  = addcarry_u64(e6, 0, cc);
        let (lo, hi) = umull(a1, a2);
        let (e3, cc) = addcarry_u64(e3, lo, 0);
        let (e4, cc) = addcarry_u64(e4, hi, cc);
        let (e5, cc) = addcarry_u64(e5, 0, cc);
        let (e6, _)  = addcarry_u64(e6, 0, cc);

        // 2. Double the intermediate value, then add the squares.
        let e7 = e6 >> 63;
        let e6 = (e6 << 1) | (e5 >> 63);
        let e5 = (e5 << 1) | (e4 >> 63);
        let e4 = (e4 << 1) | (e3 >> 63);
        let e3 = (e3 << 1) | (e2 >> 63);
        let e2 = (e2 << 1) | (e1 >> 63);
        let e1 = e1 << 1;

        let (e0, hi) = umull(a0, a0);
        let (e1, cc) = addcarry_u64(e1, hi, 0);
        let (lo, hi) = umull(a1, a1);
        let (e2, cc) = addcarry_u64(e2, lo, cc);
        let (e3, cc) = addcarry_u64(e3, hi, cc);
        let (lo, hi) = umull(a2, a2);
        let (e4, cc) = addcarry_u64(e4, lo, cc);
        let (e5, cc) = addcarry_u64(e5, hi, cc);
        let (lo, hi) = umull(a3, a3);
        let (e6, cc) = addcarry_u64(e6, lo, cc);
        let (e7, _)  = addcarry_u64(e7, hi, cc);

        self.0 = Self::reduce512([ e0, e1, e2, e3, e4, e5, e6, e7 ]);
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    // Square this value n times (in place).
    #[inline(always)]
    fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    // Ensure that the internal encoding of this value is in the 0..n-1
    // range.
    #[inline]
    fn set_normalized(&mut self) {
        // Add c = 2^256 - n; if that carries out, then the source value
        // was not canonical and the sum (mod 2^256) is the reduction.
        let (d0, cc) = addcarry_u64(self.0[0], Self::C0, 0);
        let (d1, cc) = addcarry_u64(self.0[1], Self::C1, cc);
        let (d2, cc) = addcarry_u64(self.0[2], 1, cc);
        let (d3, cc) = addcarry_u64(self.0[3], 0, cc);
        let m = (cc as u32).wrapping_neg();
        self.set_cond(&Self([ d0, d1, d2, d3 ]), m);
    }

    // Invert this value (in place); the inverse of zero is (formally)
    // zero. Since n is prime, the inverse is a modular exponentiation
    // with exponent n - 2 (Fermat's little theorem), performed with a
    // 4-bit window. The exponent is public, so the fixed indexing
    // pattern leaks nothing about the operand.
    fn set_invert(&mut self) {
        // n - 2
        const EXP: [u64; 4] = [
            0xBFD25E8CD036413F,
            0xBAAEDCE6AF48A03B,
            0xFFFFFFFFFFFFFFFE,
            0xFFFFFFFFFFFFFFFF,
        ];

        let x = *self;
        let mut win = [Self::ONE; 16];
        win[1] = x;
        for i in 2..16 {
            win[i] = win[i - 1] * x;
        }
        let mut r = win[(EXP[3] >> 60) as usize];
        for i in (0..63).rev() {
            let d = ((EXP[i >> 4] >> ((i & 15) << 2)) & 15) as usize;
            r = r.xsquare(4);
            r *= win[d];
        }
        *self = r;
    }

    // Invert this value; the inverse of zero is (formally) zero.
    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    /// Invert this value; inverting zero is reported as an error
    /// (`Error::InvalidOperand`).
    pub fn try_invert(self) -> Result<Self, Error> {
        if self.iszero() != 0 {
            return Err(Error::InvalidOperand);
        }
        Ok(self.invert())
    }

    #[inline(always)]
    fn set_div(&mut self, rhs: &Self) {
        self.set_mul(&rhs.invert());
    }

    // Check whether this value, once normalized, is greater than
    // (n-1)/2 (constant-time). Returned value is 0xFFFFFFFF for a
    // "high" value, 0 otherwise. ECDSA signatures in canonical (low-S)
    // form never carry a high s.
    pub fn is_high(self) -> u32 {
        let mut t = self;
        t.set_normalized();
        let (_, cc) = subborrow_u64(Self::HALF_N[0], t.0[0], 0);
        let (_, cc) = subborrow_u64(Self::HALF_N[1], t.0[1], cc);
        let (_, cc) = subborrow_u64(Self::HALF_N[2], t.0[2], cc);
        let (_, cc) = subborrow_u64(Self::HALF_N[3], t.0[3], cc);
        (cc as u32).wrapping_neg()
    }

    // Equality check between two scalars (constant-time); returned
    // value is 0xFFFFFFFF on equality, 0 otherwise.
    #[inline(always)]
    pub fn equals(self, rhs: Self) -> u32 {
        (self - rhs).iszero()
    }

    // Compare this value with zero (constant-time); returned value
    // is 0xFFFFFFFF if this scalar is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        // The two possible internal representations of 0 are 0 and n.
        let t = self.0[0] | self.0[1] | self.0[2] | self.0[3];
        let u = (self.0[0] ^ Self::MODULUS[0])
            | (self.0[1] ^ Self::MODULUS[1])
            | (self.0[2] ^ Self::MODULUS[2])
            | (self.0[3] ^ Self::MODULUS[3]);
        let r = sgnw(t | t.wrapping_neg()) & sgnw(u | u.wrapping_neg());
        (!r) as u32
    }

    // Encode this value over exactly 32 bytes (unsigned little-endian
    // convention; the value is fully reduced).
    pub fn encode(self) -> [u8; 32] {
        let mut r = self;
        r.set_normalized();
        let mut d = [0u8; 32];
        d[ 0.. 8].copy_from_slice(&r.0[0].to_le_bytes());
        d[ 8..16].copy_from_slice(&r.0[1].to_le_bytes());
        d[16..24].copy_from_slice(&r.0[2].to_le_bytes());
        d[24..32].copy_from_slice(&r.0[3].to_le_bytes());
        d
    }

    // Decode exactly 32 bytes (unsigned little-endian). Returned values
    // are the scalar and 0xFFFFFFFF on success; if the source slice
    // does not have length exactly 32 bytes, or if the value is not
    // canonical (not lower than n), then the scalar is zero and the
    // second returned value is 0.
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        if buf.len() != 32 {
            return (Self::ZERO, 0);
        }
        let mut r = Self(dec64x4le(buf));

        // Add c and keep only the carry: a carry means that the value
        // was not canonical.
        let (_, cc) = addcarry_u64(r.0[0], Self::C0, 0);
        let (_, cc) = addcarry_u64(r.0[1], Self::C1, cc);
        let (_, cc) = addcarry_u64(r.0[2], 1, cc);
        let (_, cc) = addcarry_u64(r.0[3], 0, cc);
        let m = (cc as u32).wrapping_neg();
        r.set_cond(&Self::ZERO, m);
        (r, !m)
    }

    // Decode a value from bytes (unsigned little-endian, arbitrary
    // length), with implicit reduction modulo n.
    pub fn set_decode_reduce(&mut self, buf: &[u8]) {
        *self = Self::ZERO;
        let n = buf.len();
        if n == 0 {
            return;
        }

        // Process the most significant (possibly partial) 32-byte chunk
        // first, then fold in full chunks going down.
        let mut k = n - (((n - 1) & 31) + 1);
        let mut tmp = [0u8; 32];
        tmp[..(n - k)].copy_from_slice(&buf[k..]);
        let mut acc = Self(dec64x4le(&tmp));
        while k > 0 {
            k -= 32;
            let c = dec64x4le(&buf[k..k + 32]);
            acc.0 = Self::reduce512([
                c[0], c[1], c[2], c[3],
                acc.0[0], acc.0[1], acc.0[2], acc.0[3],
            ]);
        }
        *self = acc;
    }

    // Decode a value from bytes (unsigned little-endian, arbitrary
    // length), with implicit reduction modulo n.
    #[inline(always)]
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut r = Self::ZERO;
        r.set_decode_reduce(buf);
        r
    }
}

// Decode 32 little-endian bytes into four 64-bit limbs. The source
// slice MUST have length at least 32.
#[inline(always)]
fn dec64x4le(buf: &[u8]) -> [u64; 4] {
    [
        u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[ 0.. 8]).unwrap()),
        u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[ 8..16]).unwrap()),
        u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[16..24]).unwrap()),
        u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[24..32]).unwrap()),
    ]
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn add(self, other: Scalar) -> Scalar {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn add(self, other: &Scalar) -> Scalar {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn add(self, other: Scalar) -> Scalar {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn add(self, other: &Scalar) -> Scalar {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<Scalar> for Scalar {
    #[inline(always)]
    fn add_assign(&mut self, other: Scalar) {
        self.set_add(&other);
    }
}

impl AddAssign<&Scalar> for Scalar {
    #[inline(always)]
    fn add_assign(&mut self, other: &Scalar) {
        self.set_add(other);
    }
}

impl Div<Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn div(self, other: Scalar) -> Scalar {
        let mut r = self;
        r.set_div(&other);
        r
    }
}

impl Div<&Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn div(self, other: &Scalar) -> Scalar {
        let mut r = self;
        r.set_div(other);
        r
    }
}

impl Div<Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn div(self, other: Scalar) -> Scalar {
        let mut r = *self;
        r.set_div(&other);
        r
    }
}

impl Div<&Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn div(self, other: &Scalar) -> Scalar {
        let mut r = *self;
        r.set_div(other);
        r
    }
}

impl DivAssign<Scalar> for Scalar {
    #[inline(always)]
    fn div_assign(&mut self, other: Scalar) {
        self.set_div(&other);
    }
}

impl DivAssign<&Scalar> for Scalar {
    #[inline(always)]
    fn div_assign(&mut self, other: &Scalar) {
        self.set_div(other);
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Scalar {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Scalar {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Scalar {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Scalar {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<Scalar> for Scalar {
    #[inline(always)]
    fn mul_assign(&mut self, other: Scalar) {
        self.set_mul(&other);
    }
}

impl MulAssign<&Scalar> for Scalar {
    #[inline(always)]
    fn mul_assign(&mut self, other: &Scalar) {
        self.set_mul(other);
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn neg(self) -> Scalar {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn neg(self) -> Scalar {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn sub(self, other: Scalar) -> Scalar {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Scalar> for Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn sub(self, other: &Scalar) -> Scalar {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn sub(self, other: Scalar) -> Scalar {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Scalar> for &Scalar {
    type Output = Scalar;

    #[inline(always)]
    fn sub(self, other: &Scalar) -> Scalar {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<Scalar> for Scalar {
    #[inline(always)]
    fn sub_assign(&mut self, other: Scalar) {
        self.set_sub(&other);
    }
}

impl SubAssign<&Scalar> for Scalar {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Scalar) {
        self.set_sub(other);
    }
}

// ========================================================================
