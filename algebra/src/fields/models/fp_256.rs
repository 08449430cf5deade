use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use std::{
    cmp::{Ord, Ordering, PartialOrd},
    fmt::{Display, Formatter, Result as FmtResult},
    io::{Error as IoError, ErrorKind, Read, Result as IoResult, Write},
    marker::PhantomData,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use unroll::unroll_for_loops;

use crate::{
    biginteger::{arithmetic as fa, BigInteger as _BigInteger, BigInteger256 as BigInteger},
    bytes::{FromBytes, ToBytes},
    fields::{Field, FpParameters, LegendreSymbol, MontgomeryBackend, PrimeField, SquareRootField},
};

pub trait Fp256Parameters: FpParameters<BigInt = BigInteger> {}

/// An element of the prime field with parameters `P`, stored in Montgomery
/// form: the wrapped integer is `x * 2^256 mod MODULUS`, always canonical.
#[derive(Derivative)]
#[derivative(
    Default(bound = ""),
    Hash(bound = ""),
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct Fp256<P>(
    pub BigInteger,
    #[derivative(Debug = "ignore")]
    #[doc(hidden)]
    pub PhantomData<P>,
);

impl<P> Fp256<P> {
    /// Wraps words that are already in Montgomery form.
    #[inline]
    pub const fn new(element: BigInteger) -> Self {
        Fp256::<P>(element, PhantomData)
    }
}

impl<P: Fp256Parameters> Fp256<P> {
    #[inline]
    fn is_valid(&self) -> bool {
        self.0 < P::MODULUS
    }

    /// Subtracts the modulus once if `carry` is set or the value is not below
    /// it. The choice is a mask, not a branch.
    #[inline]
    fn reduce(&mut self, carry: u32) {
        let m = fa::mask(carry | self.0.ct_geq(&P::MODULUS));
        let mut t = self.0;
        t.sub_noborrow(&P::MODULUS);
        for i in 0..8 {
            (self.0).0[i] = (t.0[i] & m) | ((self.0).0[i] & !m);
        }
    }

    /// Montgomery reduction of a 512-bit value `r`, least significant word
    /// first: returns `r * R^-1 mod MODULUS` for `r < MODULUS * R`.
    #[inline]
    #[unroll_for_loops]
    fn montgomery_reduce(mut r: [u32; 16]) -> Self {
        let mut carry2 = 0u32;
        for i in 0..8 {
            let k = r[i].wrapping_mul(P::INV);
            let mut carry = 0u32;
            fa::mac_with_carry(r[i], k, P::MODULUS.0[0], &mut carry);
            for j in 1..8 {
                r[j + i] = fa::mac_with_carry(r[j + i], k, P::MODULUS.0[j], &mut carry);
            }
            r[8 + i] = fa::adc(r[8 + i], carry2, &mut carry);
            carry2 = carry;
        }
        let mut out = Self::new(BigInteger([
            r[8], r[9], r[10], r[11], r[12], r[13], r[14], r[15],
        ]));
        out.reduce(carry2);
        out
    }

    /// Converts a plain integer into Montgomery form, `x * R2 * R^-1`.
    /// Any `x < 2^256` is accepted; inputs at or above the modulus come out
    /// reduced. The full product `x * R2` is below `MODULUS * R`, so it goes
    /// through `montgomery_reduce` rather than the no-carry `mul_assign`,
    /// which needs both operands below the modulus.
    #[inline]
    #[unroll_for_loops]
    pub fn to_montgomery(x: &BigInteger) -> Self {
        let a = x.0;
        let b = P::R2.0;
        let mut r = [0u32; 16];
        for i in 0..8 {
            let mut carry = 0u32;
            for j in 0..8 {
                r[i + j] = fa::mac_with_carry(r[i + j], a[j], b[i], &mut carry);
            }
            r[i + 8] = carry;
        }
        Self::montgomery_reduce(r)
    }

    /// The canonical plain integer of `self`, one reduction pass.
    #[inline]
    pub fn from_montgomery(&self) -> BigInteger {
        let mut r = [0u32; 16];
        r[..8].copy_from_slice(&(self.0).0);
        Self::montgomery_reduce(r).0
    }

    /// Canonical little-endian encoding: 32 bytes, top bit always zero.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.into_repr().to_bytes_le()
    }

    /// Parses a canonical little-endian encoding, rejecting values at or above
    /// the modulus.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::from_repr(BigInteger::from_bytes_le(bytes))
    }

    /// Inverse by binary extended Euclid (Guajardo Kumar Paar Pelzl,
    /// "Efficient Software-Implementation of Finite Fields with Applications to
    /// Cryptography", Algorithm 16). Faster than `inverse`, but the running
    /// time depends on the input: use it on public values only.
    pub fn inverse_vartime(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        let one = BigInteger::from(1);

        let mut u = self.0;
        let mut v = P::MODULUS;
        // Starting from R2 leaves the result in Montgomery form.
        let mut b = Self::new(P::R2);
        let mut c = Self::zero();

        while u != one && v != one {
            while u.is_even() {
                u.div2();

                if b.0.is_even() {
                    b.0.div2();
                } else {
                    b.0.add_nocarry(&P::MODULUS);
                    b.0.div2();
                }
            }

            while v.is_even() {
                v.div2();

                if c.0.is_even() {
                    c.0.div2();
                } else {
                    c.0.add_nocarry(&P::MODULUS);
                    c.0.div2();
                }
            }

            if v < u {
                u.sub_noborrow(&v);
                b.sub_assign(&c);
            } else {
                v.sub_noborrow(&u);
                c.sub_assign(&b);
            }
        }

        if u == one {
            Some(b)
        } else {
            Some(c)
        }
    }

    #[inline]
    fn modulus_minus_two() -> BigInteger {
        let mut exp = P::MODULUS;
        exp.sub_noborrow(&BigInteger::from(2));
        exp
    }
}

impl<P: Fp256Parameters> Field for Fp256<P> {
    #[inline]
    fn zero() -> Self {
        Fp256::<P>(BigInteger::from(0), PhantomData)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    fn one() -> Self {
        Fp256::<P>(P::R, PhantomData)
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.0 == P::R
    }

    #[inline]
    fn characteristic<'a>() -> &'a [u32] {
        P::MODULUS.as_ref()
    }

    #[inline]
    fn double_in_place(&mut self) -> &mut Self {
        // 2 * self < 2^256 since MODULUS < 2^255.
        self.0.mul2();
        self.reduce(0);
        self
    }

    #[inline]
    #[unroll_for_loops]
    fn square_in_place(&mut self) -> &mut Self {
        let a = (self.0).0;
        let mut r = [0u32; 16];

        // Off-diagonal products a[i] * a[j], i < j.
        let mut carry = 0u32;
        for i in 0..7 {
            for j in (i + 1)..8 {
                r[i + j] = fa::mac_with_carry(r[i + j], a[i], a[j], &mut carry);
            }
            r[8 + i] = carry;
            carry = 0;
        }

        // Double them.
        r[15] = r[14] >> 31;
        for i in (2..15).rev() {
            r[i] = (r[i] << 1) | (r[i - 1] >> 31);
        }
        r[1] <<= 1;

        // Add the diagonal a[i]^2.
        for i in 0..8 {
            r[2 * i] = fa::mac_with_carry(r[2 * i], a[i], a[i], &mut carry);
            r[2 * i + 1] = fa::adc(r[2 * i + 1], 0, &mut carry);
        }

        *self = Self::montgomery_reduce(r);
        self
    }

    /// Fermat inversion, `self^(MODULUS - 2)`. The exponent is public and
    /// fixed, so the sequence of operations is the same for every input.
    #[inline]
    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.pow(Self::modulus_minus_two()))
        }
    }

    fn inverse_in_place(&mut self) -> Option<&mut Self> {
        if let Some(inverse) = self.inverse() {
            *self = inverse;
            Some(self)
        } else {
            None
        }
    }
}

impl<P: Fp256Parameters> PrimeField for Fp256<P> {
    type Params = P;
    type BigInt = BigInteger;

    #[inline]
    fn from_repr(r: BigInteger) -> Option<Self> {
        if r < P::MODULUS {
            Some(Self::to_montgomery(&r))
        } else {
            None
        }
    }

    #[inline]
    fn into_repr(&self) -> BigInteger {
        self.from_montgomery()
    }

    #[inline]
    fn multiplicative_generator() -> Self {
        Fp256::<P>(P::GENERATOR, PhantomData)
    }

    #[inline]
    fn root_of_unity() -> Self {
        Fp256::<P>(P::ROOT_OF_UNITY, PhantomData)
    }
}

impl<P: Fp256Parameters> SquareRootField for Fp256<P> {
    #[inline]
    fn legendre(&self) -> LegendreSymbol {
        use crate::fields::LegendreSymbol::*;

        // s = self^((MODULUS - 1) // 2)
        let s = self.pow(P::MODULUS_MINUS_ONE_DIV_TWO);
        if s.is_zero() {
            Zero
        } else if s.is_one() {
            QuadraticResidue
        } else {
            QuadraticNonResidue
        }
    }

    // Tonelli-Shanks, as in "Square root computation over even extension
    // fields" by Gora Adj and Francisco Rodríguez-Henríquez, Algorithm 5.
    fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        if self.legendre().is_qnr() {
            return None;
        }

        let mut z = Self::root_of_unity();
        let mut w = self.pow(P::T_MINUS_ONE_DIV_TWO);
        let mut x = w * self;
        let mut b = x * &w;

        let mut v = P::TWO_ADICITY as usize;

        while !b.is_one() {
            let mut k = 0usize;

            let mut b2k = b;
            while !b2k.is_one() {
                // invariant: b2k = b^(2^k) after entering this loop
                b2k.square_in_place();
                k += 1;
            }

            let j = v - k - 1;
            w = z;
            for _ in 0..j {
                w.square_in_place();
            }

            z = w.square();
            b *= &z;
            x *= &w;
            v = k;
        }

        Some(x)
    }

    fn sqrt_in_place(&mut self) -> Option<&mut Self> {
        (*self).sqrt().map(|sqrt| {
            *self = sqrt;
            self
        })
    }
}

impl<P: Fp256Parameters> MontgomeryBackend for Fp256<P> {
    type Params = P;

    #[inline]
    fn field_zero() -> Self {
        Self::zero()
    }

    #[inline]
    fn field_one() -> Self {
        Self::one()
    }

    #[inline]
    fn field_add(&self, other: &Self) -> Self {
        *self + other
    }

    #[inline]
    fn field_sub(&self, other: &Self) -> Self {
        *self - other
    }

    #[inline]
    fn field_mul(&self, other: &Self) -> Self {
        *self * other
    }

    #[inline]
    fn field_sqr(&self) -> Self {
        self.square()
    }

    #[inline]
    fn field_neg(&self) -> Self {
        -*self
    }

    #[inline]
    fn field_inv(&self) -> Self {
        self.pow(Self::modulus_minus_two())
    }

    #[inline]
    fn to_montgomery(x: &BigInteger) -> Self {
        Self::to_montgomery(x)
    }

    #[inline]
    fn from_montgomery(&self) -> BigInteger {
        Self::from_montgomery(self)
    }

    #[inline]
    fn field_eq(&self, other: &Self) -> bool {
        self == other
    }

    #[inline]
    fn field_is_zero(&self) -> bool {
        self.is_zero()
    }

    #[inline]
    fn limbs(&self) -> [u32; 8] {
        (self.0).0
    }

    #[inline]
    fn from_limbs(limbs: [u32; 8]) -> Self {
        Self::new(BigInteger(limbs))
    }
}

impl<P: Fp256Parameters> ToBytes for Fp256<P> {
    #[inline]
    fn write<W: Write>(&self, writer: W) -> IoResult<()> {
        self.into_repr().write(writer)
    }
}

impl<P: Fp256Parameters> FromBytes for Fp256<P> {
    #[inline]
    fn read<R: Read>(reader: R) -> IoResult<Self> {
        BigInteger::read(reader).and_then(|b| {
            Self::from_repr(b).ok_or_else(|| {
                IoError::new(ErrorKind::InvalidData, "value is not below the field modulus")
            })
        })
    }
}

impl<P: Fp256Parameters> Ord for Fp256<P> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.into_repr().cmp(&other.into_repr())
    }
}

impl<P: Fp256Parameters> PartialOrd for Fp256<P> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Fp256Parameters> Distribution<Fp256<P>> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp256<P> {
        loop {
            let mut tmp = Fp256::<P>(rng.sample(Standard), PhantomData);
            // Mask away the unused bits at the beginning.
            tmp.0.as_mut()[7] &= u32::MAX >> P::REPR_SHAVE_BITS;

            if tmp.is_valid() {
                return tmp;
            }
        }
    }
}

impl<P: Fp256Parameters> From<u64> for Fp256<P> {
    fn from(other: u64) -> Self {
        // Any u64 is below a 255-bit modulus.
        Self::to_montgomery(&BigInteger::from(other))
    }
}

impl<P: Fp256Parameters> FromStr for Fp256<P> {
    type Err = ();

    /// Interpret a string of decimal digits as a field element, reduced
    /// modulo the characteristic. Leading zeros are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(());
        }

        if s == "0" {
            return Ok(Self::zero());
        }

        let mut res = Self::zero();

        let ten = Self::from(10u64);

        let mut first_digit = true;

        for c in s.chars() {
            match c.to_digit(10) {
                Some(c) => {
                    if first_digit {
                        if c == 0 {
                            return Err(());
                        }

                        first_digit = false;
                    }

                    res.mul_assign(&ten);
                    res.add_assign(&Self::from(u64::from(c)));
                }
                None => {
                    return Err(());
                }
            }
        }
        Ok(res)
    }
}

impl<P: Fp256Parameters> Display for Fp256<P> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Fp256({})", self.into_repr())
    }
}

impl<P: Fp256Parameters> ConstantTimeEq for Fp256<P> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.0).0[..].ct_eq(&(other.0).0[..])
    }
}

impl<P: Fp256Parameters> ConditionallySelectable for Fp256<P> {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0u32; 8];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u32::conditional_select(&(a.0).0[i], &(b.0).0[i], choice);
        }
        Self::new(BigInteger(limbs))
    }
}

impl<P: Fp256Parameters> Neg for Fp256<P> {
    type Output = Self;

    /// `0 - self`; zero maps to zero.
    #[inline]
    #[must_use]
    fn neg(self) -> Self {
        let mut res = Self::zero();
        res.sub_assign(&self);
        res
    }
}

impl<'a, P: Fp256Parameters> Add<&'a Fp256<P>> for Fp256<P> {
    type Output = Self;

    #[inline]
    fn add(self, other: &Self) -> Self {
        let mut result = self;
        result.add_assign(other);
        result
    }
}

impl<'a, P: Fp256Parameters> Sub<&'a Fp256<P>> for Fp256<P> {
    type Output = Self;

    #[inline]
    fn sub(self, other: &Self) -> Self {
        let mut result = self;
        result.sub_assign(other);
        result
    }
}

impl<'a, P: Fp256Parameters> Mul<&'a Fp256<P>> for Fp256<P> {
    type Output = Self;

    #[inline]
    fn mul(self, other: &Self) -> Self {
        let mut result = self;
        result.mul_assign(other);
        result
    }
}

impl<'a, P: Fp256Parameters> Div<&'a Fp256<P>> for Fp256<P> {
    type Output = Self;

    #[inline]
    fn div(self, other: &Self) -> Self {
        let mut result = self;
        result.div_assign(other);
        result
    }
}

impl_additive_ops_from_ref!(Fp256, Fp256Parameters);
impl_multiplicative_ops_from_ref!(Fp256, Fp256Parameters);

impl<'a, P: Fp256Parameters> AddAssign<&'a Self> for Fp256<P> {
    #[inline]
    fn add_assign(&mut self, other: &Self) {
        let carry = self.0.add_nocarry(&other.0) as u32;
        self.reduce(carry);
    }
}

impl<'a, P: Fp256Parameters> SubAssign<&'a Self> for Fp256<P> {
    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        let borrow = self.0.sub_noborrow(&other.0) as u32;
        // Add the modulus back only if the subtraction wrapped.
        let m = fa::mask(borrow);
        let mut correction = P::MODULUS;
        for limb in correction.0.iter_mut() {
            *limb &= m;
        }
        self.0.add_nocarry(&correction);
    }
}

impl<'a, P: Fp256Parameters> MulAssign<&'a Self> for Fp256<P> {
    /// Interleaved multiply-and-reduce (CIOS) over 32-bit limbs. The top limb
    /// of the modulus leaves headroom, so the per-round carries of the product
    /// and of the reduction fit into the last word together.
    #[inline]
    #[unroll_for_loops]
    fn mul_assign(&mut self, other: &Self) {
        let a = (self.0).0;
        let b = (other.0).0;
        let mut r = [0u32; 8];

        for i in 0..8 {
            let mut carry1 = 0u32;
            r[0] = fa::mac(r[0], a[0], b[i], &mut carry1);

            let k = r[0].wrapping_mul(P::INV);

            let mut carry2 = 0u32;
            fa::mac_discard(r[0], k, P::MODULUS.0[0], &mut carry2);

            for j in 1..8 {
                r[j] = fa::mac_with_carry(r[j], a[j], b[i], &mut carry1);
                r[j - 1] = fa::mac_with_carry(r[j], k, P::MODULUS.0[j], &mut carry2);
            }
            r[7] = carry1 + carry2;
        }

        (self.0).0 = r;
        self.reduce(0);
    }
}

impl<'a, P: Fp256Parameters> DivAssign<&'a Self> for Fp256<P> {
    /// Panics if `other` is zero.
    #[inline]
    fn div_assign(&mut self, other: &Self) {
        self.mul_assign(&other.inverse().unwrap());
    }
}
