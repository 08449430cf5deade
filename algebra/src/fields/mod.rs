use crate::{
    biginteger::{BigInteger, BigInteger256},
    bytes::{FromBytes, ToBytes},
    UniformRand,
};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[macro_use]
pub mod macros;

pub mod models;
pub use self::models::*;

pub mod validation;
pub use self::validation::*;

#[cfg(test)]
#[macro_use]
pub(crate) mod tests_field;

pub mod pallas;
pub mod vesta;

#[macro_export]
macro_rules! field_new {
    ($name:ident, $c0:expr) => {
        $name {
            0: $c0,
            1: std::marker::PhantomData,
        }
    };
}

/// The interface for a generic field.
pub trait Field:
    'static
    + ToBytes
    + FromBytes
    + Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Hash
    + Neg<Output = Self>
    + UniformRand
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + DivAssign<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Div<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
    + Sum<Self>
    + for<'a> Sum<&'a Self>
    + Product<Self>
    + for<'a> Product<&'a Self>
{
    /// Returns the zero element of the field, the additive identity.
    fn zero() -> Self;

    /// Returns true if and only if `self == Self::zero()`.
    fn is_zero(&self) -> bool;

    /// Returns the one element of the field, a field generator.
    fn one() -> Self;

    /// Returns true if and only if `self == Self::one()`.
    fn is_one(&self) -> bool;

    /// Returns the characteristic of the field, least significant word first.
    fn characteristic<'a>() -> &'a [u32];

    /// Returns `self + self`.
    #[must_use]
    fn double(&self) -> Self {
        let mut copy = *self;
        copy.double_in_place();
        copy
    }

    /// Doubles `self` in place.
    fn double_in_place(&mut self) -> &mut Self;

    /// Returns `self * self`.
    #[must_use]
    fn square(&self) -> Self {
        let mut copy = *self;
        copy.square_in_place();
        copy
    }

    /// Squares `self` in place.
    fn square_in_place(&mut self) -> &mut Self;

    /// Computes the multiplicative inverse of `self` if `self` is nonzero.
    #[must_use]
    fn inverse(&self) -> Option<Self>;

    // Sets `self` to `self`'s inverse if it exists. Otherwise it is a no-op.
    fn inverse_in_place(&mut self) -> Option<&mut Self>;

    /// Exponentiates this element by a number represented with `u32` limbs,
    /// least significant limb first. Runs in time depending on the exponent
    /// only.
    #[must_use]
    fn pow<S: AsRef<[u32]>>(&self, exp: S) -> Self {
        let mut res = Self::one();

        for i in BitIterator::new(exp) {
            res.square_in_place();
            if i {
                res *= self;
            }
        }
        res
    }
}

/// A trait that defines parameters for a prime field.
pub trait FpParameters: 'static + Send + Sync + Sized {
    type BigInt: BigInteger;

    /// The modulus of the field.
    const MODULUS: Self::BigInt;

    /// The number of bits needed to represent the `Self::MODULUS`.
    const MODULUS_BITS: u32;

    /// The number of bits that must be shaved from the beginning of
    /// the representation when randomly sampling.
    const REPR_SHAVE_BITS: u32;

    /// R = 2^256 % Self::MODULUS, the Montgomery form of one.
    const R: Self::BigInt;

    /// R2 = R^2 % Self::MODULUS
    const R2: Self::BigInt;

    /// INV = -(MODULUS^{-1} mod 2^32) mod 2^32
    const INV: u32;

    /// A multiplicative generator that is also a quadratic nonresidue.
    /// `Self::GENERATOR` is an element having multiplicative order
    /// `Self::MODULUS - 1`, in Montgomery form.
    const GENERATOR: Self::BigInt;

    /// The number of bits that can be reliably stored.
    /// (Should equal `SELF::MODULUS_BITS - 1`)
    const CAPACITY: u32;

    /// 2^s * t = MODULUS - 1 with t odd. This is the two-adicity of the prime.
    const TWO_ADICITY: u32;

    /// 2^s root of unity computed by GENERATOR^t, in Montgomery form.
    const ROOT_OF_UNITY: Self::BigInt;

    /// t for 2^s * t = MODULUS - 1
    const T: Self::BigInt;

    /// (t - 1) / 2
    const T_MINUS_ONE_DIV_TWO: Self::BigInt;

    /// (Self::MODULUS - 1) / 2
    const MODULUS_MINUS_ONE_DIV_TWO: Self::BigInt;
}

/// The interface for a prime field.
pub trait PrimeField: Field + FromStr<Err = ()> + From<u64> {
    type Params: FpParameters<BigInt = Self::BigInt>;
    type BigInt: BigInteger;

    /// Returns a prime field element from its canonical representation,
    /// or `None` if `repr >= MODULUS`.
    fn from_repr(repr: Self::BigInt) -> Option<Self>;

    /// Returns the canonical (non-Montgomery) representation of `self`.
    fn into_repr(&self) -> Self::BigInt;

    /// Returns the multiplicative generator of `char()` - 1 order.
    fn multiplicative_generator() -> Self;

    /// Returns the 2^s root of unity.
    fn root_of_unity() -> Self;

    /// Returns the field size in bits.
    fn size_in_bits() -> usize {
        Self::Params::MODULUS_BITS as usize
    }

    /// Returns the capacity size for packing in bits.
    fn capacity() -> usize {
        Self::Params::CAPACITY as usize
    }
}

/// The interface for a field that supports an efficient square-root operation.
pub trait SquareRootField: Field {
    /// Returns the Legendre symbol.
    fn legendre(&self) -> LegendreSymbol;

    /// Returns the square root of self, if it exists.
    #[must_use]
    fn sqrt(&self) -> Option<Self>;

    /// Sets `self` to be the square root of `self`, if it exists.
    fn sqrt_in_place(&mut self) -> Option<&mut Self>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LegendreSymbol {
    Zero = 0,
    QuadraticResidue = 1,
    QuadraticNonResidue = -1,
}

impl LegendreSymbol {
    pub fn is_zero(&self) -> bool {
        *self == LegendreSymbol::Zero
    }

    pub fn is_qnr(&self) -> bool {
        *self == LegendreSymbol::QuadraticNonResidue
    }

    pub fn is_qr(&self) -> bool {
        *self == LegendreSymbol::QuadraticResidue
    }
}

/// The Montgomery operation set every execution target implements with
/// bit-identical results. Values are eight 32-bit words in Montgomery form,
/// always kept below the modulus.
///
/// Inverting zero yields zero: kernels have no failure channel, so the
/// sentinel is the same on every target. `Field::inverse` turns it into `None`.
pub trait MontgomeryBackend: Copy + Send + Sync + Sized + 'static {
    type Params: FpParameters<BigInt = BigInteger256>;

    /// Montgomery form of 0: the all-zero word sequence.
    fn field_zero() -> Self;

    /// Montgomery form of 1, i.e. `R mod P`.
    fn field_one() -> Self;

    fn field_add(&self, other: &Self) -> Self;

    fn field_sub(&self, other: &Self) -> Self;

    /// `self * other * R^-1 mod P`.
    fn field_mul(&self, other: &Self) -> Self;

    fn field_sqr(&self) -> Self;

    fn field_neg(&self) -> Self;

    /// `self^(P - 2)`; zero maps to zero.
    fn field_inv(&self) -> Self;

    /// Converts a plain integer into Montgomery form by multiplying with `R2`.
    /// Inputs above the modulus come out reduced.
    fn to_montgomery(x: &BigInteger256) -> Self;

    /// One Montgomery reduction pass, giving the canonical plain integer.
    fn from_montgomery(&self) -> BigInteger256;

    fn field_eq(&self, other: &Self) -> bool;

    fn field_is_zero(&self) -> bool;

    /// Raw Montgomery words, the layout shared by host and device buffers.
    fn limbs(&self) -> [u32; 8];

    /// Wraps raw Montgomery words without reduction.
    fn from_limbs(limbs: [u32; 8]) -> Self;
}

/// Iterates over the bits of a `u32`-limbed number, most significant first.
#[derive(Debug)]
pub struct BitIterator<E> {
    t: E,
    n: usize,
}

impl<E: AsRef<[u32]>> BitIterator<E> {
    pub fn new(t: E) -> Self {
        let n = t.as_ref().len() * 32;

        BitIterator { t, n }
    }
}

impl<E: AsRef<[u32]>> Iterator for BitIterator<E> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.n == 0 {
            None
        } else {
            self.n -= 1;
            let part = self.n / 32;
            let bit = self.n - (32 * part);

            Some(self.t.as_ref()[part] & (1 << bit) > 0)
        }
    }
}

/// Given a vector of field elements {v_i}, compute the vector {v_i^(-1)}.
/// Zero entries are left untouched.
pub fn batch_inversion<F: Field>(v: &mut [F]) {
    #[cfg(feature = "parallel")]
    {
        // Divide the vector v evenly between all available cores
        let min_elements_per_thread = 1;
        let num_cpus_available = rayon::current_num_threads();
        let num_elems = v.len();
        let num_elem_per_thread =
            std::cmp::max(num_elems / num_cpus_available, min_elements_per_thread);

        // Batch invert in parallel, without copying the vector
        v.par_chunks_mut(num_elem_per_thread).for_each(|chunk| {
            serial_batch_inversion(chunk);
        });
    }

    #[cfg(not(feature = "parallel"))]
    serial_batch_inversion(v);
}

/// Given a vector of field elements {v_i}, compute the vector {v_i^(-1)} using
/// Montgomery's trick: one inversion and 3(n - 1) multiplications.
fn serial_batch_inversion<F: Field>(v: &mut [F]) {
    // First pass: compute [a, ab, abc, ...]
    let mut prod = Vec::with_capacity(v.len());
    let mut tmp = F::one();
    for f in v.iter().filter(|f| !f.is_zero()) {
        tmp.mul_assign(f);
        prod.push(tmp);
    }

    // Invert `tmp`, a product of nonzero elements.
    tmp = match tmp.inverse() {
        Some(inv) => inv,
        None => return,
    };

    // Second pass: iterate backwards to compute inverses
    for (f, s) in v
        .iter_mut()
        // Backwards
        .rev()
        // Ignore normalized elements
        .filter(|f| !f.is_zero())
        // Backwards, skip last element, fill in one for last term.
        .zip(prod.into_iter().rev().skip(1).chain(Some(F::one())))
    {
        // tmp := tmp * f; f := tmp * s = 1/f
        let new_tmp = tmp * *f;
        *f = tmp * &s;
        tmp = new_tmp;
    }
}
