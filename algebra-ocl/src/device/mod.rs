//! The per-thread field engine of the data-parallel target.
//!
//! A `MontT<P>` is what one kernel thread holds: eight words in Montgomery
//! form and nothing else. Every operation works on fixed-size stack arrays,
//! never allocates and reads only the constants of `P`. The multiplication is
//! the word-serial CIOS with an `N + 2` word accumulator that the OpenCL
//! template in `ffgen` uses, so both produce the same words as the host
//! `Fp256<P>`.

use algebra::{
    biginteger::arithmetic as fa,
    cycle::{ActiveCycle, CurveCycle},
    fields::{pallas, vesta, Fp256, Fp256Parameters, FpParameters, MontgomeryBackend},
    BigInteger256,
};
use std::marker::PhantomData;

const N: usize = 8;

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
#[repr(C, align(16))]
pub struct MontT<P> {
    pub val: [u32; N],
    #[derivative(Debug = "ignore")]
    _params: PhantomData<P>,
}

pub type PallasT = MontT<pallas::FqParameters>;
pub type VestaT = MontT<vesta::FqParameters>;

/// Device base field of the active assignment.
pub type FpT = MontT<<ActiveCycle as CurveCycle>::BaseParameters>;
/// Device scalar field of the active assignment.
pub type FrT = MontT<<ActiveCycle as CurveCycle>::ScalarParameters>;

// Word-wise select: `a` where `mask` is all ones, `b` where it is zero.
#[inline(always)]
fn select(a: &[u32; N], b: &[u32; N], mask: u32) -> [u32; N] {
    let mut r = [0u32; N];
    for i in 0..N {
        r[i] = (a[i] & mask) | (b[i] & !mask);
    }
    r
}

#[inline(always)]
fn add_(a: &[u32; N], b: &[u32; N], carry: &mut u32) -> [u32; N] {
    let mut r = [0u32; N];
    for i in 0..N {
        r[i] = fa::adc(a[i], b[i], carry);
    }
    r
}

#[inline(always)]
fn sub_(a: &[u32; N], b: &[u32; N], borrow: &mut u32) -> [u32; N] {
    let mut r = [0u32; N];
    for i in 0..N {
        r[i] = fa::sbb(a[i], b[i], borrow);
    }
    r
}

impl<P> MontT<P> {
    #[inline]
    pub const fn new(val: [u32; N]) -> Self {
        MontT {
            val,
            _params: PhantomData,
        }
    }
}

impl<P: Fp256Parameters> MontT<P> {
    // Subtracts P once if `carry` is set or `v >= P`.
    #[inline(always)]
    fn reduce(v: &[u32; N], carry: u32) -> [u32; N] {
        let mut borrow = 0;
        let t = sub_(v, &P::MODULUS.0, &mut borrow);
        select(&t, v, fa::mask(carry | (borrow ^ 1)))
    }

    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        let mut carry = 0;
        let r = add_(&self.val, &other.val, &mut carry);
        Self::new(Self::reduce(&r, carry))
    }

    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        let mut borrow = 0;
        let r = sub_(&self.val, &other.val, &mut borrow);
        let mut carry = 0;
        let t = add_(&r, &P::MODULUS.0, &mut carry);
        Self::new(select(&t, &r, fa::mask(borrow)))
    }

    #[inline]
    pub fn neg(&self) -> Self {
        Self::new([0u32; N]).sub(self)
    }

    /// Montgomery product `self * other * R^-1 mod P`.
    pub fn mul(&self, other: &Self) -> Self {
        let a = &self.val;
        let b = &other.val;
        let p = &P::MODULUS.0;
        let mut t = [0u32; N + 2];

        for i in 0..N {
            let mut carry = 0u32;
            for j in 0..N {
                t[j] = fa::mac_with_carry(t[j], a[j], b[i], &mut carry);
            }
            let mut c = 0u32;
            t[N] = fa::adc(t[N], carry, &mut c);
            t[N + 1] = c;

            let m = t[0].wrapping_mul(P::INV);
            let mut carry = 0u32;
            fa::mac_with_carry(t[0], m, p[0], &mut carry);
            for j in 1..N {
                t[j - 1] = fa::mac_with_carry(t[j], m, p[j], &mut carry);
            }
            let mut c = 0u32;
            t[N - 1] = fa::adc(t[N], carry, &mut c);
            t[N] = t[N + 1] + c;
        }

        let mut r = [0u32; N];
        r.copy_from_slice(&t[..N]);
        Self::new(Self::reduce(&r, t[N]))
    }

    #[inline]
    pub fn sqr(&self) -> Self {
        self.mul(self)
    }

    /// `self^(P - 2)`. The exponent is public, so the sequence of squarings
    /// and multiplications is the same for every input; zero maps to zero.
    pub fn inv(&self) -> Self {
        let mut e = P::MODULUS.0;
        let mut borrow = 0;
        e[0] = fa::sbb(e[0], 2, &mut borrow);
        for limb in e.iter_mut().skip(1) {
            *limb = fa::sbb(*limb, 0, &mut borrow);
        }

        let mut res = Self::new(P::R.0);
        for i in (0..N * 32).rev() {
            res = res.sqr();
            if (e[i / 32] >> (i % 32)) & 1 == 1 {
                res = res.mul(self);
            }
        }
        res
    }

    /// `x * R mod P` for a plain integer `x`; inputs at or above `P` come out
    /// reduced.
    #[inline]
    pub fn mont(x: &[u32; N]) -> Self {
        Self::new(*x).mul(&Self::new(P::R2.0))
    }

    /// The canonical plain integer of `self`.
    #[inline]
    pub fn unmont(&self) -> [u32; N] {
        let mut one = [0u32; N];
        one[0] = 1;
        self.mul(&Self::new(one)).val
    }

    #[inline]
    pub fn equals(&self, other: &Self) -> bool {
        self.val == other.val
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.val.iter().all(|w| *w == 0)
    }
}

impl<P: Fp256Parameters> MontgomeryBackend for MontT<P> {
    type Params = P;

    #[inline]
    fn field_zero() -> Self {
        Self::new([0u32; N])
    }

    #[inline]
    fn field_one() -> Self {
        Self::new(P::R.0)
    }

    #[inline]
    fn field_add(&self, other: &Self) -> Self {
        self.add(other)
    }

    #[inline]
    fn field_sub(&self, other: &Self) -> Self {
        self.sub(other)
    }

    #[inline]
    fn field_mul(&self, other: &Self) -> Self {
        self.mul(other)
    }

    #[inline]
    fn field_sqr(&self) -> Self {
        self.sqr()
    }

    #[inline]
    fn field_neg(&self) -> Self {
        self.neg()
    }

    #[inline]
    fn field_inv(&self) -> Self {
        self.inv()
    }

    #[inline]
    fn to_montgomery(x: &BigInteger256) -> Self {
        Self::mont(&x.0)
    }

    #[inline]
    fn from_montgomery(&self) -> BigInteger256 {
        BigInteger256(self.unmont())
    }

    #[inline]
    fn field_eq(&self, other: &Self) -> bool {
        self.equals(other)
    }

    #[inline]
    fn field_is_zero(&self) -> bool {
        self.is_zero()
    }

    #[inline]
    fn limbs(&self) -> [u32; 8] {
        self.val
    }

    #[inline]
    fn from_limbs(limbs: [u32; 8]) -> Self {
        Self::new(limbs)
    }
}

impl<P: Fp256Parameters> From<Fp256<P>> for MontT<P> {
    #[inline]
    fn from(x: Fp256<P>) -> Self {
        Self::new((x.0).0)
    }
}

impl<P: Fp256Parameters> From<MontT<P>> for Fp256<P> {
    #[inline]
    fn from(x: MontT<P>) -> Self {
        Fp256::new(BigInteger256(x.val))
    }
}

/// Copies host elements into the device layout. Both sides hold the same
/// Montgomery words, so this is a plain word copy.
pub fn to_device<P: Fp256Parameters>(xs: &[Fp256<P>]) -> Vec<MontT<P>> {
    xs.iter().map(|x| MontT::from(*x)).collect()
}

/// Copies device elements back into host elements.
pub fn from_device<P: Fp256Parameters>(xs: &[MontT<P>]) -> Vec<Fp256<P>> {
    xs.iter().map(|x| Fp256::from(*x)).collect()
}
