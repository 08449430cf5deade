use serde::{Deserialize, Serialize};

use crate::{
    biginteger::{BigInteger, BigInteger256, NUM_LIMBS},
    fields::{Fp256Parameters, ValidationError},
};

/// The four constants Montgomery arithmetic needs for one prime, laid out the
/// same way for host and device buffers.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(C, align(16))]
pub struct ModulusDescriptor {
    /// The prime `P`.
    pub p: BigInteger256,
    /// `R^2 mod P`.
    pub rr: BigInteger256,
    /// `R mod P`, the Montgomery form of one.
    pub one: BigInteger256,
    /// `-P^-1 mod 2^32`.
    pub m0: u32,
}

impl ModulusDescriptor {
    /// Reads the stored tables of `P`.
    pub fn of<P: Fp256Parameters>() -> Self {
        ModulusDescriptor {
            p: P::MODULUS,
            rr: P::R2,
            one: P::R,
            m0: P::INV,
        }
    }

    /// Computes the tables of `modulus` from scratch. Only odd 255-bit moduli
    /// are accepted.
    pub fn derive(modulus: &BigInteger256) -> Result<Self, ValidationError> {
        if modulus.is_even() {
            return Err(ValidationError::EvenModulus);
        }
        if modulus.num_bits() != 255 {
            return Err(ValidationError::ModulusWidth(modulus.num_bits()));
        }
        let one = compute_r(modulus);
        Ok(ModulusDescriptor {
            p: *modulus,
            rr: compute_r2(modulus),
            one,
            m0: compute_inv(modulus.0[0]),
        })
    }
}

/// `-p0^-1 mod 2^32` for odd `p0`. Raising to `2^31 - 1` inverts any odd
/// word, since the unit group mod `2^32` has exponent `2^30`.
pub const fn compute_inv(p0: u32) -> u32 {
    let mut inv = 1u32;
    let mut i = 0;
    while i < 31 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(p0);
        i += 1;
    }
    inv.wrapping_neg()
}

/// The same as `compute_inv` for 64-bit limbs, `-p0^-1 mod 2^64`.
pub const fn compute_inv64(p0: u64) -> u64 {
    let mut inv = 1u64;
    let mut i = 0;
    while i < 63 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(p0);
        i += 1;
    }
    inv.wrapping_neg()
}

/// `2^256 mod P`: `0 - P` wraps around to `2^256 - P`, then subtract `P`
/// until the value drops below it. For a 255-bit `P` that is at most three
/// subtractions.
pub fn compute_r(modulus: &BigInteger256) -> BigInteger256 {
    let mut r = BigInteger256::default();
    r.sub_noborrow(modulus);
    while r >= *modulus {
        r.sub_noborrow(modulus);
    }
    r
}

/// `R^2 mod P`, as 256 modular doublings of `R mod P`.
pub fn compute_r2(modulus: &BigInteger256) -> BigInteger256 {
    let mut r2 = compute_r(modulus);
    for _ in 0..256 {
        double_mod(&mut r2, modulus);
    }
    r2
}

// `x = 2x mod P` for `x < P`.
fn double_mod(x: &mut BigInteger256, modulus: &BigInteger256) {
    let carry = x.0[NUM_LIMBS - 1] >> 31;
    x.mul2();
    if carry == 1 || *x >= *modulus {
        x.sub_noborrow(modulus);
    }
}

/// Pairs 32-bit words into 64-bit limbs, least significant first.
pub fn words_to_u64(words: &[u32; NUM_LIMBS]) -> [u64; NUM_LIMBS / 2] {
    let mut out = [0u64; NUM_LIMBS / 2];
    for (o, pair) in out.iter_mut().zip(words.chunks(2)) {
        *o = u64::from(pair[0]) | (u64::from(pair[1]) << 32);
    }
    out
}
