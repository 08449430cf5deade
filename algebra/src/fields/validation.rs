//! Consistency checks of a stored parameter table against values derived
//! independently from the modulus alone. Run once at startup, never per
//! operation.

use thiserror::Error;

use crate::{
    biginteger::{BigInteger, BigInteger256},
    fields::{compute_r, Field, Fp256, Fp256Parameters, FpParameters},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("modulus is even")]
    EvenModulus,

    #[error("modulus must be 255 bits wide, found {0}")]
    ModulusWidth(u32),

    #[error("MODULUS_BITS is {stored} but the modulus has {actual} bits")]
    ModulusBitsMismatch { stored: u32, actual: u32 },

    #[error("INV * MODULUS is not -1 modulo 2^32")]
    InvMismatch,

    #[error("R differs from 2^256 mod MODULUS: expected {expected}, found {found}")]
    RMismatch {
        expected: BigInteger256,
        found: BigInteger256,
    },

    #[error("R2 does not reduce to R")]
    R2Mismatch,

    #[error("R does not reduce to one")]
    OneMismatch,

    #[error("ROOT_OF_UNITY is not a primitive 2^{0} root of unity")]
    RootOfUnity(u32),
}

/// Checks the parameter table of `P`, cheapest checks first: a wrong `INV`
/// or `R` is reported before any Montgomery reduction relies on it.
pub fn validate<P: Fp256Parameters>() -> Result<(), ValidationError> {
    let modulus = P::MODULUS;

    if modulus.is_even() {
        return Err(ValidationError::EvenModulus);
    }

    let actual = modulus.num_bits();
    if actual != 255 {
        return Err(ValidationError::ModulusWidth(actual));
    }
    if P::MODULUS_BITS != actual {
        return Err(ValidationError::ModulusBitsMismatch {
            stored: P::MODULUS_BITS,
            actual,
        });
    }

    if P::INV.wrapping_mul(modulus.0[0]) != u32::MAX {
        return Err(ValidationError::InvMismatch);
    }

    let expected = compute_r(&modulus);
    if P::R != expected {
        return Err(ValidationError::RMismatch {
            expected,
            found: P::R,
        });
    }

    if Fp256::<P>::new(P::R2).from_montgomery() != P::R {
        return Err(ValidationError::R2Mismatch);
    }

    if Fp256::<P>::new(P::R).from_montgomery() != BigInteger256::from(1) {
        return Err(ValidationError::OneMismatch);
    }

    // Squaring s - 1 times must not reach one yet, the last squaring must.
    let mut root = Fp256::<P>::new(P::ROOT_OF_UNITY);
    for _ in 1..P::TWO_ADICITY {
        root.square_in_place();
        if root.is_one() {
            return Err(ValidationError::RootOfUnity(P::TWO_ADICITY));
        }
    }
    if !root.square().is_one() {
        return Err(ValidationError::RootOfUnity(P::TWO_ADICITY));
    }

    log::debug!("parameters of modulus {} validated", modulus);
    Ok(())
}
