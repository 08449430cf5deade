//! Montgomery arithmetic for 256-bit residues over 32-bit limbs.
//!
//! - Fp256, generic over the parameters of a prime below 2^255,
//! - ModulusDescriptor, the constant bundle shared with device code, and the
//!   routines deriving it from a bare modulus.

pub mod fp_256;
pub use self::fp_256::*;

pub mod descriptor;
pub use self::descriptor::*;
