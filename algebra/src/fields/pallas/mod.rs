//! Base field Fq and scalar field Fr of the Pallas curve
//! `y^2 = x^3 + 5` over Fq.
//!
//! The two Pasta curves form a cycle: the scalar field of Pallas is the base
//! field of Vesta, and the other way around.

pub mod fq;
pub use self::fq::*;

pub mod fr;
pub use self::fr::*;
