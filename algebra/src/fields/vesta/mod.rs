//! Base field Fq and scalar field Fr of the Vesta curve `y^2 = x^3 + 5`.

pub mod fq;
pub use self::fq::*;

pub mod fr;
pub use self::fr::*;
