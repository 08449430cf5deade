//! Scalar field Fr of the Pallas curve. This is the base field of Vesta.

pub use crate::fields::vesta::fq::{Fq as Fr, FqParameters as FrParameters};
