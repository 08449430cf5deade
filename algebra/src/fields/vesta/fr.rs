//! Scalar field Fr of the Vesta curve. This is the base field of Pallas.

pub use crate::fields::pallas::fq::{Fq as Fr, FqParameters as FrParameters};
