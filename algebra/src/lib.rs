#![deny(
    unused_import_braces,
    trivial_casts,
    bare_trait_objects,
    unused_must_use,
    unsafe_code
)]

//! Montgomery-form prime field arithmetic for the Pasta cycle of curves.

#[macro_use]
extern crate derivative;

#[macro_use]
pub mod bytes;
pub use self::bytes::*;

pub mod biginteger;
pub use self::biginteger::*;

#[macro_use]
pub mod fields;
pub use self::fields::*;

pub mod cycle;
pub use self::cycle::{ActiveCycle, CurveCycle, PallasVesta, VestaPallas};

mod rand;
pub use self::rand::*;
