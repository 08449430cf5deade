//! Binding of the "base field" and "scalar field" roles to the two Pasta
//! primes.
//!
//! Both assignments exist as types implementing [`CurveCycle`]. The cargo
//! features `pallas` (default) and `vesta` choose which one is active, and
//! with it what [`Fp`] and [`Fr`] denote. Exactly one of them must be enabled.

use crate::fields::{
    pallas, validate, vesta, Fp256, Fp256Parameters, ModulusDescriptor, ValidationError,
};

#[cfg(all(feature = "pallas", feature = "vesta"))]
compile_error!("features `pallas` and `vesta` are mutually exclusive, enable only one of them");

#[cfg(not(any(feature = "pallas", feature = "vesta")))]
compile_error!("one of the features `pallas` or `vesta` must be enabled");

/// A choice of base and scalar field among the two primes of a curve cycle.
pub trait CurveCycle: 'static + Send + Sync + Sized {
    /// Name of the curve whose base field is `BaseParameters`.
    const NAME: &'static str;

    type BaseParameters: Fp256Parameters;
    type ScalarParameters: Fp256Parameters;

    fn base_descriptor() -> ModulusDescriptor {
        ModulusDescriptor::of::<Self::BaseParameters>()
    }

    fn scalar_descriptor() -> ModulusDescriptor {
        ModulusDescriptor::of::<Self::ScalarParameters>()
    }

    /// Checks the constant tables of both fields.
    fn validate() -> Result<(), ValidationError> {
        validate::<Self::BaseParameters>()?;
        validate::<Self::ScalarParameters>()?;
        log::info!("{} field tables validated", Self::NAME);
        Ok(())
    }
}

/// Base field over the Pallas prime `p`, scalar field over the Vesta prime `q`.
pub struct PallasVesta;

impl CurveCycle for PallasVesta {
    const NAME: &'static str = "pallas";

    type BaseParameters = pallas::FqParameters;
    type ScalarParameters = vesta::FqParameters;
}

/// Base field over `q`, scalar field over `p`.
pub struct VestaPallas;

impl CurveCycle for VestaPallas {
    const NAME: &'static str = "vesta";

    type BaseParameters = vesta::FqParameters;
    type ScalarParameters = pallas::FqParameters;
}

pub type BaseField<C> = Fp256<<C as CurveCycle>::BaseParameters>;
pub type ScalarField<C> = Fp256<<C as CurveCycle>::ScalarParameters>;

#[cfg(all(feature = "pallas", not(feature = "vesta")))]
pub type ActiveCycle = PallasVesta;

#[cfg(all(feature = "vesta", not(feature = "pallas")))]
pub type ActiveCycle = VestaPallas;

/// Base field of the active assignment.
pub type Fp = BaseField<ActiveCycle>;

/// Scalar field of the active assignment.
pub type Fr = ScalarField<ActiveCycle>;
