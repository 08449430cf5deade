//! OpenCL sources for the Pasta fields.
//!
//! OpenCL has no generics, so every field gets its own copy of the templates
//! in `cl/`, with `FIELD` renamed and its constants emitted as `#define`s
//! from the same parameter tables the host engine uses.

use algebra::{
    biginteger::{BigInteger, BigInteger256},
    cycle::{ActiveCycle, CurveCycle},
    fields::{compute_inv64, pallas, vesta, words_to_u64, Fp256Parameters, FpParameters},
};
use itertools::*;
use lazy_static::lazy_static;
use log::info;

static COMMON_SRC: &str = include_str!("cl/common.cl");
static FIELD_SRC: &str = include_str!("cl/field.cl");
static KERNELS_SRC: &str = include_str!("cl/kernels.cl");

/// OpenCL name of the Pallas base field.
pub const PALLAS_FIELD: &str = "pallas_Fq";
/// OpenCL name of the Vesta base field.
pub const VESTA_FIELD: &str = "vesta_Fq";

pub trait Limb: Sized + Clone + Copy {
    type LimbType: Clone + std::fmt::Display;
    fn zero() -> Self;
    fn new(val: Self::LimbType) -> Self;
    fn value(&self) -> Self::LimbType;
    fn bits() -> usize;
    fn opencl_type() -> &'static str;
    /// Integer literal suffix giving constants of this width an unsigned type.
    fn literal_suffix() -> &'static str;
    /// Splits a 256-bit value into limbs, least significant first.
    fn limbs_of(value: &BigInteger256) -> Vec<Self>;
    /// The `INV` parameter of Montgomery reduction for this limb width.
    fn calc_inv<P: Fp256Parameters>() -> Self;
}

#[derive(Clone, Copy)]
pub struct Limb32(u32);
impl Limb for Limb32 {
    type LimbType = u32;
    fn zero() -> Self {
        Self(0)
    }
    fn new(val: Self::LimbType) -> Self {
        Self(val)
    }
    fn value(&self) -> Self::LimbType {
        self.0
    }
    fn bits() -> usize {
        32
    }
    fn opencl_type() -> &'static str {
        "uint"
    }
    fn literal_suffix() -> &'static str {
        "U"
    }
    fn limbs_of(value: &BigInteger256) -> Vec<Self> {
        value.0.iter().map(|l| Self::new(*l)).collect()
    }
    fn calc_inv<P: Fp256Parameters>() -> Self {
        Self(P::INV)
    }
}

#[derive(Clone, Copy)]
pub struct Limb64(u64);
impl Limb for Limb64 {
    type LimbType = u64;
    fn zero() -> Self {
        Self(0)
    }
    fn new(val: Self::LimbType) -> Self {
        Self(val)
    }
    fn value(&self) -> Self::LimbType {
        self.0
    }
    fn bits() -> usize {
        64
    }
    fn opencl_type() -> &'static str {
        "ulong"
    }
    fn literal_suffix() -> &'static str {
        "UL"
    }
    fn limbs_of(value: &BigInteger256) -> Vec<Self> {
        words_to_u64(&value.0)
            .iter()
            .map(|l| Self::new(*l))
            .collect()
    }
    fn calc_inv<P: Fp256Parameters>() -> Self {
        Self(compute_inv64(words_to_u64(&P::MODULUS.0)[0]))
    }
}

fn define_field<L: Limb>(name: &str, limbs: Vec<L>) -> String {
    format!(
        "#define {} ((FIELD){{ {{ {} }} }})",
        name,
        join(
            limbs
                .iter()
                .map(|l| format!("{}{}", l.value(), L::literal_suffix())),
            ", "
        )
    )
}

/// Generates OpenCL constants and type definitions of the field with
/// parameters `P`.
fn params<P: Fp256Parameters, L: Limb>() -> String {
    let one = L::limbs_of(&P::R); // Montgomery form of one
    let p = L::limbs_of(&P::MODULUS); // Plain modulus
    let mut p_minus_2 = P::MODULUS;
    p_minus_2.sub_noborrow(&BigInteger256::from(2));
    let limbs = one.len();
    let limb_def = format!("#define FIELD_limb {}", L::opencl_type());
    let limbs_def = format!("#define FIELD_LIMBS {}", limbs);
    let limb_bits_def = format!("#define FIELD_LIMB_BITS {}", L::bits());
    let one_def = define_field("FIELD_ONE", one);
    let p_def = define_field("FIELD_P", p);
    let r2_def = define_field("FIELD_R2", L::limbs_of(&P::R2));
    let zero_def = define_field("FIELD_ZERO", vec![L::zero(); limbs]);
    let p_minus_2_def = define_field("FIELD_P_MINUS_2", L::limbs_of(&p_minus_2));
    let inv_def = format!(
        "#define FIELD_INV {}{}",
        L::calc_inv::<P>().value(),
        L::literal_suffix()
    );
    let typedef = "typedef struct { FIELD_limb val[FIELD_LIMBS]; } FIELD;".to_string();
    join(
        &[
            limb_def,
            limbs_def,
            limb_bits_def,
            one_def,
            p_def,
            r2_def,
            zero_def,
            p_minus_2_def,
            inv_def,
            typedef,
        ],
        "\n",
    )
}

/// Returns the OpenCL source of the field with parameters `P` under `name`:
/// its constants, arithmetic and element-wise kernels.
pub fn field<P: Fp256Parameters, L: Limb>(name: &str) -> String {
    join(
        &[
            params::<P, L>(),
            String::from(FIELD_SRC),
            String::from(KERNELS_SRC),
        ],
        "\n",
    )
    .replace("FIELD", name)
}

fn field_name<P: Fp256Parameters>() -> &'static str {
    if P::MODULUS == pallas::FqParameters::MODULUS {
        PALLAS_FIELD
    } else {
        VESTA_FIELD
    }
}

/// The complete program: both Pasta fields, plus `Fp`/`Fr` aliases bound to
/// the active field roles.
pub fn kernel(limb64: bool) -> String {
    let (pallas_src, vesta_src) = if limb64 {
        (
            field::<pallas::FqParameters, Limb64>(PALLAS_FIELD),
            field::<vesta::FqParameters, Limb64>(VESTA_FIELD),
        )
    } else {
        (
            field::<pallas::FqParameters, Limb32>(PALLAS_FIELD),
            field::<vesta::FqParameters, Limb32>(VESTA_FIELD),
        )
    };
    let aliases = format!(
        "typedef {} Fp;\ntypedef {} Fr;",
        field_name::<<ActiveCycle as CurveCycle>::BaseParameters>(),
        field_name::<<ActiveCycle as CurveCycle>::ScalarParameters>(),
    );
    vec![COMMON_SRC.to_string(), pallas_src, vesta_src, aliases].join("\n\n")
}

lazy_static! {
    static ref KERNEL_32: String = kernel(false);
    static ref KERNEL_64: String = kernel(true);
}

/// Cached `kernel(limb64)`.
pub fn kernel_source(limb64: bool) -> &'static str {
    let src: &'static String = if limb64 { &*KERNEL_64 } else { &*KERNEL_32 };
    info!(
        "Pasta OpenCL program with {}-bit limbs: {} bytes",
        if limb64 { 64 } else { 32 },
        src.len()
    );
    src.as_str()
}
