//! Base field Fq of the Pallas curve, a 255 bit prime field with duadicity 32.

use crate::{
    biginteger::BigInteger256 as BigInteger,
    fields::{compute_inv, Fp256, Fp256Parameters, FpParameters},
};

pub type Fq = Fp256<FqParameters>;

pub struct FqParameters;

impl Fp256Parameters for FqParameters {}
impl FpParameters for FqParameters {
    type BigInt = BigInteger;

    /// MODULUS = 2^254 + 45560315531419706090280762371685220353 =
    /// 2894802230932904885589274625217197696336305648194156071595467676434996\
    /// 7630337
    const MODULUS: BigInteger = BigInteger([
        0x00000001,
        0x992d30ed,
        0x094cf91b,
        0x224698fc,
        0x00000000,
        0x00000000,
        0x00000000,
        0x40000000,
    ]);

    const MODULUS_BITS: u32 = 255;

    const CAPACITY: u32 = Self::MODULUS_BITS - 1;

    const REPR_SHAVE_BITS: u32 = 1;

    /// R = 2^256 mod MODULUS =
    /// 2894802230932904885589274625217197696318081521981588189159355371486322\
    /// 6748925
    const R: BigInteger = BigInteger([
        0xfffffffd,
        0x34786d38,
        0xe41914ad,
        0x992c350b,
        0xffffffff,
        0xffffffff,
        0xffffffff,
        0x3fffffff,
    ]);

    /// R2 = R^2 mod MODULUS =
    /// 4263855311831330276397237192126260515652039413828781833859739249380679\
    /// 483407
    const R2: BigInteger = BigInteger([
        0x0000000f,
        0x8c78ecb3,
        0x8b0de0e7,
        0xd7d30dbd,
        0xc3c95d18,
        0x7797a99b,
        0x7b9cb714,
        0x096d41af,
    ]);

    const INV: u32 = 0xffffffff;

    /// GENERATOR = 5
    const GENERATOR: BigInteger = BigInteger([
        0xffffffed,
        0xa1a55e68,
        0x4f4982f3,
        0x74c2a54b,
        0xfffffffd,
        0xffffffff,
        0xffffffff,
        0x3fffffff,
    ]);

    const TWO_ADICITY: u32 = 32;

    /// 2^32-th root of unity, GENERATOR^T =
    /// 1981422959024302890664399386611740207251658856629462339632569340936693\
    /// 4201135
    const ROOT_OF_UNITY: BigInteger = BigInteger([
        0xbad6dbf0,
        0xa28db849,
        0xd3b539df,
        0x9083cd03,
        0x9dc8448e,
        0xfba6b9ca,
        0x7b89c6da,
        0x3ec92874,
    ]);

    /// (MODULUS - 1) / 2 =
    /// 1447401115466452442794637312608598848168152824097078035797733838217498\
    /// 3815168
    const MODULUS_MINUS_ONE_DIV_TWO: BigInteger = BigInteger([
        0x80000000,
        0xcc969876,
        0x04a67c8d,
        0x11234c7e,
        0x00000000,
        0x00000000,
        0x00000000,
        0x20000000,
    ]);

    // T and T_MINUS_ONE_DIV_TWO, where MODULUS - 1 = 2^S * T

    /// T = (MODULUS - 1) / 2^S =
    /// 6739986666787659948666753771754907668419893943225396963757154709741
    const T: BigInteger = BigInteger([
        0x992d30ed,
        0x094cf91b,
        0x224698fc,
        0x00000000,
        0x00000000,
        0x00000000,
        0x40000000,
        0x00000000,
    ]);

    /// (T - 1) / 2 =
    /// 3369993333393829974333376885877453834209946971612698481878577354870
    const T_MINUS_ONE_DIV_TWO: BigInteger = BigInteger([
        0xcc969876,
        0x04a67c8d,
        0x11234c7e,
        0x00000000,
        0x00000000,
        0x00000000,
        0x20000000,
        0x00000000,
    ]);
}

const _: () = assert!(FqParameters::MODULUS.0[0] & 1 == 1);
const _: () = assert!(FqParameters::MODULUS.0[7] < 0x8000_0000);
const _: () = assert!(FqParameters::INV == compute_inv(FqParameters::MODULUS.0[0]));
