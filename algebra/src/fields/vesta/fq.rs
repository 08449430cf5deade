//! Base field Fq of the Vesta curve, a 255 bit prime field with duadicity 32.

use crate::{
    biginteger::BigInteger256 as BigInteger,
    fields::{compute_inv, Fp256, Fp256Parameters, FpParameters},
};

pub type Fq = Fp256<FqParameters>;

pub struct FqParameters;

impl Fp256Parameters for FqParameters {}
impl FpParameters for FqParameters {
    type BigInt = BigInteger;

    /// MODULUS = 2^254 + 45560315531506369815346746415080538113 =
    /// 2894802230932904885589274625217197696336305648194164737967974274839336\
    /// 2948097
    const MODULUS: BigInteger = BigInteger([
        0x00000001,
        0x8c46eb21,
        0x0994a8dd,
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
    /// 2894802230932904885589274625217197696318081521981562190041835576273304\
    /// 0795645
    const R: BigInteger = BigInteger([
        0xfffffffd,
        0x5b2b3e9c,
        0xe3420567,
        0x992c350b,
        0xffffffff,
        0xffffffff,
        0xffffffff,
        0x3fffffff,
    ]);

    /// R2 = R^2 mod MODULUS =
    /// 4263855311957679929489659445116329028194309752796460188622876710448966\
    /// 664207
    const R2: BigInteger = BigInteger([
        0x0000000f,
        0xfc9678ff,
        0x891a16e3,
        0x67bb433d,
        0x04ccf590,
        0x7fae2310,
        0x7ccfdaa9,
        0x096d41af,
    ]);

    const INV: u32 = 0xffffffff;

    /// GENERATOR = 5
    const GENERATOR: BigInteger = BigInteger([
        0xffffffed,
        0x96bc8c8c,
        0x49f7778e,
        0x74c2a54b,
        0xfffffffd,
        0xffffffff,
        0xffffffff,
        0x3fffffff,
    ]);

    const TWO_ADICITY: u32 = 32;

    /// 2^32-th root of unity, GENERATOR^T =
    /// 2076162437916997785970591163419012176150356537070335607964776890352129\
    /// 9517535
    const ROOT_OF_UNITY: BigInteger = BigInteger([
        0x8c9942de,
        0x21807742,
        0x21b60494,
        0xcc495789,
        0xb2efbee2,
        0xac2e5d27,
        0x7f2db056,
        0x0b79fa89,
    ]);

    /// (MODULUS - 1) / 2 =
    /// 1447401115466452442794637312608598848168152824097082368983987137419668\
    /// 1474048
    const MODULUS_MINUS_ONE_DIV_TWO: BigInteger = BigInteger([
        0x80000000,
        0xc6237590,
        0x04ca546e,
        0x11234c7e,
        0x00000000,
        0x00000000,
        0x00000000,
        0x20000000,
    ]);

    // T and T_MINUS_ONE_DIV_TWO, where MODULUS - 1 = 2^S * T

    /// T = (MODULUS - 1) / 2^S =
    /// 6739986666787659948666753771754907668419893943225417141728043264801
    const T: BigInteger = BigInteger([
        0x8c46eb21,
        0x0994a8dd,
        0x224698fc,
        0x00000000,
        0x00000000,
        0x00000000,
        0x40000000,
        0x00000000,
    ]);

    /// (T - 1) / 2 =
    /// 3369993333393829974333376885877453834209946971612708570864021632400
    const T_MINUS_ONE_DIV_TWO: BigInteger = BigInteger([
        0xc6237590,
        0x04ca546e,
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
