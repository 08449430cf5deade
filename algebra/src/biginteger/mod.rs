use crate::{
    bytes::{FromBytes, ToBytes},
    UniformRand,
};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    io::{Read, Result as IoResult, Write},
};

pub mod arithmetic;
use self::arithmetic as fa;


/// Number of 32-bit words of a `BigInteger256`.
pub const NUM_LIMBS: usize = 8;

/// Size in bytes of the canonical serialization of a `BigInteger256`.
pub const NUM_BYTES: usize = NUM_LIMBS * 4;

/// A 256-bit unsigned integer as eight 32-bit words, least significant word first.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct BigInteger256(pub [u32; NUM_LIMBS]);

impl BigInteger256 {
    pub const fn new(value: [u32; NUM_LIMBS]) -> Self {
        BigInteger256(value)
    }

    /// Little-endian byte encoding: word 0 first, each word little-endian.
    pub fn to_bytes_le(&self) -> [u8; NUM_BYTES] {
        let mut bytes = [0u8; NUM_BYTES];
        LittleEndian::write_u32_into(&self.0, &mut bytes);
        bytes
    }

    pub fn from_bytes_le(bytes: &[u8; NUM_BYTES]) -> Self {
        let mut limbs = [0u32; NUM_LIMBS];
        LittleEndian::read_u32_into(bytes, &mut limbs);
        BigInteger256(limbs)
    }

    /// Constant-time `self >= other`, as 0 or 1.
    #[inline]
    pub(crate) fn ct_geq(&self, other: &Self) -> u32 {
        let mut borrow = 0;
        for i in 0..NUM_LIMBS {
            fa::sbb(self.0[i], other.0[i], &mut borrow);
        }
        borrow ^ 1
    }
}

/// This defines a `BigInteger`, a smart wrapper around a
/// sequence of `u32` limbs, least-significant limb first.
pub trait BigInteger:
    ToBytes
    + FromBytes
    + Copy
    + Clone
    + Debug
    + Default
    + Display
    + Eq
    + Ord
    + Send
    + Sized
    + Sync
    + 'static
    + UniformRand
    + AsMut<[u32]>
    + AsRef<[u32]>
    + From<u64>
{
    /// Add another representation to this one, returning the carry bit.
    fn add_nocarry(&mut self, other: &Self) -> bool;

    /// Subtract another representation from this one, returning the borrow bit.
    fn sub_noborrow(&mut self, other: &Self) -> bool;

    /// Performs a leftwise bitshift of this number, effectively multiplying
    /// it by 2. Overflow is ignored.
    fn mul2(&mut self);

    /// Performs a leftwise bitshift of this number by some amount.
    fn muln(&mut self, amt: u32);

    /// Performs a rightwise bitshift of this number, effectively dividing
    /// it by 2.
    fn div2(&mut self);

    /// Performs a rightwise bitshift of this number by some amount.
    fn divn(&mut self, amt: u32);

    /// Returns true iff this number is odd.
    fn is_odd(&self) -> bool;

    /// Returns true iff this number is even.
    fn is_even(&self) -> bool;

    /// Returns true iff this number is zero.
    fn is_zero(&self) -> bool;

    /// Compute the number of bits needed to encode this number.
    fn num_bits(&self) -> u32;

    /// Compute the `i`-th bit of `self`.
    fn get_bit(&self, i: usize) -> bool;

    /// Returns the big-endian bit decomposition of `self`.
    fn to_bits(&self) -> Vec<bool>;

    /// Returns a `BigInteger` from its big-endian bit decomposition, or `None`
    /// if it does not fit.
    fn from_bits(bits: &[bool]) -> Option<Self>;
}

impl BigInteger for BigInteger256 {
    #[inline]
    fn add_nocarry(&mut self, other: &Self) -> bool {
        let mut carry = 0;
        for i in 0..NUM_LIMBS {
            self.0[i] = fa::adc(self.0[i], other.0[i], &mut carry);
        }
        carry != 0
    }

    #[inline]
    fn sub_noborrow(&mut self, other: &Self) -> bool {
        let mut borrow = 0;
        for i in 0..NUM_LIMBS {
            self.0[i] = fa::sbb(self.0[i], other.0[i], &mut borrow);
        }
        borrow != 0
    }

    #[inline]
    fn mul2(&mut self) {
        let mut last = 0;
        for i in 0..NUM_LIMBS {
            let tmp = self.0[i] >> 31;
            self.0[i] <<= 1;
            self.0[i] |= last;
            last = tmp;
        }
    }

    #[inline]
    fn muln(&mut self, mut n: u32) {
        if n >= 32 * NUM_LIMBS as u32 {
            *self = Self::from(0);
            return;
        }
        while n >= 32 {
            let mut t = 0;
            for i in 0..NUM_LIMBS {
                std::mem::swap(&mut t, &mut self.0[i]);
            }
            n -= 32;
        }
        if n > 0 {
            let mut t = 0;
            for i in 0..NUM_LIMBS {
                let t2 = self.0[i] >> (32 - n);
                self.0[i] <<= n;
                self.0[i] |= t;
                t = t2;
            }
        }
    }

    #[inline]
    fn div2(&mut self) {
        let mut t = 0;
        for i in self.0.iter_mut().rev() {
            let t2 = *i << 31;
            *i >>= 1;
            *i |= t;
            t = t2;
        }
    }

    #[inline]
    fn divn(&mut self, mut n: u32) {
        if n >= 32 * NUM_LIMBS as u32 {
            *self = Self::from(0);
            return;
        }
        while n >= 32 {
            let mut t = 0;
            for i in 0..NUM_LIMBS {
                std::mem::swap(&mut t, &mut self.0[NUM_LIMBS - 1 - i]);
            }
            n -= 32;
        }
        if n > 0 {
            let mut t = 0;
            for i in 0..NUM_LIMBS {
                let t2 = self.0[NUM_LIMBS - 1 - i] << (32 - n);
                self.0[NUM_LIMBS - 1 - i] >>= n;
                self.0[NUM_LIMBS - 1 - i] |= t;
                t = t2;
            }
        }
    }

    #[inline]
    fn is_odd(&self) -> bool {
        self.0[0] & 1 == 1
    }

    #[inline]
    fn is_even(&self) -> bool {
        !self.is_odd()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    #[inline]
    fn num_bits(&self) -> u32 {
        let mut ret = NUM_LIMBS as u32 * 32;
        for i in self.0.iter().rev() {
            let leading = i.leading_zeros();
            ret -= leading;
            if leading != 32 {
                break;
            }
        }
        ret
    }

    #[inline]
    fn get_bit(&self, i: usize) -> bool {
        if i >= 32 * NUM_LIMBS {
            false
        } else {
            let limb = i / 32;
            let bit = i - (32 * limb);
            (self.0[limb] & (1 << bit)) != 0
        }
    }

    fn to_bits(&self) -> Vec<bool> {
        (0..32 * NUM_LIMBS).rev().map(|i| self.get_bit(i)).collect()
    }

    fn from_bits(bits: &[bool]) -> Option<Self> {
        // Leading bits beyond 256 must all be zero.
        let excess = bits.len().saturating_sub(32 * NUM_LIMBS);
        if bits[..excess].iter().any(|&b| b) {
            return None;
        }
        let mut res = Self::default();
        for (i, bit) in bits[excess..].iter().rev().enumerate() {
            if *bit {
                res.0[i / 32] |= 1 << (i % 32);
            }
        }
        Some(res)
    }
}

impl ToBytes for BigInteger256 {
    #[inline]
    fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
        for limb in self.0.iter() {
            writer.write_u32::<LittleEndian>(*limb)?;
        }
        Ok(())
    }
}

impl FromBytes for BigInteger256 {
    #[inline]
    fn read<R: Read>(mut reader: R) -> IoResult<Self> {
        let mut res = [0u32; NUM_LIMBS];
        reader.read_u32_into::<LittleEndian>(&mut res)?;
        Ok(BigInteger256(res))
    }
}

impl Display for BigInteger256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for i in self.0.iter().rev() {
            write!(f, "{:08x}", *i)?;
        }
        Ok(())
    }
}

impl Ord for BigInteger256 {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        for (a, b) in self.0.iter().rev().zip(other.0.iter().rev()) {
            if a < b {
                return std::cmp::Ordering::Less;
            } else if a > b {
                return std::cmp::Ordering::Greater;
            }
        }
        std::cmp::Ordering::Equal
    }
}

impl PartialOrd for BigInteger256 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Distribution<BigInteger256> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BigInteger256 {
        BigInteger256(rng.gen())
    }
}

impl AsMut<[u32]> for BigInteger256 {
    #[inline]
    fn as_mut(&mut self) -> &mut [u32] {
        &mut self.0
    }
}

impl AsRef<[u32]> for BigInteger256 {
    #[inline]
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl From<u64> for BigInteger256 {
    #[inline]
    fn from(val: u64) -> BigInteger256 {
        let mut repr = Self::default();
        repr.0[0] = val as u32;
        repr.0[1] = (val >> 32) as u32;
        repr
    }
}
