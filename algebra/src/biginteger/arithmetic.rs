//! Single-word primitives for multi-precision arithmetic over 32-bit limbs.
//! Every intermediate fits into a `u64`, which keeps the data flow identical
//! on targets without a native 64x64 multiplier.

/// Calculate a + b + carry, returning the sum and modifying the
/// carry value.
#[inline(always)]
pub fn adc(a: u32, b: u32, carry: &mut u32) -> u32 {
    let tmp = u64::from(a) + u64::from(b) + u64::from(*carry);
    *carry = (tmp >> 32) as u32;
    tmp as u32
}

/// Calculate a - b - borrow, returning the result and modifying
/// the borrow value.
#[inline(always)]
pub fn sbb(a: u32, b: u32, borrow: &mut u32) -> u32 {
    let tmp = (1u64 << 32) + u64::from(a) - u64::from(b) - u64::from(*borrow);
    *borrow = ((tmp >> 32) as u32) ^ 1;
    tmp as u32
}

/// Calculate a + b * c, returning the lower 32 bits of the result and setting
/// `carry` to the upper 32 bits.
#[inline(always)]
pub fn mac(a: u32, b: u32, c: u32, carry: &mut u32) -> u32 {
    let tmp = u64::from(a) + u64::from(b) * u64::from(c);
    *carry = (tmp >> 32) as u32;
    tmp as u32
}

/// Calculate a + b * c, discarding the lower 32 bits of the result and setting
/// `carry` to the upper 32 bits.
#[inline(always)]
pub fn mac_discard(a: u32, b: u32, c: u32, carry: &mut u32) {
    let tmp = u64::from(a) + u64::from(b) * u64::from(c);
    *carry = (tmp >> 32) as u32;
}

/// Calculate a + (b * c) + carry, returning the least significant digit
/// and setting carry to the most significant digit.
#[inline(always)]
pub fn mac_with_carry(a: u32, b: u32, c: u32, carry: &mut u32) -> u32 {
    let tmp = u64::from(a) + u64::from(b) * u64::from(c) + u64::from(*carry);
    *carry = (tmp >> 32) as u32;
    tmp as u32
}

/// All-ones when `flag == 1`, all-zeros when `flag == 0`.
#[inline(always)]
pub fn mask(flag: u32) -> u32 {
    0u32.wrapping_sub(flag & 1)
}
