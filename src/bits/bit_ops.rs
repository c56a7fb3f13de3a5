// Shift and mask helpers that stay defined for a shift of 64.

/// Shift left a value up to 64 bits.
#[inline]
pub fn shift_left(data: u64, bits: u32) -> u64 {
    data.checked_shl(bits).unwrap_or(0)
}

/// Shift right a value up to 64 bits.
#[inline]
pub fn shift_right(data: u64, bits: u32) -> u64 {
    data.checked_shr(bits).unwrap_or(0)
}

/// Keep only the low `bits` bits of `data`.
#[inline]
pub fn low_bits(data: u64, bits: u32) -> u64 {
    if bits >= 64 {
        data
    } else {
        data & ((1u64 << bits) - 1)
    }
}
