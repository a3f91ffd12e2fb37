//! Power-of-two arithmetic and bit-level distance helpers.

/// Width in bits of the signature encoding.
pub const HASH_BITS: u32 = u32::BITS;

/// Largest exponent considered by [`nearest_power_of_two`].
pub const MAX_EXPONENT: u32 = 31;

/// Returns `true` if `n` is a positive power of two.
///
/// Zero and negative values are never powers of two.
pub fn is_power_of_two(n: i64) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Finds the power of two closest to `n`.
///
/// The search climbs exponents from zero and stops at the first exponent
/// whose successor is not strictly closer. Distances are measured in log2
/// space, so the result agrees with `2^round(log2(n))`: `100` maps to `128`
/// and `6` maps to `8`.
///
/// Inputs `<= 1` (and NaN) return the sentinel `1`. The exponent never
/// exceeds [`MAX_EXPONENT`].
pub fn nearest_power_of_two(n: f64) -> usize {
    if n.is_nan() || n <= 1.0 {
        return 1;
    }

    let target = n.log2().min(f64::from(MAX_EXPONENT + 1));
    let mut exponent = 0u32;
    let mut distance = target;
    while exponent < MAX_EXPONENT {
        let next = (target - f64::from(exponent + 1)).abs();
        if next >= distance {
            break;
        }
        exponent += 1;
        distance = next;
    }
    1usize << exponent
}

/// Counts the differing bits between the IEEE-754 encodings of `a` and `b`.
///
/// This is a structural distance: numerically close values can differ in many
/// bits when their exponents differ.
pub fn bit_distance(a: f32, b: f32) -> u32 {
    (a.to_bits() ^ b.to_bits()).count_ones()
}

/// Returns `true` if both dimensions are powers of two.
pub(crate) fn dims_are_powers_of_two(width: usize, height: usize) -> bool {
    let pow2 = |v: usize| i64::try_from(v).map_or(false, is_power_of_two);
    pow2(width) && pow2(height)
}
