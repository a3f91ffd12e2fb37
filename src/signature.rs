//! Scalar signatures and their reduction from coefficient blocks.

use crate::transform::FrequencyMatrix;
use crate::util::math::{bit_distance, HASH_BITS};
use crate::util::{DctHashError, DctHashResult};
use std::fmt;

/// Perceptual signature of one image: the mean low-frequency AC coefficient.
///
/// Signatures are compared through the bits of their 32-bit float encoding,
/// never through their numeric difference.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Signature(f32);

impl Signature {
    /// Wraps a raw signature value.
    pub fn from_value(value: f32) -> Self {
        Self(value)
    }

    /// Rebuilds a signature from its 32-bit encoding.
    pub fn from_bits(bits: u32) -> Self {
        Self(f32::from_bits(bits))
    }

    /// The signature value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// The IEEE-754 encoding of the value.
    pub fn bits(self) -> u32 {
        self.0.to_bits()
    }

    /// Number of differing encoding bits, in `0..=32`.
    pub fn distance(self, other: Signature) -> u32 {
        bit_distance(self.0, other.0)
    }

    /// Similarity score in `[0, 1]`; `1.0` for identical encodings.
    pub fn similarity(self, other: Signature) -> f32 {
        let bits = HASH_BITS as f32;
        (bits - self.distance(other) as f32) / bits
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.bits())
    }
}

/// Averages the AC coefficients of `block`.
///
/// The whole block is summed (each row first, then the row sums), the DC
/// coefficient at `(0, 0)` is subtracted and the remainder is divided by the
/// number of AC coefficients. Blocks with fewer than two coefficients fail
/// with [`DctHashError::EmptyBlock`].
pub fn average_ac_energy(block: &FrequencyMatrix) -> DctHashResult<Signature> {
    let len = block.len();
    if len < 2 {
        return Err(DctHashError::EmptyBlock { len });
    }

    let view = block.view();
    let mut total = 0.0f32;
    for y in 0..view.height() {
        let row = view.row_checked(y)?;
        total += row.iter().sum::<f32>();
    }

    let ac_sum = total - block.dc();
    Ok(Signature(ac_sum / (len - 1) as f32))
}

#[cfg(test)]
mod tests {
    use super::{average_ac_energy, Signature};
    use crate::transform::FrequencyMatrix;
    use crate::util::DctHashError;

    #[test]
    fn average_excludes_dc() {
        let block = FrequencyMatrix::new(vec![100.0, 1.0, 2.0, 3.0], 2, 2).unwrap();
        let sig = average_ac_energy(&block).unwrap();
        assert_eq!(sig.value(), 2.0);
    }

    #[test]
    fn dc_only_block_averages_to_zero() {
        let mut data = vec![0.0f32; 16];
        data[0] = 512.0;
        let block = FrequencyMatrix::new(data, 4, 4).unwrap();
        assert_eq!(average_ac_energy(&block).unwrap().value(), 0.0);

        let block = FrequencyMatrix::new(vec![9.0, 0.0], 2, 1).unwrap();
        assert_eq!(average_ac_energy(&block).unwrap().value(), 0.0);
    }

    #[test]
    fn single_coefficient_block_is_empty() {
        let block = FrequencyMatrix::new(vec![42.0], 1, 1).unwrap();
        assert_eq!(
            average_ac_energy(&block).unwrap_err(),
            DctHashError::EmptyBlock { len: 1 }
        );
    }

    #[test]
    fn similarity_scales_bit_distance() {
        let a = Signature::from_bits(0);
        assert_eq!(a.similarity(a), 1.0);
        assert_eq!(a.similarity(Signature::from_bits(0xFFFF_0000)), 0.5);
        assert_eq!(a.similarity(Signature::from_bits(u32::MAX)), 0.0);
        assert_eq!(Signature::from_value(1.5).to_string(), "3fc00000");
    }
}
