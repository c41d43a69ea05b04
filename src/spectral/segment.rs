// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Time-domain preparation of an axis before spectral analysis

/// Subtract the arithmetic mean from every sample
///
/// The output has the same length as the input. An empty input yields an
/// empty output.
pub fn remove_dc_offset(samples: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    samples.iter().map(|&x| x - mean).collect()
}

/// Split a series into equal, contiguous, power-of-two-length blocks
///
/// The block count is the largest `count <= max_segments` for which a
/// power-of-two length `L >= min_length` satisfies `count · L <= len`; the
/// block length is then the largest such `L`. Samples left over after the
/// last block are discarded.
///
/// An empty vector is returned when the input is shorter than `min_length`
/// or `max_segments` is zero.
///
/// ### Example
///
/// ```
/// use rust_bluvib::spectral::segment::segment_into_power_of_two_blocks;
///
/// let samples = vec![0.0; 1000];
/// let blocks = segment_into_power_of_two_blocks(&samples, 256, 4);
/// assert_eq!(blocks.len(), 3);
/// assert!(blocks.iter().all(|b| b.len() == 256));
/// ```
pub fn segment_into_power_of_two_blocks(
    samples: &[f64],
    min_length: usize,
    max_segments: usize,
) -> Vec<&[f64]> {
    let min_length = min_length.max(1);
    if samples.len() < min_length {
        return Vec::new();
    }

    for count in (1..=max_segments).rev() {
        let share = samples.len() / count;
        if share == 0 {
            continue;
        }
        let length = largest_power_of_two_at_most(share);
        if length >= min_length {
            return samples.chunks_exact(length).take(count).collect();
        }
    }

    Vec::new()
}

/// Largest power of two that is not greater than `value` (`value > 0`)
fn largest_power_of_two_at_most(value: usize) -> usize {
    1 << (usize::BITS - 1 - value.leading_zeros())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_remove_dc_offset_zeroes_mean() {
        let out = remove_dc_offset(&[1.0, 2.0, 3.0, 6.0]);
        assert_eq!(out.len(), 4);
        assert_relative_eq!(out[0], -2.0);
        assert_relative_eq!(out[3], 3.0);
        assert_relative_eq!(out.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_remove_dc_offset_empty() {
        assert!(remove_dc_offset(&[]).is_empty());
    }

    #[test]
    fn test_largest_power_of_two() {
        assert_eq!(largest_power_of_two_at_most(1), 1);
        assert_eq!(largest_power_of_two_at_most(255), 128);
        assert_eq!(largest_power_of_two_at_most(256), 256);
        assert_eq!(largest_power_of_two_at_most(333), 256);
    }

    #[test]
    fn test_segment_exact_multiple() {
        let samples: Vec<f64> = (0..1024).map(|i| i as f64).collect();
        let blocks = segment_into_power_of_two_blocks(&samples, 256, 4);
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.len() == 256));
        // Blocks are contiguous and disjoint
        assert_eq!(blocks[1][0], 256.0);
        assert_eq!(blocks[3][255], 1023.0);
    }

    #[test]
    fn test_segment_prefers_longer_blocks_for_long_series() {
        let samples = vec![0.0; 4096];
        let blocks = segment_into_power_of_two_blocks(&samples, 256, 4);
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.len() == 1024));
    }

    #[test]
    fn test_segment_reduces_count_when_too_short() {
        assert_eq!(segment_into_power_of_two_blocks(&vec![0.0; 512], 256, 4).len(), 2);
        assert_eq!(segment_into_power_of_two_blocks(&vec![0.0; 300], 256, 4).len(), 1);
        assert_eq!(segment_into_power_of_two_blocks(&vec![0.0; 256], 256, 4).len(), 1);
    }

    #[test]
    fn test_segment_shorter_than_min_length_is_empty() {
        assert!(segment_into_power_of_two_blocks(&vec![0.0; 255], 256, 4).is_empty());
        assert!(segment_into_power_of_two_blocks(&vec![0.0; 64], 256, 4).is_empty());
        assert!(segment_into_power_of_two_blocks(&[], 256, 4).is_empty());
    }

    #[test]
    fn test_segment_zero_max_segments_is_empty() {
        assert!(segment_into_power_of_two_blocks(&vec![0.0; 1024], 256, 0).is_empty());
    }

    #[test]
    fn test_segmentation_law_on_random_lengths() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let len = rng.random_range(0..20_000usize);
            let min_length = 1usize << rng.random_range(0..10u32);
            let max_segments = rng.random_range(0..8usize);
            let samples = vec![0.0; len];

            let blocks = segment_into_power_of_two_blocks(&samples, min_length, max_segments);

            assert!(blocks.len() <= max_segments);
            if len < min_length {
                assert!(blocks.is_empty());
            }
            for block in &blocks {
                assert!(block.len().is_power_of_two());
                assert!(block.len() >= min_length);
                assert_eq!(block.len(), blocks[0].len());
            }
            assert!(blocks.len() * blocks.first().map_or(0, |b| b.len()) <= len);
        }
    }
}
