//! Downsampling of an amplitude envelope into a fixed number of bars.
//!
//! The sample buffer is treated as a step signal over `[0, N)` and cut into
//! `bar_count` windows of width `N / bar_count`. Each bar is the box-filtered
//! average of its window, with samples that straddle a window edge contributing
//! only the overlapping fraction of their cell.

use crate::error::WaveformError;

/// Compresses `samples` into exactly `bar_count` bar heights.
///
/// No range normalization is applied: samples in `[0, 1]` produce bars in
/// `[0, 1]`, anything else passes through scaled by the same weights.
///
/// # Errors
/// - `InvalidBarCount` if `bar_count` is zero
/// - `EmptySamples` if `samples` is empty
pub fn resample(samples: &[f64], bar_count: usize) -> Result<Vec<f64>, WaveformError> {
    if bar_count == 0 {
        return Err(WaveformError::InvalidBarCount(bar_count));
    }
    if samples.is_empty() {
        return Err(WaveformError::EmptySamples);
    }

    let sample_count = samples.len() as f64;
    let sweep = sample_count / bar_count as f64;
    let last_index = samples.len() - 1;

    let bars = (0..bar_count)
        .map(|bar| {
            // Edges come from the bar index, never from a running cursor
            let start = bar as f64 * sweep;
            let end = if bar + 1 == bar_count {
                sample_count
            } else {
                (bar + 1) as f64 * sweep
            };

            // Weighted deviations from the first sample, so a flat window sums to zero
            let base = samples[(start.floor() as usize).min(last_index)];
            let mut cursor = start;
            let mut total = 0.0;
            while cursor < end {
                let cell = cursor.floor();
                // Step to whichever comes first: the next cell boundary or the window end
                let next = (cell + 1.0).min(end);
                let index = (cell as usize).min(last_index);
                total += (samples[index] - base) * (next - cursor);
                cursor = next;
            }

            base + total / sweep
        })
        .collect();

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "expected {expected:?}, got {actual:?}");
        }
    }

    #[test]
    fn test_alternating_samples_average_out() {
        let bars = resample(&[0.0, 1.0, 0.0, 1.0], 2).unwrap();
        assert_close(&bars, &[0.5, 0.5]);
    }

    #[test]
    fn test_fractional_sweep_with_constant_input() {
        let bars = resample(&[1.0, 1.0, 1.0], 2).unwrap();
        assert_eq!(bars, vec![1.0, 1.0]);
    }

    #[test]
    fn test_constant_input_is_preserved_for_awkward_ratios() {
        for (len, count) in [(7, 3), (100, 7), (1001, 100), (13, 13), (3, 10), (1, 3)] {
            let samples = vec![0.37; len];
            let bars = resample(&samples, count).unwrap();
            assert_eq!(bars, vec![0.37; count], "len {len}, count {count}");
        }
    }

    #[test]
    fn test_constant_input_is_exact_across_sizes() {
        for value in [0.37, 0.1, 0.7, 0.3, 1.0 / 3.0] {
            for len in 1..300 {
                for count in [1, 2, 3, 7, 10, 13, 33, 100] {
                    let bars = resample(&vec![value; len], count).unwrap();
                    assert!(
                        bars.iter().all(|&b| b == value),
                        "{value} x {len} into {count} bars gave {bars:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_partial_cells_are_weighted() {
        // sweep = 1.5: bar 0 covers [0, 1.5) -> 0*1 + 1*0.5, bar 1 covers [1.5, 3) -> 1*0.5 + 2*1
        let bars = resample(&[0.0, 1.0, 2.0], 2).unwrap();
        assert_close(&bars, &[0.5 / 1.5, 2.5 / 1.5]);
    }

    #[test]
    fn test_cursor_steps_to_next_boundary_not_back_to_floor() {
        // sweep = 2/3: bar 1 covers [2/3, 4/3), a third of cell 0 and a third of cell 1
        let bars = resample(&[1.0, 0.0], 3).unwrap();
        assert_close(&bars, &[1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_output_stays_within_sample_range() {
        let samples: Vec<f64> = (0..997).map(|i| ((i * 37) % 101) as f64 / 100.0).collect();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let bars = resample(&samples, 100).unwrap();
        assert_eq!(bars.len(), 100);
        for bar in bars {
            assert!(bar >= min - EPSILON && bar <= max + EPSILON, "{bar} outside [{min}, {max}]");
        }
    }

    #[test]
    fn test_scaling_samples_scales_bars() {
        let samples: Vec<f64> = (0..250).map(|i| (i % 17) as f64 / 16.0).collect();
        let scaled: Vec<f64> = samples.iter().map(|s| s * 0.25).collect();

        let bars = resample(&samples, 33).unwrap();
        let scaled_bars = resample(&scaled, 33).unwrap();
        let expected: Vec<f64> = bars.iter().map(|b| b * 0.25).collect();
        assert_close(&scaled_bars, &expected);
    }

    #[test]
    fn test_fewer_samples_than_bars() {
        let bars = resample(&[0.2, 0.8], 4).unwrap();
        assert_close(&bars, &[0.2, 0.2, 0.8, 0.8]);
    }

    #[test]
    fn test_rejects_zero_bar_count() {
        assert_eq!(resample(&[0.5], 0), Err(WaveformError::InvalidBarCount(0)));
    }

    #[test]
    fn test_rejects_empty_samples() {
        assert_eq!(resample(&[], 10), Err(WaveformError::EmptySamples));
    }
}
