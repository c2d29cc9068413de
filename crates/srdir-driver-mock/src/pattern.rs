//! Sample pattern generation for the mock device.

use crate::rng::MockRng;
use std::f32::consts::TAU;

/// Samples per period of the first analog channel's sine.
pub const BASE_PERIOD_SAMPLES: u64 = 100;

/// Peak noise added to every analog sample.
pub const NOISE_AMPLITUDE: f32 = 0.01;

/// Packed logic samples `start..start + count` of a binary counter.
///
/// Sample `i` carries the low `channel_count` bits of `i`, little-endian,
/// in `unit_size` bytes per sample.
pub fn logic_counter(start: u64, count: usize, channel_count: usize, unit_size: usize) -> Vec<u8> {
    let mask = if channel_count >= 64 {
        u64::MAX
    } else {
        (1u64 << channel_count) - 1
    };

    let mut out = Vec::with_capacity(count * unit_size);
    for i in start..start + count as u64 {
        let bytes = (i & mask).to_le_bytes();
        for byte in 0..unit_size {
            out.push(bytes.get(byte).copied().unwrap_or(0));
        }
    }
    out
}

/// Analog samples `start..start + count` of buffer slot `slot`.
///
/// Slot `n` is a sine of amplitude `n + 1` with a period of
/// `(n + 1) * BASE_PERIOD_SAMPLES` samples, plus uniform noise.
pub fn analog_sine(start: u64, count: usize, slot: usize, rng: &mut MockRng) -> Vec<f32> {
    let amplitude = (slot + 1) as f32;
    let period = BASE_PERIOD_SAMPLES * (slot as u64 + 1);

    (start..start + count as u64)
        .map(|i| {
            let phase = (i % period) as f32 / period as f32;
            amplitude * (TAU * phase).sin() + rng.noise(NOISE_AMPLITUDE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_counter_single_byte() {
        assert_eq!(logic_counter(0, 4, 8, 1), vec![0, 1, 2, 3]);
        assert_eq!(logic_counter(254, 3, 8, 1), vec![254, 255, 0]);
    }

    #[test]
    fn test_logic_counter_masks_channels() {
        // Three channels wrap every 8 samples.
        assert_eq!(logic_counter(6, 4, 3, 1), vec![6, 7, 0, 1]);
    }

    #[test]
    fn test_logic_counter_multi_byte() {
        assert_eq!(logic_counter(0x1234, 1, 16, 2), vec![0x34, 0x12]);
        // Channels beyond 64 bits stay low.
        let wide = logic_counter(1, 1, 72, 9);
        assert_eq!(wide, vec![1, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_analog_sine_shape() {
        let mut rng = MockRng::new(Some(1));
        let values = analog_sine(0, 100, 0, &mut rng);
        assert_eq!(values.len(), 100);
        assert!(values[0].abs() <= NOISE_AMPLITUDE);
        assert!((values[25] - 1.0).abs() <= 2.0 * NOISE_AMPLITUDE);
        assert!((values[75] + 1.0).abs() <= 2.0 * NOISE_AMPLITUDE);
    }

    #[test]
    fn test_analog_slots_scale_amplitude() {
        let mut rng = MockRng::new(Some(1));
        let values = analog_sine(0, 200, 1, &mut rng);
        // Peak of slot 1 at a quarter of its 200-sample period.
        assert!((values[50] - 2.0).abs() <= 2.0 * NOISE_AMPLITUDE);
    }
}
