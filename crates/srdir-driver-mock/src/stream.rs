//! Datafeed packet stream of one mock acquisition.

use crate::device::MockDeviceConfig;
use crate::pattern::{analog_sine, logic_counter};
use crate::rng::MockRng;
use srdir_core::limits::logic_unit_size;
use srdir_core::{Analog, Channel, ChannelLayout, Logic, Meta, Packet};
use std::collections::VecDeque;

/// Packets of one acquisition run, in stream order.
///
/// Yields a `Meta` packet announcing the sample rate, then for every block
/// of up to `block_samples` samples one `Logic` packet (when any logic
/// channel is enabled) followed by one `Analog` packet per enabled analog
/// channel, and finally `End`.
#[derive(Debug)]
pub struct PacketStream {
    samplerate: u64,
    total_samples: u64,
    block_samples: usize,
    logic_channels: usize,
    unit_size: usize,
    has_logic: bool,
    /// Stable indices of enabled analog channels, by buffer slot.
    analog_channels: Vec<usize>,
    rng: MockRng,
    position: u64,
    pending: VecDeque<Packet>,
    meta_sent: bool,
    finished: bool,
}

impl PacketStream {
    pub(crate) fn new(config: &MockDeviceConfig, channels: &[Channel]) -> Self {
        let layout = ChannelLayout::resolve(channels);
        Self {
            samplerate: config.samplerate,
            total_samples: config.samples,
            block_samples: config.block_samples.max(1),
            logic_channels: layout.logic_channel_count,
            unit_size: logic_unit_size(layout.logic_channel_count),
            has_logic: layout.has_logic(),
            analog_channels: layout.analog_index_map,
            rng: MockRng::new(config.seed),
            position: 0,
            pending: VecDeque::new(),
            meta_sent: false,
            finished: false,
        }
    }

    /// Samples per channel emitted so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Logic unit size of emitted `Logic` packets.
    pub fn unit_size(&self) -> usize {
        self.unit_size
    }

    fn fill_block(&mut self) {
        let remaining = self.total_samples - self.position;
        let count = remaining.min(self.block_samples as u64) as usize;

        if self.has_logic {
            let data = logic_counter(self.position, count, self.logic_channels, self.unit_size);
            self.pending
                .push_back(Packet::Logic(Logic::new(self.unit_size, data)));
        }
        for slot in 0..self.analog_channels.len() {
            let values = analog_sine(self.position, count, slot, &mut self.rng);
            self.pending
                .push_back(Packet::Analog(Analog::from_f32(self.analog_channels[slot], &values)));
        }

        tracing::trace!(position = self.position, count, "Emit mock block");
        self.position += count as u64;
    }
}

impl Iterator for PacketStream {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        if let Some(packet) = self.pending.pop_front() {
            return Some(packet);
        }
        if !self.meta_sent {
            self.meta_sent = true;
            return Some(Packet::Meta(Meta::samplerate(self.samplerate)));
        }
        if self.position < self.total_samples {
            self.fill_block();
            return self.pending.pop_front();
        }
        if !self.finished {
            self.finished = true;
            tracing::debug!(samples = self.position, "Mock acquisition finished");
            return Some(Packet::End);
        }
        None
    }
}

impl std::iter::FusedIterator for PacketStream {}

#[cfg(test)]
mod tests {
    use crate::device::{MockDevice, MockDeviceConfig};

    fn config() -> MockDeviceConfig {
        MockDeviceConfig {
            logic_channels: 4,
            analog_channels: 2,
            samples: 10,
            block_samples: 4,
            seed: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_packet_order() {
        let device = MockDevice::new(config()).unwrap();
        let kinds: Vec<&str> = device.acquire().map(|p| p.kind()).collect();

        let block = ["logic", "analog", "analog"];
        let mut expected = vec!["meta"];
        for _ in 0..3 {
            expected.extend_from_slice(&block);
        }
        expected.push("end");
        assert_eq!(kinds, expected);
    }

    #[test]
    fn test_last_block_is_short() {
        let device = MockDevice::new(config()).unwrap();
        let lengths: Vec<usize> = device
            .acquire()
            .filter_map(|p| match p {
                srdir_core::Packet::Logic(logic) => Some(logic.length()),
                _ => None,
            })
            .collect();
        assert_eq!(lengths, [4, 4, 2]);
    }

    #[test]
    fn test_zero_samples_is_meta_and_end() {
        let device = MockDevice::new(MockDeviceConfig {
            samples: 0,
            ..config()
        })
        .unwrap();
        let kinds: Vec<&str> = device.acquire().map(|p| p.kind()).collect();
        assert_eq!(kinds, ["meta", "end"]);
    }

    #[test]
    fn test_disabled_channels_emit_nothing() {
        let device = MockDevice::new(MockDeviceConfig {
            disabled_channels: vec![0, 1, 2, 3, 5],
            ..config()
        })
        .unwrap();
        let packets: Vec<_> = device.acquire().collect();
        assert!(packets.iter().all(|p| p.kind() != "logic"));
        let analog_channels: Vec<usize> = packets
            .iter()
            .filter_map(|p| match p {
                srdir_core::Packet::Analog(a) => Some(a.channels[0]),
                _ => None,
            })
            .collect();
        assert_eq!(analog_channels, [4, 4, 4]);
    }

    #[test]
    fn test_stream_is_fused() {
        let device = MockDevice::new(config()).unwrap();
        let mut stream = device.acquire();
        while stream.next().is_some() {}
        assert!(stream.next().is_none());
        assert_eq!(stream.position(), 10);
    }
}
