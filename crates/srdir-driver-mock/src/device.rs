//! Simulated acquisition device.

use crate::stream::PacketStream;
use serde::{Deserialize, Serialize};
use srdir_core::{Channel, DeviceInfo, SrdirError, SrdirResult};

/// Mock acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockDeviceConfig {
    /// Number of logic channels (`D0`, `D1`, ...).
    pub logic_channels: usize,
    /// Number of analog channels (`A0`, `A1`, ...), indexed after the logic ones.
    pub analog_channels: usize,
    /// Stable indices of channels to disable.
    pub disabled_channels: Vec<usize>,
    /// Sample rate in Hz.
    pub samplerate: u64,
    /// Total samples per channel.
    pub samples: u64,
    /// Samples per emitted packet.
    pub block_samples: usize,
    /// RNG seed for analog noise; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for MockDeviceConfig {
    fn default() -> Self {
        Self {
            logic_channels: 8,
            analog_channels: 1,
            disabled_channels: Vec::new(),
            samplerate: 1_000_000,
            samples: 100_000,
            block_samples: 4096,
            seed: None,
        }
    }
}

impl MockDeviceConfig {
    /// Reject settings no acquisition can run with.
    pub fn validate(&self) -> SrdirResult<()> {
        if self.logic_channels + self.analog_channels == 0 {
            return Err(SrdirError::Argument("mock device has no channels".into()));
        }
        if self.samplerate == 0 {
            return Err(SrdirError::Argument("samplerate must be non-zero".into()));
        }
        if self.block_samples == 0 {
            return Err(SrdirError::Argument("block_samples must be non-zero".into()));
        }
        let total = self.logic_channels + self.analog_channels;
        if let Some(index) = self.disabled_channels.iter().find(|&&i| i >= total) {
            return Err(SrdirError::Argument(format!(
                "disabled channel {} out of range (device has {} channels)",
                index, total
            )));
        }
        Ok(())
    }
}

/// Simulated device with logic and analog channels.
///
/// Logic channels come first in declaration order, analog channels after.
#[derive(Debug, Clone)]
pub struct MockDevice {
    config: MockDeviceConfig,
    channels: Vec<Channel>,
}

impl MockDevice {
    /// Create a device from validated settings.
    pub fn new(config: MockDeviceConfig) -> SrdirResult<Self> {
        config.validate()?;

        let logic = (0..config.logic_channels).map(|i| Channel::logic(i, format!("D{}", i)));
        let analog = (0..config.analog_channels)
            .map(|i| Channel::analog(config.logic_channels + i, format!("A{}", i)));
        let channels = logic
            .chain(analog)
            .map(|ch| {
                let enabled = !config.disabled_channels.contains(&ch.index);
                ch.with_enabled(enabled)
            })
            .collect();

        Ok(Self { config, channels })
    }

    /// Settings the device was created with.
    pub fn config(&self) -> &MockDeviceConfig {
        &self.config
    }

    /// Start an acquisition: the packet stream of one full run.
    pub fn acquire(&self) -> PacketStream {
        tracing::info!(
            samplerate = self.config.samplerate,
            samples = self.config.samples,
            block_samples = self.config.block_samples,
            "Start mock acquisition"
        );
        PacketStream::new(&self.config, &self.channels)
    }
}

impl DeviceInfo for MockDevice {
    fn channels(&self) -> &[Channel] {
        &self.channels
    }

    fn samplerate(&self) -> Option<u64> {
        Some(self.config.samplerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_declaration_order() {
        let device = MockDevice::new(MockDeviceConfig {
            logic_channels: 2,
            analog_channels: 2,
            disabled_channels: vec![1, 3],
            ..Default::default()
        })
        .unwrap();

        let names: Vec<&str> = device.channels().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["D0", "D1", "A0", "A1"]);
        let enabled: Vec<bool> = device.channels().iter().map(|c| c.enabled).collect();
        assert_eq!(enabled, [true, false, true, false]);
        assert!(device.channels()[2].is_analog());
        assert_eq!(device.channels()[3].index, 3);
        assert_eq!(device.samplerate(), Some(1_000_000));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let no_channels = MockDeviceConfig {
            logic_channels: 0,
            analog_channels: 0,
            ..Default::default()
        };
        assert!(MockDevice::new(no_channels).is_err());

        let zero_rate = MockDeviceConfig {
            samplerate: 0,
            ..Default::default()
        };
        assert!(zero_rate.validate().is_err());

        let zero_block = MockDeviceConfig {
            block_samples: 0,
            ..Default::default()
        };
        assert!(zero_block.validate().is_err());

        let bad_index = MockDeviceConfig {
            disabled_channels: vec![9],
            ..Default::default()
        };
        assert!(matches!(bad_index.validate(), Err(SrdirError::Argument(_))));
    }
}
