//! Device information queried by output writers.
//!
//! Output writers never talk to hardware. They only need the channel list of
//! the device instance that produced the stream and, when the stream did not
//! announce one, its configured sample rate.

use crate::channel::Channel;
use std::fmt::Debug;

/// Read-only view of the device instance behind an acquisition stream.
pub trait DeviceInfo: Send + Sync + Debug {
    /// Channels in declaration order.
    fn channels(&self) -> &[Channel];

    /// Currently configured sample rate in Hz, if the driver exposes one.
    fn samplerate(&self) -> Option<u64>;
}

/// Fixed device description, for hosts that replay recorded streams.
#[derive(Debug, Clone, Default)]
pub struct StaticDevice {
    channels: Vec<Channel>,
    samplerate: Option<u64>,
}

impl StaticDevice {
    /// Device with the given channels and no known sample rate.
    pub fn new(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            samplerate: None,
        }
    }

    /// Set the sample rate reported by [`DeviceInfo::samplerate`].
    pub fn with_samplerate(mut self, samplerate: u64) -> Self {
        self.samplerate = Some(samplerate);
        self
    }
}

impl DeviceInfo for StaticDevice {
    fn channels(&self) -> &[Channel] {
        &self.channels
    }

    fn samplerate(&self) -> Option<u64> {
        self.samplerate
    }
}
