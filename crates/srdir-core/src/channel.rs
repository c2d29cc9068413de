//! Channel model and the channel layout resolver.
//!
//! A capture device exposes an ordered list of [`Channel`]s. Before the first
//! sample is archived, [`ChannelLayout::resolve`] turns that list into the
//! numbering scheme of the archive:
//!
//! - logic channels are numbered by their stable index (`probe<index + 1>`),
//! - enabled analog channels get sequential numbers starting at
//!   `first_analog_number`, in declaration order,
//! - `first_analog_number` follows the *total* logic channel count (enabled
//!   or not) whenever at least one logic channel is enabled, otherwise it is 1.
//!
//! A reader only learns where analog numbering starts from the `total probes`
//! metadata key, which is why disabled logic channels still shift the first
//! analog number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of signal carried by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// Digital line, packed bitwise into units.
    Logic,
    /// Floating point signal, one value stream per channel.
    Analog,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChannelType::Logic => "logic",
            ChannelType::Analog => "analog",
        };
        write!(f, "{}", label)
    }
}

/// One channel of the capture device.
///
/// Immutable for the lifetime of an archive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Stable index, assigned once by the device and never reused.
    pub index: usize,
    /// Signal kind.
    pub channel_type: ChannelType,
    /// Whether samples of this channel are captured.
    pub enabled: bool,
    /// Display name written to the metadata file.
    pub name: String,
}

impl Channel {
    /// Create an enabled channel.
    pub fn new(index: usize, channel_type: ChannelType, name: impl Into<String>) -> Self {
        Self {
            index,
            channel_type,
            enabled: true,
            name: name.into(),
        }
    }

    /// Create an enabled logic channel.
    pub fn logic(index: usize, name: impl Into<String>) -> Self {
        Self::new(index, ChannelType::Logic, name)
    }

    /// Create an enabled analog channel.
    pub fn analog(index: usize, name: impl Into<String>) -> Self {
        Self::new(index, ChannelType::Analog, name)
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this is a logic channel.
    pub fn is_logic(&self) -> bool {
        self.channel_type == ChannelType::Logic
    }

    /// Whether this is an analog channel.
    pub fn is_analog(&self) -> bool {
        self.channel_type == ChannelType::Analog
    }
}

/// An enabled channel together with the number it carries in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedChannel {
    /// Signal kind, selects the `probe` or `analog` metadata key prefix.
    pub channel_type: ChannelType,
    /// 1-based archive number.
    pub number: usize,
    /// Display name.
    pub name: String,
}

impl NumberedChannel {
    /// Metadata key naming this channel (`probe3`, `analog9`).
    pub fn metadata_key(&self) -> String {
        match self.channel_type {
            ChannelType::Logic => format!("probe{}", self.number),
            ChannelType::Analog => format!("analog{}", self.number),
        }
    }
}

/// Archive numbering derived from a channel list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelLayout {
    /// All logic channels, enabled or not.
    pub logic_channel_count: usize,
    /// Enabled logic channels.
    pub enabled_logic_channel_count: usize,
    /// Enabled analog channels.
    pub enabled_analog_channel_count: usize,
    /// Archive number of the first enabled analog channel.
    pub first_analog_number: usize,
    /// Analog buffer slot to originating channel index.
    pub analog_index_map: Vec<usize>,
    /// Enabled channels in declaration order with their archive numbers.
    pub channels: Vec<NumberedChannel>,
}

impl ChannelLayout {
    /// Resolve the archive numbering of `channels`.
    ///
    /// Never fails; an empty list yields zero counts and
    /// `first_analog_number == 1`.
    pub fn resolve(channels: &[Channel]) -> Self {
        let logic_channel_count = channels.iter().filter(|ch| ch.is_logic()).count();
        let enabled_logic_channel_count = channels
            .iter()
            .filter(|ch| ch.is_logic() && ch.enabled)
            .count();
        let enabled_analog_channel_count = channels
            .iter()
            .filter(|ch| ch.is_analog() && ch.enabled)
            .count();

        let first_analog_number = if enabled_logic_channel_count > 0 {
            logic_channel_count + 1
        } else {
            1
        };

        let mut analog_index_map = Vec::with_capacity(enabled_analog_channel_count);
        let mut numbered = Vec::new();
        for ch in channels.iter().filter(|ch| ch.enabled) {
            let number = match ch.channel_type {
                ChannelType::Logic => ch.index + 1,
                ChannelType::Analog => {
                    let number = first_analog_number + analog_index_map.len();
                    analog_index_map.push(ch.index);
                    number
                }
            };
            numbered.push(NumberedChannel {
                channel_type: ch.channel_type,
                number,
                name: ch.name.clone(),
            });
        }

        Self {
            logic_channel_count,
            enabled_logic_channel_count,
            enabled_analog_channel_count,
            first_analog_number,
            analog_index_map,
            channels: numbered,
        }
    }

    /// Whether any logic channel is enabled, i.e. logic data is archived.
    pub fn has_logic(&self) -> bool {
        self.enabled_logic_channel_count > 0
    }

    /// Buffer slot of the analog channel with stable index `channel_index`.
    pub fn analog_slot(&self, channel_index: usize) -> Option<usize> {
        self.analog_index_map
            .iter()
            .position(|&idx| idx == channel_index)
    }

    /// Archive number of the analog buffer `slot`.
    pub fn analog_number(&self, slot: usize) -> usize {
        self.first_analog_number + slot
    }
}
