//! Datafeed packets delivered by an acquisition session.
//!
//! An acquisition produces an ordered stream of [`Packet`]s. Output writers
//! process each packet to completion before the next one is handed over.

use crate::analog::AnalogEncoding;
use crate::error::SrdirResult;
use bytes::Bytes;

/// One event of the acquisition stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Stream metadata (sample rate changes and other device settings).
    Meta(Meta),
    /// A block of packed logic samples.
    Logic(Logic),
    /// A block of analog samples.
    Analog(Analog),
    /// End of the acquisition.
    End,
}

impl Packet {
    /// Short packet type label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Packet::Meta(_) => "meta",
            Packet::Logic(_) => "logic",
            Packet::Analog(_) => "analog",
            Packet::End => "end",
        }
    }
}

/// Device setting carried by a meta packet.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntry {
    /// Sample rate in Hz.
    SampleRate(u64),
    /// Any other setting; archive writers ignore these.
    Other { key: String, value: String },
}

/// Metadata packet payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Meta {
    /// Settings in the order the driver reported them.
    pub config: Vec<ConfigEntry>,
}

impl Meta {
    /// Meta packet announcing a sample rate.
    pub fn samplerate(samplerate: u64) -> Self {
        Self {
            config: vec![ConfigEntry::SampleRate(samplerate)],
        }
    }

    /// Last sample rate announced by this packet, if any.
    pub fn last_samplerate(&self) -> Option<u64> {
        self.config.iter().rev().find_map(|entry| match entry {
            ConfigEntry::SampleRate(rate) => Some(*rate),
            ConfigEntry::Other { .. } => None,
        })
    }
}

/// Logic packet payload: `data.len() / unitsize` packed samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Logic {
    /// Bytes per packed sample.
    pub unitsize: usize,
    /// Packed samples, bit `n` of a unit is logic channel `n`.
    pub data: Bytes,
}

impl Logic {
    /// Wrap a block of packed samples.
    pub fn new(unitsize: usize, data: impl Into<Bytes>) -> Self {
        Self {
            unitsize,
            data: data.into(),
        }
    }

    /// Byte length of the block.
    pub fn length(&self) -> usize {
        self.data.len()
    }
}

/// Analog packet payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Analog {
    /// Stable indices of the channels this packet covers.
    pub channels: Vec<usize>,
    /// Number of samples in `data`.
    pub num_samples: usize,
    /// Representation of `data`.
    pub encoding: AnalogEncoding,
    /// Raw sample bytes.
    pub data: Bytes,
}

impl Analog {
    /// Analog packet for a single channel with samples in `encoding`.
    pub fn new(
        channel: usize,
        encoding: AnalogEncoding,
        num_samples: usize,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            channels: vec![channel],
            num_samples,
            encoding,
            data: data.into(),
        }
    }

    /// Analog packet for a single channel from plain `f32` values.
    pub fn from_f32(channel: usize, values: &[f32]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(channel, AnalogEncoding::f32_le(), values.len(), data)
    }

    /// Decode the packet's samples to `f32`.
    pub fn to_float(&self) -> SrdirResult<Vec<f32>> {
        self.encoding.to_float(&self.data, self.num_samples)
    }
}
