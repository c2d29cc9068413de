//! Shared sizing constants for the archive writer.
//!
//! This module centralizes the per-buffer byte budget and the fixed tokens of
//! the directory archive layout so the buffering engine, the chunk writer and
//! the metadata builder agree on them.

// =============================================================================
// Buffer Sizing
// =============================================================================

/// Byte budget of every sample buffer (4 MiB).
///
/// The logic buffer holds `CHUNK_SIZE / unit_size` packed samples, each analog
/// buffer holds `CHUNK_SIZE / size_of::<f32>()` values. A full buffer becomes
/// one chunk file.
pub const CHUNK_SIZE: usize = 4 * 1024 * 1024;

/// Size of one analog sample as stored in chunk files.
pub const ANALOG_SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

// =============================================================================
// Archive Layout
// =============================================================================

/// Contents of the `version` file.
pub const FORMAT_VERSION: &[u8] = b"2";

/// Name of the version marker file.
pub const VERSION_FILE: &str = "version";

/// Name of the key/value metadata file.
pub const METADATA_FILE: &str = "metadata";

/// Base token of logic chunk files (`logic-1-<n>`).
pub const LOGIC_CHUNK_BASE: &str = "logic-1";

/// Base token of analog chunk files (`analog-1-<channel>-<n>`).
pub const ANALOG_CHUNK_BASE: &str = "analog-1";

/// Metadata group of the captured device.
pub const DEVICE_GROUP: &str = "device 1";

/// Metadata group of archive-wide keys.
pub const GLOBAL_GROUP: &str = "global";

/// Number of packed logic channels per unit-size byte.
pub const CHANNELS_PER_BYTE: usize = 8;

/// Bytes needed to pack one sample of `logic_channels` channels.
pub fn logic_unit_size(logic_channels: usize) -> usize {
    logic_channels.div_ceil(CHANNELS_PER_BYTE)
}
