//! Archive metadata builder.
//!
//! Collects the values that make the archive self-describing and renders
//! them into the `metadata` key file:
//!
//! | Group | Key | Present |
//! |-------|-----|---------|
//! | `global` | `sigrok version` | always |
//! | `device 1` | `capturefile=logic-1` | enabled logic channels exist |
//! | `device 1` | `total probes` | enabled logic channels exist |
//! | `device 1` | `samplerate` | always |
//! | `device 1` | `total analog` | always |
//! | `device 1` | `probe<N>` / `analog<N>` | per enabled channel |
//! | `device 1` | `unitsize` | logic unit size > 0 |

use crate::keyfile::KeyFile;
use srdir_core::limits::{DEVICE_GROUP, GLOBAL_GROUP, LOGIC_CHUNK_BASE};
use srdir_core::units::samplerate_string;
use srdir_core::ChannelLayout;

/// Values written to the `metadata` file of one archive.
#[derive(Debug, Clone)]
pub struct ArchiveMetadata<'a> {
    /// Version string of the writing software.
    pub sigrok_version: &'a str,
    /// Sample rate in Hz, 0 when unknown.
    pub samplerate: u64,
    /// Resolved channel numbering.
    pub layout: &'a ChannelLayout,
    /// Bytes per packed logic sample.
    pub unit_size: usize,
}

impl ArchiveMetadata<'_> {
    /// Render the metadata into a key file.
    pub fn to_keyfile(&self) -> KeyFile {
        let mut meta = KeyFile::new();
        meta.set_string(GLOBAL_GROUP, "sigrok version", self.sigrok_version);

        // Readers treat a missing capturefile as "no logic data".
        if self.layout.has_logic() {
            meta.set_string(DEVICE_GROUP, "capturefile", LOGIC_CHUNK_BASE);
            meta.set_integer(
                DEVICE_GROUP,
                "total probes",
                self.layout.logic_channel_count,
            );
        }

        meta.set_string(
            DEVICE_GROUP,
            "samplerate",
            &samplerate_string(self.samplerate),
        );
        meta.set_integer(
            DEVICE_GROUP,
            "total analog",
            self.layout.enabled_analog_channel_count,
        );

        for ch in &self.layout.channels {
            meta.set_string(DEVICE_GROUP, &ch.metadata_key(), &ch.name);
        }

        if self.unit_size > 0 {
            meta.set_integer(DEVICE_GROUP, "unitsize", self.unit_size);
        }

        meta
    }

    /// Serialized `metadata` file contents.
    pub fn to_data(&self) -> String {
        self.to_keyfile().to_data()
    }
}
