//! Archive directory creation and the initialized writer.
//!
//! [`ArchiveWriter::create`] performs the one-time directory setup:
//!
//! 1. resolve the sample rate (stream metadata, else the device query),
//! 2. resolve the channel layout,
//! 3. create the directory and write the `version` marker,
//! 4. write the `metadata` key file,
//! 5. allocate all sample buffers.
//!
//! A failure at any step leaves whatever was already created on disk.

use crate::chunk_writer::{write_file, ChunkStats, ChunkWriter};
use crate::engine::SampleBuffers;
use crate::metadata::ArchiveMetadata;
use srdir_core::limits::{
    logic_unit_size, CHUNK_SIZE, FORMAT_VERSION, METADATA_FILE, VERSION_FILE,
};
use srdir_core::{Analog, ChannelLayout, DeviceInfo, SrdirError, SrdirResult};
use std::path::{Path, PathBuf};

/// Version string written to `[global] sigrok version` by default.
pub const DEFAULT_SIGROK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings of one archive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Archive directory; must not exist yet.
    pub path: PathBuf,
    /// Byte budget of each sample buffer.
    pub chunk_bytes: usize,
    /// Value of the `sigrok version` metadata key.
    pub sigrok_version: String,
}

impl ArchiveOptions {
    /// Default options for an archive at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            chunk_bytes: CHUNK_SIZE,
            sigrok_version: DEFAULT_SIGROK_VERSION.to_string(),
        }
    }
}

/// Session-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Chunk files and bytes written.
    pub chunks: ChunkStats,
    /// Packed logic samples accepted.
    pub logic_samples: u64,
    /// Analog values accepted, all channels.
    pub analog_samples: u64,
}

/// Writer for an initialized archive directory.
#[derive(Debug)]
pub struct ArchiveWriter {
    samplerate: u64,
    writer: ChunkWriter,
    buffers: SampleBuffers,
    logic_samples: u64,
    analog_samples: u64,
}

impl ArchiveWriter {
    /// Create the archive directory for `device` and prepare its buffers.
    ///
    /// `samplerate` is the last rate seen on the stream, 0 if none; the
    /// device is asked in that case.
    pub fn create(
        options: &ArchiveOptions,
        device: &dyn DeviceInfo,
        samplerate: u64,
    ) -> SrdirResult<Self> {
        tracing::debug!(path = %options.path.display(), "Create archive directory");

        let samplerate = match samplerate {
            0 => device.samplerate().unwrap_or(0),
            rate => rate,
        };
        let layout = ChannelLayout::resolve(device.channels());
        let dir = options.path.as_path();

        std::fs::create_dir(dir).map_err(|e| {
            tracing::error!(path = %dir.display(), error = %e, "Could not create directory");
            SrdirError::io(format!("create directory '{}'", dir.display()), e)
        })?;

        save(dir, VERSION_FILE, FORMAT_VERSION)?;

        let unit_size = logic_unit_size(layout.logic_channel_count);
        let metadata = ArchiveMetadata {
            sigrok_version: &options.sigrok_version,
            samplerate,
            layout: &layout,
            unit_size,
        }
        .to_data();
        save(dir, METADATA_FILE, metadata.as_bytes())?;

        let buffers = SampleBuffers::new(layout, options.chunk_bytes)?;

        tracing::info!(
            path = %dir.display(),
            samplerate,
            logic_channels = buffers.layout().logic_channel_count,
            analog_channels = buffers.layout().enabled_analog_channel_count,
            unit_size,
            "Created archive directory"
        );

        Ok(Self {
            samplerate,
            writer: ChunkWriter::new(dir),
            buffers,
            logic_samples: 0,
            analog_samples: 0,
        })
    }

    /// Archive directory.
    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    /// Sample rate recorded in the metadata.
    pub fn samplerate(&self) -> u64 {
        self.samplerate
    }

    /// Resolved channel layout.
    pub fn layout(&self) -> &ChannelLayout {
        self.buffers.layout()
    }

    /// Sample buffers.
    pub fn buffers(&self) -> &SampleBuffers {
        &self.buffers
    }

    /// Counters so far.
    pub fn stats(&self) -> ArchiveStats {
        ArchiveStats {
            chunks: self.writer.stats(),
            logic_samples: self.logic_samples,
            analog_samples: self.analog_samples,
        }
    }

    /// Queue a block of packed logic samples.
    pub fn queue_logic(
        &mut self,
        data: &[u8],
        unit_size: usize,
        flush: bool,
    ) -> SrdirResult<()> {
        let queued = self
            .buffers
            .queue_logic(data, unit_size, flush, &mut self.writer)?;
        self.logic_samples += queued as u64;
        Ok(())
    }

    /// Queue an analog packet, or flush all analog buffers with `None`.
    pub fn queue_analog(&mut self, packet: Option<&Analog>, flush: bool) -> SrdirResult<()> {
        let queued = self.buffers.queue_analog(packet, flush, &mut self.writer)?;
        self.analog_samples += queued as u64;
        Ok(())
    }

    /// Flush every buffer holding samples (end of stream).
    pub fn finish(&mut self) -> SrdirResult<()> {
        self.queue_logic(&[], 0, true)?;
        self.queue_analog(None, true)?;
        tracing::info!(
            path = %self.dir().display(),
            chunks = self.writer.stats().chunks_written(),
            bytes = self.writer.stats().bytes_written,
            "Flushed archive at end of stream"
        );
        Ok(())
    }
}

/// Write one of the archive's descriptor files.
fn save(dir: &Path, name: &str, contents: &[u8]) -> SrdirResult<()> {
    write_file(&dir.join(name), contents).map_err(|e| {
        tracing::error!(file = name, error = %e, "Error saving file into directory");
        SrdirError::io(format!("save '{}' into directory", name), e)
    })
}
