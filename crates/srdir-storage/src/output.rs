//! The `srdir` output module: packet dispatch and session lifecycle.
//!
//! # Example
//!
//! ```no_run
//! use srdir_core::{Channel, Logic, Meta, Packet, StaticDevice};
//! use srdir_storage::SrdirOutput;
//! use std::sync::Arc;
//!
//! # fn main() -> srdir_core::SrdirResult<()> {
//! let device = Arc::new(StaticDevice::new(vec![
//!     Channel::logic(0, "D0"),
//!     Channel::logic(1, "D1"),
//! ]));
//!
//! let mut output = SrdirOutput::builder()
//!     .output_path("capture")
//!     .device(device)
//!     .build()?;
//!
//! output.receive(&Packet::Meta(Meta::samplerate(1_000_000)))?;
//! output.receive(&Packet::Logic(Logic::new(1, vec![0b01, 0b10, 0b11])))?;
//! output.receive(&Packet::End)?;
//! # Ok(())
//! # }
//! ```

use crate::archive::{ArchiveOptions, ArchiveStats, ArchiveWriter, DEFAULT_SIGROK_VERSION};
use srdir_core::limits::CHUNK_SIZE;
use srdir_core::{DeviceInfo, Packet, SrdirError, SrdirResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Output module identifier.
pub const MODULE_ID: &str = "srdir";

/// Output module display name.
pub const MODULE_NAME: &str = "srdir";

/// Output module description.
pub const MODULE_DESCRIPTION: &str = "Session file format data stored in a directory. \
     Convert to srzip by 'cd <dir> ; zip -9 data.sr *'";

/// File name extensions of the output; a directory has none.
pub const MODULE_EXTENSIONS: &[&str] = &[""];

/// Lifecycle of the archive directory.
///
/// `Uninitialized` until the first sample packet, then `Initializing` while
/// the directory is set up, ending in either `Ready` or `Failed`. Both end
/// states are final for the session.
pub enum DirectoryState {
    /// Nothing on disk yet.
    Uninitialized,
    /// Directory setup in progress.
    Initializing,
    /// Directory written, buffers allocated.
    Ready(Box<ArchiveWriter>),
    /// Directory setup failed; the session accepts no more samples.
    Failed,
}

impl DirectoryState {
    /// Short state label for logging.
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryState::Uninitialized => "uninitialized",
            DirectoryState::Initializing => "initializing",
            DirectoryState::Ready(_) => "ready",
            DirectoryState::Failed => "failed",
        }
    }
}

impl fmt::Debug for DirectoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for [`SrdirOutput`].
pub struct SrdirOutputBuilder {
    output_path: Option<PathBuf>,
    device: Option<Arc<dyn DeviceInfo>>,
    chunk_bytes: usize,
    sigrok_version: String,
}

impl Default for SrdirOutputBuilder {
    fn default() -> Self {
        Self {
            output_path: None,
            device: None,
            chunk_bytes: CHUNK_SIZE,
            sigrok_version: DEFAULT_SIGROK_VERSION.to_string(),
        }
    }
}

impl SrdirOutputBuilder {
    /// Set the archive directory path.
    pub fn output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the device whose stream is archived.
    pub fn device(mut self, device: Arc<dyn DeviceInfo>) -> Self {
        self.device = Some(device);
        self
    }

    /// Set the byte budget of each sample buffer (default 4 MiB).
    pub fn chunk_bytes(mut self, bytes: usize) -> Self {
        self.chunk_bytes = bytes;
        self
    }

    /// Set the `sigrok version` metadata value.
    pub fn sigrok_version(mut self, version: impl Into<String>) -> Self {
        self.sigrok_version = version.into();
        self
    }

    /// Build the output. Nothing is written to disk yet.
    pub fn build(self) -> SrdirResult<SrdirOutput> {
        let path = match self.output_path {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                tracing::info!("srdir output module requires a file name, cannot save");
                return Err(SrdirError::Argument(
                    "srdir output requires a directory name".into(),
                ));
            }
        };
        let device = self
            .device
            .ok_or_else(|| SrdirError::Argument("srdir output requires a device".into()))?;
        if self.chunk_bytes == 0 {
            return Err(SrdirError::Argument("chunk byte budget must be non-zero".into()));
        }

        Ok(SrdirOutput {
            options: ArchiveOptions {
                path,
                chunk_bytes: self.chunk_bytes,
                sigrok_version: self.sigrok_version,
            },
            device,
            samplerate: 0,
            state: DirectoryState::Uninitialized,
        })
    }
}

/// Writes one acquisition stream into a session archive directory.
///
/// The directory is created lazily on the first logic or analog packet; a
/// stream without sample data never touches the filesystem. Packets must be
/// handed over one at a time; the first error is terminal for the session.
pub struct SrdirOutput {
    options: ArchiveOptions,
    device: Arc<dyn DeviceInfo>,
    samplerate: u64,
    state: DirectoryState,
}

impl SrdirOutput {
    /// Create a new builder.
    pub fn builder() -> SrdirOutputBuilder {
        SrdirOutputBuilder::default()
    }

    /// Output for `device` writing to `path` with default settings.
    pub fn new(path: impl AsRef<Path>, device: Arc<dyn DeviceInfo>) -> SrdirResult<Self> {
        Self::builder().output_path(path).device(device).build()
    }

    /// Archive directory path.
    pub fn path(&self) -> &Path {
        &self.options.path
    }

    /// Current directory state.
    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    /// Whether the archive directory has been created.
    pub fn directory_initialized(&self) -> bool {
        matches!(self.state, DirectoryState::Ready(_))
    }

    /// Last sample rate announced on the stream, 0 if none.
    pub fn samplerate(&self) -> u64 {
        self.samplerate
    }

    /// The initialized writer, once the directory exists.
    pub fn archive(&self) -> Option<&ArchiveWriter> {
        match &self.state {
            DirectoryState::Ready(writer) => Some(writer),
            _ => None,
        }
    }

    /// Counters so far; all zero before the directory exists.
    pub fn stats(&self) -> ArchiveStats {
        self.archive().map(ArchiveWriter::stats).unwrap_or_default()
    }

    /// Process one packet of the acquisition stream.
    pub fn receive(&mut self, packet: &Packet) -> SrdirResult<()> {
        tracing::trace!(packet = packet.kind(), state = self.state.name(), "Receive packet");

        match packet {
            Packet::Meta(meta) => {
                if let Some(rate) = meta.last_samplerate() {
                    self.samplerate = rate;
                }
            }
            Packet::Logic(logic) => {
                self.ensure_ready()?
                    .queue_logic(&logic.data, logic.unitsize, false)?;
            }
            Packet::Analog(analog) => {
                self.ensure_ready()?.queue_analog(Some(analog), false)?;
            }
            Packet::End => {
                if let DirectoryState::Ready(writer) = &mut self.state {
                    writer.finish()?;
                }
            }
        }
        Ok(())
    }

    /// Create the directory on first use and return the writer.
    fn ensure_ready(&mut self) -> SrdirResult<&mut ArchiveWriter> {
        if let DirectoryState::Uninitialized = self.state {
            self.state = DirectoryState::Initializing;
            let created = ArchiveWriter::create(&self.options, &*self.device, self.samplerate);
            self.state = match created {
                Ok(writer) => DirectoryState::Ready(Box::new(writer)),
                Err(e) => {
                    self.state = DirectoryState::Failed;
                    return Err(e);
                }
            };
        }

        match &mut self.state {
            DirectoryState::Ready(writer) => Ok(writer),
            _ => Err(SrdirError::SessionFailed),
        }
    }
}

impl fmt::Debug for SrdirOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SrdirOutput")
            .field("path", &self.options.path)
            .field("samplerate", &self.samplerate)
            .field("state", &self.state)
            .finish()
    }
}

impl Drop for SrdirOutput {
    fn drop(&mut self) {
        tracing::debug!(
            path = %self.options.path.display(),
            state = self.state.name(),
            "Release srdir output"
        );
    }
}
