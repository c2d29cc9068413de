//! Chunk file writer.
//!
//! Every flush of a sample buffer becomes one new file inside the archive
//! directory:
//!
//! - logic: `logic-1-<n>`
//! - analog: `analog-1-<channel number>-<n>`
//!
//! The chunk number `n` belongs to the buffer being flushed; the writer only
//! renders names and moves bytes to disk.

use srdir_core::limits::{ANALOG_CHUNK_BASE, LOGIC_CHUNK_BASE};
use srdir_core::{SrdirError, SrdirResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Channel group a chunk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// The shared logic buffer.
    Logic,
    /// The buffer of one analog channel.
    Analog {
        /// 1-based archive number of the channel.
        channel_number: usize,
    },
}

impl ChunkKind {
    /// File name of chunk `chunk_number` of this group.
    pub fn file_name(&self, chunk_number: u32) -> String {
        match self {
            ChunkKind::Logic => format!("{}-{}", LOGIC_CHUNK_BASE, chunk_number),
            ChunkKind::Analog { channel_number } => {
                format!("{}-{}-{}", ANALOG_CHUNK_BASE, channel_number, chunk_number)
            }
        }
    }
}

/// Counters of everything the writer put on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkStats {
    /// Logic chunk files written.
    pub logic_chunks: u64,
    /// Analog chunk files written, all channels.
    pub analog_chunks: u64,
    /// Total chunk bytes written.
    pub bytes_written: u64,
}

impl ChunkStats {
    /// Chunk files written, all groups.
    pub fn chunks_written(&self) -> u64 {
        self.logic_chunks + self.analog_chunks
    }
}

/// Writes chunk files into one archive directory.
#[derive(Debug)]
pub struct ChunkWriter {
    dir: PathBuf,
    stats: ChunkStats,
}

impl ChunkWriter {
    /// Writer for the existing directory `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stats: ChunkStats::default(),
        }
    }

    /// Archive directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Counters so far.
    pub fn stats(&self) -> ChunkStats {
        self.stats
    }

    /// Write `bytes` as chunk `chunk_number` of `kind`.
    ///
    /// Callers skip empty flushes; an empty chunk is never created. A failed
    /// write may leave a partial file behind.
    pub fn write_chunk(
        &mut self,
        kind: ChunkKind,
        chunk_number: u32,
        bytes: &[u8],
    ) -> SrdirResult<()> {
        debug_assert!(!bytes.is_empty(), "empty chunk for {:?}", kind);

        let name = kind.file_name(chunk_number);
        let path = self.dir.join(&name);

        write_file(&path, bytes).map_err(|e| {
            tracing::error!(chunk = %name, error = %e, "Failed to add chunk");
            SrdirError::io(format!("add chunk '{}'", name), e)
        })?;

        match kind {
            ChunkKind::Logic => self.stats.logic_chunks += 1,
            ChunkKind::Analog { .. } => self.stats.analog_chunks += 1,
        }
        self.stats.bytes_written += bytes.len() as u64;

        tracing::debug!(chunk = %name, bytes = bytes.len(), "Wrote chunk");
        Ok(())
    }
}

/// Create `path` and write all of `bytes` to it.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.flush()
}
