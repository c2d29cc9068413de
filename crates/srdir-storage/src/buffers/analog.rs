use super::try_alloc;
use crate::chunk_writer::{ChunkKind, ChunkWriter};
use srdir_core::limits::ANALOG_SAMPLE_BYTES;
use srdir_core::SrdirResult;

/// Buffer of `f32` values for one enabled analog channel.
///
/// Chunk numbering is private to each channel.
#[derive(Debug)]
pub struct AnalogBuffer {
    channel_number: usize,
    capacity: usize,
    samples: Vec<f32>,
    fill: usize,
    next_chunk_number: u32,
}

impl AnalogBuffer {
    /// Buffer for archive channel `channel_number` within a `chunk_bytes`
    /// budget.
    pub fn new(channel_number: usize, chunk_bytes: usize) -> SrdirResult<Self> {
        let capacity = (chunk_bytes / ANALOG_SAMPLE_BYTES).max(1);
        let samples = try_alloc(capacity)?;

        Ok(Self {
            channel_number,
            capacity,
            samples,
            fill: 0,
            next_chunk_number: 1,
        })
    }

    /// 1-based archive number of the channel.
    pub fn channel_number(&self) -> usize {
        self.channel_number
    }

    /// Capacity in values.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values currently buffered.
    pub fn fill(&self) -> usize {
        self.fill
    }

    /// Number the next chunk file will carry.
    pub fn next_chunk_number(&self) -> u32 {
        self.next_chunk_number
    }

    /// Queue values, writing full buffers as chunks. With `flush` set, any
    /// remaining buffered values are written at the end.
    pub fn queue(
        &mut self,
        values: &[f32],
        flush: bool,
        writer: &mut ChunkWriter,
    ) -> SrdirResult<()> {
        let mut pending = values;
        while !pending.is_empty() {
            if self.fill == self.capacity {
                self.flush(writer)?;
            }
            let copy = pending.len().min(self.capacity - self.fill);
            self.samples[self.fill..self.fill + copy].copy_from_slice(&pending[..copy]);
            self.fill += copy;
            pending = &pending[copy..];
        }

        if flush {
            self.flush(writer)?;
        }
        Ok(())
    }

    /// Write buffered values as the next chunk. Returns `false` when the
    /// buffer was empty and nothing was written.
    pub fn flush(&mut self, writer: &mut ChunkWriter) -> SrdirResult<bool> {
        if self.fill == 0 {
            return Ok(false);
        }
        let bytes: Vec<u8> = self.samples[..self.fill]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        writer.write_chunk(
            ChunkKind::Analog {
                channel_number: self.channel_number,
            },
            self.next_chunk_number,
            &bytes,
        )?;
        self.next_chunk_number += 1;
        self.fill = 0;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_values(dir: &TempDir, name: &str) -> Vec<f32> {
        std::fs::read(dir.path().join(name))
            .unwrap()
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    #[test]
    fn test_default_capacity() {
        let buf = AnalogBuffer::new(1, srdir_core::limits::CHUNK_SIZE).unwrap();
        assert_eq!(buf.capacity(), 1024 * 1024);
    }

    #[test]
    fn test_overflow_and_final_flush() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buf = AnalogBuffer::new(3, 16).unwrap();

        let values: Vec<f32> = (0..10).map(|i| i as f32 * 0.5).collect();
        buf.queue(&values, false, &mut writer).unwrap();
        assert_eq!(read_values(&temp_dir, "analog-1-3-1"), values[0..4]);
        assert_eq!(read_values(&temp_dir, "analog-1-3-2"), values[4..8]);
        assert_eq!(buf.fill(), 2);

        assert!(buf.flush(&mut writer).unwrap());
        assert_eq!(read_values(&temp_dir, "analog-1-3-3"), values[8..10]);
        assert_eq!(buf.fill(), 0);
        assert_eq!(buf.next_chunk_number(), 4);
        assert!(!buf.flush(&mut writer).unwrap());
    }
}
