use super::try_alloc;
use crate::chunk_writer::{ChunkKind, ChunkWriter};
use srdir_core::{SrdirError, SrdirResult};

/// Buffer of packed logic samples shared by all logic channels.
#[derive(Debug)]
pub struct LogicBuffer {
    unit_size: usize,
    capacity: usize,
    samples: Vec<u8>,
    fill: usize,
    next_chunk_number: u32,
}

impl LogicBuffer {
    /// Buffer for `unit_size`-byte samples within a `chunk_bytes` budget.
    ///
    /// A unit size of 0 (no logic channels) allocates nothing; such a buffer
    /// never holds samples.
    pub fn new(unit_size: usize, chunk_bytes: usize) -> SrdirResult<Self> {
        let capacity = if unit_size > 0 {
            (chunk_bytes / unit_size).max(1)
        } else {
            chunk_bytes
        };
        let samples = try_alloc(capacity * unit_size)?;

        Ok(Self {
            unit_size,
            capacity,
            samples,
            fill: 0,
            next_chunk_number: 1,
        })
    }

    /// Bytes per packed sample.
    pub fn unit_size(&self) -> usize {
        self.unit_size
    }

    /// Capacity in samples.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples currently buffered.
    pub fn fill(&self) -> usize {
        self.fill
    }

    /// Number the next chunk file will carry.
    pub fn next_chunk_number(&self) -> u32 {
        self.next_chunk_number
    }

    /// Queue a block of packed samples, writing full buffers as chunks.
    ///
    /// `data` of non-zero length must use the buffer's unit size; otherwise
    /// nothing is queued and an `Argument` error is returned. Trailing bytes
    /// that do not form a whole sample are dropped with a warning. With
    /// `flush` set, any remaining buffered samples are written at the end.
    ///
    /// Returns the number of samples queued.
    pub fn queue(
        &mut self,
        data: &[u8],
        unit_size: usize,
        flush: bool,
        writer: &mut ChunkWriter,
    ) -> SrdirResult<usize> {
        tracing::debug!(unit_size, length = data.len(), flush, "Queue logic data");

        if !data.is_empty() && unit_size != self.unit_size {
            tracing::warn!(
                expected = self.unit_size,
                received = unit_size,
                "Unexpected unit size, discarding logic data"
            );
            return Err(SrdirError::Argument(format!(
                "logic unit size {} does not match configured unit size {}",
                unit_size, self.unit_size
            )));
        }

        let samples = match self.unit_size {
            0 => 0,
            us => {
                if data.len() % us != 0 {
                    tracing::warn!(
                        length = data.len(),
                        unit_size = us,
                        "Chunk size not a multiple of the unit size"
                    );
                }
                data.len() / us
            }
        };

        let mut pending = &data[..samples * self.unit_size];
        while !pending.is_empty() {
            if self.fill == self.capacity {
                self.flush(writer)?;
            }
            let copy = (pending.len() / self.unit_size).min(self.capacity - self.fill);
            let start = self.fill * self.unit_size;
            let len = copy * self.unit_size;
            self.samples[start..start + len].copy_from_slice(&pending[..len]);
            self.fill += copy;
            pending = &pending[len..];
        }

        if flush {
            self.flush(writer)?;
        }

        Ok(samples)
    }

    /// Write buffered samples as the next chunk. Returns `false` when the
    /// buffer was empty and nothing was written.
    pub fn flush(&mut self, writer: &mut ChunkWriter) -> SrdirResult<bool> {
        if self.fill == 0 {
            return Ok(false);
        }
        let len = self.fill * self.unit_size;
        writer.write_chunk(ChunkKind::Logic, self.next_chunk_number, &self.samples[..len])?;
        self.next_chunk_number += 1;
        self.fill = 0;
        Ok(true)
    }
}
