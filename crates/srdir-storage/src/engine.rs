//! Buffering and flush engine.
//!
//! Owns the logic buffer and one analog buffer per enabled analog channel,
//! and routes sample blocks into them. Buffers are sized once from the
//! resolved channel layout and never resized.

use crate::buffers::{AnalogBuffer, LogicBuffer};
use crate::chunk_writer::ChunkWriter;
use srdir_core::limits::logic_unit_size;
use srdir_core::{Analog, ChannelLayout, SrdirError, SrdirResult};

/// All sample buffers of one archive session.
#[derive(Debug)]
pub struct SampleBuffers {
    layout: ChannelLayout,
    logic: LogicBuffer,
    analog: Vec<AnalogBuffer>,
}

impl SampleBuffers {
    /// Allocate buffers for `layout`, each within `chunk_bytes`.
    pub fn new(layout: ChannelLayout, chunk_bytes: usize) -> SrdirResult<Self> {
        let logic = LogicBuffer::new(logic_unit_size(layout.logic_channel_count), chunk_bytes)?;
        let analog = (0..layout.enabled_analog_channel_count)
            .map(|slot| AnalogBuffer::new(layout.analog_number(slot), chunk_bytes))
            .collect::<SrdirResult<Vec<_>>>()?;

        Ok(Self {
            layout,
            logic,
            analog,
        })
    }

    /// Channel layout the buffers were sized for.
    pub fn layout(&self) -> &ChannelLayout {
        &self.layout
    }

    /// The logic buffer.
    pub fn logic(&self) -> &LogicBuffer {
        &self.logic
    }

    /// Analog buffers, indexed by buffer slot.
    pub fn analog(&self) -> &[AnalogBuffer] {
        &self.analog
    }

    /// Queue a block of packed logic samples. See [`LogicBuffer::queue`].
    pub fn queue_logic(
        &mut self,
        data: &[u8],
        unit_size: usize,
        flush: bool,
        writer: &mut ChunkWriter,
    ) -> SrdirResult<usize> {
        self.logic.queue(data, unit_size, flush, writer)
    }

    /// Queue an analog packet, or flush every analog buffer.
    ///
    /// `None` with `flush` set writes out each non-empty analog buffer (end
    /// of stream). A packet must cover exactly one enabled analog channel of
    /// this session; its samples are converted to `f32` and queued into that
    /// channel's buffer, which is flushed afterwards when `flush` is set.
    ///
    /// Returns the number of samples queued.
    pub fn queue_analog(
        &mut self,
        packet: Option<&Analog>,
        flush: bool,
        writer: &mut ChunkWriter,
    ) -> SrdirResult<usize> {
        let Some(packet) = packet else {
            if flush {
                self.flush_analog(writer)?;
            }
            return Ok(0);
        };

        tracing::debug!(
            channels = ?packet.channels,
            num_samples = packet.num_samples,
            flush,
            "Queue analog data"
        );

        // TODO: split packets covering several channels into per-channel
        // blocks once drivers emit them.
        let channel = match packet.channels.as_slice() {
            [channel] => *channel,
            channels => {
                tracing::error!(
                    count = channels.len(),
                    "Analog packets covering multiple channels not supported"
                );
                return Err(SrdirError::Unsupported(format!(
                    "analog packet covers {} channels, expected exactly one",
                    channels.len()
                )));
            }
        };

        let slot = self.layout.analog_slot(channel).ok_or_else(|| {
            SrdirError::Argument(format!(
                "channel {} is not an enabled analog channel of this archive",
                channel
            ))
        })?;

        let values = packet.to_float()?;
        self.analog[slot].queue(&values, flush, writer)?;
        Ok(values.len())
    }

    /// Write out the logic buffer and every analog buffer holding samples.
    pub fn flush_all(&mut self, writer: &mut ChunkWriter) -> SrdirResult<()> {
        self.logic.flush(writer)?;
        self.flush_analog(writer)
    }

    fn flush_analog(&mut self, writer: &mut ChunkWriter) -> SrdirResult<()> {
        for buffer in &mut self.analog {
            buffer.flush(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srdir_core::{AnalogEncoding, Channel};
    use tempfile::TempDir;

    fn layout() -> ChannelLayout {
        ChannelLayout::resolve(&[
            Channel::logic(0, "D0"),
            Channel::analog(1, "A0"),
            Channel::analog(2, "A1"),
        ])
    }

    #[test]
    fn test_buffers_sized_from_layout() {
        let buffers = SampleBuffers::new(layout(), 64).unwrap();
        assert_eq!(buffers.logic().unit_size(), 1);
        assert_eq!(buffers.logic().capacity(), 64);
        assert_eq!(buffers.analog().len(), 2);
        assert_eq!(buffers.analog()[0].channel_number(), 2);
        assert_eq!(buffers.analog()[1].channel_number(), 3);
        assert_eq!(buffers.analog()[1].capacity(), 16);
    }

    #[test]
    fn test_analog_routed_by_channel_index() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buffers = SampleBuffers::new(layout(), 64).unwrap();

        let queued = buffers
            .queue_analog(Some(&Analog::from_f32(2, &[1.0, 2.0])), false, &mut writer)
            .unwrap();
        assert_eq!(queued, 2);
        assert_eq!(buffers.analog()[0].fill(), 0);
        assert_eq!(buffers.analog()[1].fill(), 2);

        buffers.queue_analog(None, true, &mut writer).unwrap();
        assert!(temp_dir.path().join("analog-1-3-1").exists());
        assert!(!temp_dir.path().join("analog-1-2-1").exists());
    }

    #[test]
    fn test_multi_channel_packet_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buffers = SampleBuffers::new(layout(), 64).unwrap();

        let mut packet = Analog::from_f32(1, &[1.0]);
        packet.channels.push(2);
        let err = buffers
            .queue_analog(Some(&packet), false, &mut writer)
            .unwrap_err();
        assert!(matches!(err, SrdirError::Unsupported(_)));
    }

    #[test]
    fn test_unmapped_channel_is_argument_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buffers = SampleBuffers::new(layout(), 64).unwrap();

        // Channel 0 is a logic channel.
        let err = buffers
            .queue_analog(Some(&Analog::from_f32(0, &[1.0])), false, &mut writer)
            .unwrap_err();
        assert!(matches!(err, SrdirError::Argument(_)));
    }

    #[test]
    fn test_malformed_encoding_queues_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buffers = SampleBuffers::new(layout(), 64).unwrap();

        let packet = Analog::new(1, AnalogEncoding::f32_le(), 4, vec![0u8; 6]);
        assert!(buffers.queue_analog(Some(&packet), true, &mut writer).is_err());
        assert_eq!(buffers.analog()[0].fill(), 0);
        assert_eq!(writer.stats().chunks_written(), 0);
    }

    #[test]
    fn test_flush_all_writes_every_non_empty_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buffers = SampleBuffers::new(layout(), 64).unwrap();

        buffers.queue_logic(&[7, 8], 1, false, &mut writer).unwrap();
        buffers
            .queue_analog(Some(&Analog::from_f32(2, &[1.0])), false, &mut writer)
            .unwrap();
        buffers.flush_all(&mut writer).unwrap();

        assert_eq!(writer.stats().logic_chunks, 1);
        assert_eq!(writer.stats().analog_chunks, 1);
        assert!(temp_dir.path().join("logic-1-1").exists());
        assert!(temp_dir.path().join("analog-1-3-1").exists());
    }

    #[test]
    fn test_analog_flush_flag_flushes_only_that_channel() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChunkWriter::new(temp_dir.path());
        let mut buffers = SampleBuffers::new(layout(), 64).unwrap();

        buffers
            .queue_analog(Some(&Analog::from_f32(1, &[1.0])), false, &mut writer)
            .unwrap();
        buffers
            .queue_analog(Some(&Analog::from_f32(2, &[2.0])), true, &mut writer)
            .unwrap();

        assert_eq!(buffers.analog()[0].fill(), 1);
        assert_eq!(buffers.analog()[1].fill(), 0);
        assert_eq!(writer.stats().analog_chunks, 1);
    }
}
