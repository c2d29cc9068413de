//! Recording a mock acquisition into an archive directory.

use crate::config::SrdirConfig;
use srdir_core::{DeviceInfo, SrdirResult};
use srdir_driver_mock::MockDevice;
use srdir_storage::{ArchiveStats, SrdirOutput};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// Archive directory.
    pub path: PathBuf,
    /// Whether the directory was created (false when no samples arrived).
    pub created: bool,
    /// Session counters.
    pub stats: ArchiveStats,
    /// Datafeed packets handed to the output.
    pub packets: u64,
}

/// Run the configured mock device once and archive its stream.
///
/// The configuration is expected to be validated already. Stops at the
/// first packet the output rejects.
pub fn record_mock(config: &SrdirConfig) -> SrdirResult<RecordSummary> {
    let device = Arc::new(MockDevice::new(config.mock.clone())?);
    let stream = device.acquire();

    let mut output = SrdirOutput::builder()
        .output_path(&config.archive.output_dir)
        .device(device.clone() as Arc<dyn DeviceInfo>)
        .chunk_bytes(config.archive.chunk_bytes)
        .sigrok_version(config.archive.sigrok_version.clone())
        .build()?;

    let mut packets = 0u64;
    for packet in stream {
        output.receive(&packet)?;
        packets += 1;
    }

    Ok(RecordSummary {
        path: output.path().to_path_buf(),
        created: output.directory_initialized(),
        stats: output.stats(),
        packets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use srdir_core::SrdirError;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> SrdirConfig {
        let mut config = SrdirConfig::default();
        config.archive.output_dir = dir.path().join("capture");
        config.archive.chunk_bytes = 1024;
        config.mock.samples = 3_000;
        config.mock.block_samples = 700;
        config.mock.seed = Some(4);
        config
    }

    #[test]
    fn test_record_mock_writes_archive() {
        let temp_dir = TempDir::new().unwrap();
        let summary = record_mock(&config(&temp_dir)).unwrap();

        assert!(summary.created);
        assert_eq!(summary.stats.logic_samples, 3_000);
        assert_eq!(summary.stats.analog_samples, 3_000);
        // 3000 logic bytes in 1024-byte chunks, 12000 analog bytes likewise.
        assert_eq!(summary.stats.chunks.logic_chunks, 3);
        assert_eq!(summary.stats.chunks.analog_chunks, 12);
        // meta + 5 blocks of (logic, analog) + end
        assert_eq!(summary.packets, 12);
        assert!(summary.path.join("metadata").exists());
    }

    #[test]
    fn test_existing_output_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        std::fs::create_dir(&config.archive.output_dir).unwrap();

        let err = record_mock(&config).unwrap_err();
        assert!(matches!(err, SrdirError::Io { .. }));
    }
}
