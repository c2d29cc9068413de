//! End-to-end tests: configuration file to finished archive directory.

use srdir::{record_mock, SrdirConfig};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_shipped_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/srdir.toml");
    let config = SrdirConfig::load_from(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.archive.chunk_bytes, 4 * 1024 * 1024);
    assert_eq!(config.mock.seed, Some(42));
}

#[test]
fn test_config_file_drives_recording() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("capture");
    let config_path = temp_dir.path().join("srdir.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[archive]
output_dir = "{}"
chunk_bytes = 2048
sigrok_version = "0.5.2"

[mock]
logic_channels = 12
analog_channels = 2
disabled_channels = [12]
samplerate = 1500
samples = 5000
block_samples = 1000
seed = 7
"#,
            output_dir.display()
        ),
    )
    .unwrap();

    let config = SrdirConfig::load_from(&config_path).unwrap();
    config.validate().unwrap();
    let summary = record_mock(&config).unwrap();

    assert!(summary.created);
    assert_eq!(summary.stats.logic_samples, 5_000);
    assert_eq!(summary.stats.analog_samples, 5_000);

    // Unit size 2: 1024 samples per logic chunk.
    let logic: Vec<u8> = (1..=5)
        .flat_map(|n| std::fs::read(output_dir.join(format!("logic-1-{}", n))).unwrap())
        .collect();
    assert_eq!(logic.len(), 10_000);
    assert!(!output_dir.join("logic-1-6").exists());
    // Counter pattern, 12 bits little-endian.
    assert_eq!(&logic[2 * 4095..2 * 4097], &[0xff, 0x0f, 0x00, 0x00]);

    // Analog A0 disabled; A1 gets the first analog number after 12 logic channels.
    let analog_bytes: usize = (1..=10)
        .map(|n| {
            std::fs::metadata(output_dir.join(format!("analog-1-13-{}", n)))
                .unwrap()
                .len() as usize
        })
        .sum();
    assert_eq!(analog_bytes, 5_000 * 4);
    assert!(!output_dir.join("analog-1-14-1").exists());

    let metadata = std::fs::read_to_string(output_dir.join("metadata")).unwrap();
    assert!(metadata.starts_with("[global]\nsigrok version=0.5.2\n\n[device 1]\n"));
    assert!(metadata.contains("samplerate=1.5 kHz\n"));
    assert!(metadata.contains("total probes=12\n"));
    assert!(metadata.contains("total analog=1\n"));
    assert!(metadata.contains("analog13=A1\n"));
    assert!(metadata.contains("unitsize=2\n"));
}

#[test]
fn test_no_samples_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = SrdirConfig::default();
    config.archive.output_dir = temp_dir.path().join("capture");
    config.mock.samples = 0;

    let summary = record_mock(&config).unwrap();
    assert!(!summary.created);
    assert_eq!(summary.packets, 2);
    assert!(!config.archive.output_dir.exists());
}
