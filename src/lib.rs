//! # srdir
//!
//! Records acquisition streams into sigrok session archive directories.
//!
//! The workspace is split into:
//!
//! - **`srdir-core`**: channels, datafeed packets, analog encodings, errors.
//! - **`srdir-storage`**: the `srdir` output module and its buffering engine.
//! - **`srdir-driver-mock`**: a simulated device for demos and tests.
//!
//! This crate adds the application layer: [`config`] (Figment), tracing
//! setup in [`tracing_init`], and [`record`] which drives a mock acquisition
//! through the output module. The `srdir` binary wraps them in a CLI.

pub mod config;
pub mod record;
pub mod tracing_init;

pub use config::SrdirConfig;
pub use record::{record_mock, RecordSummary};
