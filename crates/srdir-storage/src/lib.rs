//! # srdir storage
//!
//! Writes a live acquisition stream into a session archive directory:
//!
//! ```text
//! capture/
//! ├── version            "2"
//! ├── metadata           key/value description
//! ├── logic-1-1 ...      packed logic samples
//! └── analog-1-4-1 ...   f32 samples of analog channel 4
//! ```
//!
//! Zipping the directory contents yields a `.sr` session file.
//!
//! ## Architecture
//!
//! ```text
//! Packet ─→ SrdirOutput ─→ ArchiveWriter ─→ SampleBuffers ─→ ChunkWriter ─→ files
//!            (dispatch,     (directory,      (logic buffer,
//!             lazy init)     metadata)        analog buffers)
//! ```

pub mod archive;
pub mod buffers;
pub mod chunk_writer;
pub mod engine;
pub mod keyfile;
pub mod metadata;
pub mod output;

pub use archive::{ArchiveOptions, ArchiveStats, ArchiveWriter};
pub use buffers::{AnalogBuffer, LogicBuffer};
pub use chunk_writer::{ChunkKind, ChunkStats, ChunkWriter};
pub use engine::SampleBuffers;
pub use keyfile::KeyFile;
pub use metadata::ArchiveMetadata;
pub use output::{DirectoryState, SrdirOutput, SrdirOutputBuilder};
