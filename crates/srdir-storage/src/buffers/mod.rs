//! Fixed-capacity sample buffers.
//!
//! Buffers decouple the block sizes chosen by acquisition drivers from the
//! chunk sizes of the archive: incoming blocks are copied in, and a buffer
//! is written out as one chunk file whenever it is full and more samples
//! are pending, or when the caller asks for a flush.

mod analog;
mod logic;

pub use analog::AnalogBuffer;
pub use logic::LogicBuffer;

use srdir_core::{SrdirError, SrdirResult};

/// Allocate a zeroed buffer of `len` items, reporting failure instead of
/// aborting.
pub(crate) fn try_alloc<T: Clone + Default>(len: usize) -> SrdirResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| SrdirError::Allocation {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    buf.resize(len, T::default());
    Ok(buf)
}
