//! Error types for the srdir archive writer.
//!
//! `SrdirError` is the single error type surfaced by every fallible operation
//! of the buffering engine, the chunk writer and the packet dispatcher. It is
//! built with `thiserror`, and its variants follow the status taxonomy the
//! session archive format's host applications expect:
//!
//! - **`Argument`**: the caller handed us something we cannot accept (missing
//!   output path, unit size mismatch, analog channel outside the session).
//! - **`Io`**: directory or file creation/write failure. The OS error text is
//!   always part of the rendered message.
//! - **`Allocation`**: a sample buffer could not be allocated.
//! - **`Unsupported`**: the packet is well formed but uses a feature the
//!   writer does not implement (analog packets covering several channels).
//! - **`SessionFailed`**: directory initialization failed earlier; the session
//!   is terminal and refuses further sample data.
//!
//! Every error is terminal for the session that produced it. Nothing is
//! retried and already written chunk files are left in place.

use thiserror::Error;

/// Convenience alias for results using the archive writer error type.
pub type SrdirResult<T> = std::result::Result<T, SrdirError>;

/// Primary error type of the archive writer.
#[derive(Error, Debug)]
pub enum SrdirError {
    /// Invalid argument supplied by the caller or the packet stream.
    ///
    /// Raised for a missing output path, a logic block whose unit size does
    /// not match the session's configured unit size, an analog packet for a
    /// channel that is not an enabled analog channel of this session, and
    /// malformed analog encodings.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Filesystem operation failed.
    ///
    /// `context` names the operation and object ("create chunk 'logic-1-3'"),
    /// `source` carries the OS error.
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Sample buffer allocation failed.
    #[error("Failed to allocate {bytes} bytes for sample buffer")]
    Allocation { bytes: usize },

    /// Packet uses a feature the writer does not implement.
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// Directory initialization failed earlier in this session.
    #[error("Archive session already failed during directory initialization")]
    SessionFailed,
}

impl SrdirError {
    /// Build an `Io` error with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Status code reported to hosts that speak integer return codes.
    pub fn status(&self) -> StatusCode {
        StatusCode::from(self)
    }
}

/// Integer status codes of the host API.
///
/// Values match the libsigrok convention so a host can pass them through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    /// No error.
    Ok = 0,
    /// Generic failure (I/O, unsupported packet, failed session).
    Error = -1,
    /// Allocation failure.
    Malloc = -2,
    /// Invalid argument.
    Arg = -3,
}

impl StatusCode {
    /// Numeric value of the status code.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<&SrdirError> for StatusCode {
    fn from(err: &SrdirError) -> Self {
        match err {
            SrdirError::Argument(_) => StatusCode::Arg,
            SrdirError::Allocation { .. } => StatusCode::Malloc,
            SrdirError::Io { .. } | SrdirError::Unsupported(_) | SrdirError::SessionFailed => {
                StatusCode::Error
            }
        }
    }
}

impl<T> From<&SrdirResult<T>> for StatusCode {
    fn from(result: &SrdirResult<T>) -> Self {
        match result {
            Ok(_) => StatusCode::Ok,
            Err(e) => StatusCode::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_includes_os_text() {
        let err = SrdirError::io(
            "create directory 'capture'",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "File exists"),
        );
        let msg = err.to_string();
        assert!(msg.contains("create directory 'capture'"));
        assert!(msg.contains("File exists"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SrdirError::Argument("unit size".into()).status(),
            StatusCode::Arg
        );
        assert_eq!(
            SrdirError::Allocation { bytes: 4 }.status(),
            StatusCode::Malloc
        );
        assert_eq!(
            SrdirError::Unsupported("multi-channel".into()).status(),
            StatusCode::Error
        );
        assert_eq!(SrdirError::SessionFailed.status(), StatusCode::Error);
        assert_eq!(StatusCode::Arg.code(), -3);
    }

    #[test]
    fn test_status_from_result() {
        let ok: SrdirResult<()> = Ok(());
        assert_eq!(StatusCode::from(&ok), StatusCode::Ok);

        let err: SrdirResult<()> = Err(SrdirError::Allocation { bytes: 1 });
        assert_eq!(StatusCode::from(&err), StatusCode::Malloc);
    }
}
